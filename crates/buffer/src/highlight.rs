//! Highlight registry
//!
//! Correlates a source range with the ranges bound to it (e.g. every
//! occurrence a refactoring may apply to) under one color index. Pure
//! bookkeeping: highlights never own or change text.

use std::collections::BTreeMap;

use selection::{Position, Selection};

/// A highlighted source and its bound ranges
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightGroup {
    pub source: Selection,
    pub bindings: Vec<Selection>,
    pub color: usize,
}

/// Highlights of one editor
#[derive(Debug, Clone, Default)]
pub struct HighlightRegistry {
    groups: Vec<HighlightGroup>,
    next_color: usize,
}

impl HighlightRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Highlight `source` and its `bindings`, returning the color used.
    ///
    /// Highlighting an already highlighted source replaces its bindings and
    /// keeps its color.
    pub fn highlight(&mut self, source: Selection, bindings: Vec<Selection>) -> usize {
        if let Some(group) = self.groups.iter_mut().find(|g| g.source == source) {
            group.bindings = bindings;
            return group.color;
        }

        let color = self.next_color;
        self.next_color += 1;
        self.groups.push(HighlightGroup {
            source,
            bindings,
            color,
        });
        color
    }

    /// Remove the highlight of `source`
    pub fn remove(&mut self, source: Selection) -> bool {
        let before = self.groups.len();
        self.groups.retain(|g| g.source != source);
        self.groups.len() != before
    }

    pub fn clear(&mut self) {
        self.groups.clear();
        self.next_color = 0;
    }

    /// Color the next highlight will get
    pub fn next_color_index(&self) -> usize {
        self.next_color
    }

    pub fn color_of(&self, source: Selection) -> Option<usize> {
        self.groups
            .iter()
            .find(|g| g.source == source)
            .map(|g| g.color)
    }

    /// Source of the group whose source or bindings contain `selection`
    pub fn find(&self, selection: Selection) -> Option<Selection> {
        self.groups
            .iter()
            .find(|g| {
                selection.is_inside(&g.source)
                    || g.bindings.iter().any(|b| selection.is_inside(b))
            })
            .map(|g| g.source)
    }

    pub fn groups(&self) -> &[HighlightGroup] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Every highlighted range with its color
    pub fn decorations(&self) -> Vec<(Selection, usize)> {
        self.groups
            .iter()
            .flat_map(|g| {
                std::iter::once((g.source, g.color))
                    .chain(g.bindings.iter().map(move |b| (*b, g.color)))
            })
            .collect()
    }
}

/// Markers to emit at one position
#[derive(Default)]
struct Markers {
    closing: Vec<String>,
    opening: Vec<String>,
}

/// Decorate `code` with `[hN]` / `[/hN]` around every highlighted range.
///
/// At a shared position, closing markers come before opening ones. Markers
/// positioned outside `code` are not emitted.
pub fn render(code: &str, registry: &HighlightRegistry) -> String {
    let mut markers: BTreeMap<Position, Markers> = BTreeMap::new();

    for (selection, color) in registry.decorations() {
        let open = format!("[h{color}]");
        let close = format!("[/h{color}]");

        if selection.is_empty() {
            markers
                .entry(selection.start())
                .or_default()
                .opening
                .push(format!("{open}{close}"));
            continue;
        }

        markers.entry(selection.start()).or_default().opening.push(open);
        markers.entry(selection.end()).or_default().closing.push(close);
    }

    let mut rendered = String::with_capacity(code.len());
    for (line_index, line) in code.split('\n').enumerate() {
        if line_index > 0 {
            rendered.push('\n');
        }

        let chars: Vec<char> = line.chars().collect();
        for character in 0..=chars.len() {
            let position = Position::new(line_index as u32, character as u32);
            if let Some(at) = markers.get(&position) {
                at.closing.iter().for_each(|m| rendered.push_str(m));
                at.opening.iter().for_each(|m| rendered.push_str(m));
            }
            if let Some(c) = chars.get(character) {
                rendered.push(*c);
            }
        }
    }

    rendered
}
