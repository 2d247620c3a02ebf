//! Fixture markers
//!
//! Test sources describe their initial cursor or selection inline:
//!
//! ```text
//! foo(
//!   [cursor]bar
//! )
//! ```
//!
//! Markers are decoded in a single top-to-bottom, left-to-right scan and
//! stripped from the code. The first `[cursor]` wins; every `[start]` and
//! `[end]` overrides what came before it, so the last pair wins.

use selection::{Position, Selection};

pub const CURSOR: &str = "[cursor]";
pub const START: &str = "[start]";
pub const END: &str = "[end]";

/// Clean code and initial selection decoded from fixture text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixture {
    pub code: String,
    pub selection: Selection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    Cursor,
    Start,
    End,
}

impl Marker {
    fn text(&self) -> &'static str {
        match self {
            Self::Cursor => CURSOR,
            Self::Start => START,
            Self::End => END,
        }
    }
}

/// Earliest marker in `text`, with its byte offset
fn next_marker(text: &str) -> Option<(usize, Marker)> {
    [Marker::Cursor, Marker::Start, Marker::End]
        .into_iter()
        .filter_map(|marker| text.find(marker.text()).map(|offset| (offset, marker)))
        .min_by_key(|(offset, _)| *offset)
}

/// Decode fixture text; without markers the selection is a cursor at
/// `default_position`
pub fn decode(text: &str, default_position: Position) -> Fixture {
    let mut selection = Selection::cursor_at_position(default_position);
    let mut cursor_seen = false;
    let mut lines = Vec::new();

    for (index, raw) in text.split('\n').enumerate() {
        let mut clean = String::with_capacity(raw.len());
        let mut character = 0u32;
        let mut rest = raw;

        while let Some((offset, marker)) = next_marker(rest) {
            let before = &rest[..offset];
            clean.push_str(before);
            character += before.chars().count() as u32;

            let position = Position::new(index as u32, character);
            match marker {
                Marker::Cursor if !cursor_seen => {
                    cursor_seen = true;
                    selection = Selection::cursor_at_position(position);
                }
                Marker::Cursor => {}
                Marker::Start => selection = Selection::cursor_at_position(position),
                Marker::End => selection = selection.extend_end_to(position),
            }

            rest = &rest[offset + marker.text().len()..];
        }

        clean.push_str(rest);
        lines.push(clean);
    }

    Fixture {
        code: lines.join("\n"),
        selection,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_marker() {
        let fixture = decode("foo(\n  [cursor]bar\n)", Position::zero());

        assert_eq!(fixture.code, "foo(\n  bar\n)");
        assert_eq!(fixture.selection, Selection::cursor_at(1, 2));
    }

    #[test]
    fn test_no_marker_uses_default_position() {
        let fixture = decode("const a = 1;", Position::new(0, 6));

        assert_eq!(fixture.code, "const a = 1;");
        assert_eq!(fixture.selection, Selection::cursor_at(0, 6));
    }

    #[test]
    fn test_selection_markers_on_one_line() {
        let fixture = decode("const a = [start]1 + 2[end];", Position::zero());

        assert_eq!(fixture.code, "const a = 1 + 2;");
        assert_eq!(fixture.selection, Selection::from_coordinates((0, 10), (0, 15)));
    }

    #[test]
    fn test_selection_markers_across_lines() {
        let fixture = decode("if (a) {\n  [start]b();\n}[end]", Position::zero());

        assert_eq!(fixture.code, "if (a) {\n  b();\n}");
        assert_eq!(fixture.selection, Selection::from_coordinates((1, 2), (2, 1)));
    }

    #[test]
    fn test_first_cursor_wins() {
        let fixture = decode("[cursor]a;\nb[cursor];", Position::zero());

        assert_eq!(fixture.code, "a;\nb;");
        assert_eq!(fixture.selection, Selection::cursor_at(0, 0));
    }

    #[test]
    fn test_last_start_end_pair_wins() {
        let fixture = decode("[start]a[end];\n[start]bb[end];", Position::zero());

        assert_eq!(fixture.code, "a;\nbb;");
        assert_eq!(fixture.selection, Selection::from_coordinates((1, 0), (1, 2)));
    }

    #[test]
    fn test_multibyte_characters_before_marker() {
        let fixture = decode("\"é\" + [cursor]x", Position::zero());

        assert_eq!(fixture.code, "\"é\" + x");
        assert_eq!(fixture.selection, Selection::cursor_at(0, 6));
    }
}
