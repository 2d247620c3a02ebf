//! In-memory editor
//!
//! Deterministic realization of [`Editor`] used by tests, and the reference
//! behavior for host-backed editors.

use std::collections::{BTreeMap, VecDeque};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::Mutex;
use selection::{Position, Selection};

use crate::editor::{
    Choice, CodeReference, ComputeModifications, ConfirmPositions, DelegateResult, Editor,
    EditorCommand, ErrorReason, SelectedPosition,
};
use crate::highlight::{self, HighlightRegistry};
use crate::{fixture, CodeMatrix, EditorError};

const DEFAULT_PATH: &str = "in-memory.ts";

/// Editor backed by a [`CodeMatrix`]
pub struct InMemoryEditor {
    path: PathBuf,
    matrix: CodeMatrix,
    selection: Selection,
    other_files: BTreeMap<PathBuf, String>,
    highlights: HighlightRegistry,
    shown_errors: Mutex<Vec<ErrorReason>>,
    delegated: Vec<EditorCommand>,
    choice_answers: VecDeque<Option<usize>>,
    input_answers: VecDeque<Option<String>>,
}

impl InMemoryEditor {
    /// Create from fixture text; see [`fixture`] for the markers
    pub fn new(code: &str) -> Self {
        Self::with_position(code, Position::zero())
    }

    /// Create from fixture text, with a cursor at `position` unless markers
    /// say otherwise
    pub fn with_position(code: &str, position: Position) -> Self {
        let fixture = fixture::decode(code, position);
        Self::from_code(&fixture.code, fixture.selection)
    }

    /// Create from plain code, without decoding markers
    pub fn from_code(code: &str, selection: Selection) -> Self {
        Self {
            path: PathBuf::from(DEFAULT_PATH),
            matrix: CodeMatrix::from_code(code),
            selection,
            other_files: BTreeMap::new(),
            highlights: HighlightRegistry::new(),
            shown_errors: Mutex::new(Vec::new()),
            delegated: Vec::new(),
            choice_answers: VecDeque::new(),
            input_answers: VecDeque::new(),
        }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }

    /// Add another workspace file
    pub fn with_file(mut self, path: impl Into<PathBuf>, code: impl Into<String>) -> Self {
        self.other_files.insert(path.into(), code.into());
        self
    }

    /// Queue the index the user picks at the next choice; `None` cancels
    pub fn answer_choice(&mut self, index: Option<usize>) {
        self.choice_answers.push_back(index);
    }

    /// Queue the text the user types at the next input; `None` cancels
    pub fn answer_input(&mut self, input: Option<String>) {
        self.input_answers.push_back(input);
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn matrix(&self) -> &CodeMatrix {
        &self.matrix
    }

    /// Errors shown so far
    pub fn shown_errors(&self) -> Vec<ErrorReason> {
        self.shown_errors.lock().clone()
    }

    /// Commands delegated so far
    pub fn delegated(&self) -> &[EditorCommand] {
        &self.delegated
    }

    pub fn highlights(&self) -> &HighlightRegistry {
        &self.highlights
    }

    /// Current code decorated with highlight markers
    pub fn highlighted_code(&self) -> String {
        highlight::render(&self.code(), &self.highlights)
    }

    /// Move the cursor to `new_cursor`, or keep the selection inside the new text
    fn place_cursor(&mut self, new_cursor: Option<Position>) {
        self.selection = match new_cursor {
            Some(position) => Selection::cursor_at_position(position),
            None => Selection::new(
                self.matrix.clamp(self.selection.start()),
                self.matrix.clamp(self.selection.end()),
            ),
        };
    }

    fn references_in(path: &Path, code: &str, needle: &str) -> Vec<CodeReference> {
        let needle: Vec<char> = needle.chars().collect();
        let mut references = Vec::new();

        for (line_index, line) in code.split('\n').enumerate() {
            let chars: Vec<char> = line.chars().collect();
            if chars.len() < needle.len() {
                continue;
            }

            for start in 0..=chars.len() - needle.len() {
                let end = start + needle.len();
                let bounded = start.checked_sub(1).map_or(true, |i| !is_word_char(chars[i]))
                    && chars.get(end).map_or(true, |c| !is_word_char(*c));

                if bounded && chars[start..end] == needle[..] {
                    references.push(CodeReference {
                        path: path.to_path_buf(),
                        selection: Selection::from_coordinates(
                            (line_index as u32, start as u32),
                            (line_index as u32, end as u32),
                        ),
                    });
                }
            }
        }

        references
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

#[async_trait]
impl Editor for InMemoryEditor {
    fn code(&self) -> String {
        self.matrix.to_code()
    }

    fn selection(&self) -> Selection {
        self.selection
    }

    async fn write(&mut self, code: &str, new_cursor: Option<Position>) -> Result<(), EditorError> {
        self.matrix = CodeMatrix::from_code(code);
        self.place_cursor(new_cursor);
        Ok(())
    }

    async fn read_then_write(
        &mut self,
        selection: Selection,
        compute: ComputeModifications<'_>,
        new_cursor: Option<Position>,
    ) -> Result<(), EditorError> {
        let read = self.matrix.read(selection)?;
        let modifications = compute(read);
        tracing::trace!(%selection, count = modifications.len(), "read then write");

        self.matrix.apply(modifications)?;
        self.place_cursor(new_cursor);
        Ok(())
    }

    async fn write_in(&mut self, path: &Path, code: &str) -> Result<(), EditorError> {
        if path == self.path {
            self.matrix = CodeMatrix::from_code(code);
        } else {
            self.other_files.insert(path.to_path_buf(), code.to_string());
        }
        Ok(())
    }

    async fn code_of(&self, path: &Path) -> Result<String, EditorError> {
        if path == self.path {
            return Ok(self.code());
        }
        self.other_files
            .get(path)
            .cloned()
            .ok_or_else(|| EditorError::HostIo(format!("No file at {}", path.display())))
    }

    async fn workspace_files(&self) -> Result<Vec<PathBuf>, EditorError> {
        let mut files: Vec<PathBuf> = self.other_files.keys().cloned().collect();
        files.push(self.path.clone());
        files.sort();
        Ok(files)
    }

    async fn delegate(&mut self, command: EditorCommand) -> DelegateResult {
        self.delegated.push(command);
        DelegateResult::NotSupported
    }

    async fn show_error(&self, reason: ErrorReason) {
        tracing::debug!("{}", reason);
        self.shown_errors.lock().push(reason);
    }

    async fn ask_user_choice(&mut self, choices: Vec<Choice>, _placeholder: Option<&str>) -> Option<Choice> {
        let index = self.choice_answers.pop_front().unwrap_or(Some(0))?;
        choices.into_iter().nth(index)
    }

    async fn ask_user_input(&mut self, default: Option<String>) -> Option<String> {
        self.input_answers.pop_front().unwrap_or(default)
    }

    async fn move_cursor_to(&mut self, position: Position) {
        self.selection = Selection::cursor_at_position(position);
    }

    async fn get_selection_references(&self, selection: Selection) -> Result<Vec<CodeReference>, EditorError> {
        let needle = self.matrix.read(selection)?;
        if needle.is_empty() || needle.contains('\n') {
            return Ok(vec![CodeReference {
                path: self.path.clone(),
                selection,
            }]);
        }

        let mut references = Self::references_in(&self.path, &self.code(), &needle);
        for (path, code) in &self.other_files {
            references.extend(Self::references_in(path, code, &needle));
        }
        Ok(references)
    }

    async fn ask_for_positions(&mut self, params: Vec<SelectedPosition>, on_confirm: ConfirmPositions<'_>) {
        on_confirm(params);
    }

    fn highlight(&mut self, source: Selection, bindings: Vec<Selection>) -> usize {
        self.highlights.highlight(source, bindings)
    }

    fn remove_highlight(&mut self, source: Selection) {
        self.highlights.remove(source);
    }

    fn remove_all_highlights(&mut self) {
        self.highlights.clear();
    }

    fn find_highlight(&self, selection: Selection) -> Option<Selection> {
        self.highlights.find(selection)
    }
}
