//! In-memory code matrix
//!
//! The buffer as lines of characters. Modifications are committed right-most
//! first so that every pending modification still addresses valid
//! coordinates of the original text.

use selection::{Position, Selection};

use crate::{BufferError, Modification};

const LINE_SEPARATOR: char = '\n';

/// A line slot
#[derive(Debug, Clone, PartialEq, Eq)]
enum Line {
    Chars(Vec<char>),
    /// Absorbed into a previous line by a multi-line replacement
    Deleted,
}

/// Line/character grid of a buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeMatrix {
    lines: Vec<Line>,
}

impl CodeMatrix {
    pub fn from_code(code: &str) -> Self {
        Self {
            lines: code
                .split(LINE_SEPARATOR)
                .map(|line| Line::Chars(line.chars().collect()))
                .collect(),
        }
    }

    /// Serialize back to text, skipping deleted slots
    pub fn to_code(&self) -> String {
        self.lines().join("\n")
    }

    /// Live lines as strings
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .iter()
            .filter_map(|line| match line {
                Line::Chars(chars) => Some(chars.iter().collect()),
                Line::Deleted => None,
            })
            .collect()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Character count of a line
    pub fn line_len(&self, line: u32) -> Option<usize> {
        match self.lines.get(line as usize)? {
            Line::Chars(chars) => Some(chars.len()),
            Line::Deleted => None,
        }
    }

    /// Position right after the last character
    pub fn end(&self) -> Position {
        let last = self.line_count().saturating_sub(1) as u32;
        let len = self.line_len(last).unwrap_or_default();
        Position::new(last, len as u32)
    }

    /// Nearest position inside the buffer
    pub fn clamp(&self, position: Position) -> Position {
        let end = self.end();
        if position > end {
            return end;
        }
        let len = self.line_len(position.line).unwrap_or_default() as u32;
        position.put_at_character(position.character.min(len))
    }

    /// Whole buffer as a selection
    pub fn full_selection(&self) -> Selection {
        Selection::new(Position::zero(), self.end())
    }

    /// Text covered by `selection`
    pub fn read(&self, selection: Selection) -> Result<String, BufferError> {
        let (start, end) = (selection.start(), selection.end());
        let start_line = self.chars(start)?;
        let end_line = self.chars(end)?;

        if selection.is_one_line() {
            return Ok(start_line[start.character as usize..end.character as usize]
                .iter()
                .collect());
        }

        let mut text: String = start_line[start.character as usize..].iter().collect();
        for line in start.line + 1..end.line {
            text.push(LINE_SEPARATOR);
            text.extend(self.chars(Position::new(line, 0))?.iter());
        }
        text.push(LINE_SEPARATOR);
        text.extend(end_line[..end.character as usize].iter());

        Ok(text)
    }

    /// Commit all modifications against the current coordinates.
    ///
    /// Either every modification is applied or, on error, none is.
    pub fn apply(&mut self, modifications: Vec<Modification>) -> Result<(), BufferError> {
        for modification in &modifications {
            self.chars(modification.selection.start())?;
            self.chars(modification.selection.end())?;
        }

        let mut ordered: Vec<(usize, Modification)> =
            modifications.into_iter().enumerate().collect();

        // Document order, to detect overlaps between neighbours
        ordered.sort_by(|(ia, a), (ib, b)| {
            (a.selection.start(), a.selection.end(), ia)
                .cmp(&(b.selection.start(), b.selection.end(), ib))
        });
        for pair in ordered.windows(2) {
            let (first, second) = (&pair[0].1.selection, &pair[1].1.selection);
            if first.end() > second.start() {
                return Err(BufferError::OverlappingEdit {
                    first: *first,
                    second: *second,
                });
            }
        }

        // Right-most first. On a shared start the wider range goes first, and
        // same-point insertions go last-given first so they end up in input order.
        ordered.reverse();

        for (_, modification) in &ordered {
            self.splice(modification)?;
        }

        // Inserted text may hold separators and some slots may be deleted
        *self = Self::from_code(&self.to_code());
        tracing::trace!(count = ordered.len(), lines = self.line_count(), "committed modifications");

        Ok(())
    }

    fn splice(&mut self, modification: &Modification) -> Result<(), BufferError> {
        let start = modification.selection.start();
        let end = modification.selection.end();
        let replacement = modification.code.chars();

        if start.line == end.line {
            let line = self.chars_mut(start)?;
            line.splice(start.character as usize..end.character as usize, replacement);
            return Ok(());
        }

        let tail = self.chars(end)?[end.character as usize..].to_vec();
        let line = self.chars_mut(start)?;
        line.truncate(start.character as usize);
        line.extend(replacement);
        line.extend(tail);

        for slot in &mut self.lines[start.line as usize + 1..=end.line as usize] {
            *slot = Line::Deleted;
        }

        Ok(())
    }

    /// Characters of the line holding `position`, checking bounds
    fn chars(&self, position: Position) -> Result<&Vec<char>, BufferError> {
        match self.lines.get(position.line as usize) {
            Some(Line::Chars(chars)) if position.character as usize <= chars.len() => Ok(chars),
            _ => Err(BufferError::OutOfBounds { position }),
        }
    }

    fn chars_mut(&mut self, position: Position) -> Result<&mut Vec<char>, BufferError> {
        match self.lines.get_mut(position.line as usize) {
            Some(Line::Chars(chars)) if position.character as usize <= chars.len() => Ok(chars),
            _ => Err(BufferError::OutOfBounds { position }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sel(start: (u32, u32), end: (u32, u32)) -> Selection {
        Selection::from_coordinates(start, end)
    }

    #[test]
    fn test_clamp() {
        let matrix = CodeMatrix::from_code("abc\nd");

        assert_eq!(matrix.clamp(Position::new(0, 2)), Position::new(0, 2));
        assert_eq!(matrix.clamp(Position::new(0, 9)), Position::new(0, 3));
        assert_eq!(matrix.clamp(Position::new(4, 0)), Position::new(1, 1));
    }

    #[test]
    fn test_line_count_matches_separators() {
        assert_eq!(CodeMatrix::from_code("").line_count(), 1);
        assert_eq!(CodeMatrix::from_code("a\nb\n").line_count(), 3);
        assert_eq!(CodeMatrix::from_code("a\nb\n").to_code(), "a\nb\n");
    }

    #[test]
    fn test_read_single_line() {
        let matrix = CodeMatrix::from_code("const a = 12;");
        assert_eq!(matrix.read(sel((0, 6), (0, 7))).unwrap(), "a");
        assert_eq!(matrix.read(Selection::cursor_at(0, 3)).unwrap(), "");
    }

    #[test]
    fn test_read_multi_line() {
        let matrix = CodeMatrix::from_code("abc\ndef\nghi\njkl");
        assert_eq!(matrix.read(sel((0, 1), (2, 2))).unwrap(), "bc\ndef\ngh");
        assert_eq!(matrix.read(sel((1, 3), (2, 0))).unwrap(), "\n");
    }

    #[test]
    fn test_read_out_of_bounds() {
        let matrix = CodeMatrix::from_code("abc");
        assert_eq!(
            matrix.read(sel((0, 0), (0, 4))),
            Err(BufferError::OutOfBounds {
                position: Position::new(0, 4)
            })
        );
        assert!(matrix.read(sel((0, 0), (1, 0))).is_err());
    }

    #[test]
    fn test_no_modifications_keeps_code() {
        let code = "function a() {\n  return 1;\n}\n";
        let mut matrix = CodeMatrix::from_code(code);
        matrix.apply(Vec::new()).unwrap();
        assert_eq!(matrix.to_code(), code);
    }

    #[test]
    fn test_single_line_replacement_keeps_line_count() {
        let mut matrix = CodeMatrix::from_code("abc");
        matrix.apply(vec![Modification::new("Z", sel((0, 1), (0, 2)))]).unwrap();
        assert_eq!(matrix.lines(), ["aZc"]);
    }

    #[test]
    fn test_multi_line_merge_keeps_tail() {
        let mut matrix = CodeMatrix::from_code("abc\ndef\nghi");
        matrix.apply(vec![Modification::new("X", sel((0, 1), (2, 2)))]).unwrap();
        assert_eq!(matrix.lines(), ["aXi"]);
        assert_eq!(matrix.line_count(), 1);
    }

    #[test]
    fn test_replacement_with_new_lines() {
        let mut matrix = CodeMatrix::from_code("a => b;");
        matrix
            .apply(vec![Modification::new("{\n  return b;\n}", sel((0, 5), (0, 6)))])
            .unwrap();
        assert_eq!(matrix.to_code(), "a => {\n  return b;\n};");
        assert_eq!(matrix.line_count(), 3);
    }

    #[test]
    fn test_commit_order_does_not_matter() {
        let code = "if (a) {\n  b();\n} else {\n  c();\n}";
        let modifications = vec![
            Modification::new("!a", sel((0, 4), (0, 5))),
            Modification::new("{\n  c();\n}", sel((0, 7), (2, 1))),
            Modification::new("{\n  b();\n}", sel((2, 7), (4, 1))),
        ];
        let expected = "if (!a) {\n  c();\n} else {\n  b();\n}";

        let permutations = [[0, 1, 2], [0, 2, 1], [1, 0, 2], [1, 2, 0], [2, 0, 1], [2, 1, 0]];
        for order in permutations {
            let mut matrix = CodeMatrix::from_code(code);
            let shuffled = order.iter().map(|i| modifications[*i].clone()).collect();
            matrix.apply(shuffled).unwrap();
            assert_eq!(matrix.to_code(), expected, "order {order:?}");
        }
    }

    #[test]
    fn test_modifications_sharing_a_line() {
        let mut matrix = CodeMatrix::from_code("one\ntwo three\nfour");
        matrix
            .apply(vec![
                Modification::new("1", sel((0, 0), (1, 3))),
                Modification::new("3", sel((1, 4), (2, 4))),
            ])
            .unwrap();
        assert_eq!(matrix.to_code(), "1 3");
    }

    #[test]
    fn test_insertion_at_start_of_replaced_range() {
        let mut matrix = CodeMatrix::from_code("value");
        matrix
            .apply(vec![
                Modification::insert(Position::new(0, 0), "("),
                Modification::new("x", sel((0, 0), (0, 5))),
                Modification::insert(Position::new(0, 5), ")"),
            ])
            .unwrap();
        assert_eq!(matrix.to_code(), "(x)");
    }

    #[test]
    fn test_insertions_at_same_point_keep_input_order() {
        let mut matrix = CodeMatrix::from_code("ab");
        matrix
            .apply(vec![
                Modification::insert(Position::new(0, 1), "1"),
                Modification::insert(Position::new(0, 1), "2"),
            ])
            .unwrap();
        assert_eq!(matrix.to_code(), "a12b");
    }

    #[test]
    fn test_overlapping_modifications_are_rejected() {
        let mut matrix = CodeMatrix::from_code("abcdef");
        let err = matrix
            .apply(vec![
                Modification::new("X", sel((0, 0), (0, 3))),
                Modification::new("Y", sel((0, 2), (0, 5))),
            ])
            .unwrap_err();

        assert_eq!(
            err,
            BufferError::OverlappingEdit {
                first: sel((0, 0), (0, 3)),
                second: sel((0, 2), (0, 5)),
            }
        );
        assert_eq!(matrix.to_code(), "abcdef");
    }

    #[test]
    fn test_out_of_bounds_modification_changes_nothing() {
        let mut matrix = CodeMatrix::from_code("abc\ndef");
        let result = matrix.apply(vec![
            Modification::new("X", sel((0, 0), (0, 1))),
            Modification::new("Y", sel((1, 0), (3, 0))),
        ]);

        assert!(matches!(result, Err(BufferError::OutOfBounds { .. })));
        assert_eq!(matrix.to_code(), "abc\ndef");
    }

    #[test]
    fn test_touching_ranges_are_not_overlapping() {
        let mut matrix = CodeMatrix::from_code("abcdef");
        matrix
            .apply(vec![
                Modification::new("1", sel((0, 3), (0, 6))),
                Modification::new("2", sel((0, 0), (0, 3))),
            ])
            .unwrap();
        assert_eq!(matrix.to_code(), "21");
    }

    #[test]
    fn test_full_selection() {
        let matrix = CodeMatrix::from_code("ab\ncde");
        assert_eq!(matrix.full_selection(), sel((0, 0), (1, 3)));
        assert_eq!(matrix.read(matrix.full_selection()).unwrap(), "ab\ncde");
    }
}
