//! Selection range

use crate::Position;
use serde::{Deserialize, Serialize};

/// A selection in the document
///
/// `start` is never after `end`. A selection where both are equal is a cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawSelection")]
pub struct Selection {
    start: Position,
    end: Position,
}

#[derive(Deserialize)]
struct RawSelection {
    start: Position,
    end: Position,
}

impl From<RawSelection> for Selection {
    fn from(raw: RawSelection) -> Self {
        Selection::new(raw.start, raw.end)
    }
}

impl Selection {
    /// Create a selection; the two positions are ordered if needed
    pub fn new(a: Position, b: Position) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    pub fn from_coordinates(start: (u32, u32), end: (u32, u32)) -> Self {
        Self::new(Position::new(start.0, start.1), Position::new(end.0, end.1))
    }

    /// Create a cursor (no selection)
    pub fn cursor_at(line: u32, character: u32) -> Self {
        Self::cursor_at_position(Position::new(line, character))
    }

    pub fn cursor_at_position(position: Position) -> Self {
        Self {
            start: position,
            end: position,
        }
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn end(&self) -> Position {
        self.end
    }

    /// Is this just a cursor?
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn is_one_line(&self) -> bool {
        self.start.line == self.end.line
    }

    pub fn is_multi_lines(&self) -> bool {
        !self.is_one_line()
    }

    /// Number of lines spanned, minus one
    pub fn height(&self) -> u32 {
        self.end.line - self.start.line
    }

    pub fn starts_before(&self, other: &Selection) -> bool {
        self.start.is_before(other.start)
    }

    /// Check if position is within selection (bounds included)
    pub fn contains(&self, position: Position) -> bool {
        position >= self.start && position <= self.end
    }

    /// Check if this selection lies within `other`
    pub fn is_inside(&self, other: &Selection) -> bool {
        other.contains(self.start) && other.contains(self.end)
    }

    /// Check if both selections share at least one position
    pub fn intersects(&self, other: &Selection) -> bool {
        self.intersection(other).is_some()
    }

    pub fn extend_to_start_of_line(&self) -> Selection {
        Selection::new(self.start.put_at_start_of_line(), self.end)
    }

    pub fn extend_to_start_of_next_line(&self) -> Selection {
        Selection::new(self.start, self.end.put_at_next_line().put_at_start_of_line())
    }

    pub fn extend_start_to(&self, position: Position) -> Selection {
        Selection::new(position, self.end)
    }

    pub fn extend_end_to(&self, position: Position) -> Selection {
        Selection::new(self.start, position)
    }

    pub fn extend_start_to_end_of(&self, other: &Selection) -> Selection {
        self.extend_start_to(other.end)
    }

    pub fn extend_end_to_start_of(&self, other: &Selection) -> Selection {
        self.extend_end_to(other.start)
    }

    /// Union with another selection
    pub fn union(&self, other: &Selection) -> Selection {
        Selection::new(self.start.min(other.start), self.end.max(other.end))
    }

    /// Intersection with another selection
    pub fn intersection(&self, other: &Selection) -> Option<Selection> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);

        if start <= end {
            Some(Selection::new(start, end))
        } else {
            None
        }
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::cursor_at_position(Position::zero())
    }
}

impl std::fmt::Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection() {
        let sel = Selection::from_coordinates((0, 5), (0, 10));

        assert!(!sel.is_empty());
        assert!(sel.is_one_line());
        assert_eq!(sel.start(), Position::new(0, 5));
        assert_eq!(sel.end(), Position::new(0, 10));
    }

    #[test]
    fn test_reversed_input_is_ordered() {
        let sel = Selection::new(Position::new(3, 1), Position::new(0, 10));

        assert_eq!(sel.start(), Position::new(0, 10));
        assert_eq!(sel.end(), Position::new(3, 1));
        assert_eq!(sel.height(), 3);
        assert!(sel.is_multi_lines());
    }

    #[test]
    fn test_extension_keeps_order() {
        let sel = Selection::from_coordinates((2, 4), (2, 8));

        let extended = sel.extend_start_to(Position::new(5, 0));
        assert!(extended.start() <= extended.end());
        assert_eq!(extended, Selection::from_coordinates((2, 8), (5, 0)));

        let extended = sel.extend_end_to(Position::new(1, 0));
        assert!(extended.start() <= extended.end());
        assert_eq!(extended, Selection::from_coordinates((1, 0), (2, 4)));

        assert_eq!(
            sel.extend_to_start_of_line(),
            Selection::from_coordinates((2, 0), (2, 8))
        );
        assert_eq!(
            sel.extend_to_start_of_next_line(),
            Selection::from_coordinates((2, 4), (3, 0))
        );
    }

    #[test]
    fn test_containment() {
        let outer = Selection::from_coordinates((1, 0), (4, 2));
        let inner = Selection::from_coordinates((2, 3), (3, 0));
        let cursor = Selection::cursor_at(4, 2);

        assert!(inner.is_inside(&outer));
        assert!(!outer.is_inside(&inner));
        assert!(cursor.is_inside(&outer));
        assert!(!Selection::cursor_at(4, 3).is_inside(&outer));
    }

    #[test]
    fn test_intersection() {
        let a = Selection::from_coordinates((0, 0), (0, 5));
        let b = Selection::from_coordinates((0, 5), (1, 0));
        let c = Selection::from_coordinates((0, 6), (1, 0));

        assert!(a.intersects(&b));
        assert_eq!(a.intersection(&b), Some(Selection::cursor_at(0, 5)));
        assert!(!a.intersects(&c));
        assert_eq!(a.union(&c), Selection::from_coordinates((0, 0), (1, 0)));
    }

    #[test]
    fn test_deserialize_orders_positions() {
        let sel: Selection = serde_json::from_str(
            r#"{"start":{"line":2,"character":0},"end":{"line":1,"character":4}}"#,
        )
        .unwrap();

        assert_eq!(sel, Selection::from_coordinates((1, 4), (2, 0)));
    }
}
