//! # Foxkit Selection
//!
//! Line/character positions and ordered selections shared by the buffer
//! and refactoring crates.

pub mod range;

use serde::{Deserialize, Serialize};

pub use range::Selection;

/// Position in document
///
/// Both coordinates are 0-indexed. Every transform returns a new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Line number (0-indexed)
    pub line: u32,
    /// Character offset in the line (0-indexed)
    pub character: u32,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }

    pub fn zero() -> Self {
        Self { line: 0, character: 0 }
    }

    /// Build a position from a producer that numbers lines from 1.
    ///
    /// Returns `None` for line 0, which such producers never emit.
    pub fn from_one_based_line(line: u32, character: u32) -> Option<Self> {
        let line = line.checked_sub(1)?;
        Some(Self { line, character })
    }

    pub fn is_before(&self, other: Position) -> bool {
        *self < other
    }

    pub fn is_after(&self, other: Position) -> bool {
        *self > other
    }

    pub fn is_equal_to(&self, other: Position) -> bool {
        *self == other
    }

    pub fn is_same_line_as(&self, other: Position) -> bool {
        self.line == other.line
    }

    pub fn put_at_start_of_line(&self) -> Self {
        Self::new(self.line, 0)
    }

    pub fn put_at_next_line(&self) -> Self {
        self.add_lines(1)
    }

    pub fn put_at_previous_line(&self) -> Self {
        self.remove_lines(1)
    }

    /// Same line, character taken from `other`
    pub fn put_at_same_character(&self, other: Position) -> Self {
        Self::new(self.line, other.character)
    }

    pub fn put_at_character(&self, character: u32) -> Self {
        Self::new(self.line, character)
    }

    pub fn add_characters(&self, count: u32) -> Self {
        Self::new(self.line, self.character.saturating_add(count))
    }

    pub fn remove_characters(&self, count: u32) -> Self {
        Self::new(self.line, self.character.saturating_sub(count))
    }

    pub fn add_lines(&self, count: u32) -> Self {
        Self::new(self.line.saturating_add(count), self.character)
    }

    pub fn remove_lines(&self, count: u32) -> Self {
        Self::new(self.line.saturating_sub(count), self.character)
    }

    /// Move position
    pub fn offset(&self, line_delta: i64, character_delta: i64) -> Self {
        Self {
            line: (self.line as i64 + line_delta).clamp(0, u32::MAX as i64) as u32,
            character: (self.character as i64 + character_delta).clamp(0, u32::MAX as i64) as u32,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::zero()
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.character)
    }
}
