//! Type queries

use selection::Position;

/// Answers "what is the type at this position?"
pub trait TypeChecker: Send + Sync {
    /// Type name at `position` in `code`, if known
    fn type_at(&self, code: &str, position: Position) -> anyhow::Result<Option<String>>;
}

/// Type checker that never knows anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTypeChecker;

impl TypeChecker for NoTypeChecker {
    fn type_at(&self, _code: &str, _position: Position) -> anyhow::Result<Option<String>> {
        Ok(None)
    }
}
