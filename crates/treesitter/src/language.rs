//! Language definitions

use std::path::Path;

use tree_sitter::Language as TSLanguage;

/// Supported language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    JavaScript,
    TypeScript,
    Tsx,
}

impl Language {
    /// Get tree-sitter language, if its grammar was compiled in
    pub fn ts_language(&self) -> Option<TSLanguage> {
        match self {
            #[cfg(feature = "javascript")]
            Language::JavaScript => Some(tree_sitter_javascript::LANGUAGE.into()),

            #[cfg(feature = "typescript")]
            Language::TypeScript => Some(tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()),

            #[cfg(feature = "typescript")]
            Language::Tsx => Some(tree_sitter_typescript::LANGUAGE_TSX.into()),

            #[allow(unreachable_patterns)]
            _ => None,
        }
    }

    /// Get language from string ID
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "javascript" | "js" | "javascriptreact" | "jsx" | "mjs" | "cjs" => {
                Some(Language::JavaScript)
            }
            "typescript" | "ts" | "mts" | "cts" => Some(Language::TypeScript),
            "typescriptreact" | "tsx" => Some(Language::Tsx),
            _ => None,
        }
    }

    /// Get language from a file path's extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        Self::from_id(ext)
    }

    /// Get language ID
    pub fn id(&self) -> &'static str {
        match self {
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Tsx => "typescriptreact",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        assert_eq!(Language::from_path(Path::new("src/app.ts")), Some(Language::TypeScript));
        assert_eq!(Language::from_path(Path::new("view.tsx")), Some(Language::Tsx));
        assert_eq!(Language::from_path(Path::new("index.jsx")), Some(Language::JavaScript));
        assert_eq!(Language::from_path(Path::new("main.rs")), None);
        assert_eq!(Language::from_path(Path::new("Makefile")), None);
    }

    #[test]
    fn test_id_round_trips() {
        for language in [Language::JavaScript, Language::TypeScript, Language::Tsx] {
            assert_eq!(Language::from_id(language.id()), Some(language));
        }
    }
}
