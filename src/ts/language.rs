use crate::tree::KindTable;
use ast_grep_language::SupportLang;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Source languages the bundled parser adapter understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Java,
    Rust,
}

impl Language {
    pub fn all() -> &'static [Language] {
        &[Language::Java, Language::Rust]
    }

    pub fn name(self) -> &'static str {
        match self {
            Language::Java => "java",
            Language::Rust => "rust",
        }
    }

    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Language::Java => &["java"],
            Language::Rust => &["rs"],
        }
    }

    /// Guess the language from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        Self::all()
            .iter()
            .copied()
            .find(|lang| lang.extensions().contains(&ext))
    }

    /// Grammar bundled by ast-grep-language.
    pub fn support_lang(self) -> SupportLang {
        match self {
            Language::Java => SupportLang::Java,
            Language::Rust => SupportLang::Rust,
        }
    }

    /// Default classification of this grammar's node kinds.
    pub fn kind_table(self) -> KindTable {
        match self {
            Language::Java => KindTable::java(),
            Language::Rust => KindTable::rust(),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "java" => Ok(Language::Java),
            "rust" | "rs" => Ok(Language::Rust),
            other => Err(format!(
                "unsupported language '{other}' (expected one of: java, rust)"
            )),
        }
    }
}
