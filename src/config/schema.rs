use crate::analysis::Analyzer;
use crate::tree::{Category, KindTable};
use crate::ts::Language;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct InspectConfig {
    /// Source language; inferred from the file extension when absent
    #[serde(default)]
    pub language: Option<Language>,
    /// Reuse interval labels across analyses of the same tree
    #[serde(default)]
    pub cache_labels: bool,
    /// Replaces the language's kind table when present
    #[serde(default)]
    pub kinds: Option<KindLists>,
    #[serde(default)]
    pub output: OutputConfig,
}

impl InspectConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut issues = Vec::new();

        if let Some(kinds) = &self.kinds {
            let mut seen: HashMap<&str, Category> = HashMap::new();
            for (category, list) in kinds.lists() {
                for kind in list {
                    if kind.trim().is_empty() {
                        issues.push(ValidationIssue::EmptyKind { category });
                        continue;
                    }
                    match seen.get(kind.as_str()) {
                        Some(&first) if first != category => {
                            issues.push(ValidationIssue::ConflictingKind {
                                kind: kind.clone(),
                                first,
                                second: category,
                            });
                        }
                        Some(_) => {}
                        None => {
                            seen.insert(kind.as_str(), category);
                        }
                    }
                }
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { issues })
        }
    }

    /// Kind table for `language`: the configured lists, else the preset.
    pub fn kind_table(&self, language: Language) -> KindTable {
        match &self.kinds {
            Some(kinds) => KindTable::from_lists(
                kinds.declaration.iter().cloned(),
                kinds.reference.iter().cloned(),
                kinds.exception.iter().cloned(),
            ),
            None => language.kind_table(),
        }
    }

    pub fn analyzer(&self) -> Analyzer {
        Analyzer::new().with_label_cache(self.cache_labels)
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct KindLists {
    #[serde(default)]
    pub declaration: Vec<String>,
    #[serde(default)]
    pub reference: Vec<String>,
    #[serde(default)]
    pub exception: Vec<String>,
}

impl KindLists {
    fn lists(&self) -> [(Category, &[String]); 3] {
        [
            (Category::Declaration, self.declaration.as_slice()),
            (Category::Reference, self.reference.as_slice()),
            (Category::Exception, self.exception.as_slice()),
        ]
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default = "default_color")]
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            color: default_color(),
        }
    }
}

fn default_color() -> bool {
    true
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, issue) in self.issues.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "  - {issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    EmptyKind {
        category: Category,
    },
    ConflictingKind {
        kind: String,
        first: Category,
        second: Category,
    },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::EmptyKind { category } => {
                write!(f, "kinds.{category} contains an empty kind name")
            }
            ValidationIssue::ConflictingKind {
                kind,
                first,
                second,
            } => write!(
                f,
                "kind '{kind}' is listed under both kinds.{first} and kinds.{second}"
            ),
        }
    }
}
