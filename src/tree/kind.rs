use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Statistics bucket a node kind falls into.
///
/// Decided once per node when the tree is built, so queries never compare
/// kind strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Variable or field declaration
    Declaration,
    /// Name reference in expression position
    Reference,
    /// Exception-raising statement
    Exception,
    #[default]
    Other,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Declaration => "declaration",
            Category::Reference => "reference",
            Category::Exception => "exception",
            Category::Other => "other",
        };
        f.write_str(name)
    }
}

/// Exact, case-sensitive mapping from kind tag to [`Category`].
///
/// Kinds not present in the table classify as [`Category::Other`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KindTable {
    kinds: HashMap<String, Category>,
}

impl KindTable {
    /// An empty table: every kind is `Other`.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a table from one list per category.
    ///
    /// A kind listed under several categories keeps the last one
    /// (exception over reference over declaration). Config validation rejects
    /// such tables before they get here.
    pub fn from_lists<D, R, E>(declaration: D, reference: R, exception: E) -> Self
    where
        D: IntoIterator,
        D::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
        E: IntoIterator,
        E::Item: Into<String>,
    {
        let mut table = Self::empty();
        for kind in declaration {
            table.insert(kind, Category::Declaration);
        }
        for kind in reference {
            table.insert(kind, Category::Reference);
        }
        for kind in exception {
            table.insert(kind, Category::Exception);
        }
        table
    }

    /// IntelliJ PSI element type names, the classic Java tallies.
    pub fn psi() -> Self {
        Self::from_lists(
            ["LOCAL_VARIABLE", "FIELD"],
            ["REFERENCE_EXPRESSION"],
            ["THROW_STATEMENT"],
        )
    }

    /// tree-sitter-java node kinds.
    pub fn java() -> Self {
        Self::from_lists(
            ["local_variable_declaration", "field_declaration"],
            ["identifier", "field_access"],
            ["throw_statement"],
        )
    }

    /// tree-sitter-rust node kinds. `?` is the statement-level way a Rust
    /// function raises an error to its caller.
    pub fn rust() -> Self {
        Self::from_lists(
            ["let_declaration", "field_declaration"],
            ["identifier", "field_expression"],
            ["try_expression"],
        )
    }

    /// Register `kind` under `category`, returning the category it replaced.
    pub fn insert(&mut self, kind: impl Into<String>, category: Category) -> Option<Category> {
        self.kinds.insert(kind.into(), category)
    }

    pub fn classify(&self, kind: &str) -> Category {
        self.kinds.get(kind).copied().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn psi_table_matches_exact_names() {
        let table = KindTable::psi();
        assert_eq!(table.classify("LOCAL_VARIABLE"), Category::Declaration);
        assert_eq!(table.classify("FIELD"), Category::Declaration);
        assert_eq!(table.classify("REFERENCE_EXPRESSION"), Category::Reference);
        assert_eq!(table.classify("THROW_STATEMENT"), Category::Exception);
    }

    #[test]
    fn classification_is_case_sensitive() {
        let table = KindTable::psi();
        assert_eq!(table.classify("local_variable"), Category::Other);
        assert_eq!(table.classify("Field"), Category::Other);
        assert_eq!(table.classify(""), Category::Other);
    }

    #[test]
    fn later_list_wins_on_conflict() {
        let table = KindTable::from_lists(["X"], ["X"], Vec::<String>::new());
        assert_eq!(table.classify("X"), Category::Reference);
        assert_eq!(table.len(), 1);
    }
}
