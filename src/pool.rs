//! Thread-local parser pooling.
//!
//! Keeps one [`SourceParser`] per language per thread. Creates a parser on
//! first use and reuses it for subsequent parses.

use crate::ts::{Language, SourceParser, TreeSitterError};
use std::cell::RefCell;
use std::collections::HashMap;

thread_local! {
    static PARSERS: RefCell<HashMap<Language, SourceParser>> = RefCell::new(HashMap::new());
}

/// Execute function with the pooled parser for `language`.
///
/// # Example
///
/// ```no_run
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use ast_selection::pool::with_parser;
/// use ast_selection::ts::Language;
///
/// let tree = with_parser(Language::Java, |parser| parser.parse("class A {}"))??;
/// # Ok(())
/// # }
/// ```
pub fn with_parser<F, R>(language: Language, f: F) -> Result<R, TreeSitterError>
where
    F: FnOnce(&mut SourceParser) -> R,
{
    PARSERS.with(|cell| {
        let mut parsers = cell.borrow_mut();
        let parser = match parsers.entry(language) {
            std::collections::hash_map::Entry::Occupied(entry) => entry.into_mut(),
            std::collections::hash_map::Entry::Vacant(entry) => {
                entry.insert(SourceParser::new(language)?)
            }
        };
        Ok(f(parser))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pooled_parser_is_reused_per_language() {
        let first = with_parser(Language::Rust, |p| p.language()).unwrap();
        let tree = with_parser(Language::Rust, |p| p.parse("fn main() {}"))
            .unwrap()
            .unwrap();
        assert_eq!(first, Language::Rust);
        assert_eq!(tree.kind(tree.root()), "source_file");

        let java = with_parser(Language::Java, |p| p.language()).unwrap();
        assert_eq!(java, Language::Java);
    }
}
