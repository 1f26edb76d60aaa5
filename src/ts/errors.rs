use crate::ts::language::Language;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TreeSitterError {
    #[error("failed to set {language} grammar for parser")]
    LanguageSet { language: Language },

    #[error("failed to parse {language} source code")]
    ParseFailed { language: Language },

    #[error("cannot infer source language for {path}")]
    UnknownLanguage { path: PathBuf },

    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
