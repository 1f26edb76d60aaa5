use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("tree builder finished with {open} unclosed node(s)")]
    Unbalanced { open: usize },

    #[error("finish_node called with no open node")]
    NoOpenNode,

    #[error("kind tag must not be empty")]
    EmptyKind,
}
