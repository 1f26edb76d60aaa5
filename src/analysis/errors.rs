use thiserror::Error;

/// Failures surfaced by a selection analysis.
///
/// All of them abandon the analysis for that invocation. `OutOfRange`,
/// `InvertedSelection` and `EmptySelection` are caller-side problems;
/// `InternalConsistency` means the ancestry logic itself is broken.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("offset {offset} is outside the tree span {start}..{end}")]
    OutOfRange {
        offset: usize,
        start: usize,
        end: usize,
    },

    #[error("selection start {start} is after selection end {end}")]
    InvertedSelection { start: usize, end: usize },

    #[error("selection ending at {raw_end} contains no non-whitespace character")]
    EmptySelection { raw_end: usize },

    #[error("internal consistency error: {message}")]
    InternalConsistency { message: String },
}

impl AnalysisError {
    pub(crate) fn internal(message: impl Into<String>) -> Self {
        let message = message.into();
        tracing::warn!(%message, "selection analysis invariant violated");
        AnalysisError::InternalConsistency { message }
    }

    /// Whether the error points at a bug rather than at bad input.
    pub fn is_internal(&self) -> bool {
        matches!(self, AnalysisError::InternalConsistency { .. })
    }
}
