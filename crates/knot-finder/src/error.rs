//! Error types for selector generation

/// Why the search gave up without a unique selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum NotFoundReason {
    /// Every candidate up to the scope boundary was tried
    #[error("no unique candidate up to the scope boundary")]
    Exhausted,

    /// Wall-clock budget ran out
    #[error("timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// Uniqueness-check budget ran out
    #[error("gave up after {checks} path checks")]
    CheckLimit { checks: usize },

    /// A search level would have queued more candidates than allowed
    #[error("more than {candidates} pending candidates")]
    CandidateLimit { candidates: usize },
}

/// Selector generation error
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FinderError {
    /// Empty target list, non-element target, or target outside the root
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A candidate selector matched nothing, which means a fragment no longer
    /// describes the node it was built from
    #[error("can't select any node with this selector: {selector}")]
    NoMatch { selector: String },

    /// Search and fallback both came up empty
    #[error("selector was not found: {0}")]
    SelectorNotFound(NotFoundReason),

    /// The document's query engine rejected a generated selector
    #[error("query for {selector:?} failed: {message}")]
    Query { selector: String, message: String },
}

impl FinderError {
    /// Check if the failure came from a time or work budget, so retrying
    /// with relaxed limits may help
    pub fn is_budget_exhausted(&self) -> bool {
        matches!(
            self,
            FinderError::SelectorNotFound(reason) if *reason != NotFoundReason::Exhausted
        )
    }
}
