//! Finder configuration
//!
//! `Options` carries the scope, the fragment predicates and the search
//! limits. Limits are plain data and can be loaded from JSON or TOML;
//! predicates are code and are set through the builder methods.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::predicates;

/// Predicate over an id, class name or tag name
pub type NamePredicate = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Predicate over an attribute name and value
pub type AttrPredicate = Arc<dyn Fn(&str, &str) -> bool + Send + Sync>;

/// Time and work limits for one `find` call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchLimits {
    /// Wall-clock budget in milliseconds
    pub timeout_ms: u64,
    /// Levels collected before candidates are first released
    pub seed_min_length: usize,
    /// Paths at or below this length are not shortened further
    pub optimized_min_length: usize,
    /// Maximum number of candidates checked for uniqueness
    pub max_number_of_path_checks: Option<usize>,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            timeout_ms: 1000,
            seed_min_length: 3,
            optimized_min_length: 2,
            max_number_of_path_checks: None,
        }
    }
}

impl SearchLimits {
    /// Wall-clock budget
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Options for one `find` call
pub struct Options<N> {
    /// Query scope; the whole document when `None`
    pub root: Option<N>,
    pub id_name: NamePredicate,
    pub class_name: NamePredicate,
    pub tag_name: NamePredicate,
    pub attr: AttrPredicate,
    pub limits: SearchLimits,
}

impl<N> Default for Options<N> {
    fn default() -> Self {
        Self {
            root: None,
            id_name: Arc::new(predicates::word_like),
            class_name: Arc::new(predicates::word_like),
            tag_name: Arc::new(predicates::accept_tag),
            attr: Arc::new(predicates::accept_attr),
            limits: SearchLimits::default(),
        }
    }
}

impl<N: Clone> Clone for Options<N> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            id_name: Arc::clone(&self.id_name),
            class_name: Arc::clone(&self.class_name),
            tag_name: Arc::clone(&self.tag_name),
            attr: Arc::clone(&self.attr),
            limits: self.limits,
        }
    }
}

impl<N: fmt::Debug> fmt::Debug for Options<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("root", &self.root)
            .field("limits", &self.limits)
            .finish_non_exhaustive()
    }
}

impl<N> Options<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict queries to the subtree below `root`
    pub fn root(mut self, root: N) -> Self {
        self.root = Some(root);
        self
    }

    pub fn id_name(mut self, f: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        self.id_name = Arc::new(f);
        self
    }

    pub fn class_name(mut self, f: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        self.class_name = Arc::new(f);
        self
    }

    pub fn tag_name(mut self, f: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        self.tag_name = Arc::new(f);
        self
    }

    pub fn attr(mut self, f: impl Fn(&str, &str) -> bool + Send + Sync + 'static) -> Self {
        self.attr = Arc::new(f);
        self
    }

    pub fn limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.limits.timeout_ms = timeout_ms;
        self
    }

    pub fn seed_min_length(mut self, length: usize) -> Self {
        self.limits.seed_min_length = length;
        self
    }

    pub fn optimized_min_length(mut self, length: usize) -> Self {
        self.limits.optimized_min_length = length;
        self
    }

    pub fn max_number_of_path_checks(mut self, checks: usize) -> Self {
        self.limits.max_number_of_path_checks = Some(checks);
        self
    }
}
