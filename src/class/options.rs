//! Options for building a class spy.

use std::fmt;
use std::sync::Arc;

use crate::report::{ArgumentErrorReporter, PanicReporter};

/// Extra members and collaborators for [`ClassSpy`](super::ClassSpy).
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use testkit_autospy::class::SpyOptions;
/// use testkit_autospy::report::LogReporter;
///
/// let options = SpyOptions::new()
///     .observable_props(["observableProp"])
///     .methods_to_spy_on(["dynamicallyAdded"])
///     .reporter(Arc::new(LogReporter));
/// ```
#[derive(Clone)]
pub struct SpyOptions {
    pub(crate) observable_props: Vec<String>,
    pub(crate) methods: Vec<String>,
    pub(crate) reporter: Arc<dyn ArgumentErrorReporter>,
}

impl SpyOptions {
    /// Defaults: no extra members, mismatches panic.
    #[must_use]
    pub fn new() -> Self {
        Self {
            observable_props: Vec::new(),
            methods: Vec::new(),
            reporter: Arc::new(PanicReporter),
        }
    }

    /// Spy on these members as observable properties.
    #[must_use]
    pub fn observable_props<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.observable_props.extend(names.into_iter().map(Into::into));
        self
    }

    /// Spy on these plain methods even though reflection did not list them.
    #[must_use]
    pub fn methods_to_spy_on<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.methods.extend(names.into_iter().map(Into::into));
        self
    }

    /// Report required-argument violations here.
    #[must_use]
    pub fn reporter(mut self, reporter: Arc<dyn ArgumentErrorReporter>) -> Self {
        self.reporter = reporter;
        self
    }
}

impl Default for SpyOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SpyOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpyOptions")
            .field("observable_props", &self.observable_props)
            .field("methods", &self.methods)
            .finish_non_exhaustive()
    }
}
