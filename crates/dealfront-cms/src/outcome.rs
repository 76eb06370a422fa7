use crate::error::CmsError;

/// Result of one content query inside a page fan-out.
///
/// Pages render with whatever loaded. A failed query degrades to an empty
/// section; callers that need to tell "nothing matched" apart from "the CMS
/// is down" inspect [`QueryOutcome::error`].
#[derive(Debug)]
pub enum QueryOutcome<T> {
    Loaded(T),
    Failed(CmsError),
}

impl<T> QueryOutcome<T> {
    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, QueryOutcome::Failed(_))
    }

    #[must_use]
    pub fn error(&self) -> Option<&CmsError> {
        match self {
            QueryOutcome::Loaded(_) => None,
            QueryOutcome::Failed(err) => Some(err),
        }
    }

    /// Converts back into a `Result`.
    ///
    /// # Errors
    ///
    /// Returns the wrapped [`CmsError`] for a failed query.
    pub fn into_result(self) -> Result<T, CmsError> {
        match self {
            QueryOutcome::Loaded(value) => Ok(value),
            QueryOutcome::Failed(err) => Err(err),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> QueryOutcome<U> {
        match self {
            QueryOutcome::Loaded(value) => QueryOutcome::Loaded(f(value)),
            QueryOutcome::Failed(err) => QueryOutcome::Failed(err),
        }
    }

    /// The loaded value, or `T::default()` (an empty list) on failure.
    pub fn or_empty(self) -> T
    where
        T: Default,
    {
        match self {
            QueryOutcome::Loaded(value) => value,
            QueryOutcome::Failed(_) => T::default(),
        }
    }
}

impl<T> From<Result<T, CmsError>> for QueryOutcome<T> {
    fn from(result: Result<T, CmsError>) -> Self {
        match result {
            Ok(value) => QueryOutcome::Loaded(value),
            Err(err) => QueryOutcome::Failed(err),
        }
    }
}
