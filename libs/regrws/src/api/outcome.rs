use crate::error::RegrwsError;
use crate::models::ErrorPayload;
use regrws_http::StatusCode;

/// Result of a registry call that reached the registry.
///
/// A mapped 4xx status is data, not an error: the registry's `<error>`
/// payload comes back in [`Outcome::Rejected`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Success(T),
    Rejected {
        status: StatusCode,
        error: ErrorPayload,
    },
}

impl<T> Outcome<T> {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    #[must_use]
    pub fn success(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Rejected { .. } => None,
        }
    }

    #[must_use]
    pub const fn rejection(&self) -> Option<&ErrorPayload> {
        match self {
            Self::Success(_) => None,
            Self::Rejected { error, .. } => Some(error),
        }
    }

    #[must_use]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Success(value) => Outcome::Success(f(value)),
            Self::Rejected { status, error } => Outcome::Rejected { status, error },
        }
    }

    /// Turn a rejection into [`RegrwsError::Registry`]
    ///
    /// # Errors
    ///
    /// Returns [`RegrwsError::Registry`] for [`Outcome::Rejected`].
    pub fn into_result(self) -> Result<T, RegrwsError> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Rejected { status, error } => Err(RegrwsError::Registry {
                status,
                code: error.code,
                message: error.message,
            }),
        }
    }
}
