//! Error types for the Reg-RWS client.

use crate::api::ResourceKind;
use crate::models::ErrorCode;
use regrws_http::{HttpError, StatusCode};
use thiserror::Error;

/// A local invariant was violated.
///
/// Raised by model constructors, by decoding, and before any request body is
/// serialized. Never sent over the wire.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationError {
    #[error("either `end_address` or `cidr_length` must be provided")]
    NetBlockRangeMissing,

    #[error("either `org_handle` or `customer_handle` must be provided")]
    NetHolderMissing,

    #[error("`orgHandle` and `customerHandle` elements are mutually exclusive.")]
    NetHolderConflict,

    #[error("this POC is a ROLE POC, `company_name` is required")]
    RoleCompanyNameMissing,

    #[error("this POC is a ROLE POC, the role name must be entered in the 'last_name' field")]
    RoleLastNameMissing,

    #[error("this POC is a ROLE POC, `first_name` must be left blank")]
    RoleFirstNamePresent,

    #[error("either `code2` or `code3` must be provided")]
    CountryCodeMissing,

    #[error("Invalid IP address: {0}")]
    InvalidIpAddress(String),

    #[error("`{field}` must be {expected} characters, got {value:?}")]
    InvalidLength {
        field: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("cidr length {0} is outside 0..=128")]
    CidrLengthOutOfRange(u32),

    #[error("unknown {kind} value {value:?}")]
    UnknownVariant { kind: &'static str, value: String },

    #[error("{0} has no handle; the registry assigns one on create")]
    HandleMissing(ResourceKind),
}

/// An XML payload could not be turned into a model.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeError {
    #[error("malformed XML: {0}")]
    Syntax(String),

    #[error("document has no root element")]
    EmptyDocument,

    #[error("expected <{expected}> root element, found <{found}>")]
    UnexpectedRoot {
        expected: &'static str,
        found: String,
    },

    #[error("<{parent}> is missing required element <{element}>")]
    MissingElement {
        parent: String,
        element: &'static str,
    },

    #[error("<{element}> is missing required attribute `{attribute}`")]
    MissingAttribute {
        element: String,
        attribute: &'static str,
    },

    #[error("invalid value {value:?} in <{element}>: {reason}")]
    InvalidValue {
        element: String,
        value: String,
        reason: String,
    },

    #[error("HTTP {status} response has an empty body")]
    EmptyBody { status: u16 },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// The XML writer failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("failed to write XML: {0}")]
pub struct EncodeError(pub String);

/// Top-level error returned by the client.
///
/// Registry rejections for mapped status codes are not errors: they come back
/// as [`Outcome::Rejected`](crate::Outcome::Rejected). Only
/// [`Outcome::into_result`](crate::Outcome::into_result) turns them into
/// [`RegrwsError::Registry`].
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RegrwsError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("failed to decode response: {0}")]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// Transport failure or a status code with no registered handler
    #[error(transparent)]
    Http(#[from] HttpError),

    #[error("invalid URL '{url}': {reason}")]
    Url { url: String, reason: String },

    #[error("`{operation}` is not implemented for {kind} resources")]
    NotImplemented {
        kind: ResourceKind,
        operation: &'static str,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("registry rejected the request (HTTP {status}, {code}): {message}")]
    Registry {
        status: StatusCode,
        code: ErrorCode,
        message: String,
    },
}

impl RegrwsError {
    /// Whether the registry answered with `E_OBJECT_NOT_FOUND`
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Registry {
                code: ErrorCode::ObjectNotFound,
                ..
            }
        )
    }
}

impl From<figment::Error> for RegrwsError {
    fn from(err: figment::Error) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        assert_eq!(
            ValidationError::NetBlockRangeMissing.to_string(),
            "either `end_address` or `cidr_length` must be provided"
        );
        assert_eq!(
            ValidationError::NetHolderConflict.to_string(),
            "`orgHandle` and `customerHandle` elements are mutually exclusive."
        );
        assert_eq!(
            ValidationError::InvalidIpAddress("192.168.abc.1".to_owned()).to_string(),
            "Invalid IP address: 192.168.abc.1"
        );
    }

    #[test]
    fn test_decode_error_wraps_validation() {
        let err: DecodeError = ValidationError::RoleFirstNamePresent.into();
        assert_eq!(
            err.to_string(),
            "this POC is a ROLE POC, `first_name` must be left blank"
        );
    }

    #[test]
    fn test_not_implemented_display() {
        let err = RegrwsError::NotImplemented {
            kind: ResourceKind::Net,
            operation: "create",
        };
        assert_eq!(err.to_string(), "`create` is not implemented for net resources");
    }

    #[test]
    fn test_is_not_found() {
        let err = RegrwsError::Registry {
            status: StatusCode::NOT_FOUND,
            code: ErrorCode::ObjectNotFound,
            message: "The object was not found".to_owned(),
        };
        assert!(err.is_not_found());
        assert!(!RegrwsError::Config("x".to_owned()).is_not_found());
    }
}
