use super::outcome::Outcome;
use crate::error::{DecodeError, RegrwsError};
use crate::models::ErrorPayload;
use crate::secret::ApiKey;
use crate::xml::XmlModel;
use regrws_http::{HttpClient, Method, StatusCode};
use url::Url;

/// Statuses whose body is a registry `<error>` payload
pub const REGISTRY_ERROR_STATUSES: [StatusCode; 7] = [
    StatusCode::BAD_REQUEST,
    StatusCode::UNAUTHORIZED,
    StatusCode::FORBIDDEN,
    StatusCode::NOT_FOUND,
    StatusCode::METHOD_NOT_ALLOWED,
    StatusCode::NOT_ACCEPTABLE,
    StatusCode::CONFLICT,
];

/// How a response body is decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusHandler {
    /// The payload the call expects
    Expected,
    /// An [`ErrorPayload`]
    RegistryError,
}

impl StatusHandler {
    /// Decode a body read for a status this handler is mapped to
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::EmptyBody`] when the body is blank, or any other
    /// [`DecodeError`] from the model.
    pub fn decode<T: XmlModel>(
        self,
        status: StatusCode,
        body: &[u8],
    ) -> Result<Outcome<T>, DecodeError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(DecodeError::EmptyBody {
                status: status.as_u16(),
            });
        }
        Ok(match self {
            Self::Expected => Outcome::Success(T::from_xml_bytes(body)?),
            Self::RegistryError => Outcome::Rejected {
                status,
                error: ErrorPayload::from_xml_bytes(body)?,
            },
        })
    }
}

/// Status code table consulted for every response.
///
/// Statuses missing from the table surface as
/// [`HttpError::HttpStatus`](regrws_http::HttpError::HttpStatus).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handlers {
    entries: Vec<(StatusCode, StatusHandler)>,
}

impl Default for Handlers {
    fn default() -> Self {
        let mut entries = vec![(StatusCode::OK, StatusHandler::Expected)];
        entries.extend(
            REGISTRY_ERROR_STATUSES
                .iter()
                .map(|status| (*status, StatusHandler::RegistryError)),
        );
        Self { entries }
    }
}

impl Handlers {
    #[must_use]
    pub fn lookup(&self, status: StatusCode) -> Option<StatusHandler> {
        self.entries
            .iter()
            .find(|(code, _)| *code == status)
            .map(|(_, handler)| *handler)
    }
}

/// Shared state behind every manager: transport, credentials and the
/// status table.
#[derive(Debug)]
pub(super) struct Session {
    http: HttpClient,
    base_url: Url,
    api_key: ApiKey,
    handlers: Handlers,
}

impl Session {
    pub(super) fn new(http: HttpClient, base_url: Url, api_key: ApiKey) -> Self {
        Self {
            http,
            base_url,
            api_key,
            handlers: Handlers::default(),
        }
    }

    pub(super) const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base}/rest/{segments...}`; an empty last segment leaves a trailing slash
    pub(super) fn rest_url(&self, segments: &[&str]) -> Result<Url, RegrwsError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| RegrwsError::Url {
                url: self.base_url.to_string(),
                reason: "base URL cannot carry a path".to_owned(),
            })?
            .pop_if_empty()
            .push("rest")
            .extend(segments);
        Ok(url)
    }

    /// One round trip: send, read the body, decode per the status table
    pub(super) async fn send<T: XmlModel>(
        &self,
        method: Method,
        url: &Url,
        body: Option<String>,
    ) -> Result<Outcome<T>, RegrwsError> {
        let mut target = url.clone();
        target
            .query_pairs_mut()
            .append_pair("apikey", self.api_key.expose());

        tracing::debug!(method = %method, path = url.path(), "sending registry request");

        let mut request = self.http.request(method.clone(), target.as_str());
        if let Some(body) = body {
            request = request.xml(body);
        }
        let response = request.send().await?;
        let status = response.status();

        tracing::debug!(
            method = %method,
            path = url.path(),
            status = status.as_u16(),
            "registry responded"
        );

        let Some(handler) = self.handlers.lookup(status) else {
            return Err(response.into_status_error().await.into());
        };
        let bytes = response.bytes().await?;
        Ok(handler.decode(status, &bytes)?)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::models::{ErrorCode, Org};

    const NOT_FOUND: &[u8] = br#"<error xmlns="http://www.arin.net/regrws/core/v1">
        <message>The object was not found</message>
        <code>E_OBJECT_NOT_FOUND</code>
    </error>"#;

    #[test]
    fn test_standard_table() {
        let handlers = Handlers::default();
        assert_eq!(
            handlers.lookup(StatusCode::OK),
            Some(StatusHandler::Expected)
        );
        for status in REGISTRY_ERROR_STATUSES {
            assert_eq!(handlers.lookup(status), Some(StatusHandler::RegistryError));
        }
        assert_eq!(handlers.lookup(StatusCode::INTERNAL_SERVER_ERROR), None);
        assert_eq!(handlers.lookup(StatusCode::CREATED), None);
    }

    #[test]
    fn test_error_status_decodes_error_payload() {
        let outcome = StatusHandler::RegistryError
            .decode::<Org>(StatusCode::NOT_FOUND, NOT_FOUND)
            .unwrap();
        assert_eq!(
            outcome.rejection().map(|e| e.code),
            Some(ErrorCode::ObjectNotFound)
        );
    }

    #[test]
    fn test_expected_status_decodes_model() {
        let outcome = StatusHandler::Expected
            .decode::<ErrorPayload>(StatusCode::OK, NOT_FOUND)
            .unwrap();
        assert!(
            matches!(outcome, Outcome::Success(ref payload) if payload.code == ErrorCode::ObjectNotFound)
        );
    }

    #[test]
    fn test_empty_body_for_mapped_status() {
        let handlers = Handlers::default();
        for status in [StatusCode::OK, StatusCode::UNAUTHORIZED] {
            let err = handlers
                .lookup(status)
                .unwrap()
                .decode::<Org>(status, b"  \n")
                .unwrap_err();
            assert_eq!(
                err,
                DecodeError::EmptyBody {
                    status: status.as_u16()
                }
            );
        }
    }

    #[test]
    fn test_malformed_success_body_is_decode_error() {
        let err = StatusHandler::Expected
            .decode::<Org>(
                StatusCode::OK,
                br#"<org xmlns="http://www.arin.net/regrws/core/v1"></org>"#,
            )
            .unwrap_err();
        assert!(matches!(err, DecodeError::MissingElement { .. }));
    }
}
