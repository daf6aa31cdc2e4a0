use super::bound::Bound;
use super::outcome::Outcome;
use super::resource::{Resource, ResourceKind};
use super::session::Session;
use crate::error::{RegrwsError, ValidationError};
use crate::models::{Customer, Net, TicketRequest};
use crate::xml::XmlModel;
use regrws_http::Method;
use std::fmt;
use std::marker::PhantomData;
use std::net::IpAddr;
use std::sync::Arc;
use url::Url;

/// CRUD for one resource kind.
///
/// Cheap to clone: every manager of a client shares one session.
pub struct Manager<M> {
    session: Arc<Session>,
    marker: PhantomData<fn() -> M>,
}

impl<M> Clone for Manager<M> {
    fn clone(&self) -> Self {
        Self {
            session: Arc::clone(&self.session),
            marker: PhantomData,
        }
    }
}

impl<M: Resource> fmt::Debug for Manager<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Manager")
            .field("kind", &M::KIND)
            .field("base_url", &self.session.base_url().as_str())
            .finish_non_exhaustive()
    }
}

fn body_of<T: XmlModel>(payload: &T) -> Result<String, RegrwsError> {
    payload.validate()?;
    Ok(payload.to_xml()?)
}

impl<M: Resource> Manager<M> {
    pub(super) fn new(session: Arc<Session>) -> Self {
        Self {
            session,
            marker: PhantomData,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ResourceKind {
        M::KIND
    }

    /// `{base}/rest/{endpoint}`
    ///
    /// # Errors
    ///
    /// Returns [`RegrwsError::Url`] when the base URL cannot take a path.
    pub fn endpoint_url(&self) -> Result<Url, RegrwsError> {
        self.session.rest_url(&[M::KIND.endpoint()])
    }

    /// `{base}/rest/{endpoint}/{handle}`, or the collection root with a
    /// trailing slash when the resource has no handle yet
    ///
    /// # Errors
    ///
    /// Returns [`RegrwsError::Url`] when the base URL cannot take a path.
    pub fn absolute_url(&self, resource: &M) -> Result<Url, RegrwsError> {
        self.session
            .rest_url(&[M::KIND.endpoint(), resource.handle().unwrap_or_default()])
    }

    /// URL of a resource that must already exist, with optional trailing verb
    fn handle_url(&self, resource: &M, verb: Option<&str>) -> Result<Url, RegrwsError> {
        let handle = resource
            .handle()
            .filter(|h| !h.is_empty())
            .ok_or(ValidationError::HandleMissing(M::KIND))?;
        let mut segments = vec![M::KIND.endpoint(), handle];
        segments.extend(verb);
        self.session.rest_url(&segments)
    }

    /// Associate a resource with this manager
    #[must_use]
    pub fn bind(&self, resource: M) -> Bound<M> {
        Bound::new(resource, self.clone())
    }

    /// `GET {endpoint}/{HANDLE}`; the handle is uppercased
    ///
    /// # Errors
    ///
    /// Transport failures, unmapped statuses and undecodable bodies.
    pub async fn from_handle(&self, handle: &str) -> Result<Outcome<Bound<M>>, RegrwsError> {
        let handle = handle.trim().to_uppercase();
        let url = self.session.rest_url(&[M::KIND.endpoint(), &handle])?;
        let outcome = self.session.send::<M>(Method::GET, &url, None).await?;
        Ok(outcome.map(|resource| self.bind(resource)))
    }

    /// `POST` the resource to its URL (the collection root when it has no handle)
    ///
    /// # Errors
    ///
    /// [`RegrwsError::NotImplemented`] for kinds without direct creation,
    /// [`RegrwsError::Validation`] for an invalid resource, plus transport and
    /// decode failures.
    pub async fn create(&self, resource: &M) -> Result<Outcome<M::Created>, RegrwsError> {
        if !M::KIND.supports_create() {
            return Err(RegrwsError::NotImplemented {
                kind: M::KIND,
                operation: "create",
            });
        }
        let body = body_of(resource)?;
        let url = self.absolute_url(resource)?;
        self.session.send(Method::POST, &url, Some(body)).await
    }

    /// `PUT` the resource to its URL
    ///
    /// # Errors
    ///
    /// [`ValidationError::HandleMissing`] when the resource has no handle,
    /// other validation failures, plus transport and decode failures.
    pub async fn save(&self, resource: &M) -> Result<Outcome<Bound<M>>, RegrwsError> {
        let url = self.handle_url(resource, None)?;
        let body = body_of(resource)?;
        let outcome = self.session.send::<M>(Method::PUT, &url, Some(body)).await?;
        Ok(outcome.map(|saved| self.bind(saved)))
    }

    /// `DELETE` the resource
    ///
    /// # Errors
    ///
    /// [`ValidationError::HandleMissing`] when the resource has no handle,
    /// plus transport and decode failures.
    pub async fn delete(&self, resource: &M) -> Result<Outcome<M::Deleted>, RegrwsError> {
        let url = self.handle_url(resource, None)?;
        self.session.send(Method::DELETE, &url, None).await
    }
}

impl Manager<Net> {
    async fn put_ticketed(
        &self,
        net: &Net,
        verb: &str,
        payload: &Net,
    ) -> Result<Outcome<TicketRequest>, RegrwsError> {
        let url = self.handle_url(net, Some(verb))?;
        let body = body_of(payload)?;
        self.session.send(Method::PUT, &url, Some(body)).await
    }

    /// `PUT net/{handle}/remove` with the net itself as the body.
    ///
    /// Only for reassignments and reallocations. Unlike delete, the payload
    /// may carry attachments.
    ///
    /// # Errors
    ///
    /// Validation, transport and decode failures.
    pub async fn remove(&self, net: &Net) -> Result<Outcome<TicketRequest>, RegrwsError> {
        self.put_ticketed(net, "remove", net).await
    }

    /// `PUT net/{handle}/reassign` with the recipient net as the body
    ///
    /// # Errors
    ///
    /// Validation, transport and decode failures.
    pub async fn reassign(
        &self,
        parent: &Net,
        recipient: &Net,
    ) -> Result<Outcome<TicketRequest>, RegrwsError> {
        self.put_ticketed(parent, "reassign", recipient).await
    }

    /// `PUT net/{handle}/reallocate` with the recipient net as the body
    ///
    /// # Errors
    ///
    /// Validation, transport and decode failures.
    pub async fn reallocate(
        &self,
        parent: &Net,
        recipient: &Net,
    ) -> Result<Outcome<TicketRequest>, RegrwsError> {
        self.put_ticketed(parent, "reallocate", recipient).await
    }

    async fn find(
        &self,
        verb: &str,
        start: IpAddr,
        end: IpAddr,
    ) -> Result<Outcome<Bound<Net>>, RegrwsError> {
        let (start, end) = (start.to_string(), end.to_string());
        let url = self
            .session
            .rest_url(&[ResourceKind::Net.endpoint(), verb, &start, &end])?;
        let outcome = self.session.send::<Net>(Method::GET, &url, None).await?;
        Ok(outcome.map(|net| self.bind(net)))
    }

    /// Most specific net covering `start..=end`
    ///
    /// # Errors
    ///
    /// Transport and decode failures.
    pub async fn find_net(
        &self,
        start: IpAddr,
        end: IpAddr,
    ) -> Result<Outcome<Bound<Net>>, RegrwsError> {
        self.find("mostSpecificNet", start, end).await
    }

    /// Parent of the net covering `start..=end`
    ///
    /// # Errors
    ///
    /// Transport and decode failures.
    pub async fn find_parent(
        &self,
        start: IpAddr,
        end: IpAddr,
    ) -> Result<Outcome<Bound<Net>>, RegrwsError> {
        self.find("parentNet", start, end).await
    }
}

impl Manager<Customer> {
    /// Create the recipient customer of a simple reassignment:
    /// `POST net/{handle}/customer`
    ///
    /// # Errors
    ///
    /// [`ValidationError::HandleMissing`] when `net` has no handle, other
    /// validation failures, plus transport and decode failures.
    pub async fn create_for_net(
        &self,
        net: &Net,
        customer: &Customer,
    ) -> Result<Outcome<Bound<Customer>>, RegrwsError> {
        let handle = net
            .handle
            .as_deref()
            .filter(|h| !h.is_empty())
            .ok_or(ValidationError::HandleMissing(ResourceKind::Net))?;
        let url = self
            .session
            .rest_url(&[ResourceKind::Net.endpoint(), handle, "customer"])?;
        let body = body_of(customer)?;
        let outcome = self
            .session
            .send::<Customer>(Method::POST, &url, Some(body))
            .await?;
        Ok(outcome.map(|created| self.bind(created)))
    }
}
