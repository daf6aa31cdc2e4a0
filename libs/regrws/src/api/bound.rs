use super::manager::Manager;
use super::outcome::Outcome;
use super::resource::Resource;
use crate::error::RegrwsError;
use crate::models::{Net, TicketRequest};
use std::ops::{Deref, DerefMut};

/// A resource together with the manager that fetched it.
///
/// Derefs to the resource, so fields read and write directly; lifecycle
/// calls go back through the same manager.
#[derive(Debug, Clone)]
pub struct Bound<M: Resource> {
    resource: M,
    manager: Manager<M>,
}

impl<M: Resource> Bound<M> {
    pub(super) const fn new(resource: M, manager: Manager<M>) -> Self {
        Self { resource, manager }
    }

    #[must_use]
    pub const fn manager(&self) -> &Manager<M> {
        &self.manager
    }

    #[must_use]
    pub fn into_inner(self) -> M {
        self.resource
    }

    /// Push local changes to the registry
    ///
    /// # Errors
    ///
    /// Same as [`Manager::save`].
    pub async fn save(&self) -> Result<Outcome<Self>, RegrwsError> {
        self.manager.save(&self.resource).await
    }

    /// # Errors
    ///
    /// Same as [`Manager::delete`].
    pub async fn delete(&self) -> Result<Outcome<M::Deleted>, RegrwsError> {
        self.manager.delete(&self.resource).await
    }
}

impl Bound<Net> {
    /// # Errors
    ///
    /// Same as [`Manager::remove`].
    pub async fn remove(&self) -> Result<Outcome<TicketRequest>, RegrwsError> {
        self.manager.remove(&self.resource).await
    }

    /// Reassign part of this net to `recipient`
    ///
    /// # Errors
    ///
    /// Same as [`Manager::reassign`].
    pub async fn reassign(&self, recipient: &Net) -> Result<Outcome<TicketRequest>, RegrwsError> {
        self.manager.reassign(&self.resource, recipient).await
    }

    /// Reallocate part of this net to `recipient`
    ///
    /// # Errors
    ///
    /// Same as [`Manager::reallocate`].
    pub async fn reallocate(
        &self,
        recipient: &Net,
    ) -> Result<Outcome<TicketRequest>, RegrwsError> {
        self.manager.reallocate(&self.resource, recipient).await
    }
}

impl<M: Resource> Deref for Bound<M> {
    type Target = M;

    fn deref(&self) -> &M {
        &self.resource
    }
}

impl<M: Resource> DerefMut for Bound<M> {
    fn deref_mut(&mut self) -> &mut M {
        &mut self.resource
    }
}

impl<M: Resource> AsRef<M> for Bound<M> {
    fn as_ref(&self) -> &M {
        &self.resource
    }
}
