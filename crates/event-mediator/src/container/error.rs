//! # Service Container Errors
//!
//! Errors a [`ServiceContainer`](crate::container::ServiceContainer) reports
//! when it cannot turn a service identifier into a live service. The mediator
//! passes them to its caller untouched.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContainerError {
    #[error("Service '{service_id}' could NOT be found in the service container")]
    ServiceNotFound { service_id: String },

    #[error("Failed to construct service '{service_id}': {reason}")]
    ServiceConstruction { service_id: String, reason: String },
}
