use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use log::debug;

use crate::container::{ContainerError, ServiceContainer};
use crate::mediator::Service;

/// Builds a service the first time it is looked up
pub type ServiceFactory = Box<dyn Fn() -> Result<Arc<dyn Service>, ContainerError> + Send + Sync>;

/// Service container keyed by service identifier.
///
/// Factories run at most once: the first lookup builds the service and every
/// later lookup returns the same shared instance, which is what lets the
/// mediator recognise a resolved method listener again when removing it.
#[derive(Default)]
pub struct ServiceRegistry {
    factories: HashMap<String, ServiceFactory>,
    instances: HashMap<String, Arc<dyn Service>>,
}

// Manual Debug implementation
impl fmt::Debug for ServiceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceRegistry")
            .field("services", &self.service_ids())
            .field("instantiated", &self.instances.len())
            .finish()
    }
}

impl ServiceRegistry {
    /// Create a new empty service registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a lazily built service. Replaces any previous definition
    /// along with its cached instance.
    pub fn register<F>(&mut self, service_id: &str, factory: F) -> &mut Self
    where
        F: Fn() -> Result<Arc<dyn Service>, ContainerError> + Send + Sync + 'static,
    {
        self.instances.remove(service_id);
        self.factories.insert(service_id.to_string(), Box::new(factory));
        self
    }

    /// Register an already built service instance
    pub fn register_instance(&mut self, service_id: &str, instance: Arc<dyn Service>) -> &mut Self {
        self.factories.remove(service_id);
        self.instances.insert(service_id.to_string(), instance);
        self
    }

    /// Check if a service is defined, built or not
    pub fn has_service(&self, service_id: &str) -> bool {
        self.factories.contains_key(service_id) || self.instances.contains_key(service_id)
    }

    /// Check if a service has been built
    pub fn is_instantiated(&self, service_id: &str) -> bool {
        self.instances.contains_key(service_id)
    }

    /// Forget a service definition and its instance
    pub fn remove(&mut self, service_id: &str) -> bool {
        let had_factory = self.factories.remove(service_id).is_some();
        let had_instance = self.instances.remove(service_id).is_some();
        had_factory || had_instance
    }

    /// Get all defined service identifiers, sorted
    pub fn service_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .factories
            .keys()
            .chain(self.instances.keys().filter(|id| !self.factories.contains_key(*id)))
            .cloned()
            .collect();
        ids.sort();
        ids
    }

    /// Get the number of defined services
    pub fn count(&self) -> usize {
        self.service_ids().len()
    }
}

impl ServiceContainer for ServiceRegistry {
    fn get_service_by_name(&mut self, service_id: &str) -> Result<Arc<dyn Service>, ContainerError> {
        if let Some(instance) = self.instances.get(service_id) {
            return Ok(Arc::clone(instance));
        }
        let factory = self.factories.get(service_id).ok_or_else(|| ContainerError::ServiceNotFound {
            service_id: service_id.to_string(),
        })?;
        let instance = factory()?;
        debug!("Instantiated service '{}'", service_id);
        self.instances.insert(service_id.to_string(), Arc::clone(&instance));
        Ok(instance)
    }
}
