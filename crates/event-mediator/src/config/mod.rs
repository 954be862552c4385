//! # Mediator Configuration
//!
//! File backed settings for a mediator host: logging options and a
//! declarative list of service subscriptions.
//!
//! ```toml
//! [logging]
//! level = "debug"
//!
//! [[subscriptions."user.created"]]
//! service = "mailer"
//! method = "send_welcome"
//! priority = "first"
//! ```
//!
//! A loaded [`MediatorConfig`] is itself a [`Subscriber`], so its
//! subscriptions are wired with
//! [`add_service_subscriber`](crate::container::ContainerMediatorInterface::add_service_subscriber).
pub mod error;

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
#[cfg(feature = "yaml-config")]
use serde_yaml;
#[cfg(feature = "toml-config")]
use toml;

use crate::logging::LoggingConfig;
use crate::mediator::{EventListenerMap, Listener, Priority, Subscriber};

pub use error::ConfigError;

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JSON format (.json)
    Json,
    /// YAML format (.yaml, .yml) - requires "yaml-config" feature
    #[cfg(feature = "yaml-config")]
    Yaml,
    /// TOML format (.toml) - requires "toml-config" feature
    #[cfg(feature = "toml-config")]
    Toml,
}

impl ConfigFormat {
    /// Get the file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ConfigFormat::Json => "json",
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => "yaml",
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => "toml",
        }
    }

    /// Determine format from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| match ext.to_lowercase().as_str() {
                "json" => Some(ConfigFormat::Json),
                #[cfg(feature = "yaml-config")]
                "yaml" | "yml" => Some(ConfigFormat::Yaml),
                #[cfg(feature = "toml-config")]
                "toml" => Some(ConfigFormat::Toml),
                _ => None,
            })
    }
}

/// One declared service listener
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionEntry {
    pub service: String,
    pub method: String,
    #[serde(default)]
    pub priority: Priority,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediatorConfig {
    pub logging: LoggingConfig,
    /// Event name -> service listeners, in declaration order
    pub subscriptions: BTreeMap<String, Vec<SubscriptionEntry>>,
}

impl MediatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a service listener
    pub fn subscribe(
        &mut self,
        event_name: &str,
        service: &str,
        method: &str,
        priority: impl Into<Priority>,
    ) -> &mut Self {
        self.subscriptions
            .entry(event_name.to_string())
            .or_default()
            .push(SubscriptionEntry {
                service: service.to_string(),
                method: method.to_string(),
                priority: priority.into(),
            });
        self
    }

    /// Parse configuration text
    pub fn parse_str(content: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        let deserialization = |source: Box<dyn std::error::Error + Send + Sync>| ConfigError::DeserializationError {
            format: format.extension().to_string(),
            source,
        };
        match format {
            ConfigFormat::Json => serde_json::from_str(content).map_err(|e| deserialization(Box::new(e))),
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => serde_yaml::from_str(content).map_err(|e| deserialization(Box::new(e))),
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => toml::from_str(content).map_err(|e| deserialization(Box::new(e))),
        }
    }

    /// Serialize to string based on format
    pub fn serialize(&self, format: ConfigFormat) -> Result<String, ConfigError> {
        let serialization = |source: Box<dyn std::error::Error + Send + Sync>| ConfigError::SerializationError {
            format: format.extension().to_string(),
            source,
        };
        match format {
            ConfigFormat::Json => serde_json::to_string_pretty(self).map_err(|e| serialization(Box::new(e))),
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => serde_yaml::to_string(self).map_err(|e| serialization(Box::new(e))),
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => toml::to_string_pretty(self).map_err(|e| serialization(Box::new(e))),
        }
    }

    /// Load from a file, picking the format from its extension
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let format = Self::format_for(path)?;
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            operation: "read".to_string(),
            source,
        })?;
        let config = Self::parse_str(&content, format)?;
        log::debug!(
            "Loaded {} subscription event(s) from {}",
            config.subscriptions.len(),
            path.display()
        );
        Ok(config)
    }

    /// Write to a file, picking the format from its extension
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = self.serialize(Self::format_for(path)?)?;
        fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            operation: "write".to_string(),
            source,
        })
    }

    fn format_for(path: &Path) -> Result<ConfigFormat, ConfigError> {
        ConfigFormat::from_path(path)
            .ok_or_else(|| ConfigError::UnsupportedFormat(path.display().to_string()))
    }
}

impl Subscriber for MediatorConfig {
    /// Declared subscriptions as service listeners, grouped by priority in
    /// order of first appearance
    fn subscribed_events(&self) -> EventListenerMap {
        self.subscriptions
            .iter()
            .map(|(event_name, entries)| {
                let mut priorities: Vec<(Priority, Vec<Listener>)> = Vec::new();
                for entry in entries {
                    let listener = Listener::service(entry.service.as_str(), entry.method.as_str());
                    match priorities.iter_mut().find(|(priority, _)| *priority == entry.priority) {
                        Some((_, listeners)) => listeners.push(listener),
                        None => priorities.push((entry.priority, vec![listener])),
                    }
                }
                (event_name.clone(), priorities)
            })
            .collect()
    }
}
