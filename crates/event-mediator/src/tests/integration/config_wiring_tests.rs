#![cfg(test)]

use std::fs;
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;

use tempfile::tempdir;

use crate::config::MediatorConfig;
use crate::container::{ContainerMediator, ContainerMediatorInterface, ServiceRegistry};
use crate::logging::{LogFormat, LoggingConfig, LoggingError, init_logging};
use crate::mediator::MediatorInterface;
use crate::tests::common::{call_log, calls, register_counted};

const CONFIG: &str = r#"
[logging]
level = "warn"

[[subscriptions."user.created"]]
service = "audit"
method = "record"
priority = "last"

[[subscriptions."user.created"]]
service = "mailer"
method = "send_welcome"
priority = 10

[[subscriptions."user.deleted"]]
service = "audit"
method = "record"
"#;

#[test]
fn test_config_driven_container_mediator() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mediator.toml");
    fs::write(&path, CONFIG).unwrap();
    let config = MediatorConfig::load(&path).unwrap();

    let log = call_log();
    let built = Arc::new(AtomicUsize::new(0));
    let mut registry = ServiceRegistry::new();
    register_counted(&mut registry, "audit", &["record"], &log, &built);
    register_counted(&mut registry, "mailer", &["send_welcome"], &log, &built);
    let mut mediator = ContainerMediator::with_container(registry);

    mediator.add_service_subscriber(&config).unwrap();
    assert_eq!(mediator.get_all_service_listeners().len(), 2);
    assert!(!mediator.service_container().is_instantiated("audit"));

    mediator.trigger("user.created", None).unwrap();
    assert_eq!(calls(&log), vec!["mailer::send_welcome", "audit::record"]);
    assert!(!mediator.is_loaded("user.deleted"));

    mediator.remove_service_subscriber(&config).unwrap();
    mediator.trigger("user.created", None).unwrap();
    mediator.trigger("user.deleted", None).unwrap();

    assert_eq!(calls(&log).len(), 2);
    assert!(!mediator.has_any_listeners().unwrap());
}

#[test]
fn test_config_with_unknown_service_fails_at_trigger() {
    let mut config = MediatorConfig::new();
    config.subscribe("e", "ghost", "m", 0);
    let mut mediator: ContainerMediator<ServiceRegistry> = ContainerMediator::new();

    mediator.add_service_subscriber(&config).unwrap();

    assert!(mediator.trigger("e", None).is_err());
    assert!(!mediator.is_loaded("e"));
}

#[test]
fn test_init_logging_installs_once() {
    let config = LoggingConfig {
        level: "debug".to_string(),
        format: LogFormat::Compact,
    };

    // A rejected filter must not install anything, so the next call still succeeds
    if std::env::var_os("RUST_LOG").is_none() {
        let invalid = LoggingConfig {
            level: "event_mediator=loud".to_string(),
            ..config.clone()
        };
        assert!(matches!(
            init_logging(&invalid),
            Err(LoggingError::InvalidLevel { ref level, .. }) if level == "event_mediator=loud"
        ));
        assert!(init_logging(&config).is_ok());
    } else {
        let _ = init_logging(&config);
    }

    assert!(matches!(
        init_logging(&config),
        Err(LoggingError::AlreadyInitialized(_))
    ));
    log::debug!("logging still routed after a rejected second install");
}
