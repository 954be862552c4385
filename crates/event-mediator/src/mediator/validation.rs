//! Precondition checks shared by the plain and container mediators.
use std::sync::LazyLock;

use regex::Regex;

use crate::mediator::error::{MediatorError, Result};
use crate::mediator::listener::{Listener, ServiceRef};

static SERVICE_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\\?[A-Za-z_][A-Za-z0-9_.:\\-]*$").expect("valid service id pattern"));

static METHOD_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid method name pattern"));

/// Control, format (zero-width, BOM), private use and unassigned code points,
/// plus line and paragraph separators
static NON_PRINTABLE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{C}\p{Zl}\p{Zp}]").expect("valid non-printable pattern"));

/// Event names must be non-empty and made of graphic characters or spaces
pub(crate) fn check_event_name(event_name: &str) -> Result<()> {
    if event_name.is_empty() {
        return Err(MediatorError::EmptyEventName);
    }
    if NON_PRINTABLE_PATTERN.is_match(event_name) {
        return Err(MediatorError::InvalidEventName {
            event_name: event_name.to_string(),
        });
    }
    Ok(())
}

/// Shape check for listeners stored in the plain listener table
pub(crate) fn check_allowed_listener(event_name: &str, listener: &Listener) -> Result<()> {
    let invalid = |reason: String| MediatorError::InvalidListener {
        event_name: event_name.to_string(),
        reason,
    };
    match listener {
        Listener::Closure(_) => Ok(()),
        Listener::Method { target, method } => {
            if method.is_empty() {
                return Err(invalid("Listener method can NOT be empty".to_string()));
            }
            if !target.responds_to(method) {
                return Err(invalid(format!("Listener service does NOT contain method {}", method)));
            }
            Ok(())
        }
        Listener::Service(service_ref) => Err(invalid(format!(
            "Service listener {} must be registered through a container mediator",
            service_ref
        ))),
    }
}

/// Shape check for service listeners, returning the reference on success
pub(crate) fn check_allowed_service_listener<'a>(
    event_name: &str,
    listener: &'a Listener,
) -> Result<&'a ServiceRef> {
    let invalid = |reason: String| MediatorError::InvalidServiceListener {
        event_name: event_name.to_string(),
        reason,
    };
    let service_ref = listener
        .as_service_ref()
        .ok_or_else(|| invalid("Service listener MUST be [\"serviceName\", \"methodName\"]".to_string()))?;
    if service_ref.service().is_empty() {
        return Err(invalid("Service listener service name can NOT be empty".to_string()));
    }
    if service_ref.method().is_empty() {
        return Err(invalid("Listener method can NOT be empty".to_string()));
    }
    if !SERVICE_ID_PATTERN.is_match(service_ref.service()) {
        return Err(invalid(format!(
            "Service name '{}' is not a valid service identifier",
            service_ref.service().escape_debug()
        )));
    }
    if !METHOD_NAME_PATTERN.is_match(service_ref.method()) {
        return Err(invalid(format!(
            "Method name '{}' is not a valid method identifier",
            service_ref.method().escape_debug()
        )));
    }
    Ok(service_ref)
}
