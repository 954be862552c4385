use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::mediator::error::MediatorError;

/// Listener priority as accepted at the API boundary
///
/// Larger concrete values run earlier. `First` and `Last` are resolved to a
/// concrete value once, when the listener is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PriorityRepr", into = "PriorityRepr")]
pub enum Priority {
    /// Explicit priority
    At(i64),
    /// One above the highest priority currently registered for the event
    First,
    /// One below the lowest priority currently registered for the event
    Last,
}

impl Priority {
    /// Resolve to a concrete priority.
    ///
    /// `extents` holds the `(min, max)` priority of every table the event may
    /// have listeners in; `None` entries are tables without the event.
    pub fn resolve<I>(self, extents: I) -> i64
    where
        I: IntoIterator<Item = Option<(i64, i64)>>,
    {
        match self {
            Priority::At(priority) => priority,
            Priority::First => extents
                .into_iter()
                .flatten()
                .map(|(_, max)| max.saturating_add(1))
                .max()
                .unwrap_or(1),
            Priority::Last => extents
                .into_iter()
                .flatten()
                .map(|(min, _)| min.saturating_sub(1))
                .min()
                .unwrap_or(-1),
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::At(0)
    }
}

impl From<i64> for Priority {
    fn from(priority: i64) -> Self {
        Priority::At(priority)
    }
}

impl From<i32> for Priority {
    fn from(priority: i32) -> Self {
        Priority::At(i64::from(priority))
    }
}

impl FromStr for Priority {
    type Err = MediatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first" => Ok(Priority::First),
            "last" => Ok(Priority::Last),
            other => other
                .parse::<i64>()
                .map(Priority::At)
                .map_err(|_| MediatorError::UnknownPriority(s.to_string())),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::At(priority) => write!(f, "{}", priority),
            Priority::First => f.write_str("first"),
            Priority::Last => f.write_str("last"),
        }
    }
}

/// Wire form: either a bare integer or one of the symbolic names
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum PriorityRepr {
    Value(i64),
    Name(String),
}

impl TryFrom<PriorityRepr> for Priority {
    type Error = MediatorError;

    fn try_from(repr: PriorityRepr) -> Result<Self, Self::Error> {
        match repr {
            PriorityRepr::Value(priority) => Ok(Priority::At(priority)),
            PriorityRepr::Name(name) => name.parse(),
        }
    }
}

impl From<Priority> for PriorityRepr {
    fn from(priority: Priority) -> Self {
        match priority {
            Priority::At(priority) => PriorityRepr::Value(priority),
            symbolic => PriorityRepr::Name(symbolic.to_string()),
        }
    }
}
