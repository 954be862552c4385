use std::collections::BTreeMap;

use crate::mediator::listener::Listener;
use crate::mediator::priority::Priority;

/// One event's buckets, highest priority first, insertion order within a bucket
pub type Buckets<L = Listener> = Vec<(i64, Vec<L>)>;

/// Snapshot of a whole table keyed by event name
pub type ListenerMap<L = Listener> = BTreeMap<String, Buckets<L>>;

/// Event name -> priority -> insertion ordered bucket.
///
/// Used for both the plain listener table and the container layer's service
/// listener table. Empty buckets and empty events are pruned as soon as they
/// empty out, so `contains_event` always means "has at least one listener".
#[derive(Debug, Clone)]
pub struct ListenerTable<L> {
    events: BTreeMap<String, BTreeMap<i64, Vec<L>>>,
}

impl<L> Default for ListenerTable<L> {
    fn default() -> Self {
        Self {
            events: BTreeMap::new(),
        }
    }
}

impl<L: Clone + PartialEq> ListenerTable<L> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append to the bucket unless an identical listener is already there.
    /// Returns whether the listener was added.
    pub fn insert(&mut self, event_name: &str, priority: i64, listener: L) -> bool {
        let bucket = self
            .events
            .entry(event_name.to_string())
            .or_default()
            .entry(priority)
            .or_default();
        if bucket.contains(&listener) {
            return false;
        }
        bucket.push(listener);
        true
    }

    /// Find the copy of `listener` that [`remove`](Self::remove) would take out.
    ///
    /// `Priority::At` only looks in that bucket; `First` walks buckets from
    /// the highest priority down and `Last` from the lowest up, stopping at
    /// the first match. Returns the bucket's priority and the index within it.
    pub fn locate(&self, event_name: &str, listener: &L, priority: Priority) -> Option<(i64, usize)> {
        let buckets = self.events.get(event_name)?;
        let position = |(priority, bucket): (&i64, &Vec<L>)| {
            bucket.iter().position(|l| l == listener).map(|index| (*priority, index))
        };
        match priority {
            Priority::At(at) => buckets.get_key_value(&at).and_then(position),
            Priority::First => buckets.iter().rev().find_map(position),
            Priority::Last => buckets.iter().find_map(position),
        }
    }

    /// Remove one copy of `listener`, pruning the bucket and the event if they
    /// empty out. Returns the priority it was removed from.
    pub fn remove(&mut self, event_name: &str, listener: &L, priority: Priority) -> Option<i64> {
        let (found, index) = self.locate(event_name, listener, priority)?;
        let buckets = self.events.get_mut(event_name)?;
        if let Some(bucket) = buckets.get_mut(&found) {
            bucket.remove(index);
            if bucket.is_empty() {
                buckets.remove(&found);
            }
        }
        if buckets.is_empty() {
            self.events.remove(event_name);
        }
        Some(found)
    }

    /// `(lowest, highest)` priority registered for the event
    pub fn extent(&self, event_name: &str) -> Option<(i64, i64)> {
        let buckets = self.events.get(event_name)?;
        let min = *buckets.keys().next()?;
        let max = *buckets.keys().next_back()?;
        Some((min, max))
    }

    /// Sorted snapshot of one event; empty when the event is unknown
    pub fn buckets(&self, event_name: &str) -> Buckets<L> {
        self.events
            .get(event_name)
            .map(|buckets| {
                buckets
                    .iter()
                    .rev()
                    .map(|(priority, bucket)| (*priority, bucket.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Sorted snapshot of every event
    pub fn all(&self) -> ListenerMap<L> {
        self.events
            .keys()
            .map(|event_name| (event_name.clone(), self.buckets(event_name)))
            .collect()
    }

    pub fn contains_event(&self, event_name: &str) -> bool {
        self.events.contains_key(event_name)
    }

    pub fn event_names(&self) -> impl Iterator<Item = &str> {
        self.events.keys().map(String::as_str)
    }

    /// Number of listeners registered for one event across all buckets
    pub fn listener_count(&self, event_name: &str) -> usize {
        self.events
            .get(event_name)
            .map(|buckets| buckets.values().map(Vec::len).sum())
            .unwrap_or(0)
    }

    /// Number of listeners across the whole table
    pub fn total_count(&self) -> usize {
        self.events
            .values()
            .flat_map(|buckets| buckets.values())
            .map(Vec::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
