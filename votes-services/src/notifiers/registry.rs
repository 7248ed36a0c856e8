use std::collections::HashMap;
use std::sync::Arc;

use crate::notifiers::TargetNotifier;

/// The dispatch table from target-type string to notifier.
///
/// A closed set: every supported target is registered at startup, so an
/// unknown target in a request is an enumerable rejection, not a runtime
/// discovery problem.
#[derive(Default)]
pub struct TargetNotifiers {
    notifiers: HashMap<String, Arc<dyn TargetNotifier>>,
}

impl TargetNotifiers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a notifier under a target-type string.
    pub fn register(&mut self, target: impl Into<String>, notifier: Arc<dyn TargetNotifier>) {
        self.notifiers.insert(target.into(), notifier);
    }

    /// Resolves the notifier for a target type, if one is registered.
    pub fn get(&self, target: &str) -> Option<Arc<dyn TargetNotifier>> {
        self.notifiers.get(target).cloned()
    }

    /// The registered target-type strings.
    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.notifiers.keys().map(String::as_str)
    }
}
