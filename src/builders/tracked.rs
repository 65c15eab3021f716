//! Per-member call tracking.

use crate::value::Value;
use std::collections::BTreeMap;

/// Invocation count and most recent arguments of one member.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackedMember {
    pub count: usize,
    pub last_args: Vec<Value>,
}

impl TrackedMember {
    pub fn record(&mut self, args: &[Value]) {
        self.count += 1;
        self.last_args = args.to_vec();
    }
}

/// One [`TrackedMember`] per wrapped member, created empty up front.
///
/// Entries are never removed; recording a name that was not registered
/// is ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallRegistry {
    members: BTreeMap<String, TrackedMember>,
}

impl CallRegistry {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            members: names
                .into_iter()
                .map(|name| (name.into(), TrackedMember::default()))
                .collect(),
        }
    }

    pub fn record(&mut self, name: &str, args: &[Value]) {
        if let Some(member) = self.members.get_mut(name) {
            member.record(args);
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.members.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&TrackedMember> {
        self.members.get(name)
    }

    /// Call count of `name`; zero for untracked names.
    pub fn count(&self, name: &str) -> usize {
        self.members.get(name).map_or(0, |member| member.count)
    }

    /// Arguments of the most recent call to `name`.
    pub fn last_args(&self, name: &str) -> &[Value] {
        self.members
            .get(name)
            .map_or(&[][..], |member| member.last_args.as_slice())
    }

    /// Every tracked name with its call count.
    pub fn counts(&self) -> BTreeMap<String, usize> {
        self.members
            .iter()
            .map(|(name, member)| (name.clone(), member.count))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_registry_starts_empty() {
        let registry = CallRegistry::new(["hello", "test"]);
        assert_eq!(registry.count("hello"), 0);
        assert_eq!(registry.count("test"), 0);
        assert!(registry.last_args("hello").is_empty());
    }

    #[test]
    fn test_record_updates_count_and_args() {
        let mut registry = CallRegistry::new(["greet"]);
        registry.record("greet", &[json!("a")]);
        registry.record("greet", &[json!("b"), json!(2)]);
        assert_eq!(registry.count("greet"), 2);
        assert_eq!(registry.last_args("greet"), &[json!("b"), json!(2)]);
    }

    #[test]
    fn test_unregistered_names_are_ignored() {
        let mut registry = CallRegistry::new(["greet"]);
        registry.record("to_string", &[]);
        assert!(!registry.contains("to_string"));
        assert_eq!(registry.counts().len(), 1);
    }
}
