//! State and invocation logic shared by every whole-object double.

use super::tracked::CallRegistry;
use crate::config::DoublesConfig;
use crate::errors::{DoubleError, Raised, Result};
use crate::observability::{enter_frame, EngineActivity};
use crate::pre_programmed::PreProgrammedMethod;
use crate::reflection::{
    enumerate_data_members, enumerate_invocable_members_filtered, enumerate_native_members,
    read_field, ClassDef, Instance, Receiver,
};
use crate::value::Value;
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

/// Identity marker distinguishing the flavors of double.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DoubleKind {
    Mock,
    Fake,
    Spy,
}

impl fmt::Display for DoubleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mock => write!(f, "Mock"),
            Self::Fake => write!(f, "Fake"),
            Self::Spy => write!(f, "Spy"),
        }
    }
}

impl DoubleKind {
    /// Configuration error of this flavor.
    pub(crate) fn error(self, message: impl Into<String>) -> DoubleError {
        match self {
            Self::Mock => DoubleError::mock(message),
            Self::Fake => DoubleError::fake(message),
            Self::Spy => DoubleError::spy(message),
        }
    }
}

/// What a wrapped member does when nothing is pre-programmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DefaultBehavior {
    /// Run the Original's body with the double as `this`
    Forward,
    /// Return the sentinel without touching the Original
    Sentinel,
}

/// The double itself: the adopted Original, copied data members, the
/// wrapped member list and the tracking and pre-programming registries.
///
/// It implements [`Receiver`], so forwarded bodies see the double as
/// `this` and their nested calls go through [`DoubleCore::call`] too.
pub(crate) struct DoubleCore {
    kind: DoubleKind,
    original: Instance,
    fields: BTreeMap<String, Value>,
    members: BTreeSet<String>,
    natives: BTreeSet<String>,
    calls: CallRegistry,
    tracking: bool,
    pre_programmed: BTreeMap<String, PreProgrammedMethod>,
    behavior: DefaultBehavior,
    sentinel: Value,
}

impl DoubleCore {
    pub(crate) fn build(
        kind: DoubleKind,
        class: &Arc<ClassDef>,
        constructor_args: &[Value],
        config: &DoublesConfig,
        behavior: DefaultBehavior,
        tracking: bool,
    ) -> Result<Self> {
        let span = tracing::debug_span!("create_double", kind = %kind, class = class.name());
        let _span = span.enter();
        let _frame = enter_frame(EngineActivity::Constructing, format!("{}Builder::create", kind));

        let original = class.instantiate(constructor_args)?;

        let deny = config.deny_list();
        let members = enumerate_invocable_members_filtered(&original, &deny);
        let natives = enumerate_native_members(&original, &deny);
        let fields = enumerate_data_members(&original)
            .into_iter()
            .map(|member| (member.name, member.value))
            .collect();

        log::debug!(
            "Created {} of {} wrapping {} member(s): {:?}",
            kind,
            class.name(),
            members.len(),
            members
        );

        Ok(Self {
            kind,
            calls: CallRegistry::new(members.iter().cloned()),
            members: members.into_iter().collect(),
            natives: natives.into_iter().collect(),
            original,
            fields,
            tracking,
            pre_programmed: BTreeMap::new(),
            behavior,
            sentinel: config.sentinel.clone(),
        })
    }

    pub(crate) fn kind(&self) -> DoubleKind {
        self.kind
    }

    pub(crate) fn original(&self) -> &Instance {
        &self.original
    }

    pub(crate) fn calls(&self) -> &CallRegistry {
        &self.calls
    }

    pub(crate) fn members(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(String::as_str)
    }

    pub(crate) fn has_member(&self, name: &str) -> bool {
        self.members.contains(name)
    }

    fn missing_member(&self, name: &str) -> DoubleError {
        self.kind
            .error(format!("Method \"{}\" does not exist.", name))
    }

    /// Start (or restart) pre-programming `name`.
    pub(crate) fn method(&mut self, name: &str) -> Result<&mut PreProgrammedMethod> {
        if !self.has_member(name) {
            return Err(self.missing_member(name));
        }
        log::debug!("Pre-programming {} member \"{}\"", self.kind, name);
        let fresh = PreProgrammedMethod::new(name);
        let slot = match self.pre_programmed.entry(name.to_string()) {
            Entry::Occupied(mut entry) => {
                entry.insert(fresh);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(fresh),
        };
        Ok(slot)
    }

    /// Fail with this flavor's error unless `name` is a wrapped member.
    pub(crate) fn require_member(&self, name: &str) -> Result<()> {
        if self.has_member(name) {
            Ok(())
        } else {
            Err(self.missing_member(name))
        }
    }

    fn not_a_function(&self, name: &str) -> DoubleError {
        Raised::type_error(format!(
            "{}.{} is not a function",
            self.original.class().name(),
            name
        ))
        .into()
    }
}

impl Receiver for DoubleCore {
    fn class(&self) -> &Arc<ClassDef> {
        self.original.class()
    }

    fn fields(&self) -> &BTreeMap<String, Value> {
        &self.fields
    }

    fn field(&self, name: &str) -> Option<Value> {
        read_field(self, name)
    }

    fn set_field(&mut self, name: &str, value: Value) {
        self.fields.insert(name.to_string(), value);
    }

    fn call(&mut self, name: &str, args: &[Value]) -> Result<Value> {
        if self.natives.contains(name) {
            let body = self
                .original
                .find_member(name)
                .ok_or_else(|| self.not_a_function(name))?;
            return body(self, args);
        }
        if !self.members.contains(name) {
            return Err(self.not_a_function(name));
        }

        let _frame = enter_frame(
            EngineActivity::Invoking,
            format!("{}::call {}", self.kind, name),
        );
        if self.tracking {
            self.calls.record(name, args);
            log::trace!(
                "{} call #{} to \"{}\" with {:?}",
                self.kind,
                self.calls.count(name),
                name,
                args
            );
        }

        if let Some(method) = self.pre_programmed.get(name) {
            return method.resolve(args);
        }

        match self.behavior {
            DefaultBehavior::Forward => {
                let body = self
                    .original
                    .find_member(name)
                    .ok_or_else(|| self.not_a_function(name))?;
                body(self, args)
            }
            DefaultBehavior::Sentinel => Ok(self.sentinel.clone()),
        }
    }
}
