//! Member enumeration and data-member copying.
//!
//! Enumeration walks the whole class chain so inherited behavior is
//! captured. Names are sorted and deduplicated; when two ancestors define
//! the same name, the closest one is the one that counts.
//!
//! Native members (string conversion, property queries and the like) are
//! structural rather than domain behavior. They are never wrapped with call
//! tracking, since doing so would make a double's own plumbing show up as
//! calls and would change how the double answers those queries.

use super::instance::{Instance, Receiver};
use crate::value::Value;
use std::collections::BTreeSet;

/// Member names that are never wrapped with tracking.
pub const NATIVE_MEMBERS: &[&str] = &[
    "constructor",
    "define_getter",
    "define_setter",
    "has_own_property",
    "is_prototype_of",
    "lookup_getter",
    "lookup_setter",
    "property_is_enumerable",
    "to_locale_string",
    "to_string",
    "value_of",
];

/// Deny-list of native members, optionally extended from configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NativeDenyList {
    extra: BTreeSet<String>,
}

impl NativeDenyList {
    pub fn with_extra<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            extra: extra.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        NATIVE_MEMBERS.contains(&name) || self.extra.contains(name)
    }
}

/// Whether `name` is on the fixed native deny-list.
pub fn is_native(name: &str) -> bool {
    NATIVE_MEMBERS.contains(&name)
}

/// A data member name with its current value.
#[derive(Debug, Clone, PartialEq)]
pub struct DataMember {
    pub name: String,
    pub value: Value,
}

/// Every data member of `obj` with its current value, sorted by name.
///
/// Own fields come first in precedence, then getters from the closest
/// class outward. Getter-declared members are evaluated to a snapshot.
pub fn enumerate_data_members(obj: &dyn Receiver) -> Vec<DataMember> {
    let mut names: BTreeSet<&str> = obj.fields().keys().map(String::as_str).collect();
    for class in obj.class().lineage() {
        names.extend(class.own_getter_names());
    }
    names
        .into_iter()
        .filter_map(|name| {
            obj.field(name).map(|value| DataMember {
                name: name.to_string(),
                value,
            })
        })
        .collect()
}

/// Names of every invocable member of `obj` except natives, sorted.
pub fn enumerate_invocable_members(obj: &Instance) -> Vec<String> {
    enumerate_invocable_members_filtered(obj, &NativeDenyList::default())
}

/// Like [`enumerate_invocable_members`], with a caller-supplied deny-list.
pub fn enumerate_invocable_members_filtered(obj: &Instance, deny: &NativeDenyList) -> Vec<String> {
    all_member_names(obj)
        .into_iter()
        .filter(|name| !deny.contains(name))
        .collect()
}

/// Names of the native members reachable from `obj`, sorted.
pub fn enumerate_native_members(obj: &Instance, deny: &NativeDenyList) -> Vec<String> {
    all_member_names(obj)
        .into_iter()
        .filter(|name| deny.contains(name))
        .collect()
}

fn all_member_names(obj: &Instance) -> BTreeSet<String> {
    let mut names: BTreeSet<String> = obj.override_names().map(str::to_string).collect();
    for class in obj.class().lineage() {
        names.extend(class.own_method_names().map(str::to_string));
    }
    names
}

/// Copy a snapshot of each data member of `source` onto `destination`.
///
/// Getter-declared members arrive as plain values; the accessor itself is
/// not carried over, so later changes on the source are not reflected.
pub fn copy_data_members(source: &dyn Receiver, destination: &mut dyn Receiver) {
    for member in enumerate_data_members(source) {
        destination.set_field(&member.name, member.value);
    }
}
