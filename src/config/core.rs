//! Configuration types.
//!
//! Every section uses `#[serde(default)]`, so a `.understudy.toml` only
//! needs the keys it changes.

use crate::reflection::NativeDenyList;
use crate::value::Value;
use serde::{Deserialize, Serialize};

/// Value whole-object spies and stubs return unless told otherwise.
pub const DEFAULT_SENTINEL: &str = "stubbed";

/// Root configuration structure for understudy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoublesConfig {
    /// Return value of spied and stubbed members with no explicit value
    pub sentinel: Value,

    /// Additional members treated as native (never tracked)
    pub native_members: NativeMembersConfig,

    /// Rendering of verification failures
    pub verification: VerificationConfig,
}

impl Default for DoublesConfig {
    fn default() -> Self {
        Self {
            sentinel: Value::String(DEFAULT_SENTINEL.to_string()),
            native_members: NativeMembersConfig::default(),
            verification: VerificationConfig::default(),
        }
    }
}

impl DoublesConfig {
    /// Deny-list combining the fixed natives with configured extras.
    pub fn deny_list(&self) -> NativeDenyList {
        NativeDenyList::with_extra(self.native_members.extra.iter().cloned())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NativeMembersConfig {
    pub extra: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerificationConfig {
    /// Colorize the "Verification Results" header
    pub color: bool,

    /// Append the "Check the above file ..." hint when a location is known
    pub fix_hint: bool,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            color: false,
            fix_hint: true,
        }
    }
}
