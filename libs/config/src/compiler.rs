//! Solidity compiler profiles
//!
//! The adapter sources exist in two language versions; each profile names
//! the solc version and any settings passed to it. Empty settings mean the
//! compiler defaults.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::defaults::compilers::SOLC_VERSIONS;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CompilerProfile {
    /// Exact solc version, e.g. `0.6.12`
    pub version: String,

    /// Raw solc settings, forwarded untouched
    #[serde(default)]
    pub settings: BTreeMap<String, serde_json::Value>,
}

impl CompilerProfile {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            settings: BTreeMap::new(),
        }
    }

    /// True when the profile relies entirely on compiler defaults
    pub fn uses_default_settings(&self) -> bool {
        self.settings.is_empty()
    }

    /// `(major, minor, patch)` parsed from the version string
    pub fn version_triple(&self) -> Option<(u32, u32, u32)> {
        let mut parts = self.version.split('.').map(|p| p.parse::<u32>().ok());
        let major = parts.next()??;
        let minor = parts.next()??;
        let patch = parts.next()??;
        if parts.next().is_some() {
            return None;
        }
        Some((major, minor, patch))
    }
}

/// Built-in profiles, one per supported source version
pub fn default_profiles() -> Vec<CompilerProfile> {
    SOLC_VERSIONS.iter().map(|v| CompilerProfile::new(*v)).collect()
}
