use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// An OpenAPI document version (`openapi: "3.1.0"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpecVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl SpecVersion {
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self { major, minor, patch }
    }

    /// True for 3.1.x and later 3.x lines. Version-gated transformers that
    /// target the 3.1 dialect key off this.
    pub fn is_31_or_later(&self) -> bool {
        self.major == 3 && self.minor >= 1
    }
}

impl fmt::Display for SpecVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for SpecVersion {
    type Err = SpecVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('.').collect();
        if parts.len() < 2 {
            return Err(SpecVersionError::InvalidFormat(s.to_string()));
        }

        let major = parts[0]
            .parse()
            .map_err(|_| SpecVersionError::InvalidFormat(s.to_string()))?;
        let minor = parts[1]
            .parse()
            .map_err(|_| SpecVersionError::InvalidFormat(s.to_string()))?;
        // Patch is informational only; a suffix like "0-rc1" must not defeat
        // the major/minor gate.
        let patch = parts.get(2).and_then(|p| p.parse().ok()).unwrap_or(0);

        Ok(SpecVersion::new(major, minor, patch))
    }
}

impl PartialOrd for SpecVersion {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SpecVersion {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.major
            .cmp(&other.major)
            .then_with(|| self.minor.cmp(&other.minor))
            .then_with(|| self.patch.cmp(&other.patch))
    }
}

/// Read and parse the root `openapi` key of a document tree.
///
/// `None` for a missing, non-string, or unparseable version; callers with a
/// version gate must treat that deterministically per their documented
/// default.
pub fn document_version(spec: &Value) -> Option<SpecVersion> {
    match spec.get("openapi") {
        Some(Value::String(version)) => version.parse().ok(),
        _ => None,
    }
}

#[derive(Debug, Error)]
pub enum SpecVersionError {
    #[error("Invalid version format: {0}")]
    InvalidFormat(String),
}
