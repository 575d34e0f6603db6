use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Stable driver identifier. Assignments and ledger balances key on this,
/// never on the display name.
#[derive(
    Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(transparent)]
pub struct DriverId(String);

impl DriverId {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Derive a code from a free-text name, for records that reference
    /// drivers by name only: uppercased, whitespace collapsed to `_`,
    /// anything else non-alphanumeric stripped.
    pub fn derive_from_name(name: &str) -> Self {
        let code = name
            .trim()
            .chars()
            .map(|c| if c.is_whitespace() { '_' } else { c })
            .filter(|c| c.is_alphanumeric() || *c == '_')
            .collect::<String>()
            .to_uppercase();

        Self(code)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DriverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for DriverId {
    fn from(code: &str) -> Self {
        Self(code.to_owned())
    }
}

/// A driver as the solver sees them for one day: identity plus the hours
/// still available this month. `available_hours` is the ledger's current
/// remaining value at solve time; the solver never mutates it.
#[derive(Serialize, Debug, Clone)]
pub struct DriverAvailability {
    id: DriverId,
    name: String,
    available_hours: f64,
}

impl DriverAvailability {
    pub fn new(id: DriverId, name: impl Into<String>, available_hours: f64) -> Self {
        Self {
            id,
            name: name.into(),
            available_hours,
        }
    }

    pub fn id(&self) -> &DriverId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn available_hours(&self) -> f64 {
        self.available_hours
    }
}
