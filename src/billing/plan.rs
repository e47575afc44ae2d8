//! Plan tiers and the capabilities they grant.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::billing::PlanError;

/// Subscription plan tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanTier {
    Free,
    Basic,
    Pro,
    Premium,
}

/// A feature gated by plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    ListHubs,
    ReadDevices,
    ReadRooms,
    ReadGroups,
    ReadTelemetry,
    ReadLogs,
    SendCommands,
    AccessProxy,
}

const FREE: &[Capability] = &[Capability::ListHubs];

const BASIC: &[Capability] = &[
    Capability::ListHubs,
    Capability::ReadDevices,
    Capability::ReadRooms,
    Capability::ReadGroups,
    Capability::ReadTelemetry,
    Capability::ReadLogs,
];

const PRO: &[Capability] = &[
    Capability::ListHubs,
    Capability::ReadDevices,
    Capability::ReadRooms,
    Capability::ReadGroups,
    Capability::ReadTelemetry,
    Capability::ReadLogs,
    Capability::SendCommands,
];

const PREMIUM: &[Capability] = &Capability::ALL;

impl PlanTier {
    pub const ALL: [PlanTier; 4] = [PlanTier::Free, PlanTier::Basic, PlanTier::Pro, PlanTier::Premium];

    /// Capabilities granted by this tier.
    pub fn capabilities(&self) -> &'static [Capability] {
        match self {
            PlanTier::Free => FREE,
            PlanTier::Basic => BASIC,
            PlanTier::Pro => PRO,
            PlanTier::Premium => PREMIUM,
        }
    }

    pub fn allows(&self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlanTier::Free => "free",
            PlanTier::Basic => "basic",
            PlanTier::Pro => "pro",
            PlanTier::Premium => "premium",
        }
    }

    /// Only paid tiers can be bought through checkout.
    pub fn is_purchasable(&self) -> bool {
        !matches!(self, PlanTier::Free)
    }
}

impl Capability {
    pub const ALL: [Capability; 8] = [
        Capability::ListHubs,
        Capability::ReadDevices,
        Capability::ReadRooms,
        Capability::ReadGroups,
        Capability::ReadTelemetry,
        Capability::ReadLogs,
        Capability::SendCommands,
        Capability::AccessProxy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::ListHubs => "list_hubs",
            Capability::ReadDevices => "read_devices",
            Capability::ReadRooms => "read_rooms",
            Capability::ReadGroups => "read_groups",
            Capability::ReadTelemetry => "read_telemetry",
            Capability::ReadLogs => "read_logs",
            Capability::SendCommands => "send_commands",
            Capability::AccessProxy => "access_proxy",
        }
    }

    /// Lowest tier granting this capability.
    pub fn minimum_tier(&self) -> PlanTier {
        PlanTier::ALL
            .into_iter()
            .find(|tier| tier.allows(*self))
            .unwrap_or(PlanTier::Premium)
    }
}

impl FromStr for PlanTier {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlanTier::ALL
            .into_iter()
            .find(|tier| tier.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PlanError::UnknownPlan(s.to_string()))
    }
}

impl FromStr for Capability {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Capability::ALL
            .into_iter()
            .find(|cap| cap.as_str() == s)
            .ok_or_else(|| PlanError::UnknownCapability(s.to_string()))
    }
}

impl fmt::Display for PlanTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
