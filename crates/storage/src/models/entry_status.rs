use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Participation status of a history entry.
///
/// Generic updates may move `scheduled` to `cancelled` or `no_show` and back.
/// `completed` is only reachable through the completion operation and is final.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
    NoShow,
}

impl EntryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::NoShow => "no_show",
        }
    }

    /// Whether a generic update may move an entry from `self` to `next`
    pub fn can_update_to(self, next: EntryStatus) -> bool {
        use EntryStatus::*;

        match (self, next) {
            (current, next) if current == next => true,
            (Scheduled, Cancelled | NoShow) => true,
            (Cancelled | NoShow, Scheduled) => true,
            _ => false,
        }
    }

    /// Whether the completion operation is allowed from this status
    pub fn can_complete(self) -> bool {
        self == Self::Scheduled
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "scheduled" => Ok(Self::Scheduled),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            "no_show" => Ok(Self::NoShow),
            other => Err(format!("Unknown entry status: {}", other)),
        }
    }
}
