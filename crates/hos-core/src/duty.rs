//! Duty-status enum shared by the simulator, output writers, and the JSON
//! result contract.

use std::str::FromStr;

use crate::CoreError;

/// One of the four ELD duty statuses.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DutyStatus {
    /// Behind the wheel.
    Driving,
    /// Working but not driving (pickup, dropoff, fueling, paperwork).
    OnDuty,
    /// Relieved of all duty.
    OffDuty,
    /// Resting in the cab's sleeper berth.
    SleeperBerth,
}

impl DutyStatus {
    pub const ALL: [DutyStatus; 4] = [
        DutyStatus::Driving,
        DutyStatus::OnDuty,
        DutyStatus::OffDuty,
        DutyStatus::SleeperBerth,
    ];

    /// `true` for statuses that count against the on-duty window.
    #[inline]
    pub fn is_on_duty(self) -> bool {
        matches!(self, DutyStatus::Driving | DutyStatus::OnDuty)
    }

    /// `true` for statuses that satisfy a rest period.
    #[inline]
    pub fn is_rest(self) -> bool {
        !self.is_on_duty()
    }

    /// Wire label, used for CSV/SQLite column values and JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            DutyStatus::Driving      => "driving",
            DutyStatus::OnDuty       => "on_duty",
            DutyStatus::OffDuty      => "off_duty",
            DutyStatus::SleeperBerth => "sleeper_berth",
        }
    }
}

impl std::fmt::Display for DutyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DutyStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DutyStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s.trim())
            .ok_or_else(|| CoreError::Parse(format!("unknown duty status {s:?}")))
    }
}
