//! The hours-of-service rule set.
//!
//! `HosRules` is plain configuration: it is built by the application (or
//! taken from [`HosRules::default`]) and passed into the simulator.  The
//! defaults are the simplified property-carrying driver rules:
//!
//! | Rule                 | Default   |
//! |----------------------|-----------|
//! | daily driving        | 11 h      |
//! | daily on-duty window | 14 h      |
//! | daily rest           | 10 h      |
//! | weekly cycle         | 70 h      |
//! | pickup / dropoff     | 1 h each  |
//! | fueling              | 0.5 h     |
//! | fuel interval        | 1 000 mi  |

use crate::{CoreError, CoreResult};

pub const DAILY_DRIVING_LIMIT: f64 = 11.0;
pub const DAILY_ON_DUTY_LIMIT: f64 = 14.0;
pub const DAILY_REST_PERIOD:   f64 = 10.0;
pub const WEEKLY_CYCLE_LIMIT:  f64 = 70.0;
pub const PICKUP_DROPOFF_TIME: f64 = 1.0;
pub const FUELING_TIME:        f64 = 0.5;
pub const FUEL_STOP_MILEAGE:   f64 = 1_000.0;

/// Metres per statute mile.
pub const METERS_PER_MILE: f64 = 1_609.34;

// ── DropoffPlacement ──────────────────────────────────────────────────────────

/// Which days carry the one-hour dropoff block.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DropoffPlacement {
    /// Every simulated day ends with a dropoff block.
    #[default]
    EveryDay,
    /// Only the day on which driving completes carries the dropoff.
    FinalDayOnly,
}

// ── HosRules ──────────────────────────────────────────────────────────────────

/// Limits and fixed overheads applied by the simulator.  All values are in
/// hours except `fuel_stop_miles`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HosRules {
    pub daily_driving_limit: f64,
    pub daily_on_duty_limit: f64,
    pub daily_rest_period:   f64,
    pub weekly_cycle_limit:  f64,
    pub pickup_hours:        f64,
    pub dropoff_hours:       f64,
    pub fueling_hours:       f64,
    pub fuel_stop_miles:     f64,
    pub dropoff:             DropoffPlacement,
}

impl Default for HosRules {
    fn default() -> Self {
        Self {
            daily_driving_limit: DAILY_DRIVING_LIMIT,
            daily_on_duty_limit: DAILY_ON_DUTY_LIMIT,
            daily_rest_period:   DAILY_REST_PERIOD,
            weekly_cycle_limit:  WEEKLY_CYCLE_LIMIT,
            pickup_hours:        PICKUP_DROPOFF_TIME,
            dropoff_hours:       PICKUP_DROPOFF_TIME,
            fueling_hours:       FUELING_TIME,
            fuel_stop_miles:     FUEL_STOP_MILEAGE,
            dropoff:             DropoffPlacement::EveryDay,
        }
    }
}

impl HosRules {
    /// Same rules with a different dropoff placement.
    pub fn with_dropoff(mut self, dropoff: DropoffPlacement) -> Self {
        self.dropoff = dropoff;
        self
    }

    /// Overhead that can land in a single on-duty window in the worst case:
    /// pickup, dropoff, and one fuel stop.
    pub fn max_daily_overhead(&self) -> f64 {
        self.pickup_hours + self.dropoff_hours + self.fueling_hours
    }

    /// Reject rule sets the simulator cannot make progress under.
    pub fn validate(&self) -> CoreResult<()> {
        let positive = [
            ("daily_driving_limit", self.daily_driving_limit),
            ("daily_on_duty_limit", self.daily_on_duty_limit),
            ("daily_rest_period",   self.daily_rest_period),
            ("weekly_cycle_limit",  self.weekly_cycle_limit),
            ("fuel_stop_miles",     self.fuel_stop_miles),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(CoreError::Config(format!("{name} must be positive, got {value}")));
            }
        }

        let non_negative = [
            ("pickup_hours",  self.pickup_hours),
            ("dropoff_hours", self.dropoff_hours),
            ("fueling_hours", self.fueling_hours),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(CoreError::Config(format!("{name} must be non-negative, got {value}")));
            }
        }

        if self.max_daily_overhead() >= self.daily_on_duty_limit {
            return Err(CoreError::Config(format!(
                "fixed overhead of {} h leaves no driving time in a {} h on-duty window",
                self.max_daily_overhead(),
                self.daily_on_duty_limit,
            )));
        }
        if self.daily_rest_period + self.daily_on_duty_limit > 24.0 {
            return Err(CoreError::Config(format!(
                "rest ({} h) plus on-duty window ({} h) exceeds one calendar day",
                self.daily_rest_period, self.daily_on_duty_limit,
            )));
        }
        Ok(())
    }
}
