//! The `Simulator` and its day loop.

use chrono::NaiveDateTime;

use hos_core::time::MIN_EVENT_HOURS;
use hos_core::{DayLog, DropoffPlacement, DutyEvent, DutyStatus, HosRules, Remark, TripClock};
use hos_route::RouteSummary;

use crate::{NoopObserver, SimError, SimObserver, SimResult, SimulationResult};

/// Driving left below this many hours counts as done.
const DRIVING_EPSILON: f64 = 1e-9;

/// Slack when counting fuel-interval crossings, so accumulated rounding
/// never hides a threshold the route distance actually reaches.
const MILEAGE_EPSILON: f64 = 1e-7;

/// Schedule `route` under the default rules, starting at `start`.
///
/// Shorthand for `Simulator::default().run(route, cycle_hours_used, start)`.
pub fn simulate(
    route:            RouteSummary,
    cycle_hours_used: f64,
    start:            NaiveDateTime,
) -> SimResult<SimulationResult> {
    Simulator::default().run(route, cycle_hours_used, start)
}

// ── Per-run state ─────────────────────────────────────────────────────────────

/// Running totals carried from one day to the next.
struct TripState {
    driving_left: f64,
    cycle_left:   f64,
    miles:        f64,
    mph:          f64,
    clock:        TripClock,
}

/// What a day will hold, decided before its first duty event.
struct DayPlan {
    driving: f64,
    dropoff: bool,
}

// ── Simulator ─────────────────────────────────────────────────────────────────

/// Lays a route out over calendar days under a [`HosRules`] set.
///
/// Each day gets, in order: a rest block (every day but the first), pickup
/// (first day), driving, one fueling block per fuel interval crossed, the
/// rest of the on-duty window as non-driving duty, dropoff (per
/// [`DropoffPlacement`]), and idle off-duty time up to midnight when that is
/// shorter than a rest period.
///
/// A day's driving is sized only after its fixed overhead (pickup, dropoff,
/// predicted fueling) has been reserved, so no day's on-duty time exceeds
/// the window.  Days after the first always begin at 00:00.
///
/// The simulator holds no per-run state; one instance can serve any number
/// of runs, from any number of threads.
#[derive(Clone, Debug, Default)]
pub struct Simulator {
    rules: HosRules,
}

impl Simulator {
    /// Create a simulator after validating `rules`.
    pub fn new(rules: HosRules) -> SimResult<Self> {
        rules.validate()?;
        Ok(Self { rules })
    }

    pub fn rules(&self) -> &HosRules {
        &self.rules
    }

    /// Schedule `route` for a driver who has already used `cycle_hours_used`
    /// of the weekly cycle, starting at `start`.
    pub fn run(
        &self,
        route:            RouteSummary,
        cycle_hours_used: f64,
        start:            NaiveDateTime,
    ) -> SimResult<SimulationResult> {
        self.run_observed(route, cycle_hours_used, start, &mut NoopObserver)
    }

    /// Like [`run`][Self::run], reporting progress to `observer`.
    pub fn run_observed<O: SimObserver>(
        &self,
        route:            RouteSummary,
        cycle_hours_used: f64,
        start:            NaiveDateTime,
        observer:         &mut O,
    ) -> SimResult<SimulationResult> {
        self.validate_inputs(&route, cycle_hours_used)?;

        let total_hours = route.total_hours();
        let mut state = TripState {
            driving_left: total_hours,
            cycle_left:   self.rules.weekly_cycle_limit - cycle_hours_used,
            miles:        0.0,
            mph:          route.total_miles() / total_hours,
            clock:        TripClock::new(start),
        };

        let mut days = Vec::new();
        while state.driving_left > DRIVING_EPSILON {
            let day = self.simulate_day(&mut state, days.len(), observer)?;
            days.push(day);
        }

        let result = SimulationResult { route, days };
        observer.on_sim_end(&result);
        Ok(result)
    }

    // ── Validation ────────────────────────────────────────────────────────

    fn validate_inputs(&self, route: &RouteSummary, cycle_hours_used: f64) -> SimResult<()> {
        if !(route.duration_s.is_finite() && route.duration_s > 0.0) {
            return Err(SimError::InvalidRoute(format!(
                "duration must be positive, got {} s",
                route.duration_s
            )));
        }
        if !(route.distance_m.is_finite() && route.distance_m >= 0.0) {
            return Err(SimError::InvalidRoute(format!(
                "distance must be non-negative, got {} m",
                route.distance_m
            )));
        }
        let limit = self.rules.weekly_cycle_limit;
        if !(cycle_hours_used.is_finite() && (0.0..limit).contains(&cycle_hours_used)) {
            return Err(SimError::InvalidCycle { used: cycle_hours_used, limit });
        }
        Ok(())
    }

    // ── One day ───────────────────────────────────────────────────────────

    fn simulate_day<O: SimObserver>(
        &self,
        state:    &mut TripState,
        index:    usize,
        observer: &mut O,
    ) -> SimResult<DayLog> {
        let rules = &self.rules;
        let first_day = index == 0;

        if !first_day {
            state.clock.roll_to_next_day();
        }
        let mut day = DayLog::new(state.clock.date());
        observer.on_day_start(index, day.date);

        if !first_day {
            let rest = if index % 2 == 1 { DutyStatus::SleeperBerth } else { DutyStatus::OffDuty };
            record(&mut day, state, observer, index, rest, rules.daily_rest_period, Remark::Rest);
        }

        let plan = self.plan_day(state, first_day);
        if plan.driving <= DRIVING_EPSILON {
            return Err(SimError::CycleExhausted {
                day:                     index,
                driving_hours_remaining: state.driving_left,
            });
        }

        let mut window = rules.daily_on_duty_limit;

        if first_day {
            record(&mut day, state, observer, index, DutyStatus::OnDuty, rules.pickup_hours, Remark::Pickup);
            window -= rules.pickup_hours;
            state.cycle_left -= rules.pickup_hours;
        }

        record(&mut day, state, observer, index, DutyStatus::Driving, plan.driving, Remark::Driving);
        let miles_before = state.miles;
        state.miles += plan.driving * state.mph;

        for _ in 0..fuel_crossings(miles_before, state.miles, rules.fuel_stop_miles) {
            record(&mut day, state, observer, index, DutyStatus::OnDuty, rules.fueling_hours, Remark::Fueling);
            window -= rules.fueling_hours;
            state.cycle_left -= rules.fueling_hours;
        }

        state.driving_left -= plan.driving;
        window -= plan.driving;
        state.cycle_left -= plan.driving;

        let reserved = if plan.dropoff { rules.dropoff_hours } else { 0.0 };
        let residual = window - reserved;
        if residual > MIN_EVENT_HOURS {
            record(&mut day, state, observer, index, DutyStatus::OnDuty, residual, Remark::OnDutyNotDriving);
        }

        if plan.dropoff {
            record(&mut day, state, observer, index, DutyStatus::OnDuty, rules.dropoff_hours, Remark::Dropoff);
        }

        let idle = state.clock.hours_until_midnight();
        if idle > MIN_EVENT_HOURS && idle < rules.daily_rest_period {
            record(&mut day, state, observer, index, DutyStatus::OffDuty, idle, Remark::Idle);
        }

        observer.on_day_end(index, &day);
        Ok(day)
    }

    // ── Driving allotment ─────────────────────────────────────────────────

    /// Decide today's driving and whether today carries the dropoff.
    fn plan_day(&self, state: &TripState, first_day: bool) -> DayPlan {
        let pickup = if first_day { self.rules.pickup_hours } else { 0.0 };
        let with_dropoff = self.allot_with_fuel(state, pickup + self.rules.dropoff_hours, pickup);

        match self.rules.dropoff {
            DropoffPlacement::EveryDay => DayPlan { driving: with_dropoff, dropoff: true },
            DropoffPlacement::FinalDayOnly => {
                if with_dropoff >= state.driving_left - DRIVING_EPSILON {
                    return DayPlan { driving: with_dropoff, dropoff: true };
                }
                let without = self.allot_with_fuel(state, pickup, pickup);
                if without >= state.driving_left - DRIVING_EPSILON {
                    // Driving could finish today but the dropoff would not
                    // fit; stop short and finish tomorrow.
                    DayPlan { driving: with_dropoff, dropoff: false }
                } else {
                    DayPlan { driving: without, dropoff: false }
                }
            }
        }
    }

    /// Driving hours once `overhead` window hours and `cycle_overhead` cycle
    /// hours are set aside, also setting aside fueling when that much
    /// driving would cross fuel intervals.
    fn allot_with_fuel(&self, state: &TripState, overhead: f64, cycle_overhead: f64) -> f64 {
        let driving = self.allot(state, overhead, cycle_overhead);
        let stops = fuel_crossings(
            state.miles,
            state.miles + driving * state.mph,
            self.rules.fuel_stop_miles,
        );
        if stops == 0 {
            return driving;
        }
        let fueling = stops as f64 * self.rules.fueling_hours;
        self.allot(state, overhead + fueling, cycle_overhead + fueling)
    }

    fn allot(&self, state: &TripState, overhead: f64, cycle_overhead: f64) -> f64 {
        self.rules
            .daily_driving_limit
            .min(self.rules.daily_on_duty_limit - overhead)
            .min(state.driving_left)
            .min(state.cycle_left - cycle_overhead)
            .max(0.0)
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Number of fuel-interval multiples passed going from `before` to `after`
/// miles.
fn fuel_crossings(before: f64, after: f64, interval: f64) -> u32 {
    let passed = |miles: f64| ((miles + MILEAGE_EPSILON) / interval).floor();
    (passed(after) - passed(before)).max(0.0) as u32
}

/// Append an event at the clock's current instant and advance the clock.
/// Non-positive durations are skipped.
fn record<O: SimObserver>(
    day:      &mut DayLog,
    state:    &mut TripState,
    observer: &mut O,
    index:    usize,
    kind:     DutyStatus,
    hours:    f64,
    remark:   Remark,
) {
    if hours <= 0.0 {
        return;
    }
    let event = DutyEvent::new(kind, state.clock.now, hours);
    state.clock.advance_hours(hours);
    observer.on_event(index, &event, remark);
    day.push(event);
}
