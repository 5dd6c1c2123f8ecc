//! `hos-sim` — hours-of-service simulator and trip orchestrator.
//!
//! # Day loop
//!
//! ```text
//! while driving remains:
//!   ① Boundary  — day 0 keeps the start instant; later days start at 00:00
//!   ② Rest      — days ≥ 1 open with 10 h (sleeper berth on odd days,
//!                 off duty on even days)
//!   ③ Allot     — driving = min(daily limit, window − fixed overhead,
//!                 driving left, cycle left − overhead)
//!   ④ Duty      — pickup (day 0), driving, fueling per 1 000 mi crossed,
//!                 remaining window as on-duty, dropoff
//!   ⑤ Idle      — off duty until midnight when that is under a rest period
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                  |
//! |------------|---------------------------------------------------------|
//! | `parallel` | Resolves the three trip locations on Rayon's pool.      |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use hos_route::{Gazetteer, StraightLineRouter};
//! use hos_sim::{TripPlanner, TripRequest};
//!
//! let planner = TripPlanner::builder(gazetteer, StraightLineRouter::default()).build()?;
//! let result = planner.plan(&request, start)?;
//! println!("{}", serde_json::to_string_pretty(&result)?);
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod planner;
pub mod result;
pub mod simulator;


pub use builder::PlannerBuilder;
pub use error::{PlanError, PlanResult, SimError, SimResult};
pub use observer::{LogObserver, NoopObserver, SimObserver};
pub use planner::{LocationRole, TripPlanner, TripRequest};
pub use result::SimulationResult;
pub use simulator::{Simulator, simulate};
