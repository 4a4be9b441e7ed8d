//! The Earth wheel spin
//!
//! - `deceleration`: linear slow-down of the main spin
//! - `resolver`: random destination with geocoding, timeout and fallback
//! - `settle`: facing distance and the optional second, slower rotation
//! - `win_effect`: the self-clearing win flag
//! - `controller`: ties the above together and guards against re-entry

pub mod controller;
pub mod deceleration;
pub mod resolver;
pub mod settle;
pub mod win_effect;

pub use controller::{SpinController, SpinOutcome};
pub use deceleration::DecelerationCurve;
pub use resolver::{Destination, DestinationResolver};
pub use settle::{SettlePlan, facing_distance, front_distance, settle_duration};
pub use win_effect::WinEffect;
