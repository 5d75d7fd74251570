//! Platform-free interaction logic for the folio page.
//!
//! Nothing here touches the DOM. The web frontend feeds platform events into
//! these state machines and publishes what they return.

pub mod calibration;
pub mod capability;
pub mod card;
pub mod config;
pub mod constants;
pub mod drag;
pub mod error;
pub mod math;
pub mod orientation;
pub mod proximity;
pub mod scroll;
pub mod tilt;

pub use calibration::*;
pub use capability::*;
pub use card::*;
pub use config::*;
pub use drag::*;
pub use error::ConfigError;
pub use math::{clamp, finite_or, lerp};
pub use orientation::*;
pub use proximity::*;
pub use scroll::*;
pub use tilt::*;
