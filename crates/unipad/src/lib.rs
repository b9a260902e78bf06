//! One interface for Xbox, PlayStation and generic HID controllers.
//!
//! Every adapter implements [`GamingController`] on top of a
//! [`Platform`](unipad_platform::Platform). Adapters keep no input state of
//! their own: each query takes a fresh snapshot from the attached device and
//! rescales it. With no device attached every query returns a neutral value
//! (`false`, [`AXIS_CENTER`], [`INTENSITY_OFF`]) instead of failing.
mod connection;
mod controller;
mod error;
mod events;
mod factory;
pub mod map;
mod raw;
mod types;
mod vendor;
mod xbox;

pub use crate::controller::GamingController;
pub use crate::error::{Error, Result};
pub use crate::events::{ControllerEvent, EventReceiver};
pub use crate::factory::{connect, detect};
pub use crate::raw::RawController;
pub use crate::types::{
    Button, ControllerState, ControllerType, Motor, StickAxis, AXIS_CENTER, INTENSITY_OFF,
};
pub use crate::vendor::{type_string, VendorId};
pub use crate::xbox::XboxController;

pub use unipad_platform::{BatteryReport, BatteryStatus, DeviceId, DeviceInfo};
