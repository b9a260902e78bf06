//! Boundary between unipad adapters and the operating system's input stack.
//!
//! A [`Platform`] lists the controllers that are currently attached, delivers
//! attach/detach notifications to registered listeners and hands out device
//! objects that produce fresh input snapshots on every read.
mod device;
mod error;
mod types;
mod virtual_platform;

#[cfg(feature = "sdl2-backend")]
mod sdl;

pub use crate::device::{DeviceEvent, GamepadDevice, Listener, Listeners, Platform, RawDevice};
pub use crate::error::{Error, Result};
pub use crate::types::{
    BatteryReport, BatteryStatus, DeviceId, DeviceInfo, GamepadButton, GamepadReading,
    RawReading, SwitchPosition, Vibration, RAW_SLOTS,
};
pub use crate::virtual_platform::{VirtualGamepad, VirtualPlatform, VirtualRawDevice};

#[cfg(feature = "sdl2-backend")]
pub use crate::sdl::SdlPlatform;
