use std::sync::Arc;

use unipad_platform::Platform;

use crate::controller::GamingController;
use crate::error::{Error, Result};
use crate::raw::RawController;
use crate::types::ControllerType;
use crate::vendor::VendorId;
use crate::xbox::XboxController;

/// Picks the controller type matching what is attached right now.
///
/// Native gamepads win over raw controllers. Otherwise the first listed raw
/// controller decides, since that is the device `refresh` attaches to.
pub fn detect(platform: &dyn Platform) -> Result<ControllerType> {
    if !platform.gamepads().is_empty() {
        return Ok(ControllerType::Xbox);
    }
    match platform.raw_controllers().first() {
        Some(device) if device.vendor_id() == VendorId::Playstation.id() => {
            Ok(ControllerType::Playstation)
        }
        Some(_) => Ok(ControllerType::Generic),
        None => Err(Error::NoController),
    }
}

/// Builds the adapter for `kind` and picks up an already attached device.
pub fn connect(kind: ControllerType, platform: Arc<dyn Platform>) -> Result<Box<dyn GamingController>> {
    let kind = match kind {
        ControllerType::Auto => detect(platform.as_ref())?,
        other => other,
    };
    let controller: Box<dyn GamingController> = match kind {
        ControllerType::Xbox => Box::new(XboxController::new(platform)),
        ControllerType::Playstation => Box::new(RawController::playstation(platform)),
        ControllerType::Generic => Box::new(RawController::generic(platform)),
        ControllerType::Kbm | ControllerType::Auto => return Err(Error::Unsupported(kind)),
    };
    controller.refresh();
    log::debug!("{kind} adapter ready, connected={}", controller.is_connected());
    Ok(controller)
}
