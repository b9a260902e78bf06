use std::sync::Arc;

use unipad_bit_mask::{Bitable, Bitmask};
use unipad_platform::{BatteryReport, Platform, RawDevice};

use crate::connection::Connection;
use crate::controller::GamingController;
use crate::error::Result;
use crate::events::EventReceiver;
use crate::map;
use crate::types::{
    Button, ControllerState, ControllerType, Motor, StickAxis, AXIS_CENTER, INTENSITY_OFF,
};

/// Adapter over the platform's raw controller API.
///
/// Drives generic HID controllers and PlayStation controllers alike; the
/// two differ only in the reported [`ControllerType`]. Vibration and
/// trigger resistance are not available through this API: intensities
/// always read 0 and writes are ignored.
pub struct RawController {
    kind: ControllerType,
    platform: Arc<dyn Platform>,
    connection: Arc<Connection<dyn RawDevice>>,
}

impl RawController {
    pub fn generic(platform: Arc<dyn Platform>) -> Self {
        Self::new(ControllerType::Generic, platform)
    }

    pub fn playstation(platform: Arc<dyn Platform>) -> Self {
        Self::new(ControllerType::Playstation, platform)
    }

    fn new(kind: ControllerType, platform: Arc<dyn Platform>) -> Self {
        let connection = Connection::new();
        platform.on_raw_controller(connection.listener());
        Self {
            kind,
            platform,
            connection,
        }
    }

    /// The attached device, for queries this adapter does not cover.
    pub fn device(&self) -> Option<Arc<dyn RawDevice>> {
        self.connection.current()
    }
}

impl GamingController for RawController {
    fn kind(&self) -> ControllerType {
        self.kind
    }

    fn is_connected(&self) -> bool {
        self.connection.is_connected()
    }

    fn refresh(&self) {
        if let Some(device) = self.platform.raw_controllers().into_iter().next() {
            self.connection.connect(device);
        }
    }

    fn is_pressed(&self, button: Button) -> bool {
        self.connection
            .current()
            .is_some_and(|device| map::raw_pressed(&device.read(), button))
    }

    fn stick(&self, axis: StickAxis) -> f64 {
        self.connection
            .current()
            .map(|device| map::raw_stick(&device.read(), axis))
            .unwrap_or(AXIS_CENTER)
    }

    fn intensity(&self, _motor: Motor) -> f64 {
        INTENSITY_OFF
    }

    fn set_intensity(&self, _motor: Motor, _value: f64) {}

    fn vendor(&self) -> u16 {
        self.connection
            .current()
            .map(|device| device.vendor_id())
            .unwrap_or(0)
    }

    fn product(&self) -> u16 {
        self.connection
            .current()
            .map(|device| device.product_id())
            .unwrap_or(0)
    }

    fn battery(&self) -> Result<BatteryReport> {
        match self.connection.current() {
            Some(device) => Ok(device.try_battery_report()?),
            None => Ok(BatteryReport::default()),
        }
    }

    fn state(&self) -> ControllerState {
        let Some(device) = self.connection.current() else {
            return ControllerState::disconnected();
        };
        let reading = device.read();
        let buttons: Bitmask<Button> = Button::ALL
            .iter()
            .copied()
            .filter(|button| map::raw_pressed(&reading, *button))
            .collect();
        ControllerState {
            connected: true,
            buttons,
            left_x: map::raw_stick(&reading, StickAxis::LeftX),
            left_y: map::raw_stick(&reading, StickAxis::LeftY),
            right_x: map::raw_stick(&reading, StickAxis::RightX),
            right_y: map::raw_stick(&reading, StickAxis::RightY),
        }
    }

    fn subscribe(&self) -> EventReceiver {
        self.connection.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use unipad_platform::{RawReading, SwitchPosition, VirtualPlatform};

    use super::*;

    fn setup() -> (Arc<VirtualPlatform>, RawController) {
        let platform = Arc::new(VirtualPlatform::new());
        let controller = RawController::generic(platform.clone());
        (platform, controller)
    }

    #[test]
    fn kind_depends_on_constructor() {
        let platform: Arc<dyn Platform> = Arc::new(VirtualPlatform::new());
        assert_eq!(RawController::generic(platform.clone()).kind(), ControllerType::Generic);
        assert_eq!(RawController::playstation(platform).kind(), ControllerType::Playstation);
    }

    #[test]
    fn intensities_are_fixed_at_zero() {
        let (platform, controller) = setup();
        platform.attach_raw("hid", 0x054C, 0x09CC);
        assert!(controller.is_connected());
        for motor in Motor::ALL {
            controller.set_intensity(motor, 80.0);
            assert_eq!(controller.intensity(motor), 0.0);
        }
    }

    #[test]
    fn state_comes_from_a_single_reading() {
        let (platform, controller) = setup();
        let device = platform.attach_raw("hid", 0x9999, 0x0001);
        device.set_reading(
            RawReading::centered()
                .with_button(1, true)
                .with_switch(0, SwitchPosition::Down)
                .with_axis(0, 1.0)
                .with_axis(5, 0.0),
        );

        let state = controller.state();
        assert!(state.connected);
        assert_eq!(
            state.buttons,
            Bitmask::new(&[Button::A, Button::DPadDown])
        );
        assert_eq!(state.left_x, 100.0);
        assert_eq!(state.left_y, 50.0);
        assert_eq!(state.right_y, 100.0);
    }

    #[test]
    fn identifiers_read_through_the_device() {
        let (platform, controller) = setup();
        assert_eq!(controller.vendor(), 0);
        platform.attach_raw("hid", 0x054C, 0x0CE6);
        assert_eq!(controller.vendor(), 0x054C);
        assert_eq!(controller.product(), 0x0CE6);
        assert!(controller.device().is_some());
    }
}
