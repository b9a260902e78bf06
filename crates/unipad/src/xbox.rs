use std::sync::Arc;

use unipad_bit_mask::{Bitable, Bitmask};
use unipad_platform::{BatteryReport, GamepadDevice, Platform, Vibration};

use crate::connection::Connection;
use crate::controller::GamingController;
use crate::error::Result;
use crate::events::EventReceiver;
use crate::map;
use crate::types::{
    Button, ControllerState, ControllerType, Motor, StickAxis, AXIS_CENTER, INTENSITY_OFF,
};

/// Adapter over the platform's native gamepad API.
pub struct XboxController {
    platform: Arc<dyn Platform>,
    connection: Arc<Connection<dyn GamepadDevice>>,
}

impl XboxController {
    pub fn new(platform: Arc<dyn Platform>) -> Self {
        let connection = Connection::new();
        platform.on_gamepad(connection.listener());
        Self {
            platform,
            connection,
        }
    }

    /// The attached gamepad, for queries this adapter does not cover.
    pub fn device(&self) -> Option<Arc<dyn GamepadDevice>> {
        self.connection.current()
    }

    fn identifiers(&self) -> (u16, u16) {
        self.connection
            .current()
            .and_then(|gamepad| gamepad.as_raw())
            .map(|raw| (raw.vendor_id(), raw.product_id()))
            .unwrap_or((0, 0))
    }
}

fn motor_level(vibration: &Vibration, motor: Motor) -> f64 {
    match motor {
        Motor::LeftMotor => vibration.left_motor,
        Motor::RightMotor => vibration.right_motor,
        Motor::LeftTrigger => vibration.left_trigger,
        Motor::RightTrigger => vibration.right_trigger,
    }
}

impl GamingController for XboxController {
    fn kind(&self) -> ControllerType {
        ControllerType::Xbox
    }

    fn is_connected(&self) -> bool {
        self.connection.is_connected()
    }

    fn refresh(&self) {
        if let Some(gamepad) = self.platform.gamepads().into_iter().next() {
            self.connection.connect(gamepad);
        }
    }

    fn is_pressed(&self, button: Button) -> bool {
        self.connection
            .current()
            .is_some_and(|gamepad| map::native_pressed(&gamepad.read(), button))
    }

    fn stick(&self, axis: StickAxis) -> f64 {
        self.connection
            .current()
            .map(|gamepad| map::native_stick(&gamepad.read(), axis))
            .unwrap_or(AXIS_CENTER)
    }

    fn intensity(&self, motor: Motor) -> f64 {
        self.connection
            .current()
            .map(|gamepad| motor_level(&gamepad.vibration(), motor) * 100.0)
            .unwrap_or(INTENSITY_OFF)
    }

    /// Applies one level and resets the other three to zero.
    fn set_intensity(&self, motor: Motor, value: f64) {
        let Some(gamepad) = self.connection.current() else {
            return;
        };
        let level = value / 100.0;
        let mut vibration = Vibration::default();
        match motor {
            Motor::LeftMotor => vibration.left_motor = level,
            Motor::RightMotor => vibration.right_motor = level,
            Motor::LeftTrigger => vibration.left_trigger = level,
            Motor::RightTrigger => vibration.right_trigger = level,
        }
        gamepad.set_vibration(vibration);
    }

    fn vendor(&self) -> u16 {
        self.identifiers().0
    }

    fn product(&self) -> u16 {
        self.identifiers().1
    }

    fn battery(&self) -> Result<BatteryReport> {
        match self.connection.current() {
            Some(gamepad) => Ok(gamepad.try_battery_report()?),
            None => Ok(BatteryReport::default()),
        }
    }

    fn state(&self) -> ControllerState {
        let Some(gamepad) = self.connection.current() else {
            return ControllerState::disconnected();
        };
        let reading = gamepad.read();
        let buttons: Bitmask<Button> = Button::ALL
            .iter()
            .copied()
            .filter(|button| map::native_pressed(&reading, *button))
            .collect();
        ControllerState {
            connected: true,
            buttons,
            left_x: map::native_stick(&reading, StickAxis::LeftX),
            left_y: map::native_stick(&reading, StickAxis::LeftY),
            right_x: map::native_stick(&reading, StickAxis::RightX),
            right_y: map::native_stick(&reading, StickAxis::RightY),
        }
    }

    fn subscribe(&self) -> EventReceiver {
        self.connection.subscribe()
    }
}
