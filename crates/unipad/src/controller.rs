use unipad_platform::{BatteryReport, BatteryStatus};

use crate::error::Result;
use crate::events::EventReceiver;
use crate::types::{Button, ControllerState, ControllerType, Motor, StickAxis};

/// Query surface shared by every controller adapter.
///
/// Adapters never fail a query because nothing is attached: buttons read
/// `false`, sticks read [`AXIS_CENTER`](crate::AXIS_CENTER), intensities
/// read [`INTENSITY_OFF`](crate::INTENSITY_OFF) and identifiers read 0.
pub trait GamingController: Send + Sync {
    fn kind(&self) -> ControllerType;

    fn is_connected(&self) -> bool;

    /// Picks up a device that was attached before the adapter existed.
    /// Attach notifications are not replayed, so call this after construction.
    fn refresh(&self);

    fn is_pressed(&self, button: Button) -> bool;

    /// Stick position in `[0, 100]` with 50 at rest.
    fn stick(&self, axis: StickAxis) -> f64;

    /// Intensity in `[0, 100]`.
    fn intensity(&self, motor: Motor) -> f64;

    fn set_intensity(&self, motor: Motor, value: f64);

    fn vendor(&self) -> u16;

    fn product(&self) -> u16;

    /// Battery report of the device. An empty report when nothing is
    /// attached; an error when the device fails to report.
    fn battery(&self) -> Result<BatteryReport>;

    /// Buttons and sticks computed from one snapshot.
    fn state(&self) -> ControllerState;

    fn subscribe(&self) -> EventReceiver;

    /// Battery status that never fails: a failing report yields the default.
    fn status(&self) -> BatteryStatus {
        match self.battery() {
            Ok(report) => report.status,
            Err(e) => {
                log::warn!("battery status unavailable: {e}");
                BatteryStatus::default()
            }
        }
    }

    fn button_back_pressed(&self) -> bool {
        self.is_pressed(Button::Back)
    }

    fn button_start_pressed(&self) -> bool {
        self.is_pressed(Button::Start)
    }

    fn button_a_pressed(&self) -> bool {
        self.is_pressed(Button::A)
    }

    fn button_b_pressed(&self) -> bool {
        self.is_pressed(Button::B)
    }

    fn button_x_pressed(&self) -> bool {
        self.is_pressed(Button::X)
    }

    fn button_y_pressed(&self) -> bool {
        self.is_pressed(Button::Y)
    }

    fn button_shoulder_left_pressed(&self) -> bool {
        self.is_pressed(Button::LeftShoulder)
    }

    fn button_shoulder_right_pressed(&self) -> bool {
        self.is_pressed(Button::RightShoulder)
    }

    fn button_up_pressed(&self) -> bool {
        self.is_pressed(Button::DPadUp)
    }

    fn button_down_pressed(&self) -> bool {
        self.is_pressed(Button::DPadDown)
    }

    fn button_left_pressed(&self) -> bool {
        self.is_pressed(Button::DPadLeft)
    }

    fn button_right_pressed(&self) -> bool {
        self.is_pressed(Button::DPadRight)
    }

    fn thumbpad_left_pressed(&self) -> bool {
        self.is_pressed(Button::LeftThumbstick)
    }

    fn thumbpad_right_pressed(&self) -> bool {
        self.is_pressed(Button::RightThumbstick)
    }

    fn trigger_left_pressed(&self) -> bool {
        self.is_pressed(Button::LeftTrigger)
    }

    fn trigger_right_pressed(&self) -> bool {
        self.is_pressed(Button::RightTrigger)
    }

    fn thumb_left_x(&self) -> f64 {
        self.stick(StickAxis::LeftX)
    }

    fn thumb_left_y(&self) -> f64 {
        self.stick(StickAxis::LeftY)
    }

    fn thumb_right_x(&self) -> f64 {
        self.stick(StickAxis::RightX)
    }

    fn thumb_right_y(&self) -> f64 {
        self.stick(StickAxis::RightY)
    }

    fn left_stick_x_position(&self) -> f64 {
        self.thumb_left_x()
    }

    fn left_stick_y_position(&self) -> f64 {
        self.thumb_left_y()
    }

    fn right_stick_x_position(&self) -> f64 {
        self.thumb_right_x()
    }

    fn right_stick_y_position(&self) -> f64 {
        self.thumb_right_y()
    }

    fn left_vibration(&self) -> f64 {
        self.intensity(Motor::LeftMotor)
    }

    fn set_left_vibration(&self, value: f64) {
        self.set_intensity(Motor::LeftMotor, value);
    }

    fn right_vibration(&self) -> f64 {
        self.intensity(Motor::RightMotor)
    }

    fn set_right_vibration(&self, value: f64) {
        self.set_intensity(Motor::RightMotor, value);
    }

    fn left_trigger(&self) -> f64 {
        self.intensity(Motor::LeftTrigger)
    }

    fn set_left_trigger(&self, value: f64) {
        self.set_intensity(Motor::LeftTrigger, value);
    }

    fn right_trigger(&self) -> f64 {
        self.intensity(Motor::RightTrigger)
    }

    fn set_right_trigger(&self, value: f64) {
        self.set_intensity(Motor::RightTrigger, value);
    }
}
