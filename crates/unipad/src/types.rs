use std::fmt;
use std::str::FromStr;

use unipad_bit_derive::Bit;
use unipad_bit_mask::Bitmask;

/// Stick value reported while no device is attached.
pub const AXIS_CENTER: f64 = 50.0;

/// Intensity value reported while no device is attached.
pub const INTENSITY_OFF: f64 = 0.0;

/// Kind of controller an adapter drives. Constant for an adapter's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ControllerType {
    Xbox,
    Playstation,
    Generic,
    /// Keyboard and mouse.
    Kbm,
    /// Pick whatever is attached.
    #[default]
    Auto,
}

impl ControllerType {
    pub const fn as_str(self) -> &'static str {
        match self {
            ControllerType::Xbox => "xbox",
            ControllerType::Playstation => "playstation",
            ControllerType::Generic => "generic",
            ControllerType::Kbm => "kbm",
            ControllerType::Auto => "auto",
        }
    }
}

impl fmt::Display for ControllerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ControllerType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "xbox" => Ok(ControllerType::Xbox),
            "playstation" | "ps" => Ok(ControllerType::Playstation),
            "generic" => Ok(ControllerType::Generic),
            "kbm" => Ok(ControllerType::Kbm),
            "auto" => Ok(ControllerType::Auto),
            other => Err(format!("unknown controller type: {other}")),
        }
    }
}

/// Logical controller buttons. Triggers count as pressed on any pull.
#[derive(Bit, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Back,
    Start,
    A,
    B,
    X,
    Y,
    LeftShoulder,
    RightShoulder,
    LeftTrigger,
    RightTrigger,
    LeftThumbstick,
    RightThumbstick,
    DPadUp,
    DPadDown,
    DPadLeft,
    DPadRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StickAxis {
    LeftX,
    LeftY,
    RightX,
    RightY,
}

impl StickAxis {
    pub const ALL: [StickAxis; 4] = [
        StickAxis::LeftX,
        StickAxis::LeftY,
        StickAxis::RightX,
        StickAxis::RightY,
    ];
}

/// Vibration motors and trigger-resistance actuators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Motor {
    LeftMotor,
    RightMotor,
    LeftTrigger,
    RightTrigger,
}

impl Motor {
    pub const ALL: [Motor; 4] = [
        Motor::LeftMotor,
        Motor::RightMotor,
        Motor::LeftTrigger,
        Motor::RightTrigger,
    ];
}

/// Everything an adapter reports, computed from a single snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerState {
    pub connected: bool,
    pub buttons: Bitmask<Button>,
    pub left_x: f64,
    pub left_y: f64,
    pub right_x: f64,
    pub right_y: f64,
}

impl ControllerState {
    /// The neutral state reported while no device is attached.
    pub const fn disconnected() -> Self {
        Self {
            connected: false,
            buttons: Bitmask::empty(),
            left_x: AXIS_CENTER,
            left_y: AXIS_CENTER,
            right_x: AXIS_CENTER,
            right_y: AXIS_CENTER,
        }
    }

    pub fn is_pressed(&self, button: Button) -> bool {
        self.buttons.contains(button)
    }

    pub fn stick(&self, axis: StickAxis) -> f64 {
        match axis {
            StickAxis::LeftX => self.left_x,
            StickAxis::LeftY => self.left_y,
            StickAxis::RightX => self.right_x,
            StickAxis::RightY => self.right_y,
        }
    }
}

impl Default for ControllerState {
    fn default() -> Self {
        Self::disconnected()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn controller_type_round_trips_through_strings() {
        for kind in [
            ControllerType::Xbox,
            ControllerType::Playstation,
            ControllerType::Generic,
            ControllerType::Kbm,
            ControllerType::Auto,
        ] {
            assert_eq!(kind.to_string().parse::<ControllerType>(), Ok(kind));
        }
        assert_eq!("PS".parse::<ControllerType>(), Ok(ControllerType::Playstation));
        assert!("wheel".parse::<ControllerType>().is_err());
    }

    #[test]
    fn disconnected_state_is_neutral() {
        let state = ControllerState::default();
        assert!(!state.connected);
        assert!(state.buttons.is_empty());
        for axis in StickAxis::ALL {
            assert_eq!(state.stick(axis), AXIS_CENTER);
        }
    }
}
