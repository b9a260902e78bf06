//! Pure functions turning platform snapshots into adapter values.
//!
//! Each function receives one immutable reading, so a batch of queries
//! computed from the same reading always sees consistent hardware state.
use unipad_platform::{GamepadButton, GamepadReading, RawReading, SwitchPosition};

use crate::types::{Button, StickAxis};

/// Slot of the d-pad hat switch on raw controllers.
const DPAD_SWITCH: usize = 0;

/// Button array slot of a raw controller button. D-pad directions live on
/// the hat switch and have no slot.
pub const fn raw_button_slot(button: Button) -> Option<usize> {
    let slot = match button {
        Button::X => 0,
        Button::A => 1,
        Button::B => 2,
        Button::Y => 3,
        Button::LeftShoulder => 4,
        Button::RightShoulder => 5,
        Button::LeftTrigger => 6,
        Button::RightTrigger => 7,
        Button::Back => 8,
        Button::Start => 9,
        Button::LeftThumbstick => 10,
        Button::RightThumbstick => 11,
        Button::DPadUp | Button::DPadDown | Button::DPadLeft | Button::DPadRight => {
            return None
        }
    };
    Some(slot)
}

pub fn raw_pressed(reading: &RawReading, button: Button) -> bool {
    let switch = reading.switches[DPAD_SWITCH];
    match button {
        Button::DPadUp => switch == SwitchPosition::Up,
        Button::DPadDown => switch == SwitchPosition::Down,
        Button::DPadLeft => switch == SwitchPosition::Left,
        Button::DPadRight => switch == SwitchPosition::Right,
        _ => raw_button_slot(button).is_some_and(|slot| reading.buttons[slot]),
    }
}

/// Raw axes are `[0, 1]` with the top at 0, so vertical axes are flipped.
/// The right stick's vertical axis sits in slot 5.
pub fn raw_stick(reading: &RawReading, axis: StickAxis) -> f64 {
    let axes = &reading.axes;
    match axis {
        StickAxis::LeftX => 100.0 * axes[0],
        StickAxis::LeftY => 100.0 * (1.0 - axes[1]),
        StickAxis::RightX => 100.0 * axes[2],
        StickAxis::RightY => 100.0 * (1.0 - axes[5]),
    }
}

pub const fn native_button(button: Button) -> Option<GamepadButton> {
    let flag = match button {
        Button::Back => GamepadButton::View,
        Button::Start => GamepadButton::Menu,
        Button::A => GamepadButton::A,
        Button::B => GamepadButton::B,
        Button::X => GamepadButton::X,
        Button::Y => GamepadButton::Y,
        Button::LeftShoulder => GamepadButton::LeftShoulder,
        Button::RightShoulder => GamepadButton::RightShoulder,
        Button::LeftThumbstick => GamepadButton::LeftThumbstick,
        Button::RightThumbstick => GamepadButton::RightThumbstick,
        Button::DPadUp => GamepadButton::DPadUp,
        Button::DPadDown => GamepadButton::DPadDown,
        Button::DPadLeft => GamepadButton::DPadLeft,
        Button::DPadRight => GamepadButton::DPadRight,
        Button::LeftTrigger | Button::RightTrigger => return None,
    };
    Some(flag)
}

/// A named button counts as pressed when the bitmask equals its flag, so
/// chords report no individual button.
pub fn native_pressed(reading: &GamepadReading, button: Button) -> bool {
    match button {
        Button::LeftTrigger => reading.left_trigger > 0.0,
        Button::RightTrigger => reading.right_trigger > 0.0,
        _ => native_button(button).is_some_and(|flag| reading.buttons.is_only(flag)),
    }
}

/// Maps a native `[-1, 1]` thumbstick value to `[0, 100]`.
///
/// Evaluated step by step in this exact order; results at the boundaries
/// depend on it.
pub fn native_axis(raw: f64) -> f64 {
    let mut reading = raw;
    reading += 1.0;
    reading *= 100.0;
    reading /= 200.0;
    reading *= 100.0;
    reading
}

pub fn native_stick(reading: &GamepadReading, axis: StickAxis) -> f64 {
    let raw = match axis {
        StickAxis::LeftX => reading.left_thumbstick_x,
        StickAxis::LeftY => reading.left_thumbstick_y,
        StickAxis::RightX => reading.right_thumbstick_x,
        StickAxis::RightY => reading.right_thumbstick_y,
    };
    native_axis(raw)
}

#[cfg(test)]
mod tests {
    use unipad_bit_mask::{Bitable, Bitmask};

    use super::*;

    fn raw_axes(values: &[(usize, f64)]) -> RawReading {
        values
            .iter()
            .fold(RawReading::centered(), |r, (i, v)| r.with_axis(*i, *v))
    }

    #[test]
    fn raw_buttons_use_fixed_slots() {
        let expected = [
            (Button::X, 0),
            (Button::A, 1),
            (Button::B, 2),
            (Button::Y, 3),
            (Button::LeftShoulder, 4),
            (Button::RightShoulder, 5),
            (Button::LeftTrigger, 6),
            (Button::RightTrigger, 7),
            (Button::Back, 8),
            (Button::Start, 9),
            (Button::LeftThumbstick, 10),
            (Button::RightThumbstick, 11),
        ];
        for (button, slot) in expected {
            let reading = RawReading::default().with_button(slot, true);
            assert!(raw_pressed(&reading, button), "{button:?} at slot {slot}");
            let others = Button::ALL.iter().filter(|b| **b != button);
            for other in others {
                assert!(!raw_pressed(&reading, *other), "{other:?} with slot {slot}");
            }
        }
    }

    #[test]
    fn raw_dpad_reads_first_switch() {
        let cases = [
            (SwitchPosition::Up, Button::DPadUp),
            (SwitchPosition::Down, Button::DPadDown),
            (SwitchPosition::Left, Button::DPadLeft),
            (SwitchPosition::Right, Button::DPadRight),
        ];
        for (position, button) in cases {
            let reading = RawReading::default().with_switch(0, position);
            assert!(raw_pressed(&reading, button));
        }

        let diagonal = RawReading::default().with_switch(0, SwitchPosition::UpLeft);
        assert!(!raw_pressed(&diagonal, Button::DPadUp));
        assert!(!raw_pressed(&diagonal, Button::DPadLeft));

        let second = RawReading::default().with_switch(1, SwitchPosition::Up);
        assert!(!raw_pressed(&second, Button::DPadUp));
    }

    #[test]
    fn raw_stick_boundaries() {
        assert_eq!(raw_stick(&raw_axes(&[(0, 0.0)]), StickAxis::LeftX), 0.0);
        assert_eq!(raw_stick(&raw_axes(&[(0, 1.0)]), StickAxis::LeftX), 100.0);
        assert_eq!(raw_stick(&raw_axes(&[(1, 0.0)]), StickAxis::LeftY), 100.0);
        assert_eq!(raw_stick(&raw_axes(&[(1, 1.0)]), StickAxis::LeftY), 0.0);
        assert_eq!(raw_stick(&raw_axes(&[(2, 1.0)]), StickAxis::RightX), 100.0);
        assert_eq!(raw_stick(&RawReading::centered(), StickAxis::RightX), 50.0);
    }

    #[test]
    fn raw_right_vertical_uses_slot_five() {
        let reading = raw_axes(&[(3, 0.0), (5, 1.0)]);
        assert_eq!(raw_stick(&reading, StickAxis::RightY), 0.0);
        let reading = raw_axes(&[(3, 1.0), (5, 0.0)]);
        assert_eq!(raw_stick(&reading, StickAxis::RightY), 100.0);
    }

    #[test]
    fn native_axis_boundaries() {
        assert_eq!(native_axis(-1.0), 0.0);
        assert_eq!(native_axis(0.0), 50.0);
        assert_eq!(native_axis(1.0), 100.0);
        assert_eq!(native_axis(0.5), 75.0);
    }

    #[test]
    fn native_stick_picks_matching_field() {
        let reading = GamepadReading {
            left_thumbstick_x: -1.0,
            left_thumbstick_y: 1.0,
            right_thumbstick_x: 0.5,
            right_thumbstick_y: -0.5,
            ..GamepadReading::default()
        };
        assert_eq!(native_stick(&reading, StickAxis::LeftX), 0.0);
        assert_eq!(native_stick(&reading, StickAxis::LeftY), 100.0);
        assert_eq!(native_stick(&reading, StickAxis::RightX), 75.0);
        assert_eq!(native_stick(&reading, StickAxis::RightY), 25.0);
    }

    #[test]
    fn native_buttons_compare_whole_mask() {
        let single = GamepadReading {
            buttons: Bitmask::new(&[GamepadButton::View]),
            ..GamepadReading::default()
        };
        assert!(native_pressed(&single, Button::Back));
        assert!(!native_pressed(&single, Button::Start));

        let chord = GamepadReading {
            buttons: Bitmask::new(&[GamepadButton::A, GamepadButton::B]),
            ..GamepadReading::default()
        };
        assert!(!native_pressed(&chord, Button::A));
        assert!(!native_pressed(&chord, Button::B));
    }

    #[test]
    fn native_triggers_press_on_any_pull() {
        let reading = GamepadReading {
            left_trigger: 0.01,
            ..GamepadReading::default()
        };
        assert!(native_pressed(&reading, Button::LeftTrigger));
        assert!(!native_pressed(&reading, Button::RightTrigger));
    }

    #[test]
    fn every_button_has_a_native_source() {
        for button in Button::ALL {
            let has_flag = native_button(*button).is_some();
            let is_trigger = matches!(button, Button::LeftTrigger | Button::RightTrigger);
            assert!(has_flag != is_trigger, "{button:?}");
        }
    }
}
