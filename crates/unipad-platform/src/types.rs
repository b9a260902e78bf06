use unipad_bit_derive::Bit;
use unipad_bit_mask::Bitmask;

/// Unique identifier of an attached device within one platform.
pub type DeviceId = u32;

/// Number of slots in every array of a [`RawReading`].
pub const RAW_SLOTS: usize = 20;

/// Device meta information that remains stable while it is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    pub id: DeviceId,
    pub name: String,
    pub vendor_id: u16,
    pub product_id: u16,
}

/// Position of a hat switch on a raw controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SwitchPosition {
    #[default]
    Center,
    Up,
    UpRight,
    Right,
    DownRight,
    Down,
    DownLeft,
    Left,
    UpLeft,
}

/// Index-addressed input snapshot of a raw controller.
///
/// Axes are in `[0.0, 1.0]`; for vertical axes `0.0` is the top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawReading {
    /// Microseconds since the platform started.
    pub timestamp: u64,
    pub buttons: [bool; RAW_SLOTS],
    pub switches: [SwitchPosition; RAW_SLOTS],
    pub axes: [f64; RAW_SLOTS],
}

impl Default for RawReading {
    fn default() -> Self {
        Self {
            timestamp: 0,
            buttons: [false; RAW_SLOTS],
            switches: [SwitchPosition::Center; RAW_SLOTS],
            axes: [0.0; RAW_SLOTS],
        }
    }
}

impl RawReading {
    /// A reading with every axis resting at its midpoint.
    pub fn centered() -> Self {
        Self {
            axes: [0.5; RAW_SLOTS],
            ..Self::default()
        }
    }

    pub fn with_button(mut self, index: usize, pressed: bool) -> Self {
        if let Some(slot) = self.buttons.get_mut(index) {
            *slot = pressed;
        }
        self
    }

    pub fn with_switch(mut self, index: usize, position: SwitchPosition) -> Self {
        if let Some(slot) = self.switches.get_mut(index) {
            *slot = position;
        }
        self
    }

    pub fn with_axis(mut self, index: usize, value: f64) -> Self {
        if let Some(slot) = self.axes.get_mut(index) {
            *slot = value;
        }
        self
    }
}

/// Button flags of a natively modeled gamepad.
///
/// Bit positions follow the platform's `GamepadButtons` layout.
#[derive(Bit, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamepadButton {
    Menu,
    View,
    A,
    B,
    X,
    Y,
    DPadUp,
    DPadDown,
    DPadLeft,
    DPadRight,
    LeftShoulder,
    RightShoulder,
    LeftThumbstick,
    RightThumbstick,
    Paddle1,
    Paddle2,
    Paddle3,
    Paddle4,
}

/// Structured input snapshot of a natively modeled gamepad.
///
/// Thumbsticks are in `[-1.0, 1.0]` with up and right positive, triggers
/// are in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GamepadReading {
    /// Microseconds since the platform started.
    pub timestamp: u64,
    pub buttons: Bitmask<GamepadButton>,
    pub left_trigger: f64,
    pub right_trigger: f64,
    pub left_thumbstick_x: f64,
    pub left_thumbstick_y: f64,
    pub right_thumbstick_x: f64,
    pub right_thumbstick_y: f64,
}

/// Motor and trigger-resistance levels applied to a gamepad as one unit.
///
/// Every field is in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vibration {
    pub left_motor: f64,
    pub right_motor: f64,
    pub left_trigger: f64,
    pub right_trigger: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BatteryStatus {
    #[default]
    NotPresent,
    Discharging,
    Idle,
    Charging,
}

/// Battery state of a controller. Capacities the device does not report
/// are `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatteryReport {
    pub status: BatteryStatus,
    pub charge_rate_mw: Option<i32>,
    pub design_capacity_mwh: Option<i32>,
    pub full_charge_capacity_mwh: Option<i32>,
    pub remaining_capacity_mwh: Option<i32>,
}

impl BatteryReport {
    /// Remaining charge as a fraction of the full capacity, if both are known.
    pub fn charge_fraction(&self) -> Option<f64> {
        let full = self.full_charge_capacity_mwh?;
        let remaining = self.remaining_capacity_mwh?;
        if full <= 0 {
            return None;
        }
        Some((f64::from(remaining) / f64::from(full)).clamp(0.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use unipad_bit_mask::Bitable;

    use super::*;

    #[test]
    fn gamepad_button_bits_match_platform_layout() {
        assert_eq!(GamepadButton::Menu.bit(), 0x1);
        assert_eq!(GamepadButton::View.bit(), 0x2);
        assert_eq!(GamepadButton::A.bit(), 0x4);
        assert_eq!(GamepadButton::DPadUp.bit(), 0x40);
        assert_eq!(GamepadButton::LeftShoulder.bit(), 0x400);
        assert_eq!(GamepadButton::RightThumbstick.bit(), 0x2000);
        assert_eq!(GamepadButton::Paddle4.bit(), 0x20000);
    }

    #[test]
    fn raw_reading_builders_ignore_out_of_range_slots() {
        let reading = RawReading::default()
            .with_button(3, true)
            .with_button(RAW_SLOTS, true)
            .with_axis(5, 0.25)
            .with_switch(0, SwitchPosition::Left);
        assert!(reading.buttons[3]);
        assert_eq!(reading.buttons.iter().filter(|b| **b).count(), 1);
        assert_eq!(reading.axes[5], 0.25);
        assert_eq!(reading.switches[0], SwitchPosition::Left);
    }

    #[test]
    fn centered_reading_rests_axes_at_midpoint() {
        let reading = RawReading::centered();
        assert!(reading.axes.iter().all(|a| *a == 0.5));
        assert!(!reading.buttons.iter().any(|b| *b));
    }

    #[test]
    fn charge_fraction_needs_both_capacities() {
        let mut report = BatteryReport {
            full_charge_capacity_mwh: Some(2000),
            remaining_capacity_mwh: Some(500),
            ..BatteryReport::default()
        };
        assert_eq!(report.charge_fraction(), Some(0.25));
        report.full_charge_capacity_mwh = None;
        assert_eq!(report.charge_fraction(), None);
        assert_eq!(BatteryReport::default().status, BatteryStatus::NotPresent);
    }
}
