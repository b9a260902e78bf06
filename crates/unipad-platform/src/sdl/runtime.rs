use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use ahash::AHashMap;
use crossbeam_channel::Receiver;
use sdl2::controller::{Axis as SdlAxis, Button as SdlButton, GameController};
use sdl2::event::Event;
use sdl2::joystick::{HatState, Joystick, PowerLevel};
use sdl2::{GameControllerSubsystem, JoystickSubsystem};
use unipad_bit_mask::Bitmask;

use super::command::Command;
use super::{Inner, SdlGamepad, SdlRawDevice};
use crate::device::{DeviceEvent, GamepadDevice, RawDevice};
use crate::error::{Error, Result};
use crate::types::{
    BatteryReport, BatteryStatus, DeviceId, GamepadButton, GamepadReading, RawReading,
    SwitchPosition, Vibration, RAW_SLOTS,
};

/// Event pump wait between two snapshot publications.
const POLL_INTERVAL_MS: u32 = 10;
/// SDL clamps longer rumble requests to its own maximum.
const RUMBLE_DURATION_MS: u32 = u32::MAX;
/// SDL only reports coarse power levels; they are scaled against this.
const NOMINAL_CAPACITY: i32 = 100;

/// Devices owned by the runtime thread.
struct OpenDevice {
    joystick: Joystick,
    controller: Option<GameController>,
    raw: Arc<SdlRawDevice>,
    gamepad: Option<Arc<SdlGamepad>>,
}

/// Starts the SDL2-backed runtime thread that drives device discovery and snapshots.
pub(crate) fn start_runtime_thread(
    inner: Arc<Inner>,
    cmd_rx: Receiver<Command>,
    ready_tx: mpsc::Sender<Result<()>>,
) {
    thread::spawn(move || {
        // SDL must live entirely within this thread
        let sdl_ctx = match sdl2::init() {
            Ok(ctx) => ctx,
            Err(e) => {
                let _ = ready_tx.send(Err(Error::BackendInit(e)));
                return;
            }
        };
        let joysticks = match sdl_ctx.joystick() {
            Ok(j) => j,
            Err(e) => {
                let _ = ready_tx.send(Err(Error::BackendInit(e)));
                return;
            }
        };
        let controllers = match sdl_ctx.game_controller() {
            Ok(c) => c,
            Err(e) => {
                let _ = ready_tx.send(Err(Error::BackendInit(e)));
                return;
            }
        };
        let mut event_pump = match sdl_ctx.event_pump() {
            Ok(p) => p,
            Err(e) => {
                let _ = ready_tx.send(Err(Error::BackendInit(e)));
                return;
            }
        };

        let started = Instant::now();
        let mut devices: AHashMap<DeviceId, OpenDevice> = AHashMap::new();

        // Initial enumeration. SDL also queues added events for these
        // devices; the duplicates are skipped by instance id.
        if let Ok(count) = joysticks.num_joysticks() {
            for index in 0..count {
                open_device(&inner, &joysticks, &controllers, index, &started, &mut devices);
            }
        }

        let _ = ready_tx.send(Ok(()));

        loop {
            if let Some(event) = event_pump.wait_event_timeout(POLL_INTERVAL_MS) {
                handle_event(&inner, &joysticks, &controllers, event, &started, &mut devices);
                // Drain any additional queued events quickly
                for event in event_pump.poll_iter() {
                    handle_event(&inner, &joysticks, &controllers, event, &started, &mut devices);
                }
            }

            for device in devices.values() {
                publish(device, &started);
            }

            while let Ok(cmd) = cmd_rx.try_recv() {
                match cmd {
                    Command::Vibrate { id, vibration } => {
                        if let Some(device) = devices.get_mut(&id) {
                            apply_vibration(device, vibration);
                        }
                    }
                    Command::Shutdown => {
                        log::debug!("sdl runtime stopping");
                        return;
                    }
                }
            }
        }
    });
}

fn handle_event(
    inner: &Inner,
    joysticks: &JoystickSubsystem,
    controllers: &GameControllerSubsystem,
    event: Event,
    started: &Instant,
    devices: &mut AHashMap<DeviceId, OpenDevice>,
) {
    match event {
        Event::JoyDeviceAdded { which, .. } => {
            open_device(inner, joysticks, controllers, which, started, devices);
        }
        Event::JoyDeviceRemoved { which, .. } => {
            close_device(inner, which, devices);
        }
        _ => {}
    }
}

fn open_device(
    inner: &Inner,
    joysticks: &JoystickSubsystem,
    controllers: &GameControllerSubsystem,
    index: u32,
    started: &Instant,
    devices: &mut AHashMap<DeviceId, OpenDevice>,
) {
    let joystick = match joysticks.open(index) {
        Ok(joystick) => joystick,
        Err(e) => {
            log::warn!("failed to open joystick {index}: {e}");
            return;
        }
    };
    let id: DeviceId = joystick.instance_id();
    if devices.contains_key(&id) {
        return;
    }

    let controller = if controllers.is_game_controller(index) {
        controllers.open(index).ok()
    } else {
        None
    };

    let (guid_vendor, guid_product) = ids_from_guid(&joystick.guid().raw().data);
    let vendor_id = controller
        .as_ref()
        .and_then(GameController::vendor_id)
        .unwrap_or(guid_vendor);
    let product_id = controller
        .as_ref()
        .and_then(GameController::product_id)
        .unwrap_or(guid_product);

    let raw = Arc::new(SdlRawDevice::new(id, joystick.name(), vendor_id, product_id));
    let gamepad = controller
        .as_ref()
        .map(|_| Arc::new(SdlGamepad::new(Arc::clone(&raw), inner.cmd_tx.clone())));

    log::debug!(
        "joystick opened - {0} id={id} vid=0x{vendor_id:04x} pid=0x{product_id:04x} gamepad={1}",
        raw.name(),
        gamepad.is_some()
    );

    if let Ok(mut list) = inner.raw.write() {
        list.push(Arc::clone(&raw));
    }
    if let Some(gamepad) = &gamepad {
        if let Ok(mut list) = inner.gamepads.write() {
            list.push(Arc::clone(gamepad));
        }
    }

    let device = OpenDevice {
        joystick,
        controller,
        raw,
        gamepad,
    };
    publish(&device, started);

    let added: Arc<dyn RawDevice> = device.raw.clone();
    inner.raw_listeners.notify(&DeviceEvent::Added(added));
    if let Some(gamepad) = &device.gamepad {
        let added: Arc<dyn GamepadDevice> = gamepad.clone();
        inner.gamepad_listeners.notify(&DeviceEvent::Added(added));
    }

    devices.insert(id, device);
}

fn close_device(inner: &Inner, id: DeviceId, devices: &mut AHashMap<DeviceId, OpenDevice>) {
    let Some(device) = devices.remove(&id) else {
        return;
    };
    log::debug!("joystick closed - id={id}");

    if let Ok(mut list) = inner.gamepads.write() {
        list.retain(|g| g.id() != id);
    }
    if let Ok(mut list) = inner.raw.write() {
        list.retain(|r| r.id() != id);
    }

    if let Some(gamepad) = &device.gamepad {
        let removed: Arc<dyn GamepadDevice> = gamepad.clone();
        inner.gamepad_listeners.notify(&DeviceEvent::Removed(removed));
    }
    let removed: Arc<dyn RawDevice> = device.raw.clone();
    inner.raw_listeners.notify(&DeviceEvent::Removed(removed));
}

fn publish(device: &OpenDevice, started: &Instant) {
    let timestamp = started.elapsed().as_micros() as u64;
    let battery = device
        .joystick
        .power_level()
        .ok()
        .and_then(battery_from_power_level);
    device.raw.publish(raw_reading(&device.joystick, timestamp), battery);

    if let (Some(controller), Some(gamepad)) = (&device.controller, &device.gamepad) {
        gamepad.publish(gamepad_reading(controller, timestamp));
    }
}

fn apply_vibration(device: &mut OpenDevice, vibration: Vibration) {
    let Some(controller) = device.controller.as_mut() else {
        log::warn!("device {} has no rumble support", device.raw.id());
        return;
    };
    let low = motor_level(vibration.left_motor);
    let high = motor_level(vibration.right_motor);
    if let Err(e) = controller.set_rumble(low, high, RUMBLE_DURATION_MS) {
        log::warn!("failed to set rumble: {e}");
    }
    let left = motor_level(vibration.left_trigger);
    let right = motor_level(vibration.right_trigger);
    if let Err(e) = controller.set_rumble_triggers(left, right, RUMBLE_DURATION_MS) {
        log::debug!("failed to set trigger rumble: {e}");
    }
}

fn raw_reading(joystick: &Joystick, timestamp: u64) -> RawReading {
    let mut reading = RawReading::centered();
    reading.timestamp = timestamp;
    for i in 0..joystick.num_buttons().min(RAW_SLOTS as u32) {
        reading.buttons[i as usize] = joystick.button(i).unwrap_or(false);
    }
    for i in 0..joystick.num_hats().min(RAW_SLOTS as u32) {
        if let Ok(hat) = joystick.hat(i) {
            reading.switches[i as usize] = switch_position(hat);
        }
    }
    for i in 0..joystick.num_axes().min(RAW_SLOTS as u32) {
        if let Ok(value) = joystick.axis(i) {
            reading.axes[i as usize] = unit_axis(value);
        }
    }
    reading
}

fn gamepad_reading(controller: &GameController, timestamp: u64) -> GamepadReading {
    let mut buttons = Bitmask::empty();
    for (sdl, button) in BUTTON_MAP {
        buttons.set(*button, controller.button(*sdl));
    }
    GamepadReading {
        timestamp,
        buttons,
        left_trigger: trigger_axis(controller.axis(SdlAxis::TriggerLeft)),
        right_trigger: trigger_axis(controller.axis(SdlAxis::TriggerRight)),
        left_thumbstick_x: stick_axis(controller.axis(SdlAxis::LeftX)),
        // SDL reports down as positive
        left_thumbstick_y: -stick_axis(controller.axis(SdlAxis::LeftY)),
        right_thumbstick_x: stick_axis(controller.axis(SdlAxis::RightX)),
        right_thumbstick_y: -stick_axis(controller.axis(SdlAxis::RightY)),
    }
}

const BUTTON_MAP: &[(SdlButton, GamepadButton)] = &[
    (SdlButton::Start, GamepadButton::Menu),
    (SdlButton::Back, GamepadButton::View),
    (SdlButton::A, GamepadButton::A),
    (SdlButton::B, GamepadButton::B),
    (SdlButton::X, GamepadButton::X),
    (SdlButton::Y, GamepadButton::Y),
    (SdlButton::DPadUp, GamepadButton::DPadUp),
    (SdlButton::DPadDown, GamepadButton::DPadDown),
    (SdlButton::DPadLeft, GamepadButton::DPadLeft),
    (SdlButton::DPadRight, GamepadButton::DPadRight),
    (SdlButton::LeftShoulder, GamepadButton::LeftShoulder),
    (SdlButton::RightShoulder, GamepadButton::RightShoulder),
    (SdlButton::LeftStick, GamepadButton::LeftThumbstick),
    (SdlButton::RightStick, GamepadButton::RightThumbstick),
];

fn switch_position(hat: HatState) -> SwitchPosition {
    match hat {
        HatState::Centered => SwitchPosition::Center,
        HatState::Up => SwitchPosition::Up,
        HatState::RightUp => SwitchPosition::UpRight,
        HatState::Right => SwitchPosition::Right,
        HatState::RightDown => SwitchPosition::DownRight,
        HatState::Down => SwitchPosition::Down,
        HatState::LeftDown => SwitchPosition::DownLeft,
        HatState::Left => SwitchPosition::Left,
        HatState::LeftUp => SwitchPosition::UpLeft,
    }
}

fn battery_from_power_level(level: PowerLevel) -> Option<BatteryReport> {
    let (status, remaining) = match level {
        PowerLevel::Empty => (BatteryStatus::Discharging, Some(5)),
        PowerLevel::Low => (BatteryStatus::Discharging, Some(20)),
        PowerLevel::Medium => (BatteryStatus::Discharging, Some(70)),
        PowerLevel::Full => (BatteryStatus::Discharging, Some(100)),
        PowerLevel::Wired => (BatteryStatus::Charging, None),
        _ => return None,
    };
    Some(BatteryReport {
        status,
        full_charge_capacity_mwh: remaining.map(|_| NOMINAL_CAPACITY),
        remaining_capacity_mwh: remaining,
        ..BatteryReport::default()
    })
}

/// Maps a signed SDL axis to `[0.0, 1.0]`.
fn unit_axis(value: i16) -> f64 {
    (f64::from(value) + 32768.0) / 65535.0
}

/// Maps a signed SDL axis to `[-1.0, 1.0]`.
fn stick_axis(value: i16) -> f64 {
    (f64::from(value) / 32767.0).clamp(-1.0, 1.0)
}

fn trigger_axis(value: i16) -> f64 {
    f64::from(value.max(0)) / 32767.0
}

fn motor_level(level: f64) -> u16 {
    (level.clamp(0.0, 1.0) * 65535.0).round() as u16
}

/// Extracts USB vendor and product ids from an SDL joystick GUID. Returns
/// zeros when the GUID does not carry them.
fn ids_from_guid(data: &[u8; 16]) -> (u16, u16) {
    let carries_ids = data[6] == 0 && data[7] == 0 && data[10] == 0 && data[11] == 0;
    if !carries_ids {
        return (0, 0);
    }
    (
        u16::from_le_bytes([data[4], data[5]]),
        u16::from_le_bytes([data[8], data[9]]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_axis_covers_full_range() {
        assert_eq!(unit_axis(i16::MIN), 0.0);
        assert_eq!(unit_axis(i16::MAX), 1.0);
    }

    #[test]
    fn stick_axis_is_clamped() {
        assert_eq!(stick_axis(i16::MIN), -1.0);
        assert_eq!(stick_axis(i16::MAX), 1.0);
        assert_eq!(stick_axis(0), 0.0);
    }

    #[test]
    fn ids_are_read_from_usb_guids() {
        let mut guid = [0u8; 16];
        guid[0] = 0x03;
        guid[4..6].copy_from_slice(&0x045Eu16.to_le_bytes());
        guid[8..10].copy_from_slice(&0x0B12u16.to_le_bytes());
        assert_eq!(ids_from_guid(&guid), (0x045E, 0x0B12));

        guid[6] = 0x7f;
        assert_eq!(ids_from_guid(&guid), (0, 0));
    }

    #[test]
    fn wired_controllers_report_charging() {
        let report = battery_from_power_level(PowerLevel::Wired).unwrap();
        assert_eq!(report.status, BatteryStatus::Charging);
        assert!(battery_from_power_level(PowerLevel::Unknown).is_none());
    }
}
