use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use unipad_bit_mask::AtomicBitmask;

use crate::device::{DeviceEvent, GamepadDevice, Listener, Listeners, Platform, RawDevice};
use crate::error::{Error, Result};
use crate::types::{
    BatteryReport, DeviceId, GamepadButton, GamepadReading, RawReading, Vibration,
};

/// In-memory platform whose devices are attached, driven and detached by
/// the caller. Notifications are delivered synchronously on the thread that
/// attaches or detaches a device.
#[derive(Default)]
pub struct VirtualPlatform {
    raw: RwLock<Vec<Arc<VirtualRawDevice>>>,
    gamepads: RwLock<Vec<Arc<VirtualGamepad>>>,
    raw_listeners: Listeners<dyn RawDevice>,
    gamepad_listeners: Listeners<dyn GamepadDevice>,
    next_id: AtomicU32,
}

impl VirtualPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a raw controller and notifies raw listeners.
    pub fn attach_raw(&self, name: &str, vendor_id: u16, product_id: u16) -> Arc<VirtualRawDevice> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let device = Arc::new(VirtualRawDevice::new(id, name, vendor_id, product_id));
        self.insert_raw(&device);
        device
    }

    /// Attaches a native gamepad together with its raw counterpart. Both
    /// gamepad and raw listeners are notified, raw first.
    pub fn attach_gamepad(&self, name: &str, vendor_id: u16, product_id: u16) -> Arc<VirtualGamepad> {
        let raw = self.attach_raw(name, vendor_id, product_id);
        let gamepad = Arc::new(VirtualGamepad::new(raw));
        if let Ok(mut gamepads) = self.gamepads.write() {
            gamepads.push(Arc::clone(&gamepad));
        }
        log::debug!("virtual gamepad attached - id={}", gamepad.id());
        let device: Arc<dyn GamepadDevice> = gamepad.clone();
        self.gamepad_listeners.notify(&DeviceEvent::Added(device));
        gamepad
    }

    /// Detaches every device with the given id. A gamepad and its raw
    /// counterpart go away together. Returns `false` when nothing matched.
    pub fn detach(&self, id: DeviceId) -> bool {
        let gamepad = self.gamepads.write().ok().and_then(|mut gamepads| {
            let pos = gamepads.iter().position(|g| g.id() == id)?;
            Some(gamepads.remove(pos))
        });
        let raw = self.raw.write().ok().and_then(|mut raw| {
            let pos = raw.iter().position(|r| r.id() == id)?;
            Some(raw.remove(pos))
        });

        if let Some(gamepad) = &gamepad {
            let device: Arc<dyn GamepadDevice> = gamepad.clone();
            self.gamepad_listeners.notify(&DeviceEvent::Removed(device));
        }
        if let Some(raw) = &raw {
            let device: Arc<dyn RawDevice> = raw.clone();
            self.raw_listeners.notify(&DeviceEvent::Removed(device));
        }
        let found = gamepad.is_some() || raw.is_some();
        if found {
            log::debug!("virtual device detached - id={id}");
        }
        found
    }

    fn insert_raw(&self, device: &Arc<VirtualRawDevice>) {
        if let Ok(mut raw) = self.raw.write() {
            raw.push(Arc::clone(device));
        }
        log::debug!(
            "virtual raw controller attached - id={} vid=0x{:04x} pid=0x{:04x}",
            device.id,
            device.vendor_id,
            device.product_id
        );
        let device: Arc<dyn RawDevice> = device.clone();
        self.raw_listeners.notify(&DeviceEvent::Added(device));
    }
}

impl Platform for VirtualPlatform {
    fn raw_controllers(&self) -> Vec<Arc<dyn RawDevice>> {
        self.raw
            .read()
            .map(|raw| {
                raw.iter()
                    .map(|d| Arc::clone(d) as Arc<dyn RawDevice>)
                    .collect()
            })
            .unwrap_or_default()
    }

    fn gamepads(&self) -> Vec<Arc<dyn GamepadDevice>> {
        self.gamepads
            .read()
            .map(|gamepads| {
                gamepads
                    .iter()
                    .map(|d| Arc::clone(d) as Arc<dyn GamepadDevice>)
                    .collect()
            })
            .unwrap_or_default()
    }

    fn on_raw_controller(&self, listener: Listener<dyn RawDevice>) {
        self.raw_listeners.push(listener);
    }

    fn on_gamepad(&self, listener: Listener<dyn GamepadDevice>) {
        self.gamepad_listeners.push(listener);
    }
}

/// A raw controller whose state is set by the caller.
pub struct VirtualRawDevice {
    id: DeviceId,
    name: String,
    vendor_id: u16,
    product_id: u16,
    reading: RwLock<RawReading>,
    battery: RwLock<Option<BatteryReport>>,
    clock: AtomicU64,
}

impl VirtualRawDevice {
    fn new(id: DeviceId, name: &str, vendor_id: u16, product_id: u16) -> Self {
        Self {
            id,
            name: name.to_string(),
            vendor_id,
            product_id,
            reading: RwLock::new(RawReading::centered()),
            battery: RwLock::new(Some(BatteryReport::default())),
            clock: AtomicU64::new(0),
        }
    }

    /// Replaces the state returned by subsequent reads.
    pub fn set_reading(&self, reading: RawReading) {
        if let Ok(mut current) = self.reading.write() {
            *current = reading;
        }
    }

    /// Edits the current state in place.
    pub fn update(&self, f: impl FnOnce(&mut RawReading)) {
        if let Ok(mut current) = self.reading.write() {
            f(&mut current);
        }
    }

    /// Sets the battery report; `None` makes battery queries fail.
    pub fn set_battery(&self, report: Option<BatteryReport>) {
        if let Ok(mut battery) = self.battery.write() {
            *battery = report;
        }
    }
}

impl RawDevice for VirtualRawDevice {
    fn id(&self) -> DeviceId {
        self.id
    }

    fn name(&self) -> String {
        self.name.clone()
    }

    fn vendor_id(&self) -> u16 {
        self.vendor_id
    }

    fn product_id(&self) -> u16 {
        self.product_id
    }

    fn read(&self) -> RawReading {
        let mut reading = self.reading.read().map(|r| *r).unwrap_or_default();
        reading.timestamp = self.clock.fetch_add(1, Ordering::Relaxed);
        reading
    }

    fn try_battery_report(&self) -> Result<BatteryReport> {
        self.battery
            .read()
            .ok()
            .and_then(|battery| *battery)
            .ok_or(Error::BatteryUnavailable)
    }
}

/// A native gamepad whose state is set by the caller.
pub struct VirtualGamepad {
    raw: Arc<VirtualRawDevice>,
    buttons: AtomicBitmask<GamepadButton>,
    analog: RwLock<GamepadReading>,
    vibration: RwLock<Vibration>,
}

impl VirtualGamepad {
    fn new(raw: Arc<VirtualRawDevice>) -> Self {
        Self {
            raw,
            buttons: AtomicBitmask::empty(),
            analog: RwLock::new(GamepadReading::default()),
            vibration: RwLock::new(Vibration::default()),
        }
    }

    /// The raw counterpart, for driving the index-based view of this pad.
    pub fn raw(&self) -> &Arc<VirtualRawDevice> {
        &self.raw
    }

    pub fn press(&self, button: GamepadButton) {
        self.buttons.insert(button);
    }

    pub fn release(&self, button: GamepadButton) {
        self.buttons.remove(button);
    }

    /// Replaces buttons, triggers and thumbsticks at once.
    pub fn set_reading(&self, reading: GamepadReading) {
        self.buttons.store(reading.buttons);
        if let Ok(mut analog) = self.analog.write() {
            *analog = reading;
        }
    }

    pub fn set_battery(&self, report: Option<BatteryReport>) {
        self.raw.set_battery(report);
    }
}

impl GamepadDevice for VirtualGamepad {
    fn id(&self) -> DeviceId {
        self.raw.id
    }

    fn name(&self) -> String {
        self.raw.name()
    }

    fn read(&self) -> GamepadReading {
        let mut reading = self.analog.read().map(|r| *r).unwrap_or_default();
        reading.buttons = self.buttons.load();
        reading.timestamp = self.raw.clock.fetch_add(1, Ordering::Relaxed);
        reading
    }

    fn vibration(&self) -> Vibration {
        self.vibration.read().map(|v| *v).unwrap_or_default()
    }

    fn set_vibration(&self, vibration: Vibration) {
        if let Ok(mut current) = self.vibration.write() {
            *current = vibration;
        }
    }

    fn as_raw(&self) -> Option<Arc<dyn RawDevice>> {
        Some(self.raw.clone())
    }

    fn try_battery_report(&self) -> Result<BatteryReport> {
        self.raw.try_battery_report()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use unipad_bit_mask::Bitmask;

    use super::*;

    #[test]
    fn attach_and_detach_notify_listeners() {
        let platform = VirtualPlatform::new();
        let added = Arc::new(AtomicUsize::new(0));
        let removed = Arc::new(AtomicUsize::new(0));
        let (a, r) = (Arc::clone(&added), Arc::clone(&removed));
        platform.on_raw_controller(Box::new(move |event| match event {
            DeviceEvent::Added(_) => {
                a.fetch_add(1, Ordering::SeqCst);
            }
            DeviceEvent::Removed(_) => {
                r.fetch_add(1, Ordering::SeqCst);
            }
        }));

        let device = platform.attach_raw("pad", 0x1234, 0x0001);
        assert_eq!(added.load(Ordering::SeqCst), 1);
        assert_eq!(platform.raw_controllers().len(), 1);

        assert!(platform.detach(device.id()));
        assert!(!platform.detach(device.id()));
        assert_eq!(removed.load(Ordering::SeqCst), 1);
        assert!(platform.raw_controllers().is_empty());
    }

    #[test]
    fn gamepad_brings_raw_counterpart() {
        let platform = VirtualPlatform::new();
        let gamepad = platform.attach_gamepad("xbox", 0x045E, 0x0B12);
        assert_eq!(platform.gamepads().len(), 1);
        assert_eq!(platform.raw_controllers().len(), 1);

        let raw = gamepad.as_raw().unwrap();
        assert_eq!(raw.vendor_id(), 0x045E);
        assert_eq!(raw.id(), GamepadDevice::id(gamepad.as_ref()));

        platform.detach(raw.id());
        assert!(platform.gamepads().is_empty());
        assert!(platform.raw_controllers().is_empty());
    }

    #[test]
    fn gamepad_reads_reflect_presses() {
        let platform = VirtualPlatform::new();
        let gamepad = platform.attach_gamepad("xbox", 0x045E, 0x0B12);
        gamepad.set_reading(GamepadReading {
            left_thumbstick_x: -1.0,
            buttons: Bitmask::new(&[GamepadButton::B]),
            ..GamepadReading::default()
        });
        gamepad.press(GamepadButton::A);
        let reading = gamepad.read();
        assert!(reading.buttons.contains(GamepadButton::A));
        assert!(reading.buttons.contains(GamepadButton::B));
        assert_eq!(reading.left_thumbstick_x, -1.0);

        gamepad.release(GamepadButton::B);
        assert!(gamepad.read().buttons.is_only(GamepadButton::A));
    }

    #[test]
    fn every_read_is_a_fresh_snapshot() {
        let platform = VirtualPlatform::new();
        let device = platform.attach_raw("hid", 0x9999, 0x0001);
        let first = device.read();
        device.update(|r| r.buttons[4] = true);
        let second = device.read();
        assert!(!first.buttons[4]);
        assert!(second.buttons[4]);
        assert!(second.timestamp > first.timestamp);
    }

    #[test]
    fn missing_battery_report_is_an_error() {
        let platform = VirtualPlatform::new();
        let device = platform.attach_raw("hid", 0x9999, 0x0001);
        assert!(device.try_battery_report().is_ok());
        device.set_battery(None);
        assert!(matches!(
            device.try_battery_report(),
            Err(Error::BatteryUnavailable)
        ));
    }
}
