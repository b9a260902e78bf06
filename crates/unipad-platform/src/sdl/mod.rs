mod command;
mod runtime;

use std::sync::{Arc, RwLock};
use std::time::Duration;

use crossbeam_channel::{unbounded, Sender};

use crate::device::{GamepadDevice, Listener, Listeners, Platform, RawDevice};
use crate::error::{Error, Result};
use crate::types::{BatteryReport, DeviceId, GamepadReading, RawReading, Vibration};

use self::command::Command;
use self::runtime::start_runtime_thread;

/// How long [`SdlPlatform::new`] waits for the initial enumeration.
const STARTUP_TIMEOUT: Duration = Duration::from_secs(1);

/// Shared state used by the platform, the runtime loop and device objects.
pub(crate) struct Inner {
    pub raw: RwLock<Vec<Arc<SdlRawDevice>>>,
    pub gamepads: RwLock<Vec<Arc<SdlGamepad>>>,
    pub raw_listeners: Listeners<dyn RawDevice>,
    pub gamepad_listeners: Listeners<dyn GamepadDevice>,
    pub cmd_tx: Sender<Command>,
}

/// Platform backed by SDL2 joysticks and game controllers.
///
/// SDL lives on a dedicated thread which publishes a fresh snapshot of every
/// open device after each pass of its event loop. Attach/detach listeners
/// run on that thread.
pub struct SdlPlatform {
    inner: Arc<Inner>,
}

impl SdlPlatform {
    /// Starts the runtime thread and waits for the initial device enumeration.
    pub fn new() -> Result<Self> {
        let (cmd_tx, cmd_rx) = unbounded::<Command>();
        let inner = Arc::new(Inner {
            raw: RwLock::new(Vec::new()),
            gamepads: RwLock::new(Vec::new()),
            raw_listeners: Listeners::default(),
            gamepad_listeners: Listeners::default(),
            cmd_tx,
        });

        let (ready_tx, ready_rx) = std::sync::mpsc::channel();
        start_runtime_thread(Arc::clone(&inner), cmd_rx, ready_tx);

        match ready_rx.recv_timeout(STARTUP_TIMEOUT) {
            Ok(Ok(())) => Ok(Self { inner }),
            Ok(Err(err)) => Err(err),
            Err(_) => Err(Error::BackendInit(
                "timed out waiting for device enumeration".to_string(),
            )),
        }
    }
}

impl Drop for SdlPlatform {
    fn drop(&mut self) {
        let _ = self.inner.cmd_tx.send(Command::Shutdown);
    }
}

impl Platform for SdlPlatform {
    fn raw_controllers(&self) -> Vec<Arc<dyn RawDevice>> {
        self.inner
            .raw
            .read()
            .map(|raw| {
                raw.iter()
                    .map(|d| Arc::clone(d) as Arc<dyn RawDevice>)
                    .collect()
            })
            .unwrap_or_default()
    }

    fn gamepads(&self) -> Vec<Arc<dyn GamepadDevice>> {
        self.inner
            .gamepads
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
        self.inner.raw_listeners.push(listener);
    }

    fn on_gamepad(&self, listener: Listener<dyn GamepadDevice>) {
        self.inner.gamepad_listeners.push(listener);
    }
}

/// A joystick as seen through SDL's index-based API.
pub(crate) struct SdlRawDevice {
    id: DeviceId,
    name: String,
    vendor_id: u16,
    product_id: u16,
    reading: RwLock<RawReading>,
    battery: RwLock<Option<BatteryReport>>,
}

impl SdlRawDevice {
    pub(crate) fn new(id: DeviceId, name: String, vendor_id: u16, product_id: u16) -> Self {
        Self {
            id,
            name,
            vendor_id,
            product_id,
            reading: RwLock::new(RawReading::centered()),
            battery: RwLock::new(None),
        }
    }

    pub(crate) fn publish(&self, reading: RawReading, battery: Option<BatteryReport>) {
        if let Ok(mut current) = self.reading.write() {
            *current = reading;
        }
        if let Ok(mut current) = self.battery.write() {
            *current = battery;
        }
    }
}

impl RawDevice for SdlRawDevice {
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
        self.reading.read().map(|r| *r).unwrap_or_default()
    }

    fn try_battery_report(&self) -> Result<BatteryReport> {
        self.battery
            .read()
            .ok()
            .and_then(|battery| *battery)
            .ok_or(Error::BatteryUnavailable)
    }
}

/// A joystick SDL recognizes as a game controller.
pub(crate) struct SdlGamepad {
    raw: Arc<SdlRawDevice>,
    reading: RwLock<GamepadReading>,
    vibration: RwLock<Vibration>,
    cmd_tx: Sender<Command>,
}

impl SdlGamepad {
    pub(crate) fn new(raw: Arc<SdlRawDevice>, cmd_tx: Sender<Command>) -> Self {
        Self {
            raw,
            reading: RwLock::new(GamepadReading::default()),
            vibration: RwLock::new(Vibration::default()),
            cmd_tx,
        }
    }

    pub(crate) fn publish(&self, reading: GamepadReading) {
        if let Ok(mut current) = self.reading.write() {
            *current = reading;
        }
    }
}

impl GamepadDevice for SdlGamepad {
    fn id(&self) -> DeviceId {
        self.raw.id
    }

    fn name(&self) -> String {
        self.raw.name.clone()
    }

    fn read(&self) -> GamepadReading {
        self.reading.read().map(|r| *r).unwrap_or_default()
    }

    fn vibration(&self) -> Vibration {
        self.vibration.read().map(|v| *v).unwrap_or_default()
    }

    fn set_vibration(&self, vibration: Vibration) {
        if let Ok(mut current) = self.vibration.write() {
            *current = vibration;
        }
        if let Err(e) = self.cmd_tx.send(Command::Vibrate {
            id: self.raw.id,
            vibration,
        }) {
            log::warn!("failed to queue vibration for device {}: {e}", self.raw.id);
        }
    }

    fn as_raw(&self) -> Option<Arc<dyn RawDevice>> {
        Some(self.raw.clone())
    }

    fn try_battery_report(&self) -> Result<BatteryReport> {
        self.raw.try_battery_report()
    }
}
