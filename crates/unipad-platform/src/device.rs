use std::sync::{Arc, Mutex};

use crate::error::Result;
use crate::types::{BatteryReport, DeviceId, DeviceInfo, GamepadReading, RawReading, Vibration};

/// A controller addressed through index-based button, switch and axis arrays.
pub trait RawDevice: Send + Sync {
    fn id(&self) -> DeviceId;

    fn name(&self) -> String;

    fn vendor_id(&self) -> u16;

    fn product_id(&self) -> u16;

    /// Reads the current hardware state. Never cached by the device.
    fn read(&self) -> RawReading;

    fn try_battery_report(&self) -> Result<BatteryReport>;

    fn info(&self) -> DeviceInfo {
        DeviceInfo {
            id: self.id(),
            name: self.name(),
            vendor_id: self.vendor_id(),
            product_id: self.product_id(),
        }
    }
}

/// A controller the platform models natively, with named buttons and
/// settable vibration.
pub trait GamepadDevice: Send + Sync {
    fn id(&self) -> DeviceId;

    fn name(&self) -> String;

    /// Reads the current hardware state. Never cached by the device.
    fn read(&self) -> GamepadReading;

    /// Levels most recently applied with [`GamepadDevice::set_vibration`].
    fn vibration(&self) -> Vibration;

    /// Applies all four levels at once.
    fn set_vibration(&self, vibration: Vibration);

    /// Resolves the raw counterpart of this gamepad, which carries the
    /// hardware identifiers.
    fn as_raw(&self) -> Option<Arc<dyn RawDevice>>;

    fn try_battery_report(&self) -> Result<BatteryReport>;
}

/// Attach/detach notification for a device of type `D`.
pub enum DeviceEvent<D: ?Sized> {
    Added(Arc<D>),
    Removed(Arc<D>),
}

impl<D: ?Sized> DeviceEvent<D> {
    pub fn device(&self) -> &Arc<D> {
        match self {
            DeviceEvent::Added(device) | DeviceEvent::Removed(device) => device,
        }
    }
}

impl<D: ?Sized> Clone for DeviceEvent<D> {
    fn clone(&self) -> Self {
        match self {
            DeviceEvent::Added(device) => DeviceEvent::Added(Arc::clone(device)),
            DeviceEvent::Removed(device) => DeviceEvent::Removed(Arc::clone(device)),
        }
    }
}

/// Callback invoked on the thread that delivers platform notifications.
pub type Listener<D> = Box<dyn Fn(&DeviceEvent<D>) + Send + Sync>;

/// The platform input subsystem.
pub trait Platform: Send + Sync {
    /// Raw controllers that are attached right now, oldest first.
    fn raw_controllers(&self) -> Vec<Arc<dyn RawDevice>>;

    /// Native gamepads that are attached right now, oldest first.
    fn gamepads(&self) -> Vec<Arc<dyn GamepadDevice>>;

    /// Registers a listener for raw controller attach/detach. Listeners stay
    /// registered for the lifetime of the platform.
    fn on_raw_controller(&self, listener: Listener<dyn RawDevice>);

    /// Registers a listener for gamepad attach/detach.
    fn on_gamepad(&self, listener: Listener<dyn GamepadDevice>);
}

/// Registered listeners of one device kind.
pub struct Listeners<D: ?Sized> {
    inner: Mutex<Vec<Listener<D>>>,
}

impl<D: ?Sized> Default for Listeners<D> {
    fn default() -> Self {
        Self {
            inner: Mutex::new(Vec::new()),
        }
    }
}

impl<D: ?Sized> Listeners<D> {
    pub fn push(&self, listener: Listener<D>) {
        if let Ok(mut listeners) = self.inner.lock() {
            listeners.push(listener);
        }
    }

    /// Invokes every listener in registration order on the calling thread.
    /// Listeners must not register new listeners from inside the callback.
    pub fn notify(&self, event: &DeviceEvent<D>) {
        if let Ok(listeners) = self.inner.lock() {
            for listener in listeners.iter() {
                listener(event);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().map(|l| l.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
