use std::sync::{Arc, Mutex, RwLock};

use crossbeam_channel::{unbounded, Sender};
use unipad_platform::{DeviceEvent, DeviceId, DeviceInfo, GamepadDevice, Listener, RawDevice};

use crate::events::{ControllerEvent, EventReceiver};

/// A device an adapter can hold on to.
pub(crate) trait Tracked: Send + Sync {
    fn device_id(&self) -> DeviceId;

    fn device_info(&self) -> DeviceInfo;
}

impl Tracked for dyn RawDevice {
    fn device_id(&self) -> DeviceId {
        self.id()
    }

    fn device_info(&self) -> DeviceInfo {
        self.info()
    }
}

impl Tracked for dyn GamepadDevice {
    fn device_id(&self) -> DeviceId {
        self.id()
    }

    fn device_info(&self) -> DeviceInfo {
        let (vendor_id, product_id) = self
            .as_raw()
            .map(|raw| (raw.vendor_id(), raw.product_id()))
            .unwrap_or((0, 0));
        DeviceInfo {
            id: self.id(),
            name: self.name(),
            vendor_id,
            product_id,
        }
    }
}

/// The device handle of one adapter and the subscribers to its lifecycle.
///
/// The handle is written from the platform's notification thread and read
/// from any thread polling the adapter.
pub(crate) struct Connection<D: ?Sized> {
    device: RwLock<Option<Arc<D>>>,
    subscribers: Mutex<Vec<Sender<ControllerEvent>>>,
}

impl<D: ?Sized + Tracked + 'static> Connection<D> {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            device: RwLock::new(None),
            subscribers: Mutex::new(Vec::new()),
        })
    }

    /// The current device, if any. The lock is released before returning.
    pub(crate) fn current(&self) -> Option<Arc<D>> {
        self.device.read().ok().and_then(|device| device.clone())
    }

    pub(crate) fn is_connected(&self) -> bool {
        self.device
            .read()
            .map(|device| device.is_some())
            .unwrap_or(false)
    }

    /// Makes `device` the current one, replacing any previous device.
    pub(crate) fn connect(&self, device: Arc<D>) {
        let info = device.device_info();
        if let Ok(mut slot) = self.device.write() {
            if let Some(previous) = slot.replace(device) {
                if previous.device_id() != info.id {
                    log::debug!(
                        "controller {} replaced by {}",
                        previous.device_id(),
                        info.id
                    );
                }
            }
        }
        log::debug!(
            "controller connected - {0} id={1} vid=0x{2:04x} pid=0x{3:04x}",
            info.name,
            info.id,
            info.vendor_id,
            info.product_id
        );
        self.broadcast(ControllerEvent::Connected(info));
    }

    /// Clears the handle if it points at the device with the given id.
    ///
    /// Removal of any other device leaves the handle in place, so detaching a
    /// second pad does not disconnect the one in use.
    pub(crate) fn disconnect(&self, id: DeviceId) {
        let removed = match self.device.write() {
            Ok(mut slot) if slot.as_ref().is_some_and(|d| d.device_id() == id) => {
                *slot = None;
                true
            }
            _ => false,
        };
        if removed {
            log::debug!("controller disconnected - id={id}");
            self.broadcast(ControllerEvent::Disconnected(id));
        }
    }

    /// Subscribes to lifecycle events. Dropped subscribers are cleaned automatically.
    pub(crate) fn subscribe(&self) -> EventReceiver {
        let (tx, rx) = unbounded();
        if let Ok(mut subs) = self.subscribers.lock() {
            subs.push(tx);
        }
        rx
    }

    /// A platform listener feeding this connection. It holds a weak
    /// reference, so it goes quiet once the adapter is dropped.
    pub(crate) fn listener(self: &Arc<Self>) -> Listener<D> {
        let connection = Arc::downgrade(self);
        Box::new(move |event: &DeviceEvent<D>| {
            let Some(connection) = connection.upgrade() else {
                return;
            };
            match event {
                DeviceEvent::Added(device) => connection.connect(Arc::clone(device)),
                DeviceEvent::Removed(device) => connection.disconnect(device.device_id()),
            }
        })
    }

    fn broadcast(&self, event: ControllerEvent) {
        if let Ok(mut subs) = self.subscribers.lock() {
            subs.retain(|tx| tx.send(event.clone()).is_ok());
        }
    }
}

#[cfg(test)]
mod tests {
    use unipad_platform::{Platform, VirtualPlatform};

    use super::*;

    #[test]
    fn newest_device_replaces_current() {
        let platform = VirtualPlatform::new();
        let connection = Connection::<dyn RawDevice>::new();
        platform.on_raw_controller(connection.listener());
        let events = connection.subscribe();

        let first = platform.attach_raw("first", 0x9999, 1);
        let second = platform.attach_raw("second", 0x9999, 2);
        assert_eq!(connection.current().map(|d| d.id()), Some(second.id()));

        // removing a device that is not tracked leaves the handle alone
        platform.detach(first.id());
        assert!(connection.is_connected());

        platform.detach(second.id());
        assert!(!connection.is_connected());

        let received: Vec<_> = events.try_iter().collect();
        assert_eq!(received.len(), 3);
        assert!(matches!(received[2], ControllerEvent::Disconnected(id) if id == second.id()));
    }

    #[test]
    fn listener_outlives_dropped_connection() {
        let platform = VirtualPlatform::new();
        let connection = Connection::<dyn RawDevice>::new();
        platform.on_raw_controller(connection.listener());
        drop(connection);
        platform.attach_raw("late", 0x9999, 1);
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let connection = Connection::<dyn RawDevice>::new();
        let kept = connection.subscribe();
        drop(connection.subscribe());
        let platform = VirtualPlatform::new();
        let device = platform.attach_raw("pad", 0x9999, 1);
        connection.connect(device);
        assert_eq!(connection.subscribers.lock().unwrap().len(), 1);
        assert!(matches!(kept.try_recv(), Ok(ControllerEvent::Connected(_))));
    }
}
