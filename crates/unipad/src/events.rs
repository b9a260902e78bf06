use crossbeam_channel::Receiver;

use unipad_platform::{DeviceId, DeviceInfo};

/// Events emitted by an adapter about its device lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerEvent {
    /// The adapter picked up a device. Also emitted when a newer device
    /// replaces the current one.
    Connected(DeviceInfo),
    /// The adapter's device went away.
    Disconnected(DeviceId),
}

/// Receiving end for controller events subscription.
pub type EventReceiver = Receiver<ControllerEvent>;
