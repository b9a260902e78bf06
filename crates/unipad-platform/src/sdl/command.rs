use crate::types::{DeviceId, Vibration};

/// Internal commands sent to the runtime thread.
pub(crate) enum Command {
    Vibrate { id: DeviceId, vibration: Vibration },
    Shutdown,
}
