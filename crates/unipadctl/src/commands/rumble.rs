use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::Receiver;
use unipad::{GamingController, XboxController};
use unipad_platform::{Platform, Vibration};

use crate::error::{CliError, Result};
use crate::print_info;

fn level(intensity: f64) -> f64 {
    intensity.clamp(0.0, 100.0) / 100.0
}

/// Runs both motors of the attached gamepad for `duration`, then stops
/// them. Ctrl+C stops early.
pub(crate) fn rumble(
    platform: Arc<dyn Platform>,
    left: f64,
    right: f64,
    duration: Duration,
    stop: &Receiver<()>,
) -> Result<()> {
    let controller = XboxController::new(platform);
    controller.refresh();
    let gamepad = controller.device().ok_or(CliError::NoGamepad)?;

    gamepad.set_vibration(Vibration {
        left_motor: level(left),
        right_motor: level(right),
        ..Vibration::default()
    });
    print_info!(
        "rumbling left={:.0} right={:.0} for {}ms",
        controller.left_vibration(),
        controller.right_vibration(),
        duration.as_millis()
    );
    let _ = stop.recv_timeout(duration);
    gamepad.set_vibration(Vibration::default());
    Ok(())
}
