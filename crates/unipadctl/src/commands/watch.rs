use std::sync::Arc;
use std::time::Duration;

use colored::Colorize;
use crossbeam_channel::{select, tick, Receiver};
use unipad::{
    type_string, BatteryReport, ControllerEvent, ControllerState, ControllerType, GamingController,
};
use unipad_platform::Platform;

use crate::error::Result;
use crate::{print_debug, print_info, print_warning};

pub(crate) fn format_state(state: &ControllerState) -> String {
    let pressed: Vec<String> = state.buttons.iter().map(|b| format!("{b:?}")).collect();
    format!(
        "buttons=[{}] left=({:.1}, {:.1}) right=({:.1}, {:.1})",
        pressed.join(" "),
        state.left_x,
        state.left_y,
        state.right_x,
        state.right_y
    )
}

pub(crate) fn battery_label(report: &BatteryReport) -> String {
    match report.charge_fraction() {
        Some(fraction) => format!("{:?} {:.0}%", report.status, fraction * 100.0),
        None => format!("{:?}", report.status),
    }
}

fn report_connected(controller: &dyn GamingController) {
    let battery = match controller.battery() {
        Ok(report) => battery_label(&report),
        Err(e) => {
            print_debug!("{e}");
            format!("{:?}", controller.status())
        }
    };
    print_info!(
        "{} connected - vid=0x{:04x} pid=0x{:04x} battery={battery}",
        type_string(controller.vendor()).green(),
        controller.vendor(),
        controller.product(),
    );
}

/// Polls the controller every `interval` and prints state changes until
/// `stop` fires.
pub(crate) fn watch(
    platform: Arc<dyn Platform>,
    kind: ControllerType,
    interval: Duration,
    stop: &Receiver<()>,
) -> Result<()> {
    let controller = unipad::connect(kind, platform)?;
    let events = controller.subscribe();
    let ticker = tick(interval);

    print_info!(
        "watching {} controller every {}ms, press Ctrl+C to stop",
        controller.kind(),
        interval.as_millis()
    );
    if controller.is_connected() {
        report_connected(controller.as_ref());
    } else {
        print_warning!("waiting for a controller");
    }

    let mut last = controller.state();
    print_debug!("{}", format_state(&last));
    loop {
        select! {
            recv(stop) -> _ => break,
            recv(events) -> msg => match msg {
                Ok(ControllerEvent::Connected(info)) => {
                    print_debug!("device {} attached: {}", info.id, info.name);
                    report_connected(controller.as_ref());
                }
                Ok(ControllerEvent::Disconnected(id)) => {
                    print_warning!("controller {id} disconnected");
                }
                Err(_) => break,
            },
            recv(ticker) -> _ => {
                let state = controller.state();
                if state != last {
                    print_info!("{}", format_state(&state));
                    last = state;
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use unipad::{BatteryStatus, Button};

    use super::*;

    #[test]
    fn neutral_state_formats_centered() {
        let line = format_state(&ControllerState::disconnected());
        assert_eq!(line, "buttons=[] left=(50.0, 50.0) right=(50.0, 50.0)");
    }

    #[test]
    fn pressed_buttons_are_listed() {
        let mut state = ControllerState::disconnected();
        state.buttons.insert(Button::A);
        state.buttons.insert(Button::Start);
        assert!(format_state(&state).starts_with("buttons=[Start A]"));
    }

    #[test]
    fn battery_label_shows_known_charge() {
        let report = BatteryReport {
            status: BatteryStatus::Discharging,
            full_charge_capacity_mwh: Some(100),
            remaining_capacity_mwh: Some(20),
            ..BatteryReport::default()
        };
        assert_eq!(battery_label(&report), "Discharging 20%");
        assert_eq!(battery_label(&BatteryReport::default()), "NotPresent");
    }
}
