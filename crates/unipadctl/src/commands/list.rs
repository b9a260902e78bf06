use colored::Colorize;
use unipad::type_string;
use unipad_platform::{DeviceInfo, Platform};

use crate::print_info;

fn describe(kind: &str, info: &DeviceInfo) -> String {
    format!(
        "{kind} #{} {} [{}] vid=0x{:04x} pid=0x{:04x}",
        info.id,
        info.name.bold(),
        type_string(info.vendor_id),
        info.vendor_id,
        info.product_id
    )
}

/// Prints every attached device, native gamepads first.
pub(crate) fn list(platform: &dyn Platform) {
    let gamepads = platform.gamepads();
    let raw = platform.raw_controllers();
    if gamepads.is_empty() && raw.is_empty() {
        print_info!("no controllers attached");
        return;
    }
    for gamepad in &gamepads {
        let (vendor_id, product_id) = gamepad
            .as_raw()
            .map(|raw| (raw.vendor_id(), raw.product_id()))
            .unwrap_or((0, 0));
        let info = DeviceInfo {
            id: gamepad.id(),
            name: gamepad.name(),
            vendor_id,
            product_id,
        };
        print_info!("{}", describe("gamepad", &info));
    }
    for device in &raw {
        print_info!("{}", describe("raw", &device.info()));
    }
}
