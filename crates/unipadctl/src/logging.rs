// Colorized wrappers for logging

use fern::Dispatch;

use crate::error::Result;

#[inline(always)]
pub(crate) fn format_log(message: &str) -> String {
    let now = chrono::Local::now().format("%Y.%m.%d %H:%M:%S").to_string();
    format!("[{now}] {message}")
}

#[macro_export]
macro_rules! print_error {
    ($($arg:tt)*) => {
        let message = $crate::logging::format_log(&format!($($arg)*));
        log::error!("{}", message.bright_red());
    }
}

#[macro_export]
macro_rules! print_info {
    ($($arg:tt)*) => {
        let message = $crate::logging::format_log(&format!($($arg)*));
        log::info!("{message}");
    }
}

#[macro_export]
macro_rules! print_debug {
    ($($arg:tt)*) => {
        let message = $crate::logging::format_log(&format!($($arg)*));
        log::debug!("{}", message.dimmed());
    }
}

#[macro_export]
macro_rules! print_warning {
    ($($arg:tt)*) => {
        let message = $crate::logging::format_log(&format!($($arg)*));
        log::warn!("{}", message.bright_yellow());
    }
}

/// Setup the logger. Library crates log through the same dispatcher.
pub fn setup(verbose: bool, no_color: bool) -> Result<()> {
    let log_level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    let library_level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    Dispatch::new()
        .level(log::LevelFilter::Error)
        .level_for("unipadctl", log_level)
        .level_for("unipad", library_level)
        .level_for("unipad_platform", library_level)
        .format(|out, message, record| {
            if record.target().starts_with("unipadctl") {
                out.finish(format_args!("{message}"))
            } else {
                let line = format_log(&format!("{}: {message}", record.target()));
                out.finish(format_args!("{line}"))
            }
        })
        .chain(std::io::stdout())
        .apply()?;

    if no_color {
        colored::control::set_override(false);
    }
    Ok(())
}
