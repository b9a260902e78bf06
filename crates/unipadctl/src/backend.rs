use std::sync::Arc;

use unipad_platform::{Platform, VirtualPlatform};

use crate::config::Backend;
use crate::error::Result;

/// Vendor and product of the simulated gamepad on the virtual backend.
const VIRTUAL_PAD: (u16, u16) = (0x045E, 0x0B13);

/// Starts the platform for `backend`.
pub(crate) fn open(backend: Backend) -> Result<Arc<dyn Platform>> {
    match backend {
        Backend::Virtual => {
            let platform = VirtualPlatform::new();
            platform.attach_gamepad("Virtual Controller", VIRTUAL_PAD.0, VIRTUAL_PAD.1);
            Ok(Arc::new(platform))
        }
        Backend::Sdl => open_sdl(),
    }
}

#[cfg(feature = "sdl2-backend")]
fn open_sdl() -> Result<Arc<dyn Platform>> {
    let platform = unipad_platform::SdlPlatform::new()?;
    Ok(Arc::new(platform))
}

#[cfg(not(feature = "sdl2-backend"))]
fn open_sdl() -> Result<Arc<dyn Platform>> {
    Err(crate::error::CliError::BackendUnavailable(Backend::Sdl))
}
