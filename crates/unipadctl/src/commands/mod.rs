mod list;
mod rumble;
mod watch;

pub(crate) use list::list;
pub(crate) use rumble::rumble;
pub(crate) use watch::watch;
