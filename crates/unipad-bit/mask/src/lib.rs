//! Flag sets for gamepad buttons.
//!
//! A [`Bitable`] type is a fieldless enum whose variants occupy distinct
//! bit positions of a `u64`. [`Bitmask`] is a plain copyable set of such
//! flags and [`AtomicBitmask`] is the lock-free variant that can be shared
//! between a device thread and its readers.
mod atomic;
mod bitmask;

pub use atomic::AtomicBitmask;
pub use bitmask::{Bitmask, Iter};

pub trait Bitable: Copy + 'static {
    /// Every flag of the type, in declaration order.
    const ALL: &'static [Self];

    fn bit(&self) -> u64;

    fn index(&self) -> u32;
}
