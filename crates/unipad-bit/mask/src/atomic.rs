use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::bitmask::Bitmask;
use crate::Bitable;

/// A [`Bitmask`] that can be updated through a shared reference.
#[derive(Debug)]
pub struct AtomicBitmask<T: Bitable>(AtomicU64, PhantomData<T>);

impl<T: Bitable> AtomicBitmask<T> {
    pub fn new(values: &[T]) -> Self {
        Self::from_mask(Bitmask::new(values))
    }

    pub fn from_mask(mask: Bitmask<T>) -> Self {
        Self(AtomicU64::new(mask.bits()), PhantomData)
    }

    pub fn empty() -> Self {
        Self(AtomicU64::new(0), PhantomData)
    }

    #[inline]
    pub fn insert(&self, bit: T) {
        self.0.fetch_or(bit.bit(), Ordering::AcqRel);
    }

    #[inline]
    pub fn remove(&self, bit: T) {
        self.0.fetch_and(!bit.bit(), Ordering::AcqRel);
    }

    #[inline]
    pub fn contains(&self, bit: T) -> bool {
        self.load().contains(bit)
    }

    /// Replace the whole set at once.
    #[inline]
    pub fn store(&self, mask: Bitmask<T>) {
        self.0.store(mask.bits(), Ordering::Release);
    }

    /// Load current value as a Bitmask.
    #[inline]
    pub fn load(&self) -> Bitmask<T> {
        Bitmask::from_bits(self.0.load(Ordering::Acquire))
    }
}

impl<T: Bitable> Default for AtomicBitmask<T> {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::AtomicBitmask;
    use crate::{Bitable, Bitmask};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Pad {
        Up,
        Down,
    }

    impl Bitable for Pad {
        const ALL: &'static [Self] = &[Self::Up, Self::Down];

        fn bit(&self) -> u64 {
            1u64 << (*self as u64)
        }

        fn index(&self) -> u32 {
            *self as u32
        }
    }

    #[test]
    fn store_replaces_previous_flags() {
        let mask = AtomicBitmask::new(&[Pad::Up]);
        mask.store(Bitmask::new(&[Pad::Down]));
        assert!(!mask.contains(Pad::Up));
        assert!(mask.contains(Pad::Down));
    }

    #[test]
    fn updates_are_visible_across_threads() {
        let mask = Arc::new(AtomicBitmask::empty());
        let writer = Arc::clone(&mask);
        thread::spawn(move || writer.insert(Pad::Down))
            .join()
            .unwrap();
        assert!(mask.contains(Pad::Down));
        mask.remove(Pad::Down);
        assert!(mask.load().is_empty());
    }
}
