use unipad_bit_derive::Bit;
use unipad_bit_mask::{Bitable, Bitmask};

#[derive(Bit, Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Sequential {
    First,
    Second,
    Third,
}

#[derive(Bit, Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Sparse {
    #[bit(5)]
    Low,
    #[bit(12)]
    High,
    Implicit,
}

#[test]
fn sequential_variants_follow_declaration_order() {
    assert_eq!(Sequential::First.bit(), 1);
    assert_eq!(Sequential::Second.bit(), 2);
    assert_eq!(Sequential::Third.bit(), 4);
    assert_eq!(Sequential::Third.index(), 2);
    assert_eq!(
        Sequential::ALL,
        &[Sequential::First, Sequential::Second, Sequential::Third]
    );
}

#[test]
fn explicit_positions_are_honored() {
    assert_eq!(Sparse::Low.bit(), 1 << 5);
    assert_eq!(Sparse::High.bit(), 1 << 12);
    assert_eq!(Sparse::High.index(), 12);
    // no attribute falls back to the declaration index
    assert_eq!(Sparse::Implicit.index(), 2);
}

#[test]
fn derived_flags_work_with_bitmask() {
    let mask = Bitmask::<Sparse>::from_bits(1 << 12);
    assert!(mask.is_only(Sparse::High));
    assert!(!mask.contains(Sparse::Low));
}
