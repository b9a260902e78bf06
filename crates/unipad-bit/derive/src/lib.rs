mod derive;

use proc_macro::TokenStream;

use crate::derive::handle_derive_bit;

/// Implements `unipad_bit_mask::Bitable` for a fieldless enum.
///
/// Variants take the bit position of their declaration index unless they
/// carry an explicit `#[bit(n)]` attribute.
#[proc_macro_derive(Bit, attributes(bit))]
pub fn derive_bit(input: TokenStream) -> TokenStream {
    handle_derive_bit(input)
}
