use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, Ident, LitInt, Variant};

const MAX_BITS: u32 = 64;

pub(crate) fn handle_derive_bit(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let Data::Enum(data) = &input.data else {
        return Err(syn::Error::new(
            Span::call_site(),
            "Bit can be derived only for enums",
        ));
    };

    let mut variants: Vec<(&Ident, u32)> = Vec::with_capacity(data.variants.len());
    for (i, variant) in data.variants.iter().enumerate() {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "Bit supports only fieldless enum variants",
            ));
        }
        let position = match explicit_position(variant)? {
            Some(position) => position,
            None => i as u32,
        };
        if position >= MAX_BITS {
            return Err(syn::Error::new_spanned(
                variant,
                format!("bit position {position} does not fit into u64"),
            ));
        }
        if let Some((other, _)) = variants.iter().find(|(_, p)| *p == position) {
            return Err(syn::Error::new_spanned(
                variant,
                format!("bit position {position} is already taken by `{other}`"),
            ));
        }
        variants.push((&variant.ident, position));
    }

    let all = variants.iter().map(|(v, _)| quote! { #name::#v });
    let bit_arms = variants.iter().map(|(v, p)| {
        let p = u64::from(*p);
        quote! { #name::#v => 1u64 << #p }
    });
    let index_arms = variants.iter().map(|(v, p)| quote! { #name::#v => #p });

    Ok(quote! {
        impl ::unipad_bit_mask::Bitable for #name {
            const ALL: &'static [Self] = &[ #( #all, )* ];

            #[inline]
            fn bit(&self) -> u64 {
                match self { #( #bit_arms, )* }
            }

            #[inline]
            fn index(&self) -> u32 {
                match self { #( #index_arms, )* }
            }
        }
    })
}

fn explicit_position(variant: &Variant) -> syn::Result<Option<u32>> {
    for attr in &variant.attrs {
        if attr.path().is_ident("bit") {
            let lit: LitInt = attr.parse_args()?;
            return lit.base10_parse::<u32>().map(Some);
        }
    }
    Ok(None)
}
