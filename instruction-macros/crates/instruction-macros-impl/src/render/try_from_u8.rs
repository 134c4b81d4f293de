//! Generates a `TryFrom<u8>` that maps raw instruction tags to their corresponding enum variants
//! using efficient, `unsafe` but sound transmutations.

use itertools::Itertools;
use proc_macro2::{
    Literal,
    TokenStream,
};
use quote::quote;

use crate::parse::{
    error_type::{
        ErrorPath,
        ErrorType,
    },
    instruction_variant::InstructionVariant,
    parsed_enum::ParsedEnum,
};

/// Renders a TryFrom<u8> for an instruction tag enum type `T`.
///
/// ## Example
/// ```rust,ignore
/// #[repr(u8)]
/// #[derive(ProgramInstruction)]
/// pub enum MyInstruction {
///     Swap = 0,
///     AddLiquidity = 1,
///     Log = 4,
///     OutOfOrderDiscriminant = 3,
/// }
///
/// // Which then adds this implementation:
/// impl TryFrom<u8> for MyInstruction {
///     type Error = DecodingError;
///
///     #[inline(always)]
///     fn try_from(tag: u8) -> Result<Self, Self::Error> {
///         match tag {
///             0..=1 | 3..=4 => Ok(unsafe { ::core::mem::transmute::<u8, MyInstruction>(tag) }),
///             _ => Err(DecodingErrorKind::UnknownDiscriminator(tag).into()),
///         }
///     }
/// }
/// ```
pub fn render(
    parsed_enum: &ParsedEnum,
    instruction_variants: &[InstructionVariant],
) -> TokenStream {
    let enum_ident = &parsed_enum.enum_ident;

    let sorted_by_discriminants = instruction_variants
        .iter()
        .sorted_by_key(|t| t.discriminant)
        .collect_vec();

    // Build a 2d collection of disjoint ranges, grouped by contiguous discriminants.
    // For example: [0..2, 3..5, 7..99]
    let chunks = sorted_by_discriminants
        .chunk_by(|a, b| a.discriminant as u16 + 1 == b.discriminant as u16)
        .collect_vec();

    let ranges = chunks
        .iter()
        .map(|chunk| {
            match chunk {
                [only] => {
                    let tag = Literal::u8_unsuffixed(only.discriminant);
                    quote! { #tag }
                }
                [first, .., last] => {
                    let start = Literal::u8_unsuffixed(first.discriminant);
                    let end = Literal::u8_unsuffixed(last.discriminant);
                    quote! { #start..=#end }
                }
                [] => quote! {},
            }
        })
        .collect_vec();

    let ErrorPath { base, variant } = ErrorType::UnknownDiscriminator.to_path();

    let valid_arm = match ranges.is_empty() {
        true => quote! {},
        false => quote! {
            #(#ranges)|* => Ok(unsafe { ::core::mem::transmute::<u8, #enum_ident>(tag) }),
        },
    };

    quote! {
        impl TryFrom<u8> for #enum_ident {
            type Error = ::instruction_macros_traits::DecodingError;

            #[inline(always)]
            fn try_from(tag: u8) -> Result<Self, Self::Error> {
                // Safety: Only valid discriminants are transmuted.
                match tag {
                    #valid_arm
                    _ => Err(#base::#variant(tag).into()),
                }
            }
        }
    }
}
