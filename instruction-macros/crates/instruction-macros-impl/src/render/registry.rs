//! Renders `impl InstructionSet` for the instruction enum: the discriminator registry.

use proc_macro2::TokenStream;
use quote::quote;

use crate::parse::{
    instruction_variant::InstructionVariant,
    parsed_enum::ParsedEnum,
};

pub fn render(parsed_enum: &ParsedEnum, instruction_variants: &[InstructionVariant]) -> TokenStream {
    let enum_ident = &parsed_enum.enum_ident;
    let variants = instruction_variants
        .iter()
        .map(|v| &v.variant_name)
        .collect::<Vec<_>>();
    let data_idents = instruction_variants
        .iter()
        .map(|v| v.instruction_data_struct_ident())
        .collect::<Vec<_>>();

    quote! {
        #[automatically_derived]
        impl ::instruction_macros_traits::InstructionSet for #enum_ident {
            const ALL: &'static [Self] = &[#(Self::#variants),*];

            #[inline(always)]
            fn tag(self) -> u8 {
                self as u8
            }

            fn name(self) -> &'static str {
                match self {
                    #(
                        Self::#variants => <#data_idents as ::instruction_macros_traits::ProgramInstructionData>::NAME,
                    )*
                }
            }

            fn account_template(self) -> &'static [::instruction_macros_traits::AccountRole] {
                match self {
                    #(
                        Self::#variants => <#data_idents as ::instruction_macros_traits::ProgramInstructionData>::ACCOUNTS,
                    )*
                }
            }

            fn describe_args(self) -> ::instruction_macros_traits::LayoutKind {
                match self {
                    #(
                        Self::#variants => <#data_idents as ::instruction_macros_traits::Layout>::describe(),
                    )*
                }
            }

            #[inline(always)]
            fn from_tag(tag: u8) -> ::core::result::Result<Self, ::instruction_macros_traits::DecodingError> {
                Self::try_from(tag)
            }
        }
    }
}
