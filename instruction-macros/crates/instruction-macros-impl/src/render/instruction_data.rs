//! Renders each variant's `{Variant}InstructionData` struct: the argument record with its
//! `Layout` and `ProgramInstructionData` impls.

use proc_macro2::TokenStream;
use quote::{
    format_ident,
    quote,
};

use crate::{
    parse::{
        instruction_variant::InstructionVariant,
        parsed_enum::ParsedEnum,
    },
    render::field_statements::{
        len_expression,
        FieldSpec,
    },
};

pub fn render(parsed_enum: &ParsedEnum, instruction_variants: &[InstructionVariant]) -> TokenStream {
    instruction_variants
        .iter()
        .map(|variant| render_variant(parsed_enum, variant))
        .collect()
}

fn render_variant(parsed_enum: &ParsedEnum, instruction_variant: &InstructionVariant) -> TokenStream {
    let enum_ident = &parsed_enum.enum_ident;
    let program_id_path = &parsed_enum.program_id_path;
    let tag_variant = &instruction_variant.variant_name;
    let struct_ident = instruction_variant.instruction_data_struct_ident();
    let arguments = &instruction_variant.arguments;

    let bindings = arguments
        .iter()
        .map(|arg| format_ident!("__f_{}", arg.name))
        .collect::<Vec<_>>();
    let names = arguments.iter().map(|arg| arg.name.to_string()).collect::<Vec<_>>();
    let specs = arguments
        .iter()
        .zip(&bindings)
        .zip(&names)
        .map(|((arg, binding), name)| {
            let ident = &arg.name;
            FieldSpec {
                name,
                ty: &arg.ty,
                max_len: arg.max_len,
                access: quote! { &self.#ident },
                binding,
                variant: None,
            }
        })
        .collect::<Vec<_>>();

    let field_names = arguments.iter().map(|arg| &arg.name).collect::<Vec<_>>();
    let field_types = arguments.iter().map(|arg| &arg.ty).collect::<Vec<_>>();
    let field_docs = arguments.iter().map(|arg| {
        let doc = format!(" {}", arg.description);
        quote! { #[doc = #doc] }
    });

    let discriminant_doc = format!(
        " - `[0]`: the discriminant `{enum_ident}::{tag_variant}` (`u8`, value `{}`)",
        instruction_variant.discriminant
    );
    let layout_docs = arguments.iter().map(|arg| {
        let ty = &arg.ty;
        let bound = arg
            .max_len
            .map(|max| format!(", at most {max} elements"))
            .unwrap_or_default();
        let doc = format!(" - **{}** (`{}`{bound})", arg.name, quote!(#ty).to_string().replace(' ', ""));
        quote! { #[doc = #doc] }
    });

    let len = len_expression(&specs);
    let encode = specs.iter().map(FieldSpec::encode_statement);
    let decode = specs.iter().map(FieldSpec::decode_statement);
    let describe = specs.iter().map(FieldSpec::describe);
    let struct_name = struct_ident.to_string();
    let variant_name = tag_variant.to_string();

    let roles = instruction_variant.accounts.iter().map(|acc| {
        let name = &acc.name;
        let is_signer = acc.is_signer;
        let is_writable = acc.is_writable;
        let desc = &acc.desc;
        quote! {
            ::instruction_macros_traits::AccountRole::new(#name, #is_signer, #is_writable, #desc)
        }
    });

    quote! {
        #[doc = " Instruction data layout:"]
        #[doc = #discriminant_doc]
        #(#layout_docs)*
        #[derive(Clone, Debug, PartialEq, Eq)]
        pub struct #struct_ident {
            #(
                #field_docs
                pub #field_names: #field_types,
            )*
        }

        impl #struct_ident {
            #[allow(clippy::too_many_arguments)]
            #[inline(always)]
            pub fn new(#(#field_names: #field_types),*) -> Self {
                Self { #(#field_names),* }
            }
        }

        #[automatically_derived]
        impl ::instruction_macros_traits::Layout for #struct_ident {
            #[inline]
            fn encoded_len(&self) -> usize {
                #len
            }

            #[allow(unused_mut, unused_variables)]
            fn encode_into(
                &self,
                dst: &mut [u8],
                offset: usize,
            ) -> ::core::result::Result<usize, ::instruction_macros_traits::EncodingError> {
                let mut __cursor = offset;
                #(#encode)*
                Ok(__cursor - offset)
            }

            #[allow(unused_mut, unused_variables)]
            fn decode_from(
                src: &[u8],
                offset: usize,
            ) -> ::core::result::Result<(Self, usize), ::instruction_macros_traits::DecodingError> {
                let mut __cursor = offset;
                #(#decode)*
                Ok((Self { #(#field_names: #bindings),* }, __cursor - offset))
            }

            fn describe() -> ::instruction_macros_traits::LayoutKind {
                ::instruction_macros_traits::LayoutKind::Record {
                    name: #struct_name,
                    fields: ::std::vec![#(#describe),*],
                }
            }
        }

        #[automatically_derived]
        impl ::instruction_macros_traits::ProgramInstructionData for #struct_ident {
            const TAG: u8 = #enum_ident::#tag_variant as u8;
            const NAME: &'static str = #variant_name;
            const ACCOUNTS: &'static [::instruction_macros_traits::AccountRole] = &[
                #(#roles),*
            ];
            const PROGRAM_ID: ::instruction_macros_traits::Address = #program_id_path;
        }
    }
}
