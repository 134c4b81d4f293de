//! Renders each variant's `{Variant}Accounts` struct: one address field per role, in template
//! order.

mod account_loader;
mod account_meta;
mod create_instruction;

use account_loader::render_account_loader;
use create_instruction::render_create_instruction;
use proc_macro2::TokenStream;
use quote::quote;

use crate::parse::{
    instruction_variant::InstructionVariant,
    parsed_enum::ParsedEnum,
};

pub fn render(parsed_enum: &ParsedEnum, instruction_variants: &[InstructionVariant]) -> TokenStream {
    instruction_variants
        .iter()
        .map(|instruction_variant| {
            let struct_ident = instruction_variant.accounts_struct_ident();
            let doc = format!(
                " Accounts for `{}::{}`, in the order the program reads them.",
                parsed_enum.enum_ident, instruction_variant.variant_name
            );
            let fields = instruction_variant.accounts.iter().map(|acc| {
                let field = acc.field_ident();
                let flags = match (acc.is_signer, acc.is_writable) {
                    (true, true) => "writable, signer",
                    (true, false) => "signer",
                    (false, true) => "writable",
                    (false, false) => "readonly",
                };
                let field_doc = format!(" `{}` ({flags}): {}", acc.name, acc.desc);
                quote! {
                    #[doc = #field_doc]
                    pub #field: ::instruction_macros_traits::Address
                }
            });
            let loader = render_account_loader(instruction_variant);
            let create_instruction =
                render_create_instruction(&parsed_enum.program_id_path, instruction_variant);

            quote! {
                #[doc = #doc]
                #[derive(Clone, Copy, Debug, PartialEq, Eq)]
                pub struct #struct_ident {
                    #(#fields),*
                }

                impl #struct_ident {
                    #loader
                    #create_instruction
                }
            }
        })
        .collect()
}
