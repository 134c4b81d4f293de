//! Generates `load_accounts`, which structures an instruction's ordered account addresses back into
//! the variant's accounts struct.

use proc_macro2::TokenStream;
use quote::quote;

use crate::parse::{
    error_type::{
        ErrorPath,
        ErrorType,
    },
    instruction_variant::InstructionVariant,
};

/// Render the account loader function.
///
/// Addresses past the template's length are ignored. A short slice fails with the first role that
/// has no address.
pub fn render_account_loader(instruction_variant: &InstructionVariant) -> TokenStream {
    let data_ident = instruction_variant.instruction_data_struct_ident();
    let accounts = instruction_variant
        .accounts
        .iter()
        .map(|acc| acc.field_ident())
        .collect::<Vec<_>>();

    let ErrorPath { base, variant } = ErrorType::MissingAccount.to_path();

    let body = match accounts.is_empty() {
        true => quote! {
            let _ = accounts;
            Ok(Self {})
        },
        false => quote! {
            let [ #(#accounts,)* .. ] = accounts else {
                let role = <#data_ident as ::instruction_macros_traits::ProgramInstructionData>::ACCOUNTS
                    .get(accounts.len())
                    .map_or("", |role| role.name);
                return Err(#base::#variant { role: role.to_string() });
            };

            Ok(Self {
                #(#accounts: *#accounts),*
            })
        },
    };

    quote! {
        #[inline(always)]
        pub fn load_accounts(
            accounts: &[::instruction_macros_traits::Address],
        ) -> ::core::result::Result<Self, ::instruction_macros_traits::AccountError> {
            #body
        }
    }
}
