//! See [`InstructionAccount::render_account_meta`].

use proc_macro2::TokenStream;
use quote::{
    format_ident,
    quote,
};

use crate::parse::instruction_account::InstructionAccount;

impl InstructionAccount {
    /// Generates the `AccountMeta` constructor for one role, reading the address off `self`.
    pub fn render_account_meta(&self) -> TokenStream {
        let field_ident = self.field_ident();
        let ctor_method = match self.is_writable {
            true => quote! { new },
            false => quote! { new_readonly },
        };
        let is_signer = format_ident!("{}", self.is_signer);
        quote! { ::instruction_macros_traits::AccountMeta::#ctor_method(self.#field_ident, #is_signer) }
    }
}
