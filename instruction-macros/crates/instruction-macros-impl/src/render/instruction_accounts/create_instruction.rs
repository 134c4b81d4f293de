//! Generates the methods that turn an accounts struct plus instruction data into an `Instruction`.

use proc_macro2::TokenStream;
use quote::quote;
use syn::Path;

use crate::parse::instruction_variant::InstructionVariant;

pub fn render_create_instruction(
    program_id_path: &Path,
    instruction_variant: &InstructionVariant,
) -> TokenStream {
    let data_ident = instruction_variant.instruction_data_struct_ident();
    let num_accounts = instruction_variant.accounts.len();
    let account_metas = instruction_variant
        .accounts
        .iter()
        .map(|acc| acc.render_account_meta());
    let (names, fields) = instruction_variant
        .accounts
        .iter()
        .map(|acc| (acc.name.as_str(), acc.field_ident()))
        .collect::<(Vec<_>, Vec<_>)>();

    quote! {
        #[inline(always)]
        pub fn create_account_metas(&self) -> [::instruction_macros_traits::AccountMeta; #num_accounts] {
            [ #(#account_metas),* ]
        }

        #[inline(always)]
        pub fn create_instruction(
            &self,
            data: &#data_ident,
        ) -> ::core::result::Result<::instruction_macros_traits::Instruction, ::instruction_macros_traits::EncodingError> {
            self.create_instruction_for(#program_id_path, data)
        }

        /// Same as `create_instruction`, for a deployment of the program at another address.
        pub fn create_instruction_for(
            &self,
            program_id: ::instruction_macros_traits::Address,
            data: &#data_ident,
        ) -> ::core::result::Result<::instruction_macros_traits::Instruction, ::instruction_macros_traits::EncodingError> {
            Ok(::instruction_macros_traits::Instruction {
                program_id,
                accounts: self.create_account_metas().to_vec(),
                data: ::instruction_macros_traits::ProgramInstructionData::pack(data)?,
            })
        }

        /// The same addresses keyed by role name, for [`ProgramInstructionData::build`].
        ///
        /// [`ProgramInstructionData::build`]: ::instruction_macros_traits::ProgramInstructionData::build
        pub fn to_binding(&self) -> ::instruction_macros_traits::AccountBinding {
            ::instruction_macros_traits::AccountBinding::new()
                #(.with(#names, self.#fields))*
        }
    }
}
