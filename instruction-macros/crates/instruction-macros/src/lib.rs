//! `#[derive(ProgramInstruction)]` and `#[derive(Layout)]`.
//!
//! The generated code depends on `instruction-macros-traits`; see that crate for the runtime
//! traits and the layout rules.

use instruction_macros_impl::{
    parse::{
        instruction_variant::parse_instruction_variants,
        layout_input::LayoutInput,
        parsed_enum::ParsedEnum,
    },
    path_audit::print_paths,
    render::{
        render_instruction_accounts,
        render_instruction_data,
        render_layout,
        render_registry,
        render_try_from_u8,
    },
};
use quote::quote;
use syn::{
    parse_macro_input,
    DeriveInput,
};

/// Derives the instruction registry for a `#[repr(u8)]` enum of actions.
///
/// Every variant needs an explicit, unique discriminant. Each variant declares its account
/// template with `#[account(index, [signer,] [writable,] name = "..", desc = "..")]` and its
/// arguments, in wire order, with `#[args(name: Type[, max_len = N], "description")]`.
///
/// For a variant `Swap` this generates `SwapInstructionData` (the argument record, implementing
/// `Layout` and `ProgramInstructionData`) and `SwapAccounts` (one address per role). The enum
/// itself gets `TryFrom<u8>` and `InstructionSet`.
#[proc_macro_derive(ProgramInstruction, attributes(account, args, program_id))]
pub fn instruction(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let parsed_enum = match ParsedEnum::new(input) {
        Ok(parsed) => parsed,
        Err(e) => return e.into_compile_error().into(),
    };
    let instruction_variants = match parse_instruction_variants(&parsed_enum) {
        Ok(variants) => variants,
        Err(e) => return e.into_compile_error().into(),
    };

    let try_from_u8 = render_try_from_u8(&parsed_enum, &instruction_variants);
    let registry = render_registry(&parsed_enum, &instruction_variants);
    let instruction_data = render_instruction_data(&parsed_enum, &instruction_variants);
    let accounts = render_instruction_accounts(&parsed_enum, &instruction_variants);

    if std::env::var("DEBUG_PATHS").is_ok() {
        let enum_name = parsed_enum.enum_ident.to_string();
        let program_root = program_id_root(&parsed_enum);
        print_paths(
            &[&try_from_u8, &registry, &instruction_data, &accounts],
            &[enum_name.as_str(), program_root.as_str()],
        );
    }

    quote! {
        #try_from_u8
        #registry
        #instruction_data
        #accounts
    }
    .into()
}

/// Derives `Layout` for a struct (a record) or an enum (a `u8`-tagged union).
///
/// Sequence fields may declare `#[layout(max_len = N)]`; longer values fail to encode and decode.
#[proc_macro_derive(Layout, attributes(layout))]
pub fn layout(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match LayoutInput::new(input) {
        Ok(parsed) => {
            let rendered = render_layout(&parsed);
            if std::env::var("DEBUG_PATHS").is_ok() {
                print_paths(&[&rendered], &[parsed.ident.to_string().as_str()]);
            }
            rendered.into()
        }
        Err(e) => e.into_compile_error().into(),
    }
}

fn program_id_root(parsed_enum: &ParsedEnum) -> String {
    parsed_enum
        .program_id_path
        .segments
        .first()
        .map(|segment| segment.ident.to_string())
        .unwrap_or_default()
}
