//! The instruction enum as `#[derive(ProgramInstruction)]` sees it once its outer attributes and
//! shape have been checked. Per-variant attributes are parsed separately, see
//! [`crate::parse::instruction_variant`].

use syn::{
    Data,
    DataEnum,
    DeriveInput,
    Ident,
    Path,
};

use crate::parse::{
    program_id::ProgramID,
    require_repr_u8::require_repr_u8,
};

pub struct ParsedEnum {
    pub enum_ident: Ident,
    pub data_enum: DataEnum,
    /// The `#[program_id(..)]` path generated code uses as the default program.
    pub program_id_path: Path,
}

impl ParsedEnum {
    /// Requires a `#[repr(u8)]` enum with exactly one `#[program_id(..)]`.
    pub fn new(input: DeriveInput) -> syn::Result<Self> {
        let ProgramID(program_id_path) = ProgramID::try_from(&input)?;
        require_repr_u8(&input)?;

        let Data::Enum(data_enum) = input.data else {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "`ProgramInstruction` can only be derived for enums",
            ));
        };

        Ok(Self {
            enum_ident: input.ident,
            data_enum,
            program_id_path,
        })
    }
}
