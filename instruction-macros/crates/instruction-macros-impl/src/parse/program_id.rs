//! See [`ProgramID`].

use syn::{
    DeriveInput,
    Path,
};

/// The path passed to `#[program_id(...)]`, e.g. `crate::program::ID`.
pub struct ProgramID(pub Path);

impl TryFrom<&DeriveInput> for ProgramID {
    type Error = syn::Error;

    fn try_from(input: &DeriveInput) -> Result<Self, Self::Error> {
        let mut attrs = input
            .attrs
            .iter()
            .filter(|attr| attr.path().is_ident("program_id"));

        let attr = attrs.next().ok_or_else(|| {
            syn::Error::new_spanned(
                &input.ident,
                "missing `#[program_id(path::to::ID)]` attribute",
            )
        })?;

        if let Some(duplicate) = attrs.next() {
            return Err(syn::Error::new_spanned(
                duplicate,
                "`#[program_id]` may only be specified once",
            ));
        }

        attr.parse_args::<Path>().map(ProgramID)
    }
}
