//! Ensures the instruction enum is `#[repr(u8)]`, so every discriminator fits the one tag byte.

use syn::DeriveInput;

pub fn require_repr_u8(input: &DeriveInput) -> syn::Result<()> {
    let mut is_u8 = false;
    for attr in input.attrs.iter().filter(|a| a.path().is_ident("repr")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("u8") {
                is_u8 = true;
            }
            Ok(())
        })?;
    }

    match is_u8 {
        true => Ok(()),
        false => Err(syn::Error::new_spanned(
            &input.ident,
            format!("`{}` must be `#[repr(u8)]`", input.ident),
        )),
    }
}
