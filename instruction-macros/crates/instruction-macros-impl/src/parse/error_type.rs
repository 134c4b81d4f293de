//! The errors generated code can raise, as absolute paths into `instruction_macros_traits`.

use syn::{
    parse_quote,
    Ident,
    Path,
};

/// A fully qualified error variant in generated code, split so renderers can write either
/// `#base::#variant(..)` or `#base::#variant { .. }`.
#[derive(Debug, Clone)]
pub struct ErrorPath {
    /// e.g. `::instruction_macros_traits::DecodingErrorKind`
    pub base: Path,
    /// e.g. `UnknownDiscriminator`
    pub variant: Ident,
}

pub enum ErrorType {
    UnknownDiscriminator,
    InvalidVariantTag,
    MissingAccount,
}

impl ErrorType {
    pub fn to_path(&self) -> ErrorPath {
        match self {
            ErrorType::UnknownDiscriminator => ErrorPath {
                base: parse_quote!(::instruction_macros_traits::DecodingErrorKind),
                variant: parse_quote!(UnknownDiscriminator),
            },
            ErrorType::InvalidVariantTag => ErrorPath {
                base: parse_quote!(::instruction_macros_traits::DecodingErrorKind),
                variant: parse_quote!(InvalidVariantTag),
            },
            ErrorType::MissingAccount => ErrorPath {
                base: parse_quote!(::instruction_macros_traits::AccountError),
                variant: parse_quote!(MissingAccount),
            },
        }
    }
}
