//! See [`InstructionArgument`].

use syn::{
    parse::{
        Parse,
        ParseStream,
    },
    Ident,
    LitInt,
    LitStr,
    Token,
    Type,
};

/// One `#[args(name: Type, "description")]` attribute.
///
/// Sequence fields may bound their length: `#[args(memo: String, max_len = 32, "A memo.")]`.
#[derive(Debug, Clone)]
pub struct InstructionArgument {
    pub name: Ident,
    pub ty: Type,
    pub max_len: Option<usize>,
    pub description: String,
}

impl Parse for InstructionArgument {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let name: Ident = input.parse()?;
        input.parse::<Token![:]>()?;
        let ty: Type = input.parse()?;

        let mut max_len = None;
        let mut description = String::new();

        while input.peek(Token![,]) {
            input.parse::<Token![,]>()?;
            if input.is_empty() {
                break;
            }
            if input.peek(LitStr) {
                description = input.parse::<LitStr>()?.value();
                continue;
            }
            let key: Ident = input.parse()?;
            if key != "max_len" || max_len.is_some() {
                return Err(syn::Error::new_spanned(
                    &key,
                    "expected `max_len = N` or a description string",
                ));
            }
            input.parse::<Token![=]>()?;
            max_len = Some(input.parse::<LitInt>()?.base10_parse::<usize>()?);
        }

        if !input.is_empty() {
            return Err(input.error("unexpected tokens after argument"));
        }

        Ok(Self {
            name,
            ty,
            max_len,
            description,
        })
    }
}
