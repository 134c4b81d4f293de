//! See [`InstructionAccount`].

use syn::{
    parse::{
        Parse,
        ParseStream,
    },
    Ident,
    LitInt,
    LitStr,
    Token,
};

use crate::parse::case::to_snake_case;

/// One `#[account(idx, signer, writable, name = "..", desc = "..")]` attribute.
///
/// `signer` and `writable` are optional flags in any order; `name` is required.
#[derive(Debug, Clone)]
pub struct InstructionAccount {
    pub index: u8,
    /// The role name exactly as written, e.g. `quoteVault`.
    pub name: String,
    pub is_signer: bool,
    pub is_writable: bool,
    pub desc: String,
    pub span: proc_macro2::Span,
}

impl InstructionAccount {
    /// The generated struct field for this role, e.g. `quote_vault`.
    pub fn field_ident(&self) -> Ident {
        Ident::new(&to_snake_case(&self.name), self.span)
    }
}

impl Parse for InstructionAccount {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let index_lit: LitInt = input.parse()?;
        let index = index_lit.base10_parse::<u8>()?;
        let span = index_lit.span();

        let mut name = None;
        let mut desc = None;
        let mut is_signer = false;
        let mut is_writable = false;

        while !input.is_empty() {
            input.parse::<Token![,]>()?;
            if input.is_empty() {
                break;
            }
            let key: Ident = input.parse()?;
            match key.to_string().as_str() {
                "signer" if !is_signer => is_signer = true,
                "writable" if !is_writable => is_writable = true,
                "name" if name.is_none() => {
                    input.parse::<Token![=]>()?;
                    name = Some(input.parse::<LitStr>()?);
                }
                "desc" if desc.is_none() => {
                    input.parse::<Token![=]>()?;
                    desc = Some(input.parse::<LitStr>()?.value());
                }
                "signer" | "writable" | "name" | "desc" => {
                    return Err(syn::Error::new_spanned(&key, format!("duplicate `{key}`")));
                }
                _ => {
                    return Err(syn::Error::new_spanned(
                        &key,
                        "expected one of `signer`, `writable`, `name`, `desc`",
                    ));
                }
            }
        }

        let name = name.ok_or_else(|| syn::Error::new(span, "missing `name = \"...\"`"))?;
        let name_value = name.value();
        if to_snake_case(&name_value).is_empty()
            || syn::parse_str::<Ident>(&to_snake_case(&name_value)).is_err()
        {
            return Err(syn::Error::new_spanned(
                &name,
                "account name must convert to a valid identifier",
            ));
        }

        Ok(Self {
            index,
            name: name_value,
            is_signer,
            is_writable,
            desc: desc.unwrap_or_default(),
            span: name.span(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags_in_any_order() {
        let acc: InstructionAccount =
            syn::parse_str(r#"3, writable, signer, name = "quoteVault", desc = "The vault.""#)
                .unwrap();
        assert_eq!(acc.index, 3);
        assert_eq!(acc.name, "quoteVault");
        assert_eq!(acc.field_ident(), "quote_vault");
        assert!(acc.is_signer && acc.is_writable);
        assert_eq!(acc.desc, "The vault.");
    }

    #[test]
    fn readonly_by_default() {
        let acc: InstructionAccount = syn::parse_str(r#"0, name = "mint""#).unwrap();
        assert!(!acc.is_signer && !acc.is_writable);
        assert!(acc.desc.is_empty());
    }

    #[test]
    fn rejects_bad_input() {
        assert!(syn::parse_str::<InstructionAccount>(r#"0, signer"#).is_err());
        assert!(syn::parse_str::<InstructionAccount>(r#"0, signer, signer, name = "a""#).is_err());
        assert!(syn::parse_str::<InstructionAccount>(r#"0, mutable, name = "a""#).is_err());
        assert!(syn::parse_str::<InstructionAccount>(r#"256, name = "a""#).is_err());
    }
}
