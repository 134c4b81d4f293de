//! Renders the per-field statements shared by every generated `Layout` impl: size measurement,
//! encoding, decoding and descriptors.
//!
//! Generated bodies use the locals `dst`, `src` and `__cursor`; `__cursor` is the absolute offset
//! of the next byte to write or read.

use proc_macro2::{
    Literal,
    TokenStream,
};
use quote::quote;
use syn::{
    Ident,
    Type,
};

/// A field as the renderers see it, independent of whether it came from `#[args(..)]` or from a
/// struct/variant definition.
pub struct FieldSpec<'a> {
    /// Used in error paths and descriptors.
    pub name: &'a str,
    pub ty: &'a Type,
    pub max_len: Option<usize>,
    /// An expression of type `&T` reading the field while encoding.
    pub access: TokenStream,
    /// The local the decoded value is bound to.
    pub binding: &'a Ident,
    /// The enclosing variant, appended to error paths after the field name.
    pub variant: Option<&'a Ident>,
}

impl FieldSpec<'_> {
    fn error_context(&self) -> TokenStream {
        let name = self.name;
        match self.variant {
            Some(variant) => {
                let variant = variant.to_string();
                quote! { |e| e.within(#name).within(#variant) }
            }
            None => quote! { |e| e.within(#name) },
        }
    }

    /// `Layout::encoded_len(<access>)`
    pub fn len_term(&self) -> TokenStream {
        let access = &self.access;
        quote! { ::instruction_macros_traits::Layout::encoded_len(#access) }
    }

    pub fn encode_statement(&self) -> TokenStream {
        let access = &self.access;
        let context = self.error_context();
        let max_len_check = self.max_len.map(|max| {
            let max = Literal::usize_unsuffixed(max);
            quote! {
                ::instruction_macros_traits::check_max_len(#access, #max).map_err(#context)?;
            }
        });

        quote! {
            #max_len_check
            __cursor += ::instruction_macros_traits::Layout::encode_into(#access, dst, __cursor)
                .map_err(#context)?;
        }
    }

    pub fn decode_statement(&self) -> TokenStream {
        let ty = self.ty;
        let binding = self.binding;
        let context = self.error_context();
        let max_len_check = self.max_len.map(|max| {
            let max = Literal::usize_unsuffixed(max);
            quote! {
                ::instruction_macros_traits::check_decoded_max_len(&#binding, #max).map_err(#context)?;
            }
        });

        quote! {
            let (#binding, __read) =
                <#ty as ::instruction_macros_traits::Layout>::decode_from(src, __cursor)
                    .map_err(#context)?;
            #max_len_check
            __cursor += __read;
        }
    }

    pub fn describe(&self) -> TokenStream {
        let name = self.name;
        let ty = self.ty;
        let with_max_len = self.max_len.map(|max| {
            let max = Literal::usize_unsuffixed(max);
            quote! { .with_max_len(#max) }
        });
        quote! {
            ::instruction_macros_traits::FieldLayout::new(
                #name,
                <#ty as ::instruction_macros_traits::Layout>::describe(),
            )#with_max_len
        }
    }
}

/// `0 + len(a) + len(b) ...`
pub fn len_expression(fields: &[FieldSpec]) -> TokenStream {
    let terms = fields.iter().map(FieldSpec::len_term);
    quote! { 0 #(+ #terms)* }
}

#[cfg(test)]
mod tests {
    use quote::format_ident;
    use syn::parse_quote;

    use super::*;

    fn flat(tokens: TokenStream) -> String {
        tokens.to_string().replace(' ', "")
    }

    #[test]
    fn bounded_fields_check_their_length_first() {
        let ty: Type = parse_quote!(String);
        let binding = format_ident!("__f_memo");
        let spec = FieldSpec {
            name: "memo",
            ty: &ty,
            max_len: Some(32),
            access: quote! { &self.memo },
            binding: &binding,
            variant: None,
        };

        let encode = flat(spec.encode_statement());
        let check = encode.find("check_max_len(&self.memo,32)").unwrap();
        let write = encode.find("encode_into(&self.memo,dst,__cursor)").unwrap();
        assert!(check < write);

        let decode = flat(spec.decode_statement());
        assert!(decode.contains("<Stringas::instruction_macros_traits::Layout>::decode_from(src,__cursor)"));
        assert!(decode.contains("check_decoded_max_len(&__f_memo,32)"));
        assert!(flat(spec.describe()).ends_with(".with_max_len(32)"));
    }

    #[test]
    fn variant_fields_extend_the_path_with_the_variant() {
        let ty: Type = parse_quote!(u64);
        let binding = format_ident!("__f_amount_in");
        let variant = format_ident!("ExactIn");
        let spec = FieldSpec {
            name: "amount_in",
            ty: &ty,
            max_len: None,
            access: quote! { __f_amount_in },
            binding: &binding,
            variant: Some(&variant),
        };
        assert!(flat(spec.encode_statement()).contains(".within(\"amount_in\").within(\"ExactIn\")"));
    }

    #[test]
    fn empty_len_expression_is_zero() {
        assert_eq!(flat(len_expression(&[])), "0");
    }
}
