//! Renders `impl Layout` for a `#[derive(Layout)]` struct or enum.
//!
//! Structs are records: fields in declaration order, no padding. Enums are tagged unions: a `u8`
//! tag (the variant's literal discriminant, or declaration order) followed by the variant's
//! fields.

use proc_macro2::{
    Literal,
    TokenStream,
};
use quote::quote;
use syn::Ident;

use crate::{
    parse::{
        error_type::{
            ErrorPath,
            ErrorType,
        },
        layout_input::{
            FieldsStyle,
            LayoutBody,
            LayoutFields,
            LayoutInput,
            LayoutVariant,
        },
    },
    render::field_statements::{
        len_expression,
        FieldSpec,
    },
};

pub fn render(input: &LayoutInput) -> TokenStream {
    let ident = &input.ident;
    let body = match &input.body {
        LayoutBody::Record(fields) => render_record(ident, fields),
        LayoutBody::Variants(variants) => render_variants(ident, variants),
    };

    quote! {
        #[automatically_derived]
        impl ::instruction_macros_traits::Layout for #ident {
            #body
        }
    }
}

fn render_record(ident: &Ident, fields: &LayoutFields) -> TokenStream {
    let specs = fields
        .fields
        .iter()
        .map(|f| {
            let member = &f.member;
            FieldSpec {
                name: &f.name,
                ty: &f.ty,
                max_len: f.max_len,
                access: quote! { &self.#member },
                binding: &f.binding,
                variant: None,
            }
        })
        .collect::<Vec<_>>();

    let name = ident.to_string();
    let len = len_expression(&specs);
    let encode = specs.iter().map(FieldSpec::encode_statement);
    let decode = specs.iter().map(FieldSpec::decode_statement);
    let describe = specs.iter().map(FieldSpec::describe);
    let construct = construct(quote! { Self }, fields);

    quote! {
        #[inline]
        fn encoded_len(&self) -> usize {
            #len
        }

        #[allow(unused_mut, unused_variables)]
        fn encode_into(
            &self,
            dst: &mut [u8],
            offset: usize,
        ) -> ::core::result::Result<usize, ::instruction_macros_traits::EncodingError> {
            let mut __cursor = offset;
            #(#encode)*
            Ok(__cursor - offset)
        }

        #[allow(unused_mut, unused_variables)]
        fn decode_from(
            src: &[u8],
            offset: usize,
        ) -> ::core::result::Result<(Self, usize), ::instruction_macros_traits::DecodingError> {
            let mut __cursor = offset;
            #(#decode)*
            Ok((#construct, __cursor - offset))
        }

        fn describe() -> ::instruction_macros_traits::LayoutKind {
            ::instruction_macros_traits::LayoutKind::Record {
                name: #name,
                fields: ::std::vec![#(#describe),*],
            }
        }
    }
}

fn render_variants(ident: &Ident, variants: &[LayoutVariant]) -> TokenStream {
    let name = ident.to_string();

    let mut len_arms = Vec::with_capacity(variants.len());
    let mut encode_arms = Vec::with_capacity(variants.len());
    let mut decode_arms = Vec::with_capacity(variants.len());
    let mut describe_variants = Vec::with_capacity(variants.len());

    for variant in variants {
        let variant_ident = &variant.ident;
        let variant_name = variant_ident.to_string();
        let tag = Literal::u8_unsuffixed(variant.tag);
        let specs = variant
            .fields
            .fields
            .iter()
            .map(|f| {
                let binding = &f.binding;
                FieldSpec {
                    name: &f.name,
                    ty: &f.ty,
                    max_len: f.max_len,
                    access: quote! { #binding },
                    binding,
                    variant: Some(variant_ident),
                }
            })
            .collect::<Vec<_>>();

        let pattern = construct(quote! { Self::#variant_ident }, &variant.fields);
        let len = len_expression(&specs);
        let encode = specs.iter().map(FieldSpec::encode_statement);
        let decode = specs.iter().map(FieldSpec::decode_statement);
        let describe = specs.iter().map(FieldSpec::describe);

        len_arms.push(quote! { #pattern => 1 + #len, });
        encode_arms.push(quote! {
            #pattern => {
                __cursor += ::instruction_macros_traits::write_bytes(dst, __cursor, &[#tag])?;
                #(#encode)*
            }
        });
        decode_arms.push(quote! {
            #tag => {
                #(#decode)*
                #pattern
            }
        });
        describe_variants.push(quote! {
            ::instruction_macros_traits::VariantLayout {
                name: #variant_name,
                tag: #tag,
                fields: ::std::vec![#(#describe),*],
            }
        });
    }

    let ErrorPath { base, variant } = ErrorType::InvalidVariantTag.to_path();

    quote! {
        #[inline]
        fn encoded_len(&self) -> usize {
            match self {
                #(#len_arms)*
            }
        }

        fn encode_into(
            &self,
            dst: &mut [u8],
            offset: usize,
        ) -> ::core::result::Result<usize, ::instruction_macros_traits::EncodingError> {
            let mut __cursor = offset;
            match self {
                #(#encode_arms)*
            }
            Ok(__cursor - offset)
        }

        #[allow(unused_mut)]
        fn decode_from(
            src: &[u8],
            offset: usize,
        ) -> ::core::result::Result<(Self, usize), ::instruction_macros_traits::DecodingError> {
            let [__tag] = ::instruction_macros_traits::read_bytes::<1>(src, offset)?;
            let mut __cursor = offset + 1;
            let value = match __tag {
                #(#decode_arms)*
                _ => return Err(#base::#variant { tag: __tag, type_name: #name }.into()),
            };
            Ok((value, __cursor - offset))
        }

        fn describe() -> ::instruction_macros_traits::LayoutKind {
            ::instruction_macros_traits::LayoutKind::Variants {
                name: #name,
                variants: ::std::vec![#(#describe_variants),*],
            }
        }
    }
}

/// `Path { a: __f_a, .. }`, `Path(__f_0, ..)` or `Path`: both the destructuring pattern used while
/// encoding and the constructor used after decoding.
fn construct(path: TokenStream, fields: &LayoutFields) -> TokenStream {
    let bindings = fields.fields.iter().map(|f| &f.binding);
    match fields.style {
        FieldsStyle::Named => {
            let members = fields.fields.iter().map(|f| &f.member);
            quote! { #path { #(#members: #bindings),* } }
        }
        FieldsStyle::Unnamed => quote! { #path(#(#bindings),*) },
        FieldsStyle::Unit => path,
    }
}
