//! The in-memory model for `#[derive(Layout)]` on records (structs) and tagged unions (enums).

use std::collections::HashMap;

use quote::format_ident;
use syn::{
    Data,
    DeriveInput,
    Expr,
    ExprLit,
    Fields,
    Ident,
    Lit,
    LitInt,
    Member,
    Type,
};

pub struct LayoutInput {
    pub ident: Ident,
    pub body: LayoutBody,
}

pub enum LayoutBody {
    Record(LayoutFields),
    Variants(Vec<LayoutVariant>),
}

pub struct LayoutVariant {
    pub ident: Ident,
    pub tag: u8,
    pub fields: LayoutFields,
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum FieldsStyle {
    Named,
    Unnamed,
    Unit,
}

pub struct LayoutFields {
    pub style: FieldsStyle,
    pub fields: Vec<LayoutField>,
}

pub struct LayoutField {
    /// `self.<member>` for records.
    pub member: Member,
    /// The local binding used when destructuring a variant or decoding. Prefixed so fields named
    /// like the generated parameters (`src`, `dst`, `offset`) don't shadow them.
    pub binding: Ident,
    /// The name used in error paths and descriptors: the field name, or its position.
    pub name: String,
    pub ty: Type,
    pub max_len: Option<usize>,
}

impl LayoutInput {
    pub fn new(input: DeriveInput) -> syn::Result<Self> {
        if !input.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &input.generics,
                "`Layout` can't be derived for generic types",
            ));
        }

        let body = match input.data {
            Data::Struct(data) => LayoutBody::Record(LayoutFields::new(&data.fields)?),
            Data::Enum(data) => {
                let mut next_tag = 0u16;
                let mut seen = HashMap::new();
                let mut variants = Vec::with_capacity(data.variants.len());
                for variant in &data.variants {
                    let tag = match &variant.discriminant {
                        Some((
                            _,
                            Expr::Lit(ExprLit {
                                lit: Lit::Int(int), ..
                            }),
                        )) => int.base10_parse::<u8>()?,
                        Some((_, expr)) => {
                            return Err(syn::Error::new_spanned(
                                expr,
                                "variant tag must be an integer literal",
                            ))
                        }
                        None => u8::try_from(next_tag).map_err(|_| {
                            syn::Error::new_spanned(variant, "more than 256 variants")
                        })?,
                    };
                    if let Some(first) = seen.insert(tag, variant.ident.clone()) {
                        return Err(syn::Error::new_spanned(
                            variant,
                            format!("tag {tag} is already used by `{first}`"),
                        ));
                    }
                    next_tag = tag as u16 + 1;
                    variants.push(LayoutVariant {
                        ident: variant.ident.clone(),
                        tag,
                        fields: LayoutFields::new(&variant.fields)?,
                    });
                }
                LayoutBody::Variants(variants)
            }
            Data::Union(_) => {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "`Layout` can't be derived for unions",
                ))
            }
        };

        Ok(Self {
            ident: input.ident,
            body,
        })
    }
}

impl LayoutFields {
    fn new(fields: &Fields) -> syn::Result<Self> {
        let style = match fields {
            Fields::Named(_) => FieldsStyle::Named,
            Fields::Unnamed(_) => FieldsStyle::Unnamed,
            Fields::Unit => FieldsStyle::Unit,
        };

        let fields = fields
            .iter()
            .enumerate()
            .map(|(i, field)| {
                let (member, name) = match &field.ident {
                    Some(ident) => (Member::from(ident.clone()), ident.to_string()),
                    None => (Member::from(i), i.to_string()),
                };
                Ok(LayoutField {
                    member,
                    binding: format_ident!("__f_{}", name),
                    name,
                    ty: field.ty.clone(),
                    max_len: parse_max_len(&field.attrs)?,
                })
            })
            .collect::<syn::Result<Vec<_>>>()?;

        Ok(Self { style, fields })
    }
}

fn parse_max_len(attrs: &[syn::Attribute]) -> syn::Result<Option<usize>> {
    let mut max_len = None;
    for attr in attrs.iter().filter(|a| a.path().is_ident("layout")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("max_len") && max_len.is_none() {
                let lit: LitInt = meta.value()?.parse()?;
                max_len = Some(lit.base10_parse::<usize>()?);
                Ok(())
            } else {
                Err(meta.error("expected a single `max_len = N`"))
            }
        })?;
    }
    Ok(max_len)
}

#[cfg(test)]
mod tests {
    use syn::parse_quote;

    use super::*;

    #[test]
    fn record_fields_keep_declaration_order() {
        let input = LayoutInput::new(parse_quote! {
            struct Order {
                price: u64,
                #[layout(max_len = 8)]
                memo: String,
            }
        })
        .unwrap();
        let LayoutBody::Record(fields) = input.body else {
            panic!("expected a record");
        };
        assert!(fields.style == FieldsStyle::Named);
        assert_eq!(fields.fields[0].name, "price");
        assert_eq!(fields.fields[1].max_len, Some(8));
    }

    #[test]
    fn variant_tags_follow_declaration_and_literals() {
        let input = LayoutInput::new(parse_quote! {
            enum SwapType {
                ExactIn { amount_in: u64, min_amount_out: u64 },
                ExactOut(u64, u64),
                Nothing,
            }
        })
        .unwrap();
        let LayoutBody::Variants(variants) = input.body else {
            panic!("expected variants");
        };
        assert_eq!(variants.iter().map(|v| v.tag).collect::<Vec<_>>(), [0, 1, 2]);
        assert!(variants[1].fields.style == FieldsStyle::Unnamed);
        assert_eq!(variants[1].fields.fields[1].name, "1");
        assert_eq!(variants[1].fields.fields[1].binding, "__f_1");

        let input = LayoutInput::new(parse_quote! {
            enum Side { Bid = 0, Ask = 1 }
        })
        .unwrap();
        assert!(matches!(input.body, LayoutBody::Variants(v) if v[1].tag == 1));
    }

    #[test]
    fn rejects_duplicate_tags_and_generics() {
        assert!(LayoutInput::new(parse_quote! { enum A { X = 1, Y = 1 } }).is_err());
        assert!(LayoutInput::new(parse_quote! { enum A { X = 1, Y = 0, Z } }).is_err());
        assert!(LayoutInput::new(parse_quote! { struct A<T> { t: T } }).is_err());
    }
}
