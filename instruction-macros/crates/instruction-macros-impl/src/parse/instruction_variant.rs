//! See [`InstructionVariant`] and [`parse_instruction_variants`].

use std::collections::HashMap;

use quote::format_ident;
use syn::{
    Expr,
    ExprLit,
    Fields,
    Ident,
    Lit,
    Variant,
};

use crate::parse::{
    instruction_account::InstructionAccount,
    instruction_argument::InstructionArgument,
    parsed_enum::ParsedEnum,
};

/// One enum variant: an action with its discriminator, account template and argument record.
#[derive(Debug, Clone)]
pub struct InstructionVariant {
    pub variant_name: Ident,
    pub discriminant: u8,
    /// Sorted by account index, which is also template order.
    pub accounts: Vec<InstructionAccount>,
    /// Declaration order, which is also wire order.
    pub arguments: Vec<InstructionArgument>,
}

impl InstructionVariant {
    pub fn instruction_data_struct_ident(&self) -> Ident {
        format_ident!("{}InstructionData", self.variant_name)
    }

    pub fn accounts_struct_ident(&self) -> Ident {
        format_ident!("{}Accounts", self.variant_name)
    }
}

pub fn parse_instruction_variants(parsed_enum: &ParsedEnum) -> syn::Result<Vec<InstructionVariant>> {
    let variants = parsed_enum
        .data_enum
        .variants
        .iter()
        .map(parse_variant)
        .collect::<syn::Result<Vec<_>>>()?;

    let mut seen = HashMap::new();
    for (variant, parsed) in parsed_enum.data_enum.variants.iter().zip(&variants) {
        if let Some(first) = seen.insert(parsed.discriminant, &parsed.variant_name) {
            return Err(syn::Error::new_spanned(
                variant,
                format!(
                    "discriminant {} is already used by `{first}`",
                    parsed.discriminant
                ),
            ));
        }
    }

    Ok(variants)
}

fn parse_variant(variant: &Variant) -> syn::Result<InstructionVariant> {
    if !matches!(variant.fields, Fields::Unit) {
        return Err(syn::Error::new_spanned(
            &variant.fields,
            "instruction variants must be unit variants; declare arguments with `#[args(..)]`",
        ));
    }

    let discriminant = match &variant.discriminant {
        Some((
            _,
            Expr::Lit(ExprLit {
                lit: Lit::Int(int), ..
            }),
        )) => int.base10_parse::<u8>()?,
        Some((_, expr)) => {
            return Err(syn::Error::new_spanned(
                expr,
                "discriminant must be an integer literal",
            ))
        }
        None => {
            return Err(syn::Error::new_spanned(
                variant,
                format!(
                    "`{}` needs an explicit discriminant, e.g. `{} = 0`",
                    variant.ident, variant.ident
                ),
            ))
        }
    };

    let mut accounts = variant
        .attrs
        .iter()
        .filter(|attr| attr.path().is_ident("account"))
        .map(|attr| attr.parse_args::<InstructionAccount>())
        .collect::<syn::Result<Vec<_>>>()?;
    accounts.sort_by_key(|acc| acc.index);

    for (expected, acc) in accounts.iter().enumerate() {
        if acc.index as usize != expected {
            return Err(syn::Error::new(
                acc.span,
                format!("expected account index {expected}, found {}", acc.index),
            ));
        }
    }

    let mut names = HashMap::new();
    for acc in &accounts {
        if names.insert(acc.field_ident().to_string(), &acc.name).is_some() {
            return Err(syn::Error::new(
                acc.span,
                format!("duplicate account name `{}`", acc.name),
            ));
        }
    }

    let arguments = variant
        .attrs
        .iter()
        .filter(|attr| attr.path().is_ident("args"))
        .map(|attr| attr.parse_args::<InstructionArgument>())
        .collect::<syn::Result<Vec<_>>>()?;

    let mut arg_names = HashMap::new();
    for arg in &arguments {
        if arg_names.insert(arg.name.to_string(), ()).is_some() {
            return Err(syn::Error::new_spanned(
                &arg.name,
                format!("duplicate argument `{}`", arg.name),
            ));
        }
    }

    Ok(InstructionVariant {
        variant_name: variant.ident.clone(),
        discriminant,
        accounts,
        arguments,
    })
}
