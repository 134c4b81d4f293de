//! Checks that generated code names everything through paths that resolve wherever the derive is
//! expanded. Run `DEBUG_PATHS=1 cargo expand 1>/dev/null` to list them for a crate.

use std::collections::BTreeSet;

use proc_macro2::TokenStream;
use quote::{
    quote,
    ToTokens,
};
use syn::{
    visit::Visit,
    Attribute,
    File,
    Path,
};

#[derive(Default)]
struct PathCollector {
    paths: BTreeSet<String>,
    unanchored: BTreeSet<String>,
    roots: Vec<String>,
}

impl PathCollector {
    fn is_anchored(&self, path: &Path) -> bool {
        if path.leading_colon.is_some() {
            return true;
        }
        let Some(first) = path.segments.first() else {
            return true;
        };
        let first = first.ident.to_string();
        first == "Self" || self.roots.contains(&first)
    }
}

impl<'ast> Visit<'ast> for PathCollector {
    // Doc links and lint names are not resolved against the caller's scope.
    fn visit_attribute(&mut self, _attr: &'ast Attribute) {}

    fn visit_path(&mut self, path: &'ast Path) {
        if path.segments.len() > 1 {
            let flat = path.to_token_stream().to_string().replace(' ', "");
            if !self.is_anchored(path) {
                self.unanchored.insert(flat.clone());
            }
            self.paths.insert(flat);
        }
        syn::visit::visit_path(self, path);
    }
}

/// Item lists parse as a file; anything else is retried inside a throwaway module.
fn parse_as_file(tokens: &TokenStream) -> syn::Result<File> {
    syn::parse2::<File>(tokens.clone()).or_else(|_| syn::parse2(quote! { mod __audit { #tokens } }))
}

fn collect(streams: &[&TokenStream], roots: &[&str]) -> syn::Result<PathCollector> {
    let mut collector = PathCollector {
        roots: roots.iter().map(|root| root.to_string()).collect(),
        ..Default::default()
    };
    for tokens in streams {
        collector.visit_file(&parse_as_file(tokens)?);
    }
    Ok(collector)
}

/// Every multi-segment path in `streams` that neither starts with `::` nor with `Self` or one of
/// `roots` (the deriving type and the paths the caller wrote, such as `crate`).
pub fn unanchored_paths(streams: &[&TokenStream], roots: &[&str]) -> syn::Result<Vec<String>> {
    Ok(collect(streams, roots)?.unanchored.into_iter().collect())
}

/// Prints each distinct multi-segment path in `streams` to stderr, flagging the unanchored ones.
pub fn print_paths(streams: &[&TokenStream], roots: &[&str]) {
    let collector = match collect(streams, roots) {
        Ok(collector) => collector,
        Err(e) => {
            eprintln!("could not parse generated tokens: {e}");
            return;
        }
    };
    for path in &collector.paths {
        let mark = if collector.unanchored.contains(path) { "!" } else { " " };
        eprintln!("{mark} {path}");
    }
}

#[cfg(test)]
mod tests {
    use syn::parse_quote;

    use super::*;
    use crate::{
        parse::{
            instruction_variant::parse_instruction_variants,
            layout_input::LayoutInput,
            parsed_enum::ParsedEnum,
        },
        render::{
            render_instruction_accounts,
            render_instruction_data,
            render_layout,
            render_registry,
            render_try_from_u8,
        },
    };

    #[test]
    fn flags_relative_paths_only() {
        let tokens = quote! {
            fn f() {
                let _ = ::core::mem::size_of::<u8>();
                let _ = Self::X;
                let _ = Ix::Swap;
                let _ = helpers::encode();
            }
        };
        assert_eq!(unanchored_paths(&[&tokens], &["Ix"]).unwrap(), vec!["helpers::encode"]);
    }

    #[test]
    fn program_instruction_output_is_anchored() {
        let parsed = ParsedEnum::new(parse_quote! {
            #[repr(u8)]
            #[program_id(crate::ID)]
            enum Ix {
                #[account(0, signer, name = "trader", desc = "Trader.")]
                #[account(1, writable, name = "quote_vault", desc = "Vault.")]
                #[args(amount: u64, "Amount.")]
                #[args(memo: String, max_len = 8, "Memo.")]
                Swap = 0,
                Log = 2,
            }
        })
        .unwrap();
        let variants = parse_instruction_variants(&parsed).unwrap();
        let rendered = [
            render_try_from_u8(&parsed, &variants),
            render_registry(&parsed, &variants),
            render_instruction_data(&parsed, &variants),
            render_instruction_accounts(&parsed, &variants),
        ];
        let streams = rendered.iter().collect::<Vec<_>>();
        assert_eq!(unanchored_paths(&streams, &["Ix", "crate"]).unwrap(), Vec::<String>::new());
    }

    #[test]
    fn layout_output_is_anchored() {
        let record = render_layout(
            &LayoutInput::new(parse_quote! {
                struct Fill { price: u64, size: u64 }
            })
            .unwrap(),
        );
        let tagged = render_layout(
            &LayoutInput::new(parse_quote! {
                enum Side { Bid, Ask }
            })
            .unwrap(),
        );
        assert_eq!(
            unanchored_paths(&[&record, &tagged], &["Fill", "Side"]).unwrap(),
            Vec::<String>::new()
        );
    }
}
