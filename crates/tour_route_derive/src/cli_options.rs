use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{Data, DeriveInput, Fields, LitStr, Path, parse_macro_input, spanned::Spanned};

use crate::utils;

/// Generates `split_arg` and `apply_cli_option` for a struct of options.
///
/// Only fields carrying `#[cli(long = "...")]` are wired. `bool` fields act
/// as flags: `--name`, `--name=<bool>` and `--no-name` are all accepted.
/// `Option<T>` fields parse `T` and store `Some`.
pub fn derive_cli_options_inner(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    let struct_ident = input.ident.clone();

    let Data::Struct(data_struct) = &input.data else {
        return syn::Error::new(input.span(), "CliOptions can only be derived for structs")
            .to_compile_error()
            .into();
    };
    let Fields::Named(fields) = &data_struct.fields else {
        return syn::Error::new(input.span(), "CliOptions requires named fields")
            .to_compile_error()
            .into();
    };

    let mut arms = Vec::new();
    let mut flag_names = Vec::new();

    for field in &fields.named {
        let Some(field_ident) = &field.ident else {
            continue;
        };

        let mut long_name: Option<String> = None;
        let mut parse_with: Option<Path> = None;
        for attr in field.attrs.iter().filter(|a| a.path().is_ident("cli")) {
            let parsed = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("long") {
                    let lit: LitStr = meta.value()?.parse()?;
                    long_name = Some(lit.value());
                    Ok(())
                } else if meta.path.is_ident("parse_with") {
                    let lit: LitStr = meta.value()?.parse()?;
                    parse_with = Some(syn::parse_str(&lit.value())?);
                    Ok(())
                } else {
                    Err(meta.error("unsupported cli attribute; expected long/parse_with"))
                }
            });
            if let Err(err) = parsed {
                return err.to_compile_error().into();
            }
        }

        let Some(long_name) = long_name else {
            continue;
        };
        let long_lit = LitStr::new(&long_name, Span::call_site());

        if utils::is_bool(&field.ty) {
            let negated_lit = LitStr::new(&format!("no-{long_name}"), Span::call_site());
            flag_names.push(long_name);
            arms.push(quote! {
                #long_lit => {
                    self.#field_ident = match value.as_deref() {
                        None => true,
                        Some("1" | "true" | "yes" | "on") => true,
                        Some("0" | "false" | "no" | "off") => false,
                        Some(raw) => {
                            return Err(crate::Error::invalid_input(format!(
                                "Invalid boolean for --{name}: {raw} (expected true/false)"
                            )));
                        }
                    };
                    Ok(true)
                }
            });
            arms.push(quote! {
                #negated_lit => {
                    if value.is_some() {
                        return Err(crate::Error::invalid_input(format!(
                            "Flag --{name} does not take a value"
                        )));
                    }
                    self.#field_ident = false;
                    Ok(true)
                }
            });
            continue;
        }

        let assign = match utils::inner_of_option(&field.ty) {
            Some(inner) => {
                let parse_expr = utils::build_cli_parse_expr(inner, parse_with.as_ref());
                quote! { self.#field_ident = Some(#parse_expr); }
            }
            None => {
                let parse_expr = utils::build_cli_parse_expr(&field.ty, parse_with.as_ref());
                quote! { self.#field_ident = #parse_expr; }
            }
        };

        arms.push(quote! {
            #long_lit => {
                let raw = value.ok_or_else(|| {
                    crate::Error::invalid_input(format!("Missing value for --{name}"))
                })?;
                #assign
                Ok(true)
            }
        });
    }

    let flag_lits: Vec<LitStr> = flag_names
        .iter()
        .map(|n| LitStr::new(n, Span::call_site()))
        .collect();
    let known_flag = if flag_lits.is_empty() {
        quote! { false }
    } else {
        quote! { matches!(raw_name, #(#flag_lits)|*) }
    };

    let expanded = quote! {
        impl #struct_ident {
            /// Splits `name=value` or consumes the next non-option argument as the value.
            fn split_arg(
                raw_name: &str,
                args: &mut std::iter::Peekable<impl Iterator<Item = String>>,
            ) -> (String, Option<String>) {
                if let Some((k, v)) = raw_name.split_once('=') {
                    return (k.to_string(), Some(v.to_string()));
                }
                let is_flag = #known_flag || raw_name.starts_with("no-");
                if is_flag {
                    return (raw_name.to_string(), None);
                }
                let value = match args.peek() {
                    Some(next) if !next.starts_with("--") => args.next(),
                    _ => None,
                };
                (raw_name.to_string(), value)
            }

            /// Returns `Ok(false)` when `name` is not a known option.
            fn apply_cli_option(
                &mut self,
                name: &str,
                value: Option<String>,
            ) -> crate::Result<bool> {
                match name {
                    #(#arms,)*
                    _ => Ok(false),
                }
            }
        }
    };

    TokenStream::from(expanded)
}
