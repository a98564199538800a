use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{Data, DeriveInput, Fields, LitStr, parse_macro_input, spanned::Spanned};

use crate::utils;

/// Generates `parse`, `as_str` and `Display` for a unit-only enum.
///
/// Variant names are matched in kebab case, case-insensitively. Extra
/// spellings can be added with `#[cli(alias = "...")]`.
pub fn derive_cli_value_inner(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    let enum_ident = input.ident.clone();

    let Data::Enum(data_enum) = input.data else {
        return syn::Error::new(input.span(), "CliValue can only be derived for enums")
            .to_compile_error()
            .into();
    };

    let mut option_name = utils::to_kebab_case(&enum_ident.to_string());
    for attr in input.attrs.iter().filter(|a| a.path().is_ident("cli_value")) {
        let parsed = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("option") {
                let lit: LitStr = meta.value()?.parse()?;
                option_name = lit.value();
                Ok(())
            } else {
                Err(meta.error("unsupported cli_value attribute; expected option = \"...\""))
            }
        });
        if let Err(err) = parsed {
            return err.to_compile_error().into();
        }
    }

    let mut parse_arms = Vec::new();
    let mut name_arms = Vec::new();
    let mut expected = Vec::new();

    for variant in data_enum.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return syn::Error::new(
                variant.span(),
                "CliValue only supports enums with unit variants",
            )
            .to_compile_error()
            .into();
        }

        let variant_ident = variant.ident;
        let canonical = utils::to_kebab_case(&variant_ident.to_string());
        let mut spellings: Vec<String> = Vec::new();

        for attr in variant.attrs.iter().filter(|a| a.path().is_ident("cli")) {
            let parsed = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("alias") {
                    let lit: LitStr = meta.value()?.parse()?;
                    spellings.push(lit.value().to_ascii_lowercase());
                    Ok(())
                } else {
                    Err(meta.error("unsupported cli attribute; expected alias = \"...\""))
                }
            });
            if let Err(err) = parsed {
                return err.to_compile_error().into();
            }
        }

        spellings.insert(0, canonical.to_ascii_lowercase());
        let spelling_lits: Vec<LitStr> = spellings
            .iter()
            .map(|s| LitStr::new(s, Span::call_site()))
            .collect();
        let canonical_lit = LitStr::new(&canonical, Span::call_site());

        parse_arms.push(quote! { #(#spelling_lits)|* => Ok(Self::#variant_ident), });
        name_arms.push(quote! { Self::#variant_ident => #canonical_lit, });
        expected.push(canonical);
    }

    let expected_lit = LitStr::new(&expected.join("|"), Span::call_site());
    let option_lit = LitStr::new(&option_name, Span::call_site());

    let expanded = quote! {
        impl #enum_ident {
            pub fn parse(raw: &str) -> crate::Result<Self> {
                match raw.trim().to_ascii_lowercase().as_str() {
                    #(#parse_arms)*
                    _ => Err(crate::Error::invalid_input(format!(
                        "Invalid value for --{}: {} (expected {})",
                        #option_lit,
                        raw,
                        #expected_lit
                    ))),
                }
            }

            pub fn as_str(&self) -> &'static str {
                match self {
                    #(#name_arms)*
                }
            }
        }

        impl std::fmt::Display for #enum_ident {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };

    TokenStream::from(expanded)
}
