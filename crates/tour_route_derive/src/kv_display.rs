use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{Data, DeriveInput, Fields, LitStr, parse_macro_input, spanned::Spanned};

/// Renders a struct as aligned `key = value` lines for startup logging.
///
/// Fields render with `Display`; `#[kv(fmt = "opt")]` renders an `Option`
/// as its value or `-`.
pub fn derive_kv_display_inner(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    let struct_ident = input.ident.clone();

    let Data::Struct(data_struct) = &input.data else {
        return syn::Error::new(input.span(), "KvDisplay can only be derived for structs")
            .to_compile_error()
            .into();
    };
    let Fields::Named(fields) = &data_struct.fields else {
        return syn::Error::new(input.span(), "KvDisplay requires named fields")
            .to_compile_error()
            .into();
    };

    let mut entries: Vec<(String, proc_macro2::TokenStream)> = Vec::new();

    for field in &fields.named {
        let Some(field_ident) = &field.ident else {
            continue;
        };
        let key = field_ident.to_string();
        let mut fmt_mode = String::from("display");

        for attr in field.attrs.iter().filter(|a| a.path().is_ident("kv")) {
            let parsed = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("fmt") {
                    let lit: LitStr = meta.value()?.parse()?;
                    fmt_mode = lit.value();
                    Ok(())
                } else {
                    Err(meta.error("unsupported kv attribute; expected fmt"))
                }
            });
            if let Err(err) = parsed {
                return err.to_compile_error().into();
            }
        }

        let render = match fmt_mode.as_str() {
            "display" => quote! { format!("{}", self.#field_ident) },
            "opt" => quote! {
                match &self.#field_ident {
                    Some(value) => format!("{value}"),
                    None => String::from("-"),
                }
            },
            other => {
                return syn::Error::new(field.span(), format!("unsupported kv fmt mode: {other}"))
                    .to_compile_error()
                    .into();
            }
        };
        entries.push((key, render));
    }

    let width = entries.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    let lines = entries.iter().map(|(key, render)| {
        let padded = LitStr::new(&format!("{key:<width$}"), Span::call_site());
        quote! { write!(f, "\n\t{} = {}", #padded, #render)?; }
    });

    let expanded = quote! {
        impl std::fmt::Display for #struct_ident {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                #(#lines)*
                Ok(())
            }
        }
    };

    TokenStream::from(expanded)
}
