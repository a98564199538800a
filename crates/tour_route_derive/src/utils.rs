use quote::quote;
use syn::{
    AngleBracketedGenericArguments, GenericArgument, Path, PathArguments, Type, TypePath,
};

pub fn to_kebab_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for (idx, ch) in s.chars().enumerate() {
        match ch {
            'A'..='Z' => {
                if idx != 0 {
                    out.push('-');
                }
                out.push(ch.to_ascii_lowercase());
            }
            '_' => out.push('-'),
            _ => out.push(ch),
        }
    }
    out
}

fn last_segment_is(ty: &Type, name: &str) -> bool {
    matches!(
        ty,
        Type::Path(TypePath { path, qself: None })
            if path.segments.last().is_some_and(|seg| seg.ident == name)
    )
}

pub fn is_bool(ty: &Type) -> bool {
    last_segment_is(ty, "bool")
}

pub fn inner_of_option(ty: &Type) -> Option<&Type> {
    if !last_segment_is(ty, "Option") {
        return None;
    }
    let Type::Path(TypePath { path, .. }) = ty else {
        return None;
    };
    let seg = path.segments.last()?;
    let PathArguments::AngleBracketed(AngleBracketedGenericArguments { args, .. }) =
        &seg.arguments
    else {
        return None;
    };
    match args.first()? {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}

/// Expression turning the `raw: String` binding into a value of `ty`.
pub fn build_cli_parse_expr(ty: &Type, parse_with: Option<&Path>) -> proc_macro2::TokenStream {
    if let Some(parse_with) = parse_with {
        return quote! { #parse_with(&raw)? };
    }
    quote! {
        raw.trim().parse::<#ty>().map_err(|e| {
            crate::Error::invalid_input(format!("Invalid value for --{name}: {raw} ({e})"))
        })?
    }
}

#[cfg(test)]
mod tests {
    use syn::parse_quote;

    use super::{inner_of_option, is_bool, to_kebab_case};

    #[test]
    fn kebab_case_handles_pascal_and_snake_names() {
        assert_eq!(to_kebab_case("TransportMode"), "transport-mode");
        assert_eq!(to_kebab_case("max_waypoints"), "max-waypoints");
        assert_eq!(to_kebab_case("X"), "x");
    }

    #[test]
    fn inner_of_option_unwraps_short_and_qualified_paths() {
        let short: syn::Type = parse_quote!(Option<u64>);
        let full: syn::Type = parse_quote!(std::option::Option<String>);
        let plain: syn::Type = parse_quote!(Vec<u64>);

        let inner = inner_of_option(&short).expect("short option");
        assert_eq!(quote::quote!(#inner).to_string(), "u64");
        let inner = inner_of_option(&full).expect("qualified option");
        assert_eq!(quote::quote!(#inner).to_string(), "String");
        assert!(inner_of_option(&plain).is_none());
    }

    #[test]
    fn is_bool_matches_only_bool() {
        let yes: syn::Type = parse_quote!(bool);
        let no: syn::Type = parse_quote!(Option<bool>);
        assert!(is_bool(&yes));
        assert!(!is_bool(&no));
    }
}
