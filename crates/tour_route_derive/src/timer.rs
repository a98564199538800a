use proc_macro::TokenStream;
use quote::quote;
use syn::{ItemFn, LitStr, ReturnType, parse_macro_input};

pub fn timer_inner(attr: TokenStream, item: TokenStream) -> TokenStream {
    let func = parse_macro_input!(item as ItemFn);
    let label = if attr.is_empty() {
        func.sig.ident.to_string()
    } else {
        parse_macro_input!(attr as LitStr).value()
    };

    let ItemFn {
        attrs,
        vis,
        sig,
        block,
    } = func;
    let ret = match &sig.output {
        ReturnType::Default => quote! { () },
        ReturnType::Type(_, ty) => quote! { #ty },
    };

    let expanded = quote! {
        #(#attrs)*
        #vis #sig {
            let __timer_start = std::time::Instant::now();
            #[allow(clippy::redundant_closure_call)]
            let __timer_result = (|| -> #ret #block)();
            log::debug!(
                "{}: elapsed={:.3}s",
                #label,
                __timer_start.elapsed().as_secs_f64()
            );
            __timer_result
        }
    };

    TokenStream::from(expanded)
}
