//! Derive and attribute macros shared by the tour-route crates.
//!
//! Generated code refers to `crate::Error` and `crate::Result`, so the
//! consuming crate must expose both at its root.

mod cli_options;
mod cli_value;
mod kv_display;
mod timer;
mod utils;

use proc_macro::TokenStream;

/// Logs the wall time of the annotated function at debug level.
///
/// `#[timer]` labels the line with the function name, `#[timer("label")]`
/// overrides it.
#[proc_macro_attribute]
pub fn timer(attr: TokenStream, item: TokenStream) -> TokenStream {
    timer::timer_inner(attr, item)
}

#[proc_macro_derive(CliValue, attributes(cli_value, cli))]
pub fn derive_cli_value(item: TokenStream) -> TokenStream {
    cli_value::derive_cli_value_inner(item)
}

#[proc_macro_derive(CliOptions, attributes(cli))]
pub fn derive_cli_options(item: TokenStream) -> TokenStream {
    cli_options::derive_cli_options_inner(item)
}

#[proc_macro_derive(KvDisplay, attributes(kv))]
pub fn derive_kv_display(item: TokenStream) -> TokenStream {
    kv_display::derive_kv_display_inner(item)
}
