//! Derives for the option, logging and timing plumbing of `tsp_order_core`.
//!
//! Generated code names `crate::Error`, `crate::Result` and
//! `crate::options::OptionValue`, so these derives only expand inside the
//! core crate.

mod cli_options;
mod cli_value;
mod kv_display;
mod timer;
mod utils;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// `#[timer("label")]`: logs the wall time of the annotated function.
#[proc_macro_attribute]
pub fn timer(attr: TokenStream, item: TokenStream) -> TokenStream {
    timer::timer_inner(attr, item)
}

/// Unit-only enum usable as a `--name <value>` option.
#[proc_macro_derive(CliValue, attributes(cli))]
pub fn derive_cli_value(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    cli_value::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Struct whose fields are the `--kebab-case` options of the binary.
#[proc_macro_derive(CliOptions, attributes(cli))]
pub fn derive_cli_options(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    cli_options::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// One-line `key=value` rendering for log lines.
#[proc_macro_derive(KvDisplay, attributes(kv))]
pub fn derive_kv_display(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    kv_display::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
