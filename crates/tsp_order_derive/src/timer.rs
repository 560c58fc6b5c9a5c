use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{ItemFn, LitStr, parse_macro_input};

/// `#[timer("label")]` logs `label: elapsed=<secs>s` at info level when the
/// annotated function returns, on every exit path. An empty attribute uses
/// the function name as the label. The calling crate must depend on `log`.
pub fn timer_inner(attr: TokenStream, item: TokenStream) -> TokenStream {
    let item_fn = parse_macro_input!(item as ItemFn);

    let label = if attr.is_empty() {
        LitStr::new(&item_fn.sig.ident.to_string(), Span::call_site())
    } else {
        parse_macro_input!(attr as LitStr)
    };

    if item_fn.sig.asyncness.is_some() {
        return syn::Error::new_spanned(&item_fn.sig, "timer does not support async functions")
            .to_compile_error()
            .into();
    }

    let ItemFn {
        attrs,
        vis,
        sig,
        block,
    } = item_fn;

    let expanded = quote! {
        #(#attrs)*
        #vis #sig {
            struct __TimerGuard(std::time::Instant);

            impl Drop for __TimerGuard {
                fn drop(&mut self) {
                    ::log::info!(
                        "{}: elapsed={:.3}s",
                        #label,
                        self.0.elapsed().as_secs_f64()
                    );
                }
            }

            let __timer_guard = __TimerGuard(std::time::Instant::now());
            #block
        }
    };

    TokenStream::from(expanded)
}
