use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, LitStr, Variant, spanned::Spanned};

use crate::utils;

/// Implements `crate::options::OptionValue` for a unit-only enum plus
/// `as_str` and `Display`. A variant answers to its kebab-case name and to
/// any `#[cli(alias = "...")]`, case-insensitively.
pub fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let Data::Enum(data) = &input.data else {
        return Err(syn::Error::new(
            input.span(),
            "CliValue can only be derived for enums",
        ));
    };

    let mut names = Vec::with_capacity(data.variants.len());
    let mut parse_arms = Vec::with_capacity(data.variants.len());
    let mut str_arms = Vec::with_capacity(data.variants.len());

    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new(
                variant.span(),
                "CliValue variants cannot carry data",
            ));
        }

        let ident = &variant.ident;
        let name = utils::to_kebab_case(&ident.to_string());
        let aliases = aliases(variant)?;

        parse_arms.push(quote! { #name #(| #aliases)* => Ok(Self::#ident), });
        str_arms.push(quote! { Self::#ident => #name, });
        names.push(name);
    }

    let expected = names.join("|");
    let hint = format!("<{expected}>");
    let ident = &input.ident;

    Ok(quote! {
        impl #ident {
            pub fn as_str(&self) -> &'static str {
                match self {
                    #(#str_arms)*
                }
            }
        }

        impl crate::options::OptionValue for #ident {
            const HINT: &'static str = #hint;

            fn parse_option(name: &str, raw: &str) -> crate::Result<Self> {
                match raw.trim().to_ascii_lowercase().as_str() {
                    #(#parse_arms)*
                    _ => Err(crate::Error::invalid_input(::std::format!(
                        "Invalid value for --{name}: {raw} (expected {})",
                        #expected
                    ))),
                }
            }
        }

        impl ::std::fmt::Display for #ident {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    })
}

fn aliases(variant: &Variant) -> syn::Result<Vec<String>> {
    let mut aliases = Vec::new();
    for attr in variant.attrs.iter().filter(|attr| attr.path().is_ident("cli")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("alias") {
                let alias = meta.value()?.parse::<LitStr>()?.value();
                aliases.push(alias.to_ascii_lowercase());
                return Ok(());
            }
            Err(meta.error("expected `alias = \"...\"`"))
        })?;
    }
    Ok(aliases)
}
