use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Field, Fields, Ident, LitStr, spanned::Spanned};

use crate::utils;

/// A struct field exposed as `--<kebab-name>`.
struct OptionField<'a> {
    ident: &'a Ident,
    field: &'a Field,
    long: String,
    hint: Option<String>,
    help: String,
}

impl<'a> OptionField<'a> {
    fn parse(field: &'a Field) -> syn::Result<Self> {
        let Some(ident) = &field.ident else {
            return Err(syn::Error::new(field.span(), "CliOptions requires named fields"));
        };

        let mut hint = None;
        for attr in field.attrs.iter().filter(|attr| attr.path().is_ident("cli")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("hint") {
                    hint = Some(meta.value()?.parse::<LitStr>()?.value());
                    return Ok(());
                }
                Err(meta.error("expected `hint = \"<...>\"`"))
            })?;
        }

        if hint.is_some() && utils::is_bool(&field.ty) {
            return Err(syn::Error::new(field.span(), "flags take no value hint"));
        }

        Ok(Self {
            ident,
            field,
            long: utils::to_kebab_case(&ident.to_string()),
            hint,
            help: utils::doc_text(&field.attrs),
        })
    }

    fn is_flag(&self) -> bool {
        utils::is_bool(&self.field.ty)
    }

    /// Match arms of `apply_cli_option`. Flags get a second `no-` arm.
    fn apply_arms(&self) -> TokenStream {
        let ident = self.ident;
        let ty = &self.field.ty;
        let long = &self.long;

        if self.is_flag() {
            let negated = format!("no-{long}");
            return quote! {
                #long => {
                    self.#ident = match value {
                        Some(raw) => {
                            <bool as crate::options::OptionValue>::parse_option(name, &raw)?
                        }
                        None => true,
                    };
                    Ok(true)
                }
                #negated => {
                    if value.is_some() {
                        return Err(crate::Error::invalid_input(format!(
                            "Flag --{name} does not take a value"
                        )));
                    }
                    self.#ident = false;
                    Ok(true)
                }
            };
        }

        quote! {
            #long => {
                let raw = value.ok_or_else(|| {
                    crate::Error::invalid_input(format!("Missing value for --{name}"))
                })?;
                self.#ident = <#ty as crate::options::OptionValue>::parse_option(name, &raw)?;
                Ok(true)
            }
        }
    }

    /// `(form, help)` pair shown in the usage text.
    fn help_entry(&self) -> TokenStream {
        let long = &self.long;
        let help = &self.help;

        if self.is_flag() {
            let form = format!("--{long}[=<bool>], --no-{long}");
            return quote! { (::std::string::String::from(#form), #help) };
        }

        let ty = &self.field.ty;
        let hint = match &self.hint {
            Some(hint) => quote! { #hint },
            None => quote! { <#ty as crate::options::OptionValue>::HINT },
        };
        quote! { (::std::format!("--{} {}", #long, #hint), #help) }
    }
}

/// Generates `apply_cli_option`, which stores one parsed `--name[=value]`
/// into the matching field and reports whether the name was known, and
/// `option_help`, the usage lines built from the field docs.
pub fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new(
            input.span(),
            "CliOptions can only be derived for structs",
        ));
    };
    let Fields::Named(fields) = &data.fields else {
        return Err(syn::Error::new(
            data.fields.span(),
            "CliOptions requires named fields",
        ));
    };

    let options = fields
        .named
        .iter()
        .map(OptionField::parse)
        .collect::<syn::Result<Vec<_>>>()?;
    let arms = options.iter().map(OptionField::apply_arms);
    let entries = options.iter().map(OptionField::help_entry);

    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics #ident #ty_generics #where_clause {
            fn apply_cli_option(
                &mut self,
                name: &str,
                value: ::std::option::Option<::std::string::String>,
            ) -> crate::Result<bool> {
                match name {
                    #(#arms)*
                    _ => Ok(false),
                }
            }

            fn option_help() -> ::std::vec::Vec<(::std::string::String, &'static str)> {
                ::std::vec![#(#entries),*]
            }
        }
    })
}
