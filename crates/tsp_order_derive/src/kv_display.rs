use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Field, Fields, LitStr, spanned::Spanned};

enum Render {
    Value,
    Len,
    OrIfEmpty(String),
}

fn field_render(field: &Field) -> syn::Result<(Option<String>, Render)> {
    let mut key = None;
    let mut render = Render::Value;

    for attr in field.attrs.iter().filter(|attr| attr.path().is_ident("kv")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                key = Some(meta.value()?.parse::<LitStr>()?.value());
            } else if meta.path.is_ident("len") {
                render = Render::Len;
            } else if meta.path.is_ident("empty") {
                render = Render::OrIfEmpty(meta.value()?.parse::<LitStr>()?.value());
            } else {
                return Err(meta.error("expected `name = \"..\"`, `len` or `empty = \"..\"`"));
            }
            Ok(())
        })?;
    }

    Ok((key, render))
}

/// `Display` as `key=value` pairs joined by single spaces, the shape of the
/// crate's log lines. Per field: `#[kv(name = "...")]` renames the key,
/// `#[kv(len)]` prints `.len()` instead of the value, and
/// `#[kv(empty = "...")]` prints a placeholder when the value renders empty.
pub fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new(
            input.span(),
            "KvDisplay can only be derived for structs",
        ));
    };
    let Fields::Named(fields) = &data.fields else {
        return Err(syn::Error::new(
            data.fields.span(),
            "KvDisplay requires named fields",
        ));
    };

    let mut writes = Vec::with_capacity(fields.named.len());
    for (idx, field) in fields.named.iter().enumerate() {
        let Some(ident) = &field.ident else {
            continue;
        };
        let (key, render) = field_render(field)?;
        let key = key.unwrap_or_else(|| ident.to_string());
        let prefix = if idx == 0 {
            format!("{key}=")
        } else {
            format!(" {key}=")
        };

        let value = match render {
            Render::Value => quote! {
                ::std::fmt::Display::fmt(&self.#ident, f)?;
            },
            Render::Len => quote! {
                ::std::fmt::Display::fmt(&self.#ident.len(), f)?;
            },
            Render::OrIfEmpty(placeholder) => quote! {
                let rendered = ::std::string::ToString::to_string(&self.#ident);
                f.write_str(if rendered.is_empty() {
                    #placeholder
                } else {
                    rendered.as_str()
                })?;
            },
        };
        writes.push(quote! {
            f.write_str(#prefix)?;
            #value
        });
    }

    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::std::fmt::Display for #ident #ty_generics #where_clause {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                #(#writes)*
                Ok(())
            }
        }
    })
}
