//! QuerySource derive macro implementation.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Fields, Type, parse2};

/// Field options parsed from `#[query(...)]` attributes.
#[derive(Debug, Clone, Default)]
struct QueryFieldOptions {
    /// Harvest the field under this key.
    name: Option<String>,
    /// Recurse into the field instead of harvesting it directly.
    flatten: bool,
}

/// Expand the `#[derive(QuerySource)]` macro.
pub fn expand_query_source(input: TokenStream) -> syn::Result<TokenStream> {
    let input: DeriveInput = parse2(input)?;
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    // Only support structs with named fields
    let fields = match &input.data {
        syn::Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input,
                    "QuerySource derive only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "QuerySource derive only supports structs",
            ));
        }
    };

    let mut field_handlers = Vec::new();

    for field in fields {
        let Some(field_name) = field.ident.as_ref() else {
            continue;
        };
        let options = parse_query_field_options(&field.attrs)?;

        if options.flatten {
            field_handlers.push(quote! {
                pairs.extend(::reqsmith::QuerySource::query_pairs(&self.#field_name));
            });
        } else if let Some(key) = options.name {
            field_handlers.push(generate_field_handler(field_name, &field.ty, &key));
        }
    }

    Ok(quote! {
        impl #impl_generics ::reqsmith::QuerySource for #name #ty_generics #where_clause {
            fn query_pairs(&self) -> ::std::vec::Vec<(::std::string::String, ::std::string::String)> {
                let mut pairs = ::std::vec::Vec::new();
                #(#field_handlers)*
                pairs
            }
        }
    })
}

/// Parse field options from `#[query(...)]` attributes.
fn parse_query_field_options(attrs: &[syn::Attribute]) -> syn::Result<QueryFieldOptions> {
    let mut options = QueryFieldOptions::default();

    for attr in attrs {
        if !attr.path().is_ident("query") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let value: syn::LitStr = meta.value()?.parse()?;
                if value.value().is_empty() {
                    return Err(syn::Error::new_spanned(
                        &value,
                        "query parameter name must not be empty",
                    ));
                }
                options.name = Some(value.value());
            } else if meta.path.is_ident("flatten") {
                options.flatten = true;
            }
            Ok(())
        })?;

        if options.flatten && options.name.is_some() {
            return Err(syn::Error::new_spanned(
                attr,
                "`flatten` and `name` are mutually exclusive",
            ));
        }
    }

    Ok(options)
}

/// Generate code for harvesting a single tagged field.
fn generate_field_handler(field_name: &syn::Ident, field_ty: &Type, key: &str) -> TokenStream {
    if is_option_type(field_ty) {
        // Option<T>: skip if None
        quote! {
            if let Some(ref value) = self.#field_name {
                pairs.push((#key.to_string(), value.to_string()));
            }
        }
    } else if is_vec_type(field_ty) {
        // Vec<T>: one pair per element
        quote! {
            for item in &self.#field_name {
                pairs.push((#key.to_string(), item.to_string()));
            }
        }
    } else {
        quote! {
            pairs.push((#key.to_string(), self.#field_name.to_string()));
        }
    }
}

/// Check if a type is `Option<T>`.
fn is_option_type(ty: &Type) -> bool {
    matches!(ty, Type::Path(type_path)
        if type_path.path.segments.last()
            .is_some_and(|seg| seg.ident == "Option"))
}

/// Check if a type is `Vec<T>`.
fn is_vec_type(ty: &Type) -> bool {
    matches!(ty, Type::Path(type_path)
        if type_path.path.segments.last()
            .is_some_and(|seg| seg.ident == "Vec"))
}

#[cfg(test)]
mod tests {
    use assert2::check;
    use quote::quote;

    use super::*;

    #[test]
    fn expands_named_struct() {
        let input = quote! {
            struct Search {
                #[query(name = "q")]
                term: String,
                #[query(name = "page")]
                page: Option<u32>,
                untagged: String,
            }
        };
        let expanded = expand_query_source(input).expect("expands").to_string();
        check!(expanded.contains("QuerySource"));
        check!(expanded.contains("query_pairs"));
        check!(expanded.contains("\"q\""));
        // Untagged fields contribute nothing.
        check!(!expanded.contains("untagged"));
    }

    #[test]
    fn rejects_empty_name() {
        let input = quote! {
            struct Search {
                #[query(name = "")]
                term: String,
            }
        };
        let err = expand_query_source(input).expect_err("empty name");
        check!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn rejects_name_combined_with_flatten() {
        let input = quote! {
            struct Search {
                #[query(name = "q", flatten)]
                term: String,
            }
        };
        let err = expand_query_source(input).expect_err("conflicting options");
        check!(err.to_string().contains("mutually exclusive"));
    }

    #[test]
    fn rejects_tuple_structs_and_enums() {
        let err = expand_query_source(quote! { struct Pair(String, String); })
            .expect_err("tuple struct");
        check!(err.to_string().contains("named fields"));

        let err = expand_query_source(quote! { enum Choice { A, B } }).expect_err("enum");
        check!(err.to_string().contains("only supports structs"));
    }

    #[test]
    fn flatten_recurses_through_trait_call() {
        let input = quote! {
            struct Outer {
                #[query(flatten)]
                inner: Inner,
            }
        };
        let expanded = expand_query_source(input).expect("expands").to_string();
        check!(expanded.contains("query_pairs (& self . inner)"));
    }
}
