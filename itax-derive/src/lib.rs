use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, Lit, Meta, Type};

/// Derive macro that lists the monetary fields of a record as labelled lines.
///
/// For each `Decimal` field, extracts:
/// - Key (the field name)
/// - Label (from doc comments, falling back to the key)
///
/// Fields of any other type are left out.
///
/// Generates a `lines(&self) -> Vec<BreakdownLine>` method. `BreakdownLine`
/// must be in scope where the derive is used.
#[proc_macro_derive(BreakdownLines)]
pub fn derive_breakdown_lines(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => panic!("BreakdownLines only supports structs with named fields"),
        },
        _ => panic!("BreakdownLines only supports structs"),
    };

    let line_entries = fields
        .iter()
        .filter(|field| is_decimal_type(&field.ty))
        .map(|field| {
            let ident = field.ident.as_ref().unwrap();
            let key = ident.to_string();
            let doc = get_doc_comment(&field.attrs);
            let label = if doc.is_empty() { key.clone() } else { doc };

            quote! {
                BreakdownLine {
                    key: #key,
                    label: #label,
                    amount: self.#ident,
                }
            }
        });

    let expanded = quote! {
        impl #name {
            pub fn lines(&self) -> ::std::vec::Vec<BreakdownLine> {
                ::std::vec![
                    #(#line_entries),*
                ]
            }
        }
    };

    TokenStream::from(expanded)
}

fn get_doc_comment(attrs: &[syn::Attribute]) -> String {
    attrs
        .iter()
        .filter_map(|attr| {
            if !attr.path().is_ident("doc") {
                return None;
            }
            if let Meta::NameValue(meta) = &attr.meta {
                if let syn::Expr::Lit(expr_lit) = &meta.value {
                    if let Lit::Str(lit_str) = &expr_lit.lit {
                        return Some(lit_str.value().trim().to_string());
                    }
                }
            }
            None
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_decimal_type(ty: &Type) -> bool {
    if let Type::Path(type_path) = ty {
        if let Some(segment) = type_path.path.segments.last() {
            return segment.ident == "Decimal";
        }
    }
    false
}
