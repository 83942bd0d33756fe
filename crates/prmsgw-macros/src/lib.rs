use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{parse_macro_input, Data, DeriveInput, Fields, Lit, Meta};

/// Derive macro that generates a structure-of-arrays companion for a per-HRU
/// flux record. All fields in the source struct must be `f64`.
///
/// The generated columns struct holds one `Vec<f64>` per field, indexed by
/// HRU ordinal, with `with_capacity`, `push`, `row`, `len` and `is_empty`
/// methods plus `FromIterator` over the record type. A `field_names()`
/// associated function is added to the record struct.
///
/// The columns struct is named `{StructName}Columns` unless overridden with
/// `#[fluxes(columns_name = "CustomName")]`.
#[proc_macro_derive(Fluxes, attributes(fluxes))]
pub fn derive_fluxes(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let name = &input.ident;
    let vis = &input.vis;

    let columns_name =
        extract_columns_name(&input).unwrap_or_else(|| format_ident!("{}Columns", name));

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return syn::Error::new_spanned(
                    name,
                    "Fluxes can only be derived for structs with named fields",
                )
                .to_compile_error()
                .into();
            }
        },
        _ => {
            return syn::Error::new_spanned(name, "Fluxes can only be derived for structs")
                .to_compile_error()
                .into();
        }
    };

    if fields.is_empty() {
        return syn::Error::new_spanned(name, "Fluxes struct must have at least one field")
            .to_compile_error()
            .into();
    }

    let mut field_idents = Vec::with_capacity(fields.len());
    for field in fields {
        let Some(ident) = field.ident.as_ref() else {
            return syn::Error::new_spanned(field, "Fluxes derive: unnamed field")
                .to_compile_error()
                .into();
        };
        if !is_f64_type(&field.ty) {
            return syn::Error::new_spanned(&field.ty, "Fluxes derive: all fields must be f64")
                .to_compile_error()
                .into();
        }
        field_idents.push(ident);
    }

    let first_field = field_idents[0];
    let field_name_strs: Vec<String> = field_idents.iter().map(|f| f.to_string()).collect();
    let n_fields = field_idents.len();

    let column_fields = field_idents.iter().map(|f| quote! { pub #f: Vec<f64> });
    let with_cap_fields = field_idents.iter().map(|f| quote! { #f: Vec::with_capacity(n) });
    let push_fields = field_idents.iter().map(|f| quote! { self.#f.push(record.#f); });
    let row_fields = field_idents.iter().map(|f| quote! { #f: self.#f[index] });

    let expanded = quote! {
        /// Structure-of-arrays columns, one entry per HRU.
        #[derive(Debug, Clone, Default, PartialEq)]
        #vis struct #columns_name {
            #(#column_fields,)*
        }

        impl #columns_name {
            /// Pre-allocate every column for `n` HRUs.
            pub fn with_capacity(n: usize) -> Self {
                Self {
                    #(#with_cap_fields,)*
                }
            }

            /// Append one HRU's record.
            pub fn push(&mut self, record: &#name) {
                #(#push_fields)*
            }

            /// Record for the HRU at `index`, if present.
            pub fn row(&self, index: usize) -> Option<#name> {
                if index >= self.len() {
                    return None;
                }
                Some(#name {
                    #(#row_fields,)*
                })
            }

            /// Number of HRUs stored.
            pub fn len(&self) -> usize {
                self.#first_field.len()
            }

            /// Returns `true` if no HRUs have been stored.
            pub fn is_empty(&self) -> bool {
                self.#first_field.is_empty()
            }
        }

        impl ::std::iter::FromIterator<#name> for #columns_name {
            fn from_iter<I: ::std::iter::IntoIterator<Item = #name>>(iter: I) -> Self {
                let iter = iter.into_iter();
                let mut columns = Self::with_capacity(iter.size_hint().0);
                for record in iter {
                    columns.push(&record);
                }
                columns
            }
        }

        impl #name {
            /// Number of flux fields.
            pub const N_FIELDS: usize = #n_fields;

            /// Returns the field names of this flux struct.
            pub fn field_names() -> &'static [&'static str] {
                &[#(#field_name_strs),*]
            }
        }
    };

    expanded.into()
}

fn extract_columns_name(input: &DeriveInput) -> Option<proc_macro2::Ident> {
    for attr in &input.attrs {
        if !attr.path().is_ident("fluxes") {
            continue;
        }
        let nested = attr
            .parse_args_with(
                syn::punctuated::Punctuated::<Meta, syn::Token![,]>::parse_terminated,
            )
            .ok()?;
        for meta in nested {
            let Meta::NameValue(nv) = meta else { continue };
            if !nv.path.is_ident("columns_name") {
                continue;
            }
            if let syn::Expr::Lit(expr_lit) = &nv.value {
                if let Lit::Str(lit_str) = &expr_lit.lit {
                    return Some(format_ident!("{}", lit_str.value()));
                }
            }
        }
    }
    None
}

fn is_f64_type(ty: &syn::Type) -> bool {
    match ty {
        syn::Type::Path(type_path) => type_path.path.is_ident("f64"),
        _ => false,
    }
}
