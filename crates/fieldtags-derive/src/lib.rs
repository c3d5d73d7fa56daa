//! Derive macro for `fieldtags`.
//!
//! `#[derive(Record)]` implements `fieldtags::Record`, `fieldtags::Target` and
//! `fieldtags::HasKind` for a struct with named fields:
//!
//! ```ignore
//! #[derive(Record)]
//! struct MyData {
//!     #[tags(validator = "required", json = "name")]
//!     pub name: String,
//!     #[tags(validator = "gt:10;lt:130")]
//!     pub age: u32,
//!     internal: u64, // not `pub`: never reported
//! }
//! ```
//!
//! Only `pub` fields are exported. Exported field types must be `'static`
//! and implement `fieldtags::HasKind`, unless the field names its kind:
//!
//! ```ignore
//! #[derive(Record)]
//! struct Order {
//!     #[tags(validator = "required")]
//!     #[record(kind = Enum)]
//!     pub status: Status,
//! }
//! ```

mod attrs;

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields};

use attrs::FieldInfo;

#[proc_macro_derive(Record, attributes(tags, record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match derive_record_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn derive_record_impl(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let struct_name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => named
                .named
                .iter()
                .map(FieldInfo::from_field)
                .collect::<syn::Result<Vec<_>>>()?,
            Fields::Unit => Vec::new(),
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    struct_name,
                    "Record can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                struct_name,
                "Record can only be derived for structs",
            ));
        }
    };

    let mut_entries = fields.iter().map(|field| descriptor(field, true));
    let ref_entries = fields.iter().map(|field| descriptor(field, false));

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::fieldtags::Record for #struct_name #ty_generics #where_clause {
            fn fields_mut(&mut self) -> ::std::vec::Vec<::fieldtags::FieldDescriptor<'_>> {
                ::std::vec![#(#mut_entries),*]
            }

            fn fields(&self) -> ::std::vec::Vec<::fieldtags::FieldDescriptor<'_>> {
                ::std::vec![#(#ref_entries),*]
            }
        }

        impl #impl_generics ::fieldtags::Target for #struct_name #ty_generics #where_clause {
            fn record_mut(&mut self) -> ::std::option::Option<&mut dyn ::fieldtags::Record> {
                ::std::option::Option::Some(self)
            }

            fn record(&self) -> ::std::option::Option<&dyn ::fieldtags::Record> {
                ::std::option::Option::Some(self)
            }
        }

        impl #impl_generics ::fieldtags::HasKind for #struct_name #ty_generics #where_clause {
            const KIND: ::fieldtags::Kind = ::fieldtags::Kind::Struct;
        }
    })
}

/// Builds the `FieldDescriptor` expression for one field.
fn descriptor(field: &FieldInfo, mutable: bool) -> proc_macro2::TokenStream {
    let name = &field.name;

    if !field.exported {
        return quote! { ::fieldtags::FieldDescriptor::hidden(#name) };
    }

    let ident = &field.ident;
    let annotation_names = field.annotations.iter().map(|(name, _)| name);
    let annotation_contents = field.annotations.iter().map(|(_, content)| content);
    let annotations = quote! {
        ::fieldtags::Annotations::new(&[#((#annotation_names, #annotation_contents)),*])
    };

    match (&field.kind, mutable) {
        (Some(kind), true) => quote! {
            ::fieldtags::FieldDescriptor::new_mut_with_kind(
                #name, &mut self.#ident, #annotations, ::fieldtags::Kind::#kind,
            )
        },
        (Some(kind), false) => quote! {
            ::fieldtags::FieldDescriptor::new_ref_with_kind(
                #name, &self.#ident, #annotations, ::fieldtags::Kind::#kind,
            )
        },
        (None, true) => {
            quote! { ::fieldtags::FieldDescriptor::new_mut(#name, &mut self.#ident, #annotations) }
        }
        (None, false) => {
            quote! { ::fieldtags::FieldDescriptor::new_ref(#name, &self.#ident, #annotations) }
        }
    }
}
