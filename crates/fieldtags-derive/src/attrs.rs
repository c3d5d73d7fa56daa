//! `#[tags(...)]` and `#[record(...)]` attribute parsing.

use syn::ext::IdentExt;
use syn::{Attribute, Field, LitStr, Visibility};

/// What the derive needs to know about one named field.
pub struct FieldInfo {
    pub ident: syn::Ident,
    pub name: String,
    pub exported: bool,
    pub annotations: Vec<(String, String)>,
    /// `#[record(kind = Variant)]`: the field's `Kind`, bypassing `HasKind`.
    pub kind: Option<syn::Ident>,
}

impl FieldInfo {
    pub fn from_field(field: &Field) -> syn::Result<Self> {
        let ident = field
            .ident
            .clone()
            .ok_or_else(|| syn::Error::new_spanned(field, "Record fields must be named"))?;

        Ok(FieldInfo {
            name: ident.unraw().to_string(),
            ident,
            exported: matches!(field.vis, Visibility::Public(_)),
            annotations: parse_annotations(&field.attrs)?,
            kind: parse_kind(&field.attrs)?,
        })
    }
}

/// Collects `name = "content"` pairs from every `#[tags(...)]`, in order.
fn parse_annotations(attrs: &[Attribute]) -> syn::Result<Vec<(String, String)>> {
    let mut annotations = Vec::new();

    for attr in attrs {
        if !attr.path().is_ident("tags") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            let name = match meta.path.get_ident() {
                Some(ident) => ident.unraw().to_string(),
                None => {
                    return Err(meta.error("annotation name must be a single identifier"));
                }
            };

            if !meta.input.peek(syn::Token![=]) {
                return Err(meta.error(format!("expected `{} = \"...\"`", name)));
            }

            let content: LitStr = meta.value()?.parse()?;
            annotations.push((name, content.value()));
            Ok(())
        })?;
    }

    Ok(annotations)
}

/// Reads `#[record(kind = Variant)]`; the last one wins.
fn parse_kind(attrs: &[Attribute]) -> syn::Result<Option<syn::Ident>> {
    let mut kind = None;

    for attr in attrs {
        if !attr.path().is_ident("record") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("kind") {
                kind = Some(meta.value()?.parse::<syn::Ident>()?);
                Ok(())
            } else {
                Err(meta.error("unsupported record option, expected `kind`"))
            }
        })?;
    }

    Ok(kind)
}
