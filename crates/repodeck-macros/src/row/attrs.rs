//! Attribute parsing for the Row derive macro.

use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Attribute, Error, Lit, Meta, Result, Token,
};

/// Field-level attributes from `#[row(...)]`.
#[derive(Debug, Clone, Default)]
pub struct RowAttr {
    /// Delegate the rest of the path to this field's own `Row` impl.
    pub nested: bool,
    /// Hide this field from path lookup.
    pub skip: bool,
    /// Path segment (default: field name).
    pub rename: Option<String>,
}

impl Parse for RowAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = RowAttr::default();

        let content: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in content {
            match &meta {
                Meta::Path(p) if p.is_ident("nested") => attr.nested = true,
                Meta::Path(p) if p.is_ident("skip") => attr.skip = true,

                Meta::NameValue(nv) if nv.path.is_ident("rename") => {
                    if let syn::Expr::Lit(syn::ExprLit {
                        lit: Lit::Str(s), ..
                    }) = &nv.value
                    {
                        if s.value().is_empty() || s.value().contains('.') {
                            return Err(Error::new(
                                s.span(),
                                "rename must be a non-empty name without dots",
                            ));
                        }
                        attr.rename = Some(s.value());
                    } else {
                        return Err(Error::new(
                            nv.value.span(),
                            "rename must be a string literal",
                        ));
                    }
                }

                _ => {
                    return Err(Error::new(
                        meta.span(),
                        "unknown row attribute. Expected: nested, skip, or rename = \"...\"",
                    ));
                }
            }
        }

        if attr.skip && (attr.nested || attr.rename.is_some()) {
            return Err(Error::new(
                input.span(),
                "skip cannot be combined with nested or rename",
            ));
        }

        Ok(attr)
    }
}

/// Extract `#[row(...)]` attributes from a field's attributes.
pub fn parse_row_attrs(attrs: &[Attribute]) -> Result<RowAttr> {
    for attr in attrs {
        if attr.path().is_ident("row") {
            return attr.parse_args::<RowAttr>();
        }
    }
    Ok(RowAttr::default())
}
