use syn::Attribute;

/// Collect doc comments (`/// ...`) into a single string.
///
/// A doc comment attribute is always `#[doc = "..."]`, i.e. `Meta::NameValue`
/// — never a `Meta::List`, so its literal is read directly off `attr.meta`
/// rather than via `parse_args_with`.
pub fn doc_string(attrs: &[Attribute]) -> String {
    let mut out = Vec::new();
    for attr in attrs {
        if attr.path().is_ident("doc")
            && let syn::Meta::NameValue(nv) = &attr.meta
            && let syn::Expr::Lit(expr_lit) = &nv.value
            && let syn::Lit::Str(s) = &expr_lit.lit
        {
            let line = s.value().trim().to_string();
            if !line.is_empty() {
                out.push(line);
            }
        }
    }
    out.join("\n")
}
