//! Helpers for pulling a plain Rust method signature apart into the shape
//! a `#[tool]` wrapper needs: parameter name/type pairs and the `Ok` type
//! of a `Result<T, E>` return.

use syn::{FnArg, GenericArgument, Pat, PathArguments, ReturnType, Signature, Type};

use crate::support::diag;

/// One declared parameter of a `#[tool]` method, after the receiver
/// (`&self`) has been stripped.
pub struct Param<'a> {
    pub name: String,
    pub ty: &'a Type,
}

/// Collect every non-receiver parameter, in declaration order.
///
/// Each parameter must bind a plain identifier (`a: f64`, not a tuple or
/// other pattern) — tool arguments are looked up by name at the
/// [`toolagent_tool::ToolArgs`](../toolagent_tool/struct.ToolArgs.html)
/// boundary, so a destructuring pattern has no name to key on.
pub fn params(sig: &Signature) -> syn::Result<Vec<Param<'_>>> {
    sig.inputs
        .iter()
        .filter_map(|arg| match arg {
            FnArg::Receiver(_) => None,
            FnArg::Typed(pat_type) => Some(pat_type),
        })
        .map(|pat_type| {
            let Pat::Ident(ident) = pat_type.pat.as_ref() else {
                return Err(diag::error_spanned(
                    &pat_type.pat,
                    "tool parameters must be a plain identifier, not a pattern",
                ));
            };
            Ok(Param {
                name: ident.ident.to_string(),
                ty: &pat_type.ty,
            })
        })
        .collect()
}

/// Render a type as the string `ToolDescriptor`/`Port` carry for display —
/// never parsed back, so any valid Rust type syntax is fine.
pub fn type_name(ty: &Type) -> String {
    quote::quote!(#ty).to_string().replace(' ', "")
}

/// Split a `-> Result<T, E>` return type into its `Ok` type, or `None` if
/// the method returns a bare value with no failure path.
///
/// Only the two-argument `Result<T, E>` shape is recognised; a type alias
/// (`type MyResult<T> = Result<T, MyError>`) is treated as a bare return
/// type, since resolving alias definitions is out of reach for a
/// per-crate proc-macro without type information from the compiler.
pub fn result_ok_type(output: &ReturnType) -> Option<&Type> {
    let ReturnType::Type(_, ty) = output else {
        return None;
    };
    let Type::Path(path) = ty.as_ref() else {
        return None;
    };
    let segment = path.path.segments.last()?;
    if segment.ident != "Result" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match args.args.first()? {
        GenericArgument::Type(ok_ty) => Some(ok_ty),
        _ => None,
    }
}
