//! The `#[agent]` attribute macro: the compile-time analogue of scanning
//! an agent instance for `is_tool`/`is_workflow` markers.
//!
//! Applied to a plain `impl MyAgent { ... }` block, it finds every method
//! carrying `#[tool]` or `#[workflow]`, strips that marker attribute, and
//! emits alongside the original impl:
//!
//! - one hidden [`Tool`](toolagent_tool::Tool) wrapper struct per `#[tool]`
//!   method, decoding its declared parameters out of
//!   [`ToolArgs`](toolagent_tool::ToolArgs) and re-encoding its return
//!   value as JSON;
//! - an `into_registry` associated function that builds an
//!   [`AgentRegistry`](toolagent_registry::AgentRegistry) from those
//!   wrappers plus the [`WorkflowDescriptor`](toolagent_workflow::WorkflowDescriptor)
//!   every `#[workflow]` method returns.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{Attribute, FnArg, Ident, ImplItem, ImplItemFn, ItemImpl, Type, parse_macro_input};

use crate::support::{attrs, diag, signature, utils};

/// `#[tool]` is a marker only — `#[agent]` reads it and strips it before
/// the method reaches the compiler as ordinary code. Left registered as
/// its own attribute so a `#[tool]` method documented or used outside an
/// `#[agent]` block still parses, rather than failing with "cannot find
/// attribute".
pub fn expand_tool_marker(item: TokenStream) -> TokenStream {
    item
}

/// As [`expand_tool_marker`], for `#[workflow]`.
pub fn expand_workflow_marker(item: TokenStream) -> TokenStream {
    item
}

pub fn expand_agent(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemImpl);
    match expand(input) {
        Ok(ts) => ts,
        Err(e) => diag::to_compile_error(e),
    }
}

fn expand(mut input: ItemImpl) -> syn::Result<TokenStream> {
    if input.trait_.is_some() {
        return Err(diag::error_spanned(
            &input.self_ty,
            "`#[agent]` must be applied to an inherent `impl StructName { ... }` block, not a trait impl",
        ));
    }

    let self_ty = (*input.self_ty).clone();
    let struct_ident = struct_ident(&self_ty)?;

    let mut tool_wrappers = Vec::new();
    let mut tool_registrations = Vec::new();
    let mut workflow_calls = Vec::new();

    for item in &mut input.items {
        let ImplItem::Fn(method) = item else { continue };

        if let Some(idx) = find_attr(&method.attrs, "tool") {
            let name_override = attrs::parse_attr(&method.attrs[idx], "tool")?
                .and_then(|args| args.get_string("name"));
            method.attrs.remove(idx);
            let (wrapper, registration) =
                expand_tool_method(&struct_ident, &self_ty, method, name_override)?;
            tool_wrappers.push(wrapper);
            tool_registrations.push(registration);
        } else if let Some(idx) = find_attr(&method.attrs, "workflow") {
            method.attrs.remove(idx);
            if method.sig.inputs.iter().any(|arg| matches!(arg, FnArg::Receiver(_))) {
                return Err(diag::error_spanned(
                    &method.sig.ident,
                    "`#[workflow]` methods must not take `&self` — a workflow's stored steps are the same for every instance of the agent, so it is built once as an associated function",
                ));
            }
            let name = &method.sig.ident;
            workflow_calls.push(quote!(Self::#name()));
        }
    }

    let registry_impl = quote! {
        impl #struct_ident {
            /// Build this agent's tool and workflow registry.
            ///
            /// The compile-time analogue of scanning an instance's members
            /// for `is_tool`/`is_workflow` markers: `#[agent]` already
            /// found every `#[tool]`/`#[workflow]` method on this impl
            /// block, so this just wires up what it found.
            #[must_use]
            pub fn into_registry(self: ::std::sync::Arc<Self>) -> ::toolagent_registry::AgentRegistry {
                let mut __tools = ::toolagent_tool::ToolRegistry::new();
                #(#tool_registrations)*
                let __workflows: ::std::vec::Vec<::toolagent_workflow::WorkflowDescriptor> =
                    ::std::vec![#(#workflow_calls),*];
                ::toolagent_registry::AgentRegistry::new(__tools, __workflows)
            }
        }
    };

    Ok(quote! {
        #input
        #(#tool_wrappers)*
        #registry_impl
    }
    .into())
}

fn struct_ident(self_ty: &Type) -> syn::Result<Ident> {
    if let Type::Path(path) = self_ty
        && let Some(segment) = path.path.segments.last()
    {
        return Ok(segment.ident.clone());
    }
    Err(diag::error_spanned(
        self_ty,
        "`#[agent]` requires a plain `impl StructName { ... }` block",
    ))
}

fn find_attr(attrs: &[Attribute], name: &str) -> Option<usize> {
    attrs.iter().position(|attr| attr.path().is_ident(name))
}

/// Expand one `#[tool]` method into its hidden wrapper struct (implementing
/// [`Tool`](toolagent_tool::Tool)) and the `__tools.register(...)` line that
/// registers it, wrapping `self` in that struct so the wrapper can forward
/// calls to the real method.
fn expand_tool_method(
    struct_ident: &Ident,
    self_ty: &Type,
    method: &ImplItemFn,
    name_override: Option<String>,
) -> syn::Result<(TokenStream2, TokenStream2)> {
    if method.sig.asyncness.is_none() {
        return Err(diag::error_spanned(
            &method.sig.ident,
            "`#[tool]` methods must be declared `async fn` — a tool is a side-effectful leaf operation and the wrapper always awaits it",
        ));
    }

    let method_name = &method.sig.ident;
    let name = name_override.unwrap_or_else(|| method_name.to_string());
    let doc = utils::doc_string(&method.attrs);
    let description = doc.lines().next().unwrap_or(&name).to_string();
    let params = signature::params(&method.sig)?;
    let wrapper_ident = format_ident!("__{}_{}_Tool", struct_ident, method_name);

    let param_with_calls = params.iter().map(|p| {
        let pname = &p.name;
        let tyname = signature::type_name(p.ty);
        quote!(.with_param(#pname, #tyname))
    });

    let arg_bindings = params.iter().enumerate().map(|(i, p)| {
        let pname = &p.name;
        let ident = format_ident!("{}", p.name);
        let ty = p.ty;
        quote! {
            let __raw = args
                .get(#i, #pname)
                .cloned()
                .ok_or_else(|| ::toolagent_tool::ToolError::missing_argument(#pname))?;
            let #ident: #ty = ::serde_json::from_value(__raw.clone()).map_err(|_| {
                ::toolagent_tool::ToolError::type_mismatch(#pname, ::std::stringify!(#ty), __raw.to_string())
            })?;
        }
    });

    let call_args = params.iter().map(|p| format_ident!("{}", p.name));
    let ok_ty = signature::result_ok_type(&method.sig.output);
    let call_and_wrap = if ok_ty.is_some() {
        quote! {
            let __value = self.0.#method_name(#(#call_args),*).await
                .map_err(|e| ::toolagent_tool::ToolError::failed(::std::string::ToString::to_string(&e)))?;
            ::serde_json::to_value(__value)
                .map_err(|e| ::toolagent_tool::ToolError::failed(::std::string::ToString::to_string(&e)))
        }
    } else {
        quote! {
            let __value = self.0.#method_name(#(#call_args),*).await;
            ::serde_json::to_value(__value)
                .map_err(|e| ::toolagent_tool::ToolError::failed(::std::string::ToString::to_string(&e)))
        }
    };

    let wrapper = quote! {
        #[allow(non_camel_case_types)]
        struct #wrapper_ident(::std::sync::Arc<#self_ty>);

        #[::async_trait::async_trait]
        impl ::toolagent_tool::Tool for #wrapper_ident {
            fn descriptor(&self) -> &::toolagent_tool::ToolDescriptor {
                static DESCRIPTOR: ::std::sync::OnceLock<::toolagent_tool::ToolDescriptor> =
                    ::std::sync::OnceLock::new();
                DESCRIPTOR.get_or_init(|| {
                    ::toolagent_tool::ToolDescriptor::new(#name, #description)
                        #(#param_with_calls)*
                })
            }

            async fn call(
                &self,
                args: ::toolagent_tool::ToolArgs,
            ) -> ::std::result::Result<::serde_json::Value, ::toolagent_tool::ToolError> {
                #(#arg_bindings)*
                #call_and_wrap
            }
        }
    };

    let registration = quote! {
        __tools.register(::std::sync::Arc::new(
            #wrapper_ident(::std::sync::Arc::clone(&self)),
        ));
    };

    Ok((wrapper, registration))
}
