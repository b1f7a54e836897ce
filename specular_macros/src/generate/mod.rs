//! Code generation for the specular macros
//!
//! Every generated path is absolute (`::specular::..`) so the output works
//! wherever the derive is used, including inside `specular` itself.

use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::{Ident, LitStr, Type, ext::IdentExt};

use crate::parse::{
    AnnotationSpec, AnnotationTarget, DefaultSpec, ValueSpec, VisibilityKind,
};
use crate::utils::types;

pub mod describe;
pub mod enums;
pub mod factories;

impl ToTokens for ValueSpec {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let value = match self {
            ValueSpec::Text(text) => quote!(Text(::std::string::String::from(#text))),
            ValueSpec::Int(int) => quote!(Int(#int)),
            ValueSpec::Float(float) => quote!(Float(#float)),
            ValueSpec::Bool(flag) => quote!(Bool(#flag)),
            ValueSpec::List(items) => quote!(List(::std::vec![#(#items),*])),
        };

        tokens.extend(quote!(::specular::attributes::AttributeValue::#value));
    }
}

impl ToTokens for AnnotationSpec {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let mut annotation = match &self.target {
            AnnotationTarget::Builtin(name) => {
                let constant = Ident::new(name, proc_macro2::Span::call_site());
                quote!(::specular::annotations::Annotation::new(
                    ::specular::annotations::builtin::#constant
                ))
            }
            AnnotationTarget::Path(path) => {
                quote!(::specular::annotations::Annotation::marker(#path))
            }
        };

        for argument in &self.arguments {
            let value = &argument.value;
            annotation = match &argument.name {
                Some(name) => quote!(#annotation.with(#name, #value)),
                None => quote!(#annotation.with_positional(#value)),
            };
        }

        tokens.extend(annotation);
    }
}

impl ToTokens for VisibilityKind {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let variant = match self {
            VisibilityKind::Public => quote!(Public),
            VisibilityKind::Restricted => quote!(Restricted),
            VisibilityKind::Private => quote!(Private),
        };

        tokens.extend(quote!(::specular::descriptor::Visibility::#variant));
    }
}

/// The runtime type tag of a field or parameter type.
pub fn value_type(ty: &Type) -> TokenStream {
    match types::option_inner(ty) {
        Some(inner) => quote!(::specular::descriptor::ValueType::optional::<#inner>()),
        None => quote!(::specular::descriptor::ValueType::of::<#ty>()),
    }
}

/// The string a Rust identifier is known by at runtime, without `r#`.
pub fn name_of(ident: &Ident) -> LitStr {
    LitStr::new(&ident.unraw().to_string(), ident.span())
}

/// Reads argument `index` out of an `Arguments` binding called `args`.
pub fn take_argument(index: usize, ty: &Type, default: Option<&DefaultSpec>) -> TokenStream {
    match default {
        None => quote!(args.take::<#ty>(#index)?),
        Some(DefaultSpec::Trait) => {
            quote!(args.take_or_else::<#ty>(#index, ::core::default::Default::default)?)
        }
        Some(DefaultSpec::Expr(expr)) => quote!(args.take_or_else::<#ty>(#index, || #expr)?),
    }
}

/// The `|args| ..` binding of an invoker, `mut` only when it is read from.
pub fn invoker_binding(parameters: usize) -> TokenStream {
    if parameters == 0 {
        quote!(_args: ::specular::descriptor::Arguments)
    } else {
        quote!(mut args: ::specular::descriptor::Arguments)
    }
}
