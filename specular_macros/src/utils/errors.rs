//! Utilities for generating consistent error messages

use proc_macro2::Span;
use syn::Error;

pub fn not_a_struct(span: Span, derive: &str) -> Error {
    Error::new(
        span,
        format!("{derive} can only be derived for structs with named fields"),
    )
}

pub fn not_an_enum(span: Span, derive: &str) -> Error {
    Error::new(span, format!("{derive} can only be derived for enums"))
}

pub fn generic_target(span: Span, derive: &str) -> Error {
    Error::new(
        span,
        format!("{derive} cannot be used on generic types; describe a concrete type instead"),
    )
}

pub fn unknown_argument(span: Span, attribute: &str, expected: &str) -> Error {
    Error::new(
        span,
        format!("Unknown argument for #[{attribute}]. Expected one of: {expected}"),
    )
}

pub fn invalid_default(span: Span, detail: &str) -> Error {
    Error::new(
        span,
        format!("Invalid default expression: {detail}"),
    )
}

pub fn factory_must_return_self(span: Span) -> Error {
    Error::new(
        span,
        "Factory functions must return Self and take no receiver",
    )
}

pub fn unsupported_parameter(span: Span, detail: &str) -> Error {
    Error::new(
        span,
        format!("Unsupported factory parameter: {detail}"),
    )
}

pub fn trait_impl_factories(span: Span) -> Error {
    Error::new(
        span,
        "#[factories] only applies to inherent impl blocks",
    )
}
