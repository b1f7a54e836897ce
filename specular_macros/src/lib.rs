use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, ItemImpl, parse_macro_input};

use crate::generate::{
    describe::generate_describe,
    enums::{generate_attribute_label, generate_model_key},
    factories::generate_factories,
};
use crate::parse::{FactoriesVisitor, ModelVisitor, parse_enum};

mod generate;
mod parse;
mod utils;

/// Derives `specular::descriptor::Describe` for a struct, so a `ModelFactory`
/// can extract a model from it.
///
/// This macro generates:
/// - A member descriptor per named field, with a field accessor, the field's
///   value type (`Option<U>` fields are nullable) and its visibility
/// - A memberwise primary constructor taking every field in declaration order
/// - The annotations written with the helper attributes below
///
/// # Attributes
///
/// On the struct:
/// - `#[model(inclusion = "opt_in")]` - Only included members become properties
///   (the default policy is `"opt_out"`)
/// - `#[model(factories)]` - Merges in the functions of a `#[factories]` impl block
/// - `#[model(exclude_constructor)]` - Keeps the memberwise constructor out of
///   the factory variants
/// - `#[annotate(..)]` - Model-level annotations
///
/// On fields:
/// - `#[annotate(Unit("km"), Range(min = 0, max = 10))]` - Annotations, with
///   positional or named literal arguments
/// - `#[property(name = "..", index = 2, tags("a", "b"))]` - Explicit key metadata;
///   also includes the member under the opt-in policy
/// - `#[included]` / `#[excluded]` - Inclusion markers
/// - `#[readonly]` - The property can't be set through the model
/// - `#[deferred]` - The value may be absent. For `Option` fields presence is
///   probed with `is_some`; other fields need a `has_<name>: bool` companion
/// - `#[construct(default)]` / `#[construct(default = "expr")]` - Makes the
///   constructor parameter optional
///
/// # Examples
///
/// ```ignore
/// use specular::prelude::*;
///
/// #[derive(Model, Debug, Clone)]
/// #[annotate(Entity)]
/// pub struct Car {
///     #[readonly]
///     pub id: u64,
///     #[annotate(Unit("km"))]
///     pub mileage: u32,
///     #[deferred]
///     pub nickname: Option<String>,
///     #[excluded]
///     pub cache: Vec<u8>,
/// }
///
/// let factory = ModelFactory::default();
/// let model = factory.create::<Car, String, String, String>()?;
/// assert!(model.has_property(&"mileage".to_string()));
/// ```
///
/// # Restrictions
///
/// Only non-generic structs with named fields are supported.
///
/// # See Also
///
/// - [`factories`] - Describes additional constructors and factory functions
/// - [`ModelKey`] - Enum keys
#[proc_macro_derive(
    Model,
    attributes(model, annotate, property, included, excluded, readonly, deferred, construct)
)]
pub fn model_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match ModelVisitor::parse_model(&input) {
        Ok(model) => generate_describe(&model).into(),
        Err(error) => error.to_compile_error().into(),
    }
}

/// Describes the constructors and factory functions of an inherent impl block.
///
/// Every associated function without a receiver that returns `Self` is
/// recorded. Pair it with `#[model(factories)]` on the struct.
///
/// # Attributes
///
/// On functions:
/// - (none) - A public function returning `Self` is a constructor
/// - `#[factory]` - A factory function; `#[factory(primary)]` makes it the
///   primary factory variant
/// - `#[excluded_factory]` - Keeps the function out of the factory variants
/// - `#[annotate(..)]` - Factory annotations
///
/// On parameters:
/// - `#[parameter(property = "id")]` - Links the parameter to a property other
///   than the one with the parameter's name
/// - `#[parameter(default)]` / `#[parameter(default = "expr")]` - Makes the
///   parameter optional
///
/// Parameters bound by a pattern (`(x, y): (i32, i32)`) are unnamed, which
/// the extraction engine reports as an invalid factory.
///
/// # Examples
///
/// ```ignore
/// #[derive(Model)]
/// #[model(factories)]
/// pub struct Car {
///     pub id: u64,
///     pub mileage: u32,
/// }
///
/// #[factories]
/// impl Car {
///     pub fn new(id: u64) -> Self {
///         Self { id, mileage: 0 }
///     }
///
///     #[factory]
///     pub fn imported(#[parameter(property = "id")] code: u64, #[parameter(default)] mileage: u32) -> Self {
///         Self { id: code, mileage }
///     }
/// }
/// ```
#[proc_macro_attribute]
pub fn factories(_args: TokenStream, input: TokenStream) -> TokenStream {
    let mut item = parse_macro_input!(input as ItemImpl);

    match FactoriesVisitor::parse_factories(&mut item) {
        Ok(metadata) => {
            let generated = generate_factories(&metadata);
            quote! {
                #item
                #generated
            }
            .into()
        }
        Err(error) => {
            let error = error.to_compile_error();
            quote! {
                #item
                #error
            }
            .into()
        }
    }
}

/// Derives `specular::traits::ModelKey` for an enum.
///
/// Unit variants become key constants in declaration order. A property
/// resolves to the constant named by one of its `tags`, then by its name,
/// then by its index as the ordinal.
///
/// Enums with data-carrying variants are accepted but report the `Variant`
/// key kind, which model extraction rejects.
///
/// # Examples
///
/// ```ignore
/// #[derive(ModelKey, Debug, Clone, PartialEq, Eq, Hash)]
/// pub enum Column {
///     Id,
///     Mileage,
/// }
/// ```
#[proc_macro_derive(ModelKey)]
pub fn model_key_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match parse_enum(&input, "ModelKey", false) {
        Ok(metadata) => generate_model_key(&metadata).into(),
        Err(error) => error.to_compile_error().into(),
    }
}

/// Derives `specular::traits::AttributeLabel` for an enum.
///
/// Each unit variant may reference the annotation it labels with
/// `#[label(Path)]`, where the path is spelled the way the annotation is.
///
/// # Examples
///
/// ```ignore
/// #[derive(AttributeLabel, Debug, Clone, PartialEq, Eq, Hash)]
/// pub enum Meta {
///     #[label(Unit)]
///     Unit,
///     #[label(validation::Range)]
///     Range,
/// }
/// ```
#[proc_macro_derive(AttributeLabel, attributes(label))]
pub fn attribute_label_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match parse_enum(&input, "AttributeLabel", true) {
        Ok(metadata) => generate_attribute_label(&metadata).into(),
        Err(error) => error.to_compile_error().into(),
    }
}
