//! Parsing of the helper attributes understood by the macros
//!
//! Every helper attribute is recognised by its identifier through a `strum`
//! enum per position (struct, field, factory function, factory parameter),
//! so unknown attributes such as `#[doc]` or `#[serde]` pass through untouched.

use std::str::FromStr;

use proc_macro2::Span;
use strum::{AsRefStr, EnumString};
use syn::{
    Attribute, Expr, Ident, LitBool, LitStr, Meta, Path, Token, bracketed, parenthesized,
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    token,
};

use super::metadata::{AnnotationSpec, ArgumentSpec, DefaultSpec, ValueSpec};
use crate::utils::errors;

/// Helper attributes accepted on a `#[derive(Model)]` struct
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ModelHelper {
    Model,
    Annotate,
}

/// Helper attributes accepted on the fields of a `#[derive(Model)]` struct
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum FieldHelper {
    Annotate,
    Property,
    Included,
    Excluded,
    Readonly,
    Deferred,
    Construct,
}

/// Helper attributes accepted on functions inside `#[factories]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum FactoryHelper {
    Annotate,
    Factory,
    ExcludedFactory,
}

/// Helper attributes accepted on factory parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ParameterHelper {
    Annotate,
    Parameter,
}

/// Identify which helper an attribute is, if any.
pub fn helper_of<H: FromStr>(attr: &Attribute) -> Option<H> {
    attr.path()
        .get_ident()
        .and_then(|ident| H::from_str(&ident.to_string()).ok())
}

/// Join the segments of a path with `::`.
pub fn path_string(path: &Path) -> String {
    path.segments
        .iter()
        .map(|segment| segment.ident.to_string())
        .collect::<Vec<_>>()
        .join("::")
}

fn named(name: &str, value: ValueSpec) -> ArgumentSpec {
    ArgumentSpec {
        name: Some(name.to_string()),
        value,
    }
}

impl Parse for ValueSpec {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        if input.peek(token::Bracket) {
            let content;
            bracketed!(content in input);
            let items = Punctuated::<ValueSpec, Token![,]>::parse_terminated(&content)?;
            return Ok(ValueSpec::List(items.into_iter().collect()));
        }

        let negative = input.peek(Token![-]);
        if negative {
            input.parse::<Token![-]>()?;
        }

        match input.parse::<syn::Lit>()? {
            syn::Lit::Int(int) => {
                let value = int.base10_parse::<i64>()?;
                Ok(ValueSpec::Int(if negative { -value } else { value }))
            }
            syn::Lit::Float(float) => {
                let value = float.base10_parse::<f64>()?;
                Ok(ValueSpec::Float(if negative { -value } else { value }))
            }
            syn::Lit::Str(text) if !negative => Ok(ValueSpec::Text(text.value())),
            syn::Lit::Bool(flag) if !negative => Ok(ValueSpec::Bool(flag.value)),
            other => Err(syn::Error::new(
                other.span(),
                "Expected a string, integer, float, boolean or [list] value",
            )),
        }
    }
}

impl Parse for ArgumentSpec {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        if input.peek(Ident) && input.peek2(Token![=]) {
            let name: Ident = input.parse()?;
            input.parse::<Token![=]>()?;
            return Ok(named(&name.to_string(), input.parse()?));
        }

        Ok(ArgumentSpec {
            name: None,
            value: input.parse()?,
        })
    }
}

impl Parse for AnnotationSpec {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let path = input.call(Path::parse_mod_style)?;
        let mut spec = AnnotationSpec::path(path_string(&path));

        if input.peek(token::Paren) {
            let content;
            parenthesized!(content in input);
            let arguments = Punctuated::<ArgumentSpec, Token![,]>::parse_terminated(&content)?;
            spec.arguments = arguments.into_iter().collect();
        }

        Ok(spec)
    }
}

/// Parse `#[annotate(Unit("km"), Range(min = 0, max = 10), Tracked)]`.
pub fn parse_annotate(attr: &Attribute) -> syn::Result<Vec<AnnotationSpec>> {
    let list = attr.parse_args_with(Punctuated::<AnnotationSpec, Token![,]>::parse_terminated)?;
    Ok(list.into_iter().collect())
}

fn parse_default(meta: &syn::meta::ParseNestedMeta) -> syn::Result<DefaultSpec> {
    if !meta.input.peek(Token![=]) {
        return Ok(DefaultSpec::Trait);
    }

    let lit: LitStr = meta.value()?.parse()?;
    lit.parse::<Expr>()
        .map(|expr| DefaultSpec::Expr(Box::new(expr)))
        .map_err(|e| errors::invalid_default(lit.span(), &e.to_string()))
}

/// Struct-level settings from `#[model(..)]` and `#[annotate(..)]`
#[derive(Debug, Default)]
pub struct ModelAttributes {
    pub annotations: Vec<AnnotationSpec>,
    pub factories: bool,
    pub exclude_constructor: bool,
}

impl ModelAttributes {
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();

        for attr in attrs {
            match helper_of::<ModelHelper>(attr) {
                Some(ModelHelper::Annotate) => result.annotations.extend(parse_annotate(attr)?),
                Some(ModelHelper::Model) => result.parse_model(attr)?,
                None => {}
            }
        }

        Ok(result)
    }

    fn parse_model(&mut self, attr: &Attribute) -> syn::Result<()> {
        let mut settings = AnnotationSpec::builtin("MODEL");

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("inclusion") {
                let lit: LitStr = meta.value()?.parse()?;
                let value = lit.value();
                if value != "opt_in" && value != "opt_out" {
                    return Err(syn::Error::new(
                        lit.span(),
                        "inclusion must be \"opt_in\" or \"opt_out\"",
                    ));
                }
                settings.arguments.push(named("inclusion", ValueSpec::Text(value)));
                Ok(())
            } else if meta.path.is_ident("factories") {
                self.factories = true;
                Ok(())
            } else if meta.path.is_ident("exclude_constructor") {
                self.exclude_constructor = true;
                Ok(())
            } else {
                Err(errors::unknown_argument(
                    meta.path.span_or_call_site(),
                    "model",
                    "inclusion, factories, exclude_constructor",
                ))
            }
        })?;

        if !settings.arguments.is_empty() {
            self.annotations.push(settings);
        }
        Ok(())
    }
}

/// Field-level settings
#[derive(Debug, Default)]
pub struct FieldAttributes {
    pub annotations: Vec<AnnotationSpec>,
    pub readonly: bool,
    pub deferred: bool,
    pub default: Option<DefaultSpec>,
}

impl FieldAttributes {
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();

        for attr in attrs {
            let Some(helper) = helper_of::<FieldHelper>(attr) else {
                continue;
            };

            match helper {
                FieldHelper::Annotate => result.annotations.extend(parse_annotate(attr)?),
                FieldHelper::Property => result.annotations.push(parse_property(attr)?),
                FieldHelper::Included => result.annotations.push(AnnotationSpec::builtin("INCLUDED")),
                FieldHelper::Excluded => result.annotations.push(AnnotationSpec::builtin("EXCLUDED")),
                FieldHelper::Readonly => result.readonly = true,
                FieldHelper::Deferred => result.deferred = true,
                FieldHelper::Construct => {
                    attr.parse_nested_meta(|meta| {
                        if meta.path.is_ident("default") {
                            result.default = Some(parse_default(&meta)?);
                            Ok(())
                        } else {
                            Err(errors::unknown_argument(
                                meta.path.span_or_call_site(),
                                "construct",
                                "default",
                            ))
                        }
                    })?;
                }
            }
        }

        Ok(result)
    }
}

/// Parse `#[property]` / `#[property(name = "..", index = 2, tags("a", "b"))]`.
fn parse_property(attr: &Attribute) -> syn::Result<AnnotationSpec> {
    let mut spec = AnnotationSpec::builtin("PROPERTY");
    if matches!(attr.meta, Meta::Path(_)) {
        return Ok(spec);
    }

    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("name") {
            let lit: LitStr = meta.value()?.parse()?;
            spec.arguments.push(named("name", ValueSpec::Text(lit.value())));
            Ok(())
        } else if meta.path.is_ident("index") {
            match meta.value()?.parse::<ValueSpec>()? {
                index @ ValueSpec::Int(_) => {
                    spec.arguments.push(named("index", index));
                    Ok(())
                }
                _ => Err(meta.error("index must be an integer")),
            }
        } else if meta.path.is_ident("tags") {
            let content;
            parenthesized!(content in meta.input);
            let tags = Punctuated::<LitStr, Token![,]>::parse_terminated(&content)?;
            let tags = tags.iter().map(|tag| ValueSpec::Text(tag.value())).collect();
            spec.arguments.push(named("tags", ValueSpec::List(tags)));
            Ok(())
        } else {
            Err(errors::unknown_argument(
                meta.path.span_or_call_site(),
                "property",
                "name, index, tags",
            ))
        }
    })?;

    Ok(spec)
}

/// Function-level settings inside `#[factories]`
#[derive(Debug, Default)]
pub struct FactoryAttributes {
    pub annotations: Vec<AnnotationSpec>,
    /// `#[factory]` was present
    pub marked: bool,
    pub excluded: bool,
}

impl FactoryAttributes {
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();

        for attr in attrs {
            match helper_of::<FactoryHelper>(attr) {
                Some(FactoryHelper::Annotate) => result.annotations.extend(parse_annotate(attr)?),
                Some(FactoryHelper::ExcludedFactory) => {
                    result.excluded = true;
                    result.annotations.push(AnnotationSpec::builtin("EXCLUDED_FACTORY"));
                }
                Some(FactoryHelper::Factory) => {
                    result.marked = true;
                    result.annotations.push(parse_factory(attr)?);
                }
                None => {}
            }
        }

        Ok(result)
    }
}

/// Parse `#[factory]` / `#[factory(primary)]` / `#[factory(primary = false)]`.
fn parse_factory(attr: &Attribute) -> syn::Result<AnnotationSpec> {
    let mut spec = AnnotationSpec::builtin("FACTORY");
    if matches!(attr.meta, Meta::Path(_)) {
        return Ok(spec);
    }

    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("primary") {
            let primary = if meta.input.peek(Token![=]) {
                meta.value()?.parse::<LitBool>()?.value
            } else {
                true
            };
            spec.arguments.push(named("primary", ValueSpec::Bool(primary)));
            Ok(())
        } else {
            Err(errors::unknown_argument(
                meta.path.span_or_call_site(),
                "factory",
                "primary",
            ))
        }
    })?;

    Ok(spec)
}

/// Parameter-level settings inside `#[factories]`
#[derive(Debug, Default)]
pub struct ParameterAttributes {
    pub annotations: Vec<AnnotationSpec>,
    pub default: Option<DefaultSpec>,
}

impl ParameterAttributes {
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();

        for attr in attrs {
            match helper_of::<ParameterHelper>(attr) {
                Some(ParameterHelper::Annotate) => result.annotations.extend(parse_annotate(attr)?),
                Some(ParameterHelper::Parameter) => {
                    let mut spec = AnnotationSpec::builtin("PARAMETER");
                    attr.parse_nested_meta(|meta| {
                        if meta.path.is_ident("property") {
                            let lit: LitStr = meta.value()?.parse()?;
                            spec.arguments.push(named("property", ValueSpec::Text(lit.value())));
                            Ok(())
                        } else if meta.path.is_ident("default") {
                            result.default = Some(parse_default(&meta)?);
                            Ok(())
                        } else {
                            Err(errors::unknown_argument(
                                meta.path.span_or_call_site(),
                                "parameter",
                                "property, default",
                            ))
                        }
                    })?;

                    if !spec.arguments.is_empty() {
                        result.annotations.push(spec);
                    }
                }
                None => {}
            }
        }

        Ok(result)
    }
}

/// Parse `#[label(units::Unit)]` on a label enum variant.
pub fn parse_label(attrs: &[Attribute]) -> syn::Result<Option<LitStr>> {
    let mut label = None;

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("label")) {
        let path = attr.parse_args_with(Path::parse_mod_style)?;
        if label.is_some() {
            return Err(syn::Error::new_spanned(attr, "A variant can reference only one annotation"));
        }
        label = Some(LitStr::new(&path_string(&path), Span::call_site()));
    }

    Ok(label)
}

trait SpanOrCallSite {
    fn span_or_call_site(&self) -> Span;
}

impl SpanOrCallSite for Path {
    fn span_or_call_site(&self) -> Span {
        self.segments
            .first()
            .map(|segment| segment.ident.span())
            .unwrap_or_else(Span::call_site)
    }
}
