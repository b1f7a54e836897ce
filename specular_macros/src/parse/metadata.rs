//! Metadata structures for parsed model types and factory blocks
//!
//! These structures hold all the information extracted from the AST during
//! parsing. They provide a clean interface between the parsing phase and
//! the code generation phase.

use proc_macro2::Span;
use syn::{Expr, Ident, LitStr, Type};

/// A literal annotation argument value
#[derive(Debug, Clone)]
pub enum ValueSpec {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    List(Vec<ValueSpec>),
}

/// One argument of an annotation, either named (`precision = 2`) or positional
#[derive(Debug, Clone)]
pub struct ArgumentSpec {
    pub name: Option<String>,
    pub value: ValueSpec,
}

/// Where an annotation's identity comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnotationTarget {
    /// One of the engine's own annotations, by constant name (`PROPERTY`)
    Builtin(&'static str),
    /// A user annotation, spelled as its path (`units::Unit`)
    Path(String),
}

/// An annotation to attach to a type, member, factory or parameter
#[derive(Debug, Clone)]
pub struct AnnotationSpec {
    pub target: AnnotationTarget,
    pub arguments: Vec<ArgumentSpec>,
}

impl AnnotationSpec {
    pub fn builtin(name: &'static str) -> Self {
        Self {
            target: AnnotationTarget::Builtin(name),
            arguments: Vec::new(),
        }
    }

    pub fn path(path: String) -> Self {
        Self {
            target: AnnotationTarget::Path(path),
            arguments: Vec::new(),
        }
    }

    pub fn with(mut self, name: &str, value: ValueSpec) -> Self {
        self.arguments.push(ArgumentSpec {
            name: Some(name.to_string()),
            value,
        });
        self
    }
}

/// Visibility of a member or factory, as the runtime sees it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityKind {
    Public,
    Restricted,
    Private,
}

impl From<&syn::Visibility> for VisibilityKind {
    fn from(vis: &syn::Visibility) -> Self {
        match vis {
            syn::Visibility::Public(_) => VisibilityKind::Public,
            syn::Visibility::Restricted(_) => VisibilityKind::Restricted,
            syn::Visibility::Inherited => VisibilityKind::Private,
        }
    }
}

/// How a factory parameter is filled when the caller leaves it out
#[derive(Debug, Clone)]
pub enum DefaultSpec {
    /// `Default::default()`
    Trait,
    /// A user expression, parsed from `default = "expr"`
    Expr(Box<Expr>),
}

/// Complete metadata for a `#[derive(Model)]` struct
#[derive(Debug, Clone)]
pub struct ModelMetadata {
    /// The struct name
    pub name: Ident,

    /// Type-level annotations, including the `model` settings annotation
    pub annotations: Vec<AnnotationSpec>,

    /// Whether `#[factories]` functions are merged in
    pub factories: bool,

    /// Whether the memberwise constructor is kept out of the factory variants
    pub exclude_constructor: bool,

    /// All named fields in declaration order
    pub fields: Vec<FieldMetadata>,
}

/// Metadata for one struct field
#[derive(Debug, Clone)]
pub struct FieldMetadata {
    pub name: Ident,
    pub ty: Type,
    pub visibility: VisibilityKind,
    pub annotations: Vec<AnnotationSpec>,

    /// `#[readonly]`: no setter is generated
    pub readonly: bool,

    /// `#[deferred]`: the value may be absent
    pub deferred: bool,

    /// `#[construct(default ..)]`: optional in the memberwise constructor
    pub default: Option<DefaultSpec>,
}

/// Everything `#[factories]` collected from one impl block
#[derive(Debug, Clone)]
pub struct FactoriesMetadata {
    pub self_name: Ident,
    pub factories: Vec<FactoryMetadata>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactoryKindSpec {
    Constructor,
    Function,
}

/// Metadata for one associated function that creates `Self`
#[derive(Debug, Clone)]
pub struct FactoryMetadata {
    pub name: Ident,
    pub kind: FactoryKindSpec,
    pub visibility: VisibilityKind,
    pub annotations: Vec<AnnotationSpec>,
    pub parameters: Vec<ParameterMetadata>,
}

#[derive(Debug, Clone)]
pub struct ParameterMetadata {
    /// `None` when the parameter is bound by a pattern
    pub name: Option<Ident>,
    pub ty: Type,
    pub annotations: Vec<AnnotationSpec>,
    pub default: Option<DefaultSpec>,
}

/// Metadata for a `ModelKey` or `AttributeLabel` enum
#[derive(Debug, Clone)]
pub struct EnumMetadata {
    pub name: Ident,
    pub variants: Vec<VariantMetadata>,

    /// Whether any variant carries data
    pub has_data: bool,
}

#[derive(Debug, Clone)]
pub struct VariantMetadata {
    pub name: Ident,
    /// `#[label(Path)]`: the annotation this constant stands for
    pub label: Option<LitStr>,
}

/// Helper for collecting multiple errors during parsing
#[derive(Debug, Default)]
pub struct ErrorCollector {
    errors: Vec<syn::Error>,
}

impl ErrorCollector {
    /// Create a new error collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an error to the collection
    pub fn add(&mut self, error: syn::Error) {
        self.errors.push(error);
    }

    /// Add an error with a specific span and message
    pub fn add_spanned<T: quote::ToTokens>(&mut self, tokens: T, message: impl std::fmt::Display) {
        self.errors.push(syn::Error::new_spanned(tokens, message));
    }

    /// Add an error at a raw span
    pub fn add_at(&mut self, span: Span, message: impl std::fmt::Display) {
        self.errors.push(syn::Error::new(span, message));
    }

    /// Record the error of a fallible step and keep its value, if any
    pub fn collect<T>(&mut self, result: syn::Result<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.add(error);
                None
            }
        }
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Get the number of errors
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Check if the collector is empty
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Convert into a Result, combining all errors if any exist
    pub fn into_result(self) -> Result<(), syn::Error> {
        let mut iter = self.errors.into_iter();
        match iter.next() {
            None => Ok(()),
            Some(mut combined) => {
                for error in iter {
                    combined.combine(error);
                }
                Err(combined)
            }
        }
    }

    /// Convert into a Result with a value, combining all errors if any exist
    pub fn into_result_with<T>(self, value: T) -> Result<T, syn::Error> {
        self.into_result().map(|_| value)
    }
}
