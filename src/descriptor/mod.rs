//! Type introspection: what the extraction engine knows about a target type.
//!
//! A [`TypeDescriptor`] lists the members and factories of a type together with
//! their annotations. `#[derive(Model)]` and `#[factories]` generate one through
//! the [`Describe`] trait at compile time; it can also be written by hand:
//!
//! ```ignore
//! impl Describe for Point {
//!     fn describe() -> TypeDescriptor<Self> {
//!         TypeDescriptor::new("Point")
//!             .member(MemberDescriptor::new("x", ValueType::of::<i32>(), field_accessor!(Point, x)))
//!             .factory(
//!                 FactoryDescriptor::primary_constructor("Point", |mut args| {
//!                     Ok(Point { x: args.take(0)? })
//!                 })
//!                 .parameter(ParameterDescriptor::of::<i32>("x")),
//!             )
//!     }
//! }
//! ```

use std::fmt;

use strum::{AsRefStr, Display};

use crate::annotations::Annotation;

pub mod arguments;
pub mod factory;
pub mod member;
pub mod value_type;

pub use arguments::{Arguments, DynValue, FactoryArg, arg};
pub use factory::{FactoryDescriptor, FactoryKind, Invoker, ParameterDescriptor};
pub use member::{FieldAccessor, FieldGetter, FieldSetter, Initialization, MemberDescriptor};
pub use value_type::ValueType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
pub enum Visibility {
    Public,
    /// `pub(crate)`, `pub(super)` and `pub(in ..)`.
    Restricted,
    Private,
}

/// Implemented by types that can describe their own members and factories.
pub trait Describe: Sized + 'static {
    fn describe() -> TypeDescriptor<Self>;
}

pub struct TypeDescriptor<T> {
    pub name: &'static str,
    pub annotations: Vec<Annotation>,
    pub members: Vec<MemberDescriptor<T>>,
    pub factories: Vec<FactoryDescriptor<T>>,
}

impl<T> TypeDescriptor<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            annotations: Vec::new(),
            members: Vec::new(),
            factories: Vec::new(),
        }
    }

    pub fn annotated(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn member(mut self, member: MemberDescriptor<T>) -> Self {
        self.members.push(member);
        self
    }

    pub fn factory(mut self, factory: FactoryDescriptor<T>) -> Self {
        self.factories.push(factory);
        self
    }

    pub fn find_member(&self, name: &str) -> Option<&MemberDescriptor<T>> {
        self.members.iter().find(|m| m.name == name)
    }
}

impl<T> Clone for TypeDescriptor<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            annotations: self.annotations.clone(),
            members: self.members.clone(),
            factories: self.factories.clone(),
        }
    }
}

impl<T> fmt::Debug for TypeDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("name", &self.name)
            .field("annotations", &self.annotations)
            .field("members", &self.members)
            .field("factories", &self.factories)
            .finish()
    }
}
