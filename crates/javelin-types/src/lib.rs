//! Generics-aware type resolution for the Javelin compiler front end.
//!
//! This crate decides subtyping, builds and applies substitutions for generic
//! type parameters, and resolves overloaded method and field references
//! against a class hierarchy fetched on demand through an injected
//! [`ClassLoader`]. Everything here is a pure function of its inputs plus the
//! loader: the engine keeps no state of its own, and descriptor values are
//! immutable once loaded.
//!
//! The pieces, leaves first:
//!
//! - the type model ([`Type`], [`Reference`], [`ClassType`], ...);
//! - the subtype judgment ([`subtype`]);
//! - the hierarchy reducer ([`reduce`]), which walks a class's ancestors
//!   substituting generics along the way;
//! - binding construction and substitution ([`bind`], [`bind_function`],
//!   [`substitute`], [`substitute_function`]);
//! - method and field resolution ([`resolve_method`], [`resolve_field`]),
//!   the former following JLS 15.12's three phases.

#![forbid(unsafe_code)]

mod bind;
mod error;
mod format;
mod hierarchy;
mod loader;
mod resolve;
mod store;
mod subtype;
mod ty;

pub use crate::bind::{bind, bind_function, substitute, substitute_function, Binding};
pub use crate::error::{BindError, Result, TypeError};
pub use crate::hierarchy::{has_method, reduce};
pub use crate::loader::{ClassDescriptor, ClassLoader, FieldDescriptor, MethodDescriptor};
pub use crate::resolve::{
    boxed_class, resolve_field, resolve_method, unboxed, FieldResolution, MethodResolution,
};
pub use crate::store::ClassStore;
pub use crate::subtype::subtype;
pub use crate::ty::{
    ClassComponent, ClassType, FunctionType, Primitive, Reference, Type, Wildcard,
};
