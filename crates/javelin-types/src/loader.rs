//! The class loading capability the engine is parameterized over, and the
//! descriptor shapes it queries.
//!
//! Descriptors are produced by the (external) skeleton builder or classfile
//! reader and are immutable once handed to the engine; the engine only ever
//! constructs new, substituted copies of the types they contain.

use std::sync::Arc;

use crate::error::Result;
use crate::ty::{ClassType, FunctionType, Type};

/// A field declared by a class.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    pub ty: Type,
}

/// A method declared by a class. Multiple methods may share a name
/// (overloads); a method's generic parameters are the free variables of its
/// [`FunctionType`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodDescriptor {
    pub name: String,
    pub ty: FunctionType,
    /// Declared to accept a variable number of trailing arguments via a
    /// trailing array-typed parameter.
    pub variable_arity: bool,
}

/// The skeleton of a class as seen by the resolution engine.
///
/// `ty` is the class's own type; for a generic class its arguments are the
/// declared parameters as free [`crate::Reference::Variable`]s, e.g.
/// `java.util.List<T>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassDescriptor {
    pub ty: ClassType,
    pub super_class: Option<ClassType>,
    pub interfaces: Vec<ClassType>,
    pub fields: Vec<FieldDescriptor>,
    pub methods: Vec<MethodDescriptor>,
}

impl ClassDescriptor {
    pub fn methods_named<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a MethodDescriptor> + 'a {
        self.methods.iter().filter(move |m| m.name == name)
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Injected capability for fetching class descriptors on demand.
///
/// Implementations own caching and thread-safety. The engine requires
/// loading to be reentrant-safe (a class transitively referencing itself must
/// not recurse forever) and relies on the ancestor relation being finite and
/// acyclic; a hierarchy that violates that is a defect in the loader's data,
/// though the traversals here carry a visited set so they still terminate.
pub trait ClassLoader {
    /// Fetch the descriptor for `ty`, ignoring its type arguments.
    ///
    /// Fails with [`crate::TypeError::ClassNotFound`] when the class cannot
    /// be located.
    fn load_class(&self, ty: &ClassType) -> Result<Arc<ClassDescriptor>>;
}
