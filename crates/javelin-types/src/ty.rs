//! The closed set of type variants the resolution engine operates on.
//!
//! Every value here is immutable and structurally comparable. The engine never
//! mutates a type it is given; substitution and reduction construct new values.

use serde::{Deserialize, Serialize};

/// A Java primitive type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Primitive {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
}

impl Primitive {
    /// Whether `self :> other` under the JLS 4.10.1 widening chain:
    ///
    /// ```text
    /// double :> float :> long :> int :> short :> byte
    ///                            int :> char
    /// ```
    ///
    /// `char` relates to `int` only; in particular `char` and `short` are
    /// incomparable.
    pub fn widens_from(self, other: Primitive) -> bool {
        use Primitive::*;
        if self == other {
            return true;
        }
        match self {
            Double => Float.widens_from(other),
            Float => Long.widens_from(other),
            Long => Int.widens_from(other),
            Int => other == Char || Short.widens_from(other),
            Short => other == Byte,
            Byte | Char | Boolean => false,
        }
    }
}

/// One level of a (possibly nested) class reference: a simple name plus the
/// generic arguments supplied at that level.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClassComponent {
    pub name: String,
    pub type_args: Vec<Reference>,
}

/// A class reference such as `java.util.Map<K, V>.Entry<K, V>`.
///
/// `components` lists the enclosing classes outermost first, each carrying its
/// own argument list. Two class types are *base equivalent* when their simple
/// name sequences match, ignoring generic arguments.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClassType {
    pub pkg: String,
    pub components: Vec<ClassComponent>,
}

impl ClassType {
    /// A non-generic, non-nested class reference.
    pub fn new(pkg: impl Into<String>, name: impl Into<String>) -> Self {
        Self::generic(pkg, name, Vec::new())
    }

    /// A non-nested class reference with generic arguments.
    pub fn generic(
        pkg: impl Into<String>,
        name: impl Into<String>,
        type_args: Vec<Reference>,
    ) -> Self {
        ClassType {
            pkg: pkg.into(),
            components: vec![ClassComponent {
                name: name.into(),
                type_args,
            }],
        }
    }

    /// A nested class reference with explicit components.
    pub fn nested(pkg: impl Into<String>, components: Vec<ClassComponent>) -> Self {
        ClassType {
            pkg: pkg.into(),
            components,
        }
    }

    pub fn object() -> Self {
        ClassType::new("java.lang", "Object")
    }

    /// The innermost simple name.
    pub fn simple_name(&self) -> &str {
        self.components
            .last()
            .map(|c| c.name.as_str())
            .unwrap_or("")
    }

    /// Whether the two references name the same class, possibly with different
    /// instantiations. Compares the simple name sequence only.
    pub fn base_equivalent(&self, other: &ClassType) -> bool {
        self.components.len() == other.components.len()
            && self
                .components
                .iter()
                .zip(&other.components)
                .all(|(a, b)| a.name == b.name)
    }
}

/// A wildcard occurrence, e.g. `? extends Number` or `? super Integer`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Wildcard {
    pub lower: Option<Box<Reference>>,
    pub upper: Option<Box<Reference>>,
}

/// A reference type: anything usable where a non-primitive is required.
///
/// Keeping references as their own sum type (rather than a predicate over
/// [`Type`]) means substitution is total: there is no "non-reference reached
/// substitution" failure mode to guard against at runtime.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Reference {
    Clazz(ClassType),
    Array(Box<Type>),
    Variable(String),
    Wildcard(Wildcard),
    Null,
}

impl Reference {
    pub fn class(pkg: impl Into<String>, name: impl Into<String>) -> Self {
        Reference::Clazz(ClassType::new(pkg, name))
    }

    pub fn object() -> Self {
        Reference::Clazz(ClassType::object())
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Reference::Variable(name.into())
    }

    pub fn array(element: Type) -> Self {
        Reference::Array(Box::new(element))
    }

    pub fn as_clazz(&self) -> Option<&ClassType> {
        match self {
            Reference::Clazz(c) => Some(c),
            _ => None,
        }
    }
}

/// A method signature, carrying the method's own generic parameters.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionType {
    pub return_type: Type,
    pub params: Vec<Type>,
    /// Names of the generic parameters declared by the method itself (as
    /// opposed to those of its enclosing class).
    pub type_args: Vec<String>,
}

impl FunctionType {
    pub fn new(return_type: Type, params: Vec<Type>) -> Self {
        FunctionType {
            return_type,
            params,
            type_args: Vec::new(),
        }
    }

    pub fn generic(return_type: Type, params: Vec<Type>, type_args: Vec<String>) -> Self {
        FunctionType {
            return_type,
            params,
            type_args,
        }
    }
}

/// Any type the engine can be asked about.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
    Primitive(Primitive),
    Reference(Reference),
    Function(Box<FunctionType>),
}

impl Type {
    pub fn class(pkg: impl Into<String>, name: impl Into<String>) -> Self {
        Type::Reference(Reference::class(pkg, name))
    }

    pub fn generic_class(
        pkg: impl Into<String>,
        name: impl Into<String>,
        type_args: Vec<Reference>,
    ) -> Self {
        Type::Reference(Reference::Clazz(ClassType::generic(pkg, name, type_args)))
    }

    pub fn object() -> Self {
        Type::Reference(Reference::object())
    }

    pub fn null() -> Self {
        Type::Reference(Reference::Null)
    }

    pub fn array(element: Type) -> Self {
        Type::Reference(Reference::array(element))
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Type::Reference(Reference::variable(name))
    }

    pub fn boolean() -> Self {
        Type::Primitive(Primitive::Boolean)
    }

    pub fn byte() -> Self {
        Type::Primitive(Primitive::Byte)
    }

    pub fn char() -> Self {
        Type::Primitive(Primitive::Char)
    }

    pub fn short() -> Self {
        Type::Primitive(Primitive::Short)
    }

    pub fn int() -> Self {
        Type::Primitive(Primitive::Int)
    }

    pub fn long() -> Self {
        Type::Primitive(Primitive::Long)
    }

    pub fn float() -> Self {
        Type::Primitive(Primitive::Float)
    }

    pub fn double() -> Self {
        Type::Primitive(Primitive::Double)
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, Type::Primitive(_))
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, Type::Reference(_))
    }

    pub fn as_reference(&self) -> Option<&Reference> {
        match self {
            Type::Reference(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_clazz(&self) -> Option<&ClassType> {
        self.as_reference().and_then(Reference::as_clazz)
    }
}

impl From<Reference> for Type {
    fn from(r: Reference) -> Self {
        Type::Reference(r)
    }
}

impl From<ClassType> for Reference {
    fn from(c: ClassType) -> Self {
        Reference::Clazz(c)
    }
}

impl From<ClassType> for Type {
    fn from(c: ClassType) -> Self {
        Type::Reference(Reference::Clazz(c))
    }
}

impl From<Primitive> for Type {
    fn from(p: Primitive) -> Self {
        Type::Primitive(p)
    }
}
