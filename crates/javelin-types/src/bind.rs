//! Binding construction and substitution.
//!
//! A binding maps generic type-variable names to the concrete references they
//! are instantiated with, derived by matching a concrete type against a
//! "template" (generic-parameterized) type. For example, matching
//! `java.util.ArrayList<String>` against `java.util.ArrayList<T>` yields
//! `{T -> String}`.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;

use crate::error::{BindError, Result};
use crate::hierarchy::reduce;
use crate::loader::ClassLoader;
use crate::ty::{ClassComponent, ClassType, FunctionType, Reference, Type, Wildcard};

/// A single-valued mapping from type-variable names to references.
///
/// Bindings are internally consistent: inserting a second, non-equal value
/// for a name is a conflict, never a silent overwrite.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Binding {
    map: HashMap<String, Reference>,
}

/// A variable was assigned two different values while merging bindings.
struct BindConflict {
    name: String,
}

impl Binding {
    pub fn new() -> Self {
        Binding::default()
    }

    fn single(name: impl Into<String>, value: Reference) -> Self {
        let mut map = HashMap::new();
        map.insert(name.into(), value);
        Binding { map }
    }

    pub fn get(&self, name: &str) -> Option<&Reference> {
        self.map.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Reference)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn merge(&mut self, other: Binding) -> std::result::Result<(), BindConflict> {
        for (name, value) in other.map {
            match self.map.entry(name) {
                Entry::Vacant(e) => {
                    e.insert(value);
                }
                Entry::Occupied(e) => {
                    if *e.get() != value {
                        return Err(BindConflict {
                            name: e.key().clone(),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    /// Merge `other` into `self`, reporting a conflict as a [`BindError`]
    /// naming the two types being bound.
    fn merge_for(
        &mut self,
        other: Binding,
        concrete: &dyn fmt::Display,
        template: &dyn fmt::Display,
    ) -> Result<()> {
        self.merge(other).map_err(|c| {
            BindError(format!(
                "cannot bind {concrete} to {template}: {} assigned different types",
                c.name
            ))
            .into()
        })
    }
}

/// Compute the binding implied by matching `concrete` against `template`.
///
/// Shape-incompatible pairings (e.g. a primitive against a class template)
/// yield an empty binding; this permissive default mirrors how erased and
/// partially-generic code is matched. A [`BindError`] is raised when the two
/// class types share no base identity, or when a variable would be assigned
/// two different values.
pub fn bind(loader: &dyn ClassLoader, concrete: &Type, template: &Type) -> Result<Binding> {
    match (concrete, template) {
        (Type::Reference(c), Type::Reference(t)) => bind_reference(loader, c, t),
        _ => Ok(Binding::new()),
    }
}

fn bind_reference(
    loader: &dyn ClassLoader,
    concrete: &Reference,
    template: &Reference,
) -> Result<Binding> {
    match (concrete, template) {
        // A generic variable can be bound to any reference type.
        (c, Reference::Variable(name)) => Ok(Binding::single(name.clone(), c.clone())),
        // Wildcard lower/upper bound binding is not modeled yet.
        (_, Reference::Wildcard(_)) => Ok(Binding::new()),
        (Reference::Clazz(c), Reference::Clazz(t)) => bind_class(loader, c, t),
        (Reference::Array(c), Reference::Array(t)) => bind(loader, c, t),
        _ => Ok(Binding::new()),
    }
}

/// Class-against-class binding.
///
/// `concrete` is first reduced toward `template`'s base identity, so binding
/// works when the concrete type is a subtype rather than the exact same base:
/// matching `ArrayList<String>` against `Collection<T>` still yields
/// `{T -> String}`.
pub(crate) fn bind_class(
    loader: &dyn ClassLoader,
    concrete: &ClassType,
    template: &ClassType,
) -> Result<Binding> {
    let Some(reduced) = reduce(loader, template, concrete)? else {
        return Err(BindError(format!("cannot bind {concrete} to {template}")).into());
    };

    let mut binding = Binding::new();
    for (c, t) in reduced.components.iter().zip(&template.components) {
        // This may be too strict for erased types.
        if c.name != t.name {
            return Err(BindError(format!("cannot bind {concrete} to {template}")).into());
        }

        let object = Reference::object();
        for j in 0..c.type_args.len().max(t.type_args.len()) {
            // A missing argument position is read as java.lang.Object, so
            // binding raw ArrayList against ArrayList<T> behaves as if the
            // former were ArrayList<Object>.
            let cr = c.type_args.get(j).unwrap_or(&object);
            let tr = t.type_args.get(j).unwrap_or(&object);
            let new = bind_reference(loader, cr, tr)?;
            binding.merge_for(new, concrete, template)?;
        }
    }
    Ok(binding)
}

/// Compute the binding implied by matching a concrete function type against a
/// template function type, as used for a method's own generic parameters.
///
/// Return types are bound first, then parameters positionally. When
/// `variable_arity` is set, the last template parameter must be an array; it
/// is bound against a single trailing array argument when one is supplied, or
/// against the first excess argument otherwise (further excess arguments are
/// checked by overload matching, not bound here).
///
/// # Panics
///
/// Panics when the parameter lists are not arity compatible: equal lengths
/// without `variable_arity`, or at least the fixed-parameter count with it.
/// That is a caller contract violation, not a resolvable condition.
pub fn bind_function(
    loader: &dyn ClassLoader,
    concrete: &FunctionType,
    template: &FunctionType,
    variable_arity: bool,
) -> Result<Binding> {
    let mut binding = bind(loader, &concrete.return_type, &template.return_type)?;

    let fixed = if variable_arity {
        assert!(
            concrete.params.len() + 1 >= template.params.len(),
            "bind_function: {} arguments cannot satisfy the {} fixed parameters of {template}",
            concrete.params.len(),
            template.params.len() - 1,
        );
        template.params.len() - 1
    } else {
        assert_eq!(
            concrete.params.len(),
            template.params.len(),
            "bind_function: parameter lists of {concrete} and {template} are not arity compatible",
        );
        template.params.len()
    };

    for (cp, tp) in concrete.params.iter().zip(&template.params).take(fixed) {
        let new = bind(loader, cp, tp)?;
        binding.merge_for(new, concrete, template)?;
    }

    if variable_arity && concrete.params.len() > fixed {
        let va_param = &template.params[fixed];
        let Type::Reference(Reference::Array(element)) = va_param else {
            panic!("bind_function: variable-arity template {template} must end with an array");
        };
        let trailing = &concrete.params[fixed];
        let new = if concrete.params.len() == template.params.len()
            && matches!(trailing, Type::Reference(Reference::Array(_)))
        {
            // A lone trailing array argument matches the array parameter
            // itself rather than its element type.
            bind(loader, trailing, va_param)?
        } else {
            bind(loader, trailing, element)?
        };
        binding.merge_for(new, concrete, template)?;
    }

    Ok(binding)
}

/// Rewrite `reference`, replacing every bound variable occurrence with its
/// instantiation. Unbound variables pass through unchanged; partial bindings
/// are legal when only some generics are known.
pub fn substitute(reference: &Reference, binding: &Binding) -> Reference {
    match reference {
        Reference::Variable(name) => binding
            .get(name)
            .cloned()
            .unwrap_or_else(|| reference.clone()),
        Reference::Wildcard(w) => Reference::Wildcard(Wildcard {
            lower: w.lower.as_ref().map(|r| Box::new(substitute(r, binding))),
            upper: w.upper.as_ref().map(|r| Box::new(substitute(r, binding))),
        }),
        Reference::Array(element) => {
            Reference::Array(Box::new(substitute_type(element, binding)))
        }
        Reference::Clazz(ct) => Reference::Clazz(substitute_class(ct, binding)),
        Reference::Null => Reference::Null,
    }
}

pub(crate) fn substitute_class(ct: &ClassType, binding: &Binding) -> ClassType {
    ClassType {
        pkg: ct.pkg.clone(),
        components: ct
            .components
            .iter()
            .map(|c| ClassComponent {
                name: c.name.clone(),
                type_args: c.type_args.iter().map(|r| substitute(r, binding)).collect(),
            })
            .collect(),
    }
}

fn substitute_type(ty: &Type, binding: &Binding) -> Type {
    match ty {
        Type::Reference(r) => Type::Reference(substitute(r, binding)),
        other => other.clone(),
    }
}

/// Rewrite a function type under `binding`. Any generic parameter of the
/// method that the binding covers is dropped from `type_args`; the remainder
/// stays free.
pub fn substitute_function(ty: &FunctionType, binding: &Binding) -> FunctionType {
    FunctionType {
        return_type: substitute_type(&ty.return_type, binding),
        params: ty
            .params
            .iter()
            .map(|p| substitute_type(p, binding))
            .collect(),
        type_args: ty
            .type_args
            .iter()
            .filter(|name| binding.get(name).is_none())
            .cloned()
            .collect(),
    }
}
