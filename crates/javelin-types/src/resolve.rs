//! Overloaded method and field resolution over the substituted hierarchy.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use crate::bind::{bind_class, bind_function, substitute, substitute_class, substitute_function};
use crate::error::{Result, TypeError};
use crate::loader::{ClassDescriptor, ClassLoader, FieldDescriptor, MethodDescriptor};
use crate::subtype::subtype;
use crate::ty::{ClassType, FunctionType, Primitive, Reference, Type};

/// The outcome of method resolution: the declaring class, the method as
/// declared, and the method's instantiated type. `ty` can differ from
/// `method.ty` since it carries the substitutions for any generic variables
/// bound by the receiver and the call site.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodResolution {
    pub class: Arc<ClassDescriptor>,
    pub method: MethodDescriptor,
    pub ty: FunctionType,
}

/// The outcome of field resolution: the declaring class, the field as
/// declared, and the field's type with the owner's substitutions applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldResolution {
    pub class: Arc<ClassDescriptor>,
    pub field: FieldDescriptor,
    pub ty: Type,
}

/// Resolve the method invoked by `receiver.name(args)` following JLS 15.12.
///
/// Resolution runs in three phases, stopping at the first that produces a
/// match:
///
/// 1. exact arity, no autoboxing, no variable arity;
/// 2. as phase 1, but primitive/boxed mismatches are permitted;
/// 3. as phase 2, but variable-arity methods may also match when their
///    declared parameter count is at most one more than the argument count.
///
/// `args` are the *static* argument types of the call. All phases failing is
/// [`TypeError::MethodNotFound`].
pub fn resolve_method(
    loader: &dyn ClassLoader,
    receiver: &ClassType,
    name: &str,
    args: &[Type],
) -> Result<MethodResolution> {
    // Phase 1: exact matches only.
    if let Some(found) = resolve_method_phase(loader, receiver, name, args, false, false)? {
        return Ok(found);
    }
    // Phase 2: consider autoboxing.
    if let Some(found) = resolve_method_phase(loader, receiver, name, args, true, false)? {
        return Ok(found);
    }
    // Phase 3: consider variable arity as well.
    if let Some(found) = resolve_method_phase(loader, receiver, name, args, true, true)? {
        return Ok(found);
    }

    let rendered: Vec<String> = args.iter().map(|a| a.to_string()).collect();
    Err(TypeError::MethodNotFound {
        signature: format!("{name}({})", rendered.join(", ")),
        receiver: receiver.to_string(),
    })
}

/// One resolution phase: gather candidates over the whole hierarchy, then
/// pick the best match.
fn resolve_method_phase(
    loader: &dyn ClassLoader,
    receiver: &ClassType,
    name: &str,
    args: &[Type],
    autoboxing: bool,
    varargs: bool,
) -> Result<Option<MethodResolution>> {
    let mut worklist: VecDeque<ClassType> = VecDeque::new();
    worklist.push_back(receiver.clone());
    let mut seen: HashSet<ClassType> = HashSet::new();
    let mut candidates: Vec<MethodResolution> = Vec::new();

    while let Some(ty) = worklist.pop_front() {
        if !seen.insert(ty.clone()) {
            continue;
        }
        let desc = loader.load_class(&ty)?;
        let class_binding = bind_class(loader, &ty, &desc.ty)?;

        for m in desc.methods_named(name) {
            // Rule out impossible arities before doing any substitution work.
            let arity_ok = m.ty.params.len() == args.len()
                || (varargs && m.variable_arity && m.ty.params.len() <= args.len() + 1);
            if !arity_ok {
                continue;
            }

            // First substitute the class's type parameters, then the
            // method's own: the two bindings are independent, since a
            // method's generic parameters shadow nothing at class level.
            let mt = substitute_function(&m.ty, &class_binding);
            let call_site = FunctionType::new(mt.return_type.clone(), args.to_vec());
            let call_binding = bind_function(loader, &call_site, &mt, m.variable_arity)?;
            let mt = substitute_function(&mt, &call_binding);

            tracing::trace!(method = name, ty = %mt, declared_in = %desc.ty, "overload candidate");

            candidates.push(MethodResolution {
                class: Arc::clone(&desc),
                method: m.clone(),
                ty: mt,
            });
        }

        if let Some(super_class) = &desc.super_class {
            worklist.push_back(substitute_class(super_class, &class_binding));
        }
        for iface in &desc.interfaces {
            worklist.push_back(substitute_class(iface, &class_binding));
        }
    }

    match_method(loader, args, candidates, autoboxing)
}

/// Select the most appropriate candidate for the given argument types, or
/// `None` when no candidate is applicable.
///
/// Candidates are scanned from the most recently collected backwards, keeping
/// the most specific consistent match: a candidate replaces the current best
/// only if each of its checked parameter types is a subtype of the best's.
fn match_method(
    loader: &dyn ClassLoader,
    args: &[Type],
    mut candidates: Vec<MethodResolution>,
    autoboxing: bool,
) -> Result<Option<MethodResolution>> {
    let mut best: Option<usize> = None;
    let mut best_params: Option<Vec<Type>> = None;

    'outer: for i in (0..candidates.len()).rev() {
        let candidate = &candidates[i];
        let params = &candidate.ty.params;
        let variable_arity = candidate.method.variable_arity;

        if !(params.len() == args.len()
            || (variable_arity && params.len() <= args.len() + 1))
        {
            continue;
        }

        let num_fixed = if variable_arity {
            params.len() - 1
        } else {
            params.len()
        };

        for j in 0..num_fixed {
            if !param_accepts(loader, &params[j], &args[j], autoboxing)? {
                continue 'outer;
            }
            if let Some(bp) = &best_params {
                if !subtype(loader, &bp[j], &params[j])? {
                    continue 'outer;
                }
            }
        }

        if variable_arity {
            let va_param = &params[num_fixed];
            let Type::Reference(Reference::Array(element)) = va_param else {
                continue 'outer;
            };
            match args.len() - num_fixed {
                0 => {}
                1 => {
                    // A single argument in variable-arity position may be
                    // either an element or an array of the element type.
                    let arg = &args[num_fixed];
                    if !param_accepts(loader, element, arg, autoboxing)?
                        && !subtype(loader, va_param, arg)?
                    {
                        continue 'outer;
                    }
                }
                _ => {
                    for arg in &args[num_fixed..] {
                        if !param_accepts(loader, element, arg, autoboxing)? {
                            continue 'outer;
                        }
                    }
                }
            }
        }

        best = Some(i);
        best_params = Some(params.clone());
    }

    Ok(best.map(|i| candidates.swap_remove(i)))
}

/// Whether a declared parameter type accepts an argument of the given static
/// type. Phase 1 (`autoboxing == false`) rejects any primitive/reference
/// mismatch outright; later phases admit a boxing or unboxing conversion
/// followed by the ordinary subtype check.
fn param_accepts(
    loader: &dyn ClassLoader,
    declared: &Type,
    arg: &Type,
    autoboxing: bool,
) -> Result<bool> {
    if subtype(loader, declared, arg)? {
        return Ok(true);
    }
    if !autoboxing {
        return Ok(false);
    }
    match (declared, arg) {
        (_, Type::Primitive(p)) => {
            let boxed = Type::Reference(Reference::Clazz(boxed_class(*p)));
            subtype(loader, declared, &boxed)
        }
        (Type::Primitive(_), Type::Reference(Reference::Clazz(c))) => match unboxed(c) {
            Some(p) => subtype(loader, declared, &Type::Primitive(p)),
            None => Ok(false),
        },
        _ => Ok(false),
    }
}

/// The `java.lang` box class for a primitive.
pub fn boxed_class(p: Primitive) -> ClassType {
    let name = match p {
        Primitive::Boolean => "Boolean",
        Primitive::Byte => "Byte",
        Primitive::Char => "Character",
        Primitive::Short => "Short",
        Primitive::Int => "Integer",
        Primitive::Long => "Long",
        Primitive::Float => "Float",
        Primitive::Double => "Double",
    };
    ClassType::new("java.lang", name)
}

/// The primitive a `java.lang` box class unboxes to, if any.
pub fn unboxed(ty: &ClassType) -> Option<Primitive> {
    if ty.pkg != "java.lang" || ty.components.len() != 1 {
        return None;
    }
    match ty.components[0].name.as_str() {
        "Boolean" => Some(Primitive::Boolean),
        "Byte" => Some(Primitive::Byte),
        "Character" => Some(Primitive::Char),
        "Short" => Some(Primitive::Short),
        "Integer" => Some(Primitive::Int),
        "Long" => Some(Primitive::Long),
        "Float" => Some(Primitive::Float),
        "Double" => Some(Primitive::Double),
        _ => None,
    }
}

/// Resolve a field access `owner.name`.
///
/// A single depth-first walk of the owner and its ancestors, substituting as
/// for method resolution; the nearest declaring class wins by virtue of
/// being visited first. Failure is [`TypeError::FieldNotFound`].
pub fn resolve_field(
    loader: &dyn ClassLoader,
    owner: &ClassType,
    name: &str,
) -> Result<FieldResolution> {
    let mut worklist = vec![owner.clone()];
    let mut seen: HashSet<ClassType> = HashSet::new();

    while let Some(ty) = worklist.pop() {
        if !seen.insert(ty.clone()) {
            continue;
        }
        let desc = loader.load_class(&ty)?;
        let binding = bind_class(loader, &ty, &desc.ty)?;

        if let Some(field) = desc.field(name) {
            let field_ty = match &field.ty {
                Type::Reference(r) => Type::Reference(substitute(r, &binding)),
                other => other.clone(),
            };
            return Ok(FieldResolution {
                class: Arc::clone(&desc),
                field: field.clone(),
                ty: field_ty,
            });
        }

        if let Some(super_class) = &desc.super_class {
            worklist.push(substitute_class(super_class, &binding));
        }
        for iface in &desc.interfaces {
            worklist.push(substitute_class(iface, &binding));
        }
    }

    Err(TypeError::FieldNotFound {
        name: name.to_string(),
        owner: owner.to_string(),
    })
}
