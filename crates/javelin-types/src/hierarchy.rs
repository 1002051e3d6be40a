//! Walking a class's ancestor chain with substitution applied along the way.

use std::collections::HashSet;

use crate::bind::{bind_class, substitute_class};
use crate::error::Result;
use crate::loader::ClassLoader;
use crate::ty::ClassType;

/// Find the ancestor of `start` (inclusive) that is base equivalent to
/// `target`, with every substitution implied by the traversed superclass and
/// interface declarations already applied.
///
/// For example, reducing `ArrayList<String>` toward `Collection<T>` walks
/// `ArrayList<String> -> List<String> -> Collection<String>` and returns
/// `Collection<String>`: each declaration along the way (say,
/// `class ArrayList<T> implements List<T>`) is a template telling us how the
/// current instantiation's arguments carry over to the supertype.
///
/// Returns `None` when the walk exhausts the hierarchy without finding a base
/// equivalent ancestor; that signals "not a subtype", not an error. Class
/// loading failures propagate.
pub fn reduce(
    loader: &dyn ClassLoader,
    target: &ClassType,
    start: &ClassType,
) -> Result<Option<ClassType>> {
    let mut worklist = vec![start.clone()];
    // The ancestor relation is finite and acyclic by the loader's contract,
    // but malformed data must not hang us.
    let mut seen: HashSet<ClassType> = HashSet::new();

    while let Some(ty) = worklist.pop() {
        if ty.base_equivalent(target) {
            return Ok(Some(ty));
        }
        if !seen.insert(ty.clone()) {
            continue;
        }

        let desc = loader.load_class(&ty)?;
        let binding = bind_class(loader, &ty, &desc.ty)?;

        if let Some(super_class) = &desc.super_class {
            worklist.push(substitute_class(super_class, &binding));
        }
        for iface in &desc.interfaces {
            worklist.push(substitute_class(iface, &binding));
        }
    }

    Ok(None)
}

/// Whether any class on `receiver`'s superclass chain declares a method of
/// the given name, regardless of signature. Cheaper than full resolution;
/// interfaces are not consulted.
pub fn has_method(loader: &dyn ClassLoader, receiver: &ClassType, name: &str) -> Result<bool> {
    let mut seen: HashSet<ClassType> = HashSet::new();
    let mut current = Some(receiver.clone());
    while let Some(ty) = current {
        if !seen.insert(ty.clone()) {
            break;
        }
        let desc = loader.load_class(&ty)?;
        if desc.methods_named(name).next().is_some() {
            return Ok(true);
        }
        current = desc.super_class.clone();
    }
    Ok(false)
}
