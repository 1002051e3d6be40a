//! An in-memory [`ClassLoader`] backed by a descriptor table.
//!
//! The store is the cache boundary the engine's contract talks about: it
//! holds immutable, `Arc`-shared descriptors keyed by binary-ish class name,
//! so lookups are idempotent and safe behind a shared reference. The skeleton
//! builder populates it as declarations are processed; tests seed it with
//! [`ClassStore::with_minimal_jdk`].

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{Result, TypeError};
use crate::loader::{ClassDescriptor, ClassLoader, MethodDescriptor};
use crate::ty::{ClassType, FunctionType, Reference, Type};

#[derive(Clone, Debug, Default)]
pub struct ClassStore {
    classes: HashMap<String, Arc<ClassDescriptor>>,
}

/// Lookup key: package plus the simple name sequence, type arguments erased.
fn class_key(ty: &ClassType) -> String {
    let names: Vec<&str> = ty.components.iter().map(|c| c.name.as_str()).collect();
    if ty.pkg.is_empty() {
        names.join("$")
    } else {
        format!("{}.{}", ty.pkg, names.join("$"))
    }
}

impl ClassStore {
    pub fn new() -> Self {
        ClassStore::default()
    }

    /// Register a descriptor, replacing any previous one for the same class.
    pub fn add_class(&mut self, desc: ClassDescriptor) -> Arc<ClassDescriptor> {
        let desc = Arc::new(desc);
        self.classes
            .insert(class_key(&desc.ty), Arc::clone(&desc));
        desc
    }

    pub fn get(&self, ty: &ClassType) -> Option<&Arc<ClassDescriptor>> {
        self.classes.get(&class_key(ty))
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// A store seeded with just enough of `java.lang`/`java.util` for the
    /// engine to be exercised: `Object`, `String`, `Number` and the boxed
    /// primitives, the marker interfaces, and the generic collection chain
    /// `Iterable<T> <- Collection<T> <- List<T> <- ArrayList<T>`.
    pub fn with_minimal_jdk() -> Self {
        let object = ClassType::object();
        let string = || Type::class("java.lang", "String");

        let mut store = ClassStore::new();

        store.add_class(ClassDescriptor {
            ty: object.clone(),
            super_class: None,
            interfaces: vec![],
            fields: vec![],
            methods: vec![
                method("equals", Type::boolean(), vec![Type::object()]),
                method("hashCode", Type::int(), vec![]),
                method("toString", string(), vec![]),
            ],
        });

        store.add_class(ClassDescriptor {
            ty: ClassType::new("java.lang", "String"),
            super_class: Some(object.clone()),
            interfaces: vec![ClassType::new("java.io", "Serializable")],
            fields: vec![],
            methods: vec![
                method("length", Type::int(), vec![]),
                method("charAt", Type::char(), vec![Type::int()]),
            ],
        });

        store.add_class(ClassDescriptor {
            ty: ClassType::new("java.lang", "Number"),
            super_class: Some(object.clone()),
            interfaces: vec![ClassType::new("java.io", "Serializable")],
            fields: vec![],
            methods: vec![
                method("intValue", Type::int(), vec![]),
                method("doubleValue", Type::double(), vec![]),
            ],
        });

        let number = ClassType::new("java.lang", "Number");
        for name in ["Byte", "Short", "Integer", "Long", "Float", "Double"] {
            store.add_class(ClassDescriptor {
                ty: ClassType::new("java.lang", name),
                super_class: Some(number.clone()),
                interfaces: vec![],
                fields: vec![],
                methods: vec![],
            });
        }
        for name in ["Boolean", "Character"] {
            store.add_class(ClassDescriptor {
                ty: ClassType::new("java.lang", name),
                super_class: Some(object.clone()),
                interfaces: vec![],
                fields: vec![],
                methods: vec![],
            });
        }

        // Marker interfaces; the store models the implicit Object supertype
        // of interfaces (JLS 4.10.2) directly in the descriptor.
        for (pkg, name) in [("java.lang", "Cloneable"), ("java.io", "Serializable")] {
            store.add_class(ClassDescriptor {
                ty: ClassType::new(pkg, name),
                super_class: Some(object.clone()),
                interfaces: vec![],
                fields: vec![],
                methods: vec![],
            });
        }

        let t = || Reference::variable("T");
        let t_ty = || Type::variable("T");

        store.add_class(ClassDescriptor {
            ty: ClassType::generic("java.lang", "Iterable", vec![t()]),
            super_class: Some(object.clone()),
            interfaces: vec![],
            fields: vec![],
            methods: vec![],
        });

        store.add_class(ClassDescriptor {
            ty: ClassType::generic("java.util", "Collection", vec![t()]),
            super_class: Some(object.clone()),
            interfaces: vec![ClassType::generic("java.lang", "Iterable", vec![t()])],
            fields: vec![],
            methods: vec![
                method("add", Type::boolean(), vec![t_ty()]),
                method("size", Type::int(), vec![]),
            ],
        });

        store.add_class(ClassDescriptor {
            ty: ClassType::generic("java.util", "List", vec![t()]),
            super_class: Some(object.clone()),
            interfaces: vec![ClassType::generic("java.util", "Collection", vec![t()])],
            fields: vec![],
            methods: vec![
                method("get", t_ty(), vec![Type::int()]),
                method("add", Type::boolean(), vec![t_ty()]),
            ],
        });

        store.add_class(ClassDescriptor {
            ty: ClassType::generic("java.util", "ArrayList", vec![t()]),
            super_class: Some(object),
            interfaces: vec![ClassType::generic("java.util", "List", vec![t()])],
            fields: vec![],
            methods: vec![],
        });

        store
    }
}

fn method(name: &str, return_type: Type, params: Vec<Type>) -> MethodDescriptor {
    MethodDescriptor {
        name: name.to_string(),
        ty: FunctionType::new(return_type, params),
        variable_arity: false,
    }
}

impl ClassLoader for ClassStore {
    fn load_class(&self, ty: &ClassType) -> Result<Arc<ClassDescriptor>> {
        self.classes
            .get(&class_key(ty))
            .cloned()
            .ok_or_else(|| TypeError::ClassNotFound {
                class: class_key(ty),
            })
    }
}
