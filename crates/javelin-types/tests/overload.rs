use javelin_types::{
    has_method, resolve_method, ClassDescriptor, ClassStore, ClassType, FunctionType,
    MethodDescriptor, Reference, Type, TypeError,
};

use pretty_assertions::assert_eq;

fn method(name: &str, return_type: Type, params: Vec<Type>) -> MethodDescriptor {
    MethodDescriptor {
        name: name.to_string(),
        ty: FunctionType::new(return_type, params),
        variable_arity: false,
    }
}

fn varargs_method(name: &str, return_type: Type, params: Vec<Type>) -> MethodDescriptor {
    MethodDescriptor {
        name: name.to_string(),
        ty: FunctionType::new(return_type, params),
        variable_arity: true,
    }
}

fn store_with(class: &str, methods: Vec<MethodDescriptor>) -> (ClassStore, ClassType) {
    let mut store = ClassStore::with_minimal_jdk();
    let ty = ClassType::new("com.example", class);
    store.add_class(ClassDescriptor {
        ty: ty.clone(),
        super_class: Some(ClassType::object()),
        interfaces: vec![],
        fields: vec![],
        methods,
    });
    (store, ty)
}

#[test]
fn exact_match_wins_before_autoboxing() {
    let integer = Type::class("java.lang", "Integer");
    let (store, receiver) = store_with(
        "Overloads",
        vec![
            method("f", Type::int(), vec![Type::int()]),
            method("f", Type::int(), vec![integer.clone()]),
        ],
    );

    // A primitive argument resolves to f(int) in phase 1, never reaching the
    // autoboxing phase.
    let found = resolve_method(&store, &receiver, "f", &[Type::int()]).unwrap();
    assert_eq!(found.method.ty.params, vec![Type::int()]);

    // A boxed argument picks the reference overload.
    let found = resolve_method(&store, &receiver, "f", &[integer.clone()]).unwrap();
    assert_eq!(found.method.ty.params, vec![integer]);
}

#[test]
fn autoboxing_applies_only_from_phase_two() {
    let integer = Type::class("java.lang", "Integer");
    let (store, receiver) = store_with(
        "Boxing",
        vec![method("f", Type::int(), vec![integer.clone()])],
    );

    let found = resolve_method(&store, &receiver, "f", &[Type::int()]).unwrap();
    assert_eq!(found.method.ty.params, vec![integer]);
}

#[test]
fn unboxing_then_primitive_widening_matches() {
    let (store, receiver) =
        store_with("Unboxing", vec![method("f", Type::int(), vec![Type::long()])]);

    let integer = Type::class("java.lang", "Integer");
    let found = resolve_method(&store, &receiver, "f", &[integer]).unwrap();
    assert_eq!(found.method.ty.params, vec![Type::long()]);
}

#[test]
fn widening_picks_the_most_specific_overload() {
    let (store, receiver) = store_with(
        "Widening",
        vec![
            method("f", Type::int(), vec![Type::long()]),
            method("f", Type::int(), vec![Type::int()]),
        ],
    );

    let found = resolve_method(&store, &receiver, "f", &[Type::short()]).unwrap();
    assert_eq!(found.method.ty.params, vec![Type::int()]);
}

#[test]
fn most_specific_reference_overload_wins_regardless_of_declaration_order() {
    let string = Type::class("java.lang", "String");
    for methods in [
        vec![
            method("f", Type::int(), vec![Type::object()]),
            method("f", Type::int(), vec![string.clone()]),
        ],
        vec![
            method("f", Type::int(), vec![string.clone()]),
            method("f", Type::int(), vec![Type::object()]),
        ],
    ] {
        let (store, receiver) = store_with("Specific", methods);
        let found = resolve_method(&store, &receiver, "f", &[string.clone()]).unwrap();
        assert_eq!(found.method.ty.params, vec![string.clone()]);
    }
}

#[test]
fn variable_arity_matches_zero_arguments() {
    let string = Type::class("java.lang", "String");
    let (store, receiver) = store_with(
        "Varargs",
        vec![varargs_method(
            "f",
            Type::int(),
            vec![Type::array(string)],
        )],
    );

    let found = resolve_method(&store, &receiver, "f", &[]).unwrap();
    assert!(found.method.variable_arity);
}

#[test]
fn variable_arity_matches_multiple_trailing_arguments() {
    let string = Type::class("java.lang", "String");
    let (store, receiver) = store_with(
        "Varargs",
        vec![varargs_method(
            "f",
            Type::int(),
            vec![Type::array(string.clone())],
        )],
    );

    let found =
        resolve_method(&store, &receiver, "f", &[string.clone(), string.clone()]).unwrap();
    assert!(found.method.variable_arity);

    // Trailing arguments must still fit the element type.
    let err = resolve_method(&store, &receiver, "f", &[string, Type::int()]).unwrap_err();
    assert!(matches!(err, TypeError::MethodNotFound { .. }));
}

#[test]
fn variable_arity_accepts_a_whole_array_argument() {
    let string = Type::class("java.lang", "String");
    let (store, receiver) = store_with(
        "Varargs",
        vec![varargs_method(
            "f",
            Type::int(),
            vec![Type::array(string.clone())],
        )],
    );

    let found = resolve_method(&store, &receiver, "f", &[Type::array(string)]).unwrap();
    assert!(found.method.variable_arity);
}

#[test]
fn variable_arity_with_fixed_prefix_checks_both_parts() {
    let string = Type::class("java.lang", "String");
    let (store, receiver) = store_with(
        "Mixed",
        vec![varargs_method(
            "f",
            Type::int(),
            vec![Type::int(), Type::array(string.clone())],
        )],
    );

    assert!(resolve_method(&store, &receiver, "f", &[Type::int()]).is_ok());
    assert!(resolve_method(
        &store,
        &receiver,
        "f",
        &[Type::int(), string.clone(), string.clone()],
    )
    .is_ok());

    // The fixed prefix is mandatory.
    let err = resolve_method(&store, &receiver, "f", &[string]).unwrap_err();
    assert!(matches!(err, TypeError::MethodNotFound { .. }));
}

#[test]
fn inherited_methods_resolve_with_class_substitution() {
    let store = ClassStore::with_minimal_jdk();
    let string_ref = Reference::class("java.lang", "String");
    let receiver = ClassType::generic("java.util", "ArrayList", vec![string_ref]);

    // get(int) is declared on List<T>; the receiver's instantiation flows
    // into the resolved type.
    let found = resolve_method(&store, &receiver, "get", &[Type::int()]).unwrap();
    assert_eq!(found.ty.return_type, Type::class("java.lang", "String"));
    assert_eq!(found.class.ty.simple_name(), "List");

    let found = resolve_method(
        &store,
        &receiver,
        "add",
        &[Type::class("java.lang", "String")],
    )
    .unwrap();
    assert_eq!(found.ty.params, vec![Type::class("java.lang", "String")]);
}

#[test]
fn method_generics_bind_at_the_call_site() {
    // <T> int count(T value) — the method's own parameter binds from the
    // argument, independently of the class's parameters.
    let count = MethodDescriptor {
        name: "count".to_string(),
        ty: FunctionType::generic(Type::int(), vec![Type::variable("T")], vec!["T".into()]),
        variable_arity: false,
    };
    let (store, receiver) = store_with("Util", vec![count]);

    let found = resolve_method(
        &store,
        &receiver,
        "count",
        &[Type::class("java.lang", "String")],
    )
    .unwrap();
    assert_eq!(found.ty.params, vec![Type::class("java.lang", "String")]);
    assert!(found.ty.type_args.is_empty());
}

#[test]
fn exhausting_all_phases_is_method_not_found() {
    let (store, receiver) =
        store_with("Empty", vec![method("f", Type::int(), vec![Type::int()])]);

    let err = resolve_method(&store, &receiver, "g", &[]).unwrap_err();
    let TypeError::MethodNotFound { signature, receiver: r } = err else {
        panic!("expected MethodNotFound");
    };
    assert_eq!(signature, "g()");
    assert_eq!(r, "com.example.Empty");

    let err = resolve_method(
        &store,
        &receiver,
        "f",
        &[Type::class("java.lang", "String")],
    )
    .unwrap_err();
    assert!(matches!(err, TypeError::MethodNotFound { .. }));
}

#[test]
fn object_methods_are_found_on_every_class() {
    let (store, receiver) = store_with("Plain", vec![]);
    let found = resolve_method(&store, &receiver, "hashCode", &[]).unwrap();
    assert_eq!(found.class.ty, ClassType::object());
    assert_eq!(found.ty.return_type, Type::int());
}

#[test]
fn has_method_walks_the_superclass_chain_only() {
    let (store, receiver) = store_with("Probe", vec![method("own", Type::int(), vec![])]);

    assert!(has_method(&store, &receiver, "own").unwrap());
    // Inherited from Object.
    assert!(has_method(&store, &receiver, "toString").unwrap());
    assert!(!has_method(&store, &receiver, "missing").unwrap());

    // Interface methods are not consulted.
    let array_list = ClassType::new("java.util", "ArrayList");
    assert!(!has_method(&store, &array_list, "get").unwrap());
}
