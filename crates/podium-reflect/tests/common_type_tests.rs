//! Integration tests for common-type resolution

use podium_reflect::{classify, common_type, PodRegistry, ReflectError, Type, Value};
use podium_sdk::{PodDecl, StaticPodLoader, TypeDecl};

fn registry() -> PodRegistry {
    let sys = PodDecl::new("sys")
        .with_type(TypeDecl::new("Obj"))
        .with_type(TypeDecl::new("Bool").extends("sys::Obj"))
        .with_type(TypeDecl::new("Str").extends("sys::Obj"))
        .with_type(TypeDecl::new("Num").extends("sys::Obj"))
        .with_type(TypeDecl::new("Float").extends("sys::Num"))
        .with_type(TypeDecl::new("Int").extends("sys::Num"))
        .with_type(TypeDecl::new("Enum").extends("sys::Obj"))
        .with_type(TypeDecl::new("Mixin").extends("sys::Obj"))
        .with_type(TypeDecl::new("List").extends("sys::Obj"))
        .with_type(TypeDecl::new("Func").extends("sys::Obj"));
    let acme = PodDecl::new("acme")
        .with_type(TypeDecl::new("Shape").extends("sys::Obj"))
        .with_type(TypeDecl::new("Circle").extends("acme::Shape"))
        .with_type(TypeDecl::new("Square").extends("acme::Shape"))
        .with_type(TypeDecl::new("Weekday").extends("sys::Enum"))
        .with_type(TypeDecl::new("Month").extends("sys::Enum"));

    PodRegistry::new(StaticPodLoader::new().with_pod(sys).with_pod(acme))
}

/// Registry with a flat sys pod: every type directly under the root
fn flat_registry() -> PodRegistry {
    PodRegistry::new(
        StaticPodLoader::new().with_pod(
            PodDecl::new("sys")
                .with_type(TypeDecl::new("Obj"))
                .with_type(TypeDecl::new("Bool").extends("sys::Obj"))
                .with_type(TypeDecl::new("Str").extends("sys::Obj"))
                .with_type(TypeDecl::new("Float").extends("sys::Obj")),
        ),
    )
}

fn object(registry: &PodRegistry, qname: &str) -> Value {
    Value::object(registry.require_type(qname).unwrap())
}

fn sig(ty: Type) -> String {
    ty.signature().to_string()
}

#[test]
fn test_scenario_same_type() {
    let registry = flat_registry();
    let ty = common_type(&registry, &[Value::bool(true), Value::bool(false)]).unwrap();
    assert_eq!(sig(ty.clone()), "sys::Bool");
    assert!(!ty.is_nullable());
}

#[test]
fn test_scenario_with_absent() {
    let registry = flat_registry();
    let ty = common_type(&registry, &[Value::bool(true), Value::null()]).unwrap();
    assert!(ty.is_nullable());
    assert_eq!(sig(ty.to_non_nullable()), "sys::Bool");
}

#[test]
fn test_scenario_no_common_ancestor() {
    let registry = flat_registry();
    let ty = common_type(&registry, &[Value::num(1.0), Value::str("s")]).unwrap();
    assert_eq!(sig(ty), "sys::Obj");
}

#[test]
fn test_scenario_empty() {
    let registry = flat_registry();
    let ty = common_type(&registry, &[]).unwrap();
    assert!(ty.is_nullable());
    assert_eq!(sig(ty.to_non_nullable()), "sys::Obj");
}

#[test]
fn test_widen_to_shared_base() {
    let registry = registry();
    let values = [object(&registry, "acme::Circle"), object(&registry, "acme::Square")];
    assert_eq!(sig(common_type(&registry, &values).unwrap()), "acme::Shape");

    let values = [Value::num(2.0), object(&registry, "sys::Int")];
    assert_eq!(sig(common_type(&registry, &values).unwrap()), "sys::Num");
}

#[test]
fn test_descendant_keeps_candidate() {
    let registry = registry();
    let values = [
        object(&registry, "acme::Shape"),
        object(&registry, "acme::Circle"),
        Value::null(),
        object(&registry, "acme::Square"),
    ];
    assert_eq!(sig(common_type(&registry, &values).unwrap()), "acme::Shape?");
}

#[test]
fn test_widening_is_order_independent() {
    let registry = registry();
    let circle = object(&registry, "acme::Circle");
    let square = object(&registry, "acme::Square");
    let flag = Value::bool(true);

    let forward = common_type(&registry, &[circle.clone(), square.clone(), flag.clone()]).unwrap();
    let backward = common_type(&registry, &[flag, square, circle]).unwrap();
    assert_eq!(forward, backward);
    assert_eq!(sig(forward), "sys::Obj");
}

#[test]
fn test_enums_widen_to_marker() {
    let registry = registry();
    let values = [object(&registry, "acme::Weekday"), object(&registry, "acme::Month")];
    let ty = common_type(&registry, &values).unwrap();
    assert_eq!(sig(ty.clone()), "sys::Enum");
    assert!(ty.is_class());
}

#[test]
fn test_lists() {
    let registry = registry();
    let str_ty = registry.require_type("sys::Str").unwrap();
    let bool_ty = registry.require_type("sys::Bool").unwrap();

    let strs = Value::list(str_ty.clone(), vec![Value::str("a")]);
    let more_strs = Value::list(str_ty.clone(), vec![]);
    let bools = Value::list(bool_ty, vec![Value::bool(true)]);

    let ty = common_type(&registry, &[strs.clone(), more_strs]).unwrap();
    assert_eq!(ty, str_ty.to_list_of());

    // Distinct element types share only the list marker
    let ty = common_type(&registry, &[strs.clone(), bools]).unwrap();
    assert_eq!(sig(ty), "sys::List");

    // A list is not its element type
    let ty = common_type(&registry, &[strs, Value::str("a")]).unwrap();
    assert_eq!(sig(ty), "sys::Obj");
}

#[test]
fn test_result_is_ancestor_of_every_input() {
    let registry = registry();
    let values = [
        Value::num(1.0),
        object(&registry, "sys::Int"),
        Value::null(),
        object(&registry, "acme::Circle"),
    ];
    let common = common_type(&registry, &values).unwrap();
    assert!(common.is_nullable());

    for value in values.iter().filter(|v| !v.is_null()) {
        let ty = classify(&registry, value).unwrap();
        assert!(ty.is(&common).unwrap(), "{} is not {}", ty, common);
    }
}

#[test]
fn test_unrecognized_value() {
    let registry = registry();
    assert_eq!(
        common_type(&registry, &[Value::opaque("host")]).unwrap_err(),
        ReflectError::UnrecognizedValue("opaque".to_string())
    );
}

#[test]
fn test_missing_root() {
    let registry = PodRegistry::new(StaticPodLoader::new());
    assert_eq!(
        common_type(&registry, &[]).unwrap_err(),
        ReflectError::UnknownType("sys::Obj".to_string())
    );
}
