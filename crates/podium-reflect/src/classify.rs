//! Value classification
//!
//! Maps a runtime value to its canonical type. Tagged values (lists and
//! objects) report their tag; primitives fall back to the configured
//! canonical types in a fixed order: bool, number, text.

use crate::error::{ReflectError, ReflectResult};
use crate::registry::PodRegistry;
use crate::ty::Type;
use crate::value::Value;

/// Classify a value
///
/// The absent marker is not classified; callers test for it first.
pub fn classify(registry: &PodRegistry, value: &Value) -> ReflectResult<Type> {
    if let Some(tag) = value.tag() {
        return Ok(tag);
    }

    let options = registry.options();
    let qname = match value {
        Value::Bool(_) => &options.bool_type,
        Value::Num(_) => &options.float_type,
        Value::Str(_) => &options.str_type,
        _ => return Err(ReflectError::UnrecognizedValue(value.kind_name().to_string())),
    };
    registry.require_type(qname)
}

#[cfg(test)]
mod tests {
    use super::*;
    use podium_sdk::{PodDecl, StaticPodLoader, TypeDecl};

    fn registry() -> PodRegistry {
        PodRegistry::new(
            StaticPodLoader::new()
                .with_pod(
                    PodDecl::new("sys")
                        .with_type(TypeDecl::new("Obj"))
                        .with_type(TypeDecl::new("Bool").extends("sys::Obj"))
                        .with_type(TypeDecl::new("Float").extends("sys::Obj"))
                        .with_type(TypeDecl::new("Str").extends("sys::Obj"))
                        .with_type(TypeDecl::new("List").extends("sys::Obj")),
                )
                .with_pod(PodDecl::new("acme").with_type(TypeDecl::new("Point").extends("sys::Obj"))),
        )
    }

    #[test]
    fn test_classify_primitives() {
        let registry = registry();
        assert_eq!(classify(&registry, &Value::bool(true)).unwrap().qname(), "sys::Bool");
        assert_eq!(classify(&registry, &Value::num(1.5)).unwrap().qname(), "sys::Float");
        assert_eq!(classify(&registry, &Value::str("s")).unwrap().qname(), "sys::Str");
    }

    #[test]
    fn test_tag_wins() {
        let registry = registry();
        let point = registry.require_type("acme::Point").unwrap();
        let obj = Value::object(point.clone());
        assert_eq!(classify(&registry, &obj).unwrap(), point);

        let list = Value::list(point.clone(), vec![obj]);
        assert_eq!(classify(&registry, &list).unwrap(), point.to_list_of());
    }

    #[test]
    fn test_unrecognized() {
        let registry = registry();
        assert_eq!(
            classify(&registry, &Value::null()).unwrap_err(),
            ReflectError::UnrecognizedValue("null".to_string())
        );
        assert_eq!(
            classify(&registry, &Value::opaque(42u32)).unwrap_err(),
            ReflectError::UnrecognizedValue("opaque".to_string())
        );
    }

    #[test]
    fn test_missing_canonical_type() {
        let registry = PodRegistry::new(
            StaticPodLoader::new().with_pod(PodDecl::new("sys").with_type(TypeDecl::new("Obj"))),
        );
        assert_eq!(
            classify(&registry, &Value::bool(false)).unwrap_err(),
            ReflectError::UnknownType("sys::Bool".to_string())
        );
    }
}
