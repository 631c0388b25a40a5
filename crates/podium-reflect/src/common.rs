//! Common (least-upper-bound) type of a value sequence
//!
//! The first concrete value fixes a candidate. Each later value either
//! already is the candidate (or a descendant), or the candidate widens to
//! its nearest ancestor that the value descends from. Nullability is
//! tracked separately: the result is nullable iff any input was null.
//!
//! The walk is only a correct least upper bound because base chains form a
//! single tree under the root type. Mixins never appear in base chains.

use crate::classify::classify;
use crate::error::{ReflectError, ReflectResult};
use crate::registry::PodRegistry;
use crate::ty::Type;
use crate::value::Value;
use tracing::trace;

/// Compute the common type of `values`
///
/// Empty input, or input holding only nulls, yields the root type as
/// nullable.
pub fn common_type(registry: &PodRegistry, values: &[Value]) -> ReflectResult<Type> {
    let mut saw_absent = false;
    let mut candidate: Option<Type> = None;

    for value in values {
        if value.is_null() {
            saw_absent = true;
            continue;
        }

        let ty = classify(registry, value)?;
        candidate = Some(match candidate {
            None => ty,
            Some(current) => widen(registry, current, &ty)?,
        });
    }

    let result = match candidate {
        Some(ty) => ty,
        None => return registry.root_type().map(|root| root.to_nullable()),
    };

    Ok(if saw_absent {
        result.to_nullable()
    } else {
        result
    })
}

/// Nearest ancestor-or-self of `candidate` that `ty` descends from
fn widen(registry: &PodRegistry, candidate: Type, ty: &Type) -> ReflectResult<Type> {
    if ty.is(&candidate)? {
        return Ok(candidate);
    }

    let limit = registry.options().max_base_depth;
    let mut ancestor = candidate.base()?;
    let mut hops = 1;

    while let Some(current) = ancestor {
        if hops > limit {
            return Err(ReflectError::BaseChainTooDeep {
                qname: candidate.signature().to_string(),
                limit,
            });
        }
        if ty.is(&current)? {
            trace!(from = %candidate, to = %current, by = %ty, "widened common type");
            return Ok(current);
        }
        ancestor = current.base()?;
        hops += 1;
    }

    trace!(from = %candidate, by = %ty, "no common ancestor, using root");
    registry.root_type()
}

#[cfg(test)]
mod tests {
    use super::*;
    use podium_sdk::{PodDecl, StaticPodLoader, TypeDecl};

    fn registry() -> PodRegistry {
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

    #[test]
    fn test_same_type() {
        let registry = registry();
        let ty = common_type(&registry, &[Value::bool(true), Value::bool(false)]).unwrap();
        assert_eq!(ty.signature(), "sys::Bool");
    }

    #[test]
    fn test_null_makes_nullable() {
        let registry = registry();
        let ty = common_type(&registry, &[Value::bool(true), Value::null()]).unwrap();
        assert_eq!(ty.signature(), "sys::Bool?");

        let ty = common_type(&registry, &[Value::null(), Value::bool(true)]).unwrap();
        assert_eq!(ty.signature(), "sys::Bool?");
    }

    #[test]
    fn test_unrelated_widen_to_root() {
        let registry = registry();
        let ty = common_type(&registry, &[Value::num(1.0), Value::str("s")]).unwrap();
        assert_eq!(ty.signature(), "sys::Obj");
    }

    #[test]
    fn test_empty_and_all_null() {
        let registry = registry();
        assert_eq!(common_type(&registry, &[]).unwrap().signature(), "sys::Obj?");
        assert_eq!(
            common_type(&registry, &[Value::null(), Value::null()])
                .unwrap()
                .signature(),
            "sys::Obj?"
        );
    }

    #[test]
    fn test_unrecognized_value_fails() {
        let registry = registry();
        assert_eq!(
            common_type(&registry, &[Value::bool(true), Value::opaque(())]).unwrap_err(),
            ReflectError::UnrecognizedValue("opaque".to_string())
        );
    }
}
