//! Pods: named bundles of types loaded as a unit

use crate::error::{ReflectError, ReflectResult};
use crate::registry::Shared;
use crate::ty::{Type, TypeDescriptor, TypeFlavor};
use podium_sdk::{PodDecl, TypeDecl, QNAME_SEPARATOR};
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// A loaded pod
#[derive(Debug)]
pub struct Pod {
    name: String,
    types: Vec<Type>,
    by_name: FxHashMap<String, usize>,
}

impl Pod {
    /// Build every type of a validated declaration
    pub(crate) fn build(decl: PodDecl, shared: &Arc<Shared>) -> ReflectResult<Self> {
        let mut types = Vec::with_capacity(decl.types.len());
        let mut by_name = FxHashMap::default();

        for ty_decl in decl.types {
            let local = ty_decl.name.clone();
            let ty = build_type(&decl.name, ty_decl, shared)?;
            by_name.insert(local, types.len());
            types.push(ty);
        }

        Ok(Self {
            name: decl.name,
            types,
            by_name,
        })
    }

    /// Pod name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Type by local name
    pub fn find_type(&self, name: &str, checked: bool) -> ReflectResult<Option<Type>> {
        match self.by_name.get(name) {
            Some(&index) => Ok(Some(self.types[index].clone())),
            None if checked => Err(ReflectError::UnknownType(format!(
                "{}{}{}",
                self.name, QNAME_SEPARATOR, name
            ))),
            None => Ok(None),
        }
    }

    /// Types in declaration order
    pub fn types(&self) -> &[Type] {
        &self.types
    }

    /// Number of types
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Check if the pod declares no types
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

fn build_type(pod: &str, decl: TypeDecl, shared: &Arc<Shared>) -> ReflectResult<Type> {
    let options = &shared.options;
    let qname = format!("{}{}{}", pod, QNAME_SEPARATOR, decl.name);
    let is_root = qname == options.root_type;

    match (&decl.base, is_root) {
        (None, false) => {
            return Err(ReflectError::InvalidBase {
                qname,
                reason: format!("only {} may omit a base", options.root_type),
            })
        }
        (Some(_), true) => {
            return Err(ReflectError::InvalidBase {
                qname,
                reason: "the root type cannot have a base".to_string(),
            })
        }
        (Some(base), false) if *base == qname => {
            return Err(ReflectError::InvalidBase {
                qname,
                reason: "a type cannot extend itself".to_string(),
            })
        }
        _ => {}
    }

    let flavor = TypeFlavor::from_base(decl.base.as_deref(), options);
    let mut desc = TypeDescriptor::new(qname, decl.base, flavor, Arc::downgrade(shared))?;
    for slot in decl.slots {
        desc.add_slot(slot)?;
    }
    desc.set_producers(shared.natives.producers(desc.qname()));

    Ok(Type::Declared(Arc::new(desc)))
}
