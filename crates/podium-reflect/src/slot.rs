//! Slots: named members of a type
//!
//! A slot is either a [`Field`] (typed data) or a [`Method`] (signature
//! only). Each type owns a [`SlotTable`] of the slots it declares itself;
//! inherited slots live on the base types.

use crate::classify::classify;
use crate::error::{ReflectError, ReflectResult};
use crate::registry::{PodRegistry, Shared};
use crate::ty::Type;
use crate::value::{Object, Value};
use podium_sdk::{FieldDecl, MethodDecl, ParamDecl, SlotDecl, SlotFlags};
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::{Arc, Weak};

/// Typed data member
pub struct Field {
    parent: String,
    name: String,
    of: String,
    flags: SlotFlags,
    registry: Weak<Shared>,
}

impl Field {
    pub(crate) fn new(parent: &str, decl: FieldDecl, registry: Weak<Shared>) -> Self {
        Self {
            parent: parent.to_string(),
            name: decl.name,
            of: decl.of,
            flags: decl.flags,
            registry,
        }
    }

    /// Field name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `pod::Type.name`
    pub fn qname(&self) -> String {
        format!("{}.{}", self.parent, self.name)
    }

    /// Qualified name of the declaring type
    pub fn parent_qname(&self) -> &str {
        &self.parent
    }

    /// Qualified name of the value type
    pub fn of_qname(&self) -> &str {
        &self.of
    }

    /// Modifiers
    pub fn flags(&self) -> SlotFlags {
        self.flags
    }

    /// Check for a const field
    pub fn is_const(&self) -> bool {
        self.flags.is_const
    }

    /// Declaring type
    pub fn parent(&self) -> ReflectResult<Type> {
        PodRegistry::upgrade(&self.registry, &self.parent)?.require_type(&self.parent)
    }

    /// Value type
    ///
    /// Resolved through the registry on each call rather than cached, so a
    /// field typed by its own declaring type does not keep it alive.
    pub fn of(&self) -> ReflectResult<Type> {
        PodRegistry::upgrade(&self.registry, &self.of)?.require_type(&self.of)
    }

    /// Read this field from an object instance
    pub fn get(&self, instance: &Value) -> ReflectResult<Value> {
        let obj = self.check_instance(instance)?;
        Ok(obj.read_field(&self.name))
    }

    /// Write this field on an object instance
    ///
    /// Null is accepted for any field; other values must classify to the
    /// field's type or one of its descendants.
    pub fn set(&self, instance: &Value, value: Value) -> ReflectResult<()> {
        if self.flags.is_const {
            return Err(ReflectError::ReadOnlyField(self.qname()));
        }
        let obj = self.check_instance(instance)?;

        if !value.is_null() {
            let registry = PodRegistry::upgrade(&self.registry, &self.of)?;
            let of = self.of()?;
            let actual = classify(&registry, &value)?;
            if !actual.is(&of)? {
                return Err(ReflectError::TypeMismatch {
                    expected: of.signature().to_string(),
                    actual: actual.signature().to_string(),
                });
            }
        }

        obj.write_field(&self.name, value);
        Ok(())
    }

    fn check_instance<'v>(&self, instance: &'v Value) -> ReflectResult<&'v Arc<Object>> {
        let obj = instance
            .as_object()
            .ok_or_else(|| ReflectError::NotAnObject(instance.kind_name().to_string()))?;

        let parent = self.parent()?;
        if !obj.ty().is(&parent)? {
            return Err(ReflectError::TypeMismatch {
                expected: parent.signature().to_string(),
                actual: obj.ty().signature().to_string(),
            });
        }
        Ok(obj)
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("qname", &self.qname())
            .field("of", &self.of)
            .field("flags", &self.flags)
            .finish()
    }
}

/// Method parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    name: String,
    of: String,
    has_default: bool,
}

impl Param {
    /// Parameter name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Qualified name of the parameter type
    pub fn of_qname(&self) -> &str {
        &self.of
    }

    /// Whether the parameter has a default
    pub fn has_default(&self) -> bool {
        self.has_default
    }
}

impl From<ParamDecl> for Param {
    fn from(decl: ParamDecl) -> Self {
        Self {
            name: decl.name,
            of: decl.of,
            has_default: decl.has_default,
        }
    }
}

/// Behavior member (signature only)
pub struct Method {
    parent: String,
    name: String,
    params: Vec<Param>,
    returns: String,
    flags: SlotFlags,
    registry: Weak<Shared>,
}

impl Method {
    pub(crate) fn new(parent: &str, decl: MethodDecl, registry: Weak<Shared>) -> Self {
        Self {
            parent: parent.to_string(),
            name: decl.name,
            params: decl.params.into_iter().map(Param::from).collect(),
            returns: decl.returns,
            flags: decl.flags,
            registry,
        }
    }

    /// Method name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `pod::Type.name`
    pub fn qname(&self) -> String {
        format!("{}.{}", self.parent, self.name)
    }

    /// Qualified name of the declaring type
    pub fn parent_qname(&self) -> &str {
        &self.parent
    }

    /// Parameters in order
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Qualified name of the return type
    pub fn returns_qname(&self) -> &str {
        &self.returns
    }

    /// Modifiers
    pub fn flags(&self) -> SlotFlags {
        self.flags
    }

    /// Resolved return type
    pub fn returns(&self) -> ReflectResult<Type> {
        PodRegistry::upgrade(&self.registry, &self.returns)?.require_type(&self.returns)
    }

    /// Signature as a func view: `|P1,P2->R|`
    pub fn func_type(&self) -> ReflectResult<Type> {
        let registry = PodRegistry::upgrade(&self.registry, &self.parent)?;
        let params = self
            .params
            .iter()
            .map(|p| registry.require_type(&p.of))
            .collect::<ReflectResult<Vec<_>>>()?;
        Ok(Type::func(params, self.returns()?))
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Method")
            .field("qname", &self.qname())
            .field("params", &self.params)
            .field("returns", &self.returns)
            .field("flags", &self.flags)
            .finish()
    }
}

/// A named member: field or method
#[derive(Debug, Clone)]
pub enum Slot {
    /// Typed data
    Field(Arc<Field>),
    /// Behavior
    Method(Arc<Method>),
}

impl Slot {
    pub(crate) fn from_decl(parent: &str, decl: SlotDecl, registry: Weak<Shared>) -> Self {
        match decl {
            SlotDecl::Field(f) => Slot::Field(Arc::new(Field::new(parent, f, registry))),
            SlotDecl::Method(m) => Slot::Method(Arc::new(Method::new(parent, m, registry))),
        }
    }

    /// Slot name
    pub fn name(&self) -> &str {
        match self {
            Slot::Field(f) => f.name(),
            Slot::Method(m) => m.name(),
        }
    }

    /// `pod::Type.name`
    pub fn qname(&self) -> String {
        match self {
            Slot::Field(f) => f.qname(),
            Slot::Method(m) => m.qname(),
        }
    }

    /// Modifiers
    pub fn flags(&self) -> SlotFlags {
        match self {
            Slot::Field(f) => f.flags(),
            Slot::Method(m) => m.flags(),
        }
    }

    /// Check for a field
    pub fn is_field(&self) -> bool {
        matches!(self, Slot::Field(_))
    }

    /// Check for a method
    pub fn is_method(&self) -> bool {
        matches!(self, Slot::Method(_))
    }

    /// Get the field if this is one
    pub fn as_field(&self) -> Option<&Arc<Field>> {
        match self {
            Slot::Field(f) => Some(f),
            _ => None,
        }
    }

    /// Get the method if this is one
    pub fn as_method(&self) -> Option<&Arc<Method>> {
        match self {
            Slot::Method(m) => Some(m),
            _ => None,
        }
    }
}

/// Ordered, name-keyed slots declared by one type
#[derive(Debug, Default)]
pub struct SlotTable {
    slots: Vec<Slot>,
    by_name: FxHashMap<String, usize>,
}

impl SlotTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a slot; its name must not already be present
    pub fn insert(&mut self, slot: Slot) -> ReflectResult<()> {
        if self.by_name.contains_key(slot.name()) {
            return Err(ReflectError::DuplicateSlot(slot.qname()));
        }
        self.by_name.insert(slot.name().to_string(), self.slots.len());
        self.slots.push(slot);
        Ok(())
    }

    /// Slot by name
    pub fn get(&self, name: &str) -> Option<&Slot> {
        self.by_name.get(name).map(|&i| &self.slots[i])
    }

    /// Check if a slot exists
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Slots in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter()
    }

    /// Fields in declaration order
    pub fn fields(&self) -> impl Iterator<Item = &Arc<Field>> {
        self.slots.iter().filter_map(Slot::as_field)
    }

    /// Methods in declaration order
    pub fn methods(&self) -> impl Iterator<Item = &Arc<Method>> {
        self.slots.iter().filter_map(Slot::as_method)
    }

    /// Number of slots
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
