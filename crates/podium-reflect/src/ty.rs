//! Type descriptors and the `Type` handle
//!
//! A [`TypeDescriptor`] is a declared class, enum or mixin: qualified name,
//! base qualified name, classification and its own slot table. It is built
//! while its pod loads and is immutable once the pod is published.
//!
//! [`Type`] is the cheap, cloneable handle every API returns. It is either a
//! declared type or a [`GenericTypeView`] composed over other types.
//! Equality and hashing go through the signature, so two views built
//! separately over the same types compare equal.

use crate::error::{ReflectError, ReflectResult};
use crate::generic::{GenericKind, GenericTypeView};
use crate::natives::Producers;
use crate::options::RegistryOptions;
use crate::registry::{PodRegistry, Shared};
use crate::slot::{Field, Method, Slot, SlotTable};
use crate::value::{ListValue, Value};
use once_cell::sync::OnceCell;
use podium_sdk::{split_qname, SlotDecl};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Weak};
use tracing::trace;

/// Classification of a declared type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeFlavor {
    /// Ordinary class
    Class,
    /// Direct base is the enum marker
    Enum,
    /// Direct base is the mixin marker
    Mixin,
}

impl TypeFlavor {
    /// Classify from the direct base only
    pub fn from_base(base: Option<&str>, options: &RegistryOptions) -> Self {
        match base {
            Some(b) if b == options.enum_marker => TypeFlavor::Enum,
            Some(b) if b == options.mixin_marker => TypeFlavor::Mixin,
            _ => TypeFlavor::Class,
        }
    }
}

/// A declared class, enum or mixin
pub struct TypeDescriptor {
    qname: String,
    pod_len: usize,
    base_qname: Option<String>,
    flavor: TypeFlavor,
    slots: SlotTable,
    producers: Producers,
    base: OnceCell<Option<Weak<TypeDescriptor>>>,
    registry: Weak<Shared>,
}

impl TypeDescriptor {
    pub(crate) fn new(
        qname: String,
        base_qname: Option<String>,
        flavor: TypeFlavor,
        registry: Weak<Shared>,
    ) -> ReflectResult<Self> {
        let (pod, _) =
            split_qname(&qname).ok_or_else(|| ReflectError::InvalidQname(qname.clone()))?;
        let pod_len = pod.len();
        Ok(Self {
            qname,
            pod_len,
            base_qname,
            flavor,
            slots: SlotTable::new(),
            producers: Producers::default(),
            base: OnceCell::new(),
            registry,
        })
    }

    /// Attach a slot while the owning pod is loading
    pub(crate) fn add_slot(&mut self, decl: SlotDecl) -> ReflectResult<()> {
        let slot = Slot::from_decl(&self.qname, decl, self.registry.clone());
        self.slots.insert(slot)
    }

    pub(crate) fn set_producers(&mut self, producers: Producers) {
        self.producers = producers;
    }

    /// `pod::Name`
    pub fn qname(&self) -> &str {
        &self.qname
    }

    /// Local name without the pod prefix
    pub fn name(&self) -> &str {
        &self.qname[self.pod_len + 2..]
    }

    /// Owning pod name
    pub fn pod(&self) -> &str {
        &self.qname[..self.pod_len]
    }

    /// Qualified name of the direct base
    pub fn base_qname(&self) -> Option<&str> {
        self.base_qname.as_deref()
    }

    /// Classification
    pub fn flavor(&self) -> TypeFlavor {
        self.flavor
    }

    /// Resolve the direct base; cached after the first call
    ///
    /// The cache holds a weak reference: descriptors are owned by their
    /// pods, so a base cycle never keeps itself alive.
    pub fn base(&self) -> ReflectResult<Option<Type>> {
        let cached = self
            .base
            .get_or_try_init(|| -> ReflectResult<_> {
                let Some(base) = &self.base_qname else {
                    return Ok(None);
                };
                trace!(ty = %self.qname, base = %base, "resolving base");
                let base = PodRegistry::upgrade(&self.registry, &self.qname)?
                    .require_type(base)?;
                Ok(base.as_descriptor().map(Arc::downgrade))
            })?;

        match cached {
            None => Ok(None),
            Some(base) => base
                .upgrade()
                .map(|desc| Some(Type::Declared(desc)))
                .ok_or_else(|| ReflectError::RegistryClosed(self.qname.clone())),
        }
    }

    /// Own slot table
    pub fn slot_table(&self) -> &SlotTable {
        &self.slots
    }

    /// Own slot by name
    pub fn slot(&self, name: &str, checked: bool) -> ReflectResult<Option<Slot>> {
        match self.slots.get(name) {
            Some(slot) => Ok(Some(slot.clone())),
            None if checked => Err(self.unknown_slot(name)),
            None => Ok(None),
        }
    }

    /// Own field by name; a method with this name counts as a miss
    pub fn field(&self, name: &str, checked: bool) -> ReflectResult<Option<Arc<Field>>> {
        match self.slots.get(name).and_then(Slot::as_field) {
            Some(field) => Ok(Some(field.clone())),
            None if checked => Err(self.unknown_slot(name)),
            None => Ok(None),
        }
    }

    /// Run the default-value thunk, else the constructor
    pub(crate) fn produce(&self, ty: &Type) -> ReflectResult<Value> {
        if let Some(default_value) = &self.producers.default_value {
            return Ok(default_value(ty));
        }
        if let Some(constructor) = &self.producers.constructor {
            return Ok(constructor(ty));
        }
        Err(ReflectError::NoDefaultConstructor(self.qname.clone()))
    }

    /// Producers attached at load
    pub fn producers(&self) -> &Producers {
        &self.producers
    }

    pub(crate) fn registry(&self) -> ReflectResult<PodRegistry> {
        PodRegistry::upgrade(&self.registry, &self.qname)
    }

    fn unknown_slot(&self, name: &str) -> ReflectError {
        ReflectError::UnknownSlot(format!("{}.{}", self.qname, name))
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("qname", &self.qname)
            .field("base", &self.base_qname)
            .field("flavor", &self.flavor)
            .field("slots", &self.slots.len())
            .field("producers", &self.producers)
            .finish()
    }
}

/// Handle to a declared type or a generic view
#[derive(Clone)]
pub enum Type {
    /// Declared class, enum or mixin
    Declared(Arc<TypeDescriptor>),
    /// Nullable, list-of or func view
    Generic(Arc<GenericTypeView>),
}

impl Type {
    /// Func view over parameter and return types
    pub fn func(params: Vec<Type>, returns: Type) -> Type {
        Type::Generic(Arc::new(GenericTypeView::func(params, returns)))
    }

    /// Get the descriptor if this is a declared type
    pub fn as_descriptor(&self) -> Option<&Arc<TypeDescriptor>> {
        match self {
            Type::Declared(d) => Some(d),
            _ => None,
        }
    }

    /// Get the view if this is a generic type
    pub fn as_generic(&self) -> Option<&Arc<GenericTypeView>> {
        match self {
            Type::Generic(v) => Some(v),
            _ => None,
        }
    }

    /// Local name; views use their signature
    pub fn name(&self) -> &str {
        match self {
            Type::Declared(d) => d.name(),
            Type::Generic(v) => v.signature(),
        }
    }

    /// Qualified name; views use their signature
    pub fn qname(&self) -> &str {
        self.signature()
    }

    /// `pod::Name`, `T?`, `T[]` or `|A,B->R|`
    pub fn signature(&self) -> &str {
        match self {
            Type::Declared(d) => d.qname(),
            Type::Generic(v) => v.signature(),
        }
    }

    /// Check for a nullable view
    pub fn is_nullable(&self) -> bool {
        matches!(self, Type::Generic(v) if v.is_nullable())
    }

    /// Check for any generic view
    pub fn is_generic(&self) -> bool {
        matches!(self, Type::Generic(_))
    }

    /// Classification; views of declared types take it from what they wrap
    pub fn flavor(&self) -> TypeFlavor {
        match self {
            Type::Declared(d) => d.flavor(),
            Type::Generic(v) => match v.kind() {
                GenericKind::Nullable(inner) => inner.flavor(),
                _ => TypeFlavor::Class,
            },
        }
    }

    /// Check for a class
    pub fn is_class(&self) -> bool {
        self.flavor() == TypeFlavor::Class
    }

    /// Check for an enum
    pub fn is_enum(&self) -> bool {
        self.flavor() == TypeFlavor::Enum
    }

    /// Check for a mixin
    pub fn is_mixin(&self) -> bool {
        self.flavor() == TypeFlavor::Mixin
    }

    /// Nullable view; idempotent
    pub fn to_nullable(&self) -> Type {
        if self.is_nullable() {
            return self.clone();
        }
        Type::Generic(Arc::new(GenericTypeView::nullable(self.clone())))
    }

    /// Unwrap a nullable view; other types return themselves
    pub fn to_non_nullable(&self) -> Type {
        match self {
            Type::Generic(v) => match v.kind() {
                GenericKind::Nullable(inner) => inner.clone(),
                _ => self.clone(),
            },
            Type::Declared(_) => self.clone(),
        }
    }

    /// List-of view with this type as element
    pub fn to_list_of(&self) -> Type {
        Type::Generic(Arc::new(GenericTypeView::list_of(self.clone())))
    }

    /// Direct base
    ///
    /// Nullable views report the base of what they wrap; list-of and func
    /// views report the configured list and func marker types.
    pub fn base(&self) -> ReflectResult<Option<Type>> {
        match self {
            Type::Declared(d) => d.base(),
            Type::Generic(v) => match v.kind() {
                GenericKind::Nullable(inner) => inner.base(),
                GenericKind::ListOf(_) => {
                    let registry = self.registry()?;
                    registry.require_type(&registry.options().list_type).map(Some)
                }
                GenericKind::Func { .. } => {
                    let registry = self.registry()?;
                    registry.require_type(&registry.options().func_type).map(Some)
                }
            },
        }
    }

    /// Check if `self` is `other` or one of its descendants
    ///
    /// Nullability is ignored on both sides. The walk allows at most
    /// `max_base_depth` base hops, the same bound as [`Type::inheritance`].
    pub fn is(&self, other: &Type) -> ReflectResult<bool> {
        let target = other.to_non_nullable();
        let mut current = Some(self.to_non_nullable());
        let mut max_depth = None;
        let mut hops = 0;

        while let Some(ty) = current {
            if ty == target {
                return Ok(true);
            }
            current = ty.base()?;
            if current.is_none() {
                break;
            }

            let limit = match max_depth {
                Some(limit) => limit,
                None => {
                    let limit = self.registry()?.options().max_base_depth;
                    max_depth = Some(limit);
                    limit
                }
            };
            hops += 1;
            if hops > limit {
                return Err(ReflectError::BaseChainTooDeep {
                    qname: self.signature().to_string(),
                    limit,
                });
            }
        }

        Ok(false)
    }

    /// This type followed by each base up to the root
    pub fn inheritance(&self) -> ReflectResult<Vec<Type>> {
        let limit = self.registry()?.options().max_base_depth;
        let mut chain = vec![self.clone()];
        let mut current = self.base()?;

        while let Some(ty) = current {
            if chain.len() > limit {
                return Err(ReflectError::BaseChainTooDeep {
                    qname: self.signature().to_string(),
                    limit,
                });
            }
            current = ty.base()?;
            chain.push(ty);
        }

        Ok(chain)
    }

    /// Own slot by name
    ///
    /// Nullable views look in what they wrap; list-of and func views look
    /// in their marker base type.
    pub fn slot(&self, name: &str, checked: bool) -> ReflectResult<Option<Slot>> {
        match self.slot_owner()? {
            Some(owner) => owner.slot(name, checked),
            None if checked => Err(ReflectError::UnknownSlot(format!("{}.{}", self, name))),
            None => Ok(None),
        }
    }

    /// Own field by name
    pub fn field(&self, name: &str, checked: bool) -> ReflectResult<Option<Arc<Field>>> {
        match self.slot_owner()? {
            Some(owner) => owner.field(name, checked),
            None if checked => Err(ReflectError::UnknownSlot(format!("{}.{}", self, name))),
            None => Ok(None),
        }
    }

    /// Own slots in declaration order
    pub fn slots(&self) -> ReflectResult<Vec<Slot>> {
        Ok(self
            .slot_owner()?
            .map(|owner| owner.slot_table().iter().cloned().collect())
            .unwrap_or_default())
    }

    /// Own fields in declaration order
    pub fn fields(&self) -> ReflectResult<Vec<Arc<Field>>> {
        Ok(self
            .slot_owner()?
            .map(|owner| owner.slot_table().fields().cloned().collect())
            .unwrap_or_default())
    }

    /// Own methods in declaration order
    pub fn methods(&self) -> ReflectResult<Vec<Arc<Method>>> {
        Ok(self
            .slot_owner()?
            .map(|owner| owner.slot_table().methods().cloned().collect())
            .unwrap_or_default())
    }

    /// Produce a default instance
    ///
    /// Nullable views make what they wrap; list-of views make an empty
    /// list; func views have no default.
    pub fn make(&self) -> ReflectResult<Value> {
        match self {
            Type::Declared(d) => d.produce(self),
            Type::Generic(v) => match v.kind() {
                GenericKind::Nullable(inner) => inner.make(),
                GenericKind::ListOf(elem) => {
                    Ok(Value::List(Arc::new(ListValue::new(elem.clone(), Vec::new()))))
                }
                GenericKind::Func { .. } => {
                    Err(ReflectError::NoDefaultConstructor(self.signature().to_string()))
                }
            },
        }
    }

    /// The type describing types (`sys::Type` by default)
    pub fn meta_type(&self) -> ReflectResult<Type> {
        let registry = self.registry()?;
        registry.require_type(&registry.options().meta_type)
    }

    /// Registry the underlying declared types belong to
    pub fn registry(&self) -> ReflectResult<PodRegistry> {
        match self {
            Type::Declared(d) => d.registry(),
            Type::Generic(v) => match v.kind() {
                GenericKind::Nullable(inner) | GenericKind::ListOf(inner) => inner.registry(),
                GenericKind::Func { returns, .. } => returns.registry(),
            },
        }
    }

    fn slot_owner(&self) -> ReflectResult<Option<Arc<TypeDescriptor>>> {
        match self {
            Type::Declared(d) => Ok(Some(d.clone())),
            Type::Generic(v) => match v.kind() {
                GenericKind::Nullable(inner) => inner.slot_owner(),
                _ => match self.base()? {
                    Some(base) => base.slot_owner(),
                    None => Ok(None),
                },
            },
        }
    }
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        self.signature() == other.signature()
    }
}

impl Eq for Type {}

impl Hash for Type {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.signature().hash(state);
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.signature())
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Type({})", self.signature())
    }
}
