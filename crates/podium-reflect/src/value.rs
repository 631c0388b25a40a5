//! Runtime values seen by the classifier and by reflective field access
//!
//! Primitive values (bool, number, text) carry no type tag and are
//! classified structurally. Lists and objects carry the tag they were
//! created with.

use crate::ty::Type;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A runtime value
#[derive(Clone)]
pub enum Value {
    /// The absent marker
    Null,
    /// Boolean
    Bool(bool),
    /// Number (IEEE 754 double)
    Num(f64),
    /// Text
    Str(Arc<str>),
    /// List tagged with its element type
    List(Arc<ListValue>),
    /// Object tagged with its declared type
    Object(Arc<Object>),
    /// Host value with no registry meaning
    Opaque(Arc<dyn Any + Send + Sync>),
}

impl Value {
    /// The absent marker
    pub fn null() -> Self {
        Value::Null
    }

    /// Boolean value
    pub fn bool(b: bool) -> Self {
        Value::Bool(b)
    }

    /// Numeric value
    pub fn num(n: f64) -> Self {
        Value::Num(n)
    }

    /// Text value
    pub fn str(s: impl Into<Arc<str>>) -> Self {
        Value::Str(s.into())
    }

    /// List of `of` holding `items`
    pub fn list(of: Type, items: Vec<Value>) -> Self {
        Value::List(Arc::new(ListValue::new(of, items)))
    }

    /// Fresh object of type `ty` with no fields set
    pub fn object(ty: Type) -> Self {
        Value::Object(Arc::new(Object::new(ty)))
    }

    /// Wrap an arbitrary host value
    pub fn opaque<T: Any + Send + Sync>(value: T) -> Self {
        Value::Opaque(Arc::new(value))
    }

    /// Check for the absent marker
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Get as boolean if this is a bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as number if this is a number
    pub fn as_num(&self) -> Option<f64> {
        match self {
            Value::Num(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as text if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Get the object if this is one
    pub fn as_object(&self) -> Option<&Arc<Object>> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Get the list if this is one
    pub fn as_list(&self) -> Option<&Arc<ListValue>> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    /// Type tag attached at creation, if any
    pub fn tag(&self) -> Option<Type> {
        match self {
            Value::List(list) => Some(list.list_type()),
            Value::Object(obj) => Some(obj.ty().clone()),
            _ => None,
        }
    }

    /// Short name of the value's shape, for diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Num(_) => "num",
            Value::Str(_) => "str",
            Value::List(_) => "list",
            Value::Object(_) => "object",
            Value::Opaque(_) => "opaque",
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Num(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s.into())
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Num(n) => write!(f, "{}", n),
            Value::Str(s) => write!(f, "{:?}", s),
            Value::List(l) => write!(f, "{}[len={}]", l.of(), l.len()),
            Value::Object(o) => write!(f, "{}@{:p}", o.ty(), Arc::as_ptr(o)),
            Value::Opaque(_) => write!(f, "<opaque>"),
        }
    }
}

/// Typed list storage
#[derive(Debug)]
pub struct ListValue {
    of: Type,
    items: RwLock<Vec<Value>>,
}

impl ListValue {
    /// Create a list of `of`
    pub fn new(of: Type, items: Vec<Value>) -> Self {
        Self {
            of,
            items: RwLock::new(items),
        }
    }

    /// Element type
    pub fn of(&self) -> &Type {
        &self.of
    }

    /// The list-of view this list is tagged with
    pub fn list_type(&self) -> Type {
        self.of.to_list_of()
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// Item at `index`
    pub fn get(&self, index: usize) -> Option<Value> {
        self.items.read().get(index).cloned()
    }

    /// Append an item
    pub fn push(&self, value: Value) {
        self.items.write().push(value);
    }

    /// Snapshot of all items
    pub fn items(&self) -> Vec<Value> {
        self.items.read().clone()
    }
}

/// Object instance with reflective field storage
///
/// Fields are read and written through [`Field::get`](crate::Field::get)
/// and [`Field::set`](crate::Field::set); unset fields read as null.
#[derive(Debug)]
pub struct Object {
    ty: Type,
    fields: RwLock<FxHashMap<String, Value>>,
}

impl Object {
    /// Create an instance of `ty` (nullability is stripped)
    pub fn new(ty: Type) -> Self {
        Self {
            ty: ty.to_non_nullable(),
            fields: RwLock::new(FxHashMap::default()),
        }
    }

    /// Declared type of the instance
    pub fn ty(&self) -> &Type {
        &self.ty
    }

    /// Number of fields that have been set
    pub fn field_count(&self) -> usize {
        self.fields.read().len()
    }

    pub(crate) fn read_field(&self, name: &str) -> Value {
        self.fields.read().get(name).cloned().unwrap_or(Value::Null)
    }

    pub(crate) fn write_field(&self, name: &str, value: Value) {
        self.fields.write().insert(name.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ty::{TypeDescriptor, TypeFlavor};
    use std::sync::Weak;

    fn declared(qname: &str) -> Type {
        let desc = TypeDescriptor::new(
            qname.to_string(),
            Some("sys::Obj".to_string()),
            TypeFlavor::Class,
            Weak::new(),
        )
        .unwrap();
        Type::Declared(Arc::new(desc))
    }

    #[test]
    fn test_list_storage() {
        let str_ty = declared("sys::Str");
        let list = ListValue::new(str_ty.clone(), vec![Value::str("a")]);
        assert_eq!(list.of(), &str_ty);
        assert_eq!(list.list_type(), str_ty.to_list_of());

        list.push(Value::str("b"));
        assert_eq!(list.len(), 2);
        let second = list.get(1).unwrap();
        assert_eq!(second.as_str(), Some("b"));
        assert!(list.get(2).is_none());

        let items: Vec<String> = list
            .items()
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect();
        assert_eq!(items, vec!["a", "b"]);
    }

    #[test]
    fn test_object_fields() {
        let point = declared("acme::Point");
        let obj = Object::new(point.to_nullable());
        assert_eq!(obj.ty(), &point);
        assert_eq!(obj.field_count(), 0);
        assert!(obj.read_field("x").is_null());

        obj.write_field("x", Value::num(1.0));
        obj.write_field("x", Value::num(2.0));
        obj.write_field("y", Value::num(3.0));
        assert_eq!(obj.field_count(), 2);
        assert_eq!(obj.read_field("x").as_num(), Some(2.0));
    }

    #[test]
    fn test_primitive_values() {
        assert!(Value::null().is_null());
        assert_eq!(Value::bool(true).as_bool(), Some(true));
        assert_eq!(Value::num(2.5).as_num(), Some(2.5));
        assert_eq!(Value::str("hi").as_str(), Some("hi"));
        assert!(Value::from(1.0).as_bool().is_none());
    }

    #[test]
    fn test_untagged_values() {
        assert!(Value::bool(false).tag().is_none());
        assert!(Value::num(1.0).tag().is_none());
        assert!(Value::str("s").tag().is_none());
        assert!(Value::opaque(42u8).tag().is_none());
        assert!(Value::null().tag().is_none());
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(Value::null().kind_name(), "null");
        assert_eq!(Value::from("x").kind_name(), "str");
        assert_eq!(Value::opaque(()).kind_name(), "opaque");
        assert_eq!(format!("{:?}", Value::from("x")), "\"x\"");
    }
}
