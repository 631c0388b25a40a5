//! Raw pod declarations
//!
//! These are the plain data records a [`PodLoader`](crate::PodLoader) hands
//! to the registry. Nothing here is resolved: base types and slot types are
//! referenced by qualified name (`pod::Type`) and looked up lazily later.

use crate::error::{LoadError, LoadResult};
use rustc_hash::FxHashSet;

/// Separator between a pod name and a local type name
pub const QNAME_SEPARATOR: &str = "::";

/// Split `pod::Type` into its pod and local parts
pub fn split_qname(qname: &str) -> Option<(&str, &str)> {
    let (pod, name) = qname.split_once(QNAME_SEPARATOR)?;
    if pod.is_empty() || name.is_empty() || name.contains(QNAME_SEPARATOR) {
        return None;
    }
    Some((pod, name))
}

fn check_qname(qname: &str) -> LoadResult<()> {
    split_qname(qname)
        .map(|_| ())
        .ok_or_else(|| LoadError::InvalidQname(qname.to_string()))
}

fn check_name(name: &str) -> LoadResult<()> {
    if name.is_empty() || name.contains(QNAME_SEPARATOR) {
        return Err(LoadError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// Modifier flags for slots
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SlotFlags {
    /// Public visibility
    pub is_public: bool,
    /// Static member
    pub is_static: bool,
    /// Const (read-only) field
    pub is_const: bool,
    /// Virtual method or field
    pub is_virtual: bool,
    /// Abstract member
    pub is_abstract: bool,
}

impl SlotFlags {
    /// Public, non-static, writable
    pub const PUBLIC: SlotFlags = SlotFlags {
        is_public: true,
        is_static: false,
        is_const: false,
        is_virtual: false,
        is_abstract: false,
    };

    /// Public const field
    pub const CONST: SlotFlags = SlotFlags {
        is_public: true,
        is_static: false,
        is_const: true,
        is_virtual: false,
        is_abstract: false,
    };

    /// Public static member
    pub const STATIC: SlotFlags = SlotFlags {
        is_public: true,
        is_static: true,
        is_const: false,
        is_virtual: false,
        is_abstract: false,
    };
}

/// Field declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    /// Field name
    pub name: String,
    /// Qualified name of the field's value type
    pub of: String,
    /// Modifiers
    pub flags: SlotFlags,
}

/// Method parameter declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamDecl {
    /// Parameter name
    pub name: String,
    /// Qualified name of the parameter type
    pub of: String,
    /// Whether the parameter has a default
    pub has_default: bool,
}

impl ParamDecl {
    /// Required parameter
    pub fn new(name: impl Into<String>, of: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            of: of.into(),
            has_default: false,
        }
    }

    /// Parameter with a default value
    pub fn with_default(name: impl Into<String>, of: impl Into<String>) -> Self {
        Self {
            has_default: true,
            ..Self::new(name, of)
        }
    }
}

/// Method declaration (signature only)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDecl {
    /// Method name
    pub name: String,
    /// Parameters in order
    pub params: Vec<ParamDecl>,
    /// Qualified name of the return type
    pub returns: String,
    /// Modifiers
    pub flags: SlotFlags,
}

/// A slot declaration: a field or a method
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotDecl {
    /// Typed data member
    Field(FieldDecl),
    /// Behavior member
    Method(MethodDecl),
}

impl SlotDecl {
    /// Declared slot name
    pub fn name(&self) -> &str {
        match self {
            SlotDecl::Field(f) => &f.name,
            SlotDecl::Method(m) => &m.name,
        }
    }

    fn validate(&self) -> LoadResult<()> {
        check_name(self.name())?;
        match self {
            SlotDecl::Field(f) => check_qname(&f.of),
            SlotDecl::Method(m) => {
                check_qname(&m.returns)?;
                m.params.iter().try_for_each(|p| check_qname(&p.of))
            }
        }
    }
}

/// Type declaration
///
/// Slot names are not checked for duplicates here; the registry rejects a
/// repeated slot when it attaches the slots to the type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    /// Local type name (without the pod prefix)
    pub name: String,
    /// Qualified name of the direct base, `None` only for the root type
    pub base: Option<String>,
    /// Slots in declaration order
    pub slots: Vec<SlotDecl>,
}

impl TypeDecl {
    /// Declare a type without a base (only valid for the root type)
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base: None,
            slots: Vec::new(),
        }
    }

    /// Set the direct base type
    pub fn extends(mut self, base: impl Into<String>) -> Self {
        self.base = Some(base.into());
        self
    }

    /// Add a field
    pub fn field(mut self, name: impl Into<String>, of: impl Into<String>, flags: SlotFlags) -> Self {
        self.slots.push(SlotDecl::Field(FieldDecl {
            name: name.into(),
            of: of.into(),
            flags,
        }));
        self
    }

    /// Add a method
    pub fn method(
        mut self,
        name: impl Into<String>,
        params: Vec<ParamDecl>,
        returns: impl Into<String>,
        flags: SlotFlags,
    ) -> Self {
        self.slots.push(SlotDecl::Method(MethodDecl {
            name: name.into(),
            params,
            returns: returns.into(),
            flags,
        }));
        self
    }

    fn validate(&self) -> LoadResult<()> {
        check_name(&self.name)?;
        if let Some(base) = &self.base {
            check_qname(base)?;
        }
        self.slots.iter().try_for_each(SlotDecl::validate)
    }
}

/// Pod declaration: a named bundle of types
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PodDecl {
    /// Pod name
    pub name: String,
    /// Types in declaration order
    pub types: Vec<TypeDecl>,
}

impl PodDecl {
    /// Create an empty pod declaration
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            types: Vec::new(),
        }
    }

    /// Add a type
    pub fn with_type(mut self, ty: TypeDecl) -> Self {
        self.types.push(ty);
        self
    }

    /// Check names and reject duplicate types
    pub fn validate(&self) -> LoadResult<()> {
        check_name(&self.name)?;
        let mut seen = FxHashSet::default();
        for ty in &self.types {
            ty.validate()?;
            if !seen.insert(ty.name.as_str()) {
                return Err(LoadError::DuplicateType {
                    pod: self.name.clone(),
                    name: ty.name.clone(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_qname() {
        assert_eq!(split_qname("sys::Obj"), Some(("sys", "Obj")));
        assert_eq!(split_qname("Obj"), None);
        assert_eq!(split_qname("::Obj"), None);
        assert_eq!(split_qname("sys::"), None);
        assert_eq!(split_qname("a::b::c"), None);
    }

    #[test]
    fn test_type_decl_builder() {
        let ty = TypeDecl::new("Point")
            .extends("sys::Obj")
            .field("x", "sys::Float", SlotFlags::PUBLIC)
            .method("norm", vec![], "sys::Float", SlotFlags::PUBLIC);

        assert_eq!(ty.base.as_deref(), Some("sys::Obj"));
        assert_eq!(ty.slots.len(), 2);
        assert_eq!(ty.slots[0].name(), "x");
        assert!(matches!(ty.slots[1], SlotDecl::Method(_)));
    }

    #[test]
    fn test_validate_duplicate_type() {
        let pod = PodDecl::new("acme")
            .with_type(TypeDecl::new("A").extends("sys::Obj"))
            .with_type(TypeDecl::new("A").extends("sys::Obj"));

        assert_eq!(
            pod.validate(),
            Err(LoadError::DuplicateType {
                pod: "acme".to_string(),
                name: "A".to_string(),
            })
        );
    }

    #[test]
    fn test_validate_bad_base() {
        let pod = PodDecl::new("acme").with_type(TypeDecl::new("A").extends("Obj"));
        assert_eq!(pod.validate(), Err(LoadError::InvalidQname("Obj".to_string())));
    }

    #[test]
    fn test_validate_bad_slot_type() {
        let pod = PodDecl::new("acme").with_type(
            TypeDecl::new("A")
                .extends("sys::Obj")
                .method("f", vec![ParamDecl::new("a", "Int")], "sys::Void", SlotFlags::PUBLIC),
        );
        assert_eq!(pod.validate(), Err(LoadError::InvalidQname("Int".to_string())));
    }

    #[test]
    fn test_validate_bad_names() {
        assert!(PodDecl::new("").validate().is_err());
        let pod = PodDecl::new("acme").with_type(TypeDecl::new("x::y"));
        assert_eq!(pod.validate(), Err(LoadError::InvalidName("x::y".to_string())));
    }
}
