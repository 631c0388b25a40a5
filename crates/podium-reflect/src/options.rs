//! Registry configuration

use crate::defaults;

/// Options for creating a [`PodRegistry`](crate::PodRegistry)
///
/// Every type name here is a qualified name (`pod::Type`). The registry
/// does not require these types to exist until an operation needs them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryOptions {
    /// Universal root; the only type allowed to have no base
    pub root_type: String,

    /// Direct base marking enums
    pub enum_marker: String,

    /// Direct base marking mixins
    pub mixin_marker: String,

    /// Canonical type for `Value::Bool`
    pub bool_type: String,

    /// Canonical type for `Value::Num`
    pub float_type: String,

    /// Canonical type for `Value::Str`
    pub str_type: String,

    /// Base of list-of views
    pub list_type: String,

    /// Base of func views
    pub func_type: String,

    /// Type of every type
    pub meta_type: String,

    /// Base-chain walk limit
    pub max_base_depth: usize,
}

impl Default for RegistryOptions {
    fn default() -> Self {
        Self {
            root_type: defaults::ROOT_TYPE.to_string(),
            enum_marker: defaults::ENUM_MARKER.to_string(),
            mixin_marker: defaults::MIXIN_MARKER.to_string(),
            bool_type: defaults::BOOL_TYPE.to_string(),
            float_type: defaults::FLOAT_TYPE.to_string(),
            str_type: defaults::STR_TYPE.to_string(),
            list_type: defaults::LIST_TYPE.to_string(),
            func_type: defaults::FUNC_TYPE.to_string(),
            meta_type: defaults::META_TYPE.to_string(),
            max_base_depth: defaults::DEFAULT_MAX_BASE_DEPTH,
        }
    }
}

impl RegistryOptions {
    /// Options with a different root type
    pub fn with_root(root_type: impl Into<String>) -> Self {
        Self {
            root_type: root_type.into(),
            ..Default::default()
        }
    }

    /// Options with a different base-chain limit
    pub fn with_max_base_depth(max_base_depth: usize) -> Self {
        Self {
            max_base_depth,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = RegistryOptions::default();
        assert_eq!(opts.root_type, "sys::Obj");
        assert_eq!(opts.enum_marker, "sys::Enum");
        assert_eq!(opts.mixin_marker, "sys::Mixin");
        assert_eq!(opts.meta_type, "sys::Type");
        assert_eq!(opts.max_base_depth, defaults::DEFAULT_MAX_BASE_DEPTH);
    }

    #[test]
    fn test_with_constructors() {
        assert_eq!(RegistryOptions::with_root("core::Any").root_type, "core::Any");
        let opts = RegistryOptions::with_max_base_depth(4);
        assert_eq!(opts.max_base_depth, 4);
        assert_eq!(opts.str_type, "sys::Str");
    }
}
