//! Default constants for registry configuration.

/// Qualified name of the universal root type.
pub const ROOT_TYPE: &str = "sys::Obj";

/// Direct base that marks a type as an enum.
pub const ENUM_MARKER: &str = "sys::Enum";

/// Direct base that marks a type as a mixin.
pub const MIXIN_MARKER: &str = "sys::Mixin";

/// Canonical type for boolean values.
pub const BOOL_TYPE: &str = "sys::Bool";

/// Canonical type for numeric values.
pub const FLOAT_TYPE: &str = "sys::Float";

/// Canonical type for text values.
pub const STR_TYPE: &str = "sys::Str";

/// Base of every list-of view.
pub const LIST_TYPE: &str = "sys::List";

/// Base of every func view.
pub const FUNC_TYPE: &str = "sys::Func";

/// Type describing types, returned by `Type::meta_type`.
pub const META_TYPE: &str = "sys::Type";

/// Maximum number of `base()` hops before a chain is treated as cyclic.
pub const DEFAULT_MAX_BASE_DEPTH: usize = 64;
