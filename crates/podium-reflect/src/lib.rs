//! Podium Reflect - runtime type registry
//!
//! This crate models classes, enums and mixins as introspectable
//! descriptors grouped into pods:
//!
//! - [`PodRegistry`]: lazily loads pods through a [`PodLoader`], once per name
//! - [`Type`]: declared type or generic view (`T?`, `T[]`, `|A->R|`)
//! - [`Slot`]: named field or method owned by one type
//! - [`classify`]: maps a runtime [`Value`] to its canonical type
//! - [`common_type`]: least upper bound of a value sequence
//!
//! # Example
//!
//! ```ignore
//! use podium_reflect::{common_type, PodRegistry, Value};
//! use podium_sdk::{PodDecl, StaticPodLoader, TypeDecl};
//!
//! let registry = PodRegistry::new(StaticPodLoader::new().with_pod(
//!     PodDecl::new("sys")
//!         .with_type(TypeDecl::new("Obj"))
//!         .with_type(TypeDecl::new("Bool").extends("sys::Obj")),
//! ));
//!
//! let ty = common_type(&registry, &[Value::bool(true), Value::null()])?;
//! assert_eq!(ty.signature(), "sys::Bool?");
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod classify;
pub mod common;
pub mod defaults;
pub mod error;
pub mod generic;
pub mod natives;
pub mod options;
pub mod pod;
pub mod registry;
pub mod slot;
pub mod ty;
pub mod value;

pub use classify::classify;
pub use common::common_type;
pub use error::{ReflectError, ReflectResult};
pub use generic::{GenericKind, GenericTypeView};
pub use natives::{NativeConstructorRegistry, NativeTable, Producer, Producers};
pub use options::RegistryOptions;
pub use pod::Pod;
pub use registry::{PodRegistry, PodRegistryBuilder};
pub use slot::{Field, Method, Param, Slot, SlotTable};
pub use ty::{Type, TypeDescriptor, TypeFlavor};
pub use value::{ListValue, Object, Value};

pub use podium_sdk::{
    FieldDecl, LoadError, MethodDecl, ParamDecl, PodDecl, PodLoader, SlotDecl, SlotFlags,
    StaticPodLoader, TypeDecl,
};
