//! Podium SDK - Lightweight SDK for writing pod loaders
//!
//! This crate provides the declaration model and the [`PodLoader`] trait a
//! pod source implements, without depending on the full registry in
//! `podium-reflect`.
//!
//! # Example
//!
//! ```ignore
//! use podium_sdk::{PodDecl, SlotFlags, StaticPodLoader, TypeDecl};
//!
//! let loader = StaticPodLoader::new().with_pod(
//!     PodDecl::new("acme").with_type(
//!         TypeDecl::new("Point")
//!             .extends("sys::Obj")
//!             .field("x", "sys::Float", SlotFlags::PUBLIC),
//!     ),
//! );
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod decl;
pub mod error;
pub mod loader;

pub use decl::{
    split_qname, FieldDecl, MethodDecl, ParamDecl, PodDecl, SlotDecl, SlotFlags, TypeDecl,
    QNAME_SEPARATOR,
};
pub use error::{LoadError, LoadResult};
pub use loader::{PodLoader, StaticPodLoader};
