//! Generic type views
//!
//! Views compose over existing types without touching them:
//!
//! | Kind      | Signature   | Base                     |
//! |-----------|-------------|--------------------------|
//! | nullable  | `T?`        | base of `T`              |
//! | list-of   | `T[]`       | configured list type     |
//! | func      | `\|A,B->R\|` | configured func type     |
//!
//! Views are built through [`Type::to_nullable`], [`Type::to_list_of`] and
//! [`Type::func`]; `to_nullable` never stacks a second nullable layer.

use crate::ty::Type;

/// What a view composes
#[derive(Debug, Clone)]
pub enum GenericKind {
    /// `T?`
    Nullable(Type),
    /// `T[]`
    ListOf(Type),
    /// `|A,B->R|`
    Func {
        /// Parameter types
        params: Vec<Type>,
        /// Return type
        returns: Type,
    },
}

/// Non-mutating wrapper over one or more types
#[derive(Debug, Clone)]
pub struct GenericTypeView {
    kind: GenericKind,
    signature: String,
}

impl GenericTypeView {
    pub(crate) fn nullable(inner: Type) -> Self {
        let signature = format!("{}?", inner.signature());
        Self {
            kind: GenericKind::Nullable(inner),
            signature,
        }
    }

    pub(crate) fn list_of(elem: Type) -> Self {
        let signature = format!("{}[]", elem.signature());
        Self {
            kind: GenericKind::ListOf(elem),
            signature,
        }
    }

    pub(crate) fn func(params: Vec<Type>, returns: Type) -> Self {
        let params_sig = params
            .iter()
            .map(Type::signature)
            .collect::<Vec<_>>()
            .join(",");
        let signature = format!("|{}->{}|", params_sig, returns.signature());
        Self {
            kind: GenericKind::Func { params, returns },
            signature,
        }
    }

    /// What this view composes
    pub fn kind(&self) -> &GenericKind {
        &self.kind
    }

    /// Signature string
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Check for a nullable view
    pub fn is_nullable(&self) -> bool {
        matches!(self.kind, GenericKind::Nullable(_))
    }

    /// Type wrapped by a nullable view
    pub fn wrapped(&self) -> Option<&Type> {
        match &self.kind {
            GenericKind::Nullable(inner) => Some(inner),
            _ => None,
        }
    }

    /// Element type of a list-of view
    pub fn element(&self) -> Option<&Type> {
        match &self.kind {
            GenericKind::ListOf(elem) => Some(elem),
            _ => None,
        }
    }

    /// Parameter types of a func view
    pub fn params(&self) -> Option<&[Type]> {
        match &self.kind {
            GenericKind::Func { params, .. } => Some(params),
            _ => None,
        }
    }

    /// Return type of a func view
    pub fn returns(&self) -> Option<&Type> {
        match &self.kind {
            GenericKind::Func { returns, .. } => Some(returns),
            _ => None,
        }
    }
}
