//! Construction error types.

use thiserror::Error;

/// Shape violations in an option-tree specification.
///
/// All of these abort construction; a controller is never built from a
/// partially valid spec.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// A menu spec had no sub-options. Menus are never silently treated
    /// as leaves.
    #[error("menu option '{label}' has no sub-options")]
    MissingSubOptions {
        /// Label of the offending menu spec.
        label: String,
    },

    /// The spec list contained no options at all.
    #[error("option spec is empty")]
    EmptySpec,

    /// Two options resolved to the same id.
    #[error("duplicate option id '{id}'")]
    DuplicateId {
        /// The colliding id.
        id: String,
    },

    /// An option id collides with the prefix reserved for synthetic
    /// search/addition options.
    #[error("option id '{id}' uses a reserved prefix")]
    ReservedId {
        /// The offending id.
        id: String,
    },
}
