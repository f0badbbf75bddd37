//! Hierarchical option tree.
//!
//! The tree is an arena: nodes live in one `Vec`, reference each other
//! by [`NodeId`] index, and keep a parent index for upward walks. It is
//! rebuilt wholesale from an [`OptionSpec`] list whenever the input
//! changes; nodes never outlive their tree.

mod node;
mod spec;
mod state;

pub use node::{NodeId, NodeKind, OptionItem, OptionNode};
pub use spec::{OptionData, OptionSpec, SpecKind};
pub use state::OptionTree;
