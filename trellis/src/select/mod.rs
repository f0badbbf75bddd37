//! The select controller.
//!
//! `Select` owns a hierarchical option tree and every projection
//! derived from it: the at-most-one single selection (plus coexisting
//! multi selections), the root-to-focus active path, the filtered view
//! and synthetic search/addition options, and the open/closed dropdown
//! flag. It renders nothing; a hosting layer reads snapshots and feeds
//! input back through `on_key`/`on_trigger`/`on_option_click`.
//!
//! # Example
//!
//! ```
//! use canopy::OverlayManager;
//! use trellis::select::{Select, SelectConfig};
//! use trellis::tree::OptionSpec;
//!
//! let overlay = OverlayManager::new();
//! let select = Select::new(
//!     &[
//!         OptionSpec::menu("Fruit", vec![
//!             OptionSpec::leaf("Apple"),
//!             OptionSpec::leaf("Pear"),
//!         ]),
//!         OptionSpec::leaf("Other"),
//!     ],
//!     SelectConfig::default(),
//!     overlay,
//! )
//! .unwrap();
//!
//! select.open();
//! select.select_option("Pear");
//! assert_eq!(select.selected()[0].id(), "Pear");
//! ```

mod config;
mod events;
mod search;
mod state;

pub use config::{AdditionSpec, AdditionValidator, ClosePolicy, SelectConfig};
pub use search::{AdditionOption, SearchOption};
pub use state::{BindingKind, OptionBinding, Select, SelectId};
