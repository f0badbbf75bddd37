//! Construction input for the option tree.

use serde::{Deserialize, Serialize};

/// Opaque per-option payload, untouched by the controller.
pub type OptionData = serde_json::Map<String, serde_json::Value>;

/// Whether a spec describes a choosable leaf or a nested menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecKind {
    #[default]
    Select,
    Menu,
}

/// One entry in the ordered option specification.
///
/// Missing fields are defaulted at build time: `id` falls back to the
/// label, `multi` to the controller-level mode, `disabled` to the
/// enclosing menu's resolved value. A `Menu` spec must carry
/// `sub_options`; building fails otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionSpec {
    #[serde(rename = "type", default)]
    pub kind: SpecKind,
    pub label: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub selected: bool,
    #[serde(default)]
    pub multi: Option<bool>,
    #[serde(default)]
    pub disabled: Option<bool>,
    #[serde(default)]
    pub data: OptionData,
    #[serde(default)]
    pub sub_options: Option<Vec<OptionSpec>>,
}

impl OptionSpec {
    /// A leaf option with everything defaulted.
    pub fn leaf(label: impl Into<String>) -> Self {
        Self {
            kind: SpecKind::Select,
            label: label.into(),
            id: None,
            selected: false,
            multi: None,
            disabled: None,
            data: OptionData::new(),
            sub_options: None,
        }
    }

    /// A menu option owning the given sub-options.
    pub fn menu(label: impl Into<String>, sub_options: Vec<OptionSpec>) -> Self {
        Self {
            kind: SpecKind::Menu,
            sub_options: Some(sub_options),
            ..Self::leaf(label)
        }
    }

    /// Override the derived id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Mark the option as initially selected.
    pub fn selected(mut self) -> Self {
        self.selected = true;
        self
    }

    /// Override the controller-level selection mode for this option.
    pub fn multi(mut self, multi: bool) -> Self {
        self.multi = Some(multi);
        self
    }

    /// Override inherited disabled state.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = Some(disabled);
        self
    }

    /// Attach an opaque payload entry.
    pub fn with_data(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.data.insert(key.into(), value);
        self
    }
}
