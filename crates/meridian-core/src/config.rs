//! Adapter configuration.
//!
//! Every selector the page scripts use can be overridden from a JSON file.
//! Missing keys fall back to the markup conventions of the server templates:
//!
//! ```json
//! {
//!   "label_selector": "span.js_convert_utc_to_local",
//!   "groups": [
//!     { "checkbox": "#form_show_location_inputs", "group": "#form_location_group" }
//!   ]
//! }
//! ```
//!
//! Without an explicit path the file is looked up at
//! `$XDG_CONFIG_HOME/meridian/config.json`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    error::{MeridianError, Result, ResultExt},
    scripts::groups::GroupSelectors,
    selector::Selector,
};

const XDG_PREFIX: &str = "meridian";
const CONFIG_FILE: &str = "config.json";

/// A checkbox and the field group it toggles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupBinding {
    pub checkbox: String,
    pub group: String,
}

/// Selectors and settings for a page run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AdapterConfig {
    /// Read-only labels holding UTC text.
    pub label_selector: String,
    /// Hidden per-form conversion flags.
    pub flag_selector: String,
    /// Datetime inputs converted alongside a flag.
    pub datetime_input_selector: String,
    /// Hidden fields receiving the browser offset.
    pub offset_field_selector: String,
    /// Checkboxes whose state is mirrored into `value`.
    pub checkbox_selector: String,
    pub form_helper_selector: String,
    pub form_counter_selector: String,
    /// Class marking controls that need scripts to be usable.
    pub js_enable_class: String,
    /// The "JavaScript required" notice.
    pub js_required_selector: String,
    /// Inputs a group requires while enabled.
    pub required_input_selector: String,
    /// Controls a group disables.
    pub group_control_selector: String,
    pub groups: Vec<GroupBinding>,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            label_selector: "span.js_convert_utc_to_local".to_string(),
            flag_selector: "form input.js_convert_time_inputs_to_local".to_string(),
            datetime_input_selector: "input[type=\"datetime-local\"]".to_string(),
            offset_field_selector: "form input[name='timezone_offset']".to_string(),
            checkbox_selector: "input[type=\"checkbox\"]".to_string(),
            form_helper_selector: ".form-helper".to_string(),
            form_counter_selector: ".form-counter".to_string(),
            js_enable_class: "js_enable_with_js".to_string(),
            js_required_selector: "#js_required".to_string(),
            required_input_selector: "*[required]".to_string(),
            group_control_selector: ".form-control".to_string(),
            groups: vec![
                GroupBinding {
                    checkbox: "#form_show_location_inputs".to_string(),
                    group: "#form_location_group".to_string(),
                },
                GroupBinding {
                    checkbox: "#form_show_private_event_inputs".to_string(),
                    group: "#form_event_password_group".to_string(),
                },
            ],
        }
    }
}

/// A group binding with parsed selectors.
#[derive(Debug, Clone)]
pub struct CompiledGroup {
    pub checkbox: Selector,
    pub group: Selector,
}

/// [`AdapterConfig`] with every selector parsed.
#[derive(Debug, Clone)]
pub struct Selectors {
    pub labels: Selector,
    pub flags: Selector,
    pub datetime_inputs: Selector,
    pub offset_fields: Selector,
    pub checkboxes: Selector,
    pub form_helpers: Selector,
    pub form_counters: Selector,
    pub js_enable_class: String,
    pub js_required: Selector,
    pub group_contents: GroupSelectors,
    pub groups: Vec<CompiledGroup>,
}

impl AdapterConfig {
    /// Reads a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| MeridianError::FileSystem {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self =
            serde_json::from_str(&text).with_context(format!("reading {}", path.display()))?;
        config.compile()?;
        Ok(config)
    }

    /// Reads the XDG config file if there is one, else returns defaults.
    pub fn load_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) => {
                log::debug!("loading config from {}", path.display());
                Self::load(&path)
            }
            None => Ok(Self::default()),
        }
    }

    /// The existing XDG config file, if any.
    pub fn default_path() -> Option<PathBuf> {
        xdg::BaseDirectories::with_prefix(XDG_PREFIX).find_config_file(CONFIG_FILE)
    }

    /// Writes this config as pretty JSON to the XDG config location,
    /// creating directories as needed. Returns the path written.
    pub fn write_default(&self) -> Result<PathBuf> {
        let path = xdg::BaseDirectories::with_prefix(XDG_PREFIX)
            .place_config_file(CONFIG_FILE)
            .map_err(|e| MeridianError::XdgDirectory(e.to_string()))?;
        self.write(&path)?;
        Ok(path)
    }

    /// This config as pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes this config as pretty JSON.
    pub fn write(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json_pretty()?).map_err(|source| MeridianError::FileSystem {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parses every selector, failing on the first bad one.
    pub fn compile(&self) -> Result<Selectors> {
        if self.js_enable_class.trim().is_empty() || self.js_enable_class.contains(char::is_whitespace) {
            return Err(MeridianError::invalid_input("js_enable_class")
                .with_reason("must be a single class name"));
        }

        Ok(Selectors {
            labels: Selector::parse(&self.label_selector)?,
            flags: Selector::parse(&self.flag_selector)?,
            datetime_inputs: Selector::parse(&self.datetime_input_selector)?,
            offset_fields: Selector::parse(&self.offset_field_selector)?,
            checkboxes: Selector::parse(&self.checkbox_selector)?,
            form_helpers: Selector::parse(&self.form_helper_selector)?,
            form_counters: Selector::parse(&self.form_counter_selector)?,
            js_enable_class: self.js_enable_class.clone(),
            js_required: Selector::parse(&self.js_required_selector)?,
            group_contents: GroupSelectors::parse(
                &self.required_input_selector,
                &self.group_control_selector,
            )?,
            groups: self
                .groups
                .iter()
                .map(|binding| {
                    Ok(CompiledGroup {
                        checkbox: Selector::parse(&binding.checkbox)?,
                        group: Selector::parse(&binding.group)?,
                    })
                })
                .collect::<Result<Vec<_>>>()?,
        })
    }
}
