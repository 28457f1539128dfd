use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::shape::text::DEFAULT_TEXT_SIZE;
use crate::style::{DEFAULT_STROKE_WIDTH, hex_color};
use crate::tool::Tool;

/// Editor defaults. Every field is optional in JSON; missing ones fall back to
/// [`EditorConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old config
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    pub default_tool: Tool,
    #[serde(with = "hex_color")]
    pub default_color: Color32,
    pub default_width: f32,
    pub text_size: f32,
    /// Maximum number of undo steps kept; unbounded when `None`.
    pub history_limit: Option<usize>,
    /// Drags shorter than this are treated as clicks.
    pub min_drag_distance: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_tool: Tool::Select,
            default_color: Color32::RED,
            default_width: DEFAULT_STROKE_WIDTH,
            text_size: DEFAULT_TEXT_SIZE,
            history_limit: None,
            min_drag_distance: 2.0,
        }
    }
}

impl EditorConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config = EditorConfig::from_json(r##"{ "defaultTool": "arrow", "historyLimit": 50 }"##).unwrap();
        assert_eq!(config.default_tool, Tool::Arrow);
        assert_eq!(config.history_limit, Some(50));
        assert_eq!(config.default_color, Color32::RED);
        assert_eq!(config.text_size, DEFAULT_TEXT_SIZE);
    }

    #[test]
    fn round_trips_through_json() {
        let config = EditorConfig {
            default_color: Color32::from_rgb(0, 128, 255),
            ..EditorConfig::default()
        };
        let back = EditorConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(back, config);
    }
}
