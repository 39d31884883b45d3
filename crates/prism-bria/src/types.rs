use serde::Deserialize;
use serde_json::{Map, Value};

/// Generic Bria tool request: an action plus passthrough parameters
#[derive(Debug, Clone, Deserialize)]
pub struct BriaToolRequest {
    /// Which Bria endpoint to call
    #[serde(default)]
    pub action: Option<String>,
    /// Remaining fields, forwarded to Bria untouched (except data-URI
    /// stripping on image fields)
    #[serde(flatten)]
    pub params: Map<String, Value>,
}

/// Bria v2 actions and their endpoint paths
pub const ACTION_PATHS: &[(&str, &str)] = &[
    ("generate", "/image/generate"),
    ("generate_lite", "/image/generate/lite"),
    ("remove_background", "/image/edit/remove_background"),
    ("replace_background", "/image/edit/replace_background"),
    ("gen_fill", "/image/edit/gen_fill"),
    ("erase", "/image/edit/erase"),
    ("enhance", "/image/edit/enhance"),
    ("expand", "/image/edit/expand"),
    ("blur_background", "/image/edit/blur_background"),
    ("increase_resolution", "/image/edit/increase_resolution"),
    ("crop_foreground", "/image/edit/crop_foreground"),
    ("erase_foreground", "/image/edit/erase_foreground"),
];

/// Look up the endpoint path for an action name
pub fn action_path(action: &str) -> Option<&'static str> {
    ACTION_PATHS
        .iter()
        .find(|(name, _)| *name == action)
        .map(|(_, path)| *path)
}

/// Comma-separated action names for error messages
pub fn valid_actions() -> String {
    ACTION_PATHS
        .iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(", ")
}
