use serde::Deserialize;
use thiserror::Error;

/// One node of the raw funding dataset. Leaves carry `value`; groups carry
/// `children`. A group's own `value`, if present, is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RawNode {
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub children: Option<Vec<RawNode>>,
}

impl RawNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }
}

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("invalid dataset JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("node under `{path}` has an empty name")]
    EmptyName { path: String },
    #[error("leaf `{path}` has no numeric value")]
    MissingLeafValue { path: String },
    #[error("leaf `{path}` has unusable value {value}")]
    InvalidLeafValue { path: String, value: f64 },
    #[error("group `{path}` has an empty children list")]
    EmptyChildren { path: String },
}

/// Deserializes a dataset document. Structural validation (leaf values,
/// names) happens later in [`crate::hierarchy::Hierarchy::build`].
pub fn parse_dataset(input: &str) -> Result<RawNode, DatasetError> {
    let root: RawNode = serde_json::from_str(input)?;
    Ok(root)
}
