// Host canvas capability traits and a JSON scene adapter.
//
// The derivation pipeline never talks to a canvas API directly. It reads the
// scene through two small traits:
//
// - `SceneNode`: one canvas item: its name, position, rotation in degrees,
//   and its ordered children.
// - `SceneHost`: finds the container (artboard/frame) a run should scan.
//
// `SceneNodeData` / `SceneDocument` implement both traits over a JSON export
// of a canvas page, so the plugin binary and the tests can run without a live
// host. The export format is a plain node tree:
//
//   { "name": "Page 1", "children": [
//       { "name": "Field A", "children": [
//           { "name": "S:Res_Low_023", "x": 1400, "y": 950, "children": [
//               { "name": "Slot 2x3", "x": 1410, "y": 960, "rotation": 0 } ] } ] } ] }
//
// Missing numbers default to 0 and missing `children` to an empty list.
//
// See also: `import.rs` for the lookup and child iteration, `parse.rs` for
// how slot markers are read.

use crate::error::SceneError;
use serde::{Deserialize, Serialize};

/// Read-only view of one canvas item.
pub trait SceneNode {
    fn name(&self) -> &str;
    /// Horizontal position in canvas units.
    fn x(&self) -> f64;
    /// Vertical position in canvas units.
    fn y(&self) -> f64;
    /// Rotation in degrees as reported by the host.
    fn rotation(&self) -> f64;
    /// Immediate children, in the host's order.
    fn children(&self) -> impl Iterator<Item = &Self>;
}

/// Lookup of the container an import run scans.
pub trait SceneHost {
    type Node: SceneNode;

    /// First node named `name` in the scene, or `None`.
    fn find_container_by_name(&self, name: &str) -> Option<&Self::Node>;
}

/// One node of an exported canvas page.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneNodeData {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub rotation: f64,
    pub children: Vec<SceneNodeData>,
}

impl SceneNodeData {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn rotated(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn with_children(mut self, children: Vec<SceneNodeData>) -> Self {
        self.children = children;
        self
    }

    /// First descendant named `name`, pre-order depth-first. The node itself
    /// is not considered.
    pub fn find_descendant(&self, name: &str) -> Option<&SceneNodeData> {
        let mut stack: Vec<&SceneNodeData> = self.children.iter().rev().collect();
        while let Some(node) = stack.pop() {
            if node.name == name {
                return Some(node);
            }
            stack.extend(node.children.iter().rev());
        }
        None
    }
}

impl SceneNode for SceneNodeData {
    fn name(&self) -> &str {
        &self.name
    }

    fn x(&self) -> f64 {
        self.x
    }

    fn y(&self) -> f64 {
        self.y
    }

    fn rotation(&self) -> f64 {
        self.rotation
    }

    fn children(&self) -> impl Iterator<Item = &Self> {
        self.children.iter()
    }
}

/// An exported canvas page, searched the way the host's `findOne` does.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SceneDocument {
    pub page: SceneNodeData,
}

impl SceneDocument {
    pub fn new(page: SceneNodeData) -> Self {
        Self { page }
    }

    pub fn from_json_str(json: &str) -> Result<Self, SceneError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl SceneHost for SceneDocument {
    type Node = SceneNodeData;

    fn find_container_by_name(&self, name: &str) -> Option<&SceneNodeData> {
        self.page.find_descendant(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_page() -> SceneNodeData {
        SceneNodeData::new("Page 1").with_children(vec![
            SceneNodeData::new("Header"),
            SceneNodeData::new("Group").with_children(vec![
                SceneNodeData::new("Field").at(1.0, 1.0),
            ]),
            SceneNodeData::new("Field").at(2.0, 2.0),
        ])
    }

    #[test]
    fn find_is_preorder_first_match() {
        let doc = SceneDocument::new(sample_page());
        let found = doc.find_container_by_name("Field").unwrap();
        // The nested one comes first in pre-order.
        assert_eq!(found.x, 1.0);
    }

    #[test]
    fn find_skips_the_page_itself() {
        let doc = SceneDocument::new(sample_page());
        assert!(doc.find_container_by_name("Page 1").is_none());
        assert!(doc.find_container_by_name("Missing").is_none());
    }

    #[test]
    fn document_parses_with_defaults() {
        let json = r#"{
            "name": "Page 1",
            "children": [
                {"name": "Field", "children": [
                    {"name": "S:Res_Low_000", "x": 50.4, "y": 49.6,
                     "children": [{"name": "Slot 1x1", "rotation": 45.2}]}
                ]}
            ]
        }"#;
        let doc = SceneDocument::from_json_str(json).unwrap();
        let field = doc.find_container_by_name("Field").unwrap();
        let block = field.children().next().unwrap();
        assert_eq!(block.name(), "S:Res_Low_000");
        assert_eq!(block.x(), 50.4);
        let marker = block.children().next().unwrap();
        assert_eq!(marker.x(), 0.0);
        assert_eq!(marker.rotation(), 45.2);
        assert_eq!(marker.children().count(), 0);
    }

    #[test]
    fn malformed_document_is_an_error() {
        assert!(SceneDocument::from_json_str("[1, 2").is_err());
    }
}
