//! Asset records stored in a scene.

use crate::id::{BlendTreeId, ClipId, ControllerId, MaterialId, NodeId, StateMachineId, TextureId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// A point in the prefab hierarchy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    /// Inactive nodes hide their whole subtree from the editor's default lookups
    #[serde(default = "active_by_default", skip_serializing_if = "is_active")]
    pub active: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub renderers: Vec<Renderer>,
    /// Avatar descriptor component, normally only present on the prefab root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<AvatarDescriptor>,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            name: String::new(),
            active: true,
            children: Vec::new(),
            renderers: Vec::new(),
            avatar: None,
        }
    }
}

fn active_by_default() -> bool {
    true
}

fn is_active(active: &bool) -> bool {
    *active
}

/// A renderer component; its material slots may repeat or be empty
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Renderer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub materials: Vec<Option<MaterialId>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    /// Source asset file, used by the exporter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub texture_slots: Vec<TextureSlot>,
}

/// A texture-valued shader property; `texture` is `None` when nothing is bound
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureSlot {
    pub property: String,
    #[serde(default)]
    pub texture: Option<TextureId>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Texture {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// The avatar descriptor component and its playable layers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AvatarDescriptor {
    #[serde(default)]
    pub layers: Vec<AnimationLayer>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationLayer {
    pub layer_type: LayerType,
    #[serde(default)]
    pub controller: Option<ControllerId>,
}

/// Playable layer tags of an avatar descriptor.
///
/// `Display` yields the tag as the avatar SDK spells it ("FX", "TPose").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LayerType {
    Base,
    Additive,
    Gesture,
    Action,
    Fx,
    Sitting,
    TPose,
    IkPose,
    Other(String),
}

impl LayerType {
    pub fn as_str(&self) -> &str {
        match self {
            LayerType::Base => "Base",
            LayerType::Additive => "Additive",
            LayerType::Gesture => "Gesture",
            LayerType::Action => "Action",
            LayerType::Fx => "FX",
            LayerType::Sitting => "Sitting",
            LayerType::TPose => "TPose",
            LayerType::IkPose => "IKPose",
            LayerType::Other(tag) => tag,
        }
    }
}

impl From<String> for LayerType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "Base" => LayerType::Base,
            "Additive" => LayerType::Additive,
            "Gesture" => LayerType::Gesture,
            "Action" => LayerType::Action,
            "FX" => LayerType::Fx,
            "Sitting" => LayerType::Sitting,
            "TPose" => LayerType::TPose,
            "IKPose" => LayerType::IkPose,
            _ => LayerType::Other(tag),
        }
    }
}

impl From<&str> for LayerType {
    fn from(tag: &str) -> Self {
        LayerType::from(tag.to_string())
    }
}

impl From<LayerType> for String {
    fn from(layer_type: LayerType) -> Self {
        layer_type.as_str().to_string()
    }
}

impl fmt::Display for LayerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An animation controller: named layers, each rooted at a state machine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Controller {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub layers: Vec<ControllerLayer>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllerLayer {
    pub name: String,
    pub state_machine: StateMachineId,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateMachine {
    pub name: String,
    #[serde(default)]
    pub states: Vec<State>,
    /// Nested sub-state machines
    #[serde(default)]
    pub children: Vec<StateMachineId>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct State {
    pub name: String,
    #[serde(default)]
    pub motion: Motion,
}

/// What a state or blend-tree child plays back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Motion {
    Clip(ClipId),
    BlendTree(BlendTreeId),
    #[default]
    Empty,
}

impl Motion {
    pub fn is_empty(&self) -> bool {
        matches!(self, Motion::Empty)
    }
}

impl From<ClipId> for Motion {
    fn from(id: ClipId) -> Self {
        Motion::Clip(id)
    }
}

impl From<BlendTreeId> for Motion {
    fn from(id: BlendTreeId) -> Self {
        Motion::BlendTree(id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlendTree {
    pub name: String,
    #[serde(default)]
    pub children: Vec<Motion>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimationClip {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}
