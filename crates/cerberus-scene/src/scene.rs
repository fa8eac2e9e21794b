use crate::graph::AssetGraph;
use crate::id::{BlendTreeId, ClipId, ControllerId, MaterialId, NodeId, StateMachineId, TextureId};
use crate::types::{
    AnimationClip, BlendTree, Controller, Material, Node, StateMachine, Texture,
};
use cerberus_error::{CerberusError, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// In-memory asset graph, loaded from a JSON scene document.
///
/// Each arena is indexed by the matching id type. `root` is the prefab root
/// selected by default when no other node is requested.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<NodeId>,
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub materials: Vec<Material>,
    #[serde(default)]
    pub textures: Vec<Texture>,
    #[serde(default)]
    pub controllers: Vec<Controller>,
    #[serde(default)]
    pub state_machines: Vec<StateMachine>,
    #[serde(default)]
    pub blend_trees: Vec<BlendTree>,
    #[serde(default)]
    pub clips: Vec<AnimationClip>,
}

/// Arena sizes, for summaries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SceneStats {
    pub nodes: usize,
    pub materials: usize,
    pub textures: usize,
    pub controllers: usize,
    pub state_machines: usize,
    pub blend_trees: usize,
    pub clips: usize,
}

impl Scene {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let scene: Scene = serde_json::from_str(json)
            .map_err(|e| CerberusError::scene_invalid_document(e.to_string()))?;
        scene.check_root()?;
        Ok(scene)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let scene: Scene = serde_json::from_reader(reader)
            .map_err(|e| CerberusError::scene_invalid_document(e.to_string()))?;
        scene.check_root()?;
        Ok(scene)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| CerberusError::from(e).with_file_path(path))?;
        let scene = Self::from_reader(BufReader::new(file)).map_err(|e| e.with_file_path(path))?;
        debug!(
            "Loaded scene '{}' from {} ({} nodes)",
            scene.name,
            path.display(),
            scene.nodes.len()
        );
        Ok(scene)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CerberusError::scene_invalid_document(e.to_string()))
    }

    /// A root that points outside the node arena makes the document unusable;
    /// any other dangling id is tolerated and skipped during traversal.
    fn check_root(&self) -> Result<()> {
        match self.root {
            Some(root) if root.index() >= self.nodes.len() => {
                Err(CerberusError::scene_dangling_reference(format!(
                    "root {root} is out of range (scene has {} nodes)",
                    self.nodes.len()
                ))
                .with_asset(root.to_string()))
            }
            _ => Ok(()),
        }
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId::from_index)
    }

    /// All nodes whose name matches `name`, ignoring ASCII case
    pub fn find_nodes_by_name(&self, name: &str) -> Vec<NodeId> {
        self.node_ids()
            .filter(|&id| self.nodes[id.index()].name.eq_ignore_ascii_case(name))
            .collect()
    }

    pub fn stats(&self) -> SceneStats {
        SceneStats {
            nodes: self.nodes.len(),
            materials: self.materials.len(),
            textures: self.textures.len(),
            controllers: self.controllers.len(),
            state_machines: self.state_machines.len(),
            blend_trees: self.blend_trees.len(),
            clips: self.clips.len(),
        }
    }
}

impl AssetGraph for Scene {
    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    fn material(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id.index())
    }

    fn texture(&self, id: TextureId) -> Option<&Texture> {
        self.textures.get(id.index())
    }

    fn controller(&self, id: ControllerId) -> Option<&Controller> {
        self.controllers.get(id.index())
    }

    fn state_machine(&self, id: StateMachineId) -> Option<&StateMachine> {
        self.state_machines.get(id.index())
    }

    fn blend_tree(&self, id: BlendTreeId) -> Option<&BlendTree> {
        self.blend_trees.get(id.index())
    }

    fn clip(&self, id: ClipId) -> Option<&AnimationClip> {
        self.clips.get(id.index())
    }
}
