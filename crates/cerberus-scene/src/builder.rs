use crate::id::{BlendTreeId, ClipId, ControllerId, MaterialId, NodeId, StateMachineId, TextureId};
use crate::scene::Scene;
use crate::types::{
    AnimationClip, AnimationLayer, AvatarDescriptor, BlendTree, Controller, ControllerLayer,
    LayerType, Material, Motion, Node, Renderer, State, StateMachine, Texture, TextureSlot,
};
use std::path::PathBuf;

/// Programmatic scene construction.
///
/// Assets are added bottom-up: a blend tree's children, a state machine's
/// sub-machines, and a material's textures must exist before the parent
/// that references them.
#[derive(Debug, Default)]
pub struct SceneBuilder {
    scene: Scene,
}

impl SceneBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            scene: Scene {
                name: name.into(),
                ..Scene::default()
            },
        }
    }

    pub fn node(&mut self, name: impl Into<String>) -> NodeId {
        self.scene.nodes.push(Node {
            name: name.into(),
            ..Node::default()
        });
        NodeId::from_index(self.scene.nodes.len() - 1)
    }

    /// Add a node under `parent`
    pub fn child(&mut self, parent: NodeId, name: impl Into<String>) -> NodeId {
        let id = self.node(name);
        self.attach(parent, id);
        id
    }

    pub fn attach(&mut self, parent: NodeId, child: NodeId) {
        self.scene.nodes[parent.index()].children.push(child);
    }

    pub fn set_active(&mut self, node: NodeId, active: bool) {
        self.scene.nodes[node.index()].active = active;
    }

    pub fn set_root(&mut self, root: NodeId) {
        self.scene.root = Some(root);
    }

    pub fn renderer(&mut self, node: NodeId, materials: impl IntoIterator<Item = Option<MaterialId>>) {
        self.scene.nodes[node.index()].renderers.push(Renderer {
            name: None,
            materials: materials.into_iter().collect(),
        });
    }

    pub fn texture(&mut self, name: impl Into<String>, path: Option<PathBuf>) -> TextureId {
        self.scene.textures.push(Texture {
            name: name.into(),
            path,
        });
        TextureId::from_index(self.scene.textures.len() - 1)
    }

    /// Add a material with `(property, texture)` slots
    pub fn material<S: Into<String>>(
        &mut self,
        name: impl Into<String>,
        path: Option<PathBuf>,
        slots: impl IntoIterator<Item = (S, Option<TextureId>)>,
    ) -> MaterialId {
        let texture_slots = slots
            .into_iter()
            .map(|(property, texture)| TextureSlot {
                property: property.into(),
                texture,
            })
            .collect();
        self.scene.materials.push(Material {
            name: name.into(),
            path,
            texture_slots,
        });
        MaterialId::from_index(self.scene.materials.len() - 1)
    }

    pub fn clip(&mut self, name: impl Into<String>) -> ClipId {
        self.scene.clips.push(AnimationClip {
            name: name.into(),
            path: None,
        });
        ClipId::from_index(self.scene.clips.len() - 1)
    }

    pub fn blend_tree(
        &mut self,
        name: impl Into<String>,
        children: impl IntoIterator<Item = Motion>,
    ) -> BlendTreeId {
        self.scene.blend_trees.push(BlendTree {
            name: name.into(),
            children: children.into_iter().collect(),
        });
        BlendTreeId::from_index(self.scene.blend_trees.len() - 1)
    }

    /// Add a child motion to an existing blend tree
    pub fn push_blend_child(&mut self, tree: BlendTreeId, motion: Motion) {
        self.scene.blend_trees[tree.index()].children.push(motion);
    }

    /// Add a state machine with `(state name, motion)` states and nested sub-machines
    pub fn state_machine<S: Into<String>>(
        &mut self,
        name: impl Into<String>,
        states: impl IntoIterator<Item = (S, Motion)>,
        children: impl IntoIterator<Item = StateMachineId>,
    ) -> StateMachineId {
        let states = states
            .into_iter()
            .map(|(name, motion)| State {
                name: name.into(),
                motion,
            })
            .collect();
        self.scene.state_machines.push(StateMachine {
            name: name.into(),
            states,
            children: children.into_iter().collect(),
        });
        StateMachineId::from_index(self.scene.state_machines.len() - 1)
    }

    /// Nest `child` under `parent` after both exist. This can build cycles,
    /// which well-formed controllers never contain.
    pub fn push_sub_state_machine(&mut self, parent: StateMachineId, child: StateMachineId) {
        self.scene.state_machines[parent.index()].children.push(child);
    }

    /// Add a controller whose layers are `(layer name, root state machine)`
    pub fn controller<S: Into<String>>(
        &mut self,
        name: impl Into<String>,
        layers: impl IntoIterator<Item = (S, StateMachineId)>,
    ) -> ControllerId {
        let layers = layers
            .into_iter()
            .map(|(name, state_machine)| ControllerLayer {
                name: name.into(),
                state_machine,
            })
            .collect();
        self.scene.controllers.push(Controller {
            name: name.into(),
            path: None,
            layers,
        });
        ControllerId::from_index(self.scene.controllers.len() - 1)
    }

    /// Attach an avatar descriptor to `node`, replacing any existing one
    pub fn avatar(
        &mut self,
        node: NodeId,
        layers: impl IntoIterator<Item = (LayerType, Option<ControllerId>)>,
    ) {
        let layers = layers
            .into_iter()
            .map(|(layer_type, controller)| AnimationLayer {
                layer_type,
                controller,
            })
            .collect();
        self.scene.nodes[node.index()].avatar = Some(AvatarDescriptor { layers });
    }

    pub fn build(self) -> Scene {
        self.scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::AssetGraph;

    #[test]
    fn test_builder_assigns_sequential_ids() {
        let mut builder = SceneBuilder::new("test");
        let root = builder.node("Root");
        let body = builder.child(root, "Body");
        let hair = builder.child(root, "Hair");
        builder.set_root(root);
        let scene = builder.build();

        assert_eq!((root, body, hair), (NodeId(0), NodeId(1), NodeId(2)));
        assert_eq!(scene.children(root), &[body, hair]);
        assert_eq!(scene.root, Some(root));
    }

    #[test]
    fn test_builder_can_express_cycles() {
        let mut builder = SceneBuilder::new("cyclic");
        let inner = builder.state_machine::<&str>("Inner", [], []);
        let outer = builder.state_machine::<&str>("Outer", [], [inner]);
        builder.push_sub_state_machine(inner, outer);
        let scene = builder.build();

        assert_eq!(scene.state_machine(inner).unwrap().children, vec![outer]);
        assert_eq!(scene.state_machine(outer).unwrap().children, vec![inner]);
    }
}
