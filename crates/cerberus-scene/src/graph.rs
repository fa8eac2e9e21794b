use crate::id::{BlendTreeId, ClipId, ControllerId, MaterialId, NodeId, StateMachineId, TextureId};
use crate::types::{
    AnimationClip, AnimationLayer, AvatarDescriptor, BlendTree, Controller, Material, Node,
    Renderer, StateMachine, Texture, TextureSlot,
};

/// Read-only view of a prefab's asset graph.
///
/// Hosts implement the seven lookups; traversal helpers are provided on top
/// of them. A lookup returns `None` for an id the host cannot resolve, and
/// every helper treats that as "contributes nothing".
pub trait AssetGraph {
    fn node(&self, id: NodeId) -> Option<&Node>;
    fn material(&self, id: MaterialId) -> Option<&Material>;
    fn texture(&self, id: TextureId) -> Option<&Texture>;
    fn controller(&self, id: ControllerId) -> Option<&Controller>;
    fn state_machine(&self, id: StateMachineId) -> Option<&StateMachine>;
    fn blend_tree(&self, id: BlendTreeId) -> Option<&BlendTree>;
    fn clip(&self, id: ClipId) -> Option<&AnimationClip>;

    fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map_or(&[], |node| node.children.as_slice())
    }

    fn renderers(&self, id: NodeId) -> &[Renderer] {
        self.node(id).map_or(&[], |node| node.renderers.as_slice())
    }

    /// Material slots of a renderer, with empty slots filtered out
    fn materials_of<'r>(&self, renderer: &'r Renderer) -> impl Iterator<Item = MaterialId> + 'r
    where
        Self: Sized,
    {
        renderer.materials.iter().flatten().copied()
    }

    fn texture_slots(&self, id: MaterialId) -> &[TextureSlot] {
        self.material(id)
            .map_or(&[], |material| material.texture_slots.as_slice())
    }

    fn avatar_descriptor(&self, id: NodeId) -> Option<&AvatarDescriptor> {
        self.node(id).and_then(|node| node.avatar.as_ref())
    }

    /// Playable layers of the node's avatar descriptor that reference a controller
    fn controllers_of(&self, id: NodeId) -> Vec<(&AnimationLayer, ControllerId)> {
        self.avatar_descriptor(id)
            .map(|descriptor| {
                descriptor
                    .layers
                    .iter()
                    .filter_map(|layer| layer.controller.map(|controller| (layer, controller)))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn node_name(&self, id: NodeId) -> Option<&str> {
        self.node(id).map(|node| node.name.as_str())
    }

    fn material_name(&self, id: MaterialId) -> Option<&str> {
        self.material(id).map(|material| material.name.as_str())
    }

    fn texture_name(&self, id: TextureId) -> Option<&str> {
        self.texture(id).map(|texture| texture.name.as_str())
    }

    fn controller_name(&self, id: ControllerId) -> Option<&str> {
        self.controller(id).map(|controller| controller.name.as_str())
    }

    fn clip_name(&self, id: ClipId) -> Option<&str> {
        self.clip(id).map(|clip| clip.name.as_str())
    }
}
