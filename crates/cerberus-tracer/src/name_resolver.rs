use cerberus_scene::{AssetGraph, ClipId, ControllerId, MaterialId, NodeId, TextureId};
use std::fmt;

/// Any asset a report can mention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetRef {
    Node(NodeId),
    Material(MaterialId),
    Texture(TextureId),
    Controller(ControllerId),
    Clip(ClipId),
}

impl AssetRef {
    pub fn kind(&self) -> &'static str {
        match self {
            AssetRef::Node(_) => "Node",
            AssetRef::Material(_) => "Material",
            AssetRef::Texture(_) => "Texture",
            AssetRef::Controller(_) => "Controller",
            AssetRef::Clip(_) => "Clip",
        }
    }
}

impl fmt::Display for AssetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetRef::Node(id) => write!(f, "{id}"),
            AssetRef::Material(id) => write!(f, "{id}"),
            AssetRef::Texture(id) => write!(f, "{id}"),
            AssetRef::Controller(id) => write!(f, "{id}"),
            AssetRef::Clip(id) => write!(f, "{id}"),
        }
    }
}

macro_rules! impl_from_id {
    ($($id:ident => $variant:ident),* $(,)?) => {
        $(impl From<$id> for AssetRef {
            fn from(id: $id) -> Self {
                AssetRef::$variant(id)
            }
        })*
    };
}

impl_from_id!(
    NodeId => Node,
    MaterialId => Material,
    TextureId => Texture,
    ControllerId => Controller,
    ClipId => Clip,
);

/// Resolves user-facing names for assets referenced by id
pub struct NameResolver;

impl NameResolver {
    /// The asset's own name, or `None` if it is missing or unnamed
    pub fn resolve_name<G: AssetGraph>(graph: &G, asset: AssetRef) -> Option<&str> {
        let name = match asset {
            AssetRef::Node(id) => graph.node_name(id),
            AssetRef::Material(id) => graph.material_name(id),
            AssetRef::Texture(id) => graph.texture_name(id),
            AssetRef::Controller(id) => graph.controller_name(id),
            AssetRef::Clip(id) => graph.clip_name(id),
        }?;
        (!name.trim().is_empty()).then_some(name)
    }

    /// Display name combining kind and user name when available
    ///
    /// Examples:
    /// - "Material (Skin)" if the name resolves
    /// - "Material (material#4)" otherwise
    pub fn display_name<G: AssetGraph>(graph: &G, asset: AssetRef) -> String {
        match Self::resolve_name(graph, asset) {
            Some(name) => format!("{} ({name})", asset.kind()),
            None => format!("{} ({asset})", asset.kind()),
        }
    }

    /// Name if resolvable, else the id itself
    pub fn name_or_id<G: AssetGraph>(graph: &G, asset: AssetRef) -> String {
        Self::resolve_name(graph, asset)
            .map(str::to_string)
            .unwrap_or_else(|| asset.to_string())
    }
}
