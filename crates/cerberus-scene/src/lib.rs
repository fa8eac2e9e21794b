//! # cerberus-scene
//!
//! Host-agnostic model of an avatar prefab: the node hierarchy with its
//! renderers and materials, and the animation controllers reachable from the
//! avatar descriptor.
//!
//! The inspection core only ever sees the [`AssetGraph`] trait. [`Scene`] is
//! the in-memory implementation, loaded from a JSON scene document or built
//! with [`SceneBuilder`].

pub mod builder;
pub mod graph;
pub mod id;
pub mod scene;
pub mod types;

pub use builder::SceneBuilder;
pub use graph::AssetGraph;
pub use id::{BlendTreeId, ClipId, ControllerId, MaterialId, NodeId, StateMachineId, TextureId};
pub use scene::{Scene, SceneStats};
pub use types::{
    AnimationClip, AnimationLayer, AvatarDescriptor, BlendTree, Controller, ControllerLayer,
    LayerType, Material, Motion, Node, Renderer, State, StateMachine, Texture, TextureSlot,
};

/// Canonical result type for this crate
pub use cerberus_error::Result;
