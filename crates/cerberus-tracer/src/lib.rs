//! # cerberus-tracer
//!
//! Asset reachability for avatar prefabs.
//!
//! Given a root node of an [`AssetGraph`], this crate finds every material the
//! hierarchy renders with (and the textures those materials bind), and every
//! animation clip reachable through the controllers of the root's avatar
//! descriptor, walking nested state machines and blend trees.
//!
//! ## Key Features
//!
//! - **Identity keyed**: results are keyed by asset id, never by name
//! - **Discovery ordered**: usage lists and sets keep first-seen order
//! - **Cycle safe**: malformed controllers are truncated, not followed forever
//! - **Pluggable exclusion**: any [`ClipFilter`], `contains:proxy` by default
//!
//! ## Example
//!
//! ```
//! use cerberus_scene::{LayerType, Motion, SceneBuilder};
//! use cerberus_tracer::{AvatarInspector, InspectorConfig};
//!
//! let mut builder = SceneBuilder::new("Avatar");
//! let root = builder.node("Avatar");
//! let idle = builder.clip("Idle");
//! let placeholder = builder.clip("proxy_stand_still");
//! let base = builder.state_machine(
//!     "Base",
//!     [("Idle", Motion::Clip(idle)), ("Stand", Motion::Clip(placeholder))],
//!     [],
//! );
//! let controller = builder.controller("Locomotion", [("Base Layer", base)]);
//! builder.avatar(root, [(LayerType::Base, Some(controller))]);
//! let scene = builder.build();
//!
//! let mut inspector = AvatarInspector::new(InspectorConfig::default());
//! let report = inspector.check(&scene, Some(root));
//! assert_eq!(report.animation.unique_clips.len(), 1);
//! ```

pub mod collectors;
pub mod core;
pub mod export;
pub mod filter;
pub mod inspector;
pub mod name_resolver;

pub use cerberus_scene::AssetGraph;
pub use collectors::{
    AnimationCollector, AnimationReport, CycleSite, MaterialCollector, MaterialReport,
};
pub use core::CollectOptions;
pub use export::{
    ExportReport, ExportedMaterial, ExportedTexture, MaterialExporter, RelinkedBinding,
    SkippedAsset,
};
pub use filter::{ClipFilter, ExclusionRule, ExclusionSet};
pub use inspector::{AvatarInspector, InspectionReport, InspectorConfig};
pub use name_resolver::{AssetRef, NameResolver};

/// Canonical result type for this crate
pub use cerberus_error::Result;
