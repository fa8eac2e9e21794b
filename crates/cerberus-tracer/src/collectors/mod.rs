//! Collectors walking the asset graph under a root node.

pub mod animation;
pub mod material;

pub use animation::{AnimationCollector, AnimationReport, CycleSite};
pub use material::{MaterialCollector, MaterialReport};
