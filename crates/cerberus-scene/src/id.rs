//! Typed asset identities.
//!
//! Every asset is addressed by the index of its record in the owning arena.
//! Identity is the id, not the name: two clips both called "Idle" are two
//! different assets.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl $name {
            pub fn index(self) -> usize {
                self.0 as usize
            }

            pub(crate) fn from_index(index: usize) -> Self {
                Self(index as u32)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, "#{}"), self.0)
            }
        }
    };
}

define_id!(
    /// A point in the prefab hierarchy
    NodeId,
    "node"
);
define_id!(MaterialId, "material");
define_id!(TextureId, "texture");
define_id!(ControllerId, "controller");
define_id!(StateMachineId, "state_machine");
define_id!(BlendTreeId, "blend_tree");
define_id!(ClipId, "clip");
