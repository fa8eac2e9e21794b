use crate::core::CollectOptions;
use cerberus_scene::{AssetGraph, MaterialId, NodeId, TextureId};
use indexmap::{IndexMap, IndexSet};
use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Materials used under a root, in discovery order.
///
/// `usage` records every usage site, so a node that lists the same material
/// twice appears twice. `textures` is deduplicated per material.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialReport {
    pub usage: IndexMap<MaterialId, Vec<NodeId>>,
    pub textures: IndexMap<MaterialId, IndexSet<TextureId>>,
}

impl MaterialReport {
    pub fn is_empty(&self) -> bool {
        self.usage.is_empty()
    }

    pub fn materials(&self) -> impl Iterator<Item = MaterialId> + '_ {
        self.usage.keys().copied()
    }

    /// Every texture referenced by any collected material, first use first
    pub fn unique_textures(&self) -> IndexSet<TextureId> {
        self.textures.values().flatten().copied().collect()
    }
}

/// Walks the hierarchy under a root and gathers materials and their textures.
///
/// Nodes are visited depth-first in pre-order (a node, then its children in
/// declared order); renderers and their material slots keep declared order.
/// That order is what `MaterialReport::usage` records.
#[derive(Debug, Clone, Default)]
pub struct MaterialCollector {
    options: CollectOptions,
}

impl MaterialCollector {
    pub fn new(options: CollectOptions) -> Self {
        Self { options }
    }

    pub fn collect<G: AssetGraph>(&self, graph: &G, root: Option<NodeId>) -> MaterialReport {
        let mut report = MaterialReport::default();
        let Some(root) = root else {
            debug!("No root selected, skipping material collection");
            return report;
        };

        let mut visited = HashSet::new();
        let mut stack = vec![root];
        while let Some(node_id) = stack.pop() {
            if !visited.insert(node_id) {
                warn!("{node_id} is reachable more than once in the hierarchy, skipping revisit");
                continue;
            }
            let Some(node) = graph.node(node_id) else {
                warn!("Hierarchy references missing {node_id}");
                continue;
            };
            if !node.active && !self.options.include_inactive {
                trace!("Skipping inactive subtree at {node_id} ('{}')", node.name);
                continue;
            }

            for renderer in graph.renderers(node_id) {
                for material in graph.materials_of(renderer) {
                    Self::register_usage(graph, &mut report, material, node_id);
                }
            }

            // Reversed so the first child is popped first
            stack.extend(graph.children(node_id).iter().rev().copied());
        }

        debug!(
            "Collected {} unique materials from {} nodes",
            report.usage.len(),
            visited.len()
        );
        report
    }

    fn register_usage<G: AssetGraph>(
        graph: &G,
        report: &mut MaterialReport,
        material: MaterialId,
        node: NodeId,
    ) {
        report.usage.entry(material).or_default().push(node);
        let textures = report.textures.entry(material).or_default();

        if graph.material(material).is_none() {
            warn!("{node} uses missing {material}, no textures collected for it");
            return;
        }
        for slot in graph.texture_slots(material) {
            if let Some(texture) = slot.texture {
                if textures.insert(texture) {
                    trace!("{material} binds {texture} via '{}'", slot.property);
                }
            }
        }
    }
}
