use crate::core::CollectOptions;
use crate::filter::ClipFilter;
use cerberus_scene::{
    AssetGraph, BlendTreeId, ClipId, ControllerId, LayerType, Motion, NodeId, StateMachineId,
};
use indexmap::{IndexMap, IndexSet};
use log::{debug, info, trace, warn};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// A state machine or blend tree that was reached again while still being
/// explored. Exploration of that branch stops there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum CycleSite {
    StateMachine(StateMachineId),
    BlendTree(BlendTreeId),
}

impl fmt::Display for CycleSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CycleSite::StateMachine(id) => write!(f, "{id}"),
            CycleSite::BlendTree(id) => write!(f, "{id}"),
        }
    }
}

/// Controllers and clips reachable from an avatar descriptor.
///
/// Clip buckets are keyed by the name of each controller layer's root state
/// machine. Clips inside nested sub-state machines land in their root's
/// bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationReport {
    /// One layer tag per descriptor layer that references the controller
    pub controller_usage: IndexMap<ControllerId, Vec<LayerType>>,
    pub controller_clips: IndexMap<ControllerId, IndexMap<String, IndexSet<ClipId>>>,
    pub unique_clips: IndexSet<ClipId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cycles: Vec<CycleSite>,
    /// Set when some branch was cut off by `CollectOptions::max_depth`
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub truncated: bool,
}

impl AnimationReport {
    pub fn is_empty(&self) -> bool {
        self.controller_usage.is_empty()
    }

    /// Union of every bucket of every controller
    pub fn clips_in_buckets(&self) -> IndexSet<ClipId> {
        self.controller_clips
            .values()
            .flat_map(|buckets| buckets.values())
            .flatten()
            .copied()
            .collect()
    }
}

/// Collects the animation clips reachable through the controllers assigned to
/// a root's avatar descriptor.
///
/// Clips the filter excludes never enter any result set.
pub struct AnimationCollector<'f> {
    filter: &'f dyn ClipFilter,
    options: CollectOptions,
}

impl<'f> AnimationCollector<'f> {
    pub fn new(filter: &'f dyn ClipFilter, options: CollectOptions) -> Self {
        Self { filter, options }
    }

    pub fn collect<G: AssetGraph>(&self, graph: &G, root: Option<NodeId>) -> AnimationReport {
        let Some(root) = root else {
            debug!("No root selected, skipping animation collection");
            return AnimationReport::default();
        };
        if graph.avatar_descriptor(root).is_none() {
            info!(
                "Avatar descriptor not found on '{}'",
                graph.node_name(root).unwrap_or("<missing>")
            );
            return AnimationReport::default();
        }

        let mut walk = Exploration {
            graph,
            filter: self.filter,
            max_depth: self.options.max_depth,
            active: HashSet::new(),
            explored: HashMap::new(),
            report: AnimationReport::default(),
        };

        for (layer, controller) in graph.controllers_of(root) {
            let first_use = !walk.report.controller_usage.contains_key(&controller);
            walk.report
                .controller_usage
                .entry(controller)
                .or_default()
                .push(layer.layer_type.clone());
            trace!("{controller} used by {} layer", layer.layer_type);

            // A controller shared by several layers yields the same buckets each time
            if first_use {
                walk.explore_controller(controller);
            }
        }

        let report = walk.report;
        debug!(
            "Collected {} clips from {} controllers",
            report.unique_clips.len(),
            report.controller_usage.len()
        );
        report
    }
}

struct Exploration<'a, G> {
    graph: &'a G,
    filter: &'a dyn ClipFilter,
    max_depth: usize,
    /// State machines and blend trees on the current call chain
    active: HashSet<CycleSite>,
    /// Sites already walked into the current bucket, with the shallowest depth
    /// they were walked from
    explored: HashMap<CycleSite, usize>,
    report: AnimationReport,
}

impl<'a, G: AssetGraph> Exploration<'a, G> {
    fn explore_controller(&mut self, id: ControllerId) {
        let graph = self.graph;
        let buckets = self.report.controller_clips.entry(id).or_default();
        let Some(controller) = graph.controller(id) else {
            warn!("Avatar layer references missing {id}");
            return;
        };

        // Make every bucket exist up front, even ones that end up empty
        let mut roots = Vec::with_capacity(controller.layers.len());
        for layer in &controller.layers {
            match graph.state_machine(layer.state_machine) {
                Some(machine) => {
                    buckets.entry(machine.name.clone()).or_default();
                    roots.push((machine.name.as_str(), layer.state_machine));
                }
                None => warn!(
                    "Layer '{}' of '{}' references missing {}",
                    layer.name, controller.name, layer.state_machine
                ),
            }
        }

        for (bucket_name, machine) in roots {
            let mut bucket = IndexSet::new();
            self.explored.clear();
            self.explore_state_machine(machine, 0, &mut bucket);
            self.report
                .controller_clips
                .entry(id)
                .or_default()
                .entry(bucket_name.to_string())
                .or_default()
                .extend(bucket);
        }
    }

    fn explore_state_machine(
        &mut self,
        id: StateMachineId,
        depth: usize,
        bucket: &mut IndexSet<ClipId>,
    ) {
        let site = CycleSite::StateMachine(id);
        if !self.enter(site, depth) {
            return;
        }

        let graph = self.graph;
        match graph.state_machine(id) {
            Some(machine) => {
                for state in &machine.states {
                    self.explore_motion(state.motion, depth, bucket);
                }
                for &child in &machine.children {
                    self.explore_state_machine(child, depth + 1, bucket);
                }
            }
            None => warn!("Missing {id} referenced as a sub-state machine"),
        }

        self.leave(site, depth);
    }

    fn explore_blend_tree(&mut self, id: BlendTreeId, depth: usize, bucket: &mut IndexSet<ClipId>) {
        let site = CycleSite::BlendTree(id);
        if !self.enter(site, depth) {
            return;
        }

        let graph = self.graph;
        match graph.blend_tree(id) {
            Some(tree) => {
                for &motion in &tree.children {
                    self.explore_motion(motion, depth, bucket);
                }
            }
            None => warn!("Missing {id} referenced as a motion"),
        }

        self.leave(site, depth);
    }

    /// `depth` is the depth of the state machine or blend tree owning the motion
    fn explore_motion(&mut self, motion: Motion, depth: usize, bucket: &mut IndexSet<ClipId>) {
        match motion {
            Motion::Clip(clip) => self.add_clip(clip, bucket),
            Motion::BlendTree(tree) => self.explore_blend_tree(tree, depth + 1, bucket),
            Motion::Empty => {}
        }
    }

    fn add_clip(&mut self, id: ClipId, bucket: &mut IndexSet<ClipId>) {
        let Some(clip) = self.graph.clip(id) else {
            warn!("Missing {id} referenced as a motion");
            return;
        };
        if self.filter.excludes(&clip.name) {
            trace!("Excluding clip '{}' ({id})", clip.name);
            return;
        }
        self.report.unique_clips.insert(id);
        bucket.insert(id);
    }

    /// Push `site` onto the active chain, or refuse when it would loop or go too deep
    fn enter(&mut self, site: CycleSite, depth: usize) -> bool {
        if depth >= self.max_depth {
            warn!("Nesting deeper than {} at {site}, branch truncated", self.max_depth);
            self.report.truncated = true;
            return false;
        }
        if self.active.contains(&site) {
            warn!("Cycle detected at {site}, branch truncated");
            self.report.cycles.push(site);
            return false;
        }
        // Shared sub-graphs add nothing new to a bucket the second time around
        if self.explored.get(&site).is_some_and(|&seen| seen <= depth) {
            trace!("{site} already explored for this bucket");
            return false;
        }
        self.active.insert(site);
        true
    }

    fn leave(&mut self, site: CycleSite, depth: usize) {
        self.active.remove(&site);
        let seen = self.explored.entry(site).or_insert(depth);
        *seen = (*seen).min(depth);
    }
}
