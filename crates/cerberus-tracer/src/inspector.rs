use crate::collectors::{AnimationCollector, AnimationReport, MaterialCollector, MaterialReport};
use crate::core::CollectOptions;
use crate::filter::ExclusionSet;
use cerberus_scene::{AssetGraph, ClipId, NodeId};
use indexmap::IndexSet;
use log::info;
use serde::Serialize;

/// Runtime configuration of an inspection pass
#[derive(Debug, Clone, Default)]
pub struct InspectorConfig {
    pub exclusion: ExclusionSet,
    pub options: CollectOptions,
}

impl InspectorConfig {
    pub fn validate(self) -> Self {
        let options = CollectOptions {
            max_depth: self.options.max_depth.max(1),
            ..self.options
        };
        Self { options, ..self }
    }
}

/// Everything one "Check" pass found under a root
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InspectionReport {
    pub root: Option<NodeId>,
    pub materials: MaterialReport,
    pub animation: AnimationReport,
}

impl InspectionReport {
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty() && self.animation.is_empty()
    }

    /// Union of every controller's clip buckets. Always equal to
    /// `animation.unique_clips` as a set.
    pub fn clips_in_buckets(&self) -> IndexSet<ClipId> {
        self.animation.clips_in_buckets()
    }
}

/// Runs both collectors over a root and keeps the latest results.
///
/// Every [`check`](Self::check) starts from scratch; nothing carries over from
/// the previous pass.
#[derive(Debug, Default)]
pub struct AvatarInspector {
    config: InspectorConfig,
    report: InspectionReport,
}

impl AvatarInspector {
    pub fn new(config: InspectorConfig) -> Self {
        Self {
            config: config.validate(),
            report: InspectionReport::default(),
        }
    }

    pub fn check<G: AssetGraph>(&mut self, graph: &G, root: Option<NodeId>) -> &InspectionReport {
        self.report = InspectionReport {
            root,
            ..InspectionReport::default()
        };
        let Some(root_id) = root else {
            info!("No object selected");
            return &self.report;
        };
        info!(
            "Selected object: {}",
            graph.node_name(root_id).unwrap_or("<missing>")
        );

        let materials = MaterialCollector::new(self.config.options).collect(graph, root);
        info!("Number of unique materials: {}", materials.usage.len());

        let animation = AnimationCollector::new(&self.config.exclusion, self.config.options)
            .collect(graph, root);
        if !animation.is_empty() {
            info!(
                "Number of unique animator controllers: {}",
                animation.controller_usage.len()
            );
        }
        info!("Number of unique animation clips: {}", animation.unique_clips.len());

        self.report.materials = materials;
        self.report.animation = animation;
        &self.report
    }
}
