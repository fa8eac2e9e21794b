// Utility functions for CLI

use cerberus_error::{CerberusError, Result};
use cerberus_scene::{AssetGraph, NodeId, Scene};
use cerberus_tracer::{AssetRef, NameResolver};
use log::{info, warn};
use owo_colors::{OwoColorize, Stream};
use std::path::Path;

/// Command execution context containing common parameters
pub struct CommandContext<'a> {
    pub output: &'a OutputHandler,
}

impl<'a> CommandContext<'a> {
    pub fn new(output: &'a OutputHandler) -> Self {
        Self { output }
    }

    pub fn load_scene(&self, path: &Path) -> Result<Scene> {
        let scene = Scene::from_path(path)?;
        info!(
            "Loaded '{}' with {} nodes",
            path.display(),
            scene.nodes.len()
        );
        Ok(scene)
    }
}

/// Output handler that respects quiet mode
pub struct OutputHandler {
    quiet: bool,
}

impl OutputHandler {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    /// Print explanatory text (suppressed in quiet mode)
    pub fn print_info(&self, text: &str) {
        if !self.quiet {
            println!("{text}");
        }
    }

    /// Print formatted explanatory text (suppressed in quiet mode)
    pub fn print_info_fmt(&self, args: std::fmt::Arguments) {
        if !self.quiet {
            println!("{args}");
        }
    }

    /// Print raw results (always shown)
    pub fn print_result(&self, text: &str) {
        println!("{text}");
    }

    /// Print formatted raw results (always shown)
    pub fn print_result_fmt(&self, args: std::fmt::Arguments) {
        println!("{args}");
    }

    /// Print to stderr (always shown)
    pub fn print_error(&self, text: &str) {
        eprintln!("{text}");
    }
}

// Colorization helpers, plain text when stdout is not a terminal

pub fn colorize_id(id: impl std::fmt::Display) -> String {
    let id = id.to_string();
    id.if_supports_color(Stream::Stdout, |text| text.green())
        .to_string()
}

pub fn colorize_kind(kind: &str) -> String {
    kind.if_supports_color(Stream::Stdout, |text| text.blue())
        .to_string()
}

pub fn colorize_name(name: &str) -> String {
    name.if_supports_color(Stream::Stdout, |text| text.yellow())
        .to_string()
}

/// `Name [kind#id]` for listings, falling back to the id when unnamed
pub fn asset_label<G: AssetGraph>(graph: &G, asset: AssetRef) -> String {
    match NameResolver::resolve_name(graph, asset) {
        Some(name) => format!("{} [{}]", colorize_name(name), colorize_id(asset)),
        None => format!("{} [{}]", colorize_kind(asset.kind()), colorize_id(asset)),
    }
}

/// Result of resolving a node identifier
#[derive(Debug, Clone, PartialEq)]
pub enum NodeResolution {
    /// Single node found
    Single(NodeId),
    /// Multiple nodes share the name
    Ambiguous(Vec<NodeMatch>),
    /// No node found
    NotFound,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeMatch {
    pub id: NodeId,
    pub name: String,
    /// Name of the parent node, to tell same-named nodes apart
    pub parent: Option<String>,
}

/// Resolve a node identifier (index or name)
///
/// This function accepts either:
/// - A numeric string (e.g., "5") representing a node index
/// - A name string (e.g., "Avatar"), matched ignoring ASCII case
pub fn resolve_node_identifier(identifier: &str, scene: &Scene) -> NodeResolution {
    let identifier = identifier.trim();

    if let Ok(index) = identifier.parse::<u32>() {
        let id = NodeId(index);
        return if scene.node(id).is_some() {
            NodeResolution::Single(id)
        } else {
            NodeResolution::NotFound
        };
    }

    let mut matches: Vec<NodeMatch> = scene
        .find_nodes_by_name(identifier)
        .into_iter()
        .map(|id| NodeMatch {
            id,
            name: scene.node_name(id).unwrap_or_default().to_string(),
            parent: None,
        })
        .collect();
    for candidate in &mut matches {
        candidate.parent = scene
            .node_ids()
            .find(|&parent| scene.children(parent).contains(&candidate.id))
            .and_then(|parent| scene.node_name(parent))
            .map(str::to_string);
    }

    match matches.len() {
        0 => NodeResolution::NotFound,
        1 => NodeResolution::Single(matches[0].id),
        _ => NodeResolution::Ambiguous(matches),
    }
}

/// Helper function to display ambiguous matches and suggest resolution
pub fn display_ambiguous_matches(identifier: &str, matches: &[NodeMatch]) {
    warn!("Multiple nodes found with name '{identifier}':");
    eprintln!();
    for (i, node) in matches.iter().enumerate() {
        match &node.parent {
            Some(parent) => eprintln!(
                "  {}: {} [{}] under '{}'",
                i + 1,
                colorize_name(&node.name),
                colorize_id(node.id),
                parent
            ),
            None => eprintln!(
                "  {}: {} [{}]",
                i + 1,
                colorize_name(&node.name),
                colorize_id(node.id)
            ),
        }
    }
    eprintln!();
    eprintln!("Please re-run the command using a specific node index:");
    for node in matches {
        eprintln!("  --root {}", colorize_id(node.id.0));
    }
}

/// Pick the root to inspect: the identifier if given, else the scene's own root
pub fn resolve_root(identifier: Option<&str>, scene: &Scene) -> Result<Option<NodeId>> {
    let Some(identifier) = identifier else {
        if scene.root.is_none() {
            warn!("Scene has no root and none was given with --root");
        }
        return Ok(scene.root);
    };

    match resolve_node_identifier(identifier, scene) {
        NodeResolution::Single(id) => {
            info!("Resolved '{identifier}' to {id}");
            Ok(Some(id))
        }
        NodeResolution::Ambiguous(matches) => {
            display_ambiguous_matches(identifier, &matches);
            Err(CerberusError::scene_ambiguous_node(format!(
                "'{identifier}' matches {} nodes",
                matches.len()
            )))
        }
        NodeResolution::NotFound => Err(CerberusError::scene_node_not_found(format!(
            "No node matches '{identifier}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cerberus_scene::SceneBuilder;

    fn scene() -> Scene {
        let mut builder = SceneBuilder::new("test");
        let root = builder.node("Avatar");
        let body = builder.child(root, "Body");
        builder.child(body, "Armature");
        let outfit = builder.child(root, "Outfit");
        builder.child(outfit, "armature");
        builder.set_root(root);
        builder.build()
    }

    #[test]
    fn test_numeric_identifier() {
        let scene = scene();
        assert_eq!(
            resolve_node_identifier("2", &scene),
            NodeResolution::Single(NodeId(2))
        );
        assert_eq!(resolve_node_identifier("99", &scene), NodeResolution::NotFound);
    }

    #[test]
    fn test_name_identifier_ignores_case() {
        let scene = scene();
        assert_eq!(
            resolve_node_identifier(" body ", &scene),
            NodeResolution::Single(NodeId(1))
        );
    }

    #[test]
    fn test_ambiguous_names_list_parents() {
        let scene = scene();
        let NodeResolution::Ambiguous(matches) = resolve_node_identifier("ARMATURE", &scene) else {
            panic!("expected an ambiguous match");
        };
        let parents: Vec<_> = matches.iter().map(|m| m.parent.as_deref()).collect();
        assert_eq!(parents, vec![Some("Body"), Some("Outfit")]);
    }

    #[test]
    fn test_resolve_root_defaults_to_scene_root() {
        let scene = scene();
        assert_eq!(resolve_root(None, &scene).unwrap(), Some(NodeId(0)));
        assert!(resolve_root(Some("Hat"), &scene).unwrap_err().is_scene());
    }
}
