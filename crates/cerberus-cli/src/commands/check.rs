use crate::cli_args::InspectArgs;
use crate::util::{CommandContext, asset_label, resolve_root};
use crate::{OutputFormat, Section};
use cerberus_error::{CerberusError, Result};
use cerberus_scene::{ClipId, Scene};
use cerberus_tracer::{AssetRef, AvatarInspector, CycleSite, InspectionReport, NameResolver};
use serde::Serialize;
use text_trees::{FormatCharacters, StringTreeNode, TreeFormatting};

pub fn cmd_check(
    args: &InspectArgs,
    format: OutputFormat,
    ascii: bool,
    section: Section,
    ctx: &CommandContext,
) -> Result<()> {
    let scene = ctx.load_scene(&args.file)?;
    let root = resolve_root(args.root.as_deref(), &scene)?;
    let mut inspector = AvatarInspector::new(args.inspector_config()?);
    let report = inspector.check(&scene, root);

    match format {
        OutputFormat::Flat => print_flat(&scene, report, section, ctx),
        OutputFormat::Tree => {
            let tree = build_text_tree(&scene, report, section);
            let format_chars = if ascii {
                FormatCharacters::ascii()
            } else {
                FormatCharacters::box_chars()
            };
            let formatting = TreeFormatting::dir_tree(format_chars);
            let output = tree
                .to_string_with_format(&formatting)
                .map_err(|e| CerberusError::cli_output_format(format!("tree: {e}")))?;
            ctx.output.print_result(output.trim_end());
        }
        OutputFormat::Json => {
            let view = CheckView::new(&scene, report, section);
            let json = serde_json::to_string_pretty(&view)
                .map_err(|e| CerberusError::cli_output_format(format!("json: {e}")))?;
            ctx.output.print_result(&json);
        }
    }
    Ok(())
}

fn shows_materials(section: Section) -> bool {
    matches!(section, Section::All | Section::Materials)
}

fn shows_animations(section: Section) -> bool {
    matches!(section, Section::All | Section::Animations)
}

fn print_flat(scene: &Scene, report: &InspectionReport, section: Section, ctx: &CommandContext) {
    let Some(root) = report.root else {
        ctx.output.print_info("No object selected");
        return;
    };
    ctx.output
        .print_info_fmt(format_args!("Selected object: {}", asset_label(scene, root.into())));

    if shows_materials(section) {
        let materials = &report.materials;
        ctx.output.print_info_fmt(format_args!(
            "Materials and Textures ({} materials, {} textures):",
            materials.usage.len(),
            materials.unique_textures().len()
        ));
        for (&material, users) in &materials.usage {
            ctx.output
                .print_result_fmt(format_args!("  {}", asset_label(scene, material.into())));
            for &node in users {
                ctx.output.print_result_fmt(format_args!(
                    "    Used by: {}",
                    asset_label(scene, node.into())
                ));
            }
            for &texture in materials.textures.get(&material).into_iter().flatten() {
                ctx.output.print_result_fmt(format_args!(
                    "    Texture: {}",
                    asset_label(scene, texture.into())
                ));
            }
        }
    }

    if shows_animations(section) {
        let animation = &report.animation;
        ctx.output.print_info_fmt(format_args!(
            "Animator and Animation ({} controllers, {} unique clips):",
            animation.controller_usage.len(),
            animation.unique_clips.len()
        ));
        for (&controller, layers) in &animation.controller_usage {
            ctx.output
                .print_result_fmt(format_args!("  {}", asset_label(scene, controller.into())));
            for layer in layers {
                ctx.output
                    .print_result_fmt(format_args!("    Used in layer: {layer}"));
            }
            for (bucket, clips) in animation.controller_clips.get(&controller).into_iter().flatten() {
                ctx.output.print_result_fmt(format_args!("    {bucket}:"));
                for &clip in clips {
                    ctx.output
                        .print_result_fmt(format_args!("      {}", asset_label(scene, clip.into())));
                }
            }
        }
        for site in &animation.cycles {
            ctx.output
                .print_error(&format!("Warning: cycle at {site} was not followed"));
        }
        if animation.truncated {
            ctx.output
                .print_error("Warning: some branches were deeper than --max-depth and were cut off");
        }
    }
}

pub fn build_text_tree(scene: &Scene, report: &InspectionReport, section: Section) -> StringTreeNode {
    let Some(root) = report.root else {
        return StringTreeNode::new("No object selected".to_string());
    };

    let mut sections = Vec::new();
    if shows_materials(section) {
        let materials = &report.materials;
        let children = materials.usage.iter().map(|(&material, users)| {
            let users = users
                .iter()
                .map(|&node| StringTreeNode::new(format!("used by {}", asset_label(scene, node.into()))));
            let textures = materials
                .textures
                .get(&material)
                .into_iter()
                .flatten()
                .map(|&texture| {
                    StringTreeNode::new(format!("texture {}", asset_label(scene, texture.into())))
                });
            StringTreeNode::with_child_nodes(
                asset_label(scene, material.into()),
                users.chain(textures),
            )
        });
        sections.push(StringTreeNode::with_child_nodes(
            format!("Materials ({})", materials.usage.len()),
            children,
        ));
    }

    if shows_animations(section) {
        let animation = &report.animation;
        let children = animation.controller_usage.iter().map(|(&controller, layers)| {
            let layers = layers
                .iter()
                .map(|layer| StringTreeNode::new(format!("layer {layer}")));
            let buckets = animation
                .controller_clips
                .get(&controller)
                .into_iter()
                .flatten()
                .map(|(bucket, clips)| {
                    StringTreeNode::with_child_nodes(
                        bucket.clone(),
                        clips
                            .iter()
                            .map(|&clip| StringTreeNode::new(asset_label(scene, clip.into()))),
                    )
                });
            StringTreeNode::with_child_nodes(
                asset_label(scene, controller.into()),
                layers.chain(buckets),
            )
        });
        sections.push(StringTreeNode::with_child_nodes(
            format!(
                "Animations ({} controllers, {} clips)",
                animation.controller_usage.len(),
                animation.unique_clips.len()
            ),
            children,
        ));
    }

    StringTreeNode::with_child_nodes(asset_label(scene, root.into()), sections.into_iter())
}

/// An asset as it appears in JSON output
#[derive(Debug, Serialize)]
struct NamedAsset {
    id: String,
    name: Option<String>,
}

impl NamedAsset {
    fn new(scene: &Scene, asset: AssetRef) -> Self {
        Self {
            id: asset.to_string(),
            name: NameResolver::resolve_name(scene, asset).map(str::to_string),
        }
    }
}

#[derive(Debug, Serialize)]
struct MaterialView {
    material: NamedAsset,
    used_by: Vec<NamedAsset>,
    textures: Vec<NamedAsset>,
}

#[derive(Debug, Serialize)]
struct BucketView {
    state_machine: String,
    clips: Vec<NamedAsset>,
}

#[derive(Debug, Serialize)]
struct ControllerView {
    controller: NamedAsset,
    layers: Vec<String>,
    buckets: Vec<BucketView>,
}

#[derive(Debug, Serialize)]
struct CheckView {
    root: Option<NamedAsset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    materials: Option<Vec<MaterialView>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    controllers: Option<Vec<ControllerView>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    unique_clips: Option<Vec<NamedAsset>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    cycles: Vec<CycleSite>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    truncated: bool,
}

impl CheckView {
    fn new(scene: &Scene, report: &InspectionReport, section: Section) -> Self {
        let named = |asset: AssetRef| NamedAsset::new(scene, asset);

        let materials = shows_materials(section).then(|| {
            report
                .materials
                .usage
                .iter()
                .map(|(&material, users)| MaterialView {
                    material: named(material.into()),
                    used_by: users.iter().map(|&node| named(node.into())).collect(),
                    textures: report
                        .materials
                        .textures
                        .get(&material)
                        .into_iter()
                        .flatten()
                        .map(|&texture| named(texture.into()))
                        .collect(),
                })
                .collect()
        });

        let animation = &report.animation;
        let controllers = shows_animations(section).then(|| {
            animation
                .controller_usage
                .iter()
                .map(|(&controller, layers)| ControllerView {
                    controller: named(controller.into()),
                    layers: layers.iter().map(ToString::to_string).collect(),
                    buckets: animation
                        .controller_clips
                        .get(&controller)
                        .into_iter()
                        .flatten()
                        .map(|(bucket, bucket_clips)| BucketView {
                            state_machine: bucket.clone(),
                            clips: named_clips(scene, bucket_clips),
                        })
                        .collect(),
                })
                .collect()
        });
        let unique_clips =
            shows_animations(section).then(|| named_clips(scene, &animation.unique_clips));

        Self {
            root: report.root.map(|root| named(root.into())),
            materials,
            controllers,
            unique_clips,
            cycles: animation.cycles.clone(),
            truncated: animation.truncated,
        }
    }
}

fn named_clips<'a>(scene: &Scene, clips: impl IntoIterator<Item = &'a ClipId>) -> Vec<NamedAsset> {
    clips
        .into_iter()
        .map(|&clip| NamedAsset::new(scene, clip.into()))
        .collect()
}
