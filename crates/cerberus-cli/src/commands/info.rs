use crate::util::{CommandContext, asset_label};
use cerberus_error::Result;
use std::path::PathBuf;

pub fn cmd_info(file_path: PathBuf, ctx: &CommandContext) -> Result<()> {
    let scene = ctx.load_scene(&file_path)?;
    let stats = scene.stats();
    ctx.output
        .print_result_fmt(format_args!("File: {}", file_path.display()));
    if !scene.name.is_empty() {
        ctx.output.print_result_fmt(format_args!("Scene: {}", scene.name));
    }
    match scene.root {
        Some(root) => ctx
            .output
            .print_result_fmt(format_args!("Root: {}", asset_label(&scene, root.into()))),
        None => ctx.output.print_result("Root: (none)"),
    }
    ctx.output.print_result("Assets:");
    ctx.output.print_result_fmt(format_args!("  Nodes: {}", stats.nodes));
    ctx.output.print_result_fmt(format_args!("  Materials: {}", stats.materials));
    ctx.output.print_result_fmt(format_args!("  Textures: {}", stats.textures));
    ctx.output.print_result_fmt(format_args!("  Controllers: {}", stats.controllers));
    ctx.output
        .print_result_fmt(format_args!("  State machines: {}", stats.state_machines));
    ctx.output.print_result_fmt(format_args!("  Blend trees: {}", stats.blend_trees));
    ctx.output.print_result_fmt(format_args!("  Animation clips: {}", stats.clips));

    let avatars = scene
        .nodes
        .iter()
        .filter(|node| node.avatar.is_some())
        .count();
    ctx.output
        .print_info_fmt(format_args!("Nodes with an avatar descriptor: {avatars}"));
    Ok(())
}
