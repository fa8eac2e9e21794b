use crate::cli_args::InspectArgs;
use crate::util::{CommandContext, colorize_name, resolve_root};
use cerberus_error::{CerberusError, CliErrorKind, Result};
use cerberus_scene::AssetGraph;
use cerberus_tracer::{AvatarInspector, ExportReport, MaterialExporter};
use log::info;
use std::path::{Path, PathBuf};

pub fn cmd_export(
    args: &InspectArgs,
    dest: PathBuf,
    name: Option<String>,
    dry_run: bool,
    json: bool,
    ctx: &CommandContext,
) -> Result<()> {
    let scene = ctx.load_scene(&args.file)?;
    let Some(root) = resolve_root(args.root.as_deref(), &scene)? else {
        return Err(CerberusError::cli(
            "No folder or prefab selected: the scene has no root, pass --root",
            CliErrorKind::MissingArgument,
        )
        .with_command("export"));
    };

    let prefab_name = match name {
        Some(name) => name,
        None => scene.node_name(root).unwrap_or_default().to_string(),
    };
    info!("Exporting '{prefab_name}' to {}", dest.display());

    let mut inspector = AvatarInspector::new(args.inspector_config()?);
    let report = inspector.check(&scene, Some(root));

    let asset_root = args
        .file
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    let export = MaterialExporter::new(dest)
        .with_asset_root(asset_root)
        .dry_run(dry_run)
        .export(&scene, &report.materials, &prefab_name)?;

    if json {
        let json = serde_json::to_string_pretty(&export)
            .map_err(|e| CerberusError::cli_output_format(format!("json: {e}")))?;
        ctx.output.print_result(&json);
    } else {
        print_summary(&export, ctx);
    }
    Ok(())
}

fn print_summary(export: &ExportReport, ctx: &CommandContext) {
    let verb = if export.dry_run { "Would copy" } else { "Copied" };
    ctx.output.print_info_fmt(format_args!(
        "{} {} materials and {} textures into {}",
        verb,
        export.materials.len(),
        export.textures.len(),
        export.target.display()
    ));

    for material in &export.materials {
        ctx.output.print_result_fmt(format_args!(
            "  {} -> {}",
            colorize_name(&material.name),
            material.destination.display()
        ));
        for binding in &material.bindings {
            ctx.output.print_result_fmt(format_args!(
                "    {} -> {}",
                binding.property,
                binding.path.display()
            ));
        }
    }
    for texture in &export.textures {
        ctx.output.print_result_fmt(format_args!(
            "  {} -> {}",
            colorize_name(&texture.name),
            texture.destination.display()
        ));
    }

    for skipped in &export.skipped {
        ctx.output.print_error(&format!(
            "Skipped {}: {}",
            skipped.asset, skipped.reason
        ));
    }
    for path in &export.collisions {
        ctx.output.print_error(&format!(
            "Warning: {} was written by more than one asset, the last one wins",
            path.display()
        ));
    }
    if !export.dry_run {
        ctx.output
            .print_info_fmt(format_args!("Relink manifest: {}", export.manifest_path().display()));
    }
}
