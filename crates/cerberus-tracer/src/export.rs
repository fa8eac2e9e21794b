//! Copy collected materials and textures into a save folder and rebind the
//! copies' texture slots.
//!
//! The target folder is `<save_root>/<prefab_name>` with flat `material/` and
//! `texture/` subfolders. Files are copied by file name, so two assets sharing
//! a file name overwrite each other (the later one wins, and the clash is
//! reported). Rebound slots are written to `relink.json` in the target folder.

use crate::collectors::MaterialReport;
use cerberus_error::{CerberusError, Result};
use cerberus_scene::{AssetGraph, MaterialId, TextureId};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const MATERIAL_FOLDER: &str = "material";
pub const TEXTURE_FOLDER: &str = "texture";
pub const MANIFEST_FILE: &str = "relink.json";

/// A texture slot of a copied material, pointed at the copied texture
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelinkedBinding {
    pub property: String,
    pub texture: TextureId,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedMaterial {
    pub id: MaterialId,
    pub name: String,
    pub source: PathBuf,
    pub destination: PathBuf,
    pub bindings: Vec<RelinkedBinding>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedTexture {
    pub id: TextureId,
    pub name: String,
    pub source: PathBuf,
    pub destination: PathBuf,
}

/// An asset left out of the export, e.g. one with no source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedAsset {
    pub asset: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportReport {
    pub target: PathBuf,
    /// The target folder did not exist before this export
    pub created_folder: bool,
    pub dry_run: bool,
    pub materials: Vec<ExportedMaterial>,
    pub textures: Vec<ExportedTexture>,
    pub skipped: Vec<SkippedAsset>,
    /// Destinations written by more than one asset
    pub collisions: Vec<PathBuf>,
}

impl ExportReport {
    pub fn manifest_path(&self) -> PathBuf {
        self.target.join(MANIFEST_FILE)
    }
}

#[derive(Debug, Clone)]
pub struct MaterialExporter {
    save_root: PathBuf,
    asset_root: Option<PathBuf>,
    dry_run: bool,
}

impl MaterialExporter {
    pub fn new<P: Into<PathBuf>>(save_root: P) -> Self {
        Self {
            save_root: save_root.into(),
            asset_root: None,
            dry_run: false,
        }
    }

    /// Resolve relative asset paths against `root` instead of the working directory
    pub fn with_asset_root<P: Into<PathBuf>>(mut self, root: P) -> Self {
        self.asset_root = Some(root.into());
        self
    }

    /// Plan the export without touching the file system
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn export<G: AssetGraph>(
        &self,
        graph: &G,
        report: &MaterialReport,
        prefab_name: &str,
    ) -> Result<ExportReport> {
        if prefab_name.is_empty()
            || matches!(prefab_name, "." | "..")
            || prefab_name.contains(['/', '\\'])
        {
            return Err(CerberusError::export_folder_failed(
                format!("'{prefab_name}' is not a valid folder name"),
                &self.save_root,
            ));
        }

        let target = self.save_root.join(prefab_name);
        let mut export = ExportReport {
            created_folder: !target.is_dir(),
            dry_run: self.dry_run,
            target,
            ..ExportReport::default()
        };
        self.prepare_folders(&export)?;

        let texture_dir = export.target.join(TEXTURE_FOLDER);
        let material_dir = export.target.join(MATERIAL_FOLDER);
        let mut written: HashMap<PathBuf, String> = HashMap::new();

        let mut copied_textures: HashMap<TextureId, PathBuf> = HashMap::new();
        for texture_id in report.unique_textures() {
            let Some(texture) = graph.texture(texture_id) else {
                export.skipped.push(SkippedAsset {
                    asset: texture_id.to_string(),
                    reason: "not present in the scene".to_string(),
                });
                continue;
            };
            let Some(source) = &texture.path else {
                export.skipped.push(SkippedAsset {
                    asset: format!("{texture_id} '{}'", texture.name),
                    reason: "no source file".to_string(),
                });
                continue;
            };

            let destination =
                self.copy_asset(source, &texture_dir, texture_id.to_string(), &mut written, &mut export)?;
            copied_textures.insert(texture_id, destination.clone());
            export.textures.push(ExportedTexture {
                id: texture_id,
                name: texture.name.clone(),
                source: source.clone(),
                destination,
            });
        }

        for material_id in report.materials() {
            let Some(material) = graph.material(material_id) else {
                export.skipped.push(SkippedAsset {
                    asset: material_id.to_string(),
                    reason: "not present in the scene".to_string(),
                });
                continue;
            };
            let Some(source) = &material.path else {
                export.skipped.push(SkippedAsset {
                    asset: format!("{material_id} '{}'", material.name),
                    reason: "no source file".to_string(),
                });
                continue;
            };

            let destination = self.copy_asset(
                source,
                &material_dir,
                material_id.to_string(),
                &mut written,
                &mut export,
            )?;
            let bindings = graph
                .texture_slots(material_id)
                .iter()
                .filter_map(|slot| {
                    let texture = slot.texture?;
                    let path = copied_textures.get(&texture)?;
                    Some(RelinkedBinding {
                        property: slot.property.clone(),
                        texture,
                        path: path.clone(),
                    })
                })
                .collect();
            export.materials.push(ExportedMaterial {
                id: material_id,
                name: material.name.clone(),
                source: source.clone(),
                destination,
                bindings,
            });
        }

        self.write_manifest(&export)?;
        info!(
            "Exported {} materials and {} textures to {}",
            export.materials.len(),
            export.textures.len(),
            export.target.display()
        );
        Ok(export)
    }

    fn prepare_folders(&self, export: &ExportReport) -> Result<()> {
        let target = &export.target;
        if export.created_folder {
            if !self.dry_run {
                fs::create_dir_all(target).map_err(|e| {
                    CerberusError::export_folder_failed(e.to_string(), target.clone())
                })?;
            }
            info!("Created folder: {}", target.display());
        } else {
            info!("Folder already exists: {}", target.display());
        }

        for sub_folder in [TEXTURE_FOLDER, MATERIAL_FOLDER] {
            let path = target.join(sub_folder);
            if path.is_dir() {
                continue;
            }
            if !self.dry_run {
                fs::create_dir(&path)
                    .map_err(|e| CerberusError::export_folder_failed(e.to_string(), path.clone()))?;
            }
            info!("Created {sub_folder} folder inside: {}", target.display());
        }
        Ok(())
    }

    /// Copy `source` flat into `folder`, returning the destination path
    fn copy_asset(
        &self,
        source: &Path,
        folder: &Path,
        asset: String,
        written: &mut HashMap<PathBuf, String>,
        export: &mut ExportReport,
    ) -> Result<PathBuf> {
        let file_name = source
            .file_name()
            .ok_or_else(|| CerberusError::export_missing_file_name(source).with_asset(asset.clone()))?;
        let destination = folder.join(file_name);

        if let Some(previous) = written.insert(destination.clone(), asset.clone()) {
            warn!(
                "{asset} overwrites {previous} at {}",
                destination.display()
            );
            if !export.collisions.contains(&destination) {
                export.collisions.push(destination.clone());
            }
        }

        if self.dry_run {
            debug!("Would copy {} to {}", source.display(), destination.display());
            return Ok(destination);
        }

        let resolved = self.resolve_source(source);
        fs::copy(&resolved, &destination).map_err(|e| {
            CerberusError::export_copy_failed(
                format!("copying {}: {e}", resolved.display()),
                destination.clone(),
            )
            .with_asset(asset)
        })?;
        debug!("Copied {} to {}", resolved.display(), destination.display());
        Ok(destination)
    }

    fn resolve_source(&self, source: &Path) -> PathBuf {
        match &self.asset_root {
            Some(root) if source.is_relative() => root.join(source),
            _ => source.to_path_buf(),
        }
    }

    fn write_manifest(&self, export: &ExportReport) -> Result<()> {
        let path = export.manifest_path();
        if self.dry_run {
            debug!("Would write {}", path.display());
            return Ok(());
        }
        let json = serde_json::to_string_pretty(&export.materials)
            .map_err(|e| CerberusError::export_manifest_failed(e.to_string(), path.clone()))?;
        fs::write(&path, json)
            .map_err(|e| CerberusError::export_manifest_failed(e.to_string(), path.clone()))?;
        debug!("Wrote relink manifest {}", path.display());
        Ok(())
    }
}
