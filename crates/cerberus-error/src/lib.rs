//! # cerberus-error - Unified Error Handling
//!
//! Error types shared by every cerberus crate:
//! - One error enum organised by domain (scene loading, tracing, export, CLI)
//! - Optional context on each error (file path, asset reference)
//! - Short messages for the CLI and a longer form for debugging
//!
//! Most of the inspection core cannot fail: missing components and empty
//! slots are normal input. Errors come from loading scene documents, from
//! the export step touching the file system, and from user input.

use std::path::PathBuf;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The main error type for cerberus
#[derive(Error, Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CerberusError {
    /// File system and I/O related errors
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
        file_path: Option<PathBuf>,
        // Keeps the source message rather than the io::Error so the type stays Clone
        #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
        source_message: Option<String>,
    },

    /// Scene document loading and structure errors
    #[error("Scene error: {message}")]
    Scene {
        message: String,
        #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
        file_path: Option<PathBuf>,
        #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
        asset: Option<String>,
        kind: SceneErrorKind,
    },

    /// Material and animation collection errors
    #[error("Tracer error: {message}")]
    Tracer {
        message: String,
        #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
        asset: Option<String>,
        kind: TracerErrorKind,
    },

    /// Asset copy and relink errors
    #[error("Export error: {message}")]
    Export {
        message: String,
        #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
        file_path: Option<PathBuf>,
        #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
        asset: Option<String>,
        kind: ExportErrorKind,
    },

    /// CLI and user interface errors
    #[error("CLI error: {message}")]
    Cli {
        message: String,
        #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
        command: Option<String>,
        kind: CliErrorKind,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
        option: Option<String>,
        kind: ConfigErrorKind,
    },
}

/// Specific kinds of scene errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SceneErrorKind {
    #[error("Malformed scene document")]
    InvalidDocument,
    #[error("Reference to a missing asset")]
    DanglingReference,
    #[error("Node not found")]
    NodeNotFound,
    #[error("Ambiguous node name")]
    AmbiguousNode,
}

/// Specific kinds of tracer errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TracerErrorKind {
    #[error("Invalid exclusion rule")]
    InvalidExclusionRule,
}

/// Specific kinds of export errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ExportErrorKind {
    #[error("Folder creation failed")]
    FolderCreationFailed,
    #[error("Asset copy failed")]
    CopyFailed,
    #[error("Asset has no file name")]
    MissingFileName,
    #[error("Manifest write failed")]
    ManifestFailed,
}

/// Specific kinds of CLI errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CliErrorKind {
    #[error("Missing required argument")]
    MissingArgument,
    #[error("Output formatting failed")]
    OutputFormatError,
}

/// Specific kinds of configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ConfigErrorKind {
    #[error("Invalid configuration value")]
    InvalidValue,
}

/// Convenient result type for cerberus operations
pub type Result<T> = std::result::Result<T, CerberusError>;

impl CerberusError {
    /// Create a new scene error
    pub fn scene<M: Into<String>>(message: M, kind: SceneErrorKind) -> Self {
        Self::Scene {
            message: message.into(),
            file_path: None,
            asset: None,
            kind,
        }
    }

    /// Create a new tracer error
    pub fn tracer<M: Into<String>>(message: M, kind: TracerErrorKind) -> Self {
        Self::Tracer {
            message: message.into(),
            asset: None,
            kind,
        }
    }

    /// Create a new export error
    pub fn export<M: Into<String>>(message: M, kind: ExportErrorKind) -> Self {
        Self::Export {
            message: message.into(),
            file_path: None,
            asset: None,
            kind,
        }
    }

    /// Create a new CLI error
    pub fn cli<M: Into<String>>(message: M, kind: CliErrorKind) -> Self {
        Self::Cli {
            message: message.into(),
            command: None,
            kind,
        }
    }

    /// Create a new configuration error
    pub fn config<M: Into<String>>(message: M, kind: ConfigErrorKind) -> Self {
        Self::Config {
            message: message.into(),
            option: None,
            kind,
        }
    }

    /// Add file path context to an existing error
    pub fn with_file_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        let path = path.into();
        match &mut self {
            Self::Io { file_path, .. } => *file_path = Some(path),
            Self::Scene { file_path, .. } => *file_path = Some(path),
            Self::Export { file_path, .. } => *file_path = Some(path),
            _ => {}
        }
        self
    }

    /// Add an asset reference (e.g. `material#3 "Body"`) to an existing error
    pub fn with_asset<A: Into<String>>(mut self, reference: A) -> Self {
        let reference = reference.into();
        match &mut self {
            Self::Scene { asset, .. } => *asset = Some(reference),
            Self::Tracer { asset, .. } => *asset = Some(reference),
            Self::Export { asset, .. } => *asset = Some(reference),
            _ => {}
        }
        self
    }

    /// Add the command name to CLI errors
    pub fn with_command<C: Into<String>>(mut self, name: C) -> Self {
        if let Self::Cli { command, .. } = &mut self {
            *command = Some(name.into());
        }
        self
    }

    /// Add the option name to configuration errors
    pub fn with_option<O: Into<String>>(mut self, name: O) -> Self {
        if let Self::Config { option, .. } = &mut self {
            *option = Some(name.into());
        }
        self
    }

    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    pub fn is_scene(&self) -> bool {
        matches!(self, Self::Scene { .. })
    }

    pub fn is_export(&self) -> bool {
        matches!(self, Self::Export { .. })
    }

    /// Get the file path associated with this error, if any
    pub fn file_path(&self) -> Option<&PathBuf> {
        match self {
            Self::Io { file_path, .. } => file_path.as_ref(),
            Self::Scene { file_path, .. } => file_path.as_ref(),
            Self::Export { file_path, .. } => file_path.as_ref(),
            _ => None,
        }
    }

    /// Get the asset reference associated with this error, if any
    pub fn asset(&self) -> Option<&str> {
        match self {
            Self::Scene { asset, .. } => asset.as_deref(),
            Self::Tracer { asset, .. } => asset.as_deref(),
            Self::Export { asset, .. } => asset.as_deref(),
            _ => None,
        }
    }

    /// Get a user-friendly error message suitable for CLI display
    pub fn user_message(&self) -> String {
        match self {
            Self::Io {
                message, file_path, ..
            } => {
                if let Some(path) = file_path {
                    format!("File error in '{}': {}", path.display(), message)
                } else {
                    message.clone()
                }
            }
            Self::Scene {
                message,
                file_path,
                asset,
                ..
            } => {
                let mut msg = format!("Scene error: {message}");
                if let Some(path) = file_path {
                    msg.push_str(&format!(" (file: {})", path.display()));
                }
                if let Some(asset) = asset {
                    msg.push_str(&format!(" (asset: {asset})"));
                }
                msg
            }
            Self::Tracer { message, asset, .. } => {
                let mut msg = format!("Collection failed: {message}");
                if let Some(asset) = asset {
                    msg.push_str(&format!(" (asset: {asset})"));
                }
                msg
            }
            Self::Export {
                message,
                file_path,
                asset,
                ..
            } => {
                let mut msg = format!("Export failed: {message}");
                if let Some(asset) = asset {
                    msg.push_str(&format!(" (asset: {asset})"));
                }
                if let Some(path) = file_path {
                    msg.push_str(&format!(" (path: {})", path.display()));
                }
                msg
            }
            Self::Cli {
                message, command, ..
            } => {
                if let Some(cmd) = command {
                    format!("Command '{cmd}' failed: {message}")
                } else {
                    format!("CLI error: {message}")
                }
            }
            Self::Config {
                message, option, ..
            } => {
                if let Some(option) = option {
                    format!("Configuration error in '{option}': {message}")
                } else {
                    format!("Configuration error: {message}")
                }
            }
        }
    }

    /// Get a detailed error message with full context for debugging
    pub fn debug_message(&self) -> String {
        let mut msg = self.user_message();
        match self {
            Self::Io {
                source_message: Some(source),
                ..
            } => msg.push_str(&format!(" [Source: {source}]")),
            Self::Scene { kind, .. } => msg.push_str(&format!(" [Kind: {kind}]")),
            Self::Tracer { kind, .. } => msg.push_str(&format!(" [Kind: {kind}]")),
            Self::Export { kind, .. } => msg.push_str(&format!(" [Kind: {kind}]")),
            Self::Cli { kind, .. } => msg.push_str(&format!(" [Kind: {kind}]")),
            Self::Config { kind, .. } => msg.push_str(&format!(" [Kind: {kind}]")),
            _ => {}
        }
        msg
    }
}

/// Domain helpers, so call sites read the same across crates.
impl CerberusError {
    // === Scene Domain Helpers ===

    pub fn scene_invalid_document<M: Into<String>>(message: M) -> Self {
        Self::scene(message, SceneErrorKind::InvalidDocument)
    }

    pub fn scene_dangling_reference<M: Into<String>>(message: M) -> Self {
        Self::scene(message, SceneErrorKind::DanglingReference)
    }

    pub fn scene_node_not_found<M: Into<String>>(message: M) -> Self {
        Self::scene(message, SceneErrorKind::NodeNotFound)
    }

    pub fn scene_ambiguous_node<M: Into<String>>(message: M) -> Self {
        Self::scene(message, SceneErrorKind::AmbiguousNode)
    }

    // === Tracer Domain Helpers ===

    pub fn tracer_invalid_exclusion<M: Into<String>>(message: M) -> Self {
        Self::tracer(message, TracerErrorKind::InvalidExclusionRule)
    }

    // === Export Domain Helpers ===

    pub fn export_folder_failed<M: Into<String>, P: Into<PathBuf>>(message: M, path: P) -> Self {
        Self::export(message, ExportErrorKind::FolderCreationFailed).with_file_path(path)
    }

    pub fn export_copy_failed<M: Into<String>, P: Into<PathBuf>>(message: M, path: P) -> Self {
        Self::export(message, ExportErrorKind::CopyFailed).with_file_path(path)
    }

    pub fn export_missing_file_name<P: Into<PathBuf>>(path: P) -> Self {
        let path = path.into();
        Self::export(
            format!("'{}' has no file name", path.display()),
            ExportErrorKind::MissingFileName,
        )
        .with_file_path(path)
    }

    pub fn export_manifest_failed<M: Into<String>, P: Into<PathBuf>>(message: M, path: P) -> Self {
        Self::export(message, ExportErrorKind::ManifestFailed).with_file_path(path)
    }

    // === CLI Domain Helpers ===

    pub fn cli_output_format<M: Into<String>>(message: M) -> Self {
        Self::cli(message, CliErrorKind::OutputFormatError)
    }

    // === Config Domain Helpers ===

    pub fn config_invalid_value<M: Into<String>>(message: M) -> Self {
        Self::config(message, ConfigErrorKind::InvalidValue)
    }
}

impl From<std::io::Error> for CerberusError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
            file_path: None,
            source_message: Some(format!("IO Error: {err}")),
        }
    }
}
