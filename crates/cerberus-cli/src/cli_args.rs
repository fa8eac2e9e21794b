use cerberus_error::{CerberusError, Result};
use cerberus_tracer::{CollectOptions, ExclusionRule, ExclusionSet, InspectorConfig};
use clap::Args;
use std::path::PathBuf;

/// Scene selection and collection settings shared by `check` and `export`
#[derive(Debug, Clone, Args)]
pub struct InspectArgs {
    /// Input scene document (JSON)
    #[arg(index = 1)]
    pub file: PathBuf,

    /// Root node index or name (e.g. '0' or 'Avatar'); defaults to the scene root
    #[arg(short, long)]
    pub root: Option<String>,

    /// Extra clip exclusion rule: contains:<s>, icontains:<s>, regex:<expr> or a bare token
    #[arg(short = 'x', long = "exclude", action = clap::ArgAction::Append)]
    pub exclude: Vec<String>,

    /// Drop the built-in `contains:proxy` rule
    #[arg(long)]
    pub no_default_exclusions: bool,

    /// Ignore renderers under inactive nodes, like the editor's default lookup
    #[arg(long)]
    pub skip_inactive: bool,

    /// Deepest state machine / blend tree nesting to follow
    #[arg(long, default_value_t = CollectOptions::default().max_depth)]
    pub max_depth: usize,
}

impl InspectArgs {
    pub fn inspector_config(&self) -> Result<InspectorConfig> {
        let mut exclusion = if self.no_default_exclusions {
            ExclusionSet::none()
        } else {
            ExclusionSet::default()
        };
        for expr in &self.exclude {
            let rule = ExclusionRule::parse(expr).map_err(|e| {
                CerberusError::config_invalid_value(e.user_message()).with_option("--exclude")
            })?;
            exclusion.push(rule);
        }

        let config = InspectorConfig {
            exclusion,
            options: CollectOptions {
                max_depth: self.max_depth,
                include_inactive: !self.skip_inactive,
            },
        };
        Ok(config.validate())
    }
}

/// Output formatting arguments
#[derive(Debug, Clone, Args)]
pub struct OutputFormatArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = crate::OutputFormat::Flat)]
    pub format: crate::OutputFormat,

    /// Use ASCII characters instead of Unicode box characters for tree output
    #[arg(long)]
    pub ascii: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use cerberus_tracer::ClipFilter;

    fn args(exclude: &[&str], no_default: bool) -> InspectArgs {
        InspectArgs {
            file: PathBuf::from("scene.json"),
            root: None,
            exclude: exclude.iter().map(|s| s.to_string()).collect(),
            no_default_exclusions: no_default,
            skip_inactive: true,
            max_depth: 0,
        }
    }

    #[test]
    fn test_config_combines_rules() {
        let config = args(&["regex:^WIP_"], false).inspector_config().unwrap();
        assert_eq!(config.exclusion.rules().len(), 2);
        assert!(config.exclusion.excludes("proxy_idle"));
        assert!(config.exclusion.excludes("WIP_Dance"));
        assert!(!config.options.include_inactive);
        assert_eq!(config.options.max_depth, 1);
    }

    #[test]
    fn test_config_without_defaults() {
        let config = args(&[], true).inspector_config().unwrap();
        assert!(config.exclusion.is_empty());
    }

    #[test]
    fn test_bad_rule_names_option() {
        let err = args(&["regex:("], false).inspector_config().unwrap_err();
        assert!(matches!(
            err,
            CerberusError::Config { ref option, .. } if option.as_deref() == Some("--exclude")
        ));
    }
}
