mod cli_args;
mod commands;
mod util;

use cerberus_error::CerberusError;
use clap::{Parser, Subcommand, ValueEnum};
use log::{debug, error};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "cerberus",
    version,
    about = "Inspect and export the materials, textures and animation clips of an avatar prefab"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (can be used multiple times: -v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode: suppress explanatory output, show only raw results
    #[arg(short = 'q', long = "quiet", global = true)]
    quiet: bool,
}

#[derive(Clone, Copy, ValueEnum, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Indented listing
    Flat,
    /// Hierarchical tree structure
    Tree,
    /// JSON output
    Json,
}

#[derive(Clone, Copy, ValueEnum, Debug, PartialEq, Eq)]
enum Section {
    /// Materials and animations
    All,
    /// Materials and their textures only
    Materials,
    /// Controllers and their clips only
    Animations,
}

#[derive(Subcommand)]
enum Commands {
    /// List materials, textures, controllers and clips reachable from a root
    Check {
        #[command(flatten)]
        inspect: cli_args::InspectArgs,
        #[command(flatten)]
        format_args: cli_args::OutputFormatArgs,
        /// Which collections to show
        #[arg(short, long, value_enum, default_value_t = Section::All)]
        section: Section,
    },
    /// Copy the collected materials and textures into a save folder
    Export {
        #[command(flatten)]
        inspect: cli_args::InspectArgs,
        /// Save folder; files land in <dest>/<name>/{material,texture}
        #[arg(short, long)]
        dest: PathBuf,
        /// Folder name under the save folder (defaults to the root node's name)
        #[arg(short, long)]
        name: Option<String>,
        #[arg(long, help = "Preview the export without touching the file system")]
        dry_run: bool,
        #[arg(long, help = "Output the export report as JSON")]
        json: bool,
    },
    /// Show scene document statistics
    Info {
        #[arg(index = 1)]
        file: PathBuf,
    },
}

fn main() {
    if let Err(e) = run_main() {
        match e.downcast_ref::<CerberusError>() {
            Some(err) => {
                error!("{}", err.user_message());
                debug!("{}", err.debug_message());
            }
            None => error!("{e:#}"),
        }
        std::process::exit(1);
    }
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8) {
    let log_level = match verbose {
        0 => log::LevelFilter::Warn,  // Default: only warnings and errors
        1 => log::LevelFilter::Info,  // -v: info level
        2 => log::LevelFilter::Debug, // -vv: debug level
        _ => log::LevelFilter::Trace, // -vvv+: trace level (everything)
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .format(|buf, record| {
            use std::io::Write;
            let level_style = match record.level() {
                log::Level::Error => "\x1b[31mERROR\x1b[0m", // Red
                log::Level::Warn => "\x1b[33mWARN\x1b[0m",   // Yellow
                log::Level::Info => "\x1b[32mINFO\x1b[0m",   // Green
                log::Level::Debug => "\x1b[36mDEBUG\x1b[0m", // Cyan
                log::Level::Trace => "\x1b[35mTRACE\x1b[0m", // Magenta
            };

            writeln!(buf, "[{}] {}", level_style, record.args())
        })
        .init();
}

fn run_main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    debug!("cerberus starting with verbosity level: {}", cli.verbose);

    let output = util::OutputHandler::new(cli.quiet);
    let ctx = util::CommandContext::new(&output);

    match cli.command {
        Commands::Check {
            inspect,
            format_args,
            section,
        } => commands::cmd_check(&inspect, format_args.format, format_args.ascii, section, &ctx),
        Commands::Export {
            inspect,
            dest,
            name,
            dry_run,
            json,
        } => commands::cmd_export(&inspect, dest, name, dry_run, json, &ctx),
        Commands::Info { file } => commands::cmd_info(file, &ctx),
    }?;
    Ok(())
}
