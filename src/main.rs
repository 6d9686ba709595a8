use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Args as ClapArgs, Parser, Subcommand};
use log::LevelFilter;

use git_timestamp::cli::orchestration;
use git_timestamp::config::{self, Config};
use git_timestamp::ui;

#[derive(Parser)]
#[command(
    name = "git-timestamp",
    version,
    about = "Derive timestamped build versions and release versions from git history"
)]
struct Args {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(
        short = 'C',
        long,
        global = true,
        default_value = ".",
        help = "Run as if started in this directory"
    )]
    directory: PathBuf,

    #[arg(short, long, global = true, action = clap::ArgAction::Count, help = "More logging (-v info, -vv debug)")]
    verbose: u8,

    #[arg(short, long, global = true, help = "Only print errors")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compose a timestamp version from the working copy
    Timestamp(TimestampArgs),
    /// Determine the next release version and a free tag name
    SetupRelease(ReleaseArgs),
}

#[derive(ClapArgs)]
struct ProjectArgs {
    #[arg(long, help = "Override the project group id")]
    group_id: Option<String>,

    #[arg(long, help = "Override the project artifact id")]
    artifact_id: Option<String>,

    #[arg(long, help = "Override the declared project version")]
    project_version: Option<String>,

    #[arg(long, help = "Write the emitted properties to this file")]
    properties_file: Option<PathBuf>,
}

#[derive(ClapArgs)]
struct TimestampArgs {
    #[command(flatten)]
    project: ProjectArgs,

    #[arg(long, help = "File whose modification time counts towards the timestamp")]
    descriptor: Option<PathBuf>,

    #[arg(long, help = "Append the timestamp to release versions")]
    version_timestamp_releases: bool,

    #[arg(long, help = "Leave snapshot versions unchanged")]
    no_version_timestamp_snapshots: bool,

    #[arg(long, help = "Include the commit count in snapshot versions")]
    include_commit_count: bool,

    #[arg(long, help = "Snapshot suffix replaced by the commit count")]
    snapshot_suffix: Option<String>,

    #[arg(long, help = "Property name to emit the timestamp under")]
    timestamp_property: Option<String>,

    #[arg(long, help = "Property name to emit the composed version under")]
    version_property: Option<String>,

    #[arg(long, help = "Write the timestamp to this file")]
    timestamp_file: Option<PathBuf>,

    #[arg(long, help = "Write the composed version to this file")]
    version_file: Option<PathBuf>,
}

#[derive(ClapArgs)]
struct ReleaseArgs {
    #[command(flatten)]
    project: ProjectArgs,

    #[arg(long, help = "Read tags from the local repository instead of the remote")]
    local_tags: bool,

    #[arg(long, help = "Always append the repeat index to the release version")]
    always_include_repeat_count: bool,

    #[arg(long, help = "Text at the end of the version replaced by the commit count")]
    snapshot_text: Option<String>,

    #[arg(long, help = "Tag name template, e.g. @{project.artifactId}-@{project.version}")]
    tag_name_format: Option<String>,

    #[arg(long, help = "Do not detect whether all modules share the project version")]
    skip_auto_version_submodules_detection: bool,

    #[arg(long, help = "Property name for the release version (empty to skip)")]
    release_property: Option<String>,

    #[arg(long, help = "Property name for the development version (empty to skip)")]
    development_property: Option<String>,

    #[arg(long, help = "Property name for the tag name (empty to skip)")]
    tag_name_property: Option<String>,

    #[arg(long, help = "Write the release version to this file")]
    release_version_file: Option<PathBuf>,

    #[arg(long, help = "Write the tag name to this file")]
    tag_name_file: Option<PathBuf>,
}

impl ProjectArgs {
    fn apply(&self, config: &mut Config) {
        if let Some(group_id) = &self.group_id {
            config.project.group_id = group_id.clone();
        }
        if let Some(artifact_id) = &self.artifact_id {
            config.project.artifact_id = artifact_id.clone();
        }
        if let Some(version) = &self.project_version {
            config.project.version = Some(version.clone());
        }
    }

    fn properties_file(&self, directory: &Path) -> Option<PathBuf> {
        self.properties_file.as_ref().map(|path| directory.join(path))
    }
}

impl TimestampArgs {
    fn apply(&self, config: &mut Config) {
        self.project.apply(config);
        if let Some(descriptor) = &self.descriptor {
            config.project.descriptor = Some(descriptor.clone());
        }
        let settings = &mut config.timestamp;
        if self.version_timestamp_releases {
            settings.version_timestamp_releases = true;
        }
        if self.no_version_timestamp_snapshots {
            settings.version_timestamp_snapshots = false;
        }
        if self.include_commit_count {
            settings.version_includes_commit_count = true;
        }
        if let Some(suffix) = &self.snapshot_suffix {
            settings.snapshot_suffix = suffix.clone();
        }
        if let Some(name) = &self.timestamp_property {
            settings.timestamp_property = Some(name.clone());
        }
        if let Some(name) = &self.version_property {
            settings.version_property = Some(name.clone());
        }
        if let Some(path) = &self.timestamp_file {
            settings.timestamp_file = Some(path.clone());
        }
        if let Some(path) = &self.version_file {
            settings.version_file = Some(path.clone());
        }
    }
}

impl ReleaseArgs {
    fn apply(&self, config: &mut Config) {
        self.project.apply(config);
        let settings = &mut config.release;
        if self.local_tags {
            settings.local_tags = true;
        }
        if self.always_include_repeat_count {
            settings.always_include_repeat_count = true;
        }
        if let Some(text) = &self.snapshot_text {
            settings.snapshot_text = text.clone();
        }
        if let Some(format) = &self.tag_name_format {
            settings.tag_name_format = format.clone();
        }
        if self.skip_auto_version_submodules_detection {
            settings.skip_auto_version_submodules_detection = true;
        }
        if let Some(name) = &self.release_property {
            settings.release_property = Some(name.clone());
        }
        if let Some(name) = &self.development_property {
            settings.development_property = Some(name.clone());
        }
        if let Some(name) = &self.tag_name_property {
            settings.tag_name_property = Some(name.clone());
        }
        if let Some(path) = &self.release_version_file {
            settings.release_version_file = Some(path.clone());
        }
        if let Some(path) = &self.tag_name_file {
            settings.tag_name_file = Some(path.clone());
        }
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    };

    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .parse_default_env()
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet);

    if let Err(e) = run(&args) {
        ui::display_error(&e.to_string());
        std::process::exit(1);
    }
    Ok(())
}

fn run(args: &Args) -> Result<()> {
    let mut config = config::load_config(args.config.as_deref(), &args.directory)?;
    if let Some(source) = &config.source {
        log::debug!("Loaded configuration from {}", source.display());
    }

    match &args.command {
        Command::Timestamp(timestamp_args) => {
            timestamp_args.apply(&mut config);
            config.anchor_paths(&args.directory);
            let result = orchestration::run_timestamp_workflow(&config, &args.directory)?;
            if !args.quiet {
                for warning in &result.resolution.warnings {
                    ui::display_warning(warning);
                }
                ui::display_timestamp(&result.resolution);
            }
            let properties_file = timestamp_args.project.properties_file(&args.directory);
            orchestration::publish_outputs(&result.outputs, properties_file.as_deref())?;
        }
        Command::SetupRelease(release_args) => {
            release_args.apply(&mut config);
            config.anchor_paths(&args.directory);
            if !args.quiet {
                ui::display_status("Resolving next release version...");
            }
            let result = orchestration::run_release_workflow(&config, &args.directory)?;
            if !args.quiet {
                for warning in &result.warnings {
                    ui::display_warning(warning);
                }
                ui::display_release(&result.resolution);
            }
            let properties_file = release_args.project.properties_file(&args.directory);
            orchestration::publish_outputs(&result.outputs, properties_file.as_deref())?;
            if !args.quiet {
                ui::display_success(&format!("Next release: {}", result.resolution.tag_name));
            }
        }
    }

    Ok(())
}
