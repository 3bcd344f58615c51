//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! The surface is a flat flag set rather than subcommands, matching how the
//! tool has always been driven: mode flags (`--end`, `--terminate`) plus
//! service-selection and tagging flags for the default build-and-deploy
//! mode.
//!
//! Note that `--version` is the *image tag* flag here, which is why clap's
//! built-in version flag is not enabled.

use clap::Parser;
use std::path::PathBuf;

use crate::core::config::DeployFlags;

/// Stackup - build service images and bring up the compose stacks
#[derive(Parser, Debug)]
#[command(name = "stackup")]
#[command(author, about, long_about = None)]
#[command(after_help = "\
EXAMPLES:
    # Build and deploy everything with the default tag
    stackup

    # Build only the backend and email images, tagged v1.2
    stackup --backend --email --version v1.2

    # Build everything and push to the default registry
    stackup --all --push

    # Push to a specific registry
    stackup --all --push --repo registry.example.io

    # Preview what would run, without touching the engine
    stackup --all --dry-run

    # Stop both stacks
    stackup --end

    # Stop both stacks and prune unused engine resources
    stackup --terminate")]
pub struct Cli {
    /// Stop both compose stacks and exit
    #[arg(long)]
    pub end: bool,

    /// Stop both compose stacks, then prune all unused engine resources
    /// (destructive; prompts unless --force is given)
    #[arg(long)]
    pub terminate: bool,

    /// Build every service (also the default when no service flag is given)
    #[arg(long)]
    pub all: bool,

    /// Build the backend microservice
    #[arg(long)]
    pub backend: bool,

    /// Build the subscription microservice
    #[arg(long)]
    pub subscription: bool,

    /// Build the email microservice
    #[arg(long)]
    pub email: bool,

    /// Build the database image
    #[arg(long)]
    pub database: bool,

    /// Tag built images with VERSION [default: DEV]
    #[arg(long, value_name = "VERSION")]
    pub version: Option<Option<String>>,

    /// Registry to push images to, used with --push [default: moconinja]
    #[arg(long, value_name = "REGISTRY")]
    pub repo: Option<Option<String>>,

    /// Push built images to the registry
    #[arg(long)]
    pub push: bool,

    /// Print the commands that would run without invoking the engine
    #[arg(long)]
    pub dry_run: bool,

    /// Skip the confirmation prompt before the destructive prune
    #[arg(long, short)]
    pub force: bool,

    /// Run as if stackup was started in this directory
    #[arg(long, value_name = "PATH")]
    pub cwd: Option<PathBuf>,

    /// Minimal output
    #[arg(short, long)]
    pub quiet: bool,

    /// Log every spawned command and exit code
    #[arg(long)]
    pub debug: bool,

    /// Generate a shell completion script and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completion: Option<Shell>,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }

    /// Determine if interactive prompting is possible.
    ///
    /// True when stdin is a terminal and quiet mode is off.
    pub fn interactive(&self) -> bool {
        use std::io::IsTerminal;
        !self.quiet && std::io::stdin().is_terminal()
    }

    /// Map the build-mode flags into the core configuration input.
    pub fn deploy_flags(&self) -> DeployFlags {
        DeployFlags {
            all: self.all,
            backend: self.backend,
            subscription: self.subscription,
            email: self.email,
            database: self.database,
            version: self.version.clone(),
            repo: self.repo.clone(),
            push: self.push,
        }
    }
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
