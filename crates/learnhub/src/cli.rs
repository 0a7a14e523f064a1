//! Clap derive structures for the `learnhub` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// learnhub -- course platform client for the command line
#[derive(Debug, Parser)]
#[command(
    name = "learnhub",
    version,
    about = "Browse the LearnHub catalog, check course access, and watch live-class countdowns",
    long_about = "A client for the LearnHub course platform.\n\n\
        Reads the same REST API as the web app: order history, course\n\
        catalog, combo bundles, and the live-class schedule. Access\n\
        decisions are computed locally from your orders, fail-closed.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Connection profile to use
    #[arg(long, short = 'p', env = "LEARNHUB_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Backend URL (overrides profile)
    #[arg(long, short = 's', env = "LEARNHUB_SERVER", global = true)]
    pub server: Option<String>,

    /// Session token (overrides keyring)
    #[arg(long, env = "LEARNHUB_TOKEN", global = true, hide_env = true)]
    pub token: Option<String>,

    /// Browse without a session (catalog only, no order data)
    #[arg(long, global = true)]
    pub anonymous: bool,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "LEARNHUB_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Evaluate time-dependent commands at this RFC 3339 instant
    /// instead of the wall clock
    #[arg(long, value_name = "INSTANT", global = true)]
    pub at: Option<String>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "LEARNHUB_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "LEARNHUB_TIMEOUT", default_value = "30", global = true)]
    pub timeout: u64,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// Pretty-printed JSON
    Json,
    /// Single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// One identifier per line
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Browse the course catalog
    Courses(CoursesArgs),
    /// Inspect your order history
    Orders(OrdersArgs),
    /// Check course access
    Access(AccessArgs),
    /// Subscription renewal math
    Renewal(RenewalArgs),
    /// Live-class schedule and countdowns
    Live(LiveArgs),
    /// Manage connection profiles and tokens
    Config(ConfigArgs),
    /// Generate shell completions
    Completions {
        /// Shell to generate for
        shell: clap_complete::Shell,
    },
}

// ── courses ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CoursesArgs {
    #[command(subcommand)]
    pub command: CoursesCommand,
}

#[derive(Debug, Subcommand)]
pub enum CoursesCommand {
    /// List courses (visible ones by default)
    List {
        /// Include unpublished and unapproved courses
        #[arg(long)]
        all: bool,
    },
    /// Show one course
    Show {
        /// Course id
        id: String,
    },
}

// ── orders ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct OrdersArgs {
    #[command(subcommand)]
    pub command: OrdersCommand,
}

#[derive(Debug, Subcommand)]
pub enum OrdersCommand {
    /// List your orders
    List,
}

// ── access ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AccessArgs {
    #[command(subcommand)]
    pub command: AccessCommand,
}

#[derive(Debug, Subcommand)]
pub enum AccessCommand {
    /// Resolve your access to a course
    Check {
        /// Course id
        course_id: String,
    },
}

// ── renewal ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct RenewalArgs {
    #[command(subcommand)]
    pub command: RenewalCommand,
}

#[derive(Debug, Subcommand)]
pub enum RenewalCommand {
    /// Preview extending your all-access subscription
    Preview {
        /// Months to extend by
        #[arg(long, default_value_t = learnhub_core::EXTENSION_MONTHS)]
        months: u32,
    },
}

// ── live ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct LiveArgs {
    #[command(subcommand)]
    pub command: LiveCommand,
}

#[derive(Debug, Subcommand)]
pub enum LiveCommand {
    /// List scheduled live classes with countdown status
    List,
    /// Stream countdown status changes until interrupted
    Watch,
}

// ── config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file path
    Path,
    /// Show the effective configuration
    Show,
    /// Create or update a profile
    Init {
        /// Backend URL for the profile
        #[arg(long)]
        server: String,
        /// Profile name
        #[arg(long, default_value = "default")]
        name: String,
    },
    /// Store a session token in the OS keyring
    SetToken {
        /// Token value; prompted for when omitted
        #[arg(long)]
        token: Option<String>,
    },
    /// Remove the stored session token
    ForgetToken,
}
