//! CLI command definitions.
//!
//! This module defines all CLI commands and their arguments using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Rackforge - dedicated hosting from the command line.
#[derive(Parser, Debug)]
#[command(name = "rackforge")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the settings file.
    #[arg(short, long, global = true, env = "RACKFORGE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Connection profile to use.
    #[arg(short, long, global = true, env = "RACKFORGE_PROFILE")]
    pub profile: Option<String>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    /// Comma-separated list of columns to show in table output.
    #[arg(long, global = true)]
    pub fields: Option<String>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage dedicated servers.
    Host {
        /// Host subcommand.
        #[command(subcommand)]
        command: HostCommands,
    },

    /// Manage account SSH keys.
    SshKey {
        /// SSH key subcommand.
        #[command(subcommand)]
        command: SshKeyCommands,
    },

    /// Manage custom SSL certificates.
    Ssl {
        /// SSL subcommand.
        #[command(subcommand)]
        command: SslCommands,
    },

    /// Manage load balancers.
    LoadBalancer {
        /// Load balancer subcommand.
        #[command(subcommand)]
        command: LoadBalancerCommands,
    },

    /// Browse the provisioning catalog.
    Location {
        /// Catalog subcommand.
        #[command(subcommand)]
        command: LocationCommands,
    },

    /// Manage local settings.
    Config {
        /// Settings subcommand.
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Dedicated server subcommands.
#[derive(Subcommand, Debug)]
pub enum HostCommands {
    /// List hosts.
    List {
        /// Pagination options.
        #[command(flatten)]
        page: PageArgs,
    },

    /// Show a dedicated server.
    Get {
        /// Host identifier.
        id: String,
    },

    /// Order dedicated servers.
    Add(Box<HostAddArgs>),

    /// Power a dedicated server on.
    PowerOn {
        /// Host identifier.
        id: String,
    },

    /// Power a dedicated server off.
    PowerOff {
        /// Host identifier.
        id: String,
    },

    /// Power-cycle a dedicated server.
    Reboot {
        /// Host identifier.
        id: String,
    },
}

/// Arguments for ordering dedicated servers.
///
/// Every value can also come from a JSON file via `--input`; flags win
/// over the file on conflict. The repeatable `--drive-slot`, `--layout`
/// and `--partition` flags feed the storage configuration builder.
#[derive(Args, Debug)]
pub struct HostAddArgs {
    /// Server model identifier (see 'location server-models').
    #[arg(long)]
    pub server_model: Option<i64>,

    /// Location identifier (see 'location list').
    #[arg(long)]
    pub location: Option<i64>,

    /// Hostname for a new server (repeat to order several).
    #[arg(long = "hostname")]
    pub hostnames: Vec<String>,

    /// Operating system identifier to install.
    #[arg(long)]
    pub operating_system: Option<i64>,

    /// Fingerprint of an account SSH key to authorize (repeatable).
    #[arg(long = "ssh-key-fingerprint")]
    pub ssh_key_fingerprints: Vec<String>,

    /// Drive bay assignment; empty model id clears the bay (repeatable).
    #[arg(long = "drive-slot", value_name = "POSITION=MODEL_ID", value_parser = parse_drive_slot)]
    pub drive_slots: Vec<(String, Option<i64>)>,

    /// RAID layout descriptor (repeatable).
    #[arg(long = "layout", value_name = "slot=N,...,raid=N")]
    pub layouts: Vec<String>,

    /// Partition descriptor (repeatable).
    #[arg(
        long = "partition",
        value_name = "slot=N,...,target=PATH,size=MB[,fs=TYPE][,fill=BOOL]"
    )]
    pub partitions: Vec<String>,

    /// JSON file pre-seeding the create request.
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Reject unknown keys in --layout/--partition instead of skipping them.
    #[arg(long)]
    pub strict_flags: bool,
}

/// SSH key subcommands.
#[derive(Subcommand, Debug)]
pub enum SshKeyCommands {
    /// List account SSH keys.
    List {
        /// Pagination options.
        #[command(flatten)]
        page: PageArgs,
    },

    /// Show an SSH key.
    Get {
        /// Key fingerprint.
        fingerprint: String,
    },

    /// Register a new SSH key.
    Add {
        /// Display name of the key.
        #[arg(long)]
        name: String,

        /// Path to the OpenSSH public key file.
        #[arg(long)]
        public_key_file: PathBuf,
    },

    /// Rename an SSH key.
    Update {
        /// Key fingerprint.
        fingerprint: String,

        /// New display name.
        #[arg(long)]
        name: String,
    },

    /// Remove an SSH key from the account.
    Delete {
        /// Key fingerprint.
        fingerprint: String,

        /// Skip confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
}

/// SSL certificate subcommands.
#[derive(Subcommand, Debug)]
pub enum SslCommands {
    /// List custom SSL certificates.
    List {
        /// Pagination options.
        #[command(flatten)]
        page: PageArgs,
    },

    /// Show a custom SSL certificate.
    Get {
        /// Certificate identifier.
        id: String,
    },

    /// Upload a custom SSL certificate.
    Add {
        /// Display name of the certificate.
        #[arg(long)]
        name: String,

        /// Path to the PEM-encoded public certificate.
        #[arg(long)]
        public_key_file: PathBuf,

        /// Path to the PEM-encoded private key.
        #[arg(long)]
        private_key_file: PathBuf,

        /// Path to the PEM-encoded intermediate chain.
        #[arg(long)]
        chain_file: Option<PathBuf>,
    },
}

/// Load balancer subcommands.
#[derive(Subcommand, Debug)]
pub enum LoadBalancerCommands {
    /// List load balancers.
    List {
        /// Pagination options.
        #[command(flatten)]
        page: PageArgs,
    },

    /// Show a load balancer.
    Get {
        /// Load balancer identifier.
        id: String,
    },

    /// Delete a load balancer.
    Delete {
        /// Load balancer identifier.
        id: String,

        /// Skip confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Provisioning catalog subcommands.
#[derive(Subcommand, Debug)]
pub enum LocationCommands {
    /// List datacenter locations.
    List,

    /// List server models orderable at a location.
    ServerModels {
        /// Location identifier.
        location_id: i64,
    },

    /// List drive models compatible with a server model.
    DriveModels {
        /// Location identifier.
        location_id: i64,

        /// Server model identifier.
        server_model_id: i64,
    },
}

/// Local settings subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the settings file with tokens masked.
    Show,

    /// Store an API token on a profile.
    SetToken {
        /// The API token.
        token: String,
    },

    /// Store an endpoint override on a profile.
    SetEndpoint {
        /// The API endpoint URL.
        endpoint: String,
    },

    /// Select the profile used when --profile is not given.
    UseProfile {
        /// Profile name.
        name: String,
    },
}

/// Pagination options shared by list commands.
#[derive(Args, Debug)]
pub struct PageArgs {
    /// Page number to fetch.
    #[arg(long, default_value = "1")]
    pub page: u32,

    /// Items per page.
    #[arg(long, default_value = "50")]
    pub per_page: u32,

    /// Fetch every page.
    #[arg(long)]
    pub all: bool,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// Parses a `POSITION=MODEL_ID` drive slot flag value.
///
/// The position stays a string; the storage builder parses and validates
/// it together with the rest of the drive configuration. An empty model
/// id means the bay is explicitly cleared.
fn parse_drive_slot(value: &str) -> Result<(String, Option<i64>), String> {
    let (position, model) = value
        .split_once('=')
        .ok_or_else(|| format!("expected POSITION=MODEL_ID, got '{value}'"))?;

    if model.is_empty() {
        return Ok((position.to_string(), None));
    }

    let model_id: i64 = model
        .parse()
        .map_err(|_| format!("invalid drive model id '{model}'"))?;
    Ok((position.to_string(), Some(model_id)))
}
