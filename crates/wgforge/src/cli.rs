//! Clap derive structures for the `wgforge` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// wgforge -- build WireGuard tunnel configuration files
#[derive(Debug, Parser)]
#[command(
    name = "wgforge",
    version,
    about = "Assemble WireGuard tunnel configurations from a location catalog",
    long_about = "Assemble WireGuard tunnel configuration files.\n\n\
        Pick a server location, let wgforge generate your keys and derive the\n\
        endpoint, optionally override any field, and export a .conf file.\n\
        The location catalog is kept on this device and can be backed up as JSON.",
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
    /// Output format (defaults to the configured one)
    #[arg(long, short = 'o', env = "WGFORGE_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Config file to read instead of the platform default
    #[arg(long, env = "WGFORGE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Location store file (overrides the config file)
    #[arg(long, env = "WGFORGE_STORE", global = true)]
    pub store: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage server locations and their endpoint IP pools
    #[command(alias = "loc", alias = "l")]
    Locations(LocationsArgs),

    /// Generate a tunnel configuration file
    #[command(alias = "gen", alias = "g")]
    Generate(Box<GenerateArgs>),

    /// Generate and inspect key material
    Keys(KeysArgs),

    /// Back up or restore the location catalog
    Backup(BackupArgs),

    /// List DNS presets
    Dns(DnsArgs),

    /// List suggested interface addresses
    Addresses(AddressesArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),

    /// Render man pages
    Man(ManArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  LOCATIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct LocationsArgs {
    #[command(subcommand)]
    pub command: LocationsCommand,
}

#[derive(Debug, Subcommand)]
pub enum LocationsCommand {
    /// List all locations
    #[command(alias = "ls")]
    List,

    /// Show one location
    Show {
        /// Location name
        name: String,
    },

    /// Replace a location's IP pool
    SetIps {
        /// Location name
        name: String,

        /// Endpoint IPs, in order (blank entries are dropped)
        ips: Vec<String>,
    },

    /// Edit a location's IP pool in $EDITOR, one IP per line
    Edit {
        /// Location name
        name: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  GENERATE
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
#[allow(clippy::struct_excessive_bools)]
pub struct GenerateArgs {
    /// Location to connect to (defaults to the configured one, then the first)
    #[arg(long, short = 'l')]
    pub location: Option<String>,

    /// Configuration name; the file is named after it
    #[arg(long, short = 'n', conflicts_with = "random_name")]
    pub name: Option<String>,

    /// Use a random configuration name
    #[arg(long)]
    pub random_name: bool,

    /// Enable advanced mode (implied by any field override)
    #[arg(long, alias = "god-mode")]
    pub advanced: bool,

    /// Interface private key (Base64) instead of a generated one
    #[arg(long, help_heading = "Interface")]
    pub private_key: Option<String>,

    /// Interface IPv4 address/prefix ("" to omit)
    #[arg(long, help_heading = "Interface")]
    pub ipv4: Option<String>,

    /// Interface IPv6 address/prefix ("" to omit)
    #[arg(long, help_heading = "Interface")]
    pub ipv6: Option<String>,

    /// Comma-separated DNS servers ("" to omit)
    #[arg(long, help_heading = "Interface", conflicts_with = "dns_preset")]
    pub dns: Option<String>,

    /// Named DNS preset (see `wgforge dns presets`)
    #[arg(long, help_heading = "Interface")]
    pub dns_preset: Option<String>,

    /// Interface MTU ("" to omit)
    #[arg(long, help_heading = "Interface")]
    pub mtu: Option<String>,

    /// Peer public key (Base64) instead of the location's
    #[arg(long, help_heading = "Peer", conflicts_with = "self_server")]
    pub peer_public_key: Option<String>,

    /// Generate a peer key pair to run your own server; the private key goes to stderr
    #[arg(long, help_heading = "Peer")]
    pub self_server: bool,

    /// Preshared key (Base64) instead of a generated one
    #[arg(long, help_heading = "Peer", conflicts_with = "no_preshared_key")]
    pub preshared_key: Option<String>,

    /// Omit the preshared key
    #[arg(long, help_heading = "Peer")]
    pub no_preshared_key: bool,

    /// Endpoint IP instead of one drawn from the location's pool
    #[arg(long, help_heading = "Peer")]
    pub endpoint_ip: Option<String>,

    /// Endpoint port instead of the location's
    #[arg(long, help_heading = "Peer")]
    pub endpoint_port: Option<String>,

    /// Comma-separated allowed IP ranges ("" to omit)
    #[arg(long, help_heading = "Peer")]
    pub allowed_ips: Option<String>,

    /// Persistent keepalive interval in seconds
    #[arg(long, help_heading = "Peer", conflicts_with = "no_keepalive")]
    pub keepalive: Option<String>,

    /// Disable persistent keepalive
    #[arg(long, help_heading = "Peer")]
    pub no_keepalive: bool,

    /// Directory to write the .conf file into
    #[arg(long, short = 'd', default_value = ".")]
    pub out_dir: PathBuf,

    /// Print the configuration to stdout instead of writing a file
    #[arg(long, conflicts_with = "out_dir")]
    pub stdout: bool,

    /// Overwrite an existing file
    #[arg(long, short = 'f')]
    pub force: bool,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  KEYS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct KeysArgs {
    #[command(subcommand)]
    pub command: KeysCommand,
}

#[derive(Debug, Subcommand)]
pub enum KeysCommand {
    /// Generate a key pair and a preshared key
    Generate,

    /// Derive a public key from a Base64 private key read on stdin
    Pubkey,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  BACKUP
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct BackupArgs {
    #[command(subcommand)]
    pub command: BackupCommand,
}

#[derive(Debug, Subcommand)]
pub enum BackupCommand {
    /// Write the location catalog to a JSON file
    Export {
        /// Destination file
        #[arg(long, short = 'f', default_value = "wireguard-ips-backup.json")]
        file: PathBuf,

        /// Print the JSON to stdout instead of writing a file
        #[arg(long, conflicts_with = "file")]
        stdout: bool,
    },

    /// Replace the location catalog from a JSON backup
    Restore {
        /// Backup file to read
        file: PathBuf,

        /// Only validate the file; change nothing
        #[arg(long)]
        check: bool,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  PRESETS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct DnsArgs {
    #[command(subcommand)]
    pub command: DnsCommand,
}

#[derive(Debug, Subcommand)]
pub enum DnsCommand {
    /// List named DNS server presets
    Presets,
}

#[derive(Debug, Args)]
pub struct AddressesArgs {
    #[command(subcommand)]
    pub command: AddressesCommand,
}

#[derive(Debug, Subcommand)]
pub enum AddressesCommand {
    /// List suggested IPv4 and IPv6 interface addresses
    Presets,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Write a config file populated with the defaults
    Init {
        /// Overwrite an existing config file
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Display current resolved configuration
    Show,

    /// Print the config and store file locations
    Path,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  MAN
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ManArgs {
    /// Write one page per command into this directory instead of printing
    /// the top-level page
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,
}
