use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::config::Overrides;

#[derive(Parser)]
#[command(name = "tamer")]
#[command(author = "Tamer Contributors")]
#[command(version)]
#[command(about = "Declarative resource provider for the cloudtamer.io API", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file (default: ~/.config/tamer/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Command,
}

// ============================================================================
// Connection
// ============================================================================

#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    /// Server URL
    #[arg(long, global = true, env = "CLOUDTAMERIO_URL")]
    pub url: Option<String>,

    /// API key
    #[arg(long, global = true, env = "CLOUDTAMERIO_APIKEY", hide_env_values = true)]
    pub apikey: Option<String>,

    /// Skip TLS certificate validation
    #[arg(long, global = true, env = "CLOUDTAMERIO_SKIPSSLVALIDATION")]
    pub skip_ssl_validation: bool,
}

impl ConnectionArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            url: self.url.clone(),
            apikey: self.apikey.clone(),
            skip_ssl_validation: self.skip_ssl_validation.then_some(true),
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the schema of a type, or of every type
    Schema {
        /// Resource or data source type (with or without the cloudtamerio_ prefix)
        name: Option<String>,

        /// Look the name up among data sources
        #[arg(short, long)]
        data_source: bool,
    },

    /// Verify the configured credentials
    Check,

    /// Create a resource from a desired state document
    Create(StateArgs),

    /// Refresh a resource's state
    Read(StateArgs),

    /// Converge a resource from its prior state to a desired one
    Update(UpdateArgs),

    /// Delete a resource
    Delete(StateArgs),

    /// Read a data source
    Data(DataArgs),

    /// Show the API calls an update would make, without sending them
    Plan(UpdateArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

// ============================================================================
// Resource Commands
// ============================================================================

#[derive(Args)]
pub struct StateArgs {
    /// Resource type
    pub resource: String,

    /// State document (JSON); `-` reads stdin
    #[arg(default_value = "-")]
    pub state: PathBuf,
}

#[derive(Args)]
pub struct UpdateArgs {
    /// Resource type
    pub resource: String,

    /// Prior state document (JSON), as last read
    #[arg(long, value_name = "FILE")]
    pub prior: PathBuf,

    /// Desired state document (JSON); `-` reads stdin
    #[arg(long, value_name = "FILE", default_value = "-")]
    pub desired: PathBuf,
}

// ============================================================================
// Data Sources
// ============================================================================

#[derive(Args)]
pub struct DataArgs {
    /// Data source type
    pub data_source: String,

    /// Filter clauses as a JSON array of { name, values, regex }
    #[arg(long, value_name = "FILE")]
    pub filters: Option<PathBuf>,

    /// Exact-match clause, e.g. `owner_users.id=1,2`
    #[arg(short = 'm', long = "match", value_name = "FIELD=VALUES")]
    pub exact: Vec<String>,

    /// Regex clause, e.g. `name=^System`
    #[arg(short, long, value_name = "FIELD=PATTERN")]
    pub regex: Vec<String>,
}
