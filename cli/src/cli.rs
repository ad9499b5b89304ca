use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "safe-dao")]
#[command(about = "Plan a Safe-based DAO deployment as a single transaction", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Assemble the full deployment plan for an organization
    Plan(PlanArgs),

    /// Predict the address of a module clone (offline)
    Predict(PredictArgs),
}

#[derive(Parser, Clone)]
pub struct PlanArgs {
    /// Organization descriptor (JSON)
    #[arg(long, value_name = "FILE")]
    pub descriptor: PathBuf,

    /// Chain configuration with module templates (JSON)
    #[arg(long, env = "SAFE_DAO_TEMPLATES", value_name = "FILE")]
    pub templates: PathBuf,

    /// RPC endpoint URL
    #[arg(long, env = "ETH_RPC_URL")]
    pub rpc_url: String,

    /// Attach governance to this deployed Safe instead of creating one
    #[arg(long, value_name = "ADDR")]
    pub existing_safe: Option<String>,

    /// Salt nonce for the new Safe's CREATE2 address
    #[arg(long, default_value = "0")]
    pub safe_salt_nonce: String,

    /// Write the organization name to the metadata registry
    #[arg(long)]
    pub set_name: bool,

    /// Write the snapshot ENS name to the metadata registry
    #[arg(long)]
    pub set_snapshot: bool,

    /// Seed module nonces for a reproducible plan (random if unset)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Use this quorum denominator instead of reading it from the template
    #[arg(long)]
    pub quorum_denominator: Option<String>,

    /// Also write the outer batch as a Safe Transaction Builder bundle
    #[arg(long, value_name = "FILE")]
    pub bundle_out: Option<PathBuf>,
}

#[derive(Parser, Clone)]
pub struct PredictArgs {
    /// Module proxy factory address
    #[arg(long)]
    pub factory: String,

    /// Template (master copy) address
    #[arg(long)]
    pub template: String,

    /// Initializer calldata (hex)
    #[arg(long)]
    pub initializer: String,

    /// Salt nonce (decimal or 0x-prefixed hex)
    #[arg(long)]
    pub nonce: String,
}
