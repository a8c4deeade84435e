use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "starknet-wrapped-api",
    version,
    about = "Starknet year-in-review aggregation service"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API server
    Serve {
        /// Override bind address, e.g. 0.0.0.0:8080
        #[arg(long)]
        addr: Option<String>,
    },
    /// Aggregate one address and print its wrapped payload
    Wrapped {
        #[arg(long)]
        address: String,
    },
    /// Print a seeded demo payload (synthetic numbers, marked as such)
    Demo {
        #[arg(long)]
        address: String,
    },
    /// List recently queried addresses
    Recent,
}
