//! `regrws` - command-line front end for the ARIN Reg-RWS client
//!
//! # Usage
//!
//! ```bash
//! # Look up a record (handles are case-insensitive)
//! REGRWS_API_KEY=... regrws get org ARIN
//!
//! # Most specific net covering a range
//! regrws find-net 192.0.2.0 192.0.2.255
//!
//! # Simple reassignment, checked first with --dry-run
//! regrws reassign 192.0.2.0/28 --customer-name "Example Corp" \
//!     --street "123 Main Street" --city Anytown --region VA --postal-code 12345 --dry-run
//! ```

// CLI tools are expected to print to stdout/stderr
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod common;
mod find;
mod get;
mod reassign;

use clap::{Parser, Subcommand};

use crate::common::GlobalArgs;

/// ARIN Reg-RWS client
#[derive(Parser)]
#[command(name = "regrws")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a record by handle and print it as XML
    Get(get::GetArgs),
    /// Find the most specific net covering an address range
    FindNet(find::FindArgs),
    /// Find the parent of the net covering an address range
    FindParent(find::FindArgs),
    /// Reassign a block to a new customer (simple reassignment)
    Reassign(reassign::ReassignArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    common::init_logging(cli.global.verbose);

    let client = cli.global.client()?;
    match cli.command {
        Commands::Get(args) => args.run(&client).await,
        Commands::FindNet(args) => args.run(&client, find::Search::MostSpecific).await,
        Commands::FindParent(args) => args.run(&client, find::Search::Parent).await,
        Commands::Reassign(args) => args.run(&client).await,
    }
}
