// src/main.rs
use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;
use log::{error, info};
use serde_json::json;
use zandro_query::config::Config;
use zandro_query::query_report;
use zandro_query::utils::hex_bytes;

/// Query Zandronum servers and print their status as JSON.
#[derive(Parser, Debug)]
#[command(name = "zandro-query")]
struct Cli {
    /// Include the sent, received and decoded bytes as hex.
    #[arg(long)]
    raw: bool,

    /// Servers to query, as host[:port].
    #[arg(required = true)]
    addresses: Vec<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();

    // Load configuration
    let config = Config::from_env();

    env_logger::init_from_env(Env::default().default_filter_or(config.log_level.as_str()));

    let Cli { raw, addresses } = Cli::parse();

    let options = config.query_options();
    let flags = config.query_flags();
    let extended_flags = config.extended_flags();
    info!("Querying {} server(s)", addresses.len());

    // One task and one socket per server.
    let handles: Vec<_> = addresses
        .into_iter()
        .map(|address| {
            tokio::spawn(async move {
                let report = query_report(&address, flags, extended_flags, &options).await;
                (address, report)
            })
        })
        .collect();

    let mut failed = false;
    for handle in handles {
        let (address, report) = match handle.await {
            Ok(done) => done,
            Err(e) => {
                error!("Query task failed: {}", e);
                failed = true;
                continue;
            }
        };

        let mut document = match &report.outcome {
            Ok(status) => json!({ "address": address, "status": status }),
            Err(e) => {
                failed = true;
                json!({ "address": address, "error": e.to_string() })
            }
        };
        if raw {
            document["sent"] = json!(hex_bytes(&report.sent));
            document["received"] = json!(report.received.as_deref().map(hex_bytes));
            document["decoded"] = json!(report.decoded.as_deref().map(hex_bytes));
        }

        match serde_json::to_string_pretty(&document) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                error!("Failed to serialize result for {}: {}", address, e);
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
