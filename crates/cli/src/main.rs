use clap::{Parser, Subcommand};
use sitefence_domain::{BlockEntry, BlockPolicy, CliOverrides, DomainError};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

mod bootstrap;
mod di;

#[derive(Parser)]
#[command(name = "sitefence")]
#[command(version)]
#[command(about = "Personal website blocker - redirects blocked hosts until the block expires")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Block-list store path
    #[arg(long)]
    store: Option<String>,

    /// Redirect-rule table path
    #[arg(long)]
    rules: Option<String>,

    /// Block page URL
    #[arg(long)]
    block_page: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Block a site, permanently or for a limited time
    Add {
        /// URL or hostname to block
        url: String,
        /// Block for this many minutes
        #[arg(long, conflicts_with = "until")]
        duration: Option<u32>,
        /// Block until this wall-clock time (HH:MM, UTC)
        #[arg(long)]
        until: Option<String>,
    },
    /// Edit an existing block entry
    Edit {
        /// Entry id (see `list`)
        id: String,
        /// New URL or hostname
        url: String,
        #[arg(long, conflicts_with = "until")]
        duration: Option<u32>,
        #[arg(long)]
        until: Option<String>,
    },
    /// Remove a block entry
    Remove {
        /// Entry id (see `list`)
        id: String,
    },
    /// List blocked sites
    List,
    /// Run the background host (rules, alarms, expiry)
    Run,
}

fn parse_policy(duration: Option<u32>, until: Option<String>) -> Result<BlockPolicy, DomainError> {
    match (duration, until) {
        (Some(minutes), None) => Ok(BlockPolicy::Duration {
            duration_minutes: minutes,
        }),
        (None, Some(time)) => {
            let (hour, minute) = time
                .split_once(':')
                .and_then(|(h, m)| Some((h.parse().ok()?, m.parse().ok()?)))
                .ok_or_else(|| DomainError::InvalidTimeFormat(time.clone()))?;
            Ok(BlockPolicy::UntilTime { hour, minute })
        }
        (None, None) => Ok(BlockPolicy::Permanent),
        (Some(_), Some(_)) => unreachable!("clap rejects --duration with --until"),
    }
}

fn describe(entry: &BlockEntry) -> String {
    match entry.expires_at {
        Some(t) => format!("until {}", t.format("%Y-%m-%d %H:%M UTC")),
        None => "permanent".to_string(),
    }
}

fn print_entry(entry: &BlockEntry) {
    println!(
        "{}  {}  ({}, rule {})",
        entry.id,
        entry.hostname,
        describe(entry),
        entry.rule_id
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let overrides = CliOverrides {
        store_path: cli.store.clone(),
        rules_path: cli.rules.clone(),
        block_page_url: cli.block_page.clone(),
        log_level: cli.log_level.clone(),
    };
    let config = bootstrap::load_config(cli.config.as_deref(), overrides)?;
    bootstrap::init_logging(&config);

    let adapters = di::Adapters::new(&config);
    let sync = di::SyncUseCases::new(&config, &adapters);

    match cli.command {
        Command::Run => {
            info!("Starting sitefence background host v{}", env!("CARGO_PKG_VERSION"));
            let token = CancellationToken::new();
            let (runner, _gateway) = di::background_runner(adapters, &sync);
            let handle = tokio::spawn(runner.with_cancellation(token.clone()).run());

            tokio::signal::ctrl_c().await?;
            info!("Shutdown signal received");
            token.cancel();
            handle.await?;
        }
        command => {
            let sites = di::SiteUseCases::new(&adapters, di::direct_gateway(&sync));
            if let Err(e) = run_command(command, &sites).await {
                error!("{e}");
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

async fn run_command(command: Command, sites: &di::SiteUseCases) -> Result<(), DomainError> {
    match command {
        Command::Add {
            url,
            duration,
            until,
        } => {
            let policy = parse_policy(duration, until)?;
            let entry = sites.block.execute(&url, policy).await?;
            println!("Blocked {} ({})", entry.hostname, describe(&entry));
        }
        Command::Edit {
            id,
            url,
            duration,
            until,
        } => {
            let policy = parse_policy(duration, until)?;
            let entry = sites.update.execute(&id, &url, policy).await?;
            println!("Updated {} ({})", entry.hostname, describe(&entry));
        }
        Command::Remove { id } => {
            let entry = sites.unblock.execute(&id).await?;
            println!("Unblocked {}", entry.hostname);
        }
        Command::List => {
            let entries = sites.list.execute().await?;
            if entries.is_empty() {
                println!("No sites are blocked.");
            } else {
                for entry in &entries {
                    print_entry(entry);
                }
            }
        }
        Command::Run => unreachable!("handled in main"),
    }
    Ok(())
}
