use anyhow::Result;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_cloudwatch::Client as CloudWatchClient;
use aws_sdk_ec2::Client as Ec2Client;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use costctl::config::{self, Config};
use costctl::traffic::TrafficEstimator;
use costctl::{aggregate, pricing, report, InventorySnapshot};

#[derive(Parser)]
#[command(name = "costctl")]
#[command(
    about = "Monthly AWS cost breakdown for EC2, EBS, and egress traffic",
    long_about = "costctl inventories the account's EC2 instances and EBS volumes, groups instances by naming convention, and estimates a monthly cost per group.\n\nCost components:\n  - Instance hours (fixed on-demand price table)\n  - Attached EBS storage (gp2/gp3 at default provisioning)\n  - Outbound traffic over the trailing 30 days (CloudWatch NetworkOut)\n\nThe report goes to stdout; progress and warnings go to stderr."
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Produce the monthly cost report
    ///
    /// Fetches the instance and volume inventories, groups instances, queries
    /// 30-day traffic per instance, and prints one cost line per group plus a
    /// totals line.
    ///
    /// Examples:
    ///   costctl report
    ///   costctl report --format table --skip-traffic
    #[command(alias = "run")]
    Report {
        /// Output format (csv, table, json); defaults to the config value
        #[arg(long, value_name = "FORMAT")]
        format: Option<String>,

        /// Skip CloudWatch traffic queries (traffic columns report zero)
        ///
        /// Much faster for large fleets, since traffic is one metrics query
        /// per instance.
        #[arg(long)]
        skip_traffic: bool,
    },
    /// Initialize report configuration
    Init {
        /// Output path for config file
        #[arg(short, long, default_value = ".costctl.toml")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Progress and warnings go to stderr so stdout stays a clean report stream
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Load config
    let config = Config::load(cli.config.as_deref())?;

    // Execute command
    match cli.command {
        Commands::Report {
            format,
            skip_traffic,
        } => {
            run_report(format, skip_traffic, &config).await?;
        }
        Commands::Init { output } => {
            config::init_config(&output)?;
        }
    }

    Ok(())
}

async fn run_report(format: Option<String>, skip_traffic: bool, config: &Config) -> Result<()> {
    let region = config.aws.region.clone();
    if region != pricing::PRICING_REGION {
        warn!(
            "Price table is for {}; region {} may not match the reported instance and storage prices",
            pricing::PRICING_REGION,
            region
        );
    }

    let aws_config = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(region))
        .load()
        .await;

    let ec2 = Ec2Client::new(&aws_config);
    let snapshot = InventorySnapshot::fetch(&ec2).await?;
    let groups = aggregate::group_instances(&snapshot)?;

    let estimator = if skip_traffic || config.report.skip_traffic {
        None
    } else {
        let price = config
            .report
            .traffic_price_per_gb
            .unwrap_or(pricing::TRAFFIC_PRICE_PER_GB);
        Some(TrafficEstimator::new(
            CloudWatchClient::new(&aws_config),
            price,
        ))
    };

    let cost_report = report::build_report(&groups, estimator.as_ref()).await?;
    report::emit(
        &cost_report,
        format.as_deref().unwrap_or(&config.report.format),
    )?;
    Ok(())
}
