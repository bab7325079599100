use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use trendwatch::config::{check_knob, Config};
use trendwatch::models::{Platform, Post};
use trendwatch::scoring::trend::{TrendDetector, TrendParams};
use trendwatch::sources::{self, traits::PostSource};

/// Trendwatch: is a topic trending on Threads and Instagram, and is the buzz
/// organic or paid?
#[derive(Parser)]
#[command(name = "trendwatch", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Collect posts about a topic and score whether it's trending
    Analyze {
        /// Keyword or hashtag to analyze (e.g. "AI", "fashion")
        topic: String,

        /// Max posts to collect per platform (default: 30)
        #[arg(short, long, default_value = "30")]
        limit: usize,

        /// Use generated sample data instead of the Meta APIs
        #[arg(short, long)]
        demo: bool,

        /// Seed for reproducible demo data
        #[arg(long)]
        seed: Option<u64>,

        /// Which platforms to collect from
        #[arg(long, value_enum, default_value = "all")]
        platform: PlatformArg,

        /// Export the result to a file
        #[arg(short, long, value_enum)]
        export: Option<ExportFormat>,

        /// Override TREND_VELOCITY_WINDOW_HOURS
        #[arg(long)]
        window_hours: Option<f64>,

        /// Override TREND_VOLUME_THRESHOLD
        #[arg(long)]
        volume_threshold: Option<u32>,

        /// Override CROSS_PLATFORM_BOOST
        #[arg(long)]
        boost: Option<f64>,
    },

    /// Show configuration (credentials present, endpoints, scoring knobs)
    Status,
}

#[derive(Clone, Copy, ValueEnum)]
enum PlatformArg {
    All,
    Threads,
    Instagram,
}

impl PlatformArg {
    fn platforms(self) -> Vec<Platform> {
        match self {
            PlatformArg::All => Platform::ALL.to_vec(),
            PlatformArg::Threads => vec![Platform::Threads],
            PlatformArg::Instagram => vec![Platform::Instagram],
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportFormat {
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("trendwatch=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            topic,
            limit,
            demo,
            seed,
            platform,
            export,
            window_hours,
            volume_threshold,
            boost,
        } => {
            let config = Config::load()?;

            let use_demo = demo || config.is_demo_mode();
            if use_demo && !demo {
                println!(
                    "{} META_ACCESS_TOKEN not set, running on demo data.",
                    "Warning:".yellow()
                );
                println!(
                    "{}",
                    "  Set it in your .env file to query the real APIs.".dimmed()
                );
            }

            let mut params = TrendParams::from_config(&config);
            if let Some(hours) = window_hours {
                params.velocity_window_hours = check_knob("--window-hours", hours)?;
            }
            if let Some(threshold) = volume_threshold {
                params.volume_threshold = threshold;
            }
            if let Some(boost) = boost {
                params.cross_platform_boost = check_knob("--boost", boost)?;
            }

            let platform_sources = platform
                .platforms()
                .into_iter()
                .map(|p| sources::for_platform(p, &config, use_demo, seed))
                .collect::<Result<Vec<_>>>()?;

            let posts = collect_posts(&platform_sources, &topic, limit).await?;

            if posts.is_empty() {
                println!(
                    "{}",
                    "No posts collected. Try a different topic.".red()
                );
                return Ok(());
            }

            let detector = TrendDetector::new(params);
            let result = detector.analyze(&topic, &posts);

            trendwatch::output::terminal::display_trend_result(&result, use_demo);

            if let Some(ExportFormat::Json) = export {
                let path = trendwatch::output::json::export(&result, &config.output_dir)?;
                println!("\n{} {}", "Saved:".green(), path.display());
            }
        }

        Commands::Status => {
            let config = Config::load()?;
            trendwatch::status::show(&config);
        }
    }

    Ok(())
}

/// Search every source concurrently behind a spinner.
async fn collect_posts(
    sources: &[Box<dyn PostSource>],
    topic: &str,
    limit: usize,
) -> Result<Vec<Post>> {
    let names: Vec<String> = sources.iter().map(|s| s.name()).collect();

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("  {spinner} {msg}")?);
    spinner.set_message(format!("Collecting posts from {}...", names.join(", ")));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let batches =
        futures::future::join_all(sources.iter().map(|s| s.search(topic, limit))).await;

    spinner.finish_and_clear();

    let mut posts = Vec::new();
    for (name, batch) in names.iter().zip(batches) {
        println!("  {}: {} posts", name, batch.len());
        info!(source = name.as_str(), count = batch.len(), "Source finished");
        posts.extend(batch);
    }

    Ok(posts)
}
