// Configuration status display: credentials, endpoints and scoring knobs.

use colored::Colorize;

use crate::config::Config;
use crate::scoring::trend::TrendParams;

/// Display the active configuration to the terminal. Secrets are never
/// printed, only whether they're set.
pub fn show(config: &Config) {
    let mode = if config.is_demo_mode() {
        "demo (no META_ACCESS_TOKEN)".yellow().to_string()
    } else {
        "live".green().to_string()
    };
    println!("Mode: {mode}");

    println!(
        "Meta access token: {}",
        set_or_missing(!config.meta_access_token.is_empty())
    );
    println!(
        "Instagram business account: {}",
        set_or_missing(!config.instagram_business_account_id.is_empty())
    );
    println!(
        "Threads user ID: {}",
        set_or_missing(!config.threads_user_id.is_empty())
    );
    println!("Threads API: {}", config.threads_api_url);
    println!("Graph API: {}", config.graph_api_url);

    let params = TrendParams::from_config(config);
    println!("\nTrend parameters:");
    println!("  Velocity window: {} h", params.velocity_window_hours);
    println!("  Volume threshold: {} posts", params.volume_threshold);
    println!("  Cross-platform boost: {:.2}x", params.cross_platform_boost);
    println!("\nExport directory: {}", config.output_dir.display());
}

fn set_or_missing(set: bool) -> colored::ColoredString {
    if set {
        "set".green()
    } else {
        "not set".dimmed()
    }
}
