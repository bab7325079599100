use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

/// Default Threads API endpoint.
pub const DEFAULT_THREADS_API_URL: &str = "https://graph.threads.net";
/// Default Instagram Graph API endpoint (versioned).
pub const DEFAULT_GRAPH_API_URL: &str = "https://graph.facebook.com/v21.0";

/// Central configuration loaded from environment variables.
///
/// Secrets come from env vars (never hardcoded). The .env file is loaded
/// automatically at startup via dotenvy.
#[derive(Debug, Clone)]
pub struct Config {
    /// Long-lived Meta access token, shared by Threads and Instagram.
    /// Empty means demo mode.
    pub meta_access_token: String,
    /// Numeric ID of the Instagram business/creator account used for
    /// hashtag search
    pub instagram_business_account_id: String,
    /// Threads user ID (informational; keyword search doesn't need it)
    pub threads_user_id: String,
    pub threads_api_url: String,
    pub graph_api_url: String,
    /// Velocity window in hours (TREND_VELOCITY_WINDOW_HOURS, default 6)
    pub velocity_window_hours: f64,
    /// Minimum post count for full volume (TREND_VOLUME_THRESHOLD, default 10)
    pub volume_threshold: u32,
    /// Amplification multiplier for cross-platform topics (CROSS_PLATFORM_BOOST, default 1.5)
    pub cross_platform_boost: f64,
    /// Where `--export json` writes reports
    pub output_dir: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// `load()` passes the process environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let string = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Ok(Self {
            meta_access_token: lookup("META_ACCESS_TOKEN").unwrap_or_default(),
            instagram_business_account_id: lookup("INSTAGRAM_BUSINESS_ACCOUNT_ID")
                .unwrap_or_default(),
            threads_user_id: lookup("THREADS_USER_ID").unwrap_or_default(),
            threads_api_url: string("THREADS_API_URL", DEFAULT_THREADS_API_URL),
            graph_api_url: string("GRAPH_API_URL", DEFAULT_GRAPH_API_URL),
            velocity_window_hours: check_knob(
                "TREND_VELOCITY_WINDOW_HOURS",
                parse_var(&lookup, "TREND_VELOCITY_WINDOW_HOURS", 6.0)?,
            )?,
            volume_threshold: parse_var(&lookup, "TREND_VOLUME_THRESHOLD", 10)?,
            cross_platform_boost: check_knob(
                "CROSS_PLATFORM_BOOST",
                parse_var(&lookup, "CROSS_PLATFORM_BOOST", 1.5)?,
            )?,
            output_dir: PathBuf::from(string("TRENDWATCH_OUTPUT_DIR", "output")),
        })
    }

    /// No access token means the sources generate demo data instead of
    /// calling the Meta APIs.
    pub fn is_demo_mode(&self) -> bool {
        self.meta_access_token.is_empty()
    }

    /// Check that the Meta access token is configured.
    pub fn require_meta(&self) -> Result<()> {
        if self.meta_access_token.is_empty() {
            anyhow::bail!(
                "META_ACCESS_TOKEN not set. Add it to your .env file, \
                 or pass --demo to run on generated data."
            );
        }
        Ok(())
    }

    /// Check that Instagram hashtag search can run.
    pub fn require_instagram(&self) -> Result<()> {
        self.require_meta()?;
        if self.instagram_business_account_id.is_empty() {
            anyhow::bail!(
                "INSTAGRAM_BUSINESS_ACCOUNT_ID not set. Hashtag search requires \
                 the numeric ID of an Instagram business or creator account."
            );
        }
        Ok(())
    }
}

/// Reject float knobs the scorers can't use. `f64::from_str` happily accepts
/// "NaN", "inf" and negatives, and NaN slips through `clamp`.
pub fn check_knob(name: &str, value: f64) -> Result<f64> {
    if !value.is_finite() || value < 0.0 {
        anyhow::bail!("{name} must be a finite, non-negative number, got {value}");
    }
    Ok(value)
}

/// Parse a numeric variable, falling back to `default` when unset or blank.
fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a number, got {raw:?}")),
        _ => Ok(default),
    }
}
