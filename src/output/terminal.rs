// Colored terminal output for trend results.
//
// Summary first, then the score breakdown, platform and promotion
// distributions, and the top posts. main.rs delegates here.

use colored::Colorize;

use crate::models::{Platform, PromotionLabel, TrendLevel, TrendResult};

const BAR_WIDTH: usize = 20;
const PREVIEW_CHARS: usize = 40;

/// Display a full trend report in the terminal.
pub fn display_trend_result(result: &TrendResult, demo: bool) {
    let badge = if demo {
        format!(" {}", "[DEMO]".dimmed())
    } else {
        String::new()
    };

    println!(
        "\n{}{}",
        format!("=== Trend Report: {} ===", result.topic).bold(),
        badge
    );
    println!();
    println!(
        "  Trend score: {:.1}/100  {}",
        result.trend_score,
        colorize_level(result.trend_level())
    );
    println!(
        "  Verdict: {} (organic {:.0}%)",
        colorize_label(result.dominant_label),
        result.organic_ratio * 100.0
    );

    display_scores(result);
    display_platforms(result);
    display_promotion(result);
    display_top_posts(result);
}

fn display_scores(result: &TrendResult) {
    println!("\n{}", "Scores".bold());
    println!("  {:<15} {:>6}", "Signal".dimmed(), "Score".dimmed());
    println!("  {}", "-".repeat(46).dimmed());

    let cross = if result.is_cross_platform {
        "cross-platform".green().to_string()
    } else {
        "single platform".dimmed().to_string()
    };

    println!(
        "  {:<15} {:>6.1}  {}",
        "Velocity",
        result.velocity_score,
        score_bar(result.velocity_score)
    );
    println!(
        "  {:<15} {:>6.1}  {}",
        "Volume",
        result.volume_score,
        score_bar(result.volume_score)
    );
    println!(
        "  {:<15} {:>6.1}  {} {}",
        "Amplification",
        result.amplification_score,
        score_bar(result.amplification_score),
        cross
    );
}

fn display_platforms(result: &TrendResult) {
    println!("\n{}", "Platforms".bold());
    for platform in Platform::ALL {
        let count = result.platform_count(platform);
        println!(
            "  {:<12} {:>5}  {:>4}",
            platform.as_str(),
            count,
            percent(count, result.total_posts)
        );
    }
    println!("  {:<12} {:>5}", "total".bold(), result.total_posts);
}

fn display_promotion(result: &TrendResult) {
    println!("\n{}", "Organic vs. paid".bold());
    let rows = [
        (PromotionLabel::Organic, result.organic_count),
        (PromotionLabel::Paid, result.paid_count),
        (PromotionLabel::Uncertain, result.uncertain_count),
    ];
    for (label, count) in rows {
        println!(
            "  {:<21} {:>5}  {:>4}",
            colorize_label(label),
            count,
            percent(count, result.total_posts)
        );
    }
}

fn display_top_posts(result: &TrendResult) {
    if result.top_posts.is_empty() {
        return;
    }

    println!("\n{}", "Top posts by engagement".bold());
    for (i, post) in result.top_posts.iter().enumerate() {
        let preview = super::truncate_chars(&post.text, PREVIEW_CHARS);
        println!(
            "  {}. [{:<9}] @{:<16} {:>10}  {}",
            i + 1,
            post.platform.as_str(),
            post.author,
            post.total_engagement(),
            preview.dimmed()
        );
    }
}

/// A 20-cell bar, green from 70, yellow from 40, red below.
pub fn score_bar(score: f64) -> String {
    let filled = ((score.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64) as usize;
    let bar = format!(
        "{}{}",
        "█".repeat(filled),
        "░".repeat(BAR_WIDTH.saturating_sub(filled))
    );

    if score >= 70.0 {
        bar.green().to_string()
    } else if score >= 40.0 {
        bar.yellow().to_string()
    } else {
        bar.red().to_string()
    }
}

fn percent(count: usize, total: usize) -> String {
    if total == 0 {
        "0%".to_string()
    } else {
        format!("{:.0}%", count as f64 / total as f64 * 100.0)
    }
}

fn colorize_level(level: TrendLevel) -> colored::ColoredString {
    let text = level.as_str();
    match level {
        TrendLevel::Hot => text.red().bold(),
        TrendLevel::Trending => text.yellow().bold(),
        TrendLevel::Rising => text.green().bold(),
        TrendLevel::LowActivity | TrendLevel::NoTrend => text.dimmed(),
    }
}

fn colorize_label(label: PromotionLabel) -> colored::ColoredString {
    match label {
        PromotionLabel::Organic => "Organic".green(),
        PromotionLabel::Paid => "Paid/Promoted".red(),
        PromotionLabel::Uncertain => "Uncertain".yellow(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_handles_empty_total() {
        assert_eq!(percent(0, 0), "0%");
        assert_eq!(percent(1, 4), "25%");
    }

    #[test]
    fn bar_is_always_twenty_cells() {
        colored::control::set_override(false);
        for score in [0.0, 33.3, 100.0, 250.0, -5.0] {
            assert_eq!(score_bar(score).chars().count(), BAR_WIDTH);
        }
    }
}
