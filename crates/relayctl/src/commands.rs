//! Command handlers for relayctl.

use crate::client::RelaydClient;
use anyhow::{bail, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use relay_common::prospects::to_csv;
use relay_common::{Prospect, TripRequest};
use std::path::PathBuf;
use std::time::Duration;

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().tick_strings(&[
        "⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", " ",
    ]));
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

pub async fn status(client: &RelaydClient) -> Result<()> {
    let health = client.health().await?;

    println!();
    println!("{}", format!("relayctl v{}", env!("CARGO_PKG_VERSION")).bright_cyan());
    println!("{}", "─".repeat(40).dimmed());

    let status_str = if health.llm_available {
        health.status.green().to_string()
    } else {
        health.status.yellow().to_string()
    };
    println!("{:<12} {}", "daemon", status_str);
    println!("{:<12} v{}", "version", health.version);
    println!("{:<12} {}s", "uptime", health.uptime_seconds);
    println!(
        "{:<12} {}",
        "model",
        if health.llm_available {
            "reachable".green().to_string()
        } else {
            "unreachable".red().to_string()
        }
    );
    Ok(())
}

pub async fn icp(client: &RelaydClient, website: &str, out: Option<PathBuf>) -> Result<()> {
    let pb = spinner("Generating customer profile...");
    let result = client.generate_icp(website).await;
    pb.finish_and_clear();

    let response = result?;
    match out {
        Some(path) => {
            std::fs::write(&path, &response.raw)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("{} profile written to {}", "✓".green(), path.display());
        }
        None => println!("{}", response.raw),
    }
    Ok(())
}

pub async fn params(client: &RelaydClient, file: &PathBuf) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;

    let pb = spinner("Extracting search parameters...");
    let result = client.extract_params(&content).await;
    pb.finish_and_clear();

    let params = result?;
    println!("{}", serde_json::to_string_pretty(&params)?);
    Ok(())
}

/// Read profile text from a file, or from stdin when no file is given.
fn read_icp_text(icp_file: Option<&PathBuf>) -> Result<String> {
    let icp_text = match icp_file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => std::io::read_to_string(std::io::stdin())
            .context("failed to read profile text from stdin")?,
    };
    if icp_text.trim().is_empty() {
        bail!("profile text is empty; generate a profile first");
    }
    Ok(icp_text)
}

pub async fn prospects(
    client: &RelaydClient,
    icp_file: Option<&PathBuf>,
    count: usize,
    csv: Option<PathBuf>,
) -> Result<()> {
    let icp_text = read_icp_text(icp_file)?;

    let pb = spinner(&format!("Discovering {} prospects...", count));
    let result = client.discover_prospects(&icp_text, count).await;
    pb.finish_and_clear();

    let response = result?;
    print_prospect_table(&response.prospects);

    if let Some(path) = csv {
        std::fs::write(&path, to_csv(&response.prospects))
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!();
        println!("{} {} prospects exported to {}", "✓".green(), response.prospects.len(), path.display());
    }
    Ok(())
}

fn print_prospect_table(prospects: &[Prospect]) {
    println!();
    println!(
        "{:<24} {:<28} {:<28} {}",
        "NAME".bold(),
        "TITLE".bold(),
        "COMPANY".bold(),
        "LOCATION".bold()
    );
    println!("{}", "─".repeat(100).dimmed());
    for p in prospects {
        println!(
            "{:<24} {:<28} {:<28} {}",
            truncate(&p.name, 22),
            truncate(&p.title, 26),
            truncate(&p.company, 26),
            p.location
        );
        println!("  {}", p.linkedin_url.dimmed());
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

pub async fn trip(
    client: &RelaydClient,
    origin: String,
    cities: Vec<String>,
    dates: String,
    interests: String,
) -> Result<()> {
    let request = TripRequest {
        origin,
        cities,
        date_range: dates,
        interests,
    };
    if !request.is_complete() {
        bail!("origin, cities, dates, and interests are all required");
    }

    let pb = spinner("Planning your trip...");
    let result = client.trip_plan(&request).await;
    pb.finish_and_clear();

    println!("{}", result?.trip_plan);
    Ok(())
}

pub async fn image(
    client: &RelaydClient,
    prompt: String,
    reference_note: Option<String>,
) -> Result<()> {
    let pb = spinner("Generating image...");
    let result = client.generate_image(&prompt, reference_note).await;
    pb.finish_and_clear();

    let response = result?;
    println!("{} image ready:", "✓".green());
    println!("{}", response.url);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_icp_text_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("icp.md");
        std::fs::write(&path, "## Ideal Customer Profile\nretail CIOs").unwrap();
        let text = read_icp_text(Some(&path)).unwrap();
        assert!(text.contains("retail CIOs"));
    }

    #[test]
    fn test_read_icp_text_rejects_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.md");
        std::fs::write(&path, "  \n").unwrap();
        assert!(read_icp_text(Some(&path)).is_err());
    }

    #[test]
    fn test_truncate_short_strings_untouched() {
        assert_eq!(truncate("Jane Smith", 22), "Jane Smith");
    }

    #[test]
    fn test_truncate_long_strings_get_ellipsis() {
        let long = "Chief Information Officer for EMEA Operations";
        let cut = truncate(long, 26);
        assert!(cut.ends_with('…'));
        assert_eq!(cut.chars().count(), 26);
    }
}
