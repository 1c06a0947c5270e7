use anyhow::{Context, Result};

use piaofang::config::Config;
use piaofang::crawler::url::parse_target;
use piaofang::crawler::{Harvester, HttpFetcher, RankingsCollector};
use piaofang::models::PageState;
use piaofang::parser::MovieParser;
use piaofang::storage::JsonWriter;

/// Full run: collect rankings targets, then harvest each page
pub fn harvest(config: &Config, limit: Option<usize>) -> Result<()> {
    println!("Starting box office harvest");
    println!("===========================");

    let fetcher = HttpFetcher::from_config(config).context("Failed to create HTTP client")?;
    let collector = RankingsCollector::from_config(config);

    let mut targets = collector
        .fetch_targets(&fetcher)
        .with_context(|| format!("Failed to fetch rankings page {}", collector.rankings_url()))?;

    println!("Discovered {} movie pages", targets.len());

    if let Some(limit) = limit {
        targets.truncate(limit);
    }

    let writer = JsonWriter::new(&config.storage.output_dir).with_context(|| {
        format!(
            "Failed to prepare output directory {}",
            config.storage.output_dir.display()
        )
    })?;

    let stats = Harvester::new(&fetcher, MovieParser::new(), writer)
        .with_progress(true)
        .run(&targets);

    println!();
    println!("Harvest summary: {stats}");
    println!("  Output: {}", config.storage.output_dir.display());
    if stats.discovered > 0 {
        println!("  Success rate: {:.1}%", stats.success_rate() * 100.0);
    }

    Ok(())
}

/// Harvest a single movie page
pub fn page(config: &Config, url: &str) -> Result<()> {
    let target = parse_target(url).with_context(|| format!("Not a movie page address: {url}"))?;

    let fetcher = HttpFetcher::from_config(config).context("Failed to create HTTP client")?;
    let writer = JsonWriter::new(&config.storage.output_dir).with_context(|| {
        format!(
            "Failed to prepare output directory {}",
            config.storage.output_dir.display()
        )
    })?;
    let path = writer.path_for(&target.movie_id);

    match Harvester::new(&fetcher, MovieParser::new(), writer).harvest_page(&target.url) {
        PageState::Persisted => {
            println!("Saved {}", path.display());
            Ok(())
        }
        state => anyhow::bail!("Page {url} ended in state {state:?}"),
    }
}

/// Print the movie page addresses listed on the rankings page
pub fn links(config: &Config) -> Result<()> {
    let fetcher = HttpFetcher::from_config(config).context("Failed to create HTTP client")?;
    let collector = RankingsCollector::from_config(config);

    let targets = collector
        .fetch_targets(&fetcher)
        .with_context(|| format!("Failed to fetch rankings page {}", collector.rankings_url()))?;

    for target in &targets {
        println!("{target}");
    }
    eprintln!("{} movie pages", targets.len());

    Ok(())
}
