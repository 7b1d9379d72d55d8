use std::fs;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use feedimage::cli::{Cli, Commands};
use feedimage::config::Config;
use feedimage::document::FeedDocument;
use feedimage::domain::ResolutionOptions;
use feedimage::errors::{FeedError, FeedResult};
use feedimage::extensions::NamespaceRegistry;
use feedimage::services::{FeedService, FetchService, ReadableService};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> FeedResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env()?;
    let fetcher = FetchService::new(&config);
    let registry = NamespaceRegistry::new();

    match cli.command {
        Commands::Images {
            source,
            ignore,
            json,
        } => {
            let options = ResolutionOptions::new()
                .with_ignored(config.ignore_image_if_contains.iter().cloned())
                .with_ignored(ignore);
            let service = FeedService::new(fetcher, registry, options);
            cmd_images(&service, &source, json)
        }
        Commands::Thumbnails { source } => {
            let service = FeedService::new(fetcher, registry, default_options(&config));
            cmd_thumbnails(&service, &source)
        }
        Commands::Trends { source } => {
            let service = FeedService::new(fetcher, registry, default_options(&config));
            cmd_trends(&service, &source)
        }
        Commands::Tag { source, name } => {
            let service = FeedService::new(fetcher, registry, default_options(&config));
            cmd_tag(&service, &source, &name)
        }
        Commands::Readable {
            source,
            entry,
            html_file,
        } => {
            let readable = ReadableService::new(fetcher.clone());
            let service = FeedService::new(fetcher, registry, default_options(&config));
            cmd_readable(&service, &readable, &source, entry, html_file.as_deref())
        }
    }
}

fn default_options(config: &Config) -> ResolutionOptions {
    ResolutionOptions::new().with_ignored(config.ignore_image_if_contains.iter().cloned())
}

fn open(service: &FeedService<FetchService>, source: &str) -> FeedResult<FeedDocument> {
    let document = service.open(source)?;
    tracing::debug!(
        feed_type = %document.feed_type(),
        entries = document.len(),
        "Parsed feed"
    );
    Ok(document)
}

fn cmd_images(service: &FeedService<FetchService>, source: &str, json: bool) -> FeedResult<()> {
    let document = open(service, source)?;
    let images = service.images(&document);

    if json {
        println!("{}", serde_json::to_string_pretty(&images)?);
        return Ok(());
    }

    if images.is_empty() {
        println!("No entries in feed.");
        return Ok(());
    }

    for image in &images {
        println!("{}", image.format());
    }

    Ok(())
}

fn cmd_thumbnails(service: &FeedService<FetchService>, source: &str) -> FeedResult<()> {
    let document = open(service, source)?;

    for (title, candidates) in service.thumbnails(&document) {
        println!("{}:", title);
        if candidates.is_empty() {
            println!("  (no thumbnails)");
        }
        for candidate in candidates {
            match (candidate.width, candidate.height) {
                (Some(width), Some(height)) => {
                    println!("  {} ({}x{})", candidate.url, width, height)
                }
                (Some(width), None) => println!("  {} (width {})", candidate.url, width),
                _ => println!("  {}", candidate.url),
            }
        }
    }

    Ok(())
}

fn cmd_trends(service: &FeedService<FetchService>, source: &str) -> FeedResult<()> {
    let document = open(service, source)?;
    let topics = service.trends(&document);

    if topics.is_empty() {
        println!("Not a Google Trends feed.");
        return Ok(());
    }

    for topic in &topics {
        match &topic.approx_traffic {
            Some(traffic) => println!("{} [{}]", topic.title, traffic),
            None => println!("{}", topic.title),
        }
        for item in &topic.news_items {
            println!("  -");
            for (name, value) in item.fields() {
                println!("    {}: {}", name, value);
            }
        }
    }

    Ok(())
}

fn cmd_tag(service: &FeedService<FetchService>, source: &str, name: &str) -> FeedResult<()> {
    let document = open(service, source)?;

    for (title, value) in service.tag_values(&document, name)? {
        println!("{}: {}", title, value.as_deref().unwrap_or("(none)"));
    }

    Ok(())
}

fn cmd_readable(
    service: &FeedService<FetchService>,
    readable: &ReadableService<FetchService>,
    source: &str,
    index: usize,
    html_file: Option<&str>,
) -> FeedResult<()> {
    let document = open(service, source)?;
    let entry = document
        .entry(index)
        .ok_or(FeedError::EntryNotFound(index))?;

    let html = html_file.map(fs::read_to_string).transpose()?;
    let content = readable.readable_content(&entry, html.as_deref())?;

    if let Some(title) = &content.title {
        println!("Title: {}", title);
    }
    if !content.images.is_empty() {
        println!("Images:");
        for image in &content.images {
            println!("  {}", image);
        }
    }
    println!();
    println!("{}", content.text);

    Ok(())
}
