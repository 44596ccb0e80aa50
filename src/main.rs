// src/main.rs
mod dom;
mod edgar;
mod extractors;
mod storage;
mod utils;

use clap::Parser;
use edgar::client::{self, FetchConfig};
use extractors::{ExtractedSection, SectionExtractor, SectionLabels};
use storage::StorageManager;
use utils::AppError;

/// Extracts one labeled section (e.g. Item 1A) from a 10-K filing document
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// URL of the filing document (HTML)
    url: String,

    /// Label of the section to extract ("1a" searches for "item 1a")
    #[arg(short, long, default_value = "1a")]
    section: String,

    /// Label of the section that ends the extracted one
    #[arg(short = 'e', long, default_value = "1b")]
    section_end: String,

    /// User-Agent sent to EDGAR ("Company Name contact@email")
    #[arg(long, env = "SEC_USER_AGENT", default_value = client::DEFAULT_USER_AGENT)]
    user_agent: String,

    /// Save the section and its metadata here instead of printing it
    #[arg(short, long)]
    output_dir: Option<String>,

    /// Debug mode - save the cleaned HTML with markers highlighted (needs --output-dir)
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting processing for args: {:?}", args);

    if args.user_agent.trim().is_empty() {
        return Err(AppError::Config("User-Agent must not be empty".to_string()));
    }
    let config = FetchConfig {
        user_agent: args.user_agent.clone(),
    };
    let extractor = SectionExtractor::new(SectionLabels::new(&args.section, &args.section_end));

    // 3. Initialize storage if requested
    let storage = args.output_dir.as_ref().map(StorageManager::new).transpose()?;
    if args.debug && storage.is_none() {
        tracing::warn!("--debug has no effect without --output-dir");
    }

    // 4. Fetch and clean the document
    let document = client::fetch_clean_document(&args.url, &config).await?;

    if let (true, Some(storage)) = (args.debug, &storage) {
        let debug_path = storage.debug_dir(&args.url)?.join("cleaned_annotated.html");
        let labels = extractor.labels();
        let markers = [(labels.start.as_str(), "start"), (labels.end.as_str(), "end")];
        let annotated =
            utils::html_debug::create_debug_html(&document.to_html(), &debug_path, &markers);
        if let Err(e) = annotated {
            tracing::warn!("Failed to create debug HTML: {}", e);
        }
    }

    // 5. Extract the section
    let Some(content) = extractor.extract(&document)? else {
        tracing::warn!("Section 'item {}' not found in {}", args.section, args.url);
        return Ok(());
    };

    let section = ExtractedSection {
        url: args.url.clone(),
        labels: extractor.labels().clone(),
        content,
    };
    tracing::info!("Extracted {} words", section.word_count());

    // 6. Print or save
    match &storage {
        Some(storage) => {
            storage.save_section(&section)?;
            storage.save_section_metadata(&section)?;
        }
        None => println!("{}", section.content),
    }

    Ok(())
}
