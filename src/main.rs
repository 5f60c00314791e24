use anyhow::Result;
use clap::{Parser, ValueEnum};
use interaction_clique_finder::cluster::metrics::summarize_clusters;
use interaction_clique_finder::config::DEFAULT_MIN_CLUSTER_SIZE;
use interaction_clique_finder::data::{self, InputFormat};
use interaction_clique_finder::{storage, viz, Config, NodeRegistry, OnlineDetector};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Parquet,
}

#[derive(Parser, Debug)]
#[clap(
    name = "interaction-clique-finder",
    about = "Find clusters of mutually interacting entities in an interaction log"
)]
struct Cli {
    /// Path to the interaction log
    input: PathBuf,

    /// Input format (detected from the file extension if omitted)
    #[clap(long, value_enum)]
    format: Option<Format>,

    /// Column holding the sender key (Parquet input)
    #[clap(long, default_value = data::parquet::DEFAULT_FROM_COLUMN)]
    from_column: String,

    /// Column holding the receiver key (Parquet input)
    #[clap(long, default_value = data::parquet::DEFAULT_TO_COLUMN)]
    to_column: String,

    /// Minimum cluster size
    #[clap(long, default_value_t = DEFAULT_MIN_CLUSTER_SIZE)]
    min_cluster_size: usize,

    /// Also write JSON results to this directory
    #[clap(long)]
    output_dir: Option<PathBuf>,

    /// Skip visualizations
    #[clap(long)]
    skip_viz: bool,

    /// Verbose logging
    #[clap(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Cli::parse();

    // Configure logging
    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    let config = Config::new(args.min_cluster_size)?;
    let format = match args.format {
        Some(Format::Text) => InputFormat::Text,
        Some(Format::Parquet) => InputFormat::Parquet,
        None => InputFormat::detect(&args.input),
    };

    log::info!("Starting cluster detection");
    log::info!("Input: {} ({:?})", args.input.display(), format);

    // 1. Stream events through the detector
    let mut registry = NodeRegistry::new();
    let mut detector = OnlineDetector::new(config);

    let events = data::read_events(&args.input, format, &args.from_column, &args.to_column)?;
    for event in events {
        let event = event?;
        let from = registry.get_or_create_node(&event.from)?;
        let to = registry.get_or_create_node(&event.to)?;
        detector.process(from, to);
    }

    // 2. Remove clusters that are not maximal
    detector.finalize()?;

    let stats = detector.stats();
    log::info!(
        "Processed {} events over {} nodes, found {} clusters",
        stats.events,
        registry.len(),
        stats.clusters
    );

    // 3. Print clusters
    for line in storage::format_clusters(detector.clusters(), &registry) {
        println!("{}", line);
    }

    // 4. Save results if requested
    if let Some(output_dir) = &args.output_dir {
        let summaries = summarize_clusters(detector.clusters(), detector.verified_graph());
        storage::save_results(
            &summaries,
            detector.verified_graph(),
            &stats,
            &registry,
            output_dir,
        )?;

        if !args.skip_viz {
            viz::generate_visualizations(
                &summaries,
                detector.verified_graph(),
                &registry,
                output_dir,
            )?;
        }

        log::info!("Results saved to {}", output_dir.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_cluster_size_defaults_to_config() {
        let args = Cli::try_parse_from(["interaction-clique-finder", "log.txt"]).unwrap();

        assert_eq!(args.min_cluster_size, Config::default().min_cluster_size);
        assert_eq!(args.from_column, data::parquet::DEFAULT_FROM_COLUMN);
    }
}
