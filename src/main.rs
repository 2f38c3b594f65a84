use futures::future::join_all;
use rent_lens::analyzer::{CityAnalyzer, DistrictAnalyzer, ListingAnalyzer, SubareaCatalog};
use rent_lens::config::{AppConfig, SourceConfig, load_config};
use rent_lens::model::SourceError;
use rent_lens::report::{self, Report, ReportOptions};
use rent_lens::source::{DataSource, FileSource, HttpSource};
use std::fs;
use std::path::Path;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Initialize logging, RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("😱 Panic occurred: {:?}", panic_info);
    }));

    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config.json".to_string());
    let config = match load_config(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {}", e);
            return;
        }
    };

    let sources = match build_sources(&config) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to build HTTP client: {}", e);
            return;
        }
    };
    info!("Sources to process: {}", sources.len());

    // Fetch all sources concurrently
    let blobs = join_all(sources.iter().map(|(_, source)| source.fetch())).await;

    let catalog = SubareaCatalog::guangzhou().with_overrides(&config.subareas);
    let options = ReportOptions {
        top_communities: config.top_communities,
        top_tags: config.top_tags,
    };

    for ((source_cfg, source), blob) in sources.iter().zip(blobs) {
        let text = match blob {
            Ok(text) => text,
            Err(e) => {
                warn!("Source {} failed: {}", source.name(), e);
                continue;
            }
        };

        info!("Analyzing {}...", source.name());
        let report = build_report(source_cfg, &text, &catalog, &options);
        info!(
            "{}: {} listings, avg price {:.0}, quality {}",
            source.name(),
            report.base.summary.total,
            report.base.summary.avg_price,
            report.base.quality.metrics.total
        );
        save_report(&config.output_dir, &report);
    }

    info!("Done.");
}

type ConfiguredSource<'a> = (&'a SourceConfig, Box<dyn DataSource>);

fn build_sources(config: &AppConfig) -> Result<Vec<ConfiguredSource<'_>>, SourceError> {
    let client = HttpSource::build_client(config.http_timeout_seconds)?;
    let sources = config
        .sources
        .iter()
        .filter_map(|cfg| {
            let source: Box<dyn DataSource> = match (&cfg.path, &cfg.url) {
                (Some(path), _) => Box::new(FileSource::new(cfg.name.clone(), path)),
                (None, Some(url)) => Box::new(HttpSource::new(cfg.name.clone(), url.clone(), client.clone())),
                (None, None) => return None,
            };
            Some((cfg, source))
        })
        .collect();
    Ok(sources)
}

fn build_report(source_cfg: &SourceConfig, text: &str, catalog: &SubareaCatalog, options: &ReportOptions) -> Report {
    let base = ListingAnalyzer::from_text(text);
    let mut rng = rand::rng();
    match &source_cfg.district {
        Some(scope) => {
            let analyzer = DistrictAnalyzer::new(base, scope, catalog);
            report::district_report(&source_cfg.name, &analyzer, options, &mut rng)
        }
        None => report::city_report(&source_cfg.name, &CityAnalyzer::new(base), options, &mut rng),
    }
}

/// Writes the report as pretty JSON to `<output_dir>/<source>.json`.
fn save_report(output_dir: &str, report: &Report) {
    let folder = Path::new(output_dir);
    if let Err(e) = fs::create_dir_all(folder) {
        warn!("Failed to create output folder: {}", e);
        return;
    }
    let json = match serde_json::to_string_pretty(report) {
        Ok(json) => json,
        Err(e) => {
            warn!("Failed to serialize report {}: {}", report.source, e);
            return;
        }
    };
    let filename = folder.join(format!("{}.json", report.source.replace(' ', "_")));
    if let Err(e) = fs::write(&filename, json) {
        warn!("Failed to write report: {}", e);
    } else {
        info!("Saved report: {}", filename.display());
    }
}
