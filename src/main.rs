//! Archivist CLI
//!
//! Drives the archive loaders against a live server:
//! - Load activity charts for a set of lists
//! - Redraw the overview chart at a given width
//! - Load every reply of a thread
//! - Show a held message

use anyhow::Context;
use archivist::config::generate_default_config;
use archivist::*;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "archivist")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Mailing-list archive client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Archive server URL, overrides the config
    #[arg(long, global = true)]
    pub base_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load activity charts for lists, one at a time, and write them as SVG
    Charts {
        /// List addresses, in display order
        lists: Vec<String>,
        /// URL template with a PLACEHOLDER@PLACEHOLDER token
        #[arg(short, long)]
        template: Option<String>,
        /// Output directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },

    /// Draw a single chart at the given width and print the SVG
    Overview {
        /// Recent-activity URL
        url: String,
        /// Container width in pixels
        #[arg(short, long)]
        width: Option<f64>,
    },

    /// Load every reply of a thread and print the markup
    Replies {
        /// Replies URL (without offset)
        url: String,
    },

    /// Show a message held for moderation
    Held {
        /// Held-message REST URL rendered for a dummy id (e.g. ".../held_message/0/")
        rest_url: String,
        /// Message id
        msgid: u64,
    },

    /// Print a default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn init_logging(config: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!("archivist={}", config.level))
    });
    let registry = tracing_subscriber::registry().with(filter);

    if config.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = cli.base_url {
        config.server.base_url = url;
    }

    init_logging(&config.logging);

    let transport: Arc<dyn Transport> = Arc::new(HttpTransport::new(HttpTransportConfig {
        base_url: Some(config.server.base_url.clone()),
        timeout: config.server.request_timeout(),
    })?);
    let notifier: Arc<dyn Notifier> = Arc::new(StderrNotifier);

    match cli.command {
        Commands::Charts {
            lists,
            template,
            output,
        } => {
            let loader = ChartLoader::new(transport, config.charts.index_props());
            let template = UrlTemplate::new(template.unwrap_or(config.charts.url_template))?;

            let rows: Vec<ChartRow> = lists
                .iter()
                .map(|name| ChartRow::new(name.clone(), Region::shared(name.clone())))
                .collect();

            let results = loader.load_sequence(&template, &rows).await;

            std::fs::create_dir_all(&output)
                .with_context(|| format!("Cannot create {:?}", output))?;

            for (list, outcome) in &results {
                let region = rows
                    .iter()
                    .find(|r| &r.entity == list)
                    .map(|r| r.region.clone());

                match (outcome, region.and_then(|r| r.charts().pop())) {
                    (ChartOutcome::Rendered { points }, Some(chart)) => {
                        let path = output.join(format!("{}.svg", list));
                        std::fs::write(&path, &chart.svg)
                            .with_context(|| format!("Cannot write {:?}", path))?;
                        println!("{:<40} {:>4} days  {}", list, points, path.display());
                    }
                    (ChartOutcome::Rendered { .. }, None) => {
                        println!("{:<40} no activity", list);
                    }
                    (ChartOutcome::Skipped, _) => println!("{:<40} skipped", list),
                    (ChartOutcome::Failed(e), _) => println!("{:<40} failed: {}", list, e),
                }
            }
        }

        Commands::Overview { url, width } => {
            let props = config.charts.props();
            let loader = ChartLoader::new(transport, props);
            let overview = OverviewChart::new(loader, url, Region::shared("overview"));

            match overview.on_resize(width.unwrap_or(props.width)).await {
                ChartOutcome::Failed(e) => anyhow::bail!("Chart unavailable: {}", e),
                _ => {
                    for chart in overview.region().charts() {
                        println!("{}", chart.svg);
                    }
                }
            }
        }

        Commands::Replies { url } => {
            let loader = ReplyLoader::new(transport, notifier);
            let region = Region::new("replies");

            let report = loader.load(&url, &region).await;
            println!("{}", region.fragment_html());

            eprintln!(
                "{} pages, {} requests, {} quotes folded{}",
                report.pages_loaded,
                report.requests_issued,
                report.quotes_folded,
                if report.halted.is_some() { " (halted)" } else { "" }
            );
            if report.halted.is_some() {
                std::process::exit(1);
            }
        }

        Commands::Held { rest_url, msgid } => {
            let client = ModerationClient::new(
                transport,
                notifier,
                &rest_url,
                config.moderation.error_message.clone(),
            );

            let Ok(view) = client.show(msgid).await else {
                std::process::exit(1);
            };

            println!("Subject: {}", view.title);
            println!("Source:  {}", view.source_url);
            println!();
            println!("{}", view.headers_html);
            println!("{}", view.body_html);
            if view.show_attachments {
                println!();
                println!("{}", view.attachments_html);
            }
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("Cannot write {:?}", path))?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}
