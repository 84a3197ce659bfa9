use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};

use movie_finder::{
    services::{
        providers::{HttpBackend, RecommenderBackend},
        AutocompleteWidget, Recommender, TitleCatalog,
    },
    telemetry, Config,
};

/// movie-finder - autocomplete and recommendations from the movie site backend
#[derive(Parser)]
#[command(name = "movie-finder")]
#[command(about = "Title autocomplete and recommendation client", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print catalog titles containing the input (case-insensitive)
    Complete {
        input: String,
    },

    /// Build the recommendation page for a title
    Recommend {
        title: String,

        /// Write the rendered HTML here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip the catalog check, as when following a recommended title
        #[arg(long)]
        unchecked: bool,
    },

    /// Line-driven autocomplete: type to filter, `:N` to pick, `:go` to search, `:q` to quit
    Interactive {
        /// Write the rendered HTML here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// One line of interactive input
#[derive(Debug, PartialEq, Eq)]
enum WidgetCommand {
    Input(String),
    Select(usize),
    Search,
    Quit,
}

impl WidgetCommand {
    fn parse(line: &str) -> Self {
        match line {
            ":q" => WidgetCommand::Quit,
            ":go" => WidgetCommand::Search,
            _ => match line.strip_prefix(':').and_then(|n| n.parse::<usize>().ok()) {
                Some(n) if n > 0 => WidgetCommand::Select(n - 1),
                _ => WidgetCommand::Input(line.to_string()),
            },
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init_tracing();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let backend: Arc<dyn RecommenderBackend> =
        Arc::new(HttpBackend::new(&config).context("Failed to build HTTP client")?);

    match cli.command {
        Commands::Complete { input } => handle_complete(backend, &input).await,
        Commands::Recommend {
            title,
            output,
            unchecked,
        } => handle_recommend(backend, &config, &title, output.as_deref(), unchecked).await,
        Commands::Interactive { output } => {
            handle_interactive(backend, &config, output.as_deref()).await
        }
    }
}

/// Handle the 'complete' command
async fn handle_complete(backend: Arc<dyn RecommenderBackend>, input: &str) -> Result<()> {
    let catalog = TitleCatalog::load(backend.as_ref()).await;
    for title in catalog.matches(input) {
        println!("{}", title);
    }
    Ok(())
}

/// Handle the 'recommend' command
async fn handle_recommend(
    backend: Arc<dyn RecommenderBackend>,
    config: &Config,
    title: &str,
    output: Option<&Path>,
    unchecked: bool,
) -> Result<()> {
    let recommender = Recommender::new(backend.clone(), config);

    let html = if unchecked {
        recommender.recommend(title).await?
    } else {
        let catalog = TitleCatalog::load(backend.as_ref()).await;
        recommender.search(&catalog, title).await?
    };

    write_html(&html, output).await
}

/// Handle the 'interactive' command
async fn handle_interactive(
    backend: Arc<dyn RecommenderBackend>,
    config: &Config,
    output: Option<&Path>,
) -> Result<()> {
    let recommender = Recommender::new(backend.clone(), config);
    let mut widget = AutocompleteWidget::new(TitleCatalog::load(backend.as_ref()).await);
    eprintln!("{} titles loaded", widget.catalog().len());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match WidgetCommand::parse(line.trim_end()) {
            WidgetCommand::Quit => break,
            WidgetCommand::Input(text) => {
                for (i, title) in widget.on_input(&text).iter().enumerate() {
                    println!("{:>3}. {}", i + 1, title);
                }
            }
            WidgetCommand::Select(index) => match widget.select(index) {
                Some(title) => println!("> {}", title),
                None => eprintln!("No suggestion {}", index + 1),
            },
            WidgetCommand::Search => {
                let title = widget.input().to_string();
                let result = recommender.search(widget.catalog(), &title).await;
                match result {
                    Ok(html) => {
                        write_html(&html, output).await?;
                        widget.clear_input();
                    }
                    Err(e) if e.is_not_found() => eprintln!("{}", e),
                    Err(e) => eprintln!("Recommendation failed: {}", e),
                }
            }
        }
    }

    Ok(())
}

async fn write_html(html: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => tokio::fs::write(path, html)
            .await
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            println!("{}", html);
            Ok(())
        }
    }
}
