use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use movie_rpc::movie::{GetMovieDetailResponse, SearchMovieResponse};
use movie_rpc::MovieClient;
use std::time::Instant;
use tracing::{debug, info};

/// movie-cli - query the movie gateway over gRPC
#[derive(Parser)]
#[command(name = "movie-cli")]
#[command(about = "Search OMDb titles through the movie gateway", long_about = None)]
struct Cli {
    /// Address of the gateway's gRPC listener
    #[arg(short, long, default_value = "http://localhost:50051")]
    addr: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for movies by title
    Search {
        /// Phrase to search for, as you would type it
        #[arg(long)]
        title: String,

        /// Result page (pages hold 10 results; 0 or less means the first)
        #[arg(long, default_value = "1")]
        page: i32,
    },

    /// Show the full record of a title
    Detail {
        /// IMDb identifier, e.g. tt0371746
        #[arg(long)]
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    info!("Connecting to movie gateway at {}", cli.addr);
    let client = MovieClient::connect(cli.addr.clone())
        .await
        .with_context(|| format!("Failed to reach the movie gateway at {}", cli.addr))?;

    match cli.command {
        Commands::Search { title, page } => handle_search(client, title, page).await?,
        Commands::Detail { id } => handle_detail(client, id).await?,
    }

    Ok(())
}

/// Handle the 'search' command
async fn handle_search(mut client: MovieClient, title: String, page: i32) -> Result<()> {
    debug!("Searching '{}' (page {}) via {}", title, page, client.service_address());
    let start = Instant::now();
    let response = client
        .search(title.clone(), page)
        .await
        .with_context(|| format!("Search for '{}' failed", title))?;

    info!("Search returned {} of {} results", response.results.len(), response.total);
    print_search(&title, &response);
    println!("{} {:?}", "✓".green(), start.elapsed());
    Ok(())
}

/// Handle the 'detail' command
async fn handle_detail(mut client: MovieClient, id: String) -> Result<()> {
    debug!("Fetching detail for {} via {}", id, client.service_address());
    let detail = client
        .detail(id.clone())
        .await
        .with_context(|| format!("Lookup of {} failed", id))?;

    print_detail(&detail);
    Ok(())
}

fn print_search(title: &str, response: &SearchMovieResponse) {
    println!(
        "{}",
        format!("Search results for '{}' ({} total):", title, response.total)
            .bold()
            .blue()
    );
    for (i, movie) in response.results.iter().enumerate() {
        println!(
            "{}. {} ({}) [{}] {}",
            (i + 1).to_string().green(),
            movie.title,
            movie.year,
            movie.r#type,
            movie.imdb_id.dimmed()
        );
    }
}

fn print_detail(detail: &GetMovieDetailResponse) {
    println!(
        "{}",
        format!("{} ({})", detail.title, detail.year).bold().blue()
    );

    let fields = [
        ("IMDb ID", &detail.imdb_id),
        ("Type", &detail.r#type),
        ("Rated", &detail.rated),
        ("Released", &detail.released),
        ("Runtime", &detail.runtime),
        ("Genre", &detail.genre),
        ("Director", &detail.director),
        ("Writer", &detail.writer),
        ("Actors", &detail.actors),
        ("Language", &detail.language),
        ("Country", &detail.country),
        ("Awards", &detail.awards),
        ("Box office", &detail.box_office),
        ("Production", &detail.production),
        ("Website", &detail.website),
    ];
    for (label, value) in fields {
        if !value.is_empty() {
            println!("{}{}: {}", "• ".green(), label, value);
        }
    }

    if !detail.ratings.is_empty() {
        println!("Ratings:");
        for rating in &detail.ratings {
            println!("  - {}: {}", rating.source, rating.value);
        }
    }
    println!(
        "{}IMDb rating: {} ({} votes), Metascore: {}",
        "• ".cyan(),
        detail.imdb_rating,
        detail.imdb_votes,
        detail.metascore
    );

    if !detail.plot.is_empty() {
        println!();
        println!("{}", detail.plot);
    }
}
