use std::error::Error;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use clap::Parser;
use log::{debug, info};

use store_search::handlers::compute_layout;
use store_search::utils::{artist_line, truncate_string};
use store_search::{
    HttpStore, MalformedItemPolicy, SearchConfig, SearchSession, SearchState, ThumbnailDownloads,
};

const NETWORK_ERROR_MESSAGE: &str =
    "There was an error reading from the iTunes Store. Please try again.";

#[derive(Parser)]
#[command(name = "store-search")]
#[command(version, about = "Search the iTunes Store and lay results out on paged grids", long_about = None)]
struct Cli {
    /// Search term
    term: String,

    /// Viewport width used to pick the grid layout (568, 667, 736; anything else uses the default grid)
    #[arg(long, default_value_t = 480.0)]
    width: f64,

    /// Maximum number of results to request
    #[arg(long)]
    limit: Option<u32>,

    /// Fail the whole search when one result is malformed
    #[arg(long)]
    abort_on_malformed: bool,

    /// Download small artwork for every result
    #[arg(long)]
    thumbnails: bool,

    /// Print results as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        info!("Shutting down...");
        r.store(false, Ordering::SeqCst);
    })?;

    let mut config = SearchConfig::from_env()?;
    if let Some(limit) = cli.limit {
        config.limit = limit;
    }
    if cli.abort_on_malformed {
        config.malformed_items = MalformedItemPolicy::Abort;
    }
    let wait_limit = config.timeout + config.retry_window + Duration::from_secs(5);

    let store = Arc::new(HttpStore::new(&config)?);
    let mut session = SearchSession::new(store.clone(), config);
    session.submit(&cli.term)?;

    if !session.wait_while(wait_limit, || running.load(Ordering::SeqCst)) {
        if !running.load(Ordering::SeqCst) {
            return Ok(());
        }
        return Err("search did not finish in time".into());
    }

    let results = match session.state() {
        SearchState::NoResults => {
            println!("Nothing Found");
            return Ok(());
        }
        SearchState::NetworkError => {
            eprintln!("Whoops... {}", NETWORK_ERROR_MESSAGE);
            std::process::exit(1);
        }
        SearchState::Results(results) => results.clone(),
        SearchState::NotSearchedYet | SearchState::Loading => return Ok(()),
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&*results)?);
    } else {
        for result in results.iter() {
            println!("{}", truncate_string(&result.name, 80));
            println!("    {}", truncate_string(&artist_line(result), 76));
        }
    }

    let plan = compute_layout(results.len(), cli.width);
    println!(
        "\n{} results on {} page(s) of {}x{} at width {}",
        results.len(),
        plan.page_count,
        plan.profile.columns_per_page,
        plan.profile.rows_per_page,
        cli.width
    );
    for tile in &plan.tiles {
        debug!(
            "tile {} -> page {} row {} column {} at ({}, {})",
            tile.index, tile.page, tile.row, tile.column, tile.x, tile.y
        );
    }

    if cli.thumbnails {
        let mut downloads = ThumbnailDownloads::new(store);
        let received = Arc::new(AtomicUsize::new(0));
        let counter = received.clone();
        let names: Vec<String> = results.iter().map(|r| r.name.clone()).collect();

        let started = downloads.start_for_results(&results, move |index, bytes| {
            match bytes {
                Ok(bytes) => {
                    counter.fetch_add(1, Ordering::SeqCst);
                    println!("artwork {:>3}: {} bytes ({})", index, bytes.len(), names[index]);
                }
                // Tile keeps its placeholder.
                Err(e) => debug!("artwork {} failed: {}", index, e),
            }
        });
        info!("Started {} artwork downloads", started);

        while downloads.pending() > 0 && running.load(Ordering::SeqCst) {
            thread::sleep(Duration::from_millis(50));
        }
        downloads.cancel_all();
        println!(
            "Downloaded {} of {} artwork images",
            received.load(Ordering::SeqCst),
            started
        );
    }

    Ok(())
}
