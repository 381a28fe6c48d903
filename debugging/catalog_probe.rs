//! Query the catalog the way the views do and print what comes back.
//! Usage:
//!   cargo run --bin catalog_probe -- popular
//!   cargo run --bin catalog_probe -- search <query>
//!   cargo run --bin catalog_probe -- movie <id>
//! Uses TMDB_API_KEY from the environment (.env supported); without it the
//! built-in catalog is printed.

use anyhow::{anyhow, Result};
use cinelist::catalog::{Catalog, FIRST_PAGE};
use cinelist::config::Config;
use cinelist::format::{format_date, format_rating};
use dotenvy::dotenv;
use serde_json::json;
use std::env;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("warn"))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let config = Config::from_env()?;
    let catalog = Catalog::from_config(&config)?;
    eprintln!(
        "catalog: {}",
        if catalog.is_live() { config.base_url.as_str() } else { "built-in" }
    );

    match args.first().map(String::as_str) {
        Some("popular") => {
            for movie in catalog.list_popular(FIRST_PAGE).await {
                println!(
                    "{}",
                    json!({
                        "id": movie.id,
                        "title": movie.title,
                        "rating": format_rating(movie.vote_average),
                        "released": format_date(movie.release_date.as_deref()),
                    })
                );
            }
        }
        Some("search") => {
            let query = args[1..].join(" ");
            for movie in catalog.search(&query, FIRST_PAGE).await {
                println!("{}\t{}", movie.id, movie.title);
            }
        }
        Some("movie") => {
            let id = args.get(1).ok_or_else(|| anyhow!("movie requires an id"))?;
            let detail = catalog.get_by_id(id).await;
            println!("{}", serde_json::to_string_pretty(&detail)?);
        }
        _ => return Err(anyhow!("usage: catalog_probe popular | search <query> | movie <id>")),
    }
    Ok(())
}
