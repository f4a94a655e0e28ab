use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use pz_core::{pretty_date, ReviewSummary};
use pz_reviews::{summarize_document, DocumentFetcher, FileFetcher, HttpFetcher};
use pz_search::{config::DEFAULT_API_BASE, BusinessSearch, SearchClient, SearchConfig};
use pz_web::{AppState, WebConfig};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "pizza", author, version, about = "Find a pizzeria and summarise its latest reviews")]
pub struct Cli {
    /// Log debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone)]
pub struct Credentials {
    #[arg(long, env = "PIZZA_CLIENT_ID")]
    pub client_id: String,
    #[arg(long, env = "PIZZA_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: String,
    #[arg(long, env = "PIZZA_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,
}

impl Credentials {
    fn search_config(&self) -> SearchConfig {
        SearchConfig::new(&self.client_id, &self.client_secret).with_api_base(&self.api_base)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the search form
    Serve {
        #[arg(long, env = "PIZZA_BIND", default_value = "127.0.0.1:5000")]
        bind: SocketAddr,
        #[command(flatten)]
        credentials: Credentials,
    },
    /// Look up a pizzeria's review page
    Find {
        name: String,
        #[command(flatten)]
        credentials: Credentials,
    },
    /// Summarise the newest reviews on a page
    Reviews {
        /// Page URL, or a file path with --file
        location: String,
        /// Read a saved page from disk instead of fetching it
        #[arg(long)]
        file: bool,
        #[arg(short, long, default_value_t = 5)]
        count: usize,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

pub async fn handle_command(command: Commands) -> Result<()> {
    match command {
        Commands::Serve { bind, credentials } => {
            let state = AppState {
                search: Arc::new(SearchClient::new(credentials.search_config())),
                fetcher: Arc::new(HttpFetcher::new()?),
                config: WebConfig::default(),
            };
            pz_web::serve(bind, state).await.context("web server stopped")?;
        }
        Commands::Find { name, credentials } => {
            let client = SearchClient::new(credentials.search_config());
            let found = client
                .find_business(&name)
                .await
                .with_context(|| format!("searching for {:?}", name))?;
            match found {
                Some(business) => println!("🍕 {} - {}", business.name, business.url),
                None => println!("No pizzeria found for {:?}", name),
            }
        }
        Commands::Reviews { location, file, count, json } => {
            let fetcher: Box<dyn DocumentFetcher> = if file {
                Box::new(FileFetcher::default())
            } else {
                Box::new(HttpFetcher::new()?)
            };
            info!("📰 Summarising {} newest reviews from {}", count, location);
            let summary = summarize_document(fetcher.as_ref(), &location, count)
                .await
                .with_context(|| format!("summarising {}", location))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{}", render_summary(&summary));
            }
        }
    }
    Ok(())
}

pub fn render_summary(summary: &ReviewSummary) -> String {
    let mut out = match summary.average_rating {
        Some(average) => format!("⭐ Average rating: {:.2}\n", average),
        None => "⭐ Average rating: n/a\n".to_string(),
    };
    for review in &summary.reviews {
        let date = review.date.map(pretty_date).unwrap_or_else(|| "????-??-??".to_string());
        let rating = review
            .rating
            .map(|r| format!("{:.1}", r))
            .unwrap_or_else(|| "-".to_string());
        let author = review.author.as_deref().unwrap_or("anonymous");
        out.push_str(&format!("{} {} {}: {}\n", date, rating, author, review.content));
    }
    out
}
