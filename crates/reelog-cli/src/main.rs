use chrono::NaiveDate;
use clap::{ArgAction, Parser, Subcommand};
use review_catalog_models::MediaKind;

mod commands;
mod logging;
mod output;

use commands::{add, comment, config, edit, like, list, remove, search, show, stats};
use output::{Output, OutputFormat};

fn parse_media_kind(s: &str) -> Result<MediaKind, String> {
    s.parse()
}

#[derive(Parser)]
#[command(name = "reelog")]
#[command(about = "Keep a personal catalog of movie and series reviews")]
#[command(version)]
struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "human", global = true)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a review to the catalog
    #[command(
        long_about = "Add a review to the catalog.\n\nTitle, kind, rating and the review text are prompted for when not passed\nas flags; everything else is optional. With --enrich the title is looked\nup on TMDB and the year, director and poster are filled in from the best\nmatch (explicit flags always win)."
    )]
    Add {
        /// Title of the movie or series
        title: Option<String>,

        /// movie or series
        #[arg(long, value_parser = parse_media_kind)]
        kind: Option<MediaKind>,

        /// Rating from 1.0 to 5.0
        #[arg(long)]
        rating: Option<f32>,

        /// The review text
        #[arg(long)]
        body: Option<String>,

        /// Director (or showrunner)
        #[arg(long)]
        director: Option<String>,

        /// Release year
        #[arg(long)]
        year: Option<u16>,

        /// Date you watched it (YYYY-MM-DD)
        #[arg(long)]
        date_watched: Option<NaiveDate>,

        /// Comma-separated tags
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,

        /// TMDB id of the title
        #[arg(long)]
        tmdb_id: Option<u64>,

        /// Poster or cover image URL
        #[arg(long)]
        image_url: Option<String>,

        /// Fill missing fields from TMDB
        #[arg(long, action = ArgAction::SetTrue)]
        enrich: bool,
    },

    /// List reviews
    #[command(
        long_about = "List reviews as a table.\n\nFilters combine with AND. The default order is newest first; --sort\nchanges it. Use --output json for machine-readable output."
    )]
    List {
        /// Only reviews carrying this tag
        #[arg(long)]
        tag: Option<String>,

        /// Only movies or only series
        #[arg(long, value_parser = parse_media_kind)]
        kind: Option<MediaKind>,

        /// Only reviews for this release year
        #[arg(long)]
        year: Option<u16>,

        /// Minimum rating (inclusive)
        #[arg(long)]
        min_rating: Option<f32>,

        /// Maximum rating (inclusive)
        #[arg(long)]
        max_rating: Option<f32>,

        /// Sort order
        #[arg(long, value_enum, default_value = "newest")]
        sort: list::SortOrder,

        /// Show at most this many reviews
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show one review in full
    Show {
        /// Review id
        id: String,

        /// Also fetch cast, genres and watch providers from TMDB
        #[arg(long, action = ArgAction::SetTrue)]
        details: bool,
    },

    /// Edit an existing review
    #[command(
        long_about = "Edit an existing review.\n\nOnly the fields passed as flags change; everything else keeps its\ncurrent value. Likes and comments are never touched by an edit."
    )]
    Edit {
        /// Review id
        id: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// movie or series
        #[arg(long, value_parser = parse_media_kind)]
        kind: Option<MediaKind>,

        /// New rating from 1.0 to 5.0
        #[arg(long)]
        rating: Option<f32>,

        /// New review text
        #[arg(long)]
        body: Option<String>,

        /// New director
        #[arg(long)]
        director: Option<String>,

        /// New release year
        #[arg(long)]
        year: Option<u16>,

        /// New watch date (YYYY-MM-DD)
        #[arg(long)]
        date_watched: Option<NaiveDate>,

        /// Replacement tags, comma-separated
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,

        /// New TMDB id
        #[arg(long)]
        tmdb_id: Option<u64>,

        /// New image URL
        #[arg(long)]
        image_url: Option<String>,
    },

    /// Remove a review
    Remove {
        /// Review id
        id: String,

        /// Skip the confirmation prompt
        #[arg(long, action = ArgAction::SetTrue)]
        yes: bool,
    },

    /// Like a review
    Like {
        /// Review id
        id: String,
    },

    /// Manage comments on a review
    Comment {
        #[command(subcommand)]
        command: CommentCommands,
    },

    /// Show catalog statistics
    Stats,

    /// Search TMDB for a title
    #[command(
        long_about = "Search TMDB for a title.\n\nPrints candidate matches with their TMDB ids, which 'reelog add' and\n'reelog edit' accept via --tmdb-id. Requires a configured API key."
    )]
    Search {
        /// Search query
        query: String,

        /// movie or series
        #[arg(long, value_parser = parse_media_kind, default_value = "movie")]
        kind: MediaKind,

        /// Show at most this many results
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum CommentCommands {
    /// Add a comment to a review
    Add {
        /// Review id
        id: String,

        /// Comment text (prompted for when omitted)
        text: Option<String>,
    },

    /// Remove a comment from a review
    Remove {
        /// Review id
        id: String,

        /// Comment id
        comment_id: String,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the current configuration
    Show {
        /// Show the TMDB API key unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },

    /// Set up the TMDB integration
    Tmdb {
        /// TMDB API key (prompted for when omitted)
        #[arg(long)]
        api_key: Option<String>,

        /// Metadata language, e.g. en-US
        #[arg(long)]
        language: Option<String>,

        /// Country whose watch providers to show, e.g. US
        #[arg(long)]
        country: Option<String>,

        /// Turn the integration off without deleting the stored key
        #[arg(long, action = ArgAction::SetTrue)]
        disable: bool,
    },

    /// Change catalog behaviour
    Catalog {
        /// Seed a brand-new catalog with sample reviews (true/false)
        #[arg(long)]
        seed_samples: Option<bool>,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.quiet).map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Add {
            title,
            kind,
            rating,
            body,
            director,
            year,
            date_watched,
            tags,
            tmdb_id,
            image_url,
            enrich,
        } => {
            add::run_add(
                title,
                kind,
                rating,
                body,
                director,
                year,
                date_watched,
                tags,
                tmdb_id,
                image_url,
                enrich,
                &output,
            )
            .await
        }
        Commands::List {
            tag,
            kind,
            year,
            min_rating,
            max_rating,
            sort,
            limit,
        } => list::run_list(tag, kind, year, min_rating, max_rating, sort, limit, &output).await,
        Commands::Show { id, details } => show::run_show(id, details, &output).await,
        Commands::Edit {
            id,
            title,
            kind,
            rating,
            body,
            director,
            year,
            date_watched,
            tags,
            tmdb_id,
            image_url,
        } => {
            edit::run_edit(
                id,
                title,
                kind,
                rating,
                body,
                director,
                year,
                date_watched,
                tags,
                tmdb_id,
                image_url,
                &output,
            )
            .await
        }
        Commands::Remove { id, yes } => remove::run_remove(id, yes, &output).await,
        Commands::Like { id } => like::run_like(id, &output).await,
        Commands::Comment { command } => match command {
            CommentCommands::Add { id, text } => comment::run_comment_add(id, text, &output).await,
            CommentCommands::Remove { id, comment_id } => {
                comment::run_comment_remove(id, comment_id, &output).await
            }
        },
        Commands::Stats => stats::run_stats(&output).await,
        Commands::Search { query, kind, limit } => {
            search::run_search(query, kind, limit, &output).await
        }
        Commands::Config { command } => {
            let command = command.unwrap_or(ConfigCommands::Show { full: false });
            config::run_config(command, &output).await
        }
    }
}
