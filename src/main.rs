//! CLI entry point for folio

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "folio")]
#[command(version = "0.1.0")]
#[command(about = "A markdown page CMS built from front-matter component blocks", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new Folio site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new blank page
    New {
        /// Title of the new page
        title: String,

        /// Slug of the new page (defaults to the slugified title)
        #[arg(short, long)]
        slug: Option<String>,
    },

    /// Parse a document and print the page record
    Parse {
        /// Markdown document to parse
        file: PathBuf,

        /// Slug to assign (defaults to one derived from the file name)
        #[arg(short, long)]
        slug: Option<String>,
    },

    /// Import the content directory into the page store
    Import,

    /// List site information
    List {
        /// Type of content to list (page, block)
        #[arg(default_value = "page")]
        r#type: String,
    },

    /// Show how a page resolves into blocks
    Show {
        /// Slug of the page
        slug: String,

        /// View the page as a signed-in user with this role
        #[arg(short, long)]
        role: Option<String>,

        /// Print the rendered HTML instead of the block list
        #[arg(long)]
        html: bool,
    },

    /// Write an article about a topic into a new page
    Write {
        /// Topic of the article
        topic: String,

        /// Writing style
        #[arg(long, default_value = "Professional")]
        style: String,

        /// Slug of the page (defaults to the slugified topic)
        #[arg(short, long)]
        slug: Option<String>,
    },

    /// Append a block with generated props to a page
    Block {
        /// Slug of the page
        slug: String,

        /// Block type (hero, features, contact-form, admin-panel, text-block)
        kind: String,

        /// What the block should be about
        description: String,
    },

    /// Delete a page from the store
    Delete {
        /// Slug of the page
        slug: String,
    },

    /// Export public pages as static files
    #[command(alias = "g")]
    Generate,

    /// Start a local server
    #[command(alias = "s")]
    Server {
        /// Port to listen on (defaults to the configured port)
        #[arg(short, long)]
        port: Option<u16>,

        /// IP address to bind to (defaults to the configured address)
        #[arg(short, long)]
        ip: Option<String>,

        /// Re-import content when documents change
        #[arg(short, long)]
        watch: bool,
    },

    /// Reset the page store to the built-in pages
    Reset,

    /// Clean the public folder
    Clean,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "folio=debug,info"
    } else {
        "folio=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing Folio site in {:?}", target_dir);
            folio::commands::init::init_site(&target_dir)?;
            println!("Initialized Folio site in {:?}", target_dir);
        }

        Commands::New { title, slug } => {
            let folio = folio::Folio::new(&base_dir)?;
            tracing::info!("Creating new page with title: {}", title);
            folio::commands::new::create_page(&folio, &title, slug.as_deref())?;
        }

        Commands::Parse { file, slug } => {
            let path = if file.is_absolute() {
                file
            } else {
                base_dir.join(file)
            };
            folio::commands::parse::run(&path, slug.as_deref())?;
        }

        Commands::Import => {
            let folio = folio::Folio::new(&base_dir)?;
            let count = folio.import()?;
            println!("Imported {} pages", count);
        }

        Commands::List { r#type } => {
            let folio = folio::Folio::new(&base_dir)?;
            folio::commands::list::run(&folio, &r#type)?;
        }

        Commands::Show { slug, role, html } => {
            let folio = folio::Folio::new(&base_dir)?;
            folio::commands::show::run(&folio, &slug, role.as_deref(), html)?;
        }

        Commands::Write { topic, style, slug } => {
            let folio = folio::Folio::new(&base_dir)?;
            tracing::info!("Writing a {} article about: {}", style, topic);
            folio::commands::write::run(&folio, &topic, &style, slug.as_deref()).await?;
        }

        Commands::Block {
            slug,
            kind,
            description,
        } => {
            let folio = folio::Folio::new(&base_dir)?;
            folio::commands::block::run(&folio, &slug, &kind, &description).await?;
        }

        Commands::Delete { slug } => {
            let folio = folio::Folio::new(&base_dir)?;
            folio::commands::delete::run(&folio, &slug)?;
        }

        Commands::Generate => {
            let folio = folio::Folio::new(&base_dir)?;
            tracing::info!("Generating static files...");
            folio.generate()?;
            println!("Generated successfully!");
        }

        Commands::Server { port, ip, watch } => {
            let folio = folio::Folio::new(&base_dir)?;
            let port = port.unwrap_or(folio.config.server.port);
            let ip = ip.unwrap_or_else(|| folio.config.server.ip.clone());

            if watch {
                folio.import()?;
            }

            tracing::info!("Starting server at http://{}:{}", ip, port);
            folio::server::start(&folio, &ip, port, watch).await?;
        }

        Commands::Reset => {
            let folio = folio::Folio::new(&base_dir)?;
            folio::commands::reset::run(&folio)?;
            println!("Page store reset");
        }

        Commands::Clean => {
            let folio = folio::Folio::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            folio.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("folio version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
