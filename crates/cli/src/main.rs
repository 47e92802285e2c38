//! Shelzy's Designs CLI - storefront automation tools.
//!
//! # Usage
//!
//! ```bash
//! # Inspect themes and assets
//! sz-cli theme list
//! sz-cli theme pull --key layout/theme.liquid --out theme.liquid
//!
//! # Deploy a snippet and wire it into the layout
//! sz-cli snippet deploy --name wishlist-button --file snippets/wishlist-button.liquid
//! sz-cli theme inject --snippet wishlist-button --marker "</head>" --placement before
//! sz-cli theme check --snippet wishlist-button --snippet sale-banner
//!
//! # Pages and redirects
//! sz-cli page upsert --handle faq --title "FAQ" --body-file faq.html
//! sz-cli redirect sync --file redirects.json
//!
//! # Blog maintenance
//! sz-cli blog audit-links
//! sz-cli blog fix-links
//! sz-cli blog audit-duplicates
//!
//! # Campaign packs
//! sz-cli comet validate spring-2025
//! sz-cli comet ingest spring-2025
//! ```
//!
//! # Commands
//!
//! - `theme` - List themes, pull/push/delete assets, inject/eject/check snippets
//! - `snippet deploy` - Upload a snippet, optionally injecting it
//! - `page` - List and upsert Online Store pages
//! - `redirect` - Create URL redirects one-off or in batches
//! - `product` - List and update products
//! - `blog` - Audit and repair affiliate links, find duplicate posts
//! - `comet` - Validate and ingest campaign packs

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use shelzys_core::liquid::Placement;

mod commands;

#[derive(Parser)]
#[command(name = "sz-cli")]
#[command(author, version, about = "Shelzy's Designs storefront automation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage themes, assets, and snippet wiring
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },
    /// Manage snippet files
    Snippet {
        #[command(subcommand)]
        action: SnippetAction,
    },
    /// Manage Online Store pages
    Page {
        #[command(subcommand)]
        action: PageAction,
    },
    /// Manage URL redirects
    Redirect {
        #[command(subcommand)]
        action: RedirectAction,
    },
    /// Manage products
    Product {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Blog maintenance
    Blog {
        #[command(subcommand)]
        action: BlogAction,
    },
    /// Campaign pack tools
    Comet {
        #[command(subcommand)]
        action: CometAction,
    },
}

#[derive(Subcommand)]
enum ThemeAction {
    /// List installed themes
    List,
    /// Download an asset
    Pull {
        /// Asset key (e.g. layout/theme.liquid)
        #[arg(short, long)]
        key: String,

        /// Theme ID (defaults to the published theme)
        #[arg(short, long)]
        theme: Option<i64>,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Upload an asset
    Push {
        /// Asset key (e.g. snippets/sale-banner.liquid)
        #[arg(short, long)]
        key: String,

        /// File holding the asset content
        #[arg(short, long)]
        file: PathBuf,

        /// Theme ID (defaults to the published theme)
        #[arg(short, long)]
        theme: Option<i64>,
    },
    /// Delete an asset
    Delete {
        /// Asset key to delete
        #[arg(short, long)]
        key: String,

        /// Theme ID (defaults to the published theme)
        #[arg(short, long)]
        theme: Option<i64>,
    },
    /// Wire a deployed snippet into the layout
    Inject {
        /// Snippet name (without snippets/ prefix or .liquid suffix)
        #[arg(short, long)]
        snippet: String,

        /// Anchor the render tag at this marker
        #[arg(short, long, default_value = "</head>")]
        marker: String,

        /// Place the tag before or after the marker
        #[arg(short, long, value_enum, default_value = "before")]
        placement: PlacementArg,

        /// Asset to modify; repeat for fallbacks (e.g. -k sections/cart-template.liquid
        /// -k templates/cart.liquid), first existing wins. Defaults to layout/theme.liquid
        #[arg(short, long = "key")]
        keys: Vec<String>,

        /// Theme ID (defaults to the published theme)
        #[arg(short, long)]
        theme: Option<i64>,
    },
    /// Remove a snippet reference from the layout
    Eject {
        /// Snippet name
        #[arg(short, long)]
        snippet: String,

        /// Also delete snippets/{name}.liquid from the theme
        #[arg(long)]
        delete_asset: bool,

        /// Asset to strip; repeat to sweep several. Defaults to layout/theme.liquid
        #[arg(short, long = "key")]
        keys: Vec<String>,

        /// Theme ID (defaults to the published theme)
        #[arg(short, long)]
        theme: Option<i64>,
    },
    /// Verify snippets are deployed and referenced
    Check {
        /// Snippet name to check; repeat or comma-separate for several
        #[arg(short, long = "snippet", value_delimiter = ',')]
        snippets: Vec<String>,

        /// Asset to search for references; repeat to search several.
        /// Defaults to layout/theme.liquid
        #[arg(short, long = "key")]
        keys: Vec<String>,

        /// Theme ID (defaults to the published theme)
        #[arg(short, long)]
        theme: Option<i64>,
    },
}

#[derive(Subcommand)]
enum SnippetAction {
    /// Upload a snippet file as snippets/{name}.liquid
    Deploy {
        /// Snippet name
        #[arg(short, long)]
        name: String,

        /// File holding the snippet content
        #[arg(short, long)]
        file: PathBuf,

        /// After uploading, inject a render tag into this asset
        #[arg(long, value_name = "KEY")]
        inject_into: Option<String>,

        /// Anchor for injection
        #[arg(short, long, default_value = "</head>")]
        marker: String,

        /// Place the tag before or after the marker
        #[arg(short, long, value_enum, default_value = "before")]
        placement: PlacementArg,

        /// Theme ID (defaults to the published theme)
        #[arg(short, long)]
        theme: Option<i64>,
    },
}

#[derive(Subcommand)]
enum PageAction {
    /// List pages
    List,
    /// Create or update a page by handle
    Upsert {
        /// URL handle the page is keyed on
        #[arg(long)]
        handle: String,

        /// Page title
        #[arg(long)]
        title: String,

        /// File holding the HTML body
        #[arg(short = 'f', long = "body-file")]
        body_file: PathBuf,

        /// Leave the page unpublished
        #[arg(long)]
        unpublished: bool,
    },
}

#[derive(Subcommand)]
enum RedirectAction {
    /// Create a single redirect
    Create {
        /// Old path (e.g. /collections/retired)
        #[arg(long)]
        path: String,

        /// Destination path or URL
        #[arg(long)]
        target: String,
    },
    /// Create redirects from a JSON file, skipping existing ones
    Sync {
        /// JSON file: [{"path": "...", "target": "..."}, ...]
        #[arg(short, long)]
        file: PathBuf,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// List products
    List {
        /// Only products whose title contains this text
        #[arg(long, value_name = "TEXT")]
        title_contains: Option<String>,
    },
    /// Update a product's title, body, or tags
    Update {
        /// Product ID
        #[arg(long)]
        id: i64,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// File holding the new HTML description
        #[arg(long)]
        body_file: Option<PathBuf>,

        /// New comma-separated tags (replaces existing tags)
        #[arg(long)]
        tags: Option<String>,
    },
}

#[derive(Subcommand)]
enum BlogAction {
    /// Report articles with bare or malformed Amazon links (read-only)
    AuditLinks,
    /// Repair affiliate links in all articles
    FixLinks {
        /// Associate tag (defaults to AMAZON_ASSOCIATE_TAG)
        #[arg(long)]
        tag: Option<String>,
    },
    /// Report near-duplicate articles (read-only)
    AuditDuplicates,
}

#[derive(Subcommand)]
enum CometAction {
    /// Validate a campaign pack
    Validate {
        /// Campaign slug (directory name under the packs dir)
        slug: String,

        /// Campaign packs directory
        #[arg(long, default_value = shelzys_admin::comet::DEFAULT_PACKS_DIR)]
        packs_dir: PathBuf,
    },
    /// Generate metafield mutations from a campaign pack
    Ingest {
        /// Campaign slug (directory name under the packs dir)
        slug: String,

        /// Campaign packs directory
        #[arg(long, default_value = shelzys_admin::comet::DEFAULT_PACKS_DIR)]
        packs_dir: PathBuf,
    },
}

/// CLI-facing injection placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PlacementArg {
    /// Insert the render tag before the marker
    Before,
    /// Insert the render tag after the marker
    After,
}

impl From<PlacementArg> for Placement {
    fn from(arg: PlacementArg) -> Self {
        match arg {
            PlacementArg::Before => Self::Before,
            PlacementArg::After => Self::After,
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Theme { action } => match action {
            ThemeAction::List => commands::theme::list().await?,
            ThemeAction::Pull { key, theme, out } => {
                commands::theme::pull(&key, theme, out.as_deref()).await?;
            }
            ThemeAction::Push { key, file, theme } => {
                commands::theme::push(&key, &file, theme).await?;
            }
            ThemeAction::Delete { key, theme } => {
                commands::theme::delete(&key, theme).await?;
            }
            ThemeAction::Inject {
                snippet,
                marker,
                placement,
                keys,
                theme,
            } => {
                commands::theme::inject(&snippet, &marker, placement.into(), &keys, theme).await?;
            }
            ThemeAction::Eject {
                snippet,
                delete_asset,
                keys,
                theme,
            } => {
                commands::theme::eject(&snippet, delete_asset, &keys, theme).await?;
            }
            ThemeAction::Check {
                snippets,
                keys,
                theme,
            } => {
                commands::theme::check(&snippets, &keys, theme).await?;
            }
        },
        Commands::Snippet { action } => match action {
            SnippetAction::Deploy {
                name,
                file,
                inject_into,
                marker,
                placement,
                theme,
            } => {
                commands::theme::deploy(
                    &name,
                    &file,
                    inject_into.as_deref(),
                    &marker,
                    placement.into(),
                    theme,
                )
                .await?;
            }
        },
        Commands::Page { action } => match action {
            PageAction::List => commands::page::list().await?,
            PageAction::Upsert {
                handle,
                title,
                body_file,
                unpublished,
            } => {
                commands::page::upsert(&handle, &title, &body_file, unpublished).await?;
            }
        },
        Commands::Redirect { action } => match action {
            RedirectAction::Create { path, target } => {
                commands::redirect::create(&path, &target).await?;
            }
            RedirectAction::Sync { file } => {
                commands::redirect::sync(&file).await?;
            }
        },
        Commands::Product { action } => match action {
            ProductAction::List { title_contains } => {
                commands::product::list(title_contains.as_deref()).await?;
            }
            ProductAction::Update {
                id,
                title,
                body_file,
                tags,
            } => {
                commands::product::update(id, title, body_file.as_deref(), tags).await?;
            }
        },
        Commands::Blog { action } => match action {
            BlogAction::AuditLinks => commands::blog::audit_links().await?,
            BlogAction::FixLinks { tag } => commands::blog::fix_links(tag.as_deref()).await?,
            BlogAction::AuditDuplicates => commands::blog::audit_duplicates().await?,
        },
        Commands::Comet { action } => match action {
            CometAction::Validate { slug, packs_dir } => {
                commands::comet::validate(&slug, &packs_dir)?;
            }
            CometAction::Ingest { slug, packs_dir } => {
                commands::comet::ingest(&slug, &packs_dir)?;
            }
        },
    }
    Ok(())
}
