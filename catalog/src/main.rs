use std::time::Duration;

use catalog::logging::init_tracing;
use catalog::{Dependencies, ServiceError, Settings};
use catalog_repository::{
    BulkOrder, CallContext, CancellationToken, IdsRequest, PageRequest, SearchRequest,
};
use catalog_shared::Product;
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "catalog")]
#[command(about = "Store, fetch and search products in the catalog index", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Search backend URL (overrides DATABASE_URL)
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// Index name (overrides CATALOG_INDEX)
    #[arg(long, global = true)]
    index: Option<String>,

    /// Give up on the command after this many seconds
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// Create the index with its mappings before running the command
    #[arg(long, global = true)]
    create_index: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Store a product, replacing any product with the same id
    Put {
        id: String,
        name: String,
        description: String,
        price: f64,
    },
    /// Fetch one product by id
    Get { id: String },
    /// List a page of products
    List {
        #[arg(long, default_value = "0")]
        skip: u64,
        #[arg(long, default_value = "20")]
        take: u64,
    },
    /// Fetch the products for a set of ids, dropping the missing ones
    Ids {
        #[arg(required = true)]
        ids: Vec<String>,
        /// Return products in the order the ids were given
        #[arg(long)]
        requested_order: bool,
    },
    /// Full-text search over name and description
    Search {
        query: String,
        #[arg(long, default_value = "0")]
        skip: u64,
        #[arg(long, default_value = "20")]
        take: u64,
    },
    /// Check that the backend answers
    Health,
    /// Create the index with its mappings if it does not exist
    EnsureIndex,
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        error!(error = %e, "Command failed");
        eprintln!("error: {}", e);
        let mut source = std::error::Error::source(&e);
        while let Some(cause) = source {
            eprintln!("  caused by: {}", cause);
            source = cause.source();
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), ServiceError> {
    let mut settings = Settings::from_env()?;
    init_tracing(settings.log_format);

    if let Some(url) = cli.database_url {
        settings.database_url = url;
    }
    if let Some(index) = cli.index {
        settings.index = index;
    }

    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, cancelling");
            signal_token.cancel();
        }
    });

    let deps = Dependencies::new(&settings, &shutdown).await?;

    let mut ctx = CallContext::with_token(shutdown.child_token());
    if let Some(secs) = cli.timeout_secs {
        ctx = ctx.with_timeout(Duration::from_secs(secs));
    }

    let result = execute(&deps, &ctx, cli.create_index, cli.command).await;
    deps.repository.close();

    let output = result?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn execute(
    deps: &Dependencies,
    ctx: &CallContext,
    create_index: bool,
    command: Commands,
) -> Result<Value, ServiceError> {
    let repository = &deps.repository;

    if create_index {
        ctx.run(deps.store.ensure_index_exists()).await?;
    }

    let output = match command {
        Commands::Put {
            id,
            name,
            description,
            price,
        } => {
            let product = Product::new(id, name, description, price);
            repository.put_product(ctx, &product).await?;
            info!(id = %product.id, "Product stored");
            serde_json::to_value(&product)?
        }
        Commands::Get { id } => {
            let product = repository
                .get_product_by_id(ctx, &id)
                .await?
                .into_result(format!("product {}", id))?;
            serde_json::to_value(&product)?
        }
        Commands::List { skip, take } => {
            let products = repository
                .list_products(ctx, PageRequest::new(skip, take))
                .await?;
            serde_json::to_value(&products)?
        }
        Commands::Ids {
            ids,
            requested_order,
        } => {
            let order = if requested_order {
                BulkOrder::Requested
            } else {
                BulkOrder::Backend
            };
            let products = repository
                .list_products_with_ids(ctx, IdsRequest::new(ids).with_order(order))
                .await?;
            serde_json::to_value(&products)?
        }
        Commands::Search { query, skip, take } => {
            let products = repository
                .search_products(ctx, &SearchRequest::new(query, skip, take))
                .await?;
            serde_json::to_value(&products)?
        }
        Commands::Health => {
            let healthy = repository.health_check(ctx).await?;
            json!({ "healthy": healthy })
        }
        Commands::EnsureIndex => {
            ctx.run(deps.store.ensure_index_exists()).await?;
            json!({ "index": deps.store.index_name(), "ready": true })
        }
    };

    Ok(output)
}
