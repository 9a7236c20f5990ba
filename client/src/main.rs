//! LiveMART purchase CLI
//!
//! Drives the wholesale purchase page from a terminal: browse wholesaler
//! inventory, preview retail prices and place purchase orders.

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use shared::{
    format_amount, DashboardStats, PricePreview, ProductListView, ProductQuery, SessionUser, UserRole,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use livemart_client::{
    CatalogService, Config, MarketplaceApi, MarketplaceClient, PurchaseService,
    WholesalePurchasePage,
};

/// LiveMART wholesale purchase client
#[derive(Parser, Debug)]
#[command(name = "livemart-purchase")]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration environment (loads config/<ENV>.toml)
    #[arg(short, long, value_name = "ENV")]
    env: Option<String>,

    /// Override the backend base URL
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Act as this user instead of the configured session user
    #[arg(short, long, value_name = "ID")]
    user_id: Option<String>,

    /// Run in verbose mode (debug logging)
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List wholesaler products available to buy
    List {
        /// Filter by name or description
        #[arg(short, long)]
        search: Option<String>,

        /// Filter by category id
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Buy a product from its wholesaler
    Buy {
        /// Product id
        #[arg(short, long)]
        product: String,

        /// Units to order
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,

        /// Markup percentage applied when reselling (0-100)
        #[arg(short, long)]
        markup: Option<Decimal>,
    },

    /// Preview the retail price for a wholesale price and markup
    Preview {
        #[arg(short, long)]
        price: Decimal,

        #[arg(short, long, default_value = "20")]
        markup: Decimal,

        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },

    /// Check backend health and that the purchase route is reachable
    Health,

    /// Show the retailer dashboard
    Dashboard,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let default_filter = if args.verbose {
        "livemart_client=debug,livemart_purchase=debug"
    } else {
        "livemart_client=info,livemart_purchase=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let mut config = match &args.env {
        Some(env) => Config::load_for(env),
        None => Config::load(),
    }
    .context("Failed to load configuration")?;

    if let Some(base_url) = args.base_url {
        config.api.base_url = base_url;
    }
    if let Some(user_id) = args.user_id {
        config.session.user_id = user_id;
    }

    tracing::debug!("Environment: {}", config.environment);

    let api: Arc<dyn MarketplaceApi> = Arc::new(MarketplaceClient::new(&config.api)?);

    match args.command {
        Command::Preview {
            price,
            markup,
            quantity,
        } => {
            print_preview(&PricePreview::compute(price, markup, quantity));
        }
        Command::List { search, category } => {
            let session = require_session(&config)?;
            let mut query = ProductQuery::available();
            if let Some(search) = search {
                query = query.with_search(search);
            }
            if let Some(category) = category {
                query = query.with_category(category);
            }

            let products = CatalogService::new(api).search_for(&session, &query).await?;
            if products.is_empty() {
                println!("No products available from wholesalers.");
            }
            for product in &products {
                println!(
                    "{:<16} {:<28} {:>10} {:>6} in stock  (seller {})",
                    product.id,
                    product.name,
                    format_amount(product.price),
                    product.stock,
                    product.seller_id
                );
            }
        }
        Command::Buy {
            product,
            quantity,
            markup,
        } => {
            let session = require_session(&config)?;
            let mut page = WholesalePurchasePage::new(api, session, config.purchase.clone());
            page.mount().await;

            if matches!(page.list_view(), ProductListView::Empty) {
                for notification in page.take_notifications() {
                    eprintln!("{}", notification.message);
                }
                bail!("No products available from wholesalers");
            }

            page.select_product(&product)?;
            page.set_quantity(quantity);
            if let Some(markup) = markup {
                page.set_markup_percent(markup);
            }
            if let Some(modal) = page.modal_view() {
                println!("{} x{}", modal.product_name, modal.quantity);
                print_preview(&modal.preview);
            }

            let result = page.submit().await;
            for notification in page.take_notifications() {
                if notification.is_error() {
                    eprintln!("{}", notification.message);
                } else {
                    println!("{}", notification.message);
                }
            }
            if let Err(e) = result {
                bail!("Purchase failed ({})", e.category());
            }

            if let Some(route) = page.follow_navigation().await {
                println!("-> {}", route);
                if let Some(stats) = page.dashboard_summary().await {
                    print_stats(&stats);
                }
            }
        }
        Command::Health => {
            let health = api.health().await?;
            println!("Backend: {} (database {})", health.status, health.database);
            if let Some(error) = health.error {
                println!("  error: {}", error);
            }

            let mut page = WholesalePurchasePage::new(
                api,
                config.session_user(),
                config.purchase.clone(),
            );
            page.check_order_service().await;
            for notification in page.take_notifications() {
                println!("Purchase route: {}", notification.message);
            }
        }
        Command::Dashboard => {
            let session = require_session(&config)?;
            let stats = PurchaseService::new(api).dashboard(&session.id).await?;
            print_stats(&stats);
        }
    }

    Ok(())
}

/// Session user from config, required by every command that talks to the backend
fn require_session(config: &Config) -> Result<SessionUser> {
    let session = config.session_user();
    if session.id.is_empty() {
        bail!("No session user configured; set session.user_id or pass --user-id");
    }
    if session.role != UserRole::Retailer {
        tracing::warn!(role = %session.role, "Wholesale purchases are meant for retailers");
    }
    Ok(session)
}

fn print_stats(stats: &DashboardStats) {
    println!(
        "Products: {}  Orders: {}  Revenue: {}",
        stats.products_count,
        stats.orders_count,
        format_amount(stats.total_revenue)
    );
}

fn print_preview(preview: &PricePreview) {
    println!("  Wholesale price: {}", preview.wholesale_price);
    println!("  Markup:          {}%", preview.markup_percent);
    println!("  Retail price:    {}", preview.retail_price);
    println!("  Order total:     {}", preview.order_total);
    println!("  Expected profit: {}", preview.expected_profit);
}
