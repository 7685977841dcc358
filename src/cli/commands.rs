use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::time::Duration;

use crate::api::ApiClient;
use crate::board::OrdersBoard;
use crate::cli::error::{user_error, validate_order_query};
use crate::cli::output::{
    format_metrics, format_order_card, format_orders_board, format_status_line, is_tty,
};
use crate::cli::watch;
use crate::config::Config;
use crate::infer::stage_to_confirm;
use crate::models::{Order, Stage};

/// How long the backend gets to settle before the reconciling refetch
/// that follows a confirmed stage.
const SETTLE_DELAY: Duration = Duration::from_secs(2);

#[derive(Parser)]
#[command(name = "brasa")]
#[command(about = "Brasa - terminal dashboard for restaurant order fulfillment")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the metrics overview
    Dashboard {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
    /// Show the active-orders board once
    Orders {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
    /// Show the board and keep it refreshed
    Watch {
        /// Refresh interval in seconds (default from config, 10s)
        #[arg(long)]
        interval: Option<u64>,
    },
    /// Confirm the pending stage for an order
    Confirm {
        /// Order id, full or the short suffix shown on cards
        order_id: String,
        /// Confirm without prompting
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// One-line board summary
    Status,
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load();
    let client = ApiClient::new(config.clone()).context("Failed to build HTTP client")?;

    match cli.command {
        Commands::Dashboard { json } => handle_dashboard(&client, json).await,
        Commands::Orders { json } => handle_orders(&client, json).await,
        Commands::Watch { interval } => {
            let poll_secs = interval.unwrap_or(config.poll_secs);
            watch::run_watch(&client, poll_secs).await
        }
        Commands::Confirm { order_id, yes } => handle_confirm(&client, order_id, yes).await,
        Commands::Status => handle_status(&client).await,
    }
}

async fn handle_dashboard(client: &ApiClient, json: bool) -> Result<()> {
    let metrics = client
        .fetch_metrics()
        .await
        .context("Failed to load dashboard metrics")?;

    if json {
        let dashboard_json = serde_json::json!({
            "by_status": {
                "created": metrics.by_status.created,
                "cooking": metrics.by_status.cooking,
                "packaging": metrics.by_status.packaging,
                "delivery": metrics.by_status.delivery,
                "delivered": metrics.by_status.delivered,
                "completed": metrics.by_status.completed,
                "in_progress": metrics.by_status.in_progress,
            },
            "active_orders": metrics.active_orders(),
            "completion_rate_pct": metrics.completion_rate(),
            "stage_minutes": {
                "cooking": metrics.stage_times.cooking,
                "packaging": metrics.stage_times.packaging,
                "delivery": metrics.stage_times.delivery,
            },
            "weekly_orders": metrics.weekly_orders,
            "top_products": metrics.popular_products.iter().map(|p| {
                serde_json::json!({
                    "product": p.producto,
                    "count": p.cantidad,
                })
            }).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&dashboard_json)?);
    } else {
        print!("{}", format_metrics(&metrics, is_tty()));
    }
    Ok(())
}

async fn handle_orders(client: &ApiClient, json: bool) -> Result<()> {
    let page = client
        .fetch_active_orders()
        .await
        .context("Failed to load orders")?;

    if json {
        let orders_json = serde_json::json!({
            "total": page.total,
            "orders": page.pedidos.iter().map(order_json).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&orders_json)?);
    } else {
        print!("{}", format_orders_board(&page.pedidos, is_tty()));
    }
    Ok(())
}

fn order_json(order: &Order) -> serde_json::Value {
    serde_json::json!({
        "order_id": order.order_id,
        "short_id": order.short_id(),
        "customer_id": order.customer_id,
        "status": order.status.as_str(),
        "created_at": order.created_at,
        "total": order.total,
        "items": order.items.iter().map(|item| {
            serde_json::json!({
                "product_id": item.product_id,
                "unit_price": item.unit_price(),
                "qty": item.quantity(),
                "notes": item.notes,
            })
        }).collect::<Vec<_>>(),
        "stage_to_confirm": stage_to_confirm(&order.stages).map(|s| s.as_str()),
    })
}

async fn handle_status(client: &ApiClient) -> Result<()> {
    let metrics = client
        .fetch_metrics()
        .await
        .context("Failed to load dashboard metrics")?;
    println!("{}", format_status_line(&metrics));
    Ok(())
}

async fn handle_confirm(client: &ApiClient, order_query: String, yes: bool) -> Result<()> {
    if let Err(msg) = validate_order_query(&order_query) {
        user_error(&msg);
    }

    let page = client
        .fetch_active_orders()
        .await
        .context("Failed to load orders")?;

    let mut board = OrdersBoard::new();
    let ticket = board.begin_fetch();
    board.apply_fetch(ticket, page.pedidos);

    let matches = board.find(&order_query);
    let order = match matches.len() {
        0 => user_error(&format!(
            "Order '{}' not found on the active board",
            order_query
        )),
        1 => (*matches[0]).clone(),
        _ => {
            let ids: Vec<String> = matches.iter().map(|o| o.short_id()).collect();
            user_error(&format!(
                "Order id '{}' is ambiguous; matches: {}",
                order_query,
                ids.join(", ")
            ));
        }
    };
    let order_id = order.order_id.clone();

    let stage = match stage_to_confirm(&order.stages) {
        None => {
            println!(
                "Order #{} has every stage confirmed; nothing to do.",
                order.short_id()
            );
            return Ok(());
        }
        Some(Stage::Delivered) => {
            println!(
                "Order #{} is awaiting delivery confirmation; that arrives from the delivery channel, not from here.",
                order.short_id()
            );
            return Ok(());
        }
        Some(stage) => stage,
    };

    if !yes && !prompt_confirmation(&format!("Confirm {} for order #{}?", stage.label(), order.short_id()))? {
        println!("Aborted.");
        return Ok(());
    }

    // One outstanding confirmation per order
    if !board.begin_confirm(&order_id) {
        user_error(&format!(
            "A confirmation for order #{} is already in flight",
            order.short_id()
        ));
    }

    match client.confirm_stage(&order_id, stage).await {
        Ok(()) => {
            board.finish_confirm(&order_id);
            board.apply_confirmation(&order_id, stage);
            println!("Confirmed {} for order #{}.", stage.label(), order.short_id());
        }
        Err(e) => {
            // Board state untouched; the card keeps its previous stage
            board.finish_confirm(&order_id);
            return Err(e).context(format!(
                "Failed to confirm {} for order #{}",
                stage.label(),
                order.short_id()
            ));
        }
    }

    // Give the backend time to settle, then reconcile with its view
    tokio::time::sleep(SETTLE_DELAY).await;
    let ticket = board.begin_fetch();
    match client.fetch_active_orders().await {
        Ok(page) => {
            board.apply_fetch(ticket, page.pedidos);
            match board.find(&order_id).first() {
                Some(order) => print!("\n{}", format_order_card(order, false, is_tty())),
                None => println!("Order #{} left the active board.", crate::models::short_id(&order_id)),
            }
        }
        Err(e) => {
            // The confirmation itself succeeded; reconciliation can wait
            println!("Could not refresh the board afterwards: {}", e);
        }
    }
    Ok(())
}

fn prompt_confirmation(question: &str) -> Result<bool> {
    print!("{} [y/N] ", question);
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin()
        .read_line(&mut answer)
        .context("Failed to read confirmation")?;
    let answer = answer.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}
