// Live board: fetch on an interval, redraw in place.
//
// The loop owns every timer and in-flight request; Ctrl-C breaks out and
// drops them with it, so nothing updates state after the loop is gone.

use std::io::Write;
use std::time::Duration;

use anyhow::Result;

use crate::api::ApiClient;
use crate::board::OrdersBoard;
use crate::cli::output::{format_orders_board, is_tty};

pub async fn run_watch(client: &ApiClient, poll_secs: u64) -> Result<()> {
    let use_color = is_tty();
    let mut board = OrdersBoard::new();
    let mut interval = tokio::time::interval(Duration::from_secs(poll_secs.max(1)));
    let mut last_error: Option<String> = None;

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let ticket = board.begin_fetch();
                match client.fetch_active_orders().await {
                    Ok(page) => {
                        board.apply_fetch(ticket, page.pedidos);
                        last_error = None;
                    }
                    Err(e) => {
                        // Keep the last-known board on screen
                        last_error = Some(e.to_string());
                    }
                }
                redraw(&board, last_error.as_deref(), use_color, poll_secs);
            }
            _ = tokio::signal::ctrl_c() => {
                break;
            }
        }
    }

    println!();
    Ok(())
}

fn redraw(board: &OrdersBoard, last_error: Option<&str>, use_color: bool, poll_secs: u64) {
    // Move cursor to top-left and clear screen
    print!("\x1B[H\x1B[0J");
    print!("{}", format_orders_board(board.orders(), use_color));
    if let Some(err) = last_error {
        println!("Last refresh failed: {}", err);
    }
    println!("Refreshing every {}s. Ctrl-C to exit.", poll_secs);
    let _ = std::io::stdout().flush();
}
