// Output formatting utilities

use std::io::IsTerminal;

use crate::infer::stage_to_confirm;
use crate::models::{DashboardMetrics, Order, OrderStatus, Stage};
use crate::utils::format_time_ago;

// ANSI escape codes for terminal formatting
const ANSI_BOLD: &str = "\x1b[1m";
const ANSI_RESET: &str = "\x1b[0m";

// ANSI foreground colors (standard 16-color palette)
const ANSI_FG_GREEN: &str = "\x1b[32m";
const ANSI_FG_YELLOW: &str = "\x1b[33m";
const ANSI_FG_BLUE: &str = "\x1b[34m";
const ANSI_FG_MAGENTA: &str = "\x1b[35m";
const ANSI_FG_CYAN: &str = "\x1b[36m";
const ANSI_FG_RED: &str = "\x1b[31m";
const ANSI_FG_BRIGHT_BLACK: &str = "\x1b[90m";
const ANSI_FG_BRIGHT_YELLOW: &str = "\x1b[93m";

/// Map a color name string to its ANSI foreground constant
fn color_name_to_fg(name: &str) -> Option<&'static str> {
    match name {
        "red" => Some(ANSI_FG_RED),
        "green" => Some(ANSI_FG_GREEN),
        "yellow" => Some(ANSI_FG_YELLOW),
        "blue" => Some(ANSI_FG_BLUE),
        "magenta" => Some(ANSI_FG_MAGENTA),
        "cyan" => Some(ANSI_FG_CYAN),
        "bright_black" => Some(ANSI_FG_BRIGHT_BLACK),
        "bright_yellow" => Some(ANSI_FG_BRIGHT_YELLOW),
        _ => None,
    }
}

/// Check if stdout is a terminal (TTY)
pub fn is_tty() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width dynamically
///
/// Uses the `terminal_size` crate for reliable detection, with fallback to
/// COLUMNS environment variable and a sensible default.
pub fn get_terminal_width() -> usize {
    if let Some((terminal_size::Width(w), _)) = terminal_size::terminal_size() {
        if w > 0 {
            return w as usize;
        }
    }

    if let Ok(cols) = std::env::var("COLUMNS") {
        if let Ok(width) = cols.parse::<usize>() {
            if width > 0 && width < 10000 {
                return width;
            }
        }
    }

    120
}

fn colorize(text: &str, color_name: Option<&str>, use_color: bool) -> String {
    if !use_color {
        return text.to_string();
    }
    match color_name.and_then(color_name_to_fg) {
        Some(code) => format!("{}{}{}", code, text, ANSI_RESET),
        None => text.to_string(),
    }
}

fn bold(text: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", ANSI_BOLD, text, ANSI_RESET)
    } else {
        text.to_string()
    }
}

/// Display name for a known product id; unknown ids render verbatim.
pub fn product_display_name(product_id: &str) -> &str {
    match product_id {
        "pollo_1_4" => "Pollo a la Brasa (1/4)",
        "pollo_1_2" => "Pollo a la Brasa (1/2)",
        "pollo_entero" => "Pollo a la Brasa (Entero)",
        "chicha" => "Chicha Morada",
        "inca_kola" => "Inca Kola",
        "ensalada" => "Ensalada Fresca",
        "papa" => "Papa a la Huancaina",
        "" => "Unknown Product",
        other => other,
    }
}

/// The action line at the bottom of a card: either the stage to confirm or
/// a terminal indicator. DELIVERED is never offered for manual confirmation.
pub fn card_action_line(order: &Order, in_flight: bool) -> String {
    if order.status == OrderStatus::Completed {
        return "Order completed".to_string();
    }
    if order.status == OrderStatus::Delivered {
        return "Order delivered".to_string();
    }
    match stage_to_confirm(&order.stages) {
        Some(Stage::Delivered) => "Awaiting delivery confirmation".to_string(),
        Some(stage) if in_flight => format!("Confirming {}...", stage.label()),
        Some(stage) => format!("-> confirm {}", stage.label()),
        None => "No actions available".to_string(),
    }
}

/// Format one order as a card block.
pub fn format_order_card(order: &Order, in_flight: bool, use_color: bool) -> String {
    let mut out = String::new();

    let status_label = colorize(
        &format!("[{}]", order.status.label()),
        order.status.color_name(),
        use_color,
    );
    out.push_str(&format!(
        "{}  {}  {}\n",
        bold(&format!("#{}", order.short_id()), use_color),
        status_label,
        format_time_ago(&order.created_at),
    ));
    out.push_str(&format!(
        "  Customer {}\n",
        crate::models::short_id(&order.customer_id)
    ));

    if order.items.is_empty() {
        out.push_str("  (no items in this order)\n");
    } else {
        for item in &order.items {
            out.push_str(&format!(
                "  {}x {}  ${:.2}\n",
                item.quantity(),
                product_display_name(&item.product_id),
                item.unit_price(),
            ));
            if let Some(notes) = &item.notes {
                if !notes.trim().is_empty() {
                    out.push_str(&format!("     Note: {}\n", notes.trim()));
                }
            }
        }
    }

    out.push_str(&format!("  Total: ${:.2}\n", order.total));
    out.push_str(&format!("  {}\n", card_action_line(order, in_flight)));
    out
}

/// Format the whole active-orders board.
pub fn format_orders_board(orders: &[Order], use_color: bool) -> String {
    let mut out = String::new();
    let count = orders.len();
    out.push_str(&bold(
        &format!(
            "Active Orders ({} order{} to manage)\n",
            count,
            if count == 1 { "" } else { "s" }
        ),
        use_color,
    ));
    out.push('\n');

    if orders.is_empty() {
        out.push_str("No active orders. New orders will appear here.\n");
        return out;
    }

    for order in orders {
        out.push_str(&format_order_card(order, false, use_color));
        out.push('\n');
    }
    out
}

const DAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Weekly order-count series as a horizontal bar chart with a
/// first-vs-last trend marker.
pub fn format_weekly_chart(series: &[u64], use_color: bool) -> String {
    let mut out = String::new();
    out.push_str(&bold("=== Orders This Week ===\n", use_color));

    if series.is_empty() || series.iter().all(|v| *v == 0) {
        out.push_str("No data available.\n");
        return out;
    }

    let max = *series.iter().max().unwrap_or(&1);
    let bar_width = get_terminal_width().saturating_sub(16).clamp(10, 40);

    for (i, value) in series.iter().enumerate() {
        let label = DAY_LABELS
            .get(i)
            .map(|l| l.to_string())
            .unwrap_or_else(|| format!("D{}", i + 1));
        let len = if max > 0 {
            ((*value as f64 / max as f64) * bar_width as f64).round() as usize
        } else {
            0
        };
        out.push_str(&format!("{:>3}  {:<width$}  {}\n", label, "#".repeat(len), value, width = bar_width));
    }

    let first = *series.first().unwrap_or(&0);
    let last = *series.last().unwrap_or(&0);
    let diff = last as i64 - first as i64;
    let trend = if diff >= 0 {
        colorize(&format!("+{}", diff), Some("green"), use_color)
    } else {
        colorize(&diff.to_string(), Some("red"), use_color)
    };
    out.push_str(&format!("Trend: {} vs start of week\n", trend));
    out
}

/// Format the metrics overview.
pub fn format_metrics(metrics: &DashboardMetrics, use_color: bool) -> String {
    let mut out = String::new();
    let counts = &metrics.by_status;

    out.push_str(&bold("=== Orders by Status ===\n", use_color));
    out.push_str(&format!(
        "In Kitchen: {}   Being Packaged: {}   Out for Delivery: {}\n",
        colorize(&counts.cooking.to_string(), Some("yellow"), use_color),
        colorize(&counts.packaging.to_string(), Some("bright_yellow"), use_color),
        colorize(&counts.delivery.to_string(), Some("magenta"), use_color),
    ));
    out.push_str(&format!(
        "Created: {}   In Progress: {}   Delivered: {}   Completed: {}\n",
        counts.created, counts.in_progress, counts.delivered, counts.completed,
    ));
    out.push_str(&format!(
        "Active orders: {}   Completion rate: {}%\n",
        metrics.active_orders(),
        metrics.completion_rate(),
    ));
    out.push('\n');

    out.push_str(&bold("=== Average Time per Stage ===\n", use_color));
    out.push_str(&format!(
        "Cooking: {:.1} min   Packaging: {:.1} min   Delivery: {:.1} min\n",
        metrics.stage_times.cooking, metrics.stage_times.packaging, metrics.stage_times.delivery,
    ));
    out.push('\n');

    out.push_str(&format_weekly_chart(&metrics.weekly_orders, use_color));
    out.push('\n');

    out.push_str(&bold("=== Top Products ===\n", use_color));
    if metrics.popular_products.is_empty() {
        out.push_str("No data available.\n");
    } else {
        for (rank, product) in metrics.popular_products.iter().enumerate() {
            out.push_str(&format!(
                "{}. {} ({})\n",
                rank + 1,
                product_display_name(&product.producto),
                product.cantidad,
            ));
        }
    }
    out
}

/// One-line summary for `brasa status`.
pub fn format_status_line(metrics: &DashboardMetrics) -> String {
    let counts = &metrics.by_status;
    format!(
        "Orders: {} active ({} cooking, {} packaging, {} delivering); {}% completed",
        metrics.active_orders(),
        counts.cooking,
        counts.packaging,
        counts.delivery,
        metrics.completion_rate(),
    )
}
