// Error handling utilities for consistent error messages and exit codes

use std::process;

/// Exit with a user error (exit code 1)
/// User errors are for invalid input, missing resources, etc.
pub fn user_error(message: &str) -> ! {
    eprintln!("Error: {}", message);
    process::exit(1);
}

/// Validate an order id query (full id or short suffix).
/// Ids travel in a URL path, so the charset is kept tight.
pub fn validate_order_query(query: &str) -> Result<(), String> {
    if query.trim().is_empty() {
        return Err("Order id cannot be empty".to_string());
    }
    if query
        .chars()
        .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
    {
        Ok(())
    } else {
        Err(format!(
            "Invalid order id: '{}'. Order ids can only contain letters, numbers, underscores, and hyphens.",
            query
        ))
    }
}
