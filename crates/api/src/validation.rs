//! Request validation applied before any service call.

use std::collections::HashSet;

use crate::dto::{OrderDto, OrderLineDto};
use crate::error::ApiError;

/// Largest sort order a client may set. Leaves room for the store to keep
/// appending lines after it.
pub const MAX_SORT_ORDER: i32 = 1_000_000_000;

/// Returns every rule the line breaks.
pub fn order_line_errors(line: &OrderLineDto) -> Vec<String> {
    let mut errors = Vec::new();

    if line
        .sku_code
        .as_deref()
        .is_none_or(|code| code.trim().is_empty())
    {
        errors.push("SkuCode is required".to_string());
    }

    if line.quantity <= 0 {
        errors.push("Positive Quantity is required".to_string());
    } else if line.quantity > i64::from(u32::MAX) {
        errors.push(format!("Quantity must not exceed {}", u32::MAX));
    }

    if !(0..=MAX_SORT_ORDER).contains(&line.sort_order) {
        errors.push(format!("SortOrder must be between 0 and {MAX_SORT_ORDER}"));
    }

    errors
}

/// Returns every rule the order breaks, including those of its lines.
pub fn order_errors(order: &OrderDto) -> Vec<String> {
    let Some(lines) = order.lines.as_ref() else {
        return Vec::new();
    };

    let mut errors: Vec<String> = lines.iter().flat_map(order_line_errors).collect();

    let mut seen = HashSet::new();
    let has_duplicates = lines
        .iter()
        .filter_map(|line| line.sku_code.as_deref().map(str::trim))
        .any(|code| !seen.insert(code));
    if has_duplicates {
        errors.push("Duplicate SkuCode in order".to_string());
    }

    errors
}

pub fn validate_order_line(line: &OrderLineDto) -> Result<(), ApiError> {
    into_result(order_line_errors(line))
}

pub fn validate_order(order: &OrderDto) -> Result<(), ApiError> {
    into_result(order_errors(order))
}

fn into_result(errors: Vec<String>) -> Result<(), ApiError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::BadRequest(errors.join(", ")))
    }
}
