//! Inbound order payload validation
//!
//! Pure structural and value checks, run before any side effect. Error
//! messages name the offending field so the caller can fix the payload.

use rust_decimal::Decimal;
use serde_json::Value;
use shared::order::OrderDraft;

use super::money::parse_decimal;
use super::{ProcessorError, ProcessorResult};

/// Fields every order payload must carry
const REQUIRED_FIELDS: [&str; 3] = ["customer_id", "customer_name", "items"];

/// Fields every line item must carry
const REQUIRED_ITEM_FIELDS: [&str; 4] = ["product_id", "name", "quantity", "price"];

/// Validate an inbound order draft
pub fn validate_draft(draft: &OrderDraft) -> ProcessorResult<()> {
    let present = [
        draft.customer_id.is_some(),
        draft.customer_name.is_some(),
        draft.items.is_some(),
    ];
    for (field, present) in REQUIRED_FIELDS.iter().zip(present) {
        if !present {
            return Err(ProcessorError::Validation(format!(
                "Missing required field: {field}"
            )));
        }
    }

    // Checked present above
    let items = draft.items.as_ref().unwrap_or(&Value::Null);
    let items = items
        .as_array()
        .ok_or_else(|| ProcessorError::Validation("Items must be an array".to_string()))?;
    if items.is_empty() {
        return Err(ProcessorError::Validation(
            "Order must contain at least one item".to_string(),
        ));
    }

    for item in items {
        for field in REQUIRED_ITEM_FIELDS {
            if item.get(field).is_none() {
                return Err(ProcessorError::Validation(format!(
                    "Missing required item field: {field}"
                )));
            }
        }
        validate_positive(item, "quantity", "Quantity")?;
        validate_positive(item, "price", "Price")?;
    }

    Ok(())
}

/// Check that a field parses as a number and is strictly positive
fn validate_positive(item: &Value, field: &str, label: &str) -> ProcessorResult<()> {
    // Presence was checked by the caller
    let value = item.get(field).unwrap_or(&Value::Null);
    match parse_decimal(value) {
        Ok(parsed) if parsed > Decimal::ZERO => Ok(()),
        Ok(_) => Err(ProcessorError::Validation(format!(
            "{label} must be positive"
        ))),
        Err(_) => Err(ProcessorError::Validation(format!(
            "Invalid {field}: {value}"
        ))),
    }
}
