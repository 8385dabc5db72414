//! Money and quantity normalization
//!
//! Converts inbound numeric values to exact `Decimal`s and derives item and
//! order totals. All arithmetic happens in `Decimal`; binary floating point
//! never enters a total, so 0.1 + 0.2 is exactly 0.3.

use chrono::Utc;
use rust_decimal::Decimal;
use serde_json::Value;
use shared::order::{Order, OrderDraft, OrderItem, OrderStatus};
use std::str::FromStr;

use super::{ProcessorError, ProcessorResult};

/// Parse a JSON number or numeric string into an exact decimal
///
/// Numbers go through their shortest decimal rendering, never the binary
/// expansion, so `0.1` parses to exactly `0.1`.
pub fn parse_decimal(value: &Value) -> ProcessorResult<Decimal> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        other => {
            return Err(ProcessorError::Format(format!(
                "expected a number, got {other}"
            )));
        }
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| ProcessorError::Format(format!("not a valid number: {text}")))
}

/// Shape an inbound draft into a full [`Order`] record
///
/// Second line of defense after validation: structurally absent fields
/// still fail here, but with a data-shape error rather than the
/// field-by-field validation report.
pub fn format_order(draft: &OrderDraft, order_id: impl Into<String>) -> ProcessorResult<Order> {
    let customer_id = draft
        .customer_id
        .clone()
        .ok_or_else(|| ProcessorError::Format("customer_id is required".to_string()))?;
    let customer_name = draft
        .customer_name
        .clone()
        .ok_or_else(|| ProcessorError::Format("customer_name is required".to_string()))?;
    let raw_items = draft
        .items
        .as_ref()
        .and_then(Value::as_array)
        .ok_or_else(|| ProcessorError::Format("items must be an array".to_string()))?;

    let mut items = Vec::with_capacity(raw_items.len());
    let mut total_amount = Decimal::ZERO;
    for raw in raw_items {
        let item = format_item(raw)?;
        total_amount += item.total;
        items.push(item);
    }

    let now = Utc::now();
    Ok(Order {
        order_id: order_id.into(),
        customer_id,
        customer_name,
        items,
        total_amount,
        status: OrderStatus::Pending,
        created_at: now,
        updated_at: now,
    })
}

fn format_item(raw: &Value) -> ProcessorResult<OrderItem> {
    let product_id = required_str(raw, "product_id")?;
    let name = required_str(raw, "name")?;
    let quantity = parse_decimal(required_field(raw, "quantity")?)?;
    let price = parse_decimal(required_field(raw, "price")?)?;
    let total = quantity * price;

    Ok(OrderItem {
        product_id,
        name,
        quantity,
        price,
        total,
    })
}

fn required_field<'a>(item: &'a Value, field: &str) -> ProcessorResult<&'a Value> {
    item.get(field)
        .ok_or_else(|| ProcessorError::Format(format!("item field {field} is required")))
}

fn required_str(item: &Value, field: &str) -> ProcessorResult<String> {
    required_field(item, field)?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| ProcessorError::Format(format!("item field {field} must be a string")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn draft(items: Value) -> OrderDraft {
        OrderDraft {
            customer_id: Some("CUST-1".to_string()),
            customer_name: Some("Ada".to_string()),
            items: Some(items),
        }
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn parse_decimal_is_exact_for_fractions() {
        assert_eq!(parse_decimal(&json!(0.1)).unwrap(), dec("0.1"));
        assert_eq!(parse_decimal(&json!(10.5)).unwrap(), dec("10.5"));
        assert_eq!(parse_decimal(&json!(3)).unwrap(), dec("3"));
    }

    #[test]
    fn parse_decimal_accepts_numeric_strings() {
        assert_eq!(parse_decimal(&json!("10.50")).unwrap(), dec("10.50"));
        assert_eq!(parse_decimal(&json!(" 2 ")).unwrap(), dec("2"));
        assert_eq!(parse_decimal(&json!("1e2")).unwrap(), dec("100"));
    }

    #[test]
    fn parse_decimal_rejects_non_numbers() {
        assert!(parse_decimal(&json!("three")).is_err());
        assert!(parse_decimal(&json!(true)).is_err());
        assert!(parse_decimal(&json!(null)).is_err());
        assert!(parse_decimal(&json!({})).is_err());
    }

    #[test]
    fn totals_carry_no_floating_point_drift() {
        // 0.1 + 0.2 must be exactly 0.3, not 0.30000000000000004
        let order = format_order(
            &draft(json!([
                {"product_id": "P-1", "name": "A", "quantity": 1, "price": 0.1},
                {"product_id": "P-2", "name": "B", "quantity": 1, "price": 0.2}
            ])),
            "ORD-00000001",
        )
        .unwrap();

        assert_eq!(order.total_amount, dec("0.3"));
    }

    #[test]
    fn format_derives_item_and_order_totals() {
        let order = format_order(
            &draft(json!([
                {"product_id": "P-1", "name": "Widget", "quantity": 3, "price": 10.50},
                {"product_id": "P-2", "name": "Gadget", "quantity": 1, "price": "5.00"}
            ])),
            "ORD-00000002",
        )
        .unwrap();

        assert_eq!(order.items[0].total, dec("31.50"));
        assert_eq!(order.items[1].total, dec("5.00"));
        assert_eq!(order.total_amount, dec("36.50"));
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.created_at, order.updated_at);
        assert_eq!(order.order_id, "ORD-00000002");
    }

    #[test]
    fn format_rejects_missing_structure() {
        let mut no_customer = draft(json!([]));
        no_customer.customer_id = None;
        assert!(matches!(
            format_order(&no_customer, "ORD-00000003").unwrap_err(),
            ProcessorError::Format(_)
        ));

        let no_quantity = draft(json!([{"product_id": "P-1", "name": "A", "price": 1}]));
        assert!(matches!(
            format_order(&no_quantity, "ORD-00000004").unwrap_err(),
            ProcessorError::Format(_)
        ));
    }

    #[test]
    fn fractional_quantities_are_supported() {
        let order = format_order(
            &draft(json!([
                {"product_id": "P-1", "name": "Bulk", "quantity": 2.5, "price": 4}
            ])),
            "ORD-00000005",
        )
        .unwrap();
        assert_eq!(order.total_amount, dec("10"));
    }
}
