use serde::{Deserialize, Serialize};

use super::stage::{OrderStatus, Stage, StageRecordStatus};

/// A numeric field the backend serializes inconsistently: sometimes a JSON
/// number, sometimes a string, sometimes garbage. Never fails to parse.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LooseNumber {
    Number(f64),
    Text(String),
}

impl Default for LooseNumber {
    fn default() -> Self {
        LooseNumber::Text(String::new())
    }
}

impl LooseNumber {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            LooseNumber::Number(n) if n.is_finite() => Some(*n),
            LooseNumber::Number(_) => None,
            LooseNumber::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        }
    }
}

/// One line item on an order.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct LineItem {
    pub product_id: String,
    pub price: LooseNumber,
    pub qty: LooseNumber,
    pub notes: Option<String>,
}

impl LineItem {
    /// Unit price; non-numeric values coerce to 0.0.
    pub fn unit_price(&self) -> f64 {
        self.price.as_f64().filter(|p| *p >= 0.0).unwrap_or(0.0)
    }

    /// Quantity; non-numeric values coerce to 1.
    pub fn quantity(&self) -> u32 {
        self.qty
            .as_f64()
            .filter(|q| *q >= 0.0 && *q <= u32::MAX as f64)
            .map(|q| q as u32)
            .unwrap_or(1)
    }
}

/// A logged attempt or completion of one fulfillment stage.
///
/// `step_name` is kept as the raw wire string: histories have been observed
/// with duplicate and unrecognized entries, and a bad record must not take
/// the whole order down with it.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct StageRecord {
    pub step_name: String,
    pub status: StageRecordStatus,
    pub started_at: Option<String>,
    pub finished_at: Option<String>,
}

impl StageRecord {
    pub fn stage(&self) -> Option<Stage> {
        Stage::from_str(&self.step_name)
    }
}

/// An order as returned by the board endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Order {
    pub order_id: String,
    pub customer_id: String,
    pub status: OrderStatus,
    pub created_at: String,
    #[serde(rename = "etapas")]
    pub stages: Vec<StageRecord>,
    pub items: Vec<LineItem>,
    pub total: f64,
}

impl Order {
    /// Fill missing identity fields with placeholders so a malformed record
    /// never breaks rendering. Empty ids get a unique placeholder, empty
    /// creation timestamps get the current time.
    pub fn sanitize(&mut self) {
        if self.order_id.trim().is_empty() {
            let tag = uuid::Uuid::new_v4().simple().to_string();
            self.order_id = format!("unknown-{}", &tag[..9]);
        }
        if self.customer_id.trim().is_empty() {
            self.customer_id = "unknown-customer".to_string();
        }
        if self.created_at.trim().is_empty() {
            self.created_at = chrono::Utc::now().to_rfc3339();
        }
        if !self.total.is_finite() || self.total < 0.0 {
            self.total = 0.0;
        }
    }

    /// An order stays on the active board until the backend completes it.
    pub fn is_active(&self) -> bool {
        self.status != OrderStatus::Completed
    }

    /// Short id as displayed on cards.
    pub fn short_id(&self) -> String {
        short_id(&self.order_id)
    }
}

/// Last 8 characters of an id, "N/A" when empty.
pub fn short_id(id: &str) -> String {
    if id.is_empty() {
        return "N/A".to_string();
    }
    let chars: Vec<char> = id.chars().collect();
    if chars.len() > 8 {
        chars[chars.len() - 8..].iter().collect()
    } else {
        id.to_string()
    }
}

/// Response shape of the board endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OrderPage {
    pub pedidos: Vec<Order>,
    pub total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_item_coercion() {
        let item: LineItem =
            serde_json::from_str(r#"{"productId":"papa","price":"12.50","qty":"2"}"#).unwrap();
        assert_eq!(item.unit_price(), 12.5);
        assert_eq!(item.quantity(), 2);

        // Numbers instead of strings
        let item: LineItem =
            serde_json::from_str(r#"{"productId":"papa","price":8,"qty":3}"#).unwrap();
        assert_eq!(item.unit_price(), 8.0);
        assert_eq!(item.quantity(), 3);

        // Garbage coerces to defaults instead of erroring
        let item: LineItem =
            serde_json::from_str(r#"{"productId":"papa","price":"free","qty":"a few"}"#).unwrap();
        assert_eq!(item.unit_price(), 0.0);
        assert_eq!(item.quantity(), 1);

        // Missing fields
        let item: LineItem = serde_json::from_str(r#"{"productId":"papa"}"#).unwrap();
        assert_eq!(item.unit_price(), 0.0);
        assert_eq!(item.quantity(), 1);

        // Negative price is treated as unparseable
        let item: LineItem = serde_json::from_str(r#"{"price":"-4"}"#).unwrap();
        assert_eq!(item.unit_price(), 0.0);
    }

    #[test]
    fn test_order_deserializes_wire_shape() {
        let json = r#"{
            "orderId": "ord-20240601-abc12345",
            "customerId": "cust-789",
            "status": "COOKING",
            "createdAt": "2024-06-01T12:00:00Z",
            "etapas": [
                {"stepName": "COOKING", "status": "IN_PROGRESS", "startedAt": "2024-06-01T12:00:00Z", "finishedAt": null}
            ],
            "items": [{"productId": "pollo_1_4", "price": "25.90", "qty": "1"}],
            "total": 25.9
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.order_id, "ord-20240601-abc12345");
        assert_eq!(order.status, OrderStatus::Cooking);
        assert_eq!(order.stages.len(), 1);
        assert_eq!(order.stages[0].stage(), Some(Stage::Cooking));
        assert!(order.stages[0].status.is_in_progress());
        assert_eq!(order.total, 25.9);
    }

    #[test]
    fn test_order_tolerates_missing_fields() {
        let order: Order = serde_json::from_str("{}").unwrap();
        assert_eq!(order.order_id, "");
        assert_eq!(order.status, OrderStatus::Cooking);
        assert!(order.stages.is_empty());
        assert!(order.items.is_empty());
        assert_eq!(order.total, 0.0);
    }

    #[test]
    fn test_sanitize_fills_placeholders() {
        let mut order = Order::default();
        order.total = f64::NAN;
        order.sanitize();
        assert!(order.order_id.starts_with("unknown-"));
        assert_eq!(order.order_id.len(), "unknown-".len() + 9);
        assert_eq!(order.customer_id, "unknown-customer");
        assert!(!order.created_at.is_empty());
        assert_eq!(order.total, 0.0);

        // Present fields are left alone
        let mut order = Order {
            order_id: "ord-1".to_string(),
            customer_id: "cust-1".to_string(),
            created_at: "2024-06-01T12:00:00Z".to_string(),
            total: 10.0,
            ..Order::default()
        };
        order.sanitize();
        assert_eq!(order.order_id, "ord-1");
        assert_eq!(order.total, 10.0);
    }

    #[test]
    fn test_unrecognized_stage_record() {
        let rec: StageRecord =
            serde_json::from_str(r#"{"stepName":"GARNISH","status":"IN_PROGRESS"}"#).unwrap();
        assert_eq!(rec.stage(), None);
    }

    #[test]
    fn test_short_id() {
        assert_eq!(short_id(""), "N/A");
        assert_eq!(short_id("abc"), "abc");
        assert_eq!(short_id("ord-20240601-abc12345"), "abc12345");
        assert_eq!(short_id("12345678"), "12345678");
    }

    #[test]
    fn test_order_page_defaults() {
        let page: OrderPage = serde_json::from_str("{}").unwrap();
        assert!(page.pedidos.is_empty());
        assert_eq!(page.total, 0);
    }

    #[test]
    fn test_is_active() {
        let mut order = Order::default();
        assert!(order.is_active());
        order.status = OrderStatus::Delivered;
        assert!(order.is_active());
        order.status = OrderStatus::Completed;
        assert!(!order.is_active());
    }
}
