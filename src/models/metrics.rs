use serde::{Deserialize, Serialize};

/// Order counts by lifecycle status.
///
/// Every field defaults to zero so a partial metrics payload still renders.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StatusCounts {
    #[serde(rename = "CREATED")]
    pub created: u64,
    #[serde(rename = "COOKING")]
    pub cooking: u64,
    #[serde(rename = "PACKAGING")]
    pub packaging: u64,
    #[serde(rename = "DELIVERY")]
    pub delivery: u64,
    #[serde(rename = "DELIVERED")]
    pub delivered: u64,
    #[serde(rename = "COMPLETED")]
    pub completed: u64,
    #[serde(rename = "IN_PROGRESS")]
    pub in_progress: u64,
}

impl StatusCounts {
    pub fn total(&self) -> u64 {
        self.created
            + self.cooking
            + self.packaging
            + self.delivery
            + self.delivered
            + self.completed
            + self.in_progress
    }

    /// Orders still requiring staff attention (non-terminal statuses).
    pub fn active(&self) -> u64 {
        self.created + self.cooking + self.packaging + self.delivery + self.in_progress
    }
}

/// Average minutes spent per manually confirmed stage.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StageTimings {
    #[serde(rename = "COOKING")]
    pub cooking: f64,
    #[serde(rename = "PACKAGING")]
    pub packaging: f64,
    #[serde(rename = "DELIVERY")]
    pub delivery: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PopularProduct {
    pub producto: String,
    pub cantidad: u64,
}

/// Aggregate metrics as returned by the dashboard endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DashboardMetrics {
    #[serde(rename = "pedidosPorEstado")]
    pub by_status: StatusCounts,
    #[serde(rename = "tiemposPorEtapa")]
    pub stage_times: StageTimings,
    #[serde(rename = "pedidosUltimaSemana")]
    pub weekly_orders: Vec<u64>,
    #[serde(rename = "productosPopulares")]
    pub popular_products: Vec<PopularProduct>,
}

impl DashboardMetrics {
    pub fn active_orders(&self) -> u64 {
        self.by_status.active()
    }

    /// Completed orders as an integer percentage of all orders.
    /// 0 when there are no orders at all.
    pub fn completion_rate(&self) -> u32 {
        let total = self.by_status.total();
        if total == 0 {
            return 0;
        }
        ((self.by_status.completed as f64 / total as f64) * 100.0).round() as u32
    }
}
