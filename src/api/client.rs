// HTTP client for the fulfillment backend.
//
// The backend owns order storage, stage validation, and metrics
// aggregation; this client wraps its three endpoints and nothing else.

use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api::error::{ApiError, Result};
use crate::config::Config;
use crate::models::{DashboardMetrics, OrderPage, Stage};

/// Body of a stage confirmation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmStageRequest {
    pub stage: Stage,
    pub user_id: String,
    pub tenant_id: String,
}

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: Config,
}

impl ApiClient {
    pub fn new(config: Config) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// `GET /dashboard/metricas`
    pub async fn fetch_metrics(&self) -> Result<DashboardMetrics> {
        let url = format!("{}/dashboard/metricas", self.config.base_url);
        self.get(&url).await
    }

    /// `GET /dashboard/pedidos`
    ///
    /// COMPLETED orders are dropped here, malformed records are filled with
    /// placeholders, and the page total is recomputed over what survives.
    pub async fn fetch_active_orders(&self) -> Result<OrderPage> {
        let url = format!("{}/dashboard/pedidos", self.config.base_url);
        let mut page: OrderPage = self.get(&url).await?;
        page.pedidos.retain(|order| order.is_active());
        for order in &mut page.pedidos {
            order.sanitize();
        }
        page.total = page.pedidos.len();
        Ok(page)
    }

    /// `POST /orders/{orderId}/confirm-stage`
    ///
    /// The confirmation body carries the staff user and tenant from the
    /// configuration. The response body is not interesting on success.
    pub async fn confirm_stage(&self, order_id: &str, stage: Stage) -> Result<()> {
        let url = format!("{}/orders/{}/confirm-stage", self.config.base_url, order_id);
        let body = ConfirmStageRequest {
            stage,
            user_id: self.config.user_id.clone(),
            tenant_id: self.config.tenant_id.clone(),
        };
        debug!("POST {} stage={}", url, stage.as_str());

        let response = self.http.post(&url).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!("GET {}", url);
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json().await?)
    }
}
