//! Payment orders and the external gateway redirect flow.
//!
//! Creating an order may hand back a redirect URL pointing at an external
//! payment gateway; the gateway later returns the user to the platform
//! with query parameters that [`order_status_from_return`] maps to a
//! final status.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::ServiceError;

/// Final or in-flight state of a payment order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Success,
    Pending,
    Failed,
    Cancelled,
}

/// A payment order for a purchasable item (course, material pack).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentOrder {
    pub id: String,
    pub item_id: String,
    /// Amount in minor currency units.
    pub amount_cents: u32,
    pub status: OrderStatus,
}

/// Order creation payload. `return_url` is where the gateway sends the
/// user back after the payment attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRequest {
    pub item_id: String,
    pub amount_cents: u32,
    pub return_url: String,
}

/// Result of creating an order. A `redirect_url` means the user must be
/// sent to the external gateway to complete payment; without one the
/// order settles platform-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedOrder {
    pub order: PaymentOrder,
    pub redirect_url: Option<String>,
}

/// Contract for the backend's payment endpoints.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_order(&self, request: &OrderRequest) -> Result<CreatedOrder, ServiceError>;
    async fn order_status(&self, order_id: &str) -> Result<OrderStatus, ServiceError>;
    /// Only pending orders can be cancelled.
    async fn cancel_order(&self, order_id: &str) -> Result<(), ServiceError>;
}

/// Map the gateway's return/callback query parameters to a final status.
///
/// The gateway reports its outcome in the `responseCode` parameter:
/// `"00"` is a completed payment, `"24"` means the user abandoned the
/// attempt at the gateway, any other code is a failure. A missing code
/// means the gateway has not settled yet.
pub fn order_status_from_return<'a, I>(params: I) -> OrderStatus
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut code = None;
    for (key, value) in params {
        if key == "responseCode" {
            code = Some(value);
        }
    }

    match code {
        None => OrderStatus::Pending,
        Some("00") => OrderStatus::Success,
        Some("24") => OrderStatus::Cancelled,
        Some(_) => OrderStatus::Failed,
    }
}

/// In-memory payment gateway for tests and single-process use.
///
/// Orders start pending; tests drive them to a terminal status with
/// [`settle`](Self::settle). Clones share state.
#[derive(Clone, Default)]
pub struct InMemoryPaymentGateway {
    orders: Arc<RwLock<HashMap<String, PaymentOrder>>>,
    seq: Arc<AtomicU64>,
    checkout_url: Option<String>,
}

impl InMemoryPaymentGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out redirect URLs under `checkout_url`, mimicking a gateway
    /// that requires the user to complete payment externally.
    pub fn with_checkout_url(checkout_url: impl Into<String>) -> Self {
        Self {
            checkout_url: Some(checkout_url.into()),
            ..Self::default()
        }
    }

    /// Force an order to a status, standing in for the gateway's side of
    /// the flow.
    pub fn settle(&self, order_id: &str, status: OrderStatus) -> Result<(), ServiceError> {
        let mut orders = self
            .orders
            .write()
            .map_err(|_| ServiceError::Transport("gateway lock poisoned".into()))?;
        let order = orders
            .get_mut(order_id)
            .ok_or_else(|| ServiceError::NotFound(format!("order {}", order_id)))?;
        order.status = status;
        Ok(())
    }
}

#[async_trait]
impl PaymentGateway for InMemoryPaymentGateway {
    async fn create_order(&self, request: &OrderRequest) -> Result<CreatedOrder, ServiceError> {
        let mut orders = self
            .orders
            .write()
            .map_err(|_| ServiceError::Transport("gateway lock poisoned".into()))?;

        let id = format!("ord-{}", self.seq.fetch_add(1, Ordering::Relaxed) + 1);
        let order = PaymentOrder {
            id: id.clone(),
            item_id: request.item_id.clone(),
            amount_cents: request.amount_cents,
            status: OrderStatus::Pending,
        };
        orders.insert(id.clone(), order.clone());

        let redirect_url = self
            .checkout_url
            .as_ref()
            .map(|base| format!("{}?orderId={}", base, id));

        Ok(CreatedOrder {
            order,
            redirect_url,
        })
    }

    async fn order_status(&self, order_id: &str) -> Result<OrderStatus, ServiceError> {
        let orders = self
            .orders
            .read()
            .map_err(|_| ServiceError::Transport("gateway lock poisoned".into()))?;
        orders
            .get(order_id)
            .map(|o| o.status)
            .ok_or_else(|| ServiceError::NotFound(format!("order {}", order_id)))
    }

    async fn cancel_order(&self, order_id: &str) -> Result<(), ServiceError> {
        let mut orders = self
            .orders
            .write()
            .map_err(|_| ServiceError::Transport("gateway lock poisoned".into()))?;
        let order = orders
            .get_mut(order_id)
            .ok_or_else(|| ServiceError::NotFound(format!("order {}", order_id)))?;

        if order.status != OrderStatus::Pending {
            return Err(ServiceError::Rejected(format!(
                "order {} is not pending",
                order_id
            )));
        }
        order.status = OrderStatus::Cancelled;
        Ok(())
    }
}
