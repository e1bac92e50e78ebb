use crate::clients::{ApiClient, SubmitError};
use crate::model::OrderBatch;
use serde::Serialize;
use tracing::{debug, error, info, instrument};

/// Endpoint of the bulk order submission.
pub const BULK_ORDER_ENDPOINT: &str = "bulk/order";

/// What the order endpoint answered to an accepted batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmitReceipt {
    pub status: u16,
    pub body: serde_json::Value,
}

/// Client for the bulk order endpoint.
#[derive(Clone)]
pub struct OrderClient {
    inner: ApiClient,
}

impl OrderClient {
    pub fn new(inner: ApiClient) -> Self {
        Self { inner }
    }

    /// Submits the whole batch in one request.
    ///
    /// Transport failures and non-success statuses are retried per the client's
    /// policy; whatever remains is reported as [`SubmitError::Transport`] or
    /// [`SubmitError::Rejected`].
    #[instrument(skip(self, batch), fields(orders = batch.len()))]
    pub async fn submit(&self, batch: &OrderBatch) -> Result<SubmitReceipt, SubmitError> {
        debug!(?batch, "submit called");
        let body = serde_json::to_vec(batch).map_err(|e| SubmitError::Encode(e.to_string()))?;

        info!("Sending bulk order");
        let response = match self.inner.post(BULK_ORDER_ENDPOINT, body).await {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, "Bulk order not delivered");
                return Err(e.into());
            }
        };

        if !response.is_success() {
            error!(status = response.status, "Bulk order rejected");
            return Err(SubmitError::Rejected {
                status: response.status,
                body: response.body_value(),
            });
        }

        info!(status = response.status, "Bulk order accepted");
        Ok(SubmitReceipt {
            status: response.status,
            body: response.body_value(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::MockTransport;
    use crate::framework::{RetryPolicy, TransportError};
    use crate::model::{Address, Customer, CustomerDocument, DishId, DishOrder};
    use serde_json::json;

    fn batch() -> OrderBatch {
        OrderBatch {
            orders: vec![CustomerDocument {
                customer: Customer {
                    full_name: "Employee A".to_string(),
                    address: Address {
                        street: "Musterweg 3".to_string(),
                        city: "Musterhausen".to_string(),
                        postal_code: "12345".to_string(),
                    },
                },
                dishes: vec![DishOrder {
                    dish_id: DishId::Number(7),
                    amount: 3,
                }],
            }],
        }
    }

    fn client(mock: &MockTransport, retry: RetryPolicy) -> OrderClient {
        OrderClient::new(ApiClient::new("http://api.test", mock.transport()).with_retry(retry))
    }

    #[tokio::test]
    async fn test_submit_success_returns_receipt() {
        let mut mock = MockTransport::new();
        mock.expect_post("v1/bulk/order")
            .return_json(201, &json!({"order_ids": [1]}));

        let receipt = client(&mock, RetryPolicy::none()).submit(&batch()).await.unwrap();

        assert_eq!(receipt.status, 201);
        assert_eq!(receipt.body, json!({"order_ids": [1]}));

        let sent: OrderBatch =
            serde_json::from_slice(mock.requests()[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(sent, batch());
        mock.verify();
    }

    #[tokio::test]
    async fn test_submit_rejection_carries_status() {
        let mut mock = MockTransport::new();
        mock.expect_post("bulk/order")
            .return_json(422, &json!({"detail": "unknown dish"}));

        let result = client(&mock, RetryPolicy::none()).submit(&batch()).await;

        assert_eq!(
            result,
            Err(SubmitError::Rejected {
                status: 422,
                body: json!({"detail": "unknown dish"}),
            })
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_submit_transport_failure_after_retries() {
        let mut mock = MockTransport::new();
        mock.expect_post("bulk/order")
            .return_err(TransportError::Connect("refused".to_string()));
        mock.expect_post("bulk/order")
            .return_err(TransportError::Connect("refused".to_string()));

        let retry = RetryPolicy {
            max_retries: 1,
            backoff_factor: 0.0,
            ..RetryPolicy::default()
        };
        let result = client(&mock, retry).submit(&batch()).await;

        assert_eq!(
            result,
            Err(SubmitError::Transport(TransportError::Connect("refused".to_string())))
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_submit_retries_server_errors() {
        let mut mock = MockTransport::new();
        mock.expect_post("bulk/order").return_status(504, "");
        mock.expect_post("bulk/order").return_status(200, "");

        let retry = RetryPolicy {
            max_retries: 2,
            backoff_factor: 0.0,
            ..RetryPolicy::default()
        };
        let receipt = client(&mock, retry).submit(&batch()).await.unwrap();

        assert_eq!(receipt.status, 200);
        assert_eq!(receipt.body, serde_json::Value::Null);
        mock.verify();
    }
}
