//! Order service enforcing the rules on an order's lines.

use std::collections::HashSet;
use std::fmt::Display;

use common::{LineId, OrderId, SkuCode};
use order_store::{NewOrder, Order, OrderStore, OrderStoreExt, Sku};

use crate::error::{ServiceError, ServiceResult};

use super::{CreateOrder, OrderLineInput};

/// Logs an unexpected fault and returns the opaque error handed to callers.
fn fault(method: &'static str, public_message: &str, reason: impl Display) -> ServiceError {
    tracing::error!(
        service = "OrderService",
        method,
        reason = %reason,
        "{public_message}"
    );
    metrics::counter!("order_service_faults_total", "method" => method).increment(1);
    ServiceError::Internal(public_message.to_string())
}

fn record_request(operation: &'static str) {
    metrics::counter!("order_service_requests_total", "operation" => operation).increment(1);
}

fn require_positive_quantity(line: &OrderLineInput) -> ServiceResult<()> {
    if line.quantity == 0 {
        return Err(ServiceError::BadRequest(
            "Positive Quantity is required".to_string(),
        ));
    }
    Ok(())
}

/// Service for managing orders.
///
/// Every operation is a read-validate-write sequence against the store
/// with no transaction around it. Store faults are logged and turned
/// into `ServiceError::Internal` carrying only a public-safe message.
pub struct OrderService<S: OrderStore> {
    store: S,
}

impl<S: OrderStore> OrderService<S> {
    /// Creates a new order service over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the SKU catalog.
    #[tracing::instrument(skip(self))]
    pub async fn get_skus(&self) -> ServiceResult<Vec<Sku>> {
        record_request("get_skus");
        self.store
            .all_skus()
            .await
            .map_err(|e| fault("get_skus", "Error fetching SKUs", e))
    }

    /// Returns every stored order.
    #[tracing::instrument(skip(self))]
    pub async fn get_orders(&self) -> ServiceResult<Vec<Order>> {
        record_request("get_orders");
        self.store
            .all_orders()
            .await
            .map_err(|e| fault("get_orders", "Error fetching orders", e))
    }

    /// Persists a new order, empty if none is supplied.
    ///
    /// Supplied lines must reference distinct catalog SKUs. Returns the
    /// identifier assigned by the store.
    #[tracing::instrument(skip(self))]
    pub async fn create_order(&self, order: Option<CreateOrder>) -> ServiceResult<OrderId> {
        record_request("create_order");
        let public_message = "Error creating new Order";
        let order = order.unwrap_or_default();

        let mut seen = HashSet::new();
        let mut lines = Vec::with_capacity(order.lines.len());
        for input in order.lines {
            require_positive_quantity(&input)?;
            if !seen.insert(input.sku_code.clone()) {
                return Err(ServiceError::BadRequest(format!(
                    "Order already contains a line with Sku Code {}",
                    input.sku_code
                )));
            }
            let sku = self
                .resolve_sku(
                    &input.sku_code,
                    "create_order",
                    public_message,
                    format!(
                        "Error creating new Order, sku with code {} not found",
                        input.sku_code
                    ),
                )
                .await?;
            lines.push(input.into_new_line(sku));
        }

        let created = self
            .store
            .create_order(NewOrder::with_lines(lines))
            .await
            .map_err(|e| fault("create_order", public_message, e))?;

        tracing::info!(order_id = %created.id, lines = created.line_count(), "order created");
        Ok(created.id)
    }

    /// Fetches the order with the given ID.
    ///
    /// More than one stored record under the same ID is a store-integrity
    /// violation and yields `Internal`.
    #[tracing::instrument(skip(self))]
    pub async fn get_order(&self, id: OrderId) -> ServiceResult<Order> {
        record_request("get_order");
        self.load_order(id).await
    }

    /// Removes every line from the order.
    ///
    /// An order that is already empty is not written back.
    #[tracing::instrument(skip(self))]
    pub async fn clear_order(&self, id: OrderId) -> ServiceResult<()> {
        record_request("clear_order");
        let public_message = format!("Error clearing order with id {id}");

        let mut order = self.load_order(id).await?;
        if order.is_empty() {
            return Ok(());
        }

        order.lines.clear();
        self.store
            .save_order(order)
            .await
            .map_err(|e| fault("clear_order", &public_message, e))?;

        tracing::info!(order_id = %id, "order cleared");
        Ok(())
    }

    /// Adds a line to the order or updates the quantity of an existing one.
    ///
    /// A line whose ID matches an existing line only changes that line's
    /// quantity. Any other line is appended once its SKU is confirmed
    /// unique within the order and present exactly once in the catalog.
    /// Returns the ID of the affected line.
    #[tracing::instrument(skip(self))]
    pub async fn update_order_line(
        &self,
        order_id: OrderId,
        line: OrderLineInput,
    ) -> ServiceResult<LineId> {
        record_request("update_order_line");
        let public_message = format!("Error saving order with id {order_id}");

        require_positive_quantity(&line)?;
        let mut order = self.load_order(order_id).await?;

        if let Some(line_id) = line.id {
            let matches = order.lines_with_id(line_id).count();
            if matches > 1 {
                return Err(fault(
                    "update_order_line",
                    &public_message,
                    format!("{matches} duplicate line matches found for order line id {line_id}"),
                ));
            }

            if let Some(existing) = order.lines.iter_mut().find(|l| l.has_id(line_id)) {
                existing.quantity = line.quantity;
                self.store
                    .save_order(order)
                    .await
                    .map_err(|e| fault("update_order_line", &public_message, e))?;

                tracing::info!(order_id = %order_id, line_id = %line_id, "order line updated");
                return Ok(line_id);
            }
        }

        if order.contains_sku(&line.sku_code) {
            return Err(ServiceError::BadRequest(format!(
                "Order already contains a line with Sku Code {}",
                line.sku_code
            )));
        }

        let sku = self
            .resolve_sku(
                &line.sku_code,
                "update_order_line",
                &public_message,
                format!(
                    "Error saving order with id {order_id}, sku with code {} not found",
                    line.sku_code
                ),
            )
            .await?;
        let code = sku.code.clone();
        order.lines.push(line.into_new_line(sku));

        let saved = self
            .store
            .save_order(order)
            .await
            .map_err(|e| fault("update_order_line", &public_message, e))?;

        let line_id = saved
            .line_for_sku(&code)
            .and_then(|l| l.id)
            .ok_or_else(|| {
                fault(
                    "update_order_line",
                    &public_message,
                    format!("saved order has no identified line for sku {code}"),
                )
            })?;

        tracing::info!(order_id = %order_id, line_id = %line_id, sku = %code, "order line added");
        Ok(line_id)
    }

    /// Removes the line with the given ID from the order.
    #[tracing::instrument(skip(self))]
    pub async fn delete_order_line(&self, order_id: OrderId, line_id: LineId) -> ServiceResult<()> {
        record_request("delete_order_line");
        let public_message =
            format!("Error deleting line with {line_id} from order with id {order_id}");

        let mut order = self.load_order(order_id).await?;
        if order.lines_with_id(line_id).next().is_none() {
            return Err(ServiceError::BadRequest(format!(
                "Error removing line from order with id {order_id}, order does not include line with id {line_id}"
            )));
        }

        order.lines.retain(|l| !l.has_id(line_id));
        self.store
            .save_order(order)
            .await
            .map_err(|e| fault("delete_order_line", &public_message, e))?;

        tracing::info!(order_id = %order_id, line_id = %line_id, "order line removed");
        Ok(())
    }

    async fn load_order(&self, id: OrderId) -> ServiceResult<Order> {
        let public_message = format!("Error fetching order with id {id}");

        let mut matches = self
            .store
            .orders_with_id(id)
            .await
            .map_err(|e| fault("get_order", &public_message, e))?;

        match matches.len() {
            0 => Err(ServiceError::NotFound("Order not found".to_string())),
            1 => Ok(matches.remove(0)),
            n => Err(fault(
                "get_order",
                &public_message,
                format!("{n} duplicate matches found"),
            )),
        }
    }

    /// Looks up a SKU that must appear in the catalog exactly once.
    async fn resolve_sku(
        &self,
        code: &SkuCode,
        method: &'static str,
        public_message: &str,
        not_found_message: String,
    ) -> ServiceResult<Sku> {
        let mut matches = self
            .store
            .skus_with_code(code)
            .await
            .map_err(|e| fault(method, public_message, e))?;

        match matches.len() {
            0 => Err(ServiceError::BadRequest(not_found_message)),
            1 => Ok(matches.remove(0)),
            n => Err(fault(
                method,
                public_message,
                format!("{n} duplicate matches found for sku id {code}"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use order_store::{InMemoryOrderStore, OrderLine};

    fn service_with_demo_data() -> OrderService<InMemoryOrderStore> {
        OrderService::new(InMemoryOrderStore::with_demo_data())
    }

    #[tokio::test]
    async fn test_get_skus() {
        let service = service_with_demo_data();
        let skus = service.get_skus().await.unwrap();
        assert_eq!(skus.len(), 4);
    }

    #[tokio::test]
    async fn test_get_orders() {
        let service = service_with_demo_data();
        let orders = service.get_orders().await.unwrap();
        assert_eq!(orders.len(), 2);
    }

    #[tokio::test]
    async fn test_create_empty_order() {
        let service = OrderService::new(InMemoryOrderStore::new());

        let id = service.create_order(None).await.unwrap();

        assert_eq!(id, OrderId::new(1));
        let order = service.get_order(id).await.unwrap();
        assert!(order.is_empty());
    }

    #[tokio::test]
    async fn test_create_order_with_lines_uses_catalog_names() {
        let service = OrderService::new(InMemoryOrderStore::new());
        let cmd = CreateOrder::with_lines(vec![
            OrderLineInput::new("A1", 2),
            OrderLineInput::new("B1", 1),
        ]);

        let id = service.create_order(Some(cmd)).await.unwrap();

        let order = service.get_order(id).await.unwrap();
        assert_eq!(order.line_count(), 2);
        assert_eq!(order.lines[0].sku.display_name, "Product A1");
        assert_eq!(order.lines[1].sort_order, Some(20));
    }

    #[tokio::test]
    async fn test_create_order_rejects_duplicate_skus() {
        let service = OrderService::new(InMemoryOrderStore::new());
        let cmd = CreateOrder::with_lines(vec![
            OrderLineInput::new("A1", 2),
            OrderLineInput::new("A1", 3),
        ]);

        let err = service.create_order(Some(cmd)).await.unwrap_err();

        assert!(matches!(err, ServiceError::BadRequest(_)));
        assert_eq!(service.store().write_count(), 0);
    }

    #[tokio::test]
    async fn test_create_order_rejects_unknown_sku() {
        let service = OrderService::new(InMemoryOrderStore::new());
        let cmd = CreateOrder::with_lines(vec![OrderLineInput::new("Z9", 1)]);

        let err = service.create_order(Some(cmd)).await.unwrap_err();

        assert_eq!(
            err,
            ServiceError::BadRequest(
                "Error creating new Order, sku with code Z9 not found".to_string()
            )
        );
    }

    #[tokio::test]
    async fn test_get_order_not_found() {
        let service = service_with_demo_data();
        let err = service.get_order(OrderId::new(99)).await.unwrap_err();
        assert_eq!(err, ServiceError::NotFound("Order not found".to_string()));
    }

    #[tokio::test]
    async fn test_get_order_with_duplicate_records() {
        let store = InMemoryOrderStore::new();
        store.seed_order(Order::new(OrderId::new(1), vec![])).await;
        store.seed_order(Order::new(OrderId::new(1), vec![])).await;
        let service = OrderService::new(store);

        let err = service.get_order(OrderId::new(1)).await.unwrap_err();

        assert_eq!(
            err,
            ServiceError::Internal("Error fetching order with id 1".to_string())
        );
    }

    #[tokio::test]
    async fn test_update_existing_line_quantity() {
        let service = service_with_demo_data();

        let line_id = service
            .update_order_line(
                OrderId::new(1),
                OrderLineInput::existing(LineId::new(2), "A2", 9),
            )
            .await
            .unwrap();

        assert_eq!(line_id, LineId::new(2));
        let order = service.get_order(OrderId::new(1)).await.unwrap();
        let line = order.lines_with_id(LineId::new(2)).next().unwrap();
        assert_eq!(line.quantity, 9);
    }

    #[tokio::test]
    async fn test_add_new_line() {
        let service = service_with_demo_data();

        let line_id = service
            .update_order_line(OrderId::new(2), OrderLineInput::new("A1", 1))
            .await
            .unwrap();

        assert_eq!(line_id, LineId::new(6));
        let order = service.get_order(OrderId::new(2)).await.unwrap();
        assert_eq!(order.line_count(), 3);
    }

    #[tokio::test]
    async fn test_update_rejects_zero_quantity() {
        let service = service_with_demo_data();

        let err = service
            .update_order_line(OrderId::new(2), OrderLineInput::new("A1", 0))
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_update_with_duplicate_line_ids() {
        let store = InMemoryOrderStore::new();
        let line = OrderLine::new(Sku::new("A1", "Product A1"), 1)
            .with_id(LineId::new(1))
            .with_sort_order(10);
        store
            .seed_order(Order::new(OrderId::new(1), vec![line.clone(), line]))
            .await;
        let service = OrderService::new(store);

        let err = service
            .update_order_line(
                OrderId::new(1),
                OrderLineInput::existing(LineId::new(1), "A1", 4),
            )
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ServiceError::Internal("Error saving order with id 1".to_string())
        );
        assert_eq!(service.store().write_count(), 0);
    }

    #[tokio::test]
    async fn test_delete_line() {
        let service = service_with_demo_data();

        service
            .delete_order_line(OrderId::new(1), LineId::new(2))
            .await
            .unwrap();

        let order = service.get_order(OrderId::new(1)).await.unwrap();
        assert_eq!(order.line_count(), 2);
        assert!(order.lines_with_id(LineId::new(2)).next().is_none());
    }

    #[tokio::test]
    async fn test_clear_order() {
        let service = service_with_demo_data();

        service.clear_order(OrderId::new(2)).await.unwrap();

        let order = service.get_order(OrderId::new(2)).await.unwrap();
        assert!(order.is_empty());
        assert_eq!(service.store().write_count(), 1);
    }
}
