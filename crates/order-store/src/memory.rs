use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    NewOrder, Order, OrderQuery, Result, Sku, SkuQuery, demo_catalog, demo_orders,
    store::{OrderRecords, OrderStore},
};

/// In-memory order store implementation for testing.
///
/// Holds order records behind a lock and offers the same
/// interface as the JSON file store. The catalog is fixed at
/// construction time.
#[derive(Clone)]
pub struct InMemoryOrderStore {
    records: Arc<RwLock<OrderRecords>>,
    catalog: Arc<Vec<Sku>>,
    writes: Arc<AtomicUsize>,
}

impl Default for InMemoryOrderStore {
    fn default() -> Self {
        Self::with_catalog(demo_catalog())
    }
}

impl InMemoryOrderStore {
    /// Creates an empty store backed by the demo catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with the demo orders.
    pub fn with_demo_data() -> Self {
        Self {
            records: Arc::new(RwLock::new(OrderRecords::new(demo_orders()))),
            ..Self::default()
        }
    }

    /// Creates an empty store backed by the given catalog.
    ///
    /// The catalog is taken verbatim; duplicate codes are kept.
    pub fn with_catalog(catalog: Vec<Sku>) -> Self {
        Self {
            records: Arc::new(RwLock::new(OrderRecords::default())),
            catalog: Arc::new(catalog),
            writes: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Inserts a raw record without assigning IDs or checking for
    /// duplicates. Does not count as a write.
    pub async fn seed_order(&self, order: Order) {
        self.records.write().await.orders.push(order);
    }

    /// Returns the number of stored records.
    pub async fn order_count(&self) -> usize {
        self.records.read().await.orders.len()
    }

    /// Returns how many create/save calls have succeeded.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::SeqCst);
        metrics::counter!("order_store_writes_total", "store" => "memory").increment(1);
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn find_orders(&self, query: OrderQuery) -> Result<Vec<Order>> {
        let records = self.records.read().await;
        Ok(query.apply(&records.orders))
    }

    async fn find_skus(&self, query: SkuQuery) -> Result<Vec<Sku>> {
        Ok(query.apply(&self.catalog))
    }

    async fn create_order(&self, order: NewOrder) -> Result<Order> {
        let mut records = self.records.write().await;
        let created = records.insert(order)?;
        self.record_write();

        tracing::debug!(order_id = %created.id, lines = created.line_count(), "order created");
        Ok(created)
    }

    async fn save_order(&self, order: Order) -> Result<Order> {
        let mut records = self.records.write().await;
        let saved = records.replace(order)?;
        self.record_write();

        tracing::debug!(order_id = %saved.id, lines = saved.line_count(), "order saved");
        Ok(saved)
    }
}
