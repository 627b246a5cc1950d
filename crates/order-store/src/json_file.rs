//! Flat JSON file store.
//!
//! A stand-in until a real database is wired up: every read parses the
//! whole file and every write rewrites it. There is no indexing.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::{
    NewOrder, Order, OrderQuery, Result, Sku, SkuQuery, demo_catalog, demo_orders,
    store::{OrderRecords, OrderStore},
};

/// On-disk layout. Files written before the line-ID high-water mark was
/// tracked hold a bare array of orders.
#[derive(Deserialize)]
#[serde(untagged)]
enum DataFile {
    Orders(Vec<Order>),
    Records(OrderRecords),
}

impl From<DataFile> for OrderRecords {
    fn from(file: DataFile) -> Self {
        match file {
            DataFile::Orders(orders) => OrderRecords::new(orders),
            DataFile::Records(records) => records,
        }
    }
}

/// Order store persisting all orders as one JSON document on disk.
///
/// The file is created with the demo orders the first time it is read.
/// Writers within the process are serialized so the file is never
/// torn, and each rewrite goes through a temporary file followed by a
/// rename.
#[derive(Clone)]
pub struct JsonFileOrderStore {
    path: PathBuf,
    catalog: Arc<Vec<Sku>>,
    write_lock: Arc<Mutex<()>>,
}

impl JsonFileOrderStore {
    /// Creates a store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            catalog: Arc::new(demo_catalog()),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Returns the path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the file, returning `None` when it does not exist yet.
    async fn read_file(&self) -> Result<Option<OrderRecords>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice::<DataFile>(&bytes)?.into())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Reads the file, seeding it first if missing.
    ///
    /// Callers must hold `write_lock`.
    async fn load_or_seed(&self) -> Result<OrderRecords> {
        if let Some(records) = self.read_file().await? {
            return Ok(records);
        }

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }
        let records = OrderRecords::new(demo_orders());
        self.persist(&records).await?;

        tracing::info!(path = %self.path.display(), "seeded order data file");
        Ok(records)
    }

    async fn load(&self) -> Result<OrderRecords> {
        if let Some(records) = self.read_file().await? {
            return Ok(records);
        }
        let _guard = self.write_lock.lock().await;
        self.load_or_seed().await
    }

    async fn persist(&self, records: &OrderRecords) -> Result<()> {
        let json = serde_json::to_vec_pretty(records)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        metrics::counter!("order_store_writes_total", "store" => "json_file").increment(1);
        Ok(())
    }
}

#[async_trait]
impl OrderStore for JsonFileOrderStore {
    async fn find_orders(&self, query: OrderQuery) -> Result<Vec<Order>> {
        let records = self.load().await?;
        Ok(query.apply(&records.orders))
    }

    async fn find_skus(&self, query: SkuQuery) -> Result<Vec<Sku>> {
        Ok(query.apply(&self.catalog))
    }

    async fn create_order(&self, order: NewOrder) -> Result<Order> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.load_or_seed().await?;
        let created = records.insert(order)?;
        self.persist(&records).await?;

        tracing::debug!(order_id = %created.id, lines = created.line_count(), "order created");
        Ok(created)
    }

    async fn save_order(&self, order: Order) -> Result<Order> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.load_or_seed().await?;
        let saved = records.replace(order)?;
        self.persist(&records).await?;

        tracing::debug!(order_id = %saved.id, lines = saved.line_count(), "order saved");
        Ok(saved)
    }
}
