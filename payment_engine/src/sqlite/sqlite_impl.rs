//! `SqliteDatabase` is the SQLite implementation of [`PaymentStore`].
use std::fmt::Debug;

use sqlx::SqlitePool;

use super::db::{new_pool, payments};
use crate::{
    db_types::{NewPaymentRecord, PaymentRecord, PaymentStatus},
    traits::{PaymentStore, StoreError},
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl SqliteDatabase {
    /// Creates a new database API object
    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = new_pool(url, max_connections).await?;
        Ok(Self { url: url.to_string(), pool })
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Brings the schema up to date.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./src/sqlite/migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::DatabaseError(format!("Migration failed. {e}")))
    }

    pub async fn close(&mut self) -> Result<(), sqlx::Error> {
        self.pool.close().await;
        Ok(())
    }
}

impl PaymentStore for SqliteDatabase {
    async fn insert_payment(&self, payment: NewPaymentRecord) -> Result<PaymentRecord, StoreError> {
        let mut conn = self.pool.acquire().await?;
        payments::insert_payment(payment, &mut conn).await
    }

    async fn fetch_payment(&self, id: i64) -> Result<Option<PaymentRecord>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        payments::fetch_payment(id, &mut conn).await
    }

    async fn fetch_payment_by_order_id(&self, order_id: &str) -> Result<Option<PaymentRecord>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        payments::fetch_payment_by_order_id(order_id, &mut conn).await
    }

    async fn mark_payment_status(&self, order_id: &str, status: PaymentStatus) -> Result<u64, StoreError> {
        let mut conn = self.pool.acquire().await?;
        payments::mark_payment_status(order_id, status, &mut conn).await
    }
}
