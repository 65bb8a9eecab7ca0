use chrono::Utc;
use log::{debug, trace};
use sqlx::{sqlite::SqliteRow, types::Json, FromRow, Row, SqliteConnection};

use crate::{
    db_types::{NewPaymentRecord, PaymentRecord, PaymentStatus, Product},
    traits::StoreError,
};

impl FromRow<'_, SqliteRow> for PaymentRecord {
    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        let Json(products) = row.try_get::<Json<Vec<Product>>, _>("products")?;
        Ok(Self {
            id: row.try_get("id")?,
            order_id: row.try_get("order_id")?,
            client_id: row.try_get("client_id")?,
            products,
            amount: row.try_get("amount")?,
            status: row.try_get("status")?,
            qr_code: row.try_get("qr_code")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

/// Inserts a new payment record using the given connection. New records are always `Pending`.
pub async fn insert_payment(payment: NewPaymentRecord, conn: &mut SqliteConnection) -> Result<PaymentRecord, StoreError> {
    let now = Utc::now();
    let products = Json(payment.products().to_vec());
    let amount = payment.amount();
    let record: PaymentRecord = sqlx::query_as(
        r#"
            INSERT INTO payments (
                order_id,
                client_id,
                products,
                amount,
                status,
                qr_code,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *;
        "#,
    )
    .bind(payment.order_id)
    .bind(payment.client_id)
    .bind(products)
    .bind(amount)
    .bind(PaymentStatus::Pending)
    .bind(payment.qr_code)
    .bind(now)
    .bind(now)
    .fetch_one(conn)
    .await?;
    debug!("🗃️ Payment #{} for order {} inserted", record.id, record.order_id);
    Ok(record)
}

pub async fn fetch_payment(id: i64, conn: &mut SqliteConnection) -> Result<Option<PaymentRecord>, StoreError> {
    let payment = sqlx::query_as("SELECT * FROM payments WHERE id = $1").bind(id).fetch_optional(conn).await?;
    Ok(payment)
}

/// Returns the last entry in the payments table for the corresponding `order_id`
pub async fn fetch_payment_by_order_id(
    order_id: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<PaymentRecord>, StoreError> {
    let payment = sqlx::query_as("SELECT * FROM payments WHERE order_id = $1 ORDER BY id DESC LIMIT 1")
        .bind(order_id)
        .fetch_optional(conn)
        .await?;
    Ok(payment)
}

/// Moves every `Pending` payment for `order_id` to `status`. Payments in a terminal status are not touched.
pub async fn mark_payment_status(
    order_id: &str,
    status: PaymentStatus,
    conn: &mut SqliteConnection,
) -> Result<u64, StoreError> {
    if !status.is_terminal() {
        return Err(StoreError::InvalidStatusTransition(status));
    }
    let result = sqlx::query("UPDATE payments SET status = $1, updated_at = $2 WHERE order_id = $3 AND status = $4")
        .bind(status)
        .bind(Utc::now())
        .bind(order_id)
        .bind(PaymentStatus::Pending)
        .execute(conn)
        .await?;
    let updated = result.rows_affected();
    trace!("🗃️ {updated} payment(s) for order {order_id} moved to {status}");
    Ok(updated)
}
