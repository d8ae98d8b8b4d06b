use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use orderflow_core::{Order, OrderId, OrderStatus, OrderStore, StoreError, StoreResult};

pub struct PgOrderStore {
    pool: PgPool,
}

impl PgOrderStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: i64,
    product_id: i64,
    quantity: i64,
    order_date: DateTime<Utc>,
    order_status: String,
    amount: Decimal,
}

impl TryFrom<OrderRow> for Order {
    type Error = StoreError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let status = row
            .order_status
            .parse::<OrderStatus>()
            .map_err(|e| StoreError::Corrupt(format!("order {}: {}", row.id, e)))?;

        Ok(Order {
            id: Some(row.id),
            product_id: row.product_id,
            quantity: row.quantity,
            order_date: row.order_date,
            status,
            amount: row.amount,
        })
    }
}

fn db_err(e: sqlx::Error) -> StoreError {
    StoreError::Database(e.to_string())
}

#[async_trait]
impl OrderStore for PgOrderStore {
    async fn save(&self, order: &Order) -> StoreResult<Order> {
        let row = match order.id {
            None => {
                sqlx::query_as::<_, OrderRow>(
                    r#"
                    INSERT INTO orders (product_id, quantity, order_date, order_status, amount)
                    VALUES ($1, $2, $3, $4, $5)
                    RETURNING id, product_id, quantity, order_date, order_status, amount
                    "#,
                )
                .bind(order.product_id)
                .bind(order.quantity)
                .bind(order.order_date)
                .bind(order.status.as_str())
                .bind(order.amount)
                .fetch_one(&self.pool)
                .await
                .map_err(db_err)?
            }
            Some(id) => {
                sqlx::query_as::<_, OrderRow>(
                    r#"
                    UPDATE orders
                    SET product_id = $2, quantity = $3, order_date = $4, order_status = $5, amount = $6
                    WHERE id = $1
                    RETURNING id, product_id, quantity, order_date, order_status, amount
                    "#,
                )
                .bind(id)
                .bind(order.product_id)
                .bind(order.quantity)
                .bind(order.order_date)
                .bind(order.status.as_str())
                .bind(order.amount)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_err)?
                .ok_or(StoreError::Missing(id))?
            }
        };

        Order::try_from(row)
    }

    async fn find_by_id(&self, id: OrderId) -> StoreResult<Option<Order>> {
        let row = sqlx::query_as::<_, OrderRow>(
            "SELECT id, product_id, quantity, order_date, order_status, amount FROM orders WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.map(Order::try_from).transpose()
    }
}
