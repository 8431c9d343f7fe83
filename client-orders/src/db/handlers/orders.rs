//! Database repository for orders.

use std::collections::HashMap;

use sqlx::PgConnection;
use tracing::instrument;

use crate::db::{
    errors::Result,
    handlers::repository::Repository,
    models::orders::{Order, OrderCreateDBRequest},
};
use crate::types::{ClientId, OrderId, abbrev_uuid};

pub struct Orders<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Orders<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// List the orders placed by one client, newest first.
    ///
    /// This does not check that the client exists: an unknown client simply has no
    /// orders. Callers that need to distinguish the two use `Clients::exists` on the
    /// same connection.
    #[instrument(skip(self), fields(client_id = %abbrev_uuid(&client_id)), err)]
    pub async fn list_by_client(&mut self, client_id: ClientId) -> Result<Vec<Order>> {
        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, created_at, client_id, name, address, zip_code, city, price
            FROM orders
            WHERE client_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(client_id)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(orders)
    }

    /// Fetch the orders of many clients in a single query, keyed by client ID.
    ///
    /// Clients without orders are absent from the map. Each client's orders are
    /// newest first.
    #[instrument(skip(self, client_ids), fields(count = client_ids.len()), err)]
    pub async fn list_by_clients(&mut self, client_ids: &[ClientId]) -> Result<HashMap<ClientId, Vec<Order>>> {
        if client_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, created_at, client_id, name, address, zip_code, city, price
            FROM orders
            WHERE client_id = ANY($1)
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(client_ids)
        .fetch_all(&mut *self.db)
        .await?;

        let mut by_client: HashMap<ClientId, Vec<Order>> = HashMap::new();
        for order in orders {
            by_client.entry(order.client_id).or_default().push(order);
        }

        Ok(by_client)
    }
}

#[async_trait::async_trait]
impl<'c> Repository for Orders<'c> {
    type CreateRequest = OrderCreateDBRequest;
    type Response = Order;
    type Id = OrderId;

    #[instrument(skip(self, request), fields(client_id = %abbrev_uuid(&request.client_id)), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders (client_id, name, address, zip_code, city, price)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, created_at, client_id, name, address, zip_code, city, price
            "#,
        )
        .bind(request.client_id)
        .bind(&request.name)
        .bind(&request.address)
        .bind(&request.zip_code)
        .bind(&request.city)
        .bind(request.price)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(order)
    }

    #[instrument(skip(self), fields(order_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, created_at, client_id, name, address, zip_code, city, price
            FROM orders
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(order)
    }

    #[instrument(skip(self), err)]
    async fn list(&mut self) -> Result<Vec<Self::Response>> {
        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, created_at, client_id, name, address, zip_code, city, price
            FROM orders
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&mut *self.db)
        .await?;

        Ok(orders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::errors::DbError;
    use crate::db::handlers::Clients;
    use crate::db::models::clients::ClientCreateDBRequest;
    use rust_decimal::Decimal;
    use sqlx::PgPool;
    use std::str::FromStr;
    use uuid::Uuid;

    async fn create_client(conn: &mut PgConnection, email: &str) -> ClientId {
        let mut repo = Clients::new(conn);
        repo.create(&ClientCreateDBRequest {
            email: email.to_string(),
            is_active: true,
            user_id: None,
            client_name: None,
        })
        .await
        .unwrap()
        .id
    }

    fn order_request(client_id: ClientId, name: &str, price: &str) -> OrderCreateDBRequest {
        OrderCreateDBRequest {
            client_id,
            name: name.to_string(),
            address: None,
            zip_code: None,
            city: None,
            price: Decimal::from_str(price).unwrap(),
        }
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_order(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let client_id = create_client(&mut conn, "buyer@example.com").await;

        let mut repo = Orders::new(&mut conn);
        let request = OrderCreateDBRequest {
            address: Some("1 Main St".to_string()),
            zip_code: Some("12345".to_string()),
            city: Some("Springfield".to_string()),
            ..order_request(client_id, "Widget", "19.99")
        };
        let order = repo.create(&request).await.unwrap();

        assert_eq!(order.client_id, client_id);
        assert_eq!(order.name, "Widget");
        assert_eq!(order.address.as_deref(), Some("1 Main St"));
        assert_eq!(order.zip_code.as_deref(), Some("12345"));
        assert_eq!(order.city.as_deref(), Some("Springfield"));
        assert_eq!(order.price, Decimal::from_str("19.99").unwrap());

        let fetched = repo.get_by_id(order.id).await.unwrap().expect("order should exist");
        assert_eq!(fetched.id, order.id);
        assert_eq!(fetched.created_at, order.created_at);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_order_for_unknown_client_violates_foreign_key(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Orders::new(&mut conn);

        let err = repo.create(&order_request(Uuid::new_v4(), "Orphan", "1")).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_negative_price_violates_check_constraint(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let client_id = create_client(&mut conn, "neg@example.com").await;

        let mut repo = Orders::new(&mut conn);
        let err = repo.create(&order_request(client_id, "Refund", "-1")).await.unwrap_err();
        assert!(matches!(err, DbError::CheckViolation { .. }));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_list_by_client_newest_first(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let client_id = create_client(&mut conn, "many@example.com").await;
        let other_id = create_client(&mut conn, "other@example.com").await;

        let mut repo = Orders::new(&mut conn);
        let first = repo.create(&order_request(client_id, "First", "1")).await.unwrap();
        let second = repo.create(&order_request(client_id, "Second", "2")).await.unwrap();
        repo.create(&order_request(other_id, "Elsewhere", "3")).await.unwrap();

        let orders = repo.list_by_client(client_id).await.unwrap();
        let ids: Vec<OrderId> = orders.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_same_transaction_orders_are_listed_in_stable_order(pool: PgPool) {
        let mut tx = pool.begin().await.unwrap();
        let client_id = create_client(&mut tx, "batch@example.com").await;

        let mut repo = Orders::new(&mut tx);
        let mut created = Vec::new();
        for name in ["a", "b", "c", "d"] {
            created.push(repo.create(&order_request(client_id, name, "1")).await.unwrap());
        }

        // now() is fixed for the whole transaction, so only the id separates these rows
        assert!(created.iter().all(|o| o.created_at == created[0].created_at));

        let mut expected: Vec<OrderId> = created.iter().map(|o| o.id).collect();
        expected.sort_by(|a, b| b.cmp(a));

        let by_client: Vec<OrderId> = repo.list_by_client(client_id).await.unwrap().iter().map(|o| o.id).collect();
        let all: Vec<OrderId> = repo.list().await.unwrap().iter().map(|o| o.id).collect();
        let grouped: Vec<OrderId> = repo.list_by_clients(&[client_id]).await.unwrap()[&client_id]
            .iter()
            .map(|o| o.id)
            .collect();

        assert_eq!(by_client, expected);
        assert_eq!(all, expected);
        assert_eq!(grouped, expected);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_list_by_client_without_orders_is_empty(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let client_id = create_client(&mut conn, "none@example.com").await;

        let mut repo = Orders::new(&mut conn);
        assert!(repo.list_by_client(client_id).await.unwrap().is_empty());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_list_by_clients_groups_orders(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let a = create_client(&mut conn, "a@example.com").await;
        let b = create_client(&mut conn, "b@example.com").await;
        let c = create_client(&mut conn, "c@example.com").await;

        let mut repo = Orders::new(&mut conn);
        repo.create(&order_request(a, "A1", "1")).await.unwrap();
        repo.create(&order_request(a, "A2", "2")).await.unwrap();
        repo.create(&order_request(b, "B1", "3")).await.unwrap();

        let grouped = repo.list_by_clients(&[a, b, c]).await.unwrap();
        assert_eq!(grouped.get(&a).map(Vec::len), Some(2));
        assert_eq!(grouped.get(&b).map(Vec::len), Some(1));
        assert!(!grouped.contains_key(&c));
        assert_eq!(grouped[&a][0].name, "A2");

        assert!(repo.list_by_clients(&[]).await.unwrap().is_empty());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_list_all_orders(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let a = create_client(&mut conn, "all@example.com").await;

        let mut repo = Orders::new(&mut conn);
        assert!(repo.list().await.unwrap().is_empty());
        repo.create(&order_request(a, "One", "0")).await.unwrap();
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }
}
