//! Database repository for clients.

use sqlx::PgConnection;
use tracing::instrument;

use crate::db::{
    errors::Result,
    handlers::{orders::Orders, repository::Repository},
    models::clients::{Client, ClientCreateDBRequest, ClientWithOrders},
};
use crate::types::{ClientId, abbrev_uuid};

pub struct Clients<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Clients<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Whether a client with this ID exists.
    #[instrument(skip(self), fields(client_id = %abbrev_uuid(&id)), err)]
    pub async fn exists(&mut self, id: ClientId) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM clients WHERE id = $1)")
            .bind(id)
            .fetch_one(&mut *self.db)
            .await?;

        Ok(exists)
    }

    /// List all clients, newest first, each with its orders attached.
    ///
    /// Orders are loaded for the whole page in one extra query rather than one
    /// query per client.
    #[instrument(skip(self), err)]
    pub async fn list_with_orders(&mut self) -> Result<Vec<ClientWithOrders>> {
        let clients = self.list().await?;
        let ids: Vec<ClientId> = clients.iter().map(|c| c.id).collect();

        let mut orders = Orders::new(&mut *self.db).list_by_clients(&ids).await?;

        Ok(clients
            .into_iter()
            .map(|client| {
                let orders = orders.remove(&client.id).unwrap_or_default();
                ClientWithOrders { client, orders }
            })
            .collect())
    }
}

#[async_trait::async_trait]
impl<'c> Repository for Clients<'c> {
    type CreateRequest = ClientCreateDBRequest;
    type Response = Client;
    type Id = ClientId;

    #[instrument(skip(self, request), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let client = sqlx::query_as::<_, Client>(
            r#"
            INSERT INTO clients (email, is_active, user_id, client_name)
            VALUES ($1, $2, $3, $4)
            RETURNING id, created_at, email, is_active, user_id, client_name
            "#,
        )
        .bind(&request.email)
        .bind(request.is_active)
        .bind(request.user_id)
        .bind(&request.client_name)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(client)
    }

    #[instrument(skip(self), fields(client_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let client = sqlx::query_as::<_, Client>(
            r#"
            SELECT id, created_at, email, is_active, user_id, client_name
            FROM clients
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(client)
    }

    #[instrument(skip(self), err)]
    async fn list(&mut self) -> Result<Vec<Self::Response>> {
        let clients = sqlx::query_as::<_, Client>(
            r#"
            SELECT id, created_at, email, is_active, user_id, client_name
            FROM clients
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&mut *self.db)
        .await?;

        Ok(clients)
    }
}
