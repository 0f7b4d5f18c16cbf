//! Repository for the `clients` table.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::client::{Client, ClientListQuery, CreateClient, UpdateClient};

/// Column list for `clients` queries.
const COLUMNS: &str = "\
    id, stringer_id, full_name, email, phone, notes, \
    default_tension_main, default_tension_cross, \
    preferred_main_brand_id, preferred_main_model_id, \
    preferred_cross_brand_id, preferred_cross_model_id, \
    created_at, updated_at";

/// Maximum page size for client listing.
const MAX_LIMIT: i64 = 100;

/// Default page size for client listing.
const DEFAULT_LIMIT: i64 = 50;

/// Provides CRUD operations for clients.
pub struct ClientRepo;

impl ClientRepo {
    /// Insert a new client.
    pub async fn create(pool: &PgPool, input: &CreateClient) -> Result<Client, sqlx::Error> {
        let query = format!(
            "INSERT INTO clients \
                (stringer_id, full_name, email, phone, notes, \
                 default_tension_main, default_tension_cross, \
                 preferred_main_brand_id, preferred_main_model_id, \
                 preferred_cross_brand_id, preferred_cross_model_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(input.stringer_id)
            .bind(&input.full_name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.notes)
            .bind(input.default_tension_main)
            .bind(input.default_tension_cross)
            .bind(input.preferred_main_brand_id)
            .bind(input.preferred_main_model_id)
            .bind(input.preferred_cross_brand_id)
            .bind(input.preferred_cross_model_id)
            .fetch_one(pool)
            .await
    }

    /// Find a client by its ID.
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Client>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clients WHERE id = $1");
        sqlx::query_as::<_, Client>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List clients, optionally filtered to one stringer, ordered by name.
    pub async fn list(
        pool: &PgPool,
        params: &ClientListQuery,
    ) -> Result<Vec<Client>, sqlx::Error> {
        let limit = params.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
        let offset = params.offset.unwrap_or(0);

        let where_clause = if params.stringer_id.is_some() {
            "WHERE stringer_id = $3"
        } else {
            ""
        };
        let query = format!(
            "SELECT {COLUMNS} FROM clients \
             {where_clause} \
             ORDER BY full_name, id \
             LIMIT $1 OFFSET $2"
        );

        let mut q = sqlx::query_as::<_, Client>(&query).bind(limit).bind(offset);
        if let Some(stringer_id) = params.stringer_id {
            q = q.bind(stringer_id);
        }
        q.fetch_all(pool).await
    }

    /// Update a client. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        input: &UpdateClient,
    ) -> Result<Option<Client>, sqlx::Error> {
        let query = format!(
            "UPDATE clients SET \
                full_name = COALESCE($2, full_name), \
                email = COALESCE($3, email), \
                phone = COALESCE($4, phone), \
                notes = COALESCE($5, notes), \
                default_tension_main = COALESCE($6, default_tension_main), \
                default_tension_cross = COALESCE($7, default_tension_cross), \
                preferred_main_brand_id = COALESCE($8, preferred_main_brand_id), \
                preferred_main_model_id = COALESCE($9, preferred_main_model_id), \
                preferred_cross_brand_id = COALESCE($10, preferred_cross_brand_id), \
                preferred_cross_model_id = COALESCE($11, preferred_cross_model_id), \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(id)
            .bind(&input.full_name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.notes)
            .bind(input.default_tension_main)
            .bind(input.default_tension_cross)
            .bind(input.preferred_main_brand_id)
            .bind(input.preferred_main_model_id)
            .bind(input.preferred_cross_brand_id)
            .bind(input.preferred_cross_model_id)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a client. Racquets and jobs cascade at the database
    /// level. Returns `false` when the client does not exist.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
