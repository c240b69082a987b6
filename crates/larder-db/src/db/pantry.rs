use larder_core::{
    models::{NewPantryItem, PantryItem},
    AppError, Pantry,
};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Repository for pantry items.
///
/// Items are independent rows keyed by (account_id, id): add and remove are
/// single-row insert/delete, so concurrent edits from multiple devices cannot
/// lose each other's updates.
#[derive(Clone)]
pub struct PantryRepository {
    pool: PgPool,
}

impl PantryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List an account's items, oldest first (insertion order).
    #[tracing::instrument(skip(self), fields(db.table = "pantry_items", db.operation = "select"))]
    pub async fn list_items(&self, account_id: Uuid) -> Result<Vec<PantryItem>, AppError> {
        let items = sqlx::query_as::<Postgres, PantryItem>(
            "SELECT id, account_id, name, shelf_life_days, added_date, created_at \
             FROM pantry_items WHERE account_id = $1 ORDER BY created_at ASC",
        )
        .bind(account_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Insert a new item. The added date is assigned here (today, UTC) so the
    /// stored value is a plain calendar date from the start.
    #[tracing::instrument(skip(self, new_item), fields(db.table = "pantry_items", db.operation = "insert"))]
    pub async fn add_item(
        &self,
        account_id: Uuid,
        new_item: &NewPantryItem,
    ) -> Result<PantryItem, AppError> {
        let added_date = chrono::Utc::now().date_naive();

        let item = sqlx::query_as::<Postgres, PantryItem>(
            r#"
            INSERT INTO pantry_items (account_id, name, shelf_life_days, added_date)
            VALUES ($1, $2, $3, $4)
            RETURNING id, account_id, name, shelf_life_days, added_date, created_at
            "#,
        )
        .bind(account_id)
        .bind(new_item.name.trim())
        .bind(new_item.shelf_life_days)
        .bind(added_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(item)
    }

    /// Delete an item owned by the account. Returns false when no row matched.
    #[tracing::instrument(skip(self), fields(db.table = "pantry_items", db.operation = "delete", db.record_id = %item_id))]
    pub async fn remove_item(&self, account_id: Uuid, item_id: Uuid) -> Result<bool, AppError> {
        let rows_affected =
            sqlx::query("DELETE FROM pantry_items WHERE account_id = $1 AND id = $2")
                .bind(account_id)
                .bind(item_id)
                .execute(&self.pool)
                .await?
                .rows_affected();

        Ok(rows_affected > 0)
    }

    /// All non-empty pantries grouped by account, for the daily expiry check.
    /// Accounts without items produce no entry.
    #[tracing::instrument(skip(self), fields(db.table = "pantry_items", db.operation = "select"))]
    pub async fn list_pantries(&self) -> Result<Vec<Pantry>, AppError> {
        let rows = sqlx::query_as::<Postgres, PantryItem>(
            "SELECT id, account_id, name, shelf_life_days, added_date, created_at \
             FROM pantry_items ORDER BY account_id, created_at ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        // Rows arrive sorted by account, so grouping is a single pass.
        let mut pantries: Vec<Pantry> = Vec::new();
        for item in rows {
            match pantries.last_mut() {
                Some(pantry) if pantry.account_id == item.account_id => pantry.items.push(item),
                _ => pantries.push(Pantry {
                    account_id: item.account_id,
                    items: vec![item],
                }),
            }
        }

        Ok(pantries)
    }
}
