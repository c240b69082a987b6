use larder_core::{models::Account, AppError};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Repository for accounts.
///
/// Accounts are materialized from verified auth claims; this repository also
/// serves as the contact resolver for the daily notifier.
#[derive(Clone)]
pub struct AccountRepository {
    pool: PgPool,
}

impl AccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Upsert an account from auth claims. A newer email from the identity
    /// provider replaces the stored one; a claim without email leaves the
    /// stored address untouched.
    #[tracing::instrument(skip(self), fields(db.table = "accounts", db.operation = "upsert", db.record_id = %account_id))]
    pub async fn upsert(
        &self,
        account_id: Uuid,
        email: Option<&str>,
    ) -> Result<Account, AppError> {
        let account = sqlx::query_as::<Postgres, Account>(
            r#"
            INSERT INTO accounts (id, email)
            VALUES ($1, $2)
            ON CONFLICT (id) DO UPDATE
                SET email = COALESCE(EXCLUDED.email, accounts.email),
                    updated_at = NOW()
            RETURNING id, email, created_at, updated_at
            "#,
        )
        .bind(account_id)
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(account)
    }

    /// Contact address for notification. `Ok(None)` means the account has no
    /// usable address (unknown account or no email on file) and the notifier
    /// should skip it; lookup failures stay errors.
    #[tracing::instrument(skip(self), fields(db.table = "accounts", db.operation = "select", db.record_id = %account_id))]
    pub async fn contact_email(&self, account_id: Uuid) -> Result<Option<String>, AppError> {
        let email: Option<Option<String>> =
            sqlx::query_scalar("SELECT email FROM accounts WHERE id = $1")
                .bind(account_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(email.flatten().filter(|e| !e.is_empty()))
    }
}
