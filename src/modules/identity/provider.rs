use async_trait::async_trait;
use sqlx::MySqlPool;

use crate::core::Result;
use crate::middleware::auth::verify_api_key;
use crate::modules::identity::models::{CurrentUser, Role};

/// Resolves an API key to a principal.
///
/// `Ok(None)` means the key is unknown, inactive or wrong; `Err` is reserved
/// for the backing store failing.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn authenticate(&self, api_key: &str) -> Result<Option<CurrentUser>>;
}

#[derive(Debug, Clone, sqlx::FromRow)]
struct ApiKeyRecord {
    user_id: String,
    user_name: String,
    key_hash: String,
    is_active: bool,
}

/// Keys of the form `<key_id>.<secret>`, with the secret stored as an Argon2 hash
pub struct MySqlIdentityProvider {
    pool: MySqlPool,
}

impl MySqlIdentityProvider {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdentityProvider for MySqlIdentityProvider {
    async fn authenticate(&self, api_key: &str) -> Result<Option<CurrentUser>> {
        let Some((key_id, secret)) = api_key.split_once('.') else {
            return Ok(None);
        };

        let record = sqlx::query_as::<_, ApiKeyRecord>(
            r#"
            SELECT k.user_id, u.name AS user_name, k.key_hash, k.is_active
            FROM api_keys k
            JOIN users u ON u.id = k.user_id
            WHERE k.id = ?
            LIMIT 1
            "#,
        )
        .bind(key_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(record) = record else {
            return Ok(None);
        };

        if !record.is_active || !verify_api_key(secret, &record.key_hash)? {
            return Ok(None);
        }

        let role_names: Vec<String> =
            sqlx::query_scalar("SELECT role FROM user_roles WHERE user_id = ?")
                .bind(&record.user_id)
                .fetch_all(&self.pool)
                .await?;

        let roles = role_names.iter().filter_map(|name| Role::parse(name)).collect();

        Ok(Some(CurrentUser::new(record.user_id, record.user_name, roles)))
    }
}
