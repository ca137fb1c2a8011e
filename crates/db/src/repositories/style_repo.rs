//! Repository for the `sim_styles` table.

use sqlx::PgPool;

use crate::models::style::Style;

pub struct StyleRepo;

impl StyleRepo {
    /// List all styles ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Style>, sqlx::Error> {
        sqlx::query_as::<_, Style>("SELECT id, name FROM sim_styles ORDER BY name")
            .fetch_all(pool)
            .await
    }
}
