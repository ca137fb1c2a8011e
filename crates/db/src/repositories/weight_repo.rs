//! Repository for the `sim_style_class_weights` table.

use opus_core::validation::ValidWeight;
use sqlx::PgPool;

use crate::models::weight::ClassWeight;

pub struct WeightRepo;

impl WeightRepo {
    /// List a style's weights ordered by class code.
    pub async fn list_by_style(
        pool: &PgPool,
        style_id: &str,
    ) -> Result<Vec<ClassWeight>, sqlx::Error> {
        sqlx::query_as::<_, ClassWeight>(
            "SELECT class_code, weight_pct FROM sim_style_class_weights \
             WHERE style_id = $1 \
             ORDER BY class_code",
        )
        .bind(style_id)
        .fetch_all(pool)
        .await
    }

    /// Insert or overwrite a batch of weights for one style.
    ///
    /// Each class code may appear at most once in `rows`.
    pub async fn upsert_many(
        pool: &PgPool,
        style_id: &str,
        rows: &[ValidWeight],
    ) -> Result<u64, sqlx::Error> {
        if rows.is_empty() {
            return Ok(0);
        }

        let codes: Vec<&str> = rows.iter().map(|r| r.class_code.as_str()).collect();
        let pcts: Vec<i32> = rows.iter().map(|r| r.weight_pct).collect();

        let result = sqlx::query(
            "INSERT INTO sim_style_class_weights (style_id, class_code, weight_pct) \
             SELECT $1, class_code, weight_pct \
             FROM UNNEST($2::text[], $3::int4[]) AS t(class_code, weight_pct) \
             ON CONFLICT (style_id, class_code) DO UPDATE SET \
                 weight_pct = EXCLUDED.weight_pct",
        )
        .bind(style_id)
        .bind(&codes)
        .bind(&pcts)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
