use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `sim_styles` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Style {
    pub id: String,
    pub name: String,
}
