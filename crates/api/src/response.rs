//! Shared response envelope types for API handlers.
//!
//! Reads use a `{ "data": ... }` envelope; writes answer with an `ok`
//! flag and the number of rows affected.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "ok": true, "upserted": n }` for bulk upserts.
#[derive(Debug, Serialize)]
pub struct UpsertResponse {
    pub ok: bool,
    pub upserted: usize,
}

/// `{ "ok": true, "deleted": n }` for bulk deletes.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub ok: bool,
    pub deleted: usize,
}
