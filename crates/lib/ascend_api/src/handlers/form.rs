//! Form schema endpoint.

use ascend_core::form::{FIELDS, FieldSpec};
use axum::Json;

/// `GET /api/form/schema` — field names, labels, placeholders and messages, in form order.
pub async fn schema_handler() -> Json<&'static [FieldSpec]> {
    Json(FIELDS.as_slice())
}
