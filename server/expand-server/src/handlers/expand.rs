use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use expand_engine::ExpandTree;
use tracing::debug;

use crate::{
    error::{ApiError, ApiErrorResponse},
    request::{ExpandQuery, ExpandRequest},
    server::ExpandServer,
};

/// Expand a subject set into the tree of subjects it contains
#[utoipa::path(
    get,
    path = "/expand",
    params(ExpandQuery),
    responses(
        (status = 200, description = "Expansion tree of the subject set", body = ExpandTree),
        (status = 400, description = "Malformed max-depth or missing subject set field", body = ApiErrorResponse),
        (status = 404, description = "Unknown namespace or subject set", body = ApiErrorResponse),
        (status = 500, description = "Engine failure", body = ApiErrorResponse)
    ),
    tag = "read"
)]
pub async fn get_expand(
    State(server): State<ExpandServer>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<ExpandTree>, ApiError> {
    let Query(pairs) = query?;
    let request = ExpandRequest::from_query(pairs.into_iter().collect::<ExpandQuery>())?;

    debug!(subject_set = %request.subject_set, max_depth = request.max_depth, "GET /expand");

    let tree = server.adapter().expand(request).await?;
    Ok(Json(tree))
}
