//! Permission query handlers.

use axum::Json;
use axum::extract::State;

use tracker_entity::permission::ProjectPermission;

use crate::dto::request::PermissionQueryParams;
use crate::dto::response::PermissionQueryResponse;
use crate::error::ApiError;
use crate::extractors::{ApiQuery, CurrentUser, QueryCache};
use crate::state::AppState;

/// GET /rest/api/2/permission-query?permission=
pub async fn get_permission_query(
    State(state): State<AppState>,
    caller: CurrentUser,
    QueryCache(cache): QueryCache,
    ApiQuery(params): ApiQuery<PermissionQueryParams>,
) -> Result<Json<PermissionQueryResponse>, ApiError> {
    let permission: ProjectPermission = params.permission.parse()?;
    let user = caller.user.as_ref();

    let query = match cache {
        Some(cache) => {
            cache
                .get_or_build(&state.query_factory, user, permission)
                .await?
        }
        None => state.query_factory.get_query(user, permission).await?,
    };

    Ok(Json(PermissionQueryResponse {
        permission_id: permission.id(),
        permission: permission.name().map(str::to_string),
        user: user.map(|u| u.key.clone()),
        query_string: query.to_string(),
        empty: query.is_empty(),
        query,
    }))
}
