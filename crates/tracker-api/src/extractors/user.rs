//! Caller identity extractors.
//!
//! The caller is named by the `X-Tracker-User` header. Authentication
//! proper happens in front of this service; the header carries the
//! already-authenticated username.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use tracker_core::error::AppError;
use tracker_entity::user::ApplicationUser;
use tracker_service::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying the caller's username.
pub const USER_HEADER: &str = "x-tracker-user";

/// The calling user, or `None` for anonymous requests.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// Resolved user.
    pub user: Option<ApplicationUser>,
    /// Request origin, from `X-Forwarded-For` when present.
    pub remote_address: Option<String>,
}

impl CurrentUser {
    /// Build a service-layer context for this caller.
    pub fn context(&self) -> RequestContext {
        RequestContext::new(self.user.clone(), self.remote_address.clone())
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let remote_address = parts
            .headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        let username = parts
            .headers
            .get(USER_HEADER)
            .map(|v| {
                v.to_str()
                    .map_err(|_| AppError::authentication("Invalid X-Tracker-User header"))
            })
            .transpose()?
            .map(str::trim)
            .filter(|v| !v.is_empty());

        let Some(username) = username else {
            return Ok(Self {
                user: None,
                remote_address,
            });
        };

        let user = state
            .stores
            .directory
            .user_by_name(username)
            .await?
            .filter(|u| u.active)
            .ok_or_else(|| AppError::authentication(format!("Unknown user '{username}'")))?;

        Ok(Self {
            user: Some(user),
            remote_address,
        })
    }
}

/// A caller who belongs to the configured administrators group.
#[derive(Debug, Clone)]
pub struct AdminUser {
    /// The administrator.
    pub user: ApplicationUser,
    /// Request origin.
    pub remote_address: Option<String>,
}

impl AdminUser {
    /// Build a service-layer context for this caller.
    pub fn context(&self) -> RequestContext {
        RequestContext::new(Some(self.user.clone()), self.remote_address.clone())
    }
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let current = CurrentUser::from_request_parts(parts, state).await?;
        let user = current
            .user
            .ok_or_else(|| AppError::authentication("Administrator login required"))?;

        let admin_group = &state.config.server.admin_group;
        if !state
            .stores
            .directory
            .is_user_in_group(&user.username, admin_group)
            .await?
        {
            tracing::warn!(user = %user.username, "Non-administrator called an administration endpoint");
            return Err(AppError::authorization(format!(
                "'{}' is not a member of '{admin_group}'",
                user.username
            ))
            .into());
        }

        Ok(Self {
            user,
            remote_address: current.remote_address,
        })
    }
}
