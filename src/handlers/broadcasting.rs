use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, CurrentUser};
use crate::realtime::{authorize_channel, ChannelAccess};

#[derive(Debug, Deserialize)]
pub struct ChannelAuthRequest {
    pub channel_name: Option<String>,
}

/// POST /broadcasting/auth - Authorize a private channel subscription.
///
/// Grants only when the resolved user's id matches the id embedded in the
/// channel name. Every other case, including malformed names and channels
/// of other users, is the same opaque denial.
pub async fn authorize(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(payload): Json<ChannelAuthRequest>,
) -> ApiResult<Value> {
    let channel_name = payload.channel_name.filter(|c| !c.trim().is_empty()).ok_or_else(|| {
        let mut errors = HashMap::new();
        errors.insert(
            "channel_name".to_string(),
            "The channel name field is required".to_string(),
        );
        ApiError::unprocessable_entity("Validation errors", errors)
    })?;

    match authorize_channel(&user, &channel_name) {
        ChannelAccess::Granted => Ok(ApiResponse::success(json!({
            "channel": channel_name,
            "granted": true,
        }))),
        ChannelAccess::Denied => {
            tracing::debug!(user_id = %user.id, channel = %channel_name, "channel subscription denied");
            Err(ApiError::forbidden("Channel authorization denied"))
        }
    }
}
