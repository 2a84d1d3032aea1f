//! Price history handler.

use axum::Json;
use axum::extract::State;

use crate::dto::HistoryEntry;
use crate::error::HttpError;
use crate::extract::ProfileIdPath;
use crate::state::AppState;

/// Snapshots for a profile, oldest first. Unknown ids yield an empty list.
pub async fn list(
    State(state): State<AppState>,
    ProfileIdPath(id): ProfileIdPath,
) -> Result<Json<Vec<HistoryEntry>>, HttpError> {
    let history = state.core.history().history(id).await?;
    Ok(Json(history.into_iter().map(HistoryEntry::from).collect()))
}
