use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use std::sync::Arc;
use stowage_services::DeleteScope;

#[derive(Debug, Deserialize)]
pub struct DeleteWorkspaceParams {
    /// When true, delete every object under the workspace's prefix instead
    /// of only the default backup and its trail siblings.
    #[serde(default)]
    pub include_snapshots: bool,
}

#[utoipa::path(
    delete,
    path = "/api/v1/workspaces/{owner_id}/{workspace_id}",
    tag = "workspaces",
    params(
        ("owner_id" = String, Path, description = "Owner ID"),
        ("workspace_id" = String, Path, description = "Workspace ID"),
        ("include_snapshots" = Option<bool>, Query, description = "Delete all snapshots, not just the live backup")
    ),
    responses(
        (status = 204, description = "Workspace content deleted"),
        (status = 404, description = "Workspace content not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state),
    fields(
        owner_id = %owner_id,
        workspace_id = %workspace_id,
        include_snapshots = params.include_snapshots,
        operation = "delete_workspace"
    )
)]
pub async fn delete_workspace(
    State(state): State<Arc<AppState>>,
    Path((owner_id, workspace_id)): Path<(String, String)>,
    Query(params): Query<DeleteWorkspaceParams>,
) -> Result<impl IntoResponse, HttpAppError> {
    let scope = DeleteScope::from_include_snapshots(params.include_snapshots);
    state
        .workspace
        .delete_workspace(&owner_id, &workspace_id, scope)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
