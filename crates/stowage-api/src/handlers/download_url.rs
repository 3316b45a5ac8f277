use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct DownloadUrlResponse {
    /// Time-limited presigned URL for the workspace's backup content
    pub url: String,
}

#[utoipa::path(
    get,
    path = "/api/v1/workspaces/{owner_id}/{workspace_id}/download-url",
    tag = "workspaces",
    params(
        ("owner_id" = String, Path, description = "Owner ID"),
        ("workspace_id" = String, Path, description = "Workspace ID")
    ),
    responses(
        (status = 200, description = "Signed download URL", body = DownloadUrlResponse),
        (status = 404, description = "Workspace backup not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state),
    fields(
        owner_id = %owner_id,
        workspace_id = %workspace_id,
        operation = "download_url_workspace"
    )
)]
pub async fn download_url_workspace(
    State(state): State<Arc<AppState>>,
    Path((owner_id, workspace_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, HttpAppError> {
    let url = state.workspace.download_url(&owner_id, &workspace_id).await?;

    Ok(Json(DownloadUrlResponse { url }))
}
