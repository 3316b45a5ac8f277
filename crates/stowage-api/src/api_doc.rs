use utoipa::OpenApi;

/// OpenAPI document for the workspace content service.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::download_url::download_url_workspace,
        crate::handlers::delete_workspace::delete_workspace,
    ),
    components(schemas(
        crate::error::ErrorResponse,
        crate::handlers::download_url::DownloadUrlResponse,
    )),
    tags(
        (name = "workspaces", description = "Workspace content lifecycle operations")
    )
)]
pub struct ApiDoc;
