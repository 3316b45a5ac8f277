pub mod delete_workspace;
pub mod download_url;
pub mod health;
