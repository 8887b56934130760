//! Gitlab remotes
pub mod remote;

pub use remote::{extract_project_path, to_ssh_url, ProjectPath};

/// Default Gitlab host
pub const GITLAB_URL: &str = "gitlab.com";
