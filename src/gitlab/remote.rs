//! Translate a Gitlab web URL into the SSH remote of the project
use std::fmt;

use log::debug;
use percent_encoding::percent_decode_str;
use url::Url;

use crate::errors::{MirrorKitError, MirrorKitErrorKind};

/// Segment separating the project path from the page path (`/-/tree/main`)
const PAGE_MARKER: &str = "-";

/// Suffix of git remote paths
const GIT_SUFFIX: &str = ".git";

/// Group, subgroups and repository of a project
///
/// Always holds at least two non-empty segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPath {
    /// Path segments, from the top level group to the repository
    segments: Vec<String>,
}

impl ProjectPath {
    /// Segments of the path
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Repository name, the last segment
    pub fn repo_name(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    /// SSH remote of the project on `host`
    pub fn to_ssh_url(&self, host: &str) -> String {
        to_ssh_url(&self.to_string(), host)
    }
}

impl fmt::Display for ProjectPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

/// Extract the project path from a web URL hosted on `allowed_host`
/// # Errors
/// - `InvalidInput` if the URL can't be parsed or has no host
/// - `UnsupportedHost` if the host isn't `allowed_host`
/// - `PathTooShort` if less than two segments are left
pub fn extract_project_path(url: &str, allowed_host: &str) -> Result<ProjectPath, MirrorKitError> {
    let parsed = Url::parse(url)?;
    let host = match parsed.host_str() {
        Some(host) if !host.is_empty() => host,
        _ => {
            return Err(MirrorKitError::new(MirrorKitErrorKind::InvalidInput).with_text("missing host"))
        }
    };
    if !host.eq_ignore_ascii_case(allowed_host) || parsed.port().is_some() {
        let shown = match parsed.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        };
        return Err(MirrorKitError::new(MirrorKitErrorKind::UnsupportedHost)
            .with_text(format!("'{shown}', only {allowed_host} is supported")));
    }

    let mut segments: Vec<String> = parsed
        .path_segments()
        .into_iter()
        .flatten()
        .filter(|seg| !seg.is_empty())
        .map(decode_segment)
        .collect();
    if let Some(cut) = segments.iter().position(|seg| seg == PAGE_MARKER) {
        segments.truncate(cut);
    }
    check_length(&segments, allowed_host)?;

    if let Some(last) = segments.last_mut() {
        if let Some(stripped) = last.strip_suffix(GIT_SUFFIX) {
            *last = stripped.to_string();
        }
        if last.is_empty() {
            segments.pop();
            check_length(&segments, allowed_host)?;
        }
    }
    let path = ProjectPath { segments };
    debug!("Extracted project path '{path}' from {url}");
    Ok(path)
}

/// Undo the percent-encoding applied by the URL parser
///
/// Segments that don't decode to UTF-8 are kept encoded.
fn decode_segment(segment: &str) -> String {
    match percent_decode_str(segment).decode_utf8() {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => segment.to_string(),
    }
}

/// Ensure there is a group and a repository
fn check_length(segments: &[String], host: &str) -> Result<(), MirrorKitError> {
    if segments.len() < 2 {
        return Err(MirrorKitError::new(MirrorKitErrorKind::PathTooShort)
            .with_text(format!("expect https://{host}/group/repo/...")));
    }
    Ok(())
}

/// Build the SSH remote `git@<host>:<path>.git`
pub fn to_ssh_url(path: &str, host: &str) -> String {
    format!("git@{host}:{path}{GIT_SUFFIX}")
}
