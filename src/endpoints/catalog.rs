use std::path::Path;

use anyhow::Result;
use tracing::debug;

use crate::config::audit::SegmentsConfig;
use crate::error::AuditError;

/// Which base path an endpoint lives under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasePath {
    Primary,
    Extension,
}

/// One line of the endpoint list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointSpec {
    pub name: String,
    pub base_path: BasePath,
}

impl EndpointSpec {
    /// Classify a declaration line, `None` for blank lines.
    ///
    /// The name is whatever precedes the first ':', a line carrying the
    /// extension marker is routed to the extension segment.
    pub fn parse_line(line: &str, segments: &SegmentsConfig) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let name = line.split(':').next().unwrap_or_default().trim().to_owned();
        let base_path = if line.contains(segments.extension_marker.as_str()) {
            BasePath::Extension
        } else {
            BasePath::Primary
        };
        Some(Self { name, base_path })
    }

    /// `{base_url}{segment}/{name}`, `base_url` is expected to end with '/'
    pub fn url(&self, base_url: &str, segments: &SegmentsConfig) -> String {
        let segment = match self.base_path {
            BasePath::Primary => &segments.primary,
            BasePath::Extension => &segments.extension,
        };
        format!("{}{}/{}", base_url, segment, self.name)
    }
}

pub fn parse_endpoints(content: &str, segments: &SegmentsConfig) -> Vec<EndpointSpec> {
    content
        .lines()
        .filter_map(|line| EndpointSpec::parse_line(line, segments))
        .collect()
}

pub async fn load_endpoints(path: &Path, segments: &SegmentsConfig) -> Result<Vec<EndpointSpec>> {
    let content = tokio::fs::read_to_string(path).await.map_err(|err| {
        AuditError::Configuration(format!("cannot read endpoint list '{}': {}", path.display(), err))
    })?;
    let endpoints = parse_endpoints(&content, segments);
    debug!("loaded {} endpoints from '{}'", endpoints.len(), path.display());
    Ok(endpoints)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_marked_lines_to_extension() {
        let segments = SegmentsConfig::default();
        let endpoints = parse_endpoints("students\n\ncandidates:tpdm\n  schools:ed-fi  \n", &segments);
        assert_eq!(
            endpoints,
            vec![
                EndpointSpec { name: "students".into(), base_path: BasePath::Primary },
                EndpointSpec { name: "candidates".into(), base_path: BasePath::Extension },
                EndpointSpec { name: "schools".into(), base_path: BasePath::Primary },
            ]
        );
    }

    #[test]
    fn builds_full_url() {
        let segments = SegmentsConfig::default();
        let endpoint = EndpointSpec::parse_line("candidates:tpdm", &segments).unwrap();
        assert_eq!(
            endpoint.url("https://api.example.org/data/v3/", &segments),
            "https://api.example.org/data/v3/tpdm/candidates"
        );
    }

    #[tokio::test]
    async fn missing_list_is_a_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_endpoints(&dir.path().join("Endpoints.txt"), &SegmentsConfig::default())
            .await
            .unwrap_err();
        match err.downcast_ref::<AuditError>() {
            Some(AuditError::Configuration(msg)) => assert!(msg.contains("Endpoints.txt")),
            other => panic!("unexpected error {:?}", other),
        }
    }
}
