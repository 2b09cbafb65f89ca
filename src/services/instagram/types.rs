use serde::Deserialize;
use url::Url;

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub authenticated: bool,
    #[serde(default)]
    pub checkpoint_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceKind {
    Photo,
    Video,
    /// Anything the carousel strategy does not relay (e.g. an unsupported
    /// sidecar child). Carries the declared type name for logging.
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaResource {
    pub id: String,
    pub kind: ResourceKind,
    pub url: Url,
}

/// A resolved post: either a single item or a carousel of sub-resources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaDescriptor {
    pub id: String,
    pub kind: ResourceKind,
    pub url: Url,
    /// Empty for single-item posts.
    pub resources: Vec<MediaResource>,
}

impl MediaDescriptor {
    /// A descriptor with no sub-resources is itself a one-element
    /// sequence; otherwise the sub-resources in native order.
    pub fn into_resources(self) -> Vec<MediaResource> {
        if self.resources.is_empty() {
            vec![MediaResource {
                id: self.id,
                kind: self.kind,
                url: self.url,
            }]
        } else {
            self.resources
        }
    }
}
