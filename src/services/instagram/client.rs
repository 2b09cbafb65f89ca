use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::Client;
use url::Url;

use crate::utils::http;

use super::error::SocialError;
use super::types::{LoginResponse, MediaDescriptor, MediaResource, ResourceKind};
use super::SocialClient;

const HOME_URL: &str = "https://www.instagram.com/";
const LOGIN_URL: &str = "https://www.instagram.com/api/v1/web/accounts/login/ajax/";
const LOGOUT_URL: &str = "https://www.instagram.com/accounts/logout/";
const GRAPHQL_URL: &str = "https://www.instagram.com/graphql/query";

/// Persisted query id of the public `xdt_shortcode_media` document.
const MEDIA_DOC_ID: &str = "8845758582119845";

/// Cookie-jar based Instagram web client. One instance backs the shared
/// session; the carousel strategy serializes access to it.
pub struct InstagramClient {
    client: Client,
    cookie_jar: Arc<Jar>,
    authenticated: bool,
}

impl InstagramClient {
    pub fn new() -> Self {
        let cookie_jar = Arc::new(Jar::default());
        let client = http::create_instagram_client(Arc::clone(&cookie_jar));
        Self {
            client,
            cookie_jar,
            authenticated: false,
        }
    }

    fn csrf_token(&self) -> Option<String> {
        let base = HOME_URL.parse().ok()?;
        let cookies = self.cookie_jar.cookies(&base)?;
        let cookie_str = cookies.to_str().ok()?.to_string();
        cookie_str.split(';').map(str::trim).find_map(|cookie| {
            cookie
                .strip_prefix("csrftoken=")
                .map(|value| value.to_string())
        })
    }

    async fn download_asset(
        &self,
        resource: &MediaResource,
        folder: &Path,
        extension: &str,
    ) -> Result<PathBuf, SocialError> {
        let response = self
            .client
            .get(resource.url.clone())
            .send()
            .await?
            .error_for_status()?;

        let bytes = response.bytes().await?;
        let path = folder.join(format!("{}.{}", resource.id, extension));
        tokio::fs::write(&path, &bytes).await?;

        Ok(path)
    }
}

impl Default for InstagramClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SocialClient for InstagramClient {
    fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    async fn login(&mut self, username: &str, password: &str) -> Result<(), SocialError> {
        // The homepage visit seeds the cookie jar with a CSRF token.
        self.client.get(HOME_URL).send().await?;

        let csrf_token = self
            .csrf_token()
            .ok_or_else(|| SocialError::Api("No CSRF token after homepage visit".to_string()))?;

        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        let enc_password = format!("#PWD_INSTAGRAM_BROWSER:0:{}:{}", timestamp, password);

        let form_data = [
            ("username", username),
            ("enc_password", &enc_password),
            ("queryParams", "{}"),
            ("optIntoOneTap", "false"),
        ];

        let response = self
            .client
            .post(LOGIN_URL)
            .header("X-CSRFToken", &csrf_token)
            .header("X-Requested-With", "XMLHttpRequest")
            .form(&form_data)
            .send()
            .await?;

        let login_response: LoginResponse = response.json().await?;

        if let Some(checkpoint_url) = login_response.checkpoint_url {
            return Err(SocialError::LoginRequired(format!(
                "Checkpoint required: {}",
                checkpoint_url
            )));
        }

        if !login_response.authenticated {
            let message = login_response
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| "Instagram rejected the login request".to_string());
            info!("Instagram login failed with status {:?}", login_response.status);
            return Err(SocialError::LoginRequired(message));
        }

        info!("Logged in to Instagram as {}", username);
        self.authenticated = true;

        Ok(())
    }

    async fn logout(&mut self) -> Result<(), SocialError> {
        let result = self.client.post(LOGOUT_URL).send().await;

        // Drop local session state even when the logout request failed.
        self.authenticated = false;
        self.cookie_jar = Arc::new(Jar::default());
        self.client = http::create_instagram_client(Arc::clone(&self.cookie_jar));

        result?;

        Ok(())
    }

    async fn resolve_media_id(&self, url: &str) -> Result<String, SocialError> {
        let parsed = Url::parse(url).map_err(|e| SocialError::Api(format!("Invalid URL: {}", e)))?;

        let segments: Vec<_> = parsed
            .path_segments()
            .map(|segments| segments.filter(|s| !s.is_empty()).collect())
            .unwrap_or_default();

        match segments.as_slice() {
            ["p", shortcode, ..] | ["reel", shortcode, ..] => Ok((*shortcode).to_string()),
            _ => Err(SocialError::Api(format!(
                "Unrecognized Instagram URL: {}",
                url
            ))),
        }
    }

    async fn media_info(&self, id: &str) -> Result<MediaDescriptor, SocialError> {
        let body = serde_json::json!({
            "doc_id": MEDIA_DOC_ID,
            "variables": {
                "shortcode": id
            }
        });

        let response = self.client.post(GRAPHQL_URL).json(&body).send().await?;

        if !response.status().is_success() {
            return Err(SocialError::Api(format!(
                "Instagram API returned status {}",
                response.status()
            )));
        }

        let data: serde_json::Value = response.json().await?;

        parse_media_response(id, &data)
    }

    async fn download_photo(
        &self,
        resource: &MediaResource,
        folder: &Path,
    ) -> Result<PathBuf, SocialError> {
        self.download_asset(resource, folder, "jpg").await
    }

    async fn download_video(
        &self,
        resource: &MediaResource,
        folder: &Path,
    ) -> Result<PathBuf, SocialError> {
        self.download_asset(resource, folder, "mp4").await
    }
}

fn parse_media_response(
    id: &str,
    data: &serde_json::Value,
) -> Result<MediaDescriptor, SocialError> {
    let media = data
        .get("data")
        .and_then(|d| d.get("xdt_shortcode_media"))
        .filter(|m| !m.is_null())
        .ok_or_else(|| SocialError::MediaUnavailable("media not found or private".to_string()))?;

    let media_id = media
        .get("id")
        .and_then(|v| v.as_str())
        .unwrap_or(id)
        .to_string();

    let typename = media.get("__typename").and_then(|t| t.as_str()).unwrap_or("");

    match typename {
        "XDTGraphSidecar" => {
            let resources = media
                .get("edge_sidecar_to_children")
                .and_then(|e| e.get("edges"))
                .and_then(|e| e.as_array())
                .map(|edges| {
                    edges
                        .iter()
                        .filter_map(|edge| edge.get("node"))
                        .filter_map(parse_resource_node)
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default();

            if resources.is_empty() {
                return Err(SocialError::MediaUnavailable(
                    "carousel has no downloadable resources".to_string(),
                ));
            }

            // The descriptor's own url is unused for carousels; point it at
            // the first resource to keep the field total.
            let url = resources[0].url.clone();

            Ok(MediaDescriptor {
                id: media_id,
                kind: ResourceKind::Other(typename.to_string()),
                url,
                resources,
            })
        }
        _ => {
            let resource = parse_resource_node(media).ok_or_else(|| {
                SocialError::MediaUnavailable(format!("unsupported media type: {}", typename))
            })?;

            Ok(MediaDescriptor {
                id: media_id,
                kind: resource.kind,
                url: resource.url,
                resources: Vec::new(),
            })
        }
    }
}

fn parse_resource_node(node: &serde_json::Value) -> Option<MediaResource> {
    let id = node.get("id").and_then(|v| v.as_str())?.to_string();
    let typename = node.get("__typename").and_then(|t| t.as_str()).unwrap_or("");
    let is_video = node.get("is_video").and_then(|v| v.as_bool()).unwrap_or(false);

    let (kind, url_value) = if is_video {
        (ResourceKind::Video, node.get("video_url"))
    } else if typename == "XDTGraphImage" || node.get("display_url").is_some() {
        (ResourceKind::Photo, node.get("display_url"))
    } else {
        (ResourceKind::Other(typename.to_string()), node.get("display_url"))
    };

    let url = url_value
        .and_then(|u| u.as_str())
        .and_then(|u| Url::parse(u).ok())?;

    Some(MediaResource { id, kind, url })
}
