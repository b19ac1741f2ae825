use gloo_net::http::Request;
use serde::Deserialize;
use std::fmt;

use crate::queue::ReviewItem;

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FeedImage {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub file_path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FeedPayload {
    #[serde(default)]
    images: Vec<FeedImage>,
}

#[derive(Debug, Deserialize)]
struct DefaultFeedPayload {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    images: Vec<FeedImage>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultFeed {
    pub token: String,
    pub items: Vec<ReviewItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedError {
    NotFound,
    Expired,
    NoDefault,
    NoPhotos,
    Server,
    Network(String),
    Offline(String),
    Parse(String),
}

impl FeedError {
    fn network<E: fmt::Display>(err: E) -> Self {
        Self::Network(err.to_string())
    }

    fn offline<E: fmt::Display>(err: E) -> Self {
        Self::Offline(err.to_string())
    }

    fn parse<E: fmt::Display>(err: E) -> Self {
        Self::Parse(err.to_string())
    }
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            FeedError::NotFound => "Project not found",
            FeedError::Expired => "Link expired",
            FeedError::NoDefault => "No default project",
            FeedError::NoPhotos => "No default project or no photos",
            FeedError::Server => "Server error. Please try again.",
            FeedError::Offline(_) => "Network error. Check your connection and try again.",
            FeedError::Network(_) | FeedError::Parse(_) => "Failed to load project",
        };
        f.write_str(message)
    }
}

pub async fn load_feed(token: &str) -> Result<Vec<ReviewItem>, FeedError> {
    let url = format!("/api/r/{}", token);
    let response = Request::get(&url).send().await.map_err(FeedError::network)?;

    match response.status() {
        404 => return Err(FeedError::NotFound),
        410 => return Err(FeedError::Expired),
        _ => {}
    }

    if !response.ok() {
        return Err(FeedError::Network(format!(
            "HTTP {} while fetching {}",
            response.status(),
            url
        )));
    }

    let text = response.text().await.map_err(FeedError::network)?;
    let payload: FeedPayload = serde_json::from_str(&text).map_err(FeedError::parse)?;

    let items = numbered_items(payload.images);
    if !items.is_empty() {
        return Ok(items);
    }

    // A project with no photos yet borrows the bundled sample set; if
    // even that is unavailable the caller renders the empty state.
    Ok(load_test_images().await.unwrap_or_default())
}

pub async fn load_default_feed() -> Result<DefaultFeed, FeedError> {
    // Transport failures here surface as the connection message; a
    // reject with any other HTTP status is still "Failed to load".
    let response = Request::get("/api/default-feed")
        .send()
        .await
        .map_err(FeedError::offline)?;

    match response.status() {
        404 => return Err(FeedError::NoDefault),
        500 => return Err(FeedError::Server),
        _ => {}
    }

    if !response.ok() {
        return Err(FeedError::Network(format!(
            "HTTP {} while fetching the default feed",
            response.status()
        )));
    }

    let text = response.text().await.map_err(FeedError::offline)?;
    let payload: DefaultFeedPayload = serde_json::from_str(&text).map_err(FeedError::parse)?;

    let token = payload.token.unwrap_or_default();
    let items = numbered_items(payload.images);
    if !token.is_empty() && !items.is_empty() {
        return Ok(DefaultFeed { token, items });
    }

    let fallback = load_test_images().await.unwrap_or_default();
    if fallback.is_empty() {
        return Err(FeedError::NoPhotos);
    }
    Ok(DefaultFeed {
        token: String::new(),
        items: fallback,
    })
}

async fn load_test_images() -> Result<Vec<ReviewItem>, FeedError> {
    let response = Request::get("/api/test-images")
        .send()
        .await
        .map_err(FeedError::network)?;

    if !response.ok() {
        return Err(FeedError::Network(format!(
            "HTTP {} while fetching test images",
            response.status()
        )));
    }

    let text = response.text().await.map_err(FeedError::network)?;
    let payload: FeedPayload = serde_json::from_str(&text).map_err(FeedError::parse)?;

    Ok(test_image_items(payload.images))
}

fn numbered_items(images: Vec<FeedImage>) -> Vec<ReviewItem> {
    images
        .into_iter()
        .enumerate()
        .map(|(index, image)| ReviewItem {
            id: image.id,
            title: image
                .title
                .filter(|title| !title.is_empty())
                .unwrap_or_else(|| format!("Reference #{}", index + 1)),
            url: image
                .file_path
                .filter(|path| !path.is_empty())
                .or(image.url)
                .unwrap_or_default(),
        })
        .collect()
}

fn test_image_items(images: Vec<FeedImage>) -> Vec<ReviewItem> {
    images
        .into_iter()
        .map(|image| ReviewItem {
            id: image.id,
            title: image
                .title
                .filter(|title| !title.is_empty())
                .unwrap_or_else(|| "Reference".to_string()),
            url: image.url.unwrap_or_default(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(id: &str, title: Option<&str>, url: Option<&str>, file_path: Option<&str>) -> FeedImage {
        FeedImage {
            id: id.to_string(),
            title: title.map(str::to_string),
            url: url.map(str::to_string),
            file_path: file_path.map(str::to_string),
        }
    }

    #[test]
    fn missing_titles_get_positional_placeholders() {
        let items = numbered_items(vec![
            image("a", None, Some("/a.jpg"), None),
            image("b", Some(""), Some("/b.jpg"), None),
            image("c", Some("Storm study"), Some("/c.jpg"), None),
        ]);

        assert_eq!(items[0].title, "Reference #1");
        assert_eq!(items[1].title, "Reference #2");
        assert_eq!(items[2].title, "Storm study");
    }

    #[test]
    fn file_path_wins_over_url_when_present() {
        let items = numbered_items(vec![
            image("a", None, Some("/cdn/a.jpg"), Some("/uploads/a.jpg")),
            image("b", None, Some("/cdn/b.jpg"), Some("")),
            image("c", None, None, None),
        ]);

        assert_eq!(items[0].url, "/uploads/a.jpg");
        assert_eq!(items[1].url, "/cdn/b.jpg");
        assert_eq!(items[2].url, "");
    }

    #[test]
    fn test_image_titles_fall_back_without_numbering() {
        let items = test_image_items(vec![
            image("a", None, Some("/imgs/a.jpg"), None),
            image("b", None, Some("/imgs/b.jpg"), None),
        ]);

        assert_eq!(items[0].title, "Reference");
        assert_eq!(items[1].title, "Reference");
    }

    #[test]
    fn feed_payload_tolerates_extra_and_missing_fields() {
        let payload: FeedPayload = serde_json::from_str(
            r#"{
                "project": "Moodboard",
                "images": [
                    {"id": "img_1", "filePath": "/uploads/1.jpg", "width": 1200},
                    {"id": "img_2", "title": "Dusk", "url": "/cdn/2.jpg"}
                ]
            }"#,
        )
        .unwrap();

        let items = numbered_items(payload.images);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].url, "/uploads/1.jpg");
        assert_eq!(items[1].title, "Dusk");
    }

    #[test]
    fn empty_feed_payload_parses_to_no_images() {
        let payload: FeedPayload = serde_json::from_str("{}").unwrap();
        assert!(payload.images.is_empty());

        let default: DefaultFeedPayload = serde_json::from_str("{}").unwrap();
        assert!(default.token.is_none());
    }

    #[test]
    fn error_messages_match_the_review_screens() {
        assert_eq!(FeedError::NotFound.to_string(), "Project not found");
        assert_eq!(FeedError::Expired.to_string(), "Link expired");
        assert_eq!(FeedError::NoDefault.to_string(), "No default project");
        assert_eq!(
            FeedError::Network("HTTP 503".to_string()).to_string(),
            "Failed to load project"
        );
        assert_eq!(
            FeedError::Offline("fetch failed".to_string()).to_string(),
            "Network error. Check your connection and try again."
        );
    }
}
