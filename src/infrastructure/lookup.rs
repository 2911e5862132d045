//! Book-metadata lookup
//!
//! Optional cover enrichment via the Google Books volumes endpoint. The
//! lookup can never fail an analysis: every transport error, non-2xx status,
//! or missing field resolves to `None`.

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

/// Zero-or-one match for a title/author query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookMatch {
    pub canonical_title: String,
    pub cover_url: Option<String>,
}

pub struct BookLookup {
    endpoint: String,
    http: Client,
}

impl BookLookup {
    pub fn new(endpoint: String) -> Self {
        Self {
            endpoint,
            http: Client::new(),
        }
    }

    /// Find the closest volume for a title/author pair.
    pub async fn find(&self, title: &str, author: &str) -> Option<BookMatch> {
        let query = format!("intitle:{title} inauthor:{author}");
        debug!(query = query.as_str(), "Querying book metadata");

        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("q", query.as_str()), ("maxResults", "1")])
            .send()
            .await
            .and_then(|resp| resp.error_for_status());

        let body: VolumesResponse = match response {
            Ok(resp) => match resp.json().await {
                Ok(body) => body,
                Err(err) => {
                    debug!(%err, "Book metadata reply was not decodable");
                    return None;
                }
            },
            Err(err) => {
                debug!(%err, "Book metadata request failed");
                return None;
            }
        };

        first_match(body)
    }
}

fn first_match(body: VolumesResponse) -> Option<BookMatch> {
    let volume = body.items.unwrap_or_default().into_iter().next()?;
    let info = volume.volume_info?;
    Some(BookMatch {
        canonical_title: info.title?,
        cover_url: info.image_links.and_then(|links| links.thumbnail),
    })
}

#[derive(Debug, Deserialize)]
struct VolumesResponse {
    items: Option<Vec<Volume>>,
}

#[derive(Debug, Deserialize)]
struct Volume {
    #[serde(rename = "volumeInfo")]
    volume_info: Option<VolumeInfo>,
}

#[derive(Debug, Deserialize)]
struct VolumeInfo {
    title: Option<String>,
    #[serde(rename = "imageLinks")]
    image_links: Option<ImageLinks>,
}

#[derive(Debug, Deserialize)]
struct ImageLinks {
    thumbnail: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(raw: &str) -> VolumesResponse {
        serde_json::from_str(raw).expect("decode volumes response")
    }

    #[test]
    fn picks_first_volume_with_thumbnail() {
        let body = decode(
            r#"{"items":[{"volumeInfo":{"title":"The Hobbit","imageLinks":{"thumbnail":"http://img"}}}]}"#,
        );
        let found = first_match(body).expect("match");
        assert_eq!(found.canonical_title, "The Hobbit");
        assert_eq!(found.cover_url.as_deref(), Some("http://img"));
    }

    #[test]
    fn missing_items_resolves_to_none() {
        assert_eq!(first_match(decode(r#"{}"#)), None);
        assert_eq!(first_match(decode(r#"{"items":[]}"#)), None);
    }

    #[test]
    fn missing_title_resolves_to_none() {
        let body = decode(r#"{"items":[{"volumeInfo":{}}]}"#);
        assert_eq!(first_match(body), None);
    }

    #[test]
    fn missing_thumbnail_still_matches() {
        let body = decode(r#"{"items":[{"volumeInfo":{"title":"Dune"}}]}"#);
        let found = first_match(body).expect("match");
        assert_eq!(found.cover_url, None);
    }
}
