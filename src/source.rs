//! Image source adapter: turns a tag search into ordered [`ImageRecord`]s.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use crate::config::GalleryConfig;
use crate::error::SourceError;

/// One photo as the slider needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    pub image: String,
    pub thumb: String,
    pub title: String,
}

/// Size suffixes understood by the Flickr static CDN.
///
/// See <https://www.flickr.com/services/api/misc.urls.html>.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeSuffix {
    /// 75x75 crop, used for thumbnails.
    Square,
    /// 1024 on the longest side, used for slides.
    Large,
}

impl SizeSuffix {
    pub fn as_str(&self) -> &'static str {
        match self {
            SizeSuffix::Square => "_s",
            SizeSuffix::Large => "_b",
        }
    }
}

/// CDN URL for a photo. The format is fixed by the upstream service.
pub fn photo_url(farm: u32, server: &str, id: &str, secret: &str, size: SizeSuffix) -> String {
    format!(
        "https://farm{farm}.staticflickr.com/{server}/{id}_{secret}{}.jpg",
        size.as_str()
    )
}

/// Something that can deliver a page of images for a tag query.
///
/// An empty page is not an error; it means there is nothing more to load.
#[async_trait]
pub trait ImageSource: Send + Sync + 'static {
    async fn fetch_page(
        &self,
        tags: &str,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<ImageRecord>, SourceError>;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    stat: Option<String>,
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    photos: Option<PhotoPage>,
}

#[derive(Debug, Deserialize)]
struct PhotoPage {
    #[serde(default)]
    photo: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
struct Photo {
    id: String,
    secret: String,
    server: String,
    farm: u32,
    #[serde(default)]
    title: String,
}

impl Photo {
    fn into_record(self) -> ImageRecord {
        ImageRecord {
            image: photo_url(self.farm, &self.server, &self.id, &self.secret, SizeSuffix::Large),
            thumb: photo_url(self.farm, &self.server, &self.id, &self.secret, SizeSuffix::Square),
            title: self.title,
        }
    }
}

/// Decode a `flickr.photos.search` body into records, preserving order.
pub fn parse_search_response(body: &str) -> Result<Vec<ImageRecord>, SourceError> {
    let resp: SearchResponse = serde_json::from_str(body)?;
    if resp.stat.as_deref() == Some("fail") {
        return Err(SourceError::Api {
            code: resp.code.unwrap_or_default(),
            message: resp.message.unwrap_or_default(),
        });
    }
    Ok(resp
        .photos
        .map(|p| p.photo)
        .unwrap_or_default()
        .into_iter()
        .map(Photo::into_record)
        .collect())
}

/// Flickr REST search client.
#[derive(Debug, Clone)]
pub struct FlickrSource {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl FlickrSource {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, api_key)
    }

    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    pub fn from_config(cfg: &GalleryConfig) -> Self {
        Self::new(cfg.api_base_url.clone(), cfg.api_key.clone())
    }

    /// Request URL for one page of a tag search.
    pub fn search_url(&self, tags: &str, page: u32, page_size: u32) -> Result<Url, SourceError> {
        let mut url = Url::parse(&self.base_url)?;
        url.query_pairs_mut()
            .append_pair("method", "flickr.photos.search")
            .append_pair("api_key", &self.api_key)
            .append_pair("tags", tags)
            .append_pair("per_page", &page_size.to_string())
            .append_pair("page", &page.to_string())
            .append_pair("format", "json")
            .append_pair("nojsoncallback", "1");
        Ok(url)
    }
}

#[async_trait]
impl ImageSource for FlickrSource {
    async fn fetch_page(
        &self,
        tags: &str,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<ImageRecord>, SourceError> {
        let url = self.search_url(tags, page, page_size)?;
        debug!(%tags, page, page_size, "requesting photo page");

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!(page, error = %e, "photo search request failed");
            SourceError::Transport(e)
        })?;
        if !response.status().is_success() {
            warn!(page, status = %response.status(), "photo search returned error status");
            return Err(SourceError::Status(response.status()));
        }
        let body = response.text().await?;
        let records = parse_search_response(&body)?;
        debug!(page, count = records.len(), "photo page decoded");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn photo_url_matches_cdn_layout() {
        assert_eq!(
            photo_url(5, "4321", "12345", "abcdef", SizeSuffix::Large),
            "https://farm5.staticflickr.com/4321/12345_abcdef_b.jpg"
        );
        assert_eq!(
            photo_url(66, "65535", "9", "ff00", SizeSuffix::Square),
            "https://farm66.staticflickr.com/65535/9_ff00_s.jpg"
        );
    }

    #[test]
    fn search_url_carries_all_query_parameters() {
        let src = FlickrSource::new("https://api.flickr.com/services/rest/", "KEY");
        let url = src.search_url("cats,dogs", 3, 15).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.flickr.com/services/rest/?method=flickr.photos.search&api_key=KEY\
             &tags=cats%2Cdogs&per_page=15&page=3&format=json&nojsoncallback=1"
        );
    }

    #[test]
    fn parse_keeps_upstream_order() {
        let body = r#"{"photos":{"page":1,"photo":[
            {"id":"2","secret":"b","server":"s","farm":1,"title":"second"},
            {"id":"1","secret":"a","server":"s","farm":1,"title":"first"}
        ]},"stat":"ok"}"#;
        let records = parse_search_response(body).unwrap();
        let titles: Vec<_> = records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["second", "first"]);
        assert_eq!(records[0].thumb, "https://farm1.staticflickr.com/s/2_b_s.jpg");
    }

    #[test]
    fn empty_page_is_not_an_error() {
        let body = r#"{"photos":{"page":9,"pages":8,"photo":[]},"stat":"ok"}"#;
        assert!(parse_search_response(body).unwrap().is_empty());
    }

    #[test]
    fn failed_stat_becomes_api_error() {
        let body = r#"{"stat":"fail","code":100,"message":"Invalid API Key (Key has invalid format)"}"#;
        match parse_search_response(body) {
            Err(SourceError::Api { code, message }) => {
                assert_eq!(code, 100);
                assert!(message.starts_with("Invalid API Key"));
            }
            other => panic!("expected api error, got {other:?}"),
        }
    }

    #[test]
    fn garbage_body_is_decode_error() {
        assert!(matches!(
            parse_search_response("jsonFlickrApi({})"),
            Err(SourceError::Decode(_))
        ));
    }
}
