//! Google Books volumes response decoding.
//!
//! Maps `GET /books/v1/volumes` responses onto [`Book`] records. Google omits
//! `authors` and `description` for many volumes, so those default to empty;
//! `id` and `title` stay required.

use crate::domain::error::Result;
use crate::domain::Book;
use serde::Deserialize;
use url::Url;

#[derive(Debug, Deserialize)]
struct VolumesResponse {
    #[serde(default)]
    items: Vec<Volume>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Volume {
    id: String,
    volume_info: VolumeInfo,
    #[serde(default)]
    sale_info: Option<SaleInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolumeInfo {
    title: String,
    #[serde(default)]
    authors: Vec<String>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    image_links: Option<ImageLinks>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImageLinks {
    #[serde(default)]
    thumbnail: Option<Url>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SaleInfo {
    #[serde(default)]
    buy_link: Option<Url>,
}

impl From<Volume> for Book {
    fn from(volume: Volume) -> Self {
        let info = volume.volume_info;
        Self {
            id: volume.id,
            title: info.title,
            authors: info.authors,
            description: info.description,
            thumbnail_url: info.image_links.and_then(|links| links.thumbnail),
            buy_link_url: volume.sale_info.and_then(|sale| sale.buy_link),
            is_favorite: false,
        }
    }
}

/// Decodes a volumes response body into books, preserving order.
///
/// # Errors
///
/// Returns a decode error if the body is not a volumes response or any
/// volume lacks an `id` or `title`.
pub fn decode_volumes(body: &[u8]) -> Result<Vec<Book>> {
    let response: VolumesResponse = serde_json::from_slice(body)?;
    Ok(response.items.into_iter().map(Book::from).collect())
}
