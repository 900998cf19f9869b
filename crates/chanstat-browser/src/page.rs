use crate::{Error, Result};

/// CSS selector for the channel-header metadata spans.
///
/// Matches the attributed-string spans YouTube renders in the channel
/// header; the first three matches carry, in order, the channel name, the
/// subscriber count text, and the video count text.
pub const METADATA_SELECTOR: &str = "span.yt-core-attributed-string.yt-content-metadata-view-model__metadata-text.yt-core-attributed-string--white-space-pre-wrap.yt-core-attributed-string--link-inherit-color[role=\"text\"]";

/// Number of metadata texts a channel page must yield.
pub const METADATA_FIELDS: usize = 3;

/// Build the public URL of a channel from its handle.
pub fn channel_url(handle: &str) -> String {
    format!("https://www.youtube.com/@{}", handle)
}

/// The three statistics scraped from one channel page.
///
/// Values are kept as the page renders them ("1.2M subscribers" and the
/// like); no numeric parsing happens downstream.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ChannelStats {
    pub name: String,
    pub subscribers: String,
    pub videos: String,
}

impl ChannelStats {
    /// Map the extracted metadata texts onto the three statistics.
    ///
    /// Fewer than three texts means the page did not render the full
    /// header; that is an ordinary collection failure, never a partial
    /// result. Extra matches beyond the first three are ignored.
    pub fn from_metadata_texts(texts: Vec<String>) -> Result<Self> {
        if texts.len() < METADATA_FIELDS {
            return Err(Error::MetadataIncomplete {
                found: texts.len(),
                expected: METADATA_FIELDS,
            });
        }

        let mut texts = texts.into_iter();
        Ok(Self {
            name: texts.next().unwrap_or_default(),
            subscribers: texts.next().unwrap_or_default(),
            videos: texts.next().unwrap_or_default(),
        })
    }
}
