mod error;
mod page;
mod session;

pub use error::{Error, Result};
pub use page::{ChannelStats, METADATA_FIELDS, METADATA_SELECTOR, channel_url};
pub use session::{BrowserSession, SessionOptions, SETTLE_DELAY};
