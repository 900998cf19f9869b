use crate::page::{ChannelStats, METADATA_FIELDS, METADATA_SELECTOR, channel_url};
use crate::{Error, Result};
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::Page;
use futures::StreamExt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Settle delay observed before every browser teardown.
pub const SETTLE_DELAY: Duration = Duration::from_millis(3000);

/// How often and how long to poll for the header metadata after navigation.
/// YouTube renders the header lazily, so an immediate query can come up short.
const METADATA_POLL_INTERVAL: Duration = Duration::from_millis(500);
const METADATA_POLL_ATTEMPTS: usize = 10;

/// Launch options for one browser session.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Explicit Chrome binary; platform defaults are searched when absent.
    pub chrome_path: Option<PathBuf>,
    /// Run without a visible window. On by default.
    pub headless: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            chrome_path: None,
            headless: true,
        }
    }
}

/// One browser instance scoped to a single channel.
///
/// Sessions are never reused across channels: each channel gets a fresh
/// launch and an unconditional `shutdown` once its outcome is recorded.
pub struct BrowserSession {
    browser: Browser,
    handler_task: JoinHandle<()>,
    page: Option<Page>,
}

impl BrowserSession {
    /// Launch a fresh Chrome instance.
    pub async fn launch(options: &SessionOptions) -> Result<Self> {
        let chrome = locate_chrome(options.chrome_path.as_deref())?;
        tracing::debug!("Launching Chrome from {}", chrome.display());

        let mut builder = BrowserConfig::builder()
            .chrome_executable(chrome)
            .request_timeout(Duration::from_secs(30));
        if !options.headless {
            builder = builder.with_head();
        }
        let config = builder.build().map_err(Error::Browser)?;

        let (browser, mut handler) = Browser::launch(config).await?;

        // The handler stream must be drained for CDP commands to make progress
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("CDP handler event error (continuing): {}", e);
                }
            }
        });

        Ok(Self {
            browser,
            handler_task,
            page: None,
        })
    }

    /// Open the channel page and extract the three header statistics.
    pub async fn collect(&mut self, handle: &str) -> Result<ChannelStats> {
        let url = channel_url(handle);
        tracing::info!("Opening channel page: {}", url);

        let page = self.browser.new_page(url.as_str()).await?;
        // Keep the page around so the failure path can still screenshot it,
        // even when navigation itself is what failed
        self.page = Some(page.clone());

        page.wait_for_navigation()
            .await
            .map_err(|e| Error::Navigation {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        let texts = self.wait_for_metadata(&page).await?;
        ChannelStats::from_metadata_texts(texts)
    }

    /// Poll the metadata selector until enough elements rendered or the
    /// attempt budget runs out, then return their inner texts.
    async fn wait_for_metadata(&self, page: &Page) -> Result<Vec<String>> {
        let mut last_found = 0;

        for attempt in 0..METADATA_POLL_ATTEMPTS {
            let elements = match page.find_elements(METADATA_SELECTOR).await {
                Ok(elements) => elements,
                Err(e) => {
                    tracing::debug!("Metadata query failed (attempt {}): {}", attempt + 1, e);
                    Vec::new()
                }
            };
            last_found = elements.len();

            if last_found >= METADATA_FIELDS {
                let mut texts = Vec::with_capacity(METADATA_FIELDS);
                for element in elements.iter().take(METADATA_FIELDS) {
                    texts.push(element.inner_text().await?.unwrap_or_default());
                }
                return Ok(texts);
            }

            tracing::debug!(
                "Found {} of {} metadata elements, retrying...",
                last_found,
                METADATA_FIELDS
            );
            tokio::time::sleep(METADATA_POLL_INTERVAL).await;
        }

        Err(Error::MetadataIncomplete {
            found: last_found,
            expected: METADATA_FIELDS,
        })
    }

    /// Capture a full-page screenshot of the current page.
    pub async fn save_screenshot(&self, output: impl AsRef<Path>) -> Result<()> {
        let page = self
            .page
            .as_ref()
            .ok_or_else(|| Error::Browser("no page open to screenshot".to_string()))?;

        page.save_screenshot(
            ScreenshotParams::builder().full_page(true).build(),
            output.as_ref(),
        )
        .await?;

        tracing::debug!("Screenshot saved to {}", output.as_ref().display());
        Ok(())
    }

    /// Unconditional per-channel teardown: wait the settle delay, then close
    /// the browser. Runs exactly once per channel; its errors are logged and
    /// never propagated so bookkeeping stays with the collection outcome.
    pub async fn shutdown(mut self) {
        tokio::time::sleep(SETTLE_DELAY).await;

        if let Err(e) = self.browser.close().await {
            tracing::warn!("Failed to close browser cleanly: {}", e);
        }
        let _ = self.browser.wait().await;
        self.handler_task.abort();
    }
}

/// Pick the Chrome binary to scrape with: the explicit override when one
/// was given, otherwise the first usable install in the platform's usual
/// spots.
fn locate_chrome(custom: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = custom {
        if !is_usable(path) {
            return Err(Error::Browser(format!(
                "no usable Chrome binary at {} (check --chrome-path)",
                path.display()
            )));
        }
        return Ok(path.to_path_buf());
    }

    chrome_candidates()
        .iter()
        .map(Path::new)
        .find(|path| is_usable(path))
        .map(Path::to_path_buf)
        .ok_or_else(|| Error::Browser("no Chrome install found; pass --chrome-path".to_string()))
}

fn chrome_candidates() -> &'static [&'static str] {
    if cfg!(target_os = "macos") {
        &[
            "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            "/Applications/Chromium.app/Contents/MacOS/Chromium",
        ]
    } else if cfg!(target_os = "windows") {
        &[
            r"C:\Program Files\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
        ]
    } else {
        &[
            "/usr/bin/google-chrome",
            "/usr/bin/chromium",
            "/usr/bin/chromium-browser",
        ]
    }
}

fn is_usable(path: &Path) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::metadata(path)
            .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
            .unwrap_or(false)
    }

    #[cfg(not(unix))]
    {
        path.is_file()
    }
}
