//! Share modal state.
//!
//! Browser facilities are reached through [`ShareHost`] so the modal logic
//! runs (and is tested) without a browser.

use crate::errors::Result;
use reqwest::Url;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::warn;

/// How long the "copied" confirmation stays visible
pub const COPIED_RESET: Duration = Duration::from_secs(2);

/// Facebook share dialog endpoint
pub const FACEBOOK_SHARER: &str = "https://www.facebook.com/sharer/sharer.php";

/// Message shown when the clipboard write fails
pub const CLIPBOARD_FALLBACK_NOTICE: &str = "লিংক কপি হয়েছে!";

/// Browser capabilities the modal depends on
pub trait ShareHost {
    /// Address of the page being shared.
    fn current_url(&self) -> String;
    /// Writes `text` to the system clipboard.
    fn write_clipboard(&self, text: &str) -> Result<()>;
    /// Shows a blocking notice to the user.
    fn notify(&self, message: &str);
    /// Opens a new window.
    fn open_window(&self, popup: &Popup);
}

/// Arguments for opening a share window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Popup {
    /// Page to load
    pub url: String,
    /// Window target name
    pub target: &'static str,
    /// Window feature string
    pub features: &'static str,
}

/// Share dialog bound to a host
pub struct ShareModal<H> {
    host: H,
    share_url: String,
    open: bool,
    copied: Arc<AtomicBool>,
    reset: Option<JoinHandle<()>>,
}

impl<H: ShareHost> ShareModal<H> {
    /// Captures the host's current URL as the link to share.
    pub fn new(host: H) -> Self {
        let share_url = host.current_url();
        Self {
            host,
            share_url,
            open: false,
            copied: Arc::new(AtomicBool::new(false)),
            reset: None,
        }
    }

    /// The link being shared.
    pub fn share_url(&self) -> &str {
        &self.share_url
    }

    /// Shows the dialog.
    pub fn open(&mut self) {
        self.open = true;
    }

    /// Hides the dialog.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Whether the dialog is visible.
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Whether the copy confirmation is showing.
    pub fn is_copied(&self) -> bool {
        self.copied.load(Ordering::SeqCst)
    }

    /// Borrow the host.
    pub const fn host(&self) -> &H {
        &self.host
    }

    /// Copies the link and shows the confirmation for [`COPIED_RESET`].
    ///
    /// A failed write is reported through [`ShareHost::notify`] and never
    /// returned. Must be called inside a tokio runtime.
    pub fn copy_link(&mut self) {
        if let Err(e) = self.host.write_clipboard(&self.share_url) {
            warn!(error = %e, "Clipboard write failed");
            self.host.notify(CLIPBOARD_FALLBACK_NOTICE);
            return;
        }

        self.copied.store(true, Ordering::SeqCst);
        if let Some(pending) = self.reset.take() {
            pending.abort();
        }
        let copied = Arc::clone(&self.copied);
        self.reset = Some(tokio::spawn(async move {
            tokio::time::sleep(COPIED_RESET).await;
            copied.store(false, Ordering::SeqCst);
        }));
    }

    /// The Facebook share window for the current link.
    pub fn facebook_popup(&self) -> Popup {
        let url = Url::parse_with_params(FACEBOOK_SHARER, [("u", self.share_url.as_str())])
            .map_or_else(|_| FACEBOOK_SHARER.to_string(), String::from);
        Popup {
            url,
            target: "_blank",
            features: "width=600,height=400",
        }
    }

    /// Opens the Facebook share window.
    pub fn share_to_facebook(&self) {
        self.host.open_window(&self.facebook_popup());
    }
}

impl<H> Drop for ShareModal<H> {
    fn drop(&mut self) {
        if let Some(pending) = self.reset.take() {
            pending.abort();
        }
    }
}
