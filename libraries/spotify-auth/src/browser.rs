//! Launching the user's browser.

use std::io;
use url::Url;

/// Opens the authorization URL for the user.
pub trait UrlOpener: Send + Sync {
    fn open(&self, url: &Url) -> io::Result<()>;
}

/// Hands the URL to the platform's default browser.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemBrowser;

impl UrlOpener for SystemBrowser {
    fn open(&self, url: &Url) -> io::Result<()> {
        open::that_detached(url.as_str())
    }
}
