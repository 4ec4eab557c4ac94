//! Switching the active endpoint

use anyhow::Result;
use tracing::info;

use crate::store::{KeyValueStore, API_URL_KEY};

/// Where the application is served from; the reload URL is built from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    pub origin: String,
    pub pathname: String,
    pub hash: String,
}

/// `{origin}{pathname}?rpc={url}{hash}` with the URL percent-encoded.
pub fn reload_url(location: &Location, api_url: &str) -> String {
    format!(
        "{}{}?rpc={}{}",
        location.origin,
        location.pathname,
        urlencoding::encode(api_url),
        location.hash
    )
}

/// Currently persisted endpoint, if any. Read failures count as unset.
pub fn active_url<S: KeyValueStore + ?Sized>(store: &S) -> Option<String> {
    store.get(API_URL_KEY).ok().flatten()
}

/// Whether the toggle for `url` is on.
pub fn is_active<S: KeyValueStore + ?Sized>(store: &S, url: &str) -> bool {
    active_url(store).as_deref() == Some(url)
}

/// Persists `api_url` and returns the reload URL. Disabled toggles do nothing.
pub fn apply<S: KeyValueStore + ?Sized>(
    store: &mut S,
    location: &Location,
    api_url: &str,
    is_disabled: bool,
) -> Result<Option<String>> {
    if is_disabled {
        return Ok(None);
    }
    store.set(API_URL_KEY, api_url)?;
    info!(url = api_url, "active endpoint changed");
    Ok(Some(reload_url(location, api_url)))
}
