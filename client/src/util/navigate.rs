//! Full-page browser navigation.
//!
//! Leaving the app for an external origin (the OAuth provider) cannot go
//! through the client router, so it sits behind a small trait.

/// Sets the browser location, unloading the app.
pub trait Navigator {
    /// # Errors
    ///
    /// Returns a description when the location cannot be changed.
    fn assign(&self, url: &str) -> Result<(), String>;
}

/// `window.location.href = url`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn assign(&self, url: &str) -> Result<(), String> {
        #[cfg(feature = "csr")]
        {
            let window = web_sys::window().ok_or_else(|| "no window".to_owned())?;
            window.location().set_href(url).map_err(|e| format!("{e:?}"))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = url;
            Err("browser location unavailable".to_owned())
        }
    }
}
