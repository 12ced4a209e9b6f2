use tracing::warn;
use url::Url;

mod system;
pub use system::SystemNavigator;

/// Preference key controlling whether links open in a custom tab.
pub const CUSTOM_TABS_PREF_KEY: &str = "customTabs";

/// Boolean key-value lookup supplied by the host's settings store.
pub trait PreferenceSource {
    fn get_bool(&self, key: &str, default: bool) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BrowserPrefs {
    pub use_custom_tabs: bool,
}

impl BrowserPrefs {
    pub fn load(source: &impl PreferenceSource) -> Self {
        BrowserPrefs {
            use_custom_tabs: source.get_bool(CUSTOM_TABS_PREF_KEY, false),
        }
    }
}

/// Request to bind a custom in-app browser surface: the caller's accent
/// color plus the handler package resolved during dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomTabRequest {
    pub toolbar_color: u32,
    pub package: Option<String>,
}

/// No installed component could service a launch request.
#[derive(Debug, thiserror::Error)]
#[error("no installed handler could service the request: {0}")]
pub struct LaunchError(pub String);

/// Platform navigation capability, injected so the fallback branches are
/// testable without a real system.
pub trait Navigator {
    /// Package name of an installed handler able to host a custom tab, if
    /// any.
    fn custom_tab_handler(&self) -> Option<String>;

    fn launch_custom_tab(&self, url: &Url, request: &CustomTabRequest) -> Result<(), LaunchError>;

    fn launch_browser(&self, url: &Url) -> Result<(), LaunchError>;
}

/// Where the link ended up. `Undeliverable` means the failure was already
/// logged; it is not an error to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    CustomTab { package: String },
    Browser,
    Undeliverable,
}

#[derive(Debug, thiserror::Error)]
pub enum OpenLinkError {
    /// Fail closed: an unparsable URL is rejected before any dispatch side
    /// effect.
    #[error("not a valid absolute URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Opens a link, depending on the preference, either in the browser or in a
/// custom tab. The URL scheme is normalized to lowercase by parsing.
pub fn open_link(
    url: &str,
    prefs: &BrowserPrefs,
    toolbar_color: u32,
    navigator: &impl Navigator,
) -> Result<Outcome, OpenLinkError> {
    let url = Url::parse(url.trim())?;

    if prefs.use_custom_tabs {
        Ok(open_in_custom_tab(&url, toolbar_color, navigator))
    } else {
        Ok(open_in_browser(&url, navigator))
    }
}

/// Single attempt to launch the default browser. A missing handler is
/// logged, never propagated.
pub fn open_in_browser(url: &Url, navigator: &impl Navigator) -> Outcome {
    match navigator.launch_browser(url) {
        Ok(()) => Outcome::Browser,
        Err(err) => {
            warn!("Browser launch failed for {url}: {err}");
            Outcome::Undeliverable
        }
    }
}

/// Tries to open a link in a custom tab, falling back to the browser when no
/// installed handler can host one.
pub fn open_in_custom_tab(url: &Url, toolbar_color: u32, navigator: &impl Navigator) -> Outcome {
    match navigator.custom_tab_handler() {
        None => open_in_browser(url, navigator),
        Some(package) => {
            let request = CustomTabRequest {
                toolbar_color,
                package: Some(package.clone()),
            };
            match navigator.launch_custom_tab(url, &request) {
                Ok(()) => Outcome::CustomTab { package },
                Err(err) => {
                    warn!("Custom tab launch failed for {url}: {err}");
                    Outcome::Undeliverable
                }
            }
        }
    }
}
