use url::Url;

use crate::linkopen::{CustomTabRequest, LaunchError, Navigator};

/// Navigator backed by the host system's default URL handling. Desktop hosts
/// have no custom tab concept, so handler detection always comes up empty
/// and dispatch falls back to the default browser.
pub struct SystemNavigator;

impl Navigator for SystemNavigator {
    fn custom_tab_handler(&self) -> Option<String> {
        None
    }

    fn launch_custom_tab(&self, _url: &Url, _request: &CustomTabRequest) -> Result<(), LaunchError> {
        Err(LaunchError(String::from(
            "custom tabs are not supported on this host",
        )))
    }

    fn launch_browser(&self, url: &Url) -> Result<(), LaunchError> {
        open::that(url.as_str()).map_err(|err| LaunchError(err.to_string()))
    }
}
