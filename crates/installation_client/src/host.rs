//! Resolution of the GitHub REST API base URL.

use url::Url;

use crate::Error;

#[cfg(test)]
#[path = "host_tests.rs"]
mod tests;

/// Base URL of the public GitHub REST API.
pub const GITHUB_API_URL: &str = "https://api.github.com/";

/// Turns an optional host override into the REST API base URL.
///
/// - no host, `github.com` or `api.github.com` selects the public API;
/// - a value with an `http://` or `https://` scheme is used as given;
/// - any other host is treated as GitHub Enterprise Server, whose API lives under
///   `https://{host}/api/v3/`.
///
/// The returned URL always ends with `/` so relative endpoint paths can be joined to
/// it.
///
/// # Errors
///
/// Returns `Error::InvalidHost` if the resulting URL cannot be parsed.
pub fn api_base_url(host: Option<&str>) -> Result<Url, Error> {
    let host = host.map(str::trim).unwrap_or_default();

    let candidate = match host {
        "" | "github.com" | "api.github.com" => GITHUB_API_URL.to_string(),
        h if h.starts_with("http://") || h.starts_with("https://") => h.to_string(),
        h => format!("https://{}/api/v3/", h.trim_end_matches('/')),
    };

    let mut url = Url::parse(&candidate).map_err(|e| Error::InvalidHost {
        host: host.to_string(),
        reason: e.to_string(),
    })?;

    if url.cannot_be_a_base() {
        return Err(Error::InvalidHost {
            host: host.to_string(),
            reason: "URL cannot be used as a base".to_string(),
        });
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}
