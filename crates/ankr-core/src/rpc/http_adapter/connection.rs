use reqwest::Url;

use crate::error::CoreError;

/// Build the POST target `<base_url>/<api_key>`.
///
/// The base must be an HTTP(S) URL. The key becomes a single path segment,
/// so it may not contain separators or whitespace. An empty key yields the
/// bare base URL (public, heavily throttled access).
pub fn endpoint_url(base_url: &str, api_key: &str) -> Result<String, CoreError> {
    let parsed = Url::parse(base_url).map_err(|e| {
        CoreError::Config(format!(
            "invalid endpoint `{base_url}`: expected HTTP(S) URL ({e})"
        ))
    })?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(CoreError::Config(format!(
                "unsupported endpoint scheme `{other}`; expected http or https"
            )));
        }
    }
    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(CoreError::Config(format!(
            "endpoint `{base_url}` must not carry a query or fragment"
        )));
    }

    let base = base_url.trim_end_matches('/');
    if api_key.is_empty() {
        return Ok(base.to_owned());
    }
    if api_key
        .chars()
        .any(|c| matches!(c, '/' | '?' | '#') || c.is_whitespace())
    {
        return Err(CoreError::Config(
            "api key must be a single URL path segment".to_owned(),
        ));
    }

    Ok(format!("{base}/{api_key}"))
}
