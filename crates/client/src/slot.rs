//! Upload slot URL handling.

use reqwest::Url;

use crate::Error;

/// Recovers a directly usable URL from the create-slot `body` field.
///
/// Applies one unquote/trim pass: surrounding whitespace is trimmed and a
/// value wrapped in double quotes is decoded as a JSON string literal (or
/// has its outer pair stripped when it is not valid JSON). Any quote that
/// survives the pass is reported as a malformed response.
pub fn clean_slot_url(raw: &str) -> Result<String, Error> {
    let trimmed = raw.trim();

    let unquoted = if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
        serde_json::from_str::<String>(trimmed)
            .unwrap_or_else(|_| trimmed[1..trimmed.len() - 1].to_string())
    } else {
        trimmed.to_string()
    };

    let url = unquoted.trim();

    if url.is_empty() {
        return Err(Error::MalformedResponse("empty upload URL".into()));
    }

    if url.contains('"') {
        tracing::warn!(raw_len = raw.len(), "upload URL still quoted after unquote pass");
        return Err(Error::MalformedResponse(
            "upload URL contains embedded quote characters".into(),
        ));
    }

    Ok(url.to_string())
}

/// Checks that a slot URL is an absolute `http` or `https` URL.
pub fn validate_slot_url(url: &str) -> Result<Url, Error> {
    let parsed = Url::parse(url).map_err(|e| Error::InvalidSlot(format!("{url}: {e}")))?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(Error::InvalidSlot(format!(
                "unsupported scheme {other}: {url}"
            )));
        }
    }

    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(Error::InvalidSlot(format!("missing host: {url}")));
    }

    Ok(parsed)
}
