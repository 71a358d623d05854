use url::Url;

use crate::errors::DomainError;

/// Normalize user input to a bare hostname: no scheme, no `www.` prefix,
/// no path, lowercase. `https://www.Example.com/path` and `example.com`
/// both normalize to `example.com`.
pub fn normalize(raw: &str) -> Result<String, DomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidHostname(raw.to_string()));
    }

    // Bare hostnames don't parse as URLs; give them a scheme first.
    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    };

    let parsed =
        Url::parse(&candidate).map_err(|_| DomainError::InvalidHostname(raw.to_string()))?;
    let host = parsed
        .host_str()
        .ok_or_else(|| DomainError::InvalidHostname(raw.to_string()))?
        .to_ascii_lowercase();

    Ok(host.strip_prefix("www.").unwrap_or(&host).to_string())
}
