// ── Public storefront ──
//
// Unauthenticated read of what visitors of a domain see. Needs no session.

use tracing::debug;

use shopfront_api::CmsClient;
use shopfront_api::types::StorefrontData;

use crate::config::EditorConfig;
use crate::error::CoreError;

/// Resolve user input to a storefront domain. A bare name without a dot
/// is taken as a subdomain of `suffix`.
pub fn resolve_domain(input: &str, suffix: &str) -> Result<String, CoreError> {
    let domain = input.trim().to_lowercase();
    if domain.is_empty() {
        return Err(CoreError::validation("domain", "domain cannot be empty"));
    }
    if domain.contains('.') {
        Ok(domain)
    } else {
        Ok(format!("{domain}.{suffix}"))
    }
}

/// Fetch the public render data for `input`, returning the resolved
/// domain alongside it.
pub async fn fetch_storefront(
    config: &EditorConfig,
    input: &str,
) -> Result<(String, StorefrontData), CoreError> {
    let domain = resolve_domain(input, &config.storefront_suffix)?;
    let client = CmsClient::new(config.url.as_str(), None, &config.transport())?;
    debug!(%domain, "fetching storefront");
    let data = client.storefront(&domain).await?;
    Ok((domain, data))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn bare_names_gain_suffix() {
        assert_eq!(
            resolve_domain(" Acme ", "nerdplatform.com").unwrap(),
            "acme.nerdplatform.com"
        );
        assert_eq!(
            resolve_domain("shop.acme.com", "nerdplatform.com").unwrap(),
            "shop.acme.com"
        );
        assert!(resolve_domain("   ", "nerdplatform.com").is_err());
    }
}
