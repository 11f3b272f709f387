// Public storefront endpoint
//
// Unauthenticated read of what visitors of a domain see.

use crate::client::CmsClient;
use crate::error::Error;
use crate::types::{Envelope, StorefrontData};

impl CmsClient {
    /// `GET /public/storefront?domain={domain}`
    pub async fn storefront(&self, domain: &str) -> Result<StorefrontData, Error> {
        let data: Envelope<StorefrontData> = self
            .get_public("public/storefront", &[("domain", domain.to_owned())])
            .await?;
        Ok(data.into_inner())
    }
}
