// Standalone custom-domain and subdomain endpoints
//
// These write immediately, outside the draft flow.

use tracing::debug;

use crate::client::CmsClient;
use crate::error::Error;
use crate::types::{
    CreateDomainRequest, DomainResponse, Envelope, ListPayload, SubdomainAvailability,
    SubdomainResponse, UpdateDomainRequest, UpdateSubdomainRequest,
};

impl CmsClient {
    // ── Custom domains ───────────────────────────────────────────────

    /// List all custom domains.
    ///
    /// `GET /business/domains?limit=0`
    pub async fn list_domains(&self) -> Result<Vec<DomainResponse>, Error> {
        let list: Envelope<ListPayload<DomainResponse>> =
            self.get("business/domains?limit=0").await?;
        Ok(list.into_inner().into_vec())
    }

    /// `POST /business/domains` with `{"domain_name": "..."}`
    pub async fn create_domain(&self, domain_name: &str) -> Result<DomainResponse, Error> {
        debug!(domain_name, "creating domain");
        let created: Envelope<DomainResponse> = self
            .post(
                "business/domains",
                &CreateDomainRequest {
                    domain_name: domain_name.to_owned(),
                },
            )
            .await?;
        Ok(created.into_inner())
    }

    /// `PUT /business/domains/{id}`
    pub async fn update_domain(
        &self,
        id: &str,
        update: &UpdateDomainRequest,
    ) -> Result<DomainResponse, Error> {
        debug!(id, ?update, "updating domain");
        let updated: Envelope<DomainResponse> =
            self.put(&format!("business/domains/{id}"), update).await?;
        Ok(updated.into_inner())
    }

    /// `DELETE /business/domains/{id}`
    pub async fn delete_domain(&self, id: &str) -> Result<(), Error> {
        debug!(id, "deleting domain");
        self.delete(&format!("business/domains/{id}")).await
    }

    // ── Subdomain ────────────────────────────────────────────────────

    /// `GET /business/subdomain`
    pub async fn get_subdomain(&self) -> Result<SubdomainResponse, Error> {
        let sub: Envelope<SubdomainResponse> = self.get("business/subdomain").await?;
        Ok(sub.into_inner())
    }

    /// `PUT /business/subdomain` with `{"subdomain": "..."}`
    pub async fn update_subdomain(&self, subdomain: &str) -> Result<SubdomainResponse, Error> {
        debug!(subdomain, "saving subdomain");
        let sub: Envelope<SubdomainResponse> = self
            .put(
                "business/subdomain",
                &UpdateSubdomainRequest {
                    subdomain: subdomain.to_owned(),
                },
            )
            .await?;
        Ok(sub.into_inner())
    }

    /// `GET /business/subdomain/check/{subdomain}`
    ///
    /// The name is expected to be normalized already (trimmed, lowercase);
    /// anything that is not a plain label is rejected before the request.
    pub async fn check_subdomain(&self, subdomain: &str) -> Result<SubdomainAvailability, Error> {
        if subdomain.is_empty()
            || !subdomain
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return Err(Error::MalformedField {
                field: "subdomain".into(),
                reason: format!("{subdomain:?} is not a valid label"),
            });
        }
        let avail: Envelope<SubdomainAvailability> = self
            .get(&format!("business/subdomain/check/{subdomain}"))
            .await?;
        Ok(avail.into_inner())
    }
}
