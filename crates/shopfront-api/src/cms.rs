// CMS draft, publish and branding endpoints
//
// The draft is one aggregate resource: read as a single JSON document and
// written as a single multipart body that only carries the dirty groups.

use tracing::debug;

use crate::client::CmsClient;
use crate::error::Error;
use crate::form::DraftForm;
use crate::types::{
    BrandingOptions, DraftResponse, Envelope, PublishResponse, PublishStatus, SaveDraftResponse,
};

impl CmsClient {
    /// Fetch the aggregate draft.
    ///
    /// `GET /business/cms/draft`
    pub async fn get_draft(&self) -> Result<DraftResponse, Error> {
        let draft: Envelope<DraftResponse> = self.get("business/cms/draft").await?;
        Ok(draft.into_inner())
    }

    /// Submit the dirty groups of the draft.
    ///
    /// `PUT /business/cms/draft` (multipart). A 2xx response may still
    /// carry per-group failures; see [`SaveDraftResponse::group_errors`].
    pub async fn save_draft(&self, form: DraftForm) -> Result<SaveDraftResponse, Error> {
        debug!(fields = ?form.field_names(), "saving draft");
        self.put_multipart("business/cms/draft", form).await
    }

    /// Promote the current draft to the live storefront.
    ///
    /// `POST /business/cms/publish`
    pub async fn publish(&self) -> Result<PublishResponse, Error> {
        self.post_empty("business/cms/publish").await
    }

    /// Unpublished-changes indicator and last published version.
    ///
    /// `GET /business/cms/status`
    pub async fn publish_status(&self) -> Result<PublishStatus, Error> {
        let status: Envelope<PublishStatus> = self.get("business/cms/status").await?;
        Ok(status.into_inner())
    }

    /// Color and font presets. Unauthenticated.
    ///
    /// `GET /business/branding/options`
    pub async fn branding_options(&self) -> Result<BrandingOptions, Error> {
        let options: Envelope<BrandingOptions> =
            self.get_public("business/branding/options", &[]).await?;
        Ok(options.into_inner())
    }
}
