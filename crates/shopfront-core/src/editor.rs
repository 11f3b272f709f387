// ── Draft editor ──
//
// Owns the client, the session and the current draft. Loads the draft,
// runs the save orchestrator and the publish gate, and fronts the
// standalone domain/subdomain endpoints. Every backend call goes through
// `guard`, which tears the session down on the first 401.

use std::collections::BTreeMap;
use std::fmt;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use shopfront_api::CmsClient;
use shopfront_api::types::{
    BrandingOptions, DomainResponse, PublishStatus, SubdomainResponse, UpdateDomainRequest,
};

use crate::config::EditorConfig;
use crate::draft::{Draft, Group, normalize_subdomain};
use crate::encode::{self, MIN_SUBDOMAIN_LEN};
use crate::error::CoreError;
use crate::model::DraftSnapshot;
use crate::session::Session;

// ── State ────────────────────────────────────────────────────────────

/// Where the editor is in a load/save/publish cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    Idle,
    Loading,
    Saving,
    Publishing,
}

// ── Results ──────────────────────────────────────────────────────────

/// Outcome of a save that reached the server.
///
/// A save with failed groups is still a completed save: the groups that
/// succeeded are persisted and the draft has been reloaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveReport {
    /// Groups submitted and accepted.
    pub saved: Vec<Group>,
    /// Failed groups, keyed by wire name, with the server's message.
    pub failed: BTreeMap<String, String>,
}

impl SaveReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    /// One line naming every failed group, or `None` when clean.
    pub fn summary(&self) -> Option<String> {
        if self.failed.is_empty() {
            return None;
        }
        let parts: Vec<String> = self
            .failed
            .iter()
            .map(|(group, message)| format!("{group}: {message}"))
            .collect();
        Some(format!("Some groups failed to save: {}", parts.join(", ")))
    }
}

impl fmt::Display for SaveReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.summary() {
            Some(summary) => f.write_str(&summary),
            None => f.write_str("Draft saved"),
        }
    }
}

/// Outcome of the publish gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// The draft is live. `saved` lists groups saved on the way.
    Published {
        version: Option<u64>,
        saved: Vec<Group>,
    },
    /// The pre-publish save had failed groups; nothing was published.
    Aborted { report: SaveReport },
}

/// Result of a subdomain availability check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubdomainCheck {
    pub subdomain: String,
    pub available: bool,
    /// Answered locally because it is the current subdomain.
    pub is_current: bool,
}

// ── Editor ───────────────────────────────────────────────────────────

pub struct DraftEditor {
    client: CmsClient,
    config: EditorConfig,
    session: Session,
    draft: Option<Draft>,
    branding_options: Option<BrandingOptions>,
    group_errors: BTreeMap<String, String>,
    current_subdomain: Option<String>,
    state: watch::Sender<EditorState>,
}

impl DraftEditor {
    pub fn new(config: EditorConfig, session: Session) -> Result<Self, CoreError> {
        let client = CmsClient::new(
            config.url.as_str(),
            Some(session.token().clone()),
            &config.transport(),
        )?;
        Ok(Self::with_client(client, config, session))
    }

    /// Build around an existing client (tests, custom transports).
    pub fn with_client(client: CmsClient, config: EditorConfig, session: Session) -> Self {
        let (state, _) = watch::channel(EditorState::Idle);
        Self {
            client,
            config,
            session,
            draft: None,
            branding_options: None,
            group_errors: BTreeMap::new(),
            current_subdomain: None,
            state,
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn state(&self) -> EditorState {
        *self.state.borrow()
    }

    /// Observe state transitions.
    pub fn subscribe(&self) -> watch::Receiver<EditorState> {
        self.state.subscribe()
    }

    pub fn draft(&self) -> Option<&Draft> {
        self.draft.as_ref()
    }

    pub fn draft_mut(&mut self) -> Result<&mut Draft, CoreError> {
        self.draft.as_mut().ok_or(CoreError::NotLoaded)
    }

    pub fn branding_options(&self) -> Option<&BrandingOptions> {
        self.branding_options.as_ref()
    }

    /// Per-group error markers from previous saves, keyed by wire name.
    pub fn group_errors(&self) -> &BTreeMap<String, String> {
        &self.group_errors
    }

    pub fn group_error(&self, group: Group) -> Option<&str> {
        self.group_errors.get(group.wire_key()).map(String::as_str)
    }

    fn set_state(&self, state: EditorState) {
        self.state.send_replace(state);
    }

    // ── Session guard ────────────────────────────────────────────────

    fn ensure_session(&self) -> Result<(), CoreError> {
        if self.session.is_active() {
            Ok(())
        } else {
            Err(CoreError::Unauthorized)
        }
    }

    /// Convert an API result, tearing the session down on 401.
    fn guard<T>(&mut self, result: Result<T, shopfront_api::Error>) -> Result<T, CoreError> {
        result.map_err(|err| {
            if err.is_unauthorized() {
                self.teardown();
            }
            CoreError::from(err)
        })
    }

    /// End the session: drop editable state, release previews, run the
    /// session's teardown hook.
    pub fn teardown(&mut self) {
        if let Some(mut draft) = self.draft.take() {
            draft.release_previews();
        }
        self.group_errors.clear();
        self.session.teardown();
    }

    // ── Load ─────────────────────────────────────────────────────────

    /// Fetch the draft and fork fresh editable state. Clears every
    /// per-group error marker.
    ///
    /// All-or-nothing: on failure no editable state is left behind.
    pub async fn load(&mut self) -> Result<&Draft, CoreError> {
        self.ensure_session()?;
        self.set_state(EditorState::Loading);
        let result = self.refresh().await;
        self.set_state(EditorState::Idle);
        result?;
        self.group_errors.clear();
        self.draft.as_ref().ok_or(CoreError::NotLoaded)
    }

    /// Fetch draft and branding presets concurrently and fork the draft.
    /// A failed preset fetch is ignored. A failed draft fetch also drops
    /// the per-group error markers.
    async fn refresh(&mut self) -> Result<(), CoreError> {
        if let Some(mut old) = self.draft.take() {
            old.release_previews();
        }

        let (draft, options) = tokio::join!(self.client.get_draft(), self.client.branding_options());

        let response = match self.guard(draft) {
            Ok(response) => response,
            Err(e) => {
                // Markers belong to the draft that is now gone.
                self.group_errors.clear();
                return Err(e);
            }
        };
        self.branding_options = match options {
            Ok(options) => Some(options),
            Err(e) => {
                warn!(error = %e, "branding options unavailable");
                None
            }
        };

        let snapshot = DraftSnapshot::from(response);
        self.current_subdomain = Some(snapshot.subdomain.clone());
        debug!(
            banners = snapshot.banners.len(),
            domains = snapshot.domains.len(),
            "draft loaded"
        );
        self.draft = Some(Draft::fork(snapshot));
        Ok(())
    }

    /// Discard local edits, re-forking from the last snapshot.
    pub fn discard(&mut self) -> Result<(), CoreError> {
        self.draft_mut()?.discard();
        Ok(())
    }

    // ── Save orchestrator ────────────────────────────────────────────

    /// Submit every dirty group in one request, then reload.
    ///
    /// Failed groups are reported in the [`SaveReport`], not as an error.
    /// Only local validation, auth and transport failures are errors; on
    /// those, editable state is left untouched.
    pub async fn save(&mut self) -> Result<SaveReport, CoreError> {
        self.ensure_session()?;
        self.set_state(EditorState::Saving);
        let result = self.save_inner().await;
        self.set_state(EditorState::Idle);
        result
    }

    async fn save_inner(&mut self) -> Result<SaveReport, CoreError> {
        let draft = self.draft.as_ref().ok_or(CoreError::NotLoaded)?;
        let dirty = draft.dirty_set();
        if dirty.is_empty() {
            return Err(CoreError::NothingToSave);
        }
        encode::validate(draft, &dirty)?;
        let form = encode::encode(draft, &dirty)?;

        info!(groups = %dirty, "saving draft");
        let result = self.client.save_draft(form).await;
        let response = self.guard(result)?;

        let failed = response.group_errors();
        let mut saved = Vec::with_capacity(dirty.len());
        for group in dirty.iter() {
            let key = group.wire_key();
            match failed.get(key) {
                Some(message) => {
                    self.group_errors.insert(key.to_owned(), message.clone());
                }
                None => {
                    self.group_errors.remove(key);
                    saved.push(group);
                }
            }
        }
        // Failures for groups we did not send still deserve a marker.
        for (key, message) in &failed {
            self.group_errors
                .entry(key.clone())
                .or_insert_with(|| message.clone());
        }

        let report = SaveReport { saved, failed };
        match report.summary() {
            Some(summary) => warn!("{summary}"),
            None => info!("draft saved"),
        }

        self.refresh().await.map_err(|e| match e {
            CoreError::Unauthorized => CoreError::Unauthorized,
            other => CoreError::ReloadFailed {
                reason: other.to_string(),
            },
        })?;
        Ok(report)
    }

    // ── Publish gate ─────────────────────────────────────────────────

    /// Save pending changes if any, then publish.
    ///
    /// Idle -> Saving -> Publishing -> Idle. Publishing is skipped when
    /// the save reports any failed group.
    pub async fn publish(&mut self) -> Result<PublishOutcome, CoreError> {
        self.ensure_session()?;

        let dirty = self.draft.as_ref().is_some_and(Draft::is_any_dirty);
        let mut saved = Vec::new();
        if dirty {
            self.set_state(EditorState::Saving);
            let report = match self.save_inner().await {
                Ok(report) => report,
                Err(e) => {
                    self.set_state(EditorState::Idle);
                    return Err(e);
                }
            };
            if !report.is_clean() {
                self.set_state(EditorState::Idle);
                warn!("publish aborted: save had failed groups");
                return Ok(PublishOutcome::Aborted { report });
            }
            saved = report.saved;
        }

        self.set_state(EditorState::Publishing);
        let result = self.client.publish().await;
        self.set_state(EditorState::Idle);

        let response = match result {
            Err(shopfront_api::Error::Api { status, message }) if (400..500).contains(&status) => {
                return Err(CoreError::PublishRejected { message });
            }
            other => self.guard(other)?,
        };

        match (response.version, response.message) {
            (None, Some(message)) => Err(CoreError::PublishRejected { message }),
            (version, _) => {
                info!(?version, "draft published");
                Ok(PublishOutcome::Published { version, saved })
            }
        }
    }

    /// Unpublished-changes flag and last published version.
    pub async fn status(&mut self) -> Result<PublishStatus, CoreError> {
        self.ensure_session()?;
        let result = self.client.publish_status().await;
        self.guard(result)
    }

    // ── Standalone domains ───────────────────────────────────────────

    pub async fn list_domains(&mut self) -> Result<Vec<DomainResponse>, CoreError> {
        self.ensure_session()?;
        let result = self.client.list_domains().await;
        self.guard(result)
    }

    pub async fn create_domain(&mut self, domain_name: &str) -> Result<DomainResponse, CoreError> {
        self.ensure_session()?;
        let name = domain_name.trim();
        if name.is_empty() {
            return Err(CoreError::validation("domain", "domain name cannot be empty"));
        }
        let result = self.client.create_domain(name).await;
        self.guard(result)
    }

    pub async fn update_domain(
        &mut self,
        id: &str,
        domain_name: Option<&str>,
        is_active: Option<bool>,
    ) -> Result<DomainResponse, CoreError> {
        self.ensure_session()?;
        let update = UpdateDomainRequest {
            domain_name: domain_name.map(|n| n.trim().to_owned()),
            is_active,
        };
        let result = self.client.update_domain(id, &update).await;
        self.guard(result)
    }

    pub async fn delete_domain(&mut self, id: &str) -> Result<(), CoreError> {
        self.ensure_session()?;
        let result = self.client.delete_domain(id).await;
        self.guard(result)
    }

    // ── Standalone subdomain ─────────────────────────────────────────

    pub async fn subdomain(&mut self) -> Result<SubdomainResponse, CoreError> {
        self.ensure_session()?;
        let result = self.client.get_subdomain().await;
        let sub = self.guard(result)?;
        self.current_subdomain = sub.subdomain.clone();
        Ok(sub)
    }

    /// Check availability. The current subdomain is reported available
    /// without asking the server.
    pub async fn check_subdomain(&mut self, input: &str) -> Result<SubdomainCheck, CoreError> {
        self.ensure_session()?;
        let subdomain = validate_subdomain(input)?;
        if self.current_subdomain.as_deref() == Some(subdomain.as_str()) {
            return Ok(SubdomainCheck {
                subdomain,
                available: true,
                is_current: true,
            });
        }
        let result = self.client.check_subdomain(&subdomain).await;
        let available = self.guard(result)?.available;
        Ok(SubdomainCheck {
            subdomain,
            available,
            is_current: false,
        })
    }

    pub async fn set_subdomain(&mut self, input: &str) -> Result<SubdomainResponse, CoreError> {
        self.ensure_session()?;
        let subdomain = validate_subdomain(input)?;
        let result = self.client.update_subdomain(&subdomain).await;
        let sub = self.guard(result)?;
        self.current_subdomain = sub.subdomain.clone().or(Some(subdomain));
        info!(subdomain = ?self.current_subdomain, "subdomain saved");
        Ok(sub)
    }
}

/// Trim, lowercase and length-check a standalone subdomain.
fn validate_subdomain(input: &str) -> Result<String, CoreError> {
    let subdomain = normalize_subdomain(input);
    if subdomain.len() < MIN_SUBDOMAIN_LEN {
        return Err(CoreError::validation(
            "subdomain",
            format!("must be at least {MIN_SUBDOMAIN_LEN} characters"),
        ));
    }
    Ok(subdomain)
}

impl Drop for DraftEditor {
    fn drop(&mut self) {
        if let Some(draft) = self.draft.as_mut() {
            draft.release_previews();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_summary_names_failed_groups() {
        let report = SaveReport {
            saved: vec![Group::Seo],
            failed: BTreeMap::from([
                ("banners".to_string(), "limit exceeded".to_string()),
                ("logo".to_string(), "too large".to_string()),
            ]),
        };
        assert!(!report.is_clean());
        assert_eq!(
            report.to_string(),
            "Some groups failed to save: banners: limit exceeded, logo: too large"
        );
        assert_eq!(SaveReport::default().to_string(), "Draft saved");
    }

    #[test]
    fn subdomain_input_is_normalized_before_length_check() {
        assert_eq!(validate_subdomain("  ACME ").ok().as_deref(), Some("acme"));
        assert!(validate_subdomain(" a_b ").is_err());
    }
}
