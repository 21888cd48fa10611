//! Poster selection policy and the per-item run loop.

use anyhow::{Context, Result};
use tracing::{error, info, warn};

use crate::config::SelectionConfig;
use crate::plex::{MediaItem, PlexClient, PosterCandidate};

/// Ordered provider tie-break policy.
///
/// A change is wanted when no candidate is selected or the selected
/// candidate's provider is on the replace list. The replacement is the first
/// candidate (server order) from the earliest matching entry of the preferred
/// list, with the very first candidate as the final default.
#[derive(Debug, Clone)]
pub struct ProviderPreference {
    preferred: Vec<String>,
    replace: Vec<String>,
}

impl ProviderPreference {
    pub fn new(preferred: Vec<String>, replace: Vec<String>) -> Self {
        Self { preferred, replace }
    }

    pub fn from_config(config: &SelectionConfig) -> Self {
        Self::new(
            config.preferred_providers.clone(),
            config.replace_providers.clone(),
        )
    }

    fn should_replace(&self, selected: Option<&PosterCandidate>) -> bool {
        match selected {
            None => true,
            Some(candidate) => candidate
                .provider
                .as_deref()
                .is_some_and(|p| self.replace.iter().any(|r| r == p)),
        }
    }

    fn choose<'a>(&self, candidates: &'a [PosterCandidate]) -> Option<&'a PosterCandidate> {
        for provider in &self.preferred {
            if let Some(candidate) = candidates
                .iter()
                .find(|c| c.provider.as_deref() == Some(provider.as_str()))
            {
                return Some(candidate);
            }
        }
        candidates.first()
    }
}

/// Outcome of applying the policy to one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    SkippedLocked,
    NoCandidates,
    KeepCurrent { provider: String },
    Selected { provider: String },
    WouldSelect { provider: String },
}

/// What a single invocation operates on.
#[derive(Debug, Clone)]
pub enum Scope {
    Item(u64),
    Library(String),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub include_locked: bool,
    pub dry_run: bool,
}

/// Per-run counters, logged at the end of a sweep and used by the caller to
/// decide the exit status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub items: usize,
    pub selected: usize,
    pub would_select: usize,
    pub kept: usize,
    pub skipped_locked: usize,
    pub no_candidates: usize,
    pub failed: usize,
}

impl RunSummary {
    fn record(&mut self, decision: &Decision) {
        match decision {
            Decision::SkippedLocked => self.skipped_locked += 1,
            Decision::NoCandidates => self.no_candidates += 1,
            Decision::KeepCurrent { .. } => self.kept += 1,
            Decision::Selected { .. } => self.selected += 1,
            Decision::WouldSelect { .. } => self.would_select += 1,
        }
    }
}

/// Applies the selection policy to one item or a whole library section.
pub struct PosterSelector {
    client: PlexClient,
    preference: ProviderPreference,
}

impl PosterSelector {
    pub fn new(client: PlexClient, preference: ProviderPreference) -> Self {
        Self { client, preference }
    }

    /// Resolve the scope to concrete items and process each sequentially.
    ///
    /// Scope resolution failures abort the run; a failure on one item inside
    /// a library sweep is logged and counted, and the sweep continues.
    pub async fn run(&self, scope: &Scope, options: RunOptions) -> Result<RunSummary> {
        let mut summary = RunSummary::default();

        match scope {
            Scope::Item(rating_key) => {
                let item = self
                    .client
                    .fetch_item(*rating_key)
                    .await
                    .with_context(|| format!("Failed to fetch item {}", rating_key))?;
                self.process_item(&item, options, &mut summary).await;
            }
            Scope::Library(name) => {
                let section = self
                    .client
                    .section_by_name(name)
                    .await
                    .with_context(|| format!("Failed to resolve library '{}'", name))?;
                let items = self
                    .client
                    .section_items(&section)
                    .await
                    .with_context(|| format!("Failed to enumerate library '{}'", section.title))?;
                info!(
                    "Processing {} items in library '{}'",
                    items.len(),
                    section.title
                );
                for item in &items {
                    self.process_item(item, options, &mut summary).await;
                }
            }
        }

        info!(
            "Done: {} items, {} selected, {} would select, {} kept, {} locked, {} without candidates, {} failed",
            summary.items,
            summary.selected,
            summary.would_select,
            summary.kept,
            summary.skipped_locked,
            summary.no_candidates,
            summary.failed
        );

        Ok(summary)
    }

    async fn process_item(&self, item: &MediaItem, options: RunOptions, summary: &mut RunSummary) {
        summary.items += 1;
        match self.apply_policy(item, options).await {
            Ok(decision) => summary.record(&decision),
            Err(e) => {
                summary.failed += 1;
                error!("Error processing item {}: {:#}", item.title, e);
            }
        }
    }

    async fn apply_policy(&self, item: &MediaItem, options: RunOptions) -> Result<Decision> {
        if !options.include_locked && item.poster_locked() {
            info!("Locked poster for {}. Skipping.", item.title);
            return Ok(Decision::SkippedLocked);
        }

        let posters = self.client.posters(item).await?;
        if posters.is_empty() {
            warn!("No poster candidates for {}.", item.title);
            return Ok(Decision::NoCandidates);
        }

        let selected = posters.iter().find(|p| p.selected);
        match selected {
            None => warn!("No poster selected for {}.", item.title),
            Some(p) => info!(
                "Poster provider is '{}' for {}.",
                p.provider_label(),
                item.title
            ),
        }

        if !self.preference.should_replace(selected) {
            let provider = selected
                .map(|p| p.provider_label().to_string())
                .unwrap_or_default();
            return Ok(Decision::KeepCurrent { provider });
        }

        // posters is non-empty, so the final default always yields a candidate
        let Some(choice) = self.preference.choose(&posters) else {
            return Ok(Decision::NoCandidates);
        };

        let provider = choice.provider_label().to_string();
        if options.dry_run {
            info!(
                "[DRY RUN] Would select {} poster for {}.",
                provider, item.title
            );
            Ok(Decision::WouldSelect { provider })
        } else {
            self.client.select_poster(item, choice).await?;
            info!("Selected {} poster for {}.", provider, item.title);
            Ok(Decision::Selected { provider })
        }
    }
}
