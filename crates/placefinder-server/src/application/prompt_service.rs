//! Prompt Application Service (Use Case)
//!
//! Keeps remote prompt drafts in step with the local registry, bounds the
//! remote version history and serves prompt text through a TTL cache.
//!
//! Remote failures never escape this service. Sync problems are logged per
//! prompt, and reads fall back to the local template.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;

use placefinder::{
    content_fingerprint, short_fingerprint, substitute_variables, DomainError, PromptDefinition,
    PromptRegistry, PromptStore,
};

/// Ceiling on numbered versions kept per remote prompt
pub const MAX_PROMPT_VERSIONS: usize = 10;

/// Label of the mutable working copy
pub const DRAFT_VERSION: &str = "DRAFT";

/// Label recorded when local template text is served instead of remote text
pub const LOCAL_VERSION: &str = "LOCAL";

struct CacheEntry {
    text: String,
    version: String,
    fetched_at: Instant,
}

/// Step at which a sync gave up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStage {
    FetchDraft,
    UpdateDraft,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// No remote identifier configured
    Skipped,
    UpToDate,
    /// Draft overwritten; `version` is `None` when version creation failed
    Updated { version: Option<String> },
    Failed(SyncStage),
}

/// Result of bounding the numbered version history
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionLimit {
    /// Below the ceiling; nothing deleted
    WithinLimit,
    /// The oldest numbered version was deleted to make room
    Deleted(String),
    /// At the ceiling with no numeric label to delete
    Saturated,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncSummary {
    pub updated: usize,
    pub up_to_date: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Application service for managed prompts
pub struct PromptService<S: PromptStore + ?Sized> {
    store: Arc<S>,
    registry: PromptRegistry,
    remote_ids: HashMap<String, String>,
    ttl: Duration,
    cache: RwLock<HashMap<String, CacheEntry>>,
}

impl<S: PromptStore + ?Sized> PromptService<S> {
    /// `remote_ids` maps each definition's configuration key to its remote
    /// prompt identifier. Definitions without an entry are local only.
    pub fn new(
        store: Arc<S>,
        registry: PromptRegistry,
        remote_ids: HashMap<String, String>,
        ttl: Duration,
    ) -> Self {
        Self {
            store,
            registry,
            remote_ids,
            ttl,
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn registry(&self) -> &PromptRegistry {
        &self.registry
    }

    fn remote_id(&self, definition: &PromptDefinition) -> Option<&str> {
        self.remote_ids
            .get(definition.remote_id_key())
            .map(String::as_str)
            .filter(|id| !id.is_empty())
    }

    // ============================================
    // Sync: local -> remote
    // ============================================

    /// Sync every registered prompt, one after another.
    pub async fn sync_all_prompts(&self) -> SyncSummary {
        let mut summary = SyncSummary::default();

        if self.registry.is_empty() {
            tracing::warn!("No prompts registered. Nothing to sync.");
            return summary;
        }

        tracing::info!("Syncing {} prompt(s) to the prompt store...", self.registry.len());

        for definition in self.registry.iter() {
            match self.sync_prompt(definition).await {
                SyncOutcome::Skipped => summary.skipped += 1,
                SyncOutcome::UpToDate => summary.up_to_date += 1,
                SyncOutcome::Updated { .. } => summary.updated += 1,
                SyncOutcome::Failed(_) => summary.failed += 1,
            }
        }

        tracing::info!(
            updated = summary.updated,
            up_to_date = summary.up_to_date,
            skipped = summary.skipped,
            failed = summary.failed,
            "Prompt sync complete"
        );
        summary
    }

    /// Sync one definition to its remote draft.
    ///
    /// Writes only happen when the trimmed template's fingerprint differs
    /// from the remote draft's. A content change overwrites the draft, makes
    /// room under the version ceiling and snapshots a new version.
    pub async fn sync_prompt(&self, definition: &PromptDefinition) -> SyncOutcome {
        let Some(prompt_id) = self.remote_id(definition) else {
            tracing::warn!(
                "Skipping sync for {:?}: {} is not set.",
                definition.name(),
                definition.remote_id_key()
            );
            return SyncOutcome::Skipped;
        };

        let local_hash = content_fingerprint(definition.template());

        let draft = match self.store.get_prompt(prompt_id, None).await {
            Ok(draft) => draft,
            Err(e) => {
                tracing::error!(
                    "Failed to fetch draft for prompt {}. Skipping sync for {:?}: {}",
                    prompt_id,
                    definition.name(),
                    e
                );
                return SyncOutcome::Failed(SyncStage::FetchDraft);
            }
        };

        let draft_hash = content_fingerprint(&draft.text);
        if local_hash == draft_hash {
            tracing::info!(
                "Prompt {:?} is up-to-date (hash={}...)",
                definition.name(),
                short_fingerprint(&local_hash)
            );
            return SyncOutcome::UpToDate;
        }

        tracing::info!(
            "Prompt {:?} content changed. Local hash={}... vs draft hash={}...",
            definition.name(),
            short_fingerprint(&local_hash),
            short_fingerprint(&draft_hash)
        );

        let remote_name = if draft.name.is_empty() {
            definition.name()
        } else {
            draft.name.as_str()
        };

        if let Err(e) = self
            .store
            .update_draft(prompt_id, remote_name, definition)
            .await
        {
            tracing::error!("Failed to update draft for prompt {:?}: {}", definition.name(), e);
            return SyncOutcome::Failed(SyncStage::UpdateDraft);
        }
        tracing::info!("Updated draft for prompt {:?}", definition.name());

        // Must finish before the new version is created
        match self.enforce_version_limit(prompt_id).await {
            Ok(VersionLimit::Saturated) => {
                tracing::warn!(
                    "Prompt {:?} is at {} versions with none deletable. Skipping version creation",
                    definition.name(),
                    MAX_PROMPT_VERSIONS
                );
                return SyncOutcome::Updated { version: None };
            }
            Ok(_) => {}
            Err(e) => tracing::error!(
                "Failed to enforce version limit for prompt {:?}: {}",
                definition.name(),
                e
            ),
        }

        let description = format!(
            "Auto-synced from local source. Hash: {}",
            short_fingerprint(&local_hash)
        );
        match self.store.create_version(prompt_id, &description).await {
            Ok(version) => {
                tracing::info!("Created version {} for prompt {:?}", version, definition.name());
                SyncOutcome::Updated {
                    version: Some(version),
                }
            }
            Err(e) => {
                tracing::error!("Failed to create version for prompt {:?}: {}", definition.name(), e);
                SyncOutcome::Updated { version: None }
            }
        }
    }

    /// Delete the oldest numbered version when the prompt is at the ceiling.
    ///
    /// At most one version is removed per call. `Saturated` means no
    /// version can be created without passing the ceiling.
    pub async fn enforce_version_limit(
        &self,
        prompt_id: &str,
    ) -> Result<VersionLimit, DomainError> {
        let mut numbered = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let page = self
                .store
                .list_versions(prompt_id, next_token.as_deref())
                .await?;
            numbered.extend(page.versions.into_iter().filter(|v| v != DRAFT_VERSION));

            match page.next_token.filter(|t| !t.is_empty()) {
                Some(token) => next_token = Some(token),
                None => break,
            }
        }

        if numbered.len() < MAX_PROMPT_VERSIONS {
            return Ok(VersionLimit::WithinLimit);
        }

        let Some(oldest) = numbered
            .iter()
            .filter_map(|v| v.parse::<u64>().ok().map(|n| (n, v)))
            .min_by_key(|(n, _)| *n)
            .map(|(_, v)| v.clone())
        else {
            tracing::warn!("No numeric version found for prompt {}", prompt_id);
            return Ok(VersionLimit::Saturated);
        };

        tracing::warn!(
            "Version limit reached ({}) for prompt {}. Deleting oldest version: {}",
            MAX_PROMPT_VERSIONS,
            prompt_id,
            oldest
        );
        let outcome = self.store.delete_version(prompt_id, &oldest).await?;
        tracing::debug!(?outcome, "Deleted version {} of prompt {}", oldest, prompt_id);

        Ok(VersionLimit::Deleted(oldest))
    }

    // ============================================
    // Cached retrieval
    // ============================================

    /// Prompt text by name, from cache, remote store or local template.
    ///
    /// Only an unknown name is an error.
    pub async fn get_prompt_text(
        &self,
        name: &str,
        version: Option<&str>,
    ) -> Result<String, DomainError> {
        let definition = self
            .registry
            .get(name)
            .ok_or_else(|| DomainError::UnknownPrompt(name.to_string()))?;

        let cache_key = match version {
            Some(v) => format!("{name}@{v}"),
            None => name.to_string(),
        };

        if let Some(entry) = self.cache.read().await.get(&cache_key) {
            if entry.fetched_at.elapsed() < self.ttl {
                tracing::debug!(
                    "Returning cached prompt {:?} (version={})",
                    name,
                    entry.version
                );
                return Ok(entry.text.clone());
            }
        }

        let Some(prompt_id) = self.remote_id(definition) else {
            tracing::warn!("No remote ID for {:?}. Returning local template text.", name);
            return Ok(definition.template().to_string());
        };

        let (text, fetched_version) = match self.store.get_prompt(prompt_id, version).await {
            Ok(remote) => (remote.text, remote.version),
            Err(e) => {
                tracing::error!(
                    "Failed to fetch prompt {:?} from the prompt store. Falling back to local template: {}",
                    name,
                    e
                );
                (definition.template().to_string(), LOCAL_VERSION.to_string())
            }
        };

        tracing::info!(
            "Fetched prompt {:?} (version={}, length={})",
            name,
            fetched_version,
            text.len()
        );

        self.cache.write().await.insert(
            cache_key,
            CacheEntry {
                text: text.clone(),
                version: fetched_version,
                fetched_at: Instant::now(),
            },
        );

        Ok(text)
    }

    /// Prompt text with every declared `{{variable}}` substituted.
    pub async fn render_prompt(
        &self,
        name: &str,
        variables: &HashMap<String, String>,
    ) -> Result<String, DomainError> {
        let text = self.get_prompt_text(name, None).await?;
        let definition = self
            .registry
            .get(name)
            .ok_or_else(|| DomainError::UnknownPrompt(name.to_string()))?;

        Ok(substitute_variables(&text, definition.variables(), variables))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use placefinder::{DeleteOutcome, RemotePrompt, VersionPage};
    use std::sync::Mutex;

    const PROMPT_ID: &str = "PROMPT123";
    const PAGE_SIZE: usize = 3;

    #[derive(Default)]
    struct MockState {
        draft_text: String,
        versions: Vec<u64>,
        /// Non-numeric labels listed after the numbered versions
        odd_labels: Vec<String>,
        next_version: u64,
        fail_get: bool,
        fail_update: bool,
        fail_list: bool,
        fail_create: bool,
        get_calls: usize,
        update_calls: usize,
        list_calls: usize,
        create_calls: usize,
        deleted: Vec<String>,
    }

    impl MockState {
        fn writes(&self) -> usize {
            self.update_calls + self.create_calls + self.deleted.len()
        }
    }

    #[derive(Default)]
    struct MockPromptStore {
        state: Mutex<MockState>,
    }

    impl MockPromptStore {
        fn with_draft(text: &str, versions: u64) -> Self {
            let store = Self::default();
            {
                let mut state = store.state.lock().unwrap();
                state.draft_text = text.to_string();
                state.versions = (1..=versions).collect();
                state.next_version = versions + 1;
            }
            store
        }

        fn state(&self) -> std::sync::MutexGuard<'_, MockState> {
            self.state.lock().unwrap()
        }
    }

    fn unavailable() -> DomainError {
        DomainError::ExternalService("prompt store unavailable".to_string())
    }

    #[async_trait]
    impl PromptStore for MockPromptStore {
        async fn get_prompt(
            &self,
            _prompt_id: &str,
            version: Option<&str>,
        ) -> Result<RemotePrompt, DomainError> {
            let mut state = self.state();
            state.get_calls += 1;
            if state.fail_get {
                return Err(unavailable());
            }
            Ok(RemotePrompt {
                name: "remote_name".to_string(),
                text: state.draft_text.clone(),
                variables: Vec::new(),
                version: version.unwrap_or(DRAFT_VERSION).to_string(),
            })
        }

        async fn update_draft(
            &self,
            _prompt_id: &str,
            name: &str,
            definition: &PromptDefinition,
        ) -> Result<(), DomainError> {
            let mut state = self.state();
            state.update_calls += 1;
            if state.fail_update {
                return Err(unavailable());
            }
            assert_eq!(name, "remote_name");
            state.draft_text = definition.template().to_string();
            Ok(())
        }

        async fn create_version(
            &self,
            _prompt_id: &str,
            description: &str,
        ) -> Result<String, DomainError> {
            let mut state = self.state();
            state.create_calls += 1;
            if state.fail_create {
                return Err(unavailable());
            }
            assert!(description.starts_with("Auto-synced from local source. Hash: "));
            let version = state.next_version;
            state.next_version += 1;
            state.versions.push(version);
            Ok(version.to_string())
        }

        async fn list_versions(
            &self,
            _prompt_id: &str,
            next_token: Option<&str>,
        ) -> Result<VersionPage, DomainError> {
            let mut state = self.state();
            state.list_calls += 1;
            if state.fail_list {
                return Err(unavailable());
            }
            // Listing order is newest first, with the draft on the first page
            let mut all = vec![DRAFT_VERSION.to_string()];
            all.extend(state.versions.iter().rev().map(u64::to_string));
            all.extend(state.odd_labels.iter().cloned());

            let start: usize = next_token.map(|t| t.parse().unwrap()).unwrap_or(0);
            let end = (start + PAGE_SIZE).min(all.len());
            Ok(VersionPage {
                versions: all[start..end].to_vec(),
                next_token: (end < all.len()).then(|| end.to_string()),
            })
        }

        async fn delete_version(
            &self,
            _prompt_id: &str,
            version: &str,
        ) -> Result<DeleteOutcome, DomainError> {
            let mut state = self.state();
            let number: u64 = version.parse().unwrap();
            state.deleted.push(version.to_string());
            let before = state.versions.len();
            state.versions.retain(|v| *v != number);
            Ok(if state.versions.len() < before {
                DeleteOutcome::Deleted
            } else {
                DeleteOutcome::AlreadyAbsent
            })
        }
    }

    fn registry_with(template: &str) -> PromptRegistry {
        let mut registry = PromptRegistry::new();
        registry
            .register(PromptDefinition::new("trip", "TRIP_PROMPT_ID", template))
            .unwrap();
        registry
    }

    fn service(
        store: Arc<MockPromptStore>,
        template: &str,
        configured: bool,
    ) -> PromptService<MockPromptStore> {
        let mut remote_ids = HashMap::new();
        if configured {
            remote_ids.insert("TRIP_PROMPT_ID".to_string(), PROMPT_ID.to_string());
        }
        PromptService::new(
            store,
            registry_with(template),
            remote_ids,
            Duration::from_secs(300),
        )
    }

    fn trip(service: &PromptService<MockPromptStore>) -> PromptDefinition {
        service.registry().get("trip").unwrap().clone()
    }

    #[tokio::test]
    async fn test_sync_writes_once_then_is_idempotent() {
        let store = Arc::new(MockPromptStore::with_draft("old text", 2));
        let service = service(store.clone(), "Plan for {{user_name}}", true);
        let def = trip(&service);

        let first = service.sync_prompt(&def).await;
        assert_eq!(
            first,
            SyncOutcome::Updated {
                version: Some("3".to_string())
            }
        );
        let writes_after_first = store.state().writes();
        assert_eq!(writes_after_first, 2); // update + create

        let second = service.sync_prompt(&def).await;
        assert_eq!(second, SyncOutcome::UpToDate);
        assert_eq!(store.state().writes(), writes_after_first);
    }

    #[tokio::test]
    async fn test_sync_ignores_surrounding_whitespace() {
        let store = Arc::new(MockPromptStore::with_draft("\n  Plan a trip  \n", 1));
        let service = service(store.clone(), "Plan a trip", true);

        assert_eq!(service.sync_prompt(&trip(&service)).await, SyncOutcome::UpToDate);
        assert_eq!(store.state().writes(), 0);
    }

    #[tokio::test]
    async fn test_sync_skips_unconfigured_prompt() {
        let store = Arc::new(MockPromptStore::with_draft("old", 0));
        let service = service(store.clone(), "new", false);

        assert_eq!(service.sync_prompt(&trip(&service)).await, SyncOutcome::Skipped);
        assert_eq!(store.state().get_calls, 0);
    }

    #[tokio::test]
    async fn test_sync_at_ceiling_keeps_ten_versions() {
        let store = Arc::new(MockPromptStore::with_draft("old", 10));
        let service = service(store.clone(), "new", true);

        let outcome = service.sync_prompt(&trip(&service)).await;

        let state = store.state();
        assert_eq!(outcome, SyncOutcome::Updated { version: Some("11".to_string()) });
        assert_eq!(state.deleted, vec!["1".to_string()]);
        assert_eq!(state.versions.len(), MAX_PROMPT_VERSIONS);
        assert_eq!(state.versions.first(), Some(&2));
    }

    #[tokio::test]
    async fn test_enforce_version_limit_below_ceiling_is_noop() {
        let store = Arc::new(MockPromptStore::with_draft("old", 9));
        let service = service(store.clone(), "new", true);

        let limit = service.enforce_version_limit(PROMPT_ID).await.unwrap();

        assert_eq!(limit, VersionLimit::WithinLimit);
        assert!(store.state().deleted.is_empty());
        // 10 entries (draft + 9) over pages of 3
        assert_eq!(store.state().list_calls, 4);
    }

    #[tokio::test]
    async fn test_enforce_version_limit_deletes_lowest_number() {
        let store = Arc::new(MockPromptStore::with_draft("old", 0));
        {
            let mut state = store.state();
            state.versions = vec![9, 10, 11, 12, 13, 14, 15, 16, 17, 18];
        }
        let service = service(store.clone(), "new", true);

        let limit = service.enforce_version_limit(PROMPT_ID).await.unwrap();

        assert_eq!(limit, VersionLimit::Deleted("9".to_string()));
        assert_eq!(store.state().versions.len(), 9);
    }

    #[tokio::test]
    async fn test_sync_skips_version_when_ceiling_has_no_numeric_label() {
        let store = Arc::new(MockPromptStore::with_draft("old", 0));
        store.state().odd_labels = (1..=10).map(|n| format!("v{n}")).collect();
        let service = service(store.clone(), "new", true);

        assert_eq!(
            service.enforce_version_limit(PROMPT_ID).await.unwrap(),
            VersionLimit::Saturated
        );

        let outcome = service.sync_prompt(&trip(&service)).await;

        let state = store.state();
        assert_eq!(outcome, SyncOutcome::Updated { version: None });
        assert_eq!(state.draft_text, "new");
        assert_eq!(state.create_calls, 0);
        assert!(state.deleted.is_empty());
    }

    #[tokio::test]
    async fn test_sync_aborts_when_draft_fetch_fails() {
        let store = Arc::new(MockPromptStore::with_draft("old", 1));
        store.state().fail_get = true;
        let service = service(store.clone(), "new", true);

        let outcome = service.sync_prompt(&trip(&service)).await;

        assert_eq!(outcome, SyncOutcome::Failed(SyncStage::FetchDraft));
        assert_eq!(store.state().writes(), 0);
    }

    #[tokio::test]
    async fn test_sync_stops_before_versioning_when_update_fails() {
        let store = Arc::new(MockPromptStore::with_draft("old", 10));
        store.state().fail_update = true;
        let service = service(store.clone(), "new", true);

        let outcome = service.sync_prompt(&trip(&service)).await;

        let state = store.state();
        assert_eq!(outcome, SyncOutcome::Failed(SyncStage::UpdateDraft));
        assert_eq!(state.list_calls, 0);
        assert_eq!(state.create_calls, 0);
        assert!(state.deleted.is_empty());
    }

    #[tokio::test]
    async fn test_version_created_even_if_limit_check_fails() {
        let store = Arc::new(MockPromptStore::with_draft("old", 3));
        store.state().fail_list = true;
        let service = service(store.clone(), "new", true);

        let outcome = service.sync_prompt(&trip(&service)).await;

        assert_eq!(outcome, SyncOutcome::Updated { version: Some("4".to_string()) });
    }

    #[tokio::test]
    async fn test_version_creation_failure_is_not_fatal() {
        let store = Arc::new(MockPromptStore::with_draft("old", 3));
        store.state().fail_create = true;
        let service = service(store.clone(), "new", true);

        let outcome = service.sync_prompt(&trip(&service)).await;

        assert_eq!(outcome, SyncOutcome::Updated { version: None });
        assert_eq!(store.state().draft_text, "new");
    }

    #[tokio::test]
    async fn test_sync_all_isolates_failures() {
        let store = Arc::new(MockPromptStore::with_draft("old", 0));
        store.state().fail_get = true;

        let mut registry = PromptRegistry::new();
        registry
            .register(PromptDefinition::new("remote", "REMOTE_ID", "a"))
            .unwrap();
        registry
            .register(PromptDefinition::new("local", "LOCAL_ID", "b"))
            .unwrap();
        let mut remote_ids = HashMap::new();
        remote_ids.insert("REMOTE_ID".to_string(), PROMPT_ID.to_string());

        let service = PromptService::new(store, registry, remote_ids, Duration::from_secs(300));
        let summary = service.sync_all_prompts().await;

        assert_eq!(
            summary,
            SyncSummary {
                failed: 1,
                skipped: 1,
                ..SyncSummary::default()
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_cache_hits_within_ttl_and_refreshes_after() {
        let store = Arc::new(MockPromptStore::with_draft("remote text", 1));
        let service = service(store.clone(), "local text", true);

        let first = service.get_prompt_text("trip", None).await.unwrap();
        let second = service.get_prompt_text("trip", None).await.unwrap();
        assert_eq!(first, "remote text");
        assert_eq!(first, second);
        assert_eq!(store.state().get_calls, 1);

        tokio::time::advance(Duration::from_secs(301)).await;

        service.get_prompt_text("trip", None).await.unwrap();
        assert_eq!(store.state().get_calls, 2);
    }

    #[tokio::test]
    async fn test_pinned_version_is_cached_separately() {
        let store = Arc::new(MockPromptStore::with_draft("remote text", 1));
        let service = service(store.clone(), "local text", true);

        service.get_prompt_text("trip", None).await.unwrap();
        service.get_prompt_text("trip", Some("1")).await.unwrap();
        service.get_prompt_text("trip", Some("1")).await.unwrap();

        assert_eq!(store.state().get_calls, 2);
        let cache = service.cache.read().await;
        assert_eq!(cache.get("trip@1").map(|e| e.version.as_str()), Some("1"));
        assert_eq!(cache.get("trip").map(|e| e.version.as_str()), Some(DRAFT_VERSION));
    }

    #[tokio::test]
    async fn test_fetch_failure_falls_back_to_local_text() {
        let store = Arc::new(MockPromptStore::with_draft("remote text", 1));
        store.state().fail_get = true;
        let service = service(store.clone(), "local text", true);

        let text = service.get_prompt_text("trip", None).await.unwrap();

        assert_eq!(text, "local text");
        let cache = service.cache.read().await;
        assert_eq!(cache.get("trip").map(|e| e.version.as_str()), Some(LOCAL_VERSION));
    }

    #[tokio::test]
    async fn test_unconfigured_prompt_serves_local_text_without_remote_call() {
        let store = Arc::new(MockPromptStore::with_draft("remote text", 1));
        let service = service(store.clone(), "local text", false);

        assert_eq!(service.get_prompt_text("trip", None).await.unwrap(), "local text");
        assert_eq!(store.state().get_calls, 0);
    }

    #[tokio::test]
    async fn test_unknown_prompt_is_an_error() {
        let store = Arc::new(MockPromptStore::default());
        let service = service(store, "text", true);

        let err = service.get_prompt_text("nope", None).await.unwrap_err();
        assert!(matches!(err, DomainError::UnknownPrompt(ref name) if name == "nope"));
        assert!(service.render_prompt("nope", &HashMap::new()).await.is_err());
    }

    #[tokio::test]
    async fn test_render_substitutes_only_declared_variables() {
        let store = Arc::new(MockPromptStore::default());
        let service = service(store, "Hi {{user_name}}! Bye {{user_name}}.", false);

        let mut vars = HashMap::new();
        vars.insert("user_name".to_string(), "Ava".to_string());
        vars.insert("other".to_string(), "x".to_string());

        let text = service.render_prompt("trip", &vars).await.unwrap();
        assert_eq!(text, "Hi Ava! Bye Ava.");

        let blank = service.render_prompt("trip", &HashMap::new()).await.unwrap();
        assert_eq!(blank, "Hi ! Bye .");
    }

    #[tokio::test]
    async fn test_render_holiday_planner_changes_only_placeholders() {
        let registry = PromptRegistry::with_builtin().unwrap();
        let template = registry
            .get("holiday_planner_agent_scope")
            .unwrap()
            .template()
            .to_string();
        let service = PromptService::new(
            Arc::new(MockPromptStore::default()),
            registry,
            HashMap::new(),
            Duration::from_secs(300),
        );

        let mut vars = HashMap::new();
        vars.insert("user_name".to_string(), "Ava".to_string());
        let text = service
            .render_prompt("holiday_planner_agent_scope", &vars)
            .await
            .unwrap();

        assert_eq!(text, template.replace("{{user_name}}", "Ava"));
        assert!(!text.contains("{{user_name}}"));
    }
}
