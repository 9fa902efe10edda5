// ============================================================================
// CATALOG STORE - curtain samples and categories
// ============================================================================
// Every action: Started -> one backend call -> Settled(outcome).
// Reads swallow failures into `error`; writes also hand the error back.
// ============================================================================

use crate::models::{Category, CategoryId, Curtain, CurtainForm, CurtainId};
use crate::services::{ApiClient, ApiError};
use crate::state::{CatalogEvent, CatalogOutcome, CatalogState, ReactiveState};
use crate::stores::SessionStore;

#[derive(Clone)]
pub struct CatalogStore {
    api: ApiClient,
    session: SessionStore,
    state: ReactiveState<CatalogState>,
}

impl CatalogStore {
    pub fn new(api: ApiClient, session: SessionStore) -> Self {
        Self {
            api,
            session,
            state: ReactiveState::new(CatalogState::new()),
        }
    }

    pub fn state(&self) -> &ReactiveState<CatalogState> {
        &self.state
    }

    pub fn subscribe(&self, callback: impl Fn() + 'static) {
        self.state.subscribe(callback);
    }

    pub fn curtains(&self) -> Vec<Curtain> {
        self.state.with(|s| s.curtains.clone())
    }

    pub fn categories(&self) -> Vec<Category> {
        self.state.with(|s| s.categories.clone())
    }

    pub fn current(&self) -> Option<Curtain> {
        self.state.with(|s| s.current.clone())
    }

    pub fn active_category(&self) -> Option<CategoryId> {
        self.state.with(|s| s.active_category)
    }

    pub fn category_name(&self, id: CategoryId) -> Option<String> {
        self.state.with(|s| s.category_name(id).map(str::to_string))
    }

    pub fn loading(&self) -> bool {
        self.state.with(CatalogState::loading)
    }

    pub fn error(&self) -> Option<String> {
        self.state.with(|s| s.error.clone())
    }

    pub fn clear_error(&self) {
        self.state.update(|s| s.apply(CatalogEvent::ErrorCleared));
    }

    fn start(&self) {
        self.state.update(|s| s.apply(CatalogEvent::Started));
    }

    fn settle(&self, outcome: CatalogOutcome) {
        self.state.update(|s| s.apply(CatalogEvent::Settled(outcome)));
    }

    fn fail(&self, action: &str, error: &ApiError) {
        log::error!("❌ {}: {}", action, error);
        self.settle(CatalogOutcome::Failed(format!("{}: {}", action, error)));
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    pub async fn fetch_all(&self) {
        self.start();
        match self.api.get_curtains().await {
            Ok(curtains) => {
                log::info!("📋 Loaded {} samples", curtains.len());
                self.settle(CatalogOutcome::CurtainsLoaded(curtains));
            }
            Err(e) => self.fail("Failed to load samples", &e),
        }
    }

    pub async fn fetch_by_id(&self, id: CurtainId) {
        self.start();
        match self.api.get_curtain(id).await {
            Ok(curtain) => self.settle(CatalogOutcome::CurtainLoaded(curtain)),
            Err(e) => self.fail("Failed to load sample details", &e),
        }
    }

    pub async fn fetch_categories(&self) {
        self.start();
        match self.api.get_categories().await {
            Ok(categories) => {
                log::info!("📋 Loaded {} categories", categories.len());
                self.settle(CatalogOutcome::CategoriesLoaded(categories));
            }
            Err(e) => self.fail("Failed to load categories", &e),
        }
    }

    pub async fn fetch_by_category(&self, category_id: CategoryId) {
        self.start();
        match self.api.get_category_curtains(category_id).await {
            Ok(curtains) => {
                log::info!("📋 Loaded {} samples for category {}", curtains.len(), category_id);
                self.settle(CatalogOutcome::CategoryCurtainsLoaded {
                    category_id,
                    curtains,
                });
            }
            Err(e) => self.fail("Failed to load category samples", &e),
        }
    }

    // ------------------------------------------------------------------
    // Writes
    // ------------------------------------------------------------------

    pub async fn add(&self, form: &CurtainForm) -> Result<Curtain, ApiError> {
        self.start();
        match self.submit_new(form).await {
            Ok(curtain) => {
                log::info!("✅ Sample {} created", curtain.id);
                self.settle(CatalogOutcome::CurtainAdded(curtain.clone()));
                Ok(curtain)
            }
            Err(e) => {
                self.fail("Failed to add sample", &e);
                Err(e)
            }
        }
    }

    pub async fn update(&self, id: CurtainId, form: &CurtainForm) -> Result<Curtain, ApiError> {
        self.start();
        match self.submit_changes(id, form).await {
            Ok(curtain) => {
                log::info!("✅ Sample {} updated", curtain.id);
                self.settle(CatalogOutcome::CurtainUpdated(curtain.clone()));
                Ok(curtain)
            }
            Err(e) => {
                self.fail("Failed to update sample", &e);
                Err(e)
            }
        }
    }

    pub async fn delete(&self, id: CurtainId) -> Result<(), ApiError> {
        self.start();
        match self.submit_delete(id).await {
            Ok(()) => {
                log::info!("🗑️ Sample {} deleted", id);
                self.settle(CatalogOutcome::CurtainDeleted(id));
                Ok(())
            }
            Err(e) => {
                self.fail("Failed to delete sample", &e);
                Err(e)
            }
        }
    }

    async fn submit_new(&self, form: &CurtainForm) -> Result<Curtain, ApiError> {
        form.validate().map_err(ApiError::InvalidForm)?;
        let token = self.bearer()?;
        self.api.create_curtain(&token, form).await
    }

    async fn submit_changes(&self, id: CurtainId, form: &CurtainForm) -> Result<Curtain, ApiError> {
        form.validate().map_err(ApiError::InvalidForm)?;
        let token = self.bearer()?;
        self.api.update_curtain(&token, id, form).await
    }

    async fn submit_delete(&self, id: CurtainId) -> Result<(), ApiError> {
        let token = self.bearer()?;
        self.api.delete_curtain(&token, id).await
    }

    /// Writes without a session fail like any rejected request
    fn bearer(&self) -> Result<String, ApiError> {
        self.session
            .token()
            .ok_or_else(|| ApiError::Unauthorized("not logged in".to_string()))
    }
}
