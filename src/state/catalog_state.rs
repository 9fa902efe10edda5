// ============================================================================
// CATALOG STATE - samples, categories and selection, plus its reducer
// ============================================================================
// Store actions never touch fields directly: they emit a CatalogEvent and
// CatalogState::apply is the only place state changes
// ============================================================================

use crate::models::{Category, CategoryId, Curtain, CurtainId};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CatalogState {
    pub curtains: Vec<Curtain>,
    pub categories: Vec<Category>,
    pub current: Option<Curtain>,
    /// Category the sample list was last filtered by; `None` for the full list
    pub active_category: Option<CategoryId>,
    pub error: Option<String>,
    in_flight: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub enum CatalogEvent {
    Started,
    Settled(CatalogOutcome),
    ErrorCleared,
}

/// Result of one finished action
#[derive(Clone, Debug, PartialEq)]
pub enum CatalogOutcome {
    CurtainsLoaded(Vec<Curtain>),
    CurtainLoaded(Curtain),
    CategoriesLoaded(Vec<Category>),
    CategoryCurtainsLoaded {
        category_id: CategoryId,
        curtains: Vec<Curtain>,
    },
    CurtainAdded(Curtain),
    CurtainUpdated(Curtain),
    CurtainDeleted(CurtainId),
    Failed(String),
}

impl CatalogState {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while at least one action is in flight
    pub fn loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn apply(&mut self, event: CatalogEvent) {
        match event {
            CatalogEvent::Started => self.in_flight += 1,
            CatalogEvent::ErrorCleared => self.error = None,
            CatalogEvent::Settled(outcome) => {
                self.in_flight = self.in_flight.saturating_sub(1);
                self.settle(outcome);
            }
        }
    }

    fn settle(&mut self, outcome: CatalogOutcome) {
        match outcome {
            CatalogOutcome::Failed(message) => {
                self.error = Some(message);
                return;
            }
            CatalogOutcome::CurtainsLoaded(curtains) => {
                self.curtains = curtains;
                self.active_category = None;
            }
            CatalogOutcome::CurtainLoaded(curtain) => self.current = Some(curtain),
            CatalogOutcome::CategoriesLoaded(categories) => self.categories = categories,
            CatalogOutcome::CategoryCurtainsLoaded {
                category_id,
                curtains,
            } => {
                self.curtains = curtains;
                self.active_category = Some(category_id);
            }
            CatalogOutcome::CurtainAdded(curtain) => self.curtains.push(curtain),
            CatalogOutcome::CurtainUpdated(curtain) => {
                if let Some(existing) = self.curtains.iter_mut().find(|c| c.id == curtain.id) {
                    *existing = curtain.clone();
                }
                if self.is_current(curtain.id) {
                    self.current = Some(curtain);
                }
            }
            CatalogOutcome::CurtainDeleted(id) => {
                self.curtains.retain(|c| c.id != id);
                if self.is_current(id) {
                    self.current = None;
                }
            }
        }
        self.error = None;
    }

    fn is_current(&self, id: CurtainId) -> bool {
        self.current.as_ref().map(|c| c.id == id).unwrap_or(false)
    }

    pub fn category_name(&self, id: CategoryId) -> Option<&str> {
        self.categories
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.as_str())
    }
}
