use crate::dataset::{AircraftRecord, Dataset};
use crate::debounce::{Debouncer, Ticket};
use crate::geometry::{self, default_wing_area};
use crate::search::suggest;
use crate::settings::{Settings, DEFAULT_ANGLE_DEG};
use crate::speed::{self, TakeoffEstimate};
use log::debug;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// State behind one lookup form: the typed query, its suggestions, the
/// selected aircraft and the two numeric inputs.
///
/// Every user event maps to one method. Searches are debounced: `set_query`
/// only schedules, and `tick` applies whatever is due.
#[derive(Debug)]
pub struct Session {
    dataset: Arc<Dataset>,
    query: String,
    override_wing_area: Option<f64>,
    angle_deg: f64,
    suggestions: Vec<Arc<AircraftRecord>>,
    selection: Option<Arc<AircraftRecord>>,
    pending_search: Debouncer<String>,
}

impl Session {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self::with_timing(dataset, crate::debounce::DEFAULT_QUIET_PERIOD, DEFAULT_ANGLE_DEG)
    }

    pub fn from_settings(dataset: Arc<Dataset>, settings: &Settings) -> Self {
        Self::with_timing(dataset, settings.debounce(), settings.default_angle_deg)
    }

    pub fn with_timing(dataset: Arc<Dataset>, quiet_period: Duration, angle_deg: f64) -> Self {
        Self {
            dataset,
            query: String::new(),
            override_wing_area: None,
            angle_deg,
            suggestions: Vec::new(),
            selection: None,
            pending_search: Debouncer::new(quiet_period),
        }
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn override_wing_area(&self) -> Option<f64> {
        self.override_wing_area
    }

    pub fn angle_deg(&self) -> f64 {
        self.angle_deg
    }

    pub fn suggestions(&self) -> &[Arc<AircraftRecord>] {
        &self.suggestions
    }

    pub fn selection(&self) -> Option<&Arc<AircraftRecord>> {
        self.selection.as_ref()
    }

    pub fn has_pending_search(&self) -> bool {
        self.pending_search.is_pending()
    }

    /// Records a keystroke and (re)schedules the search for it.
    pub fn set_query(&mut self, text: &str, now: Instant) -> Ticket {
        self.query = text.to_string();
        self.pending_search.schedule(self.query.clone(), now)
    }

    /// Runs the search whose quiet period has elapsed, if any.
    /// Returns true when the suggestion list was replaced.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.pending_search.poll(now) {
            Some((ticket, query)) => self.run_search(ticket, &query),
            None => false,
        }
    }

    /// Runs a pending search right away.
    pub fn flush_search(&mut self) -> bool {
        match self.pending_search.flush() {
            Some((ticket, query)) => self.run_search(ticket, &query),
            None => false,
        }
    }

    /// Takes the due query without searching, for callers that perform the
    /// lookup elsewhere and report back through `apply_suggestions`.
    pub fn take_due_query(&mut self, now: Instant) -> Option<(Ticket, String)> {
        self.pending_search.poll(now)
    }

    /// Installs results produced for `ticket`. Results for a superseded ticket
    /// are dropped so a slow lookup never overwrites a newer one.
    pub fn apply_suggestions(&mut self, ticket: Ticket, results: Vec<Arc<AircraftRecord>>) -> bool {
        if !self.pending_search.is_current(ticket) {
            debug!("Dropping stale suggestions — ticket={:?}", ticket);
            return false;
        }
        self.suggestions = results;
        true
    }

    fn run_search(&mut self, ticket: Ticket, query: &str) -> bool {
        let results = suggest(query, self.dataset.records());
        self.apply_suggestions(ticket, results)
    }

    /// Picks a suggestion: fills the query with its model name, closes the
    /// list and prefills the wing area from the record.
    pub fn select_suggestion(&mut self, record: Arc<AircraftRecord>) {
        self.query = record.model_name().unwrap_or_default().to_string();
        self.override_wing_area = default_wing_area(&record);
        self.suggestions.clear();
        self.pending_search.cancel();
        debug!(
            "Selected aircraft — model={:?} wing_area={:?}",
            record.model_name(),
            self.override_wing_area
        );
        self.selection = Some(record);
    }

    /// Selects the `index`th current suggestion. Returns false when out of range.
    pub fn select_index(&mut self, index: usize) -> bool {
        match self.suggestions.get(index).cloned() {
            Some(record) => {
                self.select_suggestion(record);
                true
            }
            None => false,
        }
    }

    /// Sets or clears the wing-area override from raw input.
    pub fn set_override_wing_area(&mut self, text: &str) {
        self.override_wing_area = geometry::parse_override(text);
    }

    pub fn set_angle(&mut self, text: &str) {
        self.angle_deg = geometry::parse_angle(text);
    }

    pub fn effective_wing_area(&self) -> Option<f64> {
        geometry::effective_wing_area(self.override_wing_area, self.selection.as_deref())
    }

    /// Value shown in the wing-area box.
    pub fn wing_area_display(&self) -> Option<f64> {
        self.override_wing_area
            .or_else(|| self.effective_wing_area())
    }

    pub fn estimate(&self) -> TakeoffEstimate {
        speed::estimate_takeoff(
            self.effective_wing_area(),
            self.selection.as_deref(),
            self.angle_deg,
        )
    }
}
