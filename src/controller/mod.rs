//! Entity list controller
//!
//! One generic controller per record kind. It owns the in-memory listing,
//! answers searches from it, and mediates every mutation: validation first,
//! then the store, then an optimistic update of the local list. The list is
//! never re-fetched after a write and is left untouched when a write fails.

pub mod draft;

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::{debug, info};

use crate::database::RecordGateway;
use crate::models::{Entity, Record};
use crate::utils::errors::{DriveDeskError, Result, StoreError};
use crate::utils::helpers::contains_ignore_case;
use crate::utils::logging::{log_load_fallback, log_mutation_failure, log_record_action};
use crate::validation::Violations;

pub use draft::{Draft, FormMode};

/// Source of "today" for age and date rules
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// The local calendar date
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock pinned to one date
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Result of loading a listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded { count: usize },
    /// The store failed; built-in records are shown instead
    Fallback { count: usize, warning: String },
    /// The store failed and seeding is disabled; the list is unchanged
    Unavailable { warning: String },
}

impl LoadOutcome {
    /// Non-fatal warning to show the user, if any
    pub fn warning(&self) -> Option<&str> {
        match self {
            LoadOutcome::Loaded { .. } => None,
            LoadOutcome::Fallback { warning, .. } | LoadOutcome::Unavailable { warning } => {
                Some(warning)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created { id: String },
    Updated { id: String },
    /// A view-only draft was closed; nothing was written
    Viewed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted { id: String },
    /// The user declined the confirmation
    Cancelled,
}

pub struct EntityListController<E: Entity> {
    gateway: RecordGateway<E>,
    clock: Arc<dyn Clock>,
    seed_on_load_failure: bool,
    records: Vec<Record<E>>,
}

impl<E: Entity> EntityListController<E> {
    pub fn new(gateway: RecordGateway<E>, clock: Arc<dyn Clock>) -> Self {
        Self {
            gateway,
            clock,
            seed_on_load_failure: true,
            records: Vec::new(),
        }
    }

    /// Whether a failed load substitutes the built-in records
    pub fn with_seed_fallback(mut self, enabled: bool) -> Self {
        self.seed_on_load_failure = enabled;
        self
    }

    pub fn gateway(&self) -> &RecordGateway<E> {
        &self.gateway
    }

    /// Read-only snapshot of the current listing
    pub fn records(&self) -> &[Record<E>] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&Record<E>> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Replace the listing with everything the store holds
    pub async fn load(&mut self) -> LoadOutcome {
        match self.gateway.list().await {
            Ok(records) => {
                let count = records.len();
                self.records = records;
                info!(kind = %E::KIND, count = count, "Records loaded");
                LoadOutcome::Loaded { count }
            }
            Err(e) => {
                let warning = format!("Could not load {} records: {}", E::KIND, e);
                if self.seed_on_load_failure {
                    self.records = E::seed();
                    log_load_fallback(E::KIND, &e.to_string(), self.records.len());
                    LoadOutcome::Fallback {
                        count: self.records.len(),
                        warning: format!("{}; showing built-in sample data", warning),
                    }
                } else {
                    log_load_fallback(E::KIND, &e.to_string(), 0);
                    LoadOutcome::Unavailable { warning }
                }
            }
        }
    }

    /// Records whose identifier or searchable fields contain `term`,
    /// ignoring case, in listing order. The term is matched as typed; a
    /// blank term returns the whole listing.
    pub fn search(&self, term: &str) -> Vec<&Record<E>> {
        if term.trim().is_empty() {
            return self.records.iter().collect();
        }
        self.records
            .iter()
            .filter(|record| {
                contains_ignore_case(&record.id, term)
                    || record
                        .fields
                        .search_fields()
                        .into_iter()
                        .any(|field| contains_ignore_case(field, term))
            })
            .collect()
    }

    /// Read one record straight from the store
    pub async fn fetch(&self, id: &str) -> Result<Option<Record<E>>> {
        Ok(self.gateway.get_by_id(id).await?)
    }

    pub fn begin_create(&self) -> Draft<E> {
        Draft::create()
    }

    pub fn begin_edit(&self, id: &str) -> Option<Draft<E>> {
        self.find(id)
            .map(|record| Draft::existing(record.id.clone(), record.fields.clone(), FormMode::Edit))
    }

    pub fn begin_view(&self, id: &str) -> Option<Draft<E>> {
        self.find(id)
            .map(|record| Draft::existing(record.id.clone(), record.fields.clone(), FormMode::View))
    }

    /// Validate the candidate against this kind's rules as of today
    pub fn validate(&self, fields: &E) -> Violations {
        fields.validate(self.clock.today())
    }

    /// Validate and persist a draft.
    ///
    /// Violations abort before the store is called. On a store failure the
    /// listing is left exactly as it was.
    pub async fn submit(&mut self, draft: Draft<E>) -> Result<SubmitOutcome> {
        let (id, mode, fields) = draft.into_parts();
        if mode == FormMode::View {
            return Ok(SubmitOutcome::Viewed);
        }

        let violations = self.validate(&fields);
        if !violations.is_empty() {
            debug!(
                kind = %E::KIND,
                violations = violations.len(),
                "Submission blocked by validation"
            );
            return Err(DriveDeskError::Validation(violations));
        }

        match id {
            Some(id) => {
                self.gateway
                    .update(&id, &fields)
                    .await
                    .map_err(|e| self.mutation_failed("update", Some(&id), e))?;

                match self.records.iter_mut().find(|record| record.id == id) {
                    Some(record) => {
                        record.fields = fields;
                        // The store stamped a new time we have not read back
                        record.updated_at = None;
                    }
                    None => self.records.push(Record::local(id.clone(), fields)),
                }
                log_record_action(E::KIND, "update", &id);
                Ok(SubmitOutcome::Updated { id })
            }
            None => {
                let id = self
                    .gateway
                    .create(&fields)
                    .await
                    .map_err(|e| self.mutation_failed("create", None, e))?;

                self.records.push(Record::local(id.clone(), fields));
                log_record_action(E::KIND, "create", &id);
                Ok(SubmitOutcome::Created { id })
            }
        }
    }

    /// Delete a record after the user confirms.
    ///
    /// `confirm` is shown the record about to be removed; declining makes no
    /// store call.
    pub async fn delete<F>(&mut self, id: &str, confirm: F) -> Result<DeleteOutcome>
    where
        F: FnOnce(&Record<E>) -> bool,
    {
        let record = self.find(id).ok_or_else(|| DriveDeskError::RecordNotFound {
            kind: E::KIND,
            id: id.to_string(),
        })?;

        if !confirm(record) {
            debug!(kind = %E::KIND, record_id = id, "Delete cancelled");
            return Ok(DeleteOutcome::Cancelled);
        }

        self.gateway
            .delete(id)
            .await
            .map_err(|e| self.mutation_failed("delete", Some(id), e))?;

        self.records.retain(|record| record.id != id);
        log_record_action(E::KIND, "delete", id);
        Ok(DeleteOutcome::Deleted { id: id.to_string() })
    }

    /// Number of listed records per status, in the kind's status order
    pub fn status_counts(&self) -> Vec<(&'static str, usize)> {
        E::status_domain()
            .into_iter()
            .map(|status| {
                let count = self
                    .records
                    .iter()
                    .filter(|record| record.fields.status_label() == status)
                    .count();
                (status, count)
            })
            .collect()
    }

    fn mutation_failed(
        &self,
        action: &'static str,
        id: Option<&str>,
        source: StoreError,
    ) -> DriveDeskError {
        log_mutation_failure(E::KIND, action, id, &source.to_string());
        DriveDeskError::MutationFailed {
            kind: E::KIND,
            action,
            source,
        }
    }
}
