//! Write-back of contact edits and reconciliation with open views.

use super::controller::{ViewController, ViewEvent};
use crate::config::ReconcileStrategy;
use crate::error::{ViewError, ViewResult};
use crate::models::{Contact, ContactDraft, ValidationResult};
use crate::repositories::ContactStore;
use crate::validation;
use std::sync::Arc;

/// Result of a confirmed edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome {
    /// The contact as stored
    pub contact: Contact,
    /// Fresh validation of the stored contact
    pub result: ValidationResult,
    /// Whether any open view held the contact
    pub on_page: bool,
}

/// Persists edits and folds them back into the views showing them.
pub struct EditReconciler {
    store: Arc<dyn ContactStore>,
    views: Vec<Arc<ViewController>>,
    strategy: ReconcileStrategy,
}

impl EditReconciler {
    pub fn new(
        store: Arc<dyn ContactStore>,
        view: Arc<ViewController>,
        strategy: ReconcileStrategy,
    ) -> Self {
        Self {
            store,
            views: vec![view],
            strategy,
        }
    }

    /// Also reconcile edits into another view over the same store.
    pub fn with_view(mut self, view: Arc<ViewController>) -> Self {
        self.views.push(view);
        self
    }

    pub fn strategy(&self) -> ReconcileStrategy {
        self.strategy
    }

    /// Write `edited` to the store, then reconcile every view.
    ///
    /// Blank fields are rejected before any write. Validation rule
    /// violations are not: an edit may still leave the contact invalid.
    /// If the write fails no view is touched.
    pub async fn apply(&self, edited: Contact) -> ViewResult<EditOutcome> {
        if self.views.iter().all(|view| view.is_closed()) {
            return Err(ViewError::Closed);
        }

        let draft = ContactDraft::from_contact(&edited);
        if let Some(field) = draft.blank_fields().into_iter().next() {
            return Err(ViewError::Input {
                field: field.to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        let updated = self.store.update_contact(&edited.id, &edited).await?;
        tracing::info!("Contact {} updated", updated.id);

        let on_page = match self.strategy {
            ReconcileStrategy::Patch => self
                .views
                .iter()
                .filter(|view| !view.is_closed())
                .fold(false, |found, view| view.patch(&updated) || found),
            ReconcileStrategy::Reload => {
                let on_page = self.views.iter().any(|view| view.contains(&updated.id));
                for view in self.views.iter().filter(|view| !view.is_closed()) {
                    let page = view.snapshot().current_page;
                    // The write stands even if the refresh fails; the view shows the error.
                    if let Err(e) = view.dispatch(ViewEvent::Load(page)).await {
                        tracing::warn!("{} view reload after edit failed: {}", view.mode(), e);
                    }
                }
                on_page
            }
        };

        let result = validation::validate(&updated);
        Ok(EditOutcome {
            contact: updated,
            result,
            on_page,
        })
    }
}

/// Edit form state: the contact being edited and the user's draft.
///
/// A failed submit keeps the draft so the user can correct and retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditForm {
    original: Contact,
    pub draft: ContactDraft,
    error: Option<String>,
}

impl EditForm {
    /// Open the form pre-filled with `contact`'s values.
    pub fn open(contact: &Contact) -> Self {
        Self {
            original: contact.clone(),
            draft: ContactDraft::from_contact(contact),
            error: None,
        }
    }

    pub fn original(&self) -> &Contact {
        &self.original
    }

    /// Message of the last failed submit, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Validation of the draft as it stands.
    pub fn preview(&self) -> ValidationResult {
        validation::validate(&self.draft.apply_to(&self.original))
    }

    pub async fn submit(&mut self, reconciler: &EditReconciler) -> ViewResult<EditOutcome> {
        let edited = self.draft.apply_to(&self.original);

        match reconciler.apply(edited).await {
            Ok(outcome) => {
                self.error = None;
                self.original = outcome.contact.clone();
                Ok(outcome)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }
}
