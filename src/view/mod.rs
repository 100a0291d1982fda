//! Paginated, filterable, searchable views over the contacts store.

mod controller;
mod reconciler;
mod state;

pub use controller::{Transition, ViewController, ViewEvent};
pub use reconciler::{EditForm, EditOutcome, EditReconciler};
pub use state::{LoadStatus, PageItems, PageState, SearchQuery, StatusFilter, ViewMode};
