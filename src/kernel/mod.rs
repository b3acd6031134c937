//! Headless reconciliation core (state/action/store + diff and compare engines).

pub mod action;
pub mod compare;
pub mod diff;
pub mod services;
pub mod state;
pub mod store;

pub use action::Action;
pub use compare::{compare, CompareCounts, CompareEntry, CompareSnapshot, CompareStatus};
pub use diff::{DiffBlock, DiffKind, DiffSession, SessionMode};
pub use state::{AppState, InputContext, Mode};
pub use store::{DispatchResult, Store};
