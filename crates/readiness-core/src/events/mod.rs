//! Reconciliation lifecycle events.
//! Handlers observe cycles without being able to influence them.

pub mod dispatcher;
pub mod handler;
pub mod types;

pub use dispatcher::EventDispatcher;
pub use handler::ReconcileEventHandler;
pub use types::*;
