//! # formforge-store
//!
//! Local persistence for formforge: the list of saved forms, one document per
//! form, and pagination over the list. Everything lives in one JSON file read
//! and written with `tokio::fs`.
//!
//! ```no_run
//! use formforge_store::LocalStore;
//!
//! # async fn demo() -> formforge_core::FormForgeResult<()> {
//! let mut store = LocalStore::load("formforge-store.json").await?;
//! let id = store.create("Customer Feedback")?.id.clone();
//! store.duplicate(&id)?;
//! store.save("formforge-store.json").await?;
//! # Ok(())
//! # }
//! ```

pub mod pagination;
pub mod store;

pub use pagination::{Page, PaginationError, Paginator};
pub use store::{FormSummary, LocalStore};
