//! Catalog loading for the academic catalog engine.
//!
//! # Overview
//!
//! A [`HierarchyStore`] holds the nested exam catalog and the flat reference
//! lists (sources, modalities, levels, specialties, regions) for one screen
//! session. [`HierarchyStore::load_all`] fans out one request per list
//! through a [`CatalogApi`] and tolerates partial failure: a list that cannot
//! be fetched is logged and left empty while the others still load.
//!
//! [`SupersedingRequest`] guards debounced searches so that a stale response
//! never replaces a newer one.
//!
//! # Example
//!
//! ```no_run
//! use acad_store::{HierarchyStore, HttpCatalogApi, StoreConfig};
//!
//! async fn load() -> acad_store::Result<()> {
//!     let api = HttpCatalogApi::new(StoreConfig::new("https://api.example.edu/v1"))?;
//!     let (store, report) = HierarchyStore::load_all(&api).await;
//!     for failure in &report.failures {
//!         eprintln!("{} unavailable: {}", failure.list, failure.message);
//!     }
//!     println!("{} levels", store.levels().len());
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

pub mod api;
pub mod config;
pub mod error;
pub mod request;
pub mod store;

pub use api::{CatalogApi, HttpCatalogApi};
pub use config::{Endpoints, StoreConfig};
pub use error::{Result, StoreError};
pub use request::{PendingRequest, SupersedingRequest};
pub use store::{CatalogList, HierarchyStore, ListFailure, LoadReport};
