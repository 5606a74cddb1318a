//! # geostore-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **resource handlers** for `/points/` and `/polygons/`: each
//!   HTTP verb maps to one application service call
//! - Read the record identifier from the `id` query parameter, not the path
//! - Map request bodies into domain drafts and patches
//! - Map application results and errors into JSON responses, with the status
//!   codes chosen by the configured [`error::ErrorStatusPolicy`]
//!
//! ## Dependency rule
//! Depends on `geostore-app` (for port traits and services) and `geostore-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
