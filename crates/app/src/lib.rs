//! # geostore-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `PointRepository`: create, filter, get, update, delete for points
//!   - `PolygonRepository`: the same for polygons
//! - Define **driving/inbound ports** as use-case structs:
//!   - `PointService`: list, get, create, partial update, delete
//!   - `PolygonService`: list, get, create, partial update, delete
//! - Orchestrate domain objects without knowing *how* persistence works
//!
//! ## Dependency rule
//! Depends on `geostore-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
