//! # geostore-domain
//!
//! Pure domain model for the geostore record API.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions
//! - Define **Points** (named latitude/longitude pairs)
//! - Define **Polygons** (named coordinate lists)
//! - Define **Extra data** (caller-defined attribute maps) and their merge rule
//! - Define the **filter allow-list** used by list queries
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod extra_data;
pub mod filter;
pub mod id;

pub mod point;
pub mod polygon;
