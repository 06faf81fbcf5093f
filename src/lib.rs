//! # RentMarket Read Model
//!
//! Read-side join/aggregation library for the RentMarket rental
//! marketplace. It fetches `properties`, `leases`, `payments`,
//! `viewingRequests`, `rentalApplications`, and `users` collections from a
//! document store and composes them into denormalized dashboard rows and
//! aggregates. The library only reads; mutations are performed by external
//! code directly against the store and show up on the next read.

pub mod accessor;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod models;
pub mod normalize;
pub mod requests;
pub mod resolver;
pub mod seeds;
pub mod store;
