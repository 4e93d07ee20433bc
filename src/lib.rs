//! Personal medicine tracker: authenticated users record medicines with
//! expiry dates, watch expiring/expired stock on a dashboard, and mark
//! items for donation to partner centers.
//!
//! The interesting logic lives in [`expiry`] (lifecycle classification) and
//! [`inventory`] (filtered/sorted views and dashboard counts); both are
//! pure and take an explicit reference date. The rest is HTTP and storage
//! plumbing around PostgreSQL.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod expiry;
pub mod handlers;
pub mod inventory;
pub mod state;
