//! # HTTP Middleware
//!
//! Request middleware applied by the router.

pub mod auth;
