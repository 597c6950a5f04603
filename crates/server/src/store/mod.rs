//! # Persistence Layer
//!
//! One module per entity. Every function is generic over
//! [`sea_orm::ConnectionTrait`] so the same code runs against the pooled
//! connection or inside a transaction; handlers open the transaction when a
//! mutation has to cascade.
//!
//! Lookups return `Option<Model>`; translating absence into a 404 is the
//! handler's job.

pub mod private_todos;
pub mod sub_tasks;
pub mod team_tasks;
pub mod teams;
pub mod users;
