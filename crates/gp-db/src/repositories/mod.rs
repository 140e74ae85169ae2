//! `Executor`-generic query functions.
//!
//! Every function accepts any [`sqlx::Executor`] so callers can run it on
//! the pool directly or inside a transaction.

pub mod comments;
pub mod games;
pub mod ratings;
pub mod sessions;
pub mod students;
pub mod users;
