//! Database layer for data persistence and access.
//!
//! This module implements the data access layer using SQLx with PostgreSQL.
//! It follows the Repository pattern to provide clean abstractions over database operations.
//!
//! # Modules
//!
//! - [`handlers`]: Repository implementations for CRUD operations
//! - [`models`]: Database record structures matching table schemas
//! - [`errors`]: Database-specific error types
//!
//! # Repository Pattern
//!
//! The [`handlers`] module provides repository traits and implementations
//! for each database table. Repositories encapsulate all database access
//! for a specific entity type. Every repository wraps a `&mut PgConnection`,
//! so callers decide the transactional scope: pass a plain pool connection
//! for single operations, or a transaction when several repositories must
//! commit together.

pub mod errors;
pub mod handlers;
pub mod models;
