//! Authentication and authorization.
//!
//! The management API uses session-based authentication: users log in with
//! email and password via `/authentication/login`, receive a JWT in a secure
//! HTTP-only cookie, and may alternatively present the same JWT as an
//! `Authorization: Bearer` header for programmatic access. The booking engine
//! never sees a token; it receives the already-verified email.
//!
//! # Modules
//!
//! - [`current_user`]: extractor for the authenticated user in handlers
//! - [`password`]: password hashing and verification using Argon2
//! - [`permissions`]: authorization helpers
//! - [`session`]: JWT session token creation and verification

pub mod current_user;
pub mod password;
pub mod permissions;
pub mod session;
