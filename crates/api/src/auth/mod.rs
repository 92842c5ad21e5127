//! Credential handling: password digests and token issuance.
//!
//! [`password`] wraps Argon2id hashing and verification. [`jwt`] issues and
//! validates HS256 access tokens and digests refresh tokens for storage.

pub mod jwt;
pub mod password;
