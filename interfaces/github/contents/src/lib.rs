//! Minimal client for the GitHub REST contents API.
//!
//! Only directory listings are supported; file bodies are never fetched.

pub mod index;
