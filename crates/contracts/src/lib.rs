//! Shared DTOs for the hub REST API (`/api/v2/*`).
//!
//! Everything here is plain data: the frontend builds requests and renders
//! responses from these types, nothing in this crate performs I/O.

pub mod domain;
pub mod enums;
pub mod shared;
