//! Common test utilities for delivery-preview.
//!
//! Fakes for the two collaborators, catalog fixtures and assertion helpers.

#![allow(dead_code)]

pub mod assertions;
pub mod fakes;
pub mod http_client;
pub mod test_data;
