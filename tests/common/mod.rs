//! Common test utilities for stainview.
//!
//! Synthetic stain data and image assertions shared by the integration tests.

#![allow(dead_code)]

pub mod image_utils;
pub mod test_data;
