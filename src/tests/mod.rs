//! Integration tests for hellod.
//!
//! End-to-end tests that boot the real application on a loopback port and
//! drive it over HTTP.


pub mod support;
