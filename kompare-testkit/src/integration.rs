//! Integration tests for loading and running scenario files.
//!
//! These tests write scenario documents into temp directories and run them
//! through the full load -> compare -> check pipeline.
