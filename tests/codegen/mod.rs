//! Integration tests for the C header generators

mod header_tests;
