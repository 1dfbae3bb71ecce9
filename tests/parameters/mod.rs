//! Integration tests for the parameter system

// Tests for lookup and registration
mod registry_tests;

// Tests for parameter files and command-line assignments
mod assignment_tests;
