//! Integration tests.

mod common;
mod fetcher_tests;
mod presentation_tests;
mod web_tests;
