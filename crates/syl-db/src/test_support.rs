//! Shared test utilities for syl-db unit tests.
