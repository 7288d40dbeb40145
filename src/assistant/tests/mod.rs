//! Unit tests for the data assistant.
