//! Unit tests for the storage module.
