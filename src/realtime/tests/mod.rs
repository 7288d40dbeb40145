//! Unit tests for the realtime channel.

mod channel_tests;
