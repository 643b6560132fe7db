//! Internal test modules - whitebox tests with crate access
//!
//! Harness-driven scenarios that go through `TuiApp` input handling and
//! rendering with a recording audio backend.
