// src/constants.rs
//! Domain constants for the built-in flags and the demo harness.
//!
//! Each constant is named for the concept it stands for. The built-in flag
//! names are what users see when a context is rendered, so they are kept
//! short and lowercase.

// ---------------------------------------------------------------------------
// Built-in flags
// ---------------------------------------------------------------------------

/// Name of the negative flag that makes `maybe` skip the remaining stages.
pub const BAD_FLAG_NAME: &str = "bad";

/// Name of the positive flag marking the preferred branch of `either`.
pub const RIGHT_FLAG_NAME: &str = "right";

/// Name of the negative flag marking the fallback branch of `either`.
pub const LEFT_FLAG_NAME: &str = "left";

/// Name of the flag attached alongside deferred actions.
pub const FUTURE_FLAG_NAME: &str = "future";

/// How the empty flag sum renders.
pub const NOTHING_REPR: &str = "nothing";

// ---------------------------------------------------------------------------
// Demo harness
// ---------------------------------------------------------------------------

/// Environment variable that supplies a log file path for the demo binary.
pub const LOG_FILE_ENV: &str = "CONTEXTUAL_FLOW_LOG";

/// Default input value for the demo scenarios.
pub const DEMO_DEFAULT_INPUT: i64 = 4;
