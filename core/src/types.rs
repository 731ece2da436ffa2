//! Shared primitive types used across the case opener.

/// A millisecond timestamp or duration on the caller's clock.
/// The core never reads a real clock; every timestamp is passed in.
pub type Millis = u64;

/// An opaque item label (one study problem).
pub type Item = String;
