//! Session-oriented API: one spin request in, frames or GIF bytes out.

/// Spin sessions and the one-shot helper.
pub mod spin;
