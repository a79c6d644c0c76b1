//! Systems run by the aim engine each tick.
//!
//! Systems are free functions over `&World`; they do not own state.

pub mod gather;
pub mod snapshot;
