//! Value model shared by every chanscope crate.
//!
//! Everything in here is plain data: payload identities, messages, operations,
//! channel items, the docket configuration record and the assembled document.
//! None of these types know how they were discovered.

pub mod models;

// Re-export commonly used types
pub use models::*;
