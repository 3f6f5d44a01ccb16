//! Service layer for the volunteer queue.
//! - `volunteer` holds the record types and the selection rule.
//! - `storage` abstracts where the document lives.
//! - `queue` runs the load-mutate-save cycle under one lock.

pub mod errors;
pub mod messages;
pub mod queue;
pub mod storage;
pub mod volunteer;
