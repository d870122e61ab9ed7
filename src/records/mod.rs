//! Records Module
//!
//! The authoritative user record store and its record types.

mod memory;
mod model;
mod store;

pub use memory::MemoryRecordStore;
pub use model::{NewUser, User, UserChanges, UserId};
pub use store::RecordStore;
