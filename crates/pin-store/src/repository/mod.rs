//! Repository Layer
//!
//! Data access abstractions and implementations.

mod traits;
mod memory;
mod session_store;
mod supabase;

pub use traits::{AuthProvider, Repository, SessionStore};
pub use memory::MemoryBackend;
pub use session_store::MemorySessionStore;
pub use supabase::SupabaseBackend;
