//! # Cardpack Repository
//!
//! Storage contracts consumed by the draw flow, with two adapter families:
//!
//! ```text
//! Service
//!   ↓  Arc<dyn PackRepository | CardRepository | DrawLogRepository>
//! memory::*   (tokio RwLock maps, seeded at startup)
//! mysql::*    (SQLx over a shared DatabasePool)
//! ```

pub mod memory;
pub mod mysql;
pub mod pool;
pub mod traits;

pub use memory::*;
pub use mysql::*;
pub use pool::*;
pub use traits::*;
