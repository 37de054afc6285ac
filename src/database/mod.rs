pub mod manager;
pub mod memory;
pub mod models;
pub mod repository;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::MemoryStudyRepository;
pub use models::Study;
pub use repository::{PgStudyRepository, StudyRepository};
