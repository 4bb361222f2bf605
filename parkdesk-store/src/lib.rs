pub mod app_config;
pub mod memory;
pub mod pass_repo;
pub mod session_file;

pub use app_config::Config;
pub use memory::MemoryStore;
pub use pass_repo::{DocPassRepository, MONTHLY_PASSES};
pub use session_file::FileSessionCache;
