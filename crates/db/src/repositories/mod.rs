pub mod chat_repo;

pub use chat_repo::ChatRepo;
