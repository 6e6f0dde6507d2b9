pub mod experience;
pub mod mongo_repo;
pub mod project;
