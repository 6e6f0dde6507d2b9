pub mod experiences;
pub mod projects;
