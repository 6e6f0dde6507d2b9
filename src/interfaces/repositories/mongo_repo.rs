use crate::db::mongo::MongoStore;

pub const PROJECTS_COLLECTION: &str = "projects";
pub const EXPERIENCES_COLLECTION: &str = "experiences";

#[derive(Clone)]
pub struct MongoProjectRepo {
    pub store: MongoStore,
}

#[derive(Clone)]
pub struct MongoExperienceRepo {
    pub store: MongoStore,
}
