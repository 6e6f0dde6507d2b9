use crate::{
    db::mongo::MongoStore,
    repositories::mongo_repo::{MongoExperienceRepo, MongoProjectRepo},
};

#[derive(Clone)]
pub struct SharedRepositories {
    pub project_repo: MongoProjectRepo,
    pub experience_repo: MongoExperienceRepo,
}

impl SharedRepositories {
    pub fn new(store: MongoStore) -> Self {
        let project_repo = MongoProjectRepo::new(store.clone());
        let experience_repo = MongoExperienceRepo::new(store);

        SharedRepositories {
            project_repo,
            experience_repo,
        }
    }
}
