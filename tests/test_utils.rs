#![allow(dead_code)]

use actix_web::{middleware::NormalizePath, web, App, HttpServer};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use parking_lot::Mutex;
use portfolio_api::{
    client::PortfolioClient,
    entities::{
        experience::{Experience, ExperienceInsert, ExperiencePatch},
        project::{Project, ProjectInsert, ProjectPatch},
    },
    errors::AppError,
    repositories::{experience::ExperienceRepository, project::ProjectRepository},
    routes::configure_routes,
    settings::AppConfig,
    web::cors::build_cors,
    AppState,
};
use reqwest::Client;
use std::{
    net::TcpListener,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

/// Collections kept in memory, newest record first.
#[derive(Default)]
pub struct InMemoryStore {
    projects: Mutex<Vec<Project>>,
    experiences: Mutex<Vec<Experience>>,
    offline: AtomicBool,
    writes: AtomicUsize,
}

impl InMemoryStore {
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of successful inserts, updates and deletes.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn reachable(&self) -> Result<(), AppError> {
        if self.offline.load(Ordering::SeqCst) {
            Err(AppError::store("connection refused"))
        } else {
            Ok(())
        }
    }

    fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ProjectRepository for InMemoryStore {
    async fn check_connection(&self) -> Result<(), AppError> {
        self.reachable()
    }

    async fn list_projects(&self) -> Result<Vec<Project>, AppError> {
        self.reachable()?;
        Ok(self.projects.lock().clone())
    }

    async fn create_project(&self, project: &ProjectInsert) -> Result<ObjectId, AppError> {
        self.reachable()?;
        let id = ObjectId::new();
        self.projects.lock().insert(0, project.clone().into_project(id.to_hex()));
        self.record_write();
        Ok(id)
    }

    async fn update_project(
        &self,
        id: &ObjectId,
        patch: &ProjectPatch,
        updated_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        self.reachable()?;
        let mut projects = self.projects.lock();
        let project = projects
            .iter_mut()
            .find(|p| p.id == id.to_hex())
            .ok_or_else(|| AppError::NotFound("Project not found".into()))?;
        patch.apply_to(project, updated_at);
        self.record_write();
        Ok(())
    }

    async fn delete_project(&self, id: &ObjectId) -> Result<(), AppError> {
        self.reachable()?;
        let mut projects = self.projects.lock();
        let before = projects.len();
        projects.retain(|p| p.id != id.to_hex());
        if projects.len() == before {
            return Err(AppError::NotFound("Project not found".into()));
        }
        self.record_write();
        Ok(())
    }
}

#[async_trait]
impl ExperienceRepository for InMemoryStore {
    async fn check_connection(&self) -> Result<(), AppError> {
        self.reachable()
    }

    async fn list_experiences(&self) -> Result<Vec<Experience>, AppError> {
        self.reachable()?;
        Ok(self.experiences.lock().clone())
    }

    async fn create_experience(&self, experience: &ExperienceInsert) -> Result<ObjectId, AppError> {
        self.reachable()?;
        let id = ObjectId::new();
        self.experiences
            .lock()
            .insert(0, experience.clone().into_experience(id.to_hex()));
        self.record_write();
        Ok(id)
    }

    async fn update_experience(
        &self,
        id: &ObjectId,
        patch: &ExperiencePatch,
        updated_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        self.reachable()?;
        let mut experiences = self.experiences.lock();
        let experience = experiences
            .iter_mut()
            .find(|e| e.id == id.to_hex())
            .ok_or_else(|| AppError::NotFound("Experience not found".into()))?;
        patch.apply_to(experience, updated_at);
        self.record_write();
        Ok(())
    }

    async fn delete_experience(&self, id: &ObjectId) -> Result<(), AppError> {
        self.reachable()?;
        let mut experiences = self.experiences.lock();
        let before = experiences.len();
        experiences.retain(|e| e.id != id.to_hex());
        if experiences.len() == before {
            return Err(AppError::NotFound("Experience not found".into()));
        }
        self.record_write();
        Ok(())
    }
}

pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub store: Arc<InMemoryStore>,
    pub config: AppConfig,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let config = AppConfig::for_testing();
        let store = Arc::new(InMemoryStore::default());

        let state = web::Data::new(AppState::from_repositories(store.clone(), store.clone()));

        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let cors_origins = config.cors_origins();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(state.clone())
                .wrap(build_cors(&cors_origins))
                .wrap(NormalizePath::trim())
                .configure(configure_routes)
        })
        .listen(listener)
        .expect("Failed to bind server")
        .workers(config.worker_count)
        .run();

        actix_rt::spawn(server);

        let client = Client::new();
        while client.get(&address).send().await.is_err() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        Self {
            address,
            client,
            store,
            config,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub fn api_client(&self) -> PortfolioClient {
        PortfolioClient::new(&self.address).expect("Failed to build API client")
    }

    pub async fn post_json(&self, path: &str, body: &serde_json::Value) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send POST")
    }

    pub async fn put_json(&self, path: &str, body: &serde_json::Value) -> reqwest::Response {
        self.client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send PUT")
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET")
    }

    pub async fn delete(&self, path: &str) -> reqwest::Response {
        self.client
            .delete(self.url(path))
            .send()
            .await
            .expect("Failed to send DELETE")
    }
}
