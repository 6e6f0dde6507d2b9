use actix_web::{get, web, HttpResponse, Responder};
use chrono::Utc;
use humantime::format_duration;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use sysinfo::System;

use crate::{constants::START_TIME, repositories::project::ProjectRepository, AppState};

const CACHE_TTL_SECS: i64 = 5;

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct SystemInfo {
    pub os: String,
    pub kernel: String,
    pub hostname: String,
    pub cpu_count: usize,
    pub memory_total: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct HealthCheckResponse {
    pub success: bool,
    pub message: String,
    pub database: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub uptime: String,
    pub timestamp: String,
    pub start_at: String,
    pub version: String,
    pub memory_usage: String,
    pub system: SystemInfo,
}

/// Last health report and the unix second it was built at.
#[derive(Default)]
pub struct HealthCache {
    last: RwLock<Option<(i64, HealthCheckResponse)>>,
}

impl HealthCache {
    fn fresh(&self, now: i64) -> Option<HealthCheckResponse> {
        self.last
            .read()
            .as_ref()
            .filter(|(checked_at, _)| now - checked_at <= CACHE_TTL_SECS)
            .map(|(_, response)| response.clone())
    }

    fn store(&self, now: i64, response: &HealthCheckResponse) {
        *self.last.write() = Some((now, response.clone()));
    }
}

async fn build_health_response(state: &web::Data<AppState>) -> HealthCheckResponse {
    let now_utc = Utc::now();
    let uptime_duration = now_utc.signed_duration_since(*START_TIME);
    let human_uptime = format_duration(Duration::from_secs(uptime_duration.num_seconds().max(0) as u64));

    let mut sys = System::new_all();
    sys.refresh_all();

    let system_info = SystemInfo {
        os: System::name().unwrap_or_else(|| "Unknown".to_string()),
        kernel: System::kernel_version().unwrap_or_else(|| "Unknown".to_string()),
        hostname: System::host_name().unwrap_or_else(|| "Unknown".to_string()),
        cpu_count: sys.cpus().len(),
        memory_total: format!("{:.2} GB", sys.total_memory() as f64 / 1024.0 / 1024.0 / 1024.0),
    };

    let memory_usage = sysinfo::get_current_pid()
        .ok()
        .and_then(|pid| sys.process(pid))
        .map_or("Unknown".to_string(), |p| {
            format!("{:.2} MB", p.memory() as f64 / 1024.0 / 1024.0)
        });

    let (success, message, database, error) =
        match state.project_handler.project_repo.check_connection().await {
            Ok(()) => (true, "API is healthy", "Connected", None),
            Err(e) => {
                tracing::error!("Health check failed: {}", e);
                (false, "API health check failed", "Disconnected", Some(e.to_string()))
            }
        };

    HealthCheckResponse {
        success,
        message: message.to_string(),
        database: database.to_string(),
        error,
        uptime: human_uptime.to_string(),
        timestamp: now_utc.to_rfc3339(),
        start_at: START_TIME.to_rfc3339(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        memory_usage,
        system: system_info,
    }
}

#[get("/health")]
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let now = Utc::now().timestamp();

    let response = match state.health_cache.fresh(now) {
        Some(cached) => cached,
        None => {
            let response = build_health_response(&state).await;
            state.health_cache.store(now, &response);
            response
        }
    };

    if response.success {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::InternalServerError().json(response)
    }
}
