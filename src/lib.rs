pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use crate::services::{
    candidate_service::CandidateService, report_service::ReportService,
    store::PgCandidateStore, user_service::UserService,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub candidate_service: CandidateService,
    pub user_service: UserService,
    pub report_service: ReportService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let config = crate::config::get_config();

        let candidate_service = CandidateService::new(pool.clone());
        let user_service = UserService::new(pool.clone());
        let report_service = ReportService::new(
            Arc::new(PgCandidateStore::new(pool.clone())),
            config.admin_bucket_user_id,
            Duration::from_secs(config.report_timeout_secs),
        );

        Self {
            pool,
            candidate_service,
            user_service,
            report_service,
        }
    }
}
