pub mod candidate_service;
pub mod export_service;
pub mod report_service;
pub mod store;
pub mod user_service;
