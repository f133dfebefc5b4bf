pub mod candidate_dto;
pub mod dashboard_dto;
