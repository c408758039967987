// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod http_response;
pub mod plotly_mapper;
pub mod world_bank_repository;
