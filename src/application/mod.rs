// Application layer - Use cases over the indicator repository
pub mod dashboard_service;
pub mod indicator_repository;
#[cfg(test)]
pub mod mock_repository;
pub mod panel_builder;
