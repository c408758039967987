// Domain layer - Indicator groups, aligned tables, subplot grids and figures
pub mod dashboard;
pub mod error;
pub mod figure;
pub mod grid;
pub mod indicator;
pub mod time_series;
