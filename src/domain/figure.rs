// Figure description handed to the chart renderer
use super::grid::{GridCell, SubplotGrid};

pub const DEFAULT_ROW_HEIGHT: u32 = 300;

/// One line+marker series placed in a grid cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    pub name: String,
    pub label: String,
    pub x: Vec<String>,
    pub y: Vec<Option<f64>>,
    pub cell: GridCell,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub grid: SubplotGrid,
    pub traces: Vec<Trace>,
    pub height: u32,
    pub show_legend: bool,
}

impl Figure {
    pub fn new(grid: SubplotGrid, traces: Vec<Trace>, row_height: u32) -> Self {
        let height = row_height * grid.rows() as u32;
        Self {
            grid,
            traces,
            height,
            show_legend: false,
        }
    }

    /// Subplot titles in trace order
    pub fn subplot_titles(&self) -> Vec<&str> {
        self.traces.iter().map(|t| t.label.as_str()).collect()
    }
}
