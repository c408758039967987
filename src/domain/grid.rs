// Subplot grid layout
use super::error::PanelError;

pub const GRID_COLUMNS: usize = 2;

/// 1-based grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCell {
    pub row: usize,
    pub col: usize,
}

impl GridCell {
    /// 1-based row-major index of the cell within a grid of `columns` columns
    pub fn index(&self, columns: usize) -> usize {
        (self.row - 1) * columns + self.col
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubplotGrid {
    rows: usize,
    columns: usize,
    cells: Vec<GridCell>,
}

impl SubplotGrid {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    #[cfg(test)]
    pub fn empty_cells(&self) -> Vec<GridCell> {
        (self.cells.len()..self.rows * self.columns)
            .map(|k| row_major(k, self.columns))
            .collect()
    }
}

fn row_major(k: usize, columns: usize) -> GridCell {
    GridCell {
        row: k / columns + 1,
        col: k % columns + 1,
    }
}

/// Two-column, row-major layout for `count` subplots.
pub fn layout_grid(count: usize) -> Result<SubplotGrid, PanelError> {
    if count == 0 {
        return Err(PanelError::InvalidGroup(
            "cannot lay out an empty group".to_string(),
        ));
    }

    Ok(SubplotGrid {
        rows: count.div_ceil(GRID_COLUMNS),
        columns: GRID_COLUMNS,
        cells: (0..count).map(|k| row_major(k, GRID_COLUMNS)).collect(),
    })
}
