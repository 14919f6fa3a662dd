// Row-based grid placement for generated widgets
use crate::widget::{GridSize, WidgetLayout};

/// Places widgets left to right, wrapping to a new row when the next one
/// would cross the grid's right edge. Placements never overlap.
#[derive(Debug, Clone)]
pub struct GridPlacer {
    columns: u32,
    cursor_x: u32,
    cursor_y: u32,
    row_height: u32,
}

impl GridPlacer {
    pub fn new(columns: u32) -> Self {
        Self::starting_at(columns, 0)
    }

    /// Start placing at row `y`, e.g. below existing dashboard content
    pub fn starting_at(columns: u32, y: u32) -> Self {
        Self {
            columns: columns.max(1),
            cursor_x: 0,
            cursor_y: y,
            row_height: 0,
        }
    }

    pub fn place(&mut self, i: impl Into<String>, size: GridSize) -> WidgetLayout {
        let w = size.w.clamp(1, self.columns);
        let h = size.h.max(1);

        if self.cursor_x + w > self.columns {
            self.cursor_x = 0;
            self.cursor_y += self.row_height;
            self.row_height = 0;
        }

        let layout = WidgetLayout::new(i, self.cursor_x, self.cursor_y, w, h);
        self.cursor_x += w;
        self.row_height = self.row_height.max(h);
        layout
    }
}
