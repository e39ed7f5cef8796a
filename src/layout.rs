//! Page geometry shared by the tab column and the calendar grid.
//!
//! All values are PDF points with the origin in the bottom-left corner of the
//! page, so "top" means the larger y value.

use derive_more::Constructor;

use crate::calendar::{COLUMNS, ROWS};
use crate::config::{Config, MONTHS_PER_YEAR};

#[derive(Clone, Copy, Debug, PartialEq, Constructor)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.top()
    }

    /// Corners as `(x1, y1, x2, y2)`, the order PDF annotation rects use.
    pub fn corners(&self) -> (f32, f32, f32, f32) {
        (self.x, self.y, self.right(), self.top())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub tab_x: f32,
    pub tab_width: f32,
    pub tab_height: f32,
    pub year_tabs: usize,
    pub cal_left: f32,
    pub cal_right: f32,
    pub cal_top: f32,
    pub cal_bottom: f32,
    pub title_baseline: f32,
    pub header_top: f32,
    pub grid_top: f32,
    pub notes_top: f32,
    pub row_height: f32,
    pub col_width: f32,
    notes_line_spacing: f32,
}

impl PageGeometry {
    pub const TITLE_OFFSET: f32 = 30.0;
    pub const HEADER_OFFSET: f32 = 50.0;
    pub const HEADER_HEIGHT: f32 = 20.0;
    pub const NOTES_FIRST_LINE: f32 = 35.0;
    pub const NOTES_BOTTOM_PADDING: f32 = 10.0;
    pub const NOTES_LINE_INSET: f32 = 5.0;

    pub fn new(config: &Config) -> Self {
        let page = &config.page;
        let year_tabs = config.years.len();
        let tab_count = year_tabs + MONTHS_PER_YEAR;

        let cal_left = page.margin;
        let cal_right = page.width - page.tab_width - page.margin;
        let cal_top = page.height - page.margin;
        let cal_bottom = page.margin;

        let header_top = cal_top - Self::HEADER_OFFSET;
        let grid_top = header_top - Self::HEADER_HEIGHT;
        let notes_top = cal_bottom + page.notes_height;

        PageGeometry {
            width: page.width,
            height: page.height,
            tab_x: page.width - page.tab_width,
            tab_width: page.tab_width,
            tab_height: page.height / tab_count as f32,
            year_tabs,
            cal_left,
            cal_right,
            cal_top,
            cal_bottom,
            title_baseline: cal_top - Self::TITLE_OFFSET,
            header_top,
            grid_top,
            notes_top,
            row_height: (grid_top - notes_top) / ROWS as f32,
            col_width: (cal_right - cal_left) / COLUMNS as f32,
            notes_line_spacing: page.notes_line_spacing,
        }
    }

    pub fn page_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    pub fn tab_count(&self) -> usize {
        self.year_tabs + MONTHS_PER_YEAR
    }

    /// Tab `index` counted from the top of the page.
    pub fn tab_rect(&self, index: usize) -> Rect {
        Rect::new(
            self.tab_x,
            self.height - (index + 1) as f32 * self.tab_height,
            self.tab_width,
            self.tab_height,
        )
    }

    pub fn year_tab_rect(&self, year_index: usize) -> Rect {
        self.tab_rect(year_index)
    }

    /// Month tabs follow the year tabs; `month` is 1-based.
    pub fn month_tab_rect(&self, month: u32) -> Rect {
        self.tab_rect(self.year_tabs + month as usize - 1)
    }

    pub fn cal_width(&self) -> f32 {
        self.cal_right - self.cal_left
    }

    pub fn header_cell_rect(&self, col: usize) -> Rect {
        Rect::new(
            self.cal_left + col as f32 * self.col_width,
            self.grid_top,
            self.col_width,
            Self::HEADER_HEIGHT,
        )
    }

    pub fn cell_rect(&self, row: usize, col: usize) -> Rect {
        Rect::new(
            self.cal_left + col as f32 * self.col_width,
            self.grid_top - (row + 1) as f32 * self.row_height,
            self.col_width,
            self.row_height,
        )
    }

    pub fn notes_rect(&self) -> Rect {
        Rect::new(
            self.cal_left,
            self.cal_bottom,
            self.cal_width(),
            self.notes_top - self.cal_bottom,
        )
    }

    /// Heights of the ruled note lines, top to bottom.
    pub fn notes_lines(&self) -> Vec<f32> {
        let floor = self.cal_bottom + Self::NOTES_BOTTOM_PADDING;
        let mut lines = Vec::new();
        let mut y = self.notes_top - Self::NOTES_FIRST_LINE;

        while y > floor {
            lines.push(y);
            y -= self.notes_line_spacing;
        }

        lines
    }
}
