use chrono::Month;

use super::canvas::Canvas;
use super::metrics::Font;
use super::PageContext;
use crate::calendar::{self, MonthGrid};
use crate::error::{Error, ErrorKind, Result};
use crate::layout::{PageGeometry, Rect};

const TITLE_SIZE: f32 = 18.0;
const WEEKDAY_SIZE: f32 = 10.0;
const DAY_SIZE: f32 = 12.0;
const NOTES_LABEL_SIZE: f32 = 10.0;

const WEEKDAY_BASELINE: f32 = 14.0;
const DAY_INSET_X: f32 = 5.0;
const DAY_INSET_Y: f32 = 18.0;
const NOTES_LABEL_INSET_X: f32 = 10.0;
const NOTES_LABEL_INSET_Y: f32 = 20.0;

const CELL_BORDER: f32 = 0.5;
const NOTES_BORDER: f32 = 1.0;
const NOTES_RULE: f32 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DayCell {
    pub rect: Rect,
    pub day: Option<u32>,
}

fn month_of(number: u32) -> Result<Month> {
    calendar::month_from_number(number).ok_or_else(|| {
        Error::new(
            ErrorKind::InvalidConfig,
            &format!("{} is not a month", number),
        )
    })
}

/// Places the 6×7 grid of `(year, month)` on the page, row by row.
pub fn day_cells(ctx: &PageContext, year: i32, month: u32) -> Result<Vec<DayCell>> {
    let grid = MonthGrid::new(year, month_of(month)?, ctx.config.week_start.0)?;

    Ok(grid
        .weeks()
        .enumerate()
        .flat_map(|(row, week)| {
            week.iter().enumerate().map(move |(col, &day)| DayCell {
                rect: ctx.geometry.cell_rect(row, col),
                day,
            })
        })
        .collect())
}

pub fn month_title(month: Month, year: i32) -> String {
    format!("{} {}", month.name().to_uppercase(), year)
}

pub fn draw_calendar_grid(canvas: &mut Canvas, ctx: &PageContext, year: i32, month: u32) -> Result<()> {
    let geometry = ctx.geometry;
    let theme = &ctx.config.theme;

    canvas.text_centered(
        geometry.cal_left + geometry.cal_width() / 2.0,
        geometry.title_baseline,
        Font::HelveticaBold,
        TITLE_SIZE,
        theme.text,
        &month_title(month_of(month)?, year),
    );

    for (col, label) in calendar::weekday_labels(ctx.config.week_start.0)
        .iter()
        .enumerate()
    {
        let rect = geometry.header_cell_rect(col);
        canvas.fill_rect(rect, theme.header);
        canvas.stroke_rect(rect, theme.grid, CELL_BORDER);
        canvas.text_centered(
            rect.center().0,
            geometry.header_top - WEEKDAY_BASELINE,
            Font::HelveticaBold,
            WEEKDAY_SIZE,
            theme.text,
            label,
        );
    }

    for cell in day_cells(ctx, year, month)? {
        canvas.stroke_rect(cell.rect, theme.grid, CELL_BORDER);

        if let Some(day) = cell.day {
            canvas.text(
                cell.rect.x + DAY_INSET_X,
                cell.rect.top() - DAY_INSET_Y,
                Font::Helvetica,
                DAY_SIZE,
                theme.text,
                &day.to_string(),
            );
        }
    }

    draw_notes_section(canvas, ctx);

    Ok(())
}

/// Bordered box below the grid with a label and ruled writing lines.
pub fn draw_notes_section(canvas: &mut Canvas, ctx: &PageContext) {
    let geometry = ctx.geometry;
    let theme = &ctx.config.theme;
    let rect = geometry.notes_rect();

    canvas.stroke_rect(rect, theme.grid, NOTES_BORDER);
    canvas.text(
        rect.x + NOTES_LABEL_INSET_X,
        rect.top() - NOTES_LABEL_INSET_Y,
        Font::HelveticaBold,
        NOTES_LABEL_SIZE,
        theme.text,
        "NOTES",
    );

    for y in geometry.notes_lines() {
        canvas.line(
            (rect.x + PageGeometry::NOTES_LINE_INSET, y),
            (rect.right() - PageGeometry::NOTES_LINE_INSET, y),
            theme.notes_line,
            NOTES_RULE,
        );
    }
}
