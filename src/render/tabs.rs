use super::canvas::Canvas;
use super::metrics::Font;
use super::PageContext;
use crate::color::Rgb;
use crate::config::MONTHS_PER_YEAR;
use crate::destination::Destination;
use crate::error::Result;
use crate::layout::Rect;

const YEAR_LABEL_SIZE: f32 = 11.0;
const MONTH_LABEL_SIZE: f32 = 8.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TabKind {
    Year,
    Month,
}

impl TabKind {
    fn label_size(&self) -> f32 {
        match self {
            TabKind::Year => YEAR_LABEL_SIZE,
            TabKind::Month => MONTH_LABEL_SIZE,
        }
    }

    /// Shift of the rotated label so its glyphs sit centered in the tab.
    fn label_shift(&self) -> f32 {
        match self {
            TabKind::Year => 3.0,
            TabKind::Month => 2.0,
        }
    }
}

/// One clickable entry of the navigation column.
#[derive(Clone, Debug, PartialEq)]
pub struct Tab {
    pub kind: TabKind,
    pub rect: Rect,
    pub fill: Rgb,
    pub label: String,
    pub target: Destination,
}

/// Lays out the tab column of the page showing `(year, month)`: one tab per
/// configured year linking to its January, then one tab per month of `year`.
/// Only the displayed month keeps its full shade, the others are dimmed.
pub fn navigation_tabs(ctx: &PageContext, year: i32, month: u32) -> Result<Vec<Tab>> {
    let config = ctx.config;
    let mut tabs = Vec::with_capacity(ctx.geometry.tab_count());

    for (idx, spec) in config.years.iter().enumerate() {
        tabs.push(Tab {
            kind: TabKind::Year,
            rect: ctx.geometry.year_tab_rect(idx),
            fill: spec.color,
            label: spec.year.to_string(),
            target: ctx.registry.get(spec.year, 1)?.clone(),
        });
    }

    let palette = ctx.palette(year)?;

    for mn in 1..=MONTHS_PER_YEAR as u32 {
        let shade = palette.shade(mn).unwrap_or_else(|| palette.base());
        let fill = if mn == month {
            shade
        } else {
            shade.dimmed(config.page.dim_factor)
        };

        tabs.push(Tab {
            kind: TabKind::Month,
            rect: ctx.geometry.month_tab_rect(mn),
            fill,
            label: config.month_name(mn).to_owned(),
            target: ctx.registry.get(year, mn)?.clone(),
        });
    }

    Ok(tabs)
}

pub fn draw_navigation_tabs(
    canvas: &mut Canvas,
    ctx: &PageContext,
    year: i32,
    month: u32,
) -> Result<()> {
    for tab in navigation_tabs(ctx, year, month)? {
        canvas.fill_rect(tab.rect, tab.fill);

        let (center_x, center_y) = tab.rect.center();
        canvas.text_vertical(
            center_x - tab.kind.label_shift(),
            center_y,
            Font::HelveticaBold,
            tab.kind.label_size(),
            ctx.config.theme.text,
            &tab.label,
        );

        canvas.link(tab.rect, &tab.target);
    }

    Ok(())
}
