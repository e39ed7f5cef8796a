pub mod canvas;
pub mod cover;
pub mod grid;
pub mod metrics;
pub mod tabs;

pub use canvas::{Canvas, Link};
pub use metrics::Font;
pub use tabs::{Tab, TabKind};

use std::collections::BTreeMap;

use crate::color::Palette;
use crate::config::{Config, MONTHS_PER_YEAR};
use crate::destination::DestinationRegistry;
use crate::error::{Error, ErrorKind, Result};
use crate::layout::PageGeometry;

/// Everything derived from the configuration before the first page is drawn.
#[derive(Clone, Debug)]
pub struct PageResources<'a> {
    pub config: &'a Config,
    pub geometry: PageGeometry,
    pub registry: DestinationRegistry,
    pub palettes: BTreeMap<i32, Palette>,
}

impl<'a> PageResources<'a> {
    pub fn new(config: &'a Config) -> Self {
        let palettes = config
            .years
            .iter()
            .map(|spec| (spec.year, Palette::new(spec.color, MONTHS_PER_YEAR)))
            .collect();

        PageResources {
            config,
            geometry: PageGeometry::new(config),
            registry: DestinationRegistry::from_config(config),
            palettes,
        }
    }

    pub fn context(&self) -> PageContext<'_> {
        PageContext {
            config: self.config,
            geometry: &self.geometry,
            registry: &self.registry,
            palettes: &self.palettes,
        }
    }
}

/// Read-only view handed to the page renderers.
#[derive(Clone, Copy)]
pub struct PageContext<'a> {
    pub config: &'a Config,
    pub geometry: &'a PageGeometry,
    pub registry: &'a DestinationRegistry,
    pub palettes: &'a BTreeMap<i32, Palette>,
}

impl<'a> PageContext<'a> {
    pub fn palette(&self, year: i32) -> Result<&'a Palette> {
        self.palettes.get(&year).ok_or_else(|| {
            Error::new(
                ErrorKind::InvalidConfig,
                &format!("no color configured for year {}", year),
            )
        })
    }
}

/// Paints the whole page in the background color.
pub fn draw_background(canvas: &mut Canvas, ctx: &PageContext) {
    canvas.fill_rect(ctx.geometry.page_rect(), ctx.config.theme.background);
}

/// Draws a complete month page: background, tab column and calendar grid.
pub fn draw_month_page(canvas: &mut Canvas, ctx: &PageContext, year: i32, month: u32) -> Result<()> {
    draw_background(canvas, ctx);
    tabs::draw_navigation_tabs(canvas, ctx, year, month)?;
    grid::draw_calendar_grid(canvas, ctx, year, month)?;

    Ok(())
}
