use itertools::Itertools;

use super::canvas::Canvas;
use super::metrics::Font;
use super::{draw_background, PageContext};
use crate::color::Rgb;
use crate::config::{Config, POINTS_PER_INCH};

const TITLE_SIZE: f32 = 48.0;
const CAPTION_SIZE: f32 = 16.0;

const TITLE_FIRST_BASELINE: f32 = 15.0;
const TITLE_LEADING: f32 = 50.0;
const SUBTITLE_OFFSET: f32 = 100.0;
const YEAR_RANGE_OFFSET: f32 = -100.0;

const RULE_LENGTH: f32 = 2.5 * POINTS_PER_INCH;
const RULE_INSET: f32 = 1.5 * POINTS_PER_INCH;
const RULE_WIDTH: f32 = 1.5;

const DOT_RADIUS: f32 = 3.0;
const DOT_GAP: f32 = 30.0;

const FLOURISH_Y: f32 = 1.2 * POINTS_PER_INCH;
const FLOURISH_HALF: f32 = 15.0;
const FLOURISH_WIDTH: f32 = 0.5;
const FLOURISH_SIDE_RADIUS: f32 = 2.0;

/// Spreads `text` out by putting a space between letters and two between
/// words, e.g. `2020 - 2024` becomes `2 0 2 0  -  2 0 2 4`.
pub fn letter_spaced(text: &str) -> String {
    text.split_whitespace()
        .map(|word| word.chars().join(" "))
        .join("  ")
}

pub fn title_lines(config: &Config) -> Vec<String> {
    config.cover.title.clone().unwrap_or_else(|| {
        vec![
            format!("{} YEAR", config.years.len()),
            "CALENDAR".to_owned(),
        ]
    })
}

pub fn year_range(config: &Config) -> String {
    match (config.first_year(), config.last_year()) {
        (Some(first), Some(last)) if first != last => format!("{} - {}", first, last),
        (Some(year), _) => year.to_string(),
        _ => String::new(),
    }
}

fn draw_rule(canvas: &mut Canvas, center_x: f32, y: f32, color: Rgb) {
    canvas.line(
        (center_x - RULE_LENGTH / 2.0, y),
        (center_x + RULE_LENGTH / 2.0, y),
        color,
        RULE_WIDTH,
    );
}

/// Draws the title page: gold rules at top and bottom, the letter-spaced
/// subtitle, the title block flanked by two dots, the year range and a small
/// flourish below the bottom rule.
pub fn draw_cover_page(canvas: &mut Canvas, ctx: &PageContext) {
    let config = ctx.config;
    let theme = &config.theme;
    let (center_x, center_y) = ctx.geometry.page_rect().center();
    let height = ctx.geometry.height;

    draw_background(canvas, ctx);

    draw_rule(canvas, center_x, height - RULE_INSET, theme.accent);

    canvas.text_centered(
        center_x,
        center_y + SUBTITLE_OFFSET,
        Font::Helvetica,
        CAPTION_SIZE,
        theme.accent,
        &letter_spaced(&config.cover.subtitle),
    );

    let lines = title_lines(config);
    let mut widest: f32 = 0.0;
    for (idx, line) in lines.iter().enumerate() {
        widest = widest.max(Font::HelveticaBold.text_width(line, TITLE_SIZE));
        canvas.text_centered(
            center_x,
            center_y + TITLE_FIRST_BASELINE - idx as f32 * TITLE_LEADING,
            Font::HelveticaBold,
            TITLE_SIZE,
            theme.text,
            line,
        );
    }

    if !lines.is_empty() {
        let dot_offset = widest / 2.0 + DOT_GAP;
        let dot_y =
            center_y + TITLE_FIRST_BASELINE - (lines.len() - 1) as f32 * TITLE_LEADING / 2.0;
        canvas.fill_circle(center_x - dot_offset, dot_y, DOT_RADIUS, theme.accent);
        canvas.fill_circle(center_x + dot_offset, dot_y, DOT_RADIUS, theme.accent);
    }

    canvas.text_centered(
        center_x,
        center_y + YEAR_RANGE_OFFSET,
        Font::Helvetica,
        CAPTION_SIZE,
        theme.accent,
        &letter_spaced(&year_range(config)),
    );

    draw_rule(canvas, center_x, RULE_INSET, theme.accent);

    canvas.line(
        (center_x - FLOURISH_HALF, FLOURISH_Y),
        (center_x + FLOURISH_HALF, FLOURISH_Y),
        theme.accent,
        FLOURISH_WIDTH,
    );
    canvas.fill_circle(
        center_x - FLOURISH_HALF,
        FLOURISH_Y,
        FLOURISH_SIDE_RADIUS,
        theme.accent,
    );
    canvas.fill_circle(
        center_x + FLOURISH_HALF,
        FLOURISH_Y,
        FLOURISH_SIDE_RADIUS,
        theme.accent,
    );
    canvas.fill_circle(center_x, FLOURISH_Y, DOT_RADIUS, theme.accent);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::YearSpec;
    use crate::render::PageResources;

    #[test]
    fn spacing_letters_and_words() {
        assert_eq!(letter_spaced("2020 - 2024"), "2 0 2 0  -  2 0 2 4");
        assert_eq!(letter_spaced("MY  PLANNER"), "M Y  P L A N N E R");
        assert_eq!(letter_spaced(""), "");
    }

    #[test]
    fn default_title_counts_years() {
        let config = Config::default();
        assert_eq!(title_lines(&config), vec!["5 YEAR", "CALENDAR"]);
        assert_eq!(year_range(&config), "2020 - 2024");

        let config = config.with_years(vec![YearSpec::new(2031, Rgb::WHITE)]);
        assert_eq!(title_lines(&config), vec!["1 YEAR", "CALENDAR"]);
        assert_eq!(year_range(&config), "2031");
    }

    #[test]
    fn custom_title_is_kept() {
        let mut config = Config::default();
        config.cover.title = Some(vec!["FAMILY".to_owned()]);
        assert_eq!(title_lines(&config), vec!["FAMILY"]);
    }

    #[test]
    fn cover_has_no_links() {
        let config = Config::default();
        let resources = PageResources::new(&config);
        let mut canvas = Canvas::new();

        draw_cover_page(&mut canvas, &resources.context());

        let (content, links) = canvas.finish();
        assert!(links.is_empty());
        assert!(!content.is_empty());
    }
}
