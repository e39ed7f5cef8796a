use chrono::Weekday;
use serde::Deserialize;
use serde_with::DeserializeFromStr;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::color::Rgb;
use crate::error::{Error, ErrorKind, Result};

const CONFIG_PATH_ENV_VAR: &str = "TABCAL_CONFIG_FILE";

pub const POINTS_PER_INCH: f32 = 72.0;

pub const MONTHS_PER_YEAR: usize = 12;

const MIN_YEAR: i32 = 1;
const MAX_YEAR: i32 = 9999;

pub(crate) fn find_configfile_locations() -> Vec<PathBuf> {
    let mut locations = Vec::new();

    if let Ok(path) = env::var(CONFIG_PATH_ENV_VAR) {
        locations.push(PathBuf::from(path));
    }

    if let Some(dir) = dirs::config_dir() {
        locations.push(dir.join("tabcal").join("config.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        locations.push(home.join(".tabcal.toml"));
    }

    locations
}

/// Loads the configuration from `path` if given, otherwise from the first
/// existing default location. Falls back to the built-in defaults when no
/// config file exists at all.
pub fn load_suitable_config(path: Option<&Path>) -> Result<Config> {
    load_config_from(path, &find_configfile_locations())
}

fn load_config_from(path: Option<&Path>, locations: &[PathBuf]) -> Result<Config> {
    let config = if let Some(path) = path {
        log::info!("Loading config from '{}'", path.display());
        Config::from_file(path)?
    } else if let Some(found) = locations.iter().find(|p| p.is_file()) {
        log::info!("Loading config from '{}'", found.display());
        Config::from_file(found)?
    } else {
        log::info!("No config file found, using defaults");
        Config::default()
    };

    config.validate()?;

    Ok(config)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, DeserializeFromStr)]
pub struct WeekStart(pub Weekday);

impl Default for WeekStart {
    fn default() -> Self {
        WeekStart(Weekday::Sun)
    }
}

impl FromStr for WeekStart {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.parse::<Weekday>().map(WeekStart).map_err(|_| {
            Error::new(
                ErrorKind::ConfigParse,
                &format!("'{}' is not a day of the week", s),
            )
        })
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct YearSpec {
    pub year: i32,
    pub color: Rgb,
}

impl YearSpec {
    pub fn new(year: i32, color: Rgb) -> Self {
        YearSpec { year, color }
    }
}

/// Page dimensions and spacing, all in PDF points.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageConfig {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
    pub tab_width: f32,
    pub notes_height: f32,
    pub notes_line_spacing: f32,
    pub dim_factor: f64,
}

impl Default for PageConfig {
    fn default() -> Self {
        PageConfig {
            width: 8.5 * POINTS_PER_INCH,
            height: 11.0 * POINTS_PER_INCH,
            margin: 0.15 * POINTS_PER_INCH,
            tab_width: 0.5 * POINTS_PER_INCH,
            notes_height: 1.8 * POINTS_PER_INCH,
            notes_line_spacing: 0.25 * POINTS_PER_INCH,
            dim_factor: 0.4,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Theme {
    pub background: Rgb,
    pub text: Rgb,
    pub grid: Rgb,
    pub header: Rgb,
    pub notes_line: Rgb,
    pub accent: Rgb,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Rgb::BLACK,
            text: Rgb::WHITE,
            grid: Rgb::new(0x33, 0x33, 0x33),
            header: Rgb::new(0x1a, 0x1a, 0x1a),
            notes_line: Rgb::new(0x2a, 0x2a, 0x2a),
            accent: Rgb::new(0xc9, 0xa9, 0x61),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoverConfig {
    pub title: Option<Vec<String>>,
    pub subtitle: String,
}

impl Default for CoverConfig {
    fn default() -> Self {
        CoverConfig {
            title: None,
            subtitle: "PERSONAL PLANNER".to_owned(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub output: Option<PathBuf>,
    pub week_start: WeekStart,
    pub month_names: Vec<String>,
    pub years: Vec<YearSpec>,
    pub page: PageConfig,
    pub theme: Theme,
    pub cover: CoverConfig,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            output: None,
            week_start: WeekStart::default(),
            month_names: [
                "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
            ]
            .iter()
            .map(|name| name.to_string())
            .collect(),
            years: vec![
                YearSpec::new(2020, Rgb::new(0x8b, 0x45, 0x66)),
                YearSpec::new(2021, Rgb::new(0xa8, 0x76, 0x32)),
                YearSpec::new(2022, Rgb::new(0x8b, 0x8b, 0x3a)),
                YearSpec::new(2023, Rgb::new(0x5a, 0x7a, 0x6a)),
                YearSpec::new(2024, Rgb::new(0x5a, 0x6a, 0x8b)),
            ],
            page: PageConfig::default(),
            theme: Theme::default(),
            cover: CoverConfig::default(),
        }
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path)?;
        Config::from_toml_str(&content).map_err(|e| {
            let msg = format!("{}: {}", path.display(), e.message.as_deref().unwrap_or(""));
            e.with_msg(&msg)
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Config> {
        Ok(toml::from_str(content)?)
    }

    /// Replaces the configured years.
    pub fn with_years<I: IntoIterator<Item = YearSpec>>(mut self, years: I) -> Self {
        self.years = years.into_iter().collect();
        self
    }

    pub fn year_numbers(&self) -> impl Iterator<Item = i32> + '_ {
        self.years.iter().map(|spec| spec.year)
    }

    pub fn year_spec(&self, year: i32) -> Option<&YearSpec> {
        self.years.iter().find(|spec| spec.year == year)
    }

    pub fn first_year(&self) -> Option<i32> {
        self.years.first().map(|spec| spec.year)
    }

    pub fn last_year(&self) -> Option<i32> {
        self.years.last().map(|spec| spec.year)
    }

    /// Name of the month tab for a 1-based month number.
    pub fn month_name(&self, month: u32) -> &str {
        (month as usize)
            .checked_sub(1)
            .and_then(|idx| self.month_names.get(idx))
            .map_or("", String::as_str)
    }

    pub fn page_count(&self) -> usize {
        1 + self.years.len() * MONTHS_PER_YEAR
    }

    pub fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| match (self.first_year(), self.last_year()) {
            (Some(first), Some(last)) if first != last => {
                PathBuf::from(format!("calendar_{}_{}.pdf", first, last))
            }
            (Some(year), _) => PathBuf::from(format!("calendar_{}.pdf", year)),
            _ => PathBuf::from("calendar.pdf"),
        })
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(Error::new(ErrorKind::InvalidConfig, &msg));

        if self.years.is_empty() {
            return invalid("at least one year is required".to_owned());
        }

        if let Some(spec) = self
            .years
            .iter()
            .find(|spec| !(MIN_YEAR..=MAX_YEAR).contains(&spec.year))
        {
            return invalid(format!(
                "year {} is outside of {}..={}",
                spec.year, MIN_YEAR, MAX_YEAR
            ));
        }

        if let Some(pair) = self.years.windows(2).find(|pair| pair[0].year >= pair[1].year) {
            return invalid(format!(
                "years must be unique and ascending, found {} before {}",
                pair[0].year, pair[1].year
            ));
        }

        if self.month_names.len() != MONTHS_PER_YEAR {
            return invalid(format!(
                "expected {} month names, found {}",
                MONTHS_PER_YEAR,
                self.month_names.len()
            ));
        }

        let page = &self.page;
        if !(page.width > 0.0 && page.height > 0.0) {
            return invalid(format!(
                "page size {}x{} must be positive",
                page.width, page.height
            ));
        }

        if page.margin < 0.0 || page.tab_width <= 0.0 {
            return invalid("margin must not be negative and tab width must be positive".to_owned());
        }

        if page.tab_width + 2.0 * page.margin >= page.width {
            return invalid(format!(
                "tab width {} and margin {} leave no room on a page {} wide",
                page.tab_width, page.margin, page.width
            ));
        }

        if page.notes_height <= 0.0 || page.notes_height >= page.height - 2.0 * page.margin {
            return invalid(format!(
                "notes height {} does not fit a page {} high",
                page.notes_height, page.height
            ));
        }

        if page.notes_line_spacing <= 0.0 {
            return invalid("notes line spacing must be positive".to_owned());
        }

        if !(0.0..=1.0).contains(&page.dim_factor) {
            return invalid(format!("dim factor {} is outside of [0, 1]", page.dim_factor));
        }

        Ok(())
    }
}
