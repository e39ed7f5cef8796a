use itertools::iproduct;
use std::collections::BTreeMap;
use std::fmt;

use crate::config::{Config, MONTHS_PER_YEAR};
use crate::error::{Error, ErrorKind, Result};

/// Named anchor of one month page. Tabs on any page link to it by name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Destination {
    year: i32,
    month: u32,
    name: String,
}

impl Destination {
    fn new(year: i32, month: u32) -> Self {
        Destination {
            year,
            month,
            name: format!("page_{}_{:02}", year, month),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// All month destinations of a document, registered up front.
///
/// The registry is only ever built as a whole from a [`Config`], so by the
/// time any page is drawn every `(year, month)` it could link to already has
/// its destination. Lookups never create entries.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DestinationRegistry {
    entries: BTreeMap<(i32, u32), Destination>,
}

impl DestinationRegistry {
    pub fn from_config(config: &Config) -> Self {
        let entries = iproduct!(config.year_numbers(), 1..=MONTHS_PER_YEAR as u32)
            .map(|(year, month)| ((year, month), Destination::new(year, month)))
            .collect();

        DestinationRegistry { entries }
    }

    pub fn get(&self, year: i32, month: u32) -> Result<&Destination> {
        self.entries.get(&(year, month)).ok_or_else(|| {
            Error::new(
                ErrorKind::UnknownDestination,
                &format!("no page registered for {}-{:02}", year, month),
            )
        })
    }

    pub fn contains(&self, year: i32, month: u32) -> bool {
        self.entries.contains_key(&(year, month))
    }

    /// Destinations in document order: years ascending, then months.
    pub fn iter(&self) -> impl Iterator<Item = &Destination> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
