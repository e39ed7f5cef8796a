use chrono::naive::NaiveDate;
use chrono::{Datelike, Month, Weekday};
use num_traits::FromPrimitive;
use std::fmt;

use crate::error::{Error, ErrorKind, Result};

pub const COLUMNS: usize = 7;
pub const ROWS: usize = 6;
pub const CELLS: usize = COLUMNS * ROWS;

const WEEKDAY_LABELS: [&str; 7] = ["MON", "TUE", "WED", "THU", "FRI", "SAT", "SUN"];

pub fn is_leap_year(year: i32) -> bool {
    NaiveDate::from_yo_opt(year, 366).is_some()
}

/// Number of days in `month`, or 0 if the month lies outside of the
/// supported date range.
pub fn days_of_month(month: Month, year: i32) -> u32 {
    let number = month.number_from_month();
    let next = if number == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, number + 1, 1)
    };

    match (next, NaiveDate::from_ymd_opt(year, number, 1)) {
        (Some(next), Some(first)) => next.signed_duration_since(first).num_days() as u32,
        _ => 0,
    }
}

/// Number of columns the 1st of `month` is shifted right when weeks begin on
/// `week_start`.
pub fn first_weekday_offset(year: i32, month: Month, week_start: Weekday) -> Result<usize> {
    let first = NaiveDate::from_ymd_opt(year, month.number_from_month(), 1).ok_or_else(|| {
        Error::new(
            ErrorKind::InvalidConfig,
            &format!("{} {} is out of the supported date range", month.name(), year),
        )
    })?;

    Ok(weekday_distance(week_start, first.weekday()))
}

fn weekday_distance(from: Weekday, to: Weekday) -> usize {
    ((to.num_days_from_monday() + 7 - from.num_days_from_monday()) % 7) as usize
}

/// Three-letter weekday labels in display order.
pub fn weekday_labels(week_start: Weekday) -> [&'static str; COLUMNS] {
    let mut labels = [""; COLUMNS];
    let mut day = week_start;

    for label in labels.iter_mut() {
        *label = WEEKDAY_LABELS[day.num_days_from_monday() as usize];
        day = day.succ();
    }

    labels
}

pub fn month_from_number(number: u32) -> Option<Month> {
    Month::from_u32(number)
}

/// A month laid out as six weeks of seven days. Cells before the 1st and
/// after the last day of the month are empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonthGrid {
    year: i32,
    month: Month,
    cells: [Option<u32>; CELLS],
}

impl MonthGrid {
    pub fn new(year: i32, month: Month, week_start: Weekday) -> Result<Self> {
        let offset = first_weekday_offset(year, month, week_start)?;
        let mut cells = [None; CELLS];

        for (day, cell) in (1..=days_of_month(month, year)).zip(cells.iter_mut().skip(offset)) {
            *cell = Some(day);
        }

        Ok(MonthGrid { year, month, cells })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> Month {
        self.month
    }

    pub fn cells(&self) -> &[Option<u32>] {
        &self.cells
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<u32> {
        if row < ROWS && col < COLUMNS {
            self.cells[row * COLUMNS + col]
        } else {
            None
        }
    }

    pub fn weeks(&self) -> impl Iterator<Item = &[Option<u32>]> {
        self.cells.chunks(COLUMNS)
    }

    pub fn day_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}

impl fmt::Display for MonthGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", self.month.name(), self.year)?;
        for week in self.weeks() {
            for cell in week {
                match cell {
                    Some(day) => write!(f, "{:>3}", day)?,
                    None => write!(f, "   ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leap_years() {
        assert!(is_leap_year(2020));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2021));
        assert_eq!(days_of_month(Month::February, 2020), 29);
        assert_eq!(days_of_month(Month::February, 2023), 28);
        assert_eq!(days_of_month(Month::April, 2023), 30);
        assert_eq!(days_of_month(Month::December, 2023), 31);
        assert_eq!(days_of_month(Month::December, 9999), 31);
        assert_eq!(days_of_month(Month::January, 300_000), 0);
    }

    #[test]
    fn every_grid_has_42_cells_and_all_days() {
        for year in 2019..=2025 {
            for number in 1..=12 {
                let month = month_from_number(number).unwrap();
                for week_start in [Weekday::Sun, Weekday::Mon, Weekday::Wed] {
                    let grid = MonthGrid::new(year, month, week_start).unwrap();
                    assert_eq!(grid.cells().len(), 42);
                    assert_eq!(grid.day_count() as u32, days_of_month(month, year));
                }
            }
        }
    }

    #[test]
    fn first_day_lands_under_its_weekday() {
        // 2020-01-01 was a Wednesday
        let grid = MonthGrid::new(2020, Month::January, Weekday::Sun).unwrap();
        assert_eq!(grid.cell(0, 3), Some(1));
        assert_eq!(grid.cell(0, 2), None);
        assert_eq!(grid.cell(4, 5), Some(31));

        let grid = MonthGrid::new(2020, Month::January, Weekday::Mon).unwrap();
        assert_eq!(grid.cell(0, 2), Some(1));
    }

    #[test]
    fn short_months_leave_trailing_rows_empty() {
        // February 2015 starts on a Sunday and fills exactly four weeks
        let grid = MonthGrid::new(2015, Month::February, Weekday::Sun).unwrap();
        assert_eq!(grid.cell(0, 0), Some(1));
        assert_eq!(grid.cell(3, 6), Some(28));
        assert!(grid.weeks().skip(4).all(|w| w.iter().all(Option::is_none)));
    }

    #[test]
    fn long_months_use_the_sixth_row() {
        // May 2020 starts on a Friday
        let grid = MonthGrid::new(2020, Month::May, Weekday::Sun).unwrap();
        assert_eq!(grid.cell(5, 0), Some(31));
    }

    #[test]
    fn labels_follow_week_start() {
        assert_eq!(
            weekday_labels(Weekday::Sun),
            ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"]
        );
        assert_eq!(weekday_labels(Weekday::Mon)[6], "SUN");
    }
}
