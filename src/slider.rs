use chrono::{Datelike, NaiveDate, Weekday};

/// Weekday carousel shown while no timetable is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DaySlider {
    index: usize,
}

impl DaySlider {
    pub const DAY_COUNT: usize = 5;

    const DAYS: [Weekday; Self::DAY_COUNT] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
    ];

    pub fn new() -> Self {
        Self::default()
    }

    /// Starts on the given date's weekday; weekends start on Monday.
    pub fn starting_on(date: NaiveDate) -> Self {
        let index = date.weekday().num_days_from_monday() as usize;
        if index < Self::DAY_COUNT {
            Self { index }
        } else {
            Self::default()
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn weekday(&self) -> Weekday {
        Self::DAYS[self.index]
    }

    pub fn label(&self) -> &'static str {
        match self.weekday() {
            Weekday::Mon => "Monday",
            Weekday::Tue => "Tuesday",
            Weekday::Wed => "Wednesday",
            Weekday::Thu => "Thursday",
            Weekday::Fri => "Friday",
            Weekday::Sat => "Saturday",
            Weekday::Sun => "Sunday",
        }
    }

    pub fn next(&mut self) -> usize {
        self.index = if self.index == Self::DAY_COUNT - 1 {
            0
        } else {
            self.index + 1
        };
        self.index
    }

    pub fn previous(&mut self) -> usize {
        self.index = if self.index == 0 {
            Self::DAY_COUNT - 1
        } else {
            self.index - 1
        };
        self.index
    }
}
