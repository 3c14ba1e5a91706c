use chrono::{Datelike, Days, Months, NaiveDate};

/// Storage format for the birthday field, e.g. `12/25/1990`.
pub const BIRTHDAY_FORMAT: &str = "%m/%d/%Y";

/// Cursor movement inside a month-grid date picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStep {
    PrevDay,
    NextDay,
    PrevWeek,
    NextWeek,
    PrevMonth,
    NextMonth,
    PrevYear,
    NextYear,
}

/// Move `date` by `step`. Month and year steps clamp to the last day of the
/// target month (Jan 31 + 1 month = Feb 28/29). Out-of-range results leave
/// the date unchanged.
pub fn apply_step(date: NaiveDate, step: DateStep) -> NaiveDate {
    let moved = match step {
        DateStep::PrevDay => date.checked_sub_days(Days::new(1)),
        DateStep::NextDay => date.checked_add_days(Days::new(1)),
        DateStep::PrevWeek => date.checked_sub_days(Days::new(7)),
        DateStep::NextWeek => date.checked_add_days(Days::new(7)),
        DateStep::PrevMonth => date.checked_sub_months(Months::new(1)),
        DateStep::NextMonth => date.checked_add_months(Months::new(1)),
        DateStep::PrevYear => date.checked_sub_months(Months::new(12)),
        DateStep::NextYear => date.checked_add_months(Months::new(12)),
    };
    moved.unwrap_or(date)
}

/// Weeks of the month containing `date`, Sunday first. Cells outside the
/// month are `None`.
pub fn month_grid(date: NaiveDate) -> Vec<[Option<NaiveDate>; 7]> {
    let Some(first) = date.with_day(1) else {
        return Vec::new();
    };
    let lead = first.weekday().num_days_from_sunday() as usize;

    let mut weeks = Vec::new();
    let mut week = [None; 7];
    let mut col = lead;
    let mut day = Some(first);
    while let Some(current) = day.filter(|d| d.month() == first.month()) {
        week[col] = Some(current);
        col += 1;
        if col == 7 {
            weeks.push(week);
            week = [None; 7];
            col = 0;
        }
        day = current.succ_opt();
    }
    if col > 0 {
        weeks.push(week);
    }
    weeks
}

pub fn parse_birthday(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), BIRTHDAY_FORMAT).ok()
}

pub fn format_birthday(date: NaiveDate) -> String {
    date.format(BIRTHDAY_FORMAT).to_string()
}

/// Dashboard header label, e.g. `Friday, 06 Nov`.
pub fn header_label(date: NaiveDate) -> String {
    date.format("%A, %d %b").to_string()
}

/// Picker title, e.g. `December 2024`.
pub fn month_title(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}
