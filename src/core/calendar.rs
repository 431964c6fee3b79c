//! Day arithmetic for activity tracking.

use chrono::{Datelike, Days, Local, NaiveDate, Weekday};

/// Current calendar day in local time.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// The seven days, Monday first, of the week containing `date`.
pub fn week_of(date: NaiveDate) -> [NaiveDate; 7] {
    let monday = date.week(Weekday::Mon).first_day();
    std::array::from_fn(|offset| monday + Days::new(offset as u64))
}

/// Three-letter weekday label for `date`.
pub fn day_label(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}
