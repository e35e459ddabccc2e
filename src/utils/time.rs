use chrono::{DateTime, NaiveDate, TimeZone};

/// Name of the file a CSV export is written to.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("WakeLog_{}.csv", date.format("%Y-%m-%d"))
}

/// Short date and time used when listing the history.
pub fn format_entry_time<Tz: TimeZone>(moment: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    moment.format("%x %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};

    use super::{export_file_name, format_entry_time};

    #[test]
    fn test_export_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 9).unwrap();
        assert_eq!(export_file_name(date), "WakeLog_2024-01-09.csv");
    }

    #[test]
    fn test_format_entry_time() {
        let moment = Utc.with_ymd_and_hms(2024, 1, 9, 4, 5, 6).unwrap();
        assert_eq!(format_entry_time(&moment), "01/09/24 04:05");
    }
}
