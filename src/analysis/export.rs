use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Local, TimeZone};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use tracing::info;

use crate::{
    error::Result,
    storage::entities::{Entry, Reason},
    utils::time::export_file_name,
};

const HEADER: [&str; 3] = ["Date", "Time", "Reasons"];

/// Renders the history as CSV, oldest entry first. Every value is quoted, dates and times are
/// shown in `tz`.
///
/// `entries` are expected in history order (most recent first).
pub fn export_csv_in<Tz: TimeZone>(entries: &[Entry], reasons: &[Reason], tz: &Tz) -> Result<String>
where
    Tz::Offset: std::fmt::Display,
{
    let mut buffer = Vec::new();

    let mut header = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(&mut buffer);
    header.write_record(HEADER)?;
    header.flush()?;
    drop(header);

    let mut rows = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(&mut buffer);
    for entry in entries.iter().rev() {
        let local = entry.timestamp.with_timezone(tz);
        rows.write_record([
            local.format("%Y-%m-%d").to_string(),
            local.format("%H:%M:%S").to_string(),
            entry.reasons_description(reasons),
        ])?;
    }
    rows.flush()?;
    drop(rows);

    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// [export_csv_in] using the local time zone.
pub fn export_csv(entries: &[Entry], reasons: &[Reason]) -> Result<String> {
    export_csv_in(entries, reasons, &Local)
}

/// Writes the export into `dir` under a name carrying the export date and returns the path.
pub fn write_csv_export(
    entries: &[Entry],
    reasons: &[Reason],
    dir: &Path,
    now: DateTime<Local>,
) -> Result<PathBuf> {
    let csv = export_csv(entries, reasons)?;
    fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(now.date_naive()));
    let mut file = fs::File::create(&path)?;
    file.write_all(csv.as_bytes())?;
    info!("Exported {} entries into {path:?}", entries.len());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use anyhow::Result;
    use chrono::{FixedOffset, Local, TimeZone, Utc};
    use tempfile::tempdir;
    use uuid::Uuid;

    use crate::storage::entities::{Entry, Reason, OTHER_REASON_ID};

    use super::{export_csv_in, write_csv_export};

    fn entry(
        (y, m, d, h, min, s): (i32, u32, u32, u32, u32, u32),
        reason_ids: &[&str],
        other_text: Option<&str>,
    ) -> Entry {
        Entry {
            id: Uuid::new_v4(),
            timestamp: Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap(),
            reason_ids: reason_ids.iter().map(|v| v.to_string()).collect(),
            other_text: other_text.map(Into::into),
            reason_names: None,
        }
    }

    #[test]
    fn test_export_oldest_first() -> Result<()> {
        let reasons = vec![Reason::new("A", "A"), Reason::other()];
        // History order, most recent first.
        let entries = vec![
            entry((2024, 1, 2, 8, 30, 0), &[OTHER_REASON_ID], Some("noise")),
            entry((2024, 1, 1, 3, 15, 0), &["A"], None),
        ];

        let csv = export_csv_in(&entries, &reasons, &Utc)?;
        assert_eq!(
            csv,
            "Date,Time,Reasons\n\
             \"2024-01-01\",\"03:15:00\",\"A\"\n\
             \"2024-01-02\",\"08:30:00\",\"Other: noise\"\n"
        );
        Ok(())
    }

    #[test]
    fn test_export_escapes_quotes_and_joins_reasons() -> Result<()> {
        let reasons = vec![Reason::new("A", "Dog \"Rex\"")];
        let mut deleted = entry((2024, 2, 1, 23, 5, 9), &["A", "B", "C"], None);
        deleted.reason_names = Some(BTreeMap::from([("B".to_string(), "Bee".to_string())]));

        let csv = export_csv_in(&[deleted], &reasons, &Utc)?;
        assert_eq!(
            csv.lines().nth(1),
            Some("\"2024-02-01\",\"23:05:09\",\"Dog \"\"Rex\"\", Bee, (deleted)\"")
        );
        Ok(())
    }

    #[test]
    fn test_export_shows_time_zone_dates() -> Result<()> {
        let reasons = vec![Reason::new("A", "A")];
        let entries = vec![entry((2024, 1, 1, 3, 15, 0), &["A"], None)];

        let new_york = FixedOffset::west_opt(5 * 3600).unwrap();
        assert_eq!(
            export_csv_in(&entries, &reasons, &new_york)?.lines().nth(1),
            Some("\"2023-12-31\",\"22:15:00\",\"A\"")
        );

        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        assert_eq!(
            export_csv_in(&entries, &reasons, &tokyo)?.lines().nth(1),
            Some("\"2024-01-01\",\"12:15:00\",\"A\"")
        );
        Ok(())
    }

    #[test]
    fn test_export_empty_history() -> Result<()> {
        assert_eq!(export_csv_in(&[], &[], &Utc)?, "Date,Time,Reasons\n");
        Ok(())
    }

    #[test]
    fn test_write_export_file() -> Result<()> {
        let dir = tempdir()?;
        let now = Local.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap();
        let path = write_csv_export(&[], &[], dir.path(), now)?;

        assert_eq!(path, dir.path().join("WakeLog_2024-05-06.csv"));
        assert_eq!(std::fs::read_to_string(path)?, "Date,Time,Reasons\n");
        Ok(())
    }
}
