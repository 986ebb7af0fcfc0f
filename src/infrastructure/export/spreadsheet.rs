//! Two-column price sheets (`Timestamp`, `Price`), one row per record.

use crate::domain::entities::advertisement::AdvertisementRecord;
use crate::domain::error::DomainError;
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::Workbook;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

pub const HEADERS: [&str; 2] = ["Timestamp", "Price"];

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpreadsheetFormat {
    #[default]
    Xlsx,
    Csv,
}

impl SpreadsheetFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            SpreadsheetFormat::Xlsx => "xlsx",
            SpreadsheetFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for SpreadsheetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for SpreadsheetFormat {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "xlsx" => Ok(SpreadsheetFormat::Xlsx),
            "csv" => Ok(SpreadsheetFormat::Csv),
            _ => Err(format!("Unknown spreadsheet format: {s} (expected xlsx or csv)")),
        }
    }
}

pub fn write_spreadsheet(
    path: &Path,
    format: SpreadsheetFormat,
    records: &[AdvertisementRecord],
) -> Result<(), DomainError> {
    match format {
        SpreadsheetFormat::Xlsx => write_xlsx(path, records),
        SpreadsheetFormat::Csv => write_csv(path, records),
    }
}

fn write_csv(path: &Path, records: &[AdvertisementRecord]) -> Result<(), DomainError> {
    let export_err = |e: csv::Error| DomainError::Export(format!("{}: {e}", path.display()));

    let mut wtr = csv::Writer::from_path(path).map_err(export_err)?;
    wtr.write_record(HEADERS).map_err(export_err)?;
    for rec in records {
        wtr.write_record([
            rec.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            rec.price.to_string(),
        ])
        .map_err(export_err)?;
    }
    wtr.flush()
        .map_err(|e| DomainError::Export(format!("{}: {e}", path.display())))
}

fn write_xlsx(path: &Path, records: &[AdvertisementRecord]) -> Result<(), DomainError> {
    let export_err = |e: rust_xlsxwriter::XlsxError| DomainError::Export(format!("{}: {e}", path.display()));

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, header) in HEADERS.iter().enumerate() {
        sheet.write_string(0, col as u16, *header).map_err(export_err)?;
    }
    for (i, rec) in records.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet
            .write_string(row, 0, rec.timestamp.format(TIMESTAMP_FORMAT).to_string())
            .map_err(export_err)?;
        let written = match rec.price.to_f64() {
            Some(price) => sheet.write_number(row, 1, price),
            None => sheet.write_string(row, 1, rec.price.to_string()),
        };
        written.map_err(export_err)?;
    }
    workbook.save(path).map_err(export_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{open_workbook, Data, Range, Reader, Xlsx};
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn records() -> Vec<AdvertisementRecord> {
        let at = Utc.with_ymd_and_hms(2024, 11, 3, 7, 5, 9).unwrap();
        vec![
            AdvertisementRecord::new(at, dec!(655.5)),
            AdvertisementRecord::new(at, dec!(640)),
            AdvertisementRecord::new(at, dec!(661.25)),
        ]
    }

    #[test]
    fn test_csv_has_one_row_per_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prices.csv");
        write_spreadsheet(&path, SpreadsheetFormat::Csv, &records()).unwrap();

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let headers: Vec<String> = rdr.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(headers, vec!["Timestamp", "Price"]);
        let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[0][0], "2024-11-03 07:05:09");
        assert_eq!(&rows[0][1], "655.5");
        assert_eq!(&rows[2][1], "661.25");
    }

    #[test]
    fn test_csv_with_no_records_has_only_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        write_spreadsheet(&path, SpreadsheetFormat::Csv, &[]).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.trim(), "Timestamp,Price");
    }

    fn read_xlsx(path: &Path) -> Range<Data> {
        let mut workbook: Xlsx<_> = open_workbook(path).unwrap();
        workbook.worksheet_range("Sheet1").unwrap()
    }

    #[test]
    fn test_xlsx_has_header_and_one_row_per_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prices.xlsx");
        write_spreadsheet(&path, SpreadsheetFormat::Xlsx, &records()).unwrap();

        let range = read_xlsx(&path);
        assert_eq!(range.height(), 4);
        assert_eq!(range.width(), 2);
        let rows: Vec<&[Data]> = range.rows().collect();
        assert_eq!(
            rows[0],
            &[Data::String("Timestamp".into()), Data::String("Price".into())]
        );
        assert_eq!(rows[1][0], Data::String("2024-11-03 07:05:09".into()));
        assert_eq!(rows[1][1], Data::Float(655.5));
        assert_eq!(rows[2][1], Data::Float(640.0));
        assert_eq!(rows[3][1], Data::Float(661.25));
    }

    #[test]
    fn test_xlsx_with_no_records_has_only_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.xlsx");
        write_spreadsheet(&path, SpreadsheetFormat::Xlsx, &[]).unwrap();

        let range = read_xlsx(&path);
        assert_eq!(range.height(), 1);
        assert_eq!(range.get((0, 1)), Some(&Data::String("Price".into())));
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("CSV".parse::<SpreadsheetFormat>().unwrap(), SpreadsheetFormat::Csv);
        assert_eq!("xlsx".parse::<SpreadsheetFormat>().unwrap(), SpreadsheetFormat::Xlsx);
        assert!("ods".parse::<SpreadsheetFormat>().is_err());
    }
}
