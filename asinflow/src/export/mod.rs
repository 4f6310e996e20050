//! Output boundary: fixed column order, row rendering and file naming.

use chrono::NaiveDate;
use std::io::Write;

use crate::core::Record;
use crate::errors::AsinflowError;

/// Column labels in export order.
pub const RECORD_COLUMNS: [&str; 19] = [
    "Identifier",
    "Status",
    "Title",
    "Price",
    "Availability",
    "Currently Unavailable",
    "Category",
    "Rating",
    "Reviews",
    "A+ Content",
    "Video",
    "Coupon",
    "Image URL",
    "Seller",
    "Deal",
    "Time s",
    "Retries",
    "Error",
    "Extracted On",
];

const FILENAME_PREFIX: &str = "asinflow_extract_";

impl Record {
    /// Renders the record as strings in [`RECORD_COLUMNS`] order, except the
    /// trailing date column which belongs to the export run.
    #[must_use]
    pub fn to_row(&self) -> Vec<String> {
        let f = &self.fields;
        vec![
            self.identifier.clone(),
            self.status.to_string(),
            f.title.clone(),
            f.price.clone(),
            f.availability.clone(),
            f.currently_unavailable.clone(),
            f.category.clone(),
            f.rating.clone(),
            f.reviews.clone(),
            f.rich_content.clone(),
            f.video.clone(),
            f.coupon.clone(),
            f.image_url.clone(),
            f.seller.clone(),
            f.deal.clone(),
            format!("{:.2}", self.elapsed_seconds),
            self.retries.to_string(),
            self.error.clone(),
        ]
    }
}

/// Date-stamped export file name, e.g. `asinflow_extract_20240315.csv`.
#[must_use]
pub fn export_filename(date: NaiveDate) -> String {
    format!("{FILENAME_PREFIX}{}.csv", date.format("%Y%m%d"))
}

/// Writes a header row and one row per record as comma-separated values.
///
/// Every row carries `date` in the final column.
pub fn write_csv<W: Write>(
    writer: W,
    records: &[Record],
    date: NaiveDate,
) -> Result<(), AsinflowError> {
    let mut csv_writer = csv::WriterBuilder::new().from_writer(writer);
    csv_writer.write_record(RECORD_COLUMNS)?;

    let stamp = date.format("%Y-%m-%d").to_string();
    for record in records {
        let mut row = record.to_row();
        row.push(stamp.clone());
        csv_writer.write_record(&row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::ProductFields;
    use pretty_assertions::assert_eq;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 5).expect("date")
    }

    #[test]
    fn test_export_filename() {
        assert_eq!(export_filename(date()), "asinflow_extract_20240305.csv");
    }

    #[test]
    fn test_row_matches_column_order() {
        let fields = ProductFields {
            title: "Kettle".to_string(),
            price: "1,299.00".to_string(),
            seller: "Acme".to_string(),
            ..Default::default()
        };
        let row = Record::success("B000123456", fields, 1, 1.234_5).to_row();

        assert_eq!(row.len(), RECORD_COLUMNS.len() - 1);
        assert_eq!(row[0], "B000123456");
        assert_eq!(row[1], "Success");
        assert_eq!(row[2], "Kettle");
        assert_eq!(row[3], "1,299.00");
        assert_eq!(row[13], "Acme");
        assert_eq!(row[15], "1.23");
        assert_eq!(row[16], "1");
        assert_eq!(row[17], "");
    }

    #[test]
    fn test_failed_row() {
        let row = Record::failed("B000ABCDEF", "Captcha detected", 2, 7.0).to_row();
        assert_eq!(row[1], "Failed");
        assert_eq!(row[2], "");
        assert_eq!(row[15], "7.00");
        assert_eq!(row[16], "2");
        assert_eq!(row[17], "Captcha detected");
    }

    #[test]
    fn test_write_csv_header_only_for_empty_batch() {
        let mut out = Vec::new();
        write_csv(&mut out, &[], date()).expect("write");
        let text = String::from_utf8(out).expect("utf8");
        assert_eq!(text.lines().count(), 1);
        assert_eq!(text.lines().next(), Some(RECORD_COLUMNS.join(",").as_str()));
    }

    #[test]
    fn test_write_csv_quotes_cells() {
        let fields = ProductFields {
            title: "Kettle, \"Steel\"".to_string(),
            ..Default::default()
        };
        let records = vec![Record::success("B1", fields, 0, 0.5)];
        let mut out = Vec::new();
        write_csv(&mut out, &records, date()).expect("write");
        let text = String::from_utf8(out).expect("utf8");
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Identifier,Status,Title,Price"));
        assert!(lines[1].starts_with("B1,Success,\"Kettle, \"\"Steel\"\"\","));
        assert!(lines[1].ends_with(",0.50,0,,2024-03-05"));
    }
}
