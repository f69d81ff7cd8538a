// Per-person summary table as CSV
use csv::WriterBuilder;
use rust_decimal::Decimal;
use shared::models::{BillSummary, PersonSummary};
use shared::utils::decimal::format_decimal;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::Result;

const HEADER: [&str; 7] = [
    "name",
    "subtotal",
    "vat",
    "service",
    "tip",
    "grand_total",
    "rounded_total",
];

/// One row per person followed by a `TOTAL` row; the total's last column is the bill total.
pub fn write_summaries_csv<W: Write>(writer: W, summary: &BillSummary) -> Result<()> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record(HEADER)?;

    for s in &summary.summaries {
        wtr.write_record([
            s.name.clone(),
            format_decimal(s.subtotal),
            format_decimal(s.vat_share),
            format_decimal(s.service_share),
            format_decimal(s.tip_share),
            format_decimal(s.grand_total),
            format_decimal(s.rounded_total),
        ])?;
    }

    let column = |f: fn(&PersonSummary) -> Decimal| {
        format_decimal(summary.summaries.iter().map(f).sum())
    };
    wtr.write_record([
        "TOTAL".to_string(),
        column(|s| s.subtotal),
        column(|s| s.vat_share),
        column(|s| s.service_share),
        column(|s| s.tip_share),
        column(|s| s.grand_total),
        format_decimal(summary.bill_total),
    ])?;

    wtr.flush()?;
    Ok(())
}

pub fn export_summaries_csv(path: impl AsRef<Path>, summary: &BillSummary) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_summaries_csv(file, summary)?;
    tracing::info!(path = %path.display(), rows = summary.summaries.len(), "Exported bill summary CSV");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocator;
    use shared::models::{Bill, Item, Person, RoundingMode};
    use tempfile::NamedTempFile;

    fn sample_summary() -> BillSummary {
        let mut bill = Bill::new("Dinner");
        bill.people = vec![
            Person { id: 1, name: "Ann".to_string(), instagram: None },
            Person { id: 2, name: "Bo".to_string(), instagram: None },
        ];
        bill.items = vec![Item {
            id: 3,
            name: "Set".to_string(),
            price: Decimal::from(100),
            quantity: 1,
            sharer_ids: vec![1, 2],
        }];
        bill.vat_percent = Decimal::from(7);
        bill.service_percent = Decimal::from(10);
        bill.rounding = RoundingMode::Round10;
        allocator::summarize(&bill)
    }

    #[test]
    fn test_write_summaries_csv_rows() {
        let mut out = Vec::new();
        write_summaries_csv(&mut out, &sample_summary()).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "name,subtotal,vat,service,tip,grand_total,rounded_total");
        assert_eq!(lines[1], "Ann,50,3.5,5,0,58.5,60");
        assert_eq!(lines[2], "Bo,50,3.5,5,0,58.5,57");
        assert_eq!(lines[3], "TOTAL,100,7,10,0,117,117");
    }

    #[test]
    fn test_write_summaries_csv_empty_bill() {
        let mut out = Vec::new();
        write_summaries_csv(&mut out, &BillSummary::default()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().last(), Some("TOTAL,0,0,0,0,0,0"));
    }

    #[test]
    fn test_export_summaries_csv_to_file() {
        let file = NamedTempFile::new().unwrap();
        export_summaries_csv(file.path(), &sample_summary()).unwrap();
        let mut rdr = csv::Reader::from_path(file.path()).unwrap();
        let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[2][0], "TOTAL");
        assert_eq!(&rows[2][6], "117");
    }
}
