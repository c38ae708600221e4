// Row-oriented decoding of uploaded tabular files
//
// Turns CSV or Excel content into an ordered sequence of ImportRow records.
// Missing required columns fail the whole upload before any row is
// processed; cell-level problems (e.g. an unparsable quantity) are left to
// the import service to report per row.

use std::io::Cursor;

use calamine::{Data, Reader, Xls, Xlsx};

use crate::imports::error::ImportError;
use crate::imports::models::ImportRow;

/// Columns every upload must carry
pub const REQUIRED_COLUMNS: [&str; 3] = ["customer_name", "customer_email", "service_name"];

/// Decode an uploaded file into import rows based on its extension
pub fn decode(filename: &str, bytes: &[u8]) -> Result<Vec<ImportRow>, ImportError> {
    let lower = filename.to_ascii_lowercase();
    if lower.ends_with(".csv") {
        decode_csv(bytes)
    } else if lower.ends_with(".xlsx") || lower.ends_with(".xls") {
        decode_spreadsheet(&lower, bytes)
    } else {
        Err(ImportError::UnsupportedFileType)
    }
}

fn decode_csv(bytes: &[u8]) -> Result<Vec<ImportRow>, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| ImportError::Decode(e.to_string()))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| ImportError::Decode(e.to_string()))?;
        rows.push(record.iter().map(cell_from_str).collect());
    }

    assemble(&headers, rows)
}

fn decode_spreadsheet(filename: &str, bytes: &[u8]) -> Result<Vec<ImportRow>, ImportError> {
    let cursor = Cursor::new(bytes.to_vec());

    // First worksheet only; the first row is the header row
    let range = if filename.ends_with(".xlsx") {
        Xlsx::new(cursor)
            .map_err(|e| ImportError::Decode(e.to_string()))?
            .worksheet_range_at(0)
            .ok_or_else(|| ImportError::Decode("workbook contains no sheets".to_string()))?
            .map_err(|e| ImportError::Decode(e.to_string()))?
    } else {
        Xls::new(cursor)
            .map_err(|e| ImportError::Decode(e.to_string()))?
            .worksheet_range_at(0)
            .ok_or_else(|| ImportError::Decode("workbook contains no sheets".to_string()))?
            .map_err(|e| ImportError::Decode(e.to_string()))?
    };

    let mut cell_rows = range.rows();
    let headers: Vec<String> = cell_rows
        .next()
        .map(|row| {
            row.iter()
                .map(|cell| cell.to_string().trim().to_string())
                .collect()
        })
        .unwrap_or_default();

    let rows = cell_rows
        .map(|row| row.iter().map(cell_from_data).collect())
        .collect();

    assemble(&headers, rows)
}

fn cell_from_str(cell: &str) -> Option<String> {
    let cell = cell.trim();
    (!cell.is_empty()).then(|| cell.to_string())
}

fn cell_from_data(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) => cell_from_str(s),
        Data::Int(i) => Some(i.to_string()),
        // Spreadsheets store integers as floats; render 2.0 as "2"
        Data::Float(f) if f.fract() == 0.0 => Some(format!("{}", *f as i64)),
        other => Some(other.to_string()),
    }
}

/// Map header-indexed cell rows into typed import rows
fn assemble(
    headers: &[String],
    rows: Vec<Vec<Option<String>>>,
) -> Result<Vec<ImportRow>, ImportError> {
    let index_of = |name: &str| headers.iter().position(|h| h == name);

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|column| index_of(column).is_none())
        .map(ToString::to_string)
        .collect();
    let (Some(name_idx), Some(email_idx), Some(service_idx)) = (
        index_of("customer_name"),
        index_of("customer_email"),
        index_of("service_name"),
    ) else {
        return Err(ImportError::MissingColumns(missing));
    };

    let quantity_idx = index_of("quantity");
    let notes_idx = index_of("notes");
    let cell = |row: &[Option<String>], idx: usize| row.get(idx).cloned().flatten();

    Ok(rows
        .into_iter()
        .map(|row| ImportRow {
            customer_name: cell(&row, name_idx).unwrap_or_default(),
            customer_email: cell(&row, email_idx).unwrap_or_default(),
            service_name: cell(&row, service_idx).unwrap_or_default(),
            quantity: quantity_idx.and_then(|idx| cell(&row, idx)),
            notes: notes_idx.and_then(|idx| cell(&row, idx)),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "customer_name,customer_email,service_name,quantity,notes\n\
        Acme Corp,ops@acme.example,Express Freight,2,Dock 4\n\
        Globex,logistics@globex.example,Standard Freight,,\n";

    #[test]
    fn test_decode_csv_rows() {
        let rows = decode("bookings.csv", CSV.as_bytes()).expect("decode failed");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].customer_name, "Acme Corp");
        assert_eq!(rows[0].customer_email, "ops@acme.example");
        assert_eq!(rows[0].service_name, "Express Freight");
        assert_eq!(rows[0].quantity, Some("2".to_string()));
        assert_eq!(rows[0].notes, Some("Dock 4".to_string()));
        // Empty cells come through as absent values
        assert_eq!(rows[1].quantity, None);
        assert_eq!(rows[1].notes, None);
    }

    #[test]
    fn test_decode_csv_is_column_order_insensitive() {
        let csv = "service_name,customer_email,customer_name\n\
            Express Freight,ops@acme.example,Acme Corp\n";
        let rows = decode("bookings.csv", csv.as_bytes()).expect("decode failed");
        assert_eq!(rows[0].customer_name, "Acme Corp");
        assert_eq!(rows[0].service_name, "Express Freight");
        assert_eq!(rows[0].quantity, None);
    }

    #[test]
    fn test_decode_missing_required_column() {
        let csv = "customer_name,service_name\nAcme Corp,Express Freight\n";
        let err = decode("bookings.csv", csv.as_bytes()).unwrap_err();
        match err {
            ImportError::MissingColumns(columns) => {
                assert_eq!(columns, vec!["customer_email".to_string()]);
            }
            other => panic!("expected MissingColumns, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_empty_file_reports_all_required_columns() {
        let err = decode("bookings.csv", b"").unwrap_err();
        match err {
            ImportError::MissingColumns(columns) => assert_eq!(columns.len(), 3),
            other => panic!("expected MissingColumns, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_rejects_unsupported_extension() {
        let err = decode("bookings.pdf", b"whatever").unwrap_err();
        assert!(matches!(err, ImportError::UnsupportedFileType));
    }

    #[test]
    fn test_decode_extension_is_case_insensitive() {
        let rows = decode("BOOKINGS.CSV", CSV.as_bytes()).expect("decode failed");
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_cell_from_data_renders_integral_floats_without_fraction() {
        assert_eq!(cell_from_data(&Data::Float(2.0)), Some("2".to_string()));
        assert_eq!(cell_from_data(&Data::Float(2.5)), Some("2.5".to_string()));
        assert_eq!(cell_from_data(&Data::Int(3)), Some("3".to_string()));
        assert_eq!(cell_from_data(&Data::Empty), None);
        assert_eq!(
            cell_from_data(&Data::String("  Acme  ".to_string())),
            Some("Acme".to_string())
        );
    }
}
