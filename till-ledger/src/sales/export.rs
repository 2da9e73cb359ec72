//! Sales exports: CSV dump of the log, plain-text receipts

use crate::orders::money::round_money;
use crate::utils::fs::write_atomic;
use shared::models::{Receipt, SaleRecord};
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Column names, kept compatible with spreadsheets built on older exports
pub const CSV_HEADER: [&str; 8] = [
    "id",
    "order_id",
    "item",
    "quantity",
    "price_per_item",
    "total_price",
    "payment_method",
    "timestamp",
];

fn escape(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

fn write_row<W: Write>(out: &mut W, fields: &[&str]) -> std::io::Result<()> {
    let row: Vec<Cow<'_, str>> = fields.iter().map(|f| escape(f)).collect();
    write!(out, "{}\r\n", row.join(","))
}

/// Write `rows` to `path` as RFC 4180 CSV. No rows produces an empty file.
pub fn write_csv(path: &Path, rows: &[SaleRecord]) -> std::io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    if rows.is_empty() {
        return out.flush();
    }

    write_row(&mut out, &CSV_HEADER)?;
    for r in rows {
        let id = r.id.to_string();
        let quantity = r.quantity.to_string();
        let unit_price = r.unit_price.normalize().to_string();
        let line_total = format!("{:.2}", round_money(r.line_total));
        let timestamp = r.timestamp.to_rfc3339();
        write_row(
            &mut out,
            &[
                id.as_str(),
                r.order_id.as_str(),
                r.item.as_str(),
                quantity.as_str(),
                unit_price.as_str(),
                line_total.as_str(),
                r.payment_method.as_str(),
                timestamp.as_str(),
            ],
        )?;
    }
    out.flush()
}

/// Save a receipt as plain text.
///
/// The extension is forced to `.txt` (`receipt.pdf` is written as
/// `receipt.txt`). Returns the path actually written.
pub fn write_receipt(path: &Path, receipt: &Receipt) -> std::io::Result<PathBuf> {
    let is_txt = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("txt"));
    let target = if is_txt {
        path.to_path_buf()
    } else {
        path.with_extension("txt")
    };

    let mut text = receipt.to_string();
    text.push('\n');
    write_atomic(&target, text.as_bytes())?;

    tracing::info!(order_id = %receipt.order_id, path = %target.display(), "Receipt saved");
    Ok(target)
}
