use std::sync::atomic::{AtomicBool, Ordering};

use divicuenta_domain::Money;
use serde_json::Value;

use crate::{
    error::{ReceiptOcrError, ReceiptScanError},
    ports::ReceiptOcr,
    session::BillSession,
};

pub struct ReceiptImage<'a> {
    pub bytes: &'a [u8],
    pub mime_type: &'a str,
}

/// Result of asking the device for a photo.
#[derive(Debug, Clone)]
pub enum CaptureResult {
    Captured { bytes: Vec<u8>, mime_type: String },
    /// The user closed the picker. Not a failure.
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedItem {
    pub name: String,
    pub price: Money,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    Loaded { item_count: usize },
    Cancelled,
}

/// Turns the provider's JSON into receipt lines.
///
/// Anything other than an array yields no items. Entries without a string
/// `name` or a numeric `price` are dropped; fractional prices are truncated
/// and then clamped into `0..=Money::MAX_PRICE`.
pub fn sanitize_scanned_items(raw: &str) -> Result<Vec<ScannedItem>, ReceiptOcrError> {
    let value: Value =
        serde_json::from_str(raw.trim()).map_err(|err| ReceiptOcrError::MalformedResponse {
            detail: err.to_string(),
        })?;

    let Value::Array(entries) = value else {
        tracing::debug!("OCR response is not an array; treating as empty");
        return Ok(Vec::new());
    };

    let total = entries.len();
    let items: Vec<ScannedItem> = entries.iter().filter_map(sanitize_entry).collect();
    if items.len() != total {
        tracing::debug!(
            dropped = total - items.len(),
            kept = items.len(),
            "dropped malformed OCR entries"
        );
    }
    Ok(items)
}

fn sanitize_entry(entry: &Value) -> Option<ScannedItem> {
    let name = entry.get("name")?.as_str()?.trim();
    if name.is_empty() {
        return None;
    }
    let price = entry.get("price")?;
    let price = if let Some(value) = price.as_i64() {
        value
    } else if price.is_u64() {
        i64::MAX
    } else {
        let value = price.as_f64()?;
        if !value.is_finite() {
            return None;
        }
        value.trunc() as i64
    };

    Some(ScannedItem {
        name: name.to_string(),
        price: Money::from_i64(price).clamp_price(),
    })
}

/// Marks a scan as in flight; released on drop.
pub struct ScanGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for ScanGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Runs receipt scans against the OCR collaborator, one at a time.
pub struct ReceiptScanner<'a> {
    ocr: &'a dyn ReceiptOcr,
    in_flight: AtomicBool,
}

impl<'a> ReceiptScanner<'a> {
    pub fn new(ocr: &'a dyn ReceiptOcr) -> Self {
        Self {
            ocr,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn is_scanning(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn try_begin(&self) -> Result<ScanGuard<'_>, ReceiptScanError> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| ReceiptScanError::ScanInProgress)?;
        Ok(ScanGuard {
            flag: &self.in_flight,
        })
    }

    /// Reads a captured receipt into `session`.
    ///
    /// The session is reset and refilled only when at least one item was
    /// read; on any failure it is left as it was.
    pub fn scan(
        &self,
        session: &mut BillSession<'_>,
        capture: CaptureResult,
    ) -> Result<ScanOutcome, ReceiptScanError> {
        let (bytes, mime_type) = match capture {
            CaptureResult::Cancelled => return Ok(ScanOutcome::Cancelled),
            CaptureResult::Captured { bytes, mime_type } => (bytes, mime_type),
        };
        if bytes.is_empty() {
            return Err(ReceiptScanError::EmptyImage);
        }

        let _guard = self.try_begin()?;
        let image = ReceiptImage {
            bytes: &bytes,
            mime_type: &mime_type,
        };
        let raw = self.ocr.extract_items(&image).inspect_err(|err| {
            tracing::warn!(error = %err, mime_type = %mime_type, "receipt OCR failed");
        })?;
        let items = sanitize_scanned_items(&raw)?;
        if items.is_empty() {
            return Err(ReceiptScanError::NoItemsDetected);
        }

        let item_count = items.len();
        session.reset();
        session.replace_items(items);
        tracing::info!(item_count, "receipt scanned");
        Ok(ScanOutcome::Loaded { item_count })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_well_formed_entries() {
        let items = sanitize_scanned_items(r#"[{"name":"Pizza","price":10000},{"name":" Bebida ","price":2000}]"#)
            .expect("valid json");
        assert_eq!(
            items,
            vec![
                ScannedItem {
                    name: "Pizza".to_string(),
                    price: Money::from_i64(10_000)
                },
                ScannedItem {
                    name: "Bebida".to_string(),
                    price: Money::from_i64(2_000)
                },
            ]
        );
    }

    #[test]
    fn drops_and_coerces_malformed_entries() {
        let raw = r#"[
            {"name": 12, "price": 100},
            {"name": "Sin precio"},
            {"name": "Texto", "price": "1.500"},
            {"name": "", "price": 100},
            {"name": "Decimal", "price": 1490.7},
            {"name": "Negativo", "price": -50},
            {"name": "Enorme", "price": 18446744073709551615},
            {"name": "Exponente", "price": 1e300}
        ]"#;
        let items = sanitize_scanned_items(raw).expect("valid json");
        assert_eq!(
            items,
            vec![
                ScannedItem {
                    name: "Decimal".to_string(),
                    price: Money::from_i64(1490)
                },
                ScannedItem {
                    name: "Negativo".to_string(),
                    price: Money::zero()
                },
                ScannedItem {
                    name: "Enorme".to_string(),
                    price: Money::MAX_PRICE
                },
                ScannedItem {
                    name: "Exponente".to_string(),
                    price: Money::MAX_PRICE
                },
            ]
        );
    }

    #[test]
    fn non_array_is_empty() {
        let items = sanitize_scanned_items(r#"{"items": []}"#).expect("valid json");
        assert!(items.is_empty());
    }

    #[test]
    fn invalid_json_is_provider_error() {
        let err = sanitize_scanned_items("not json").expect_err("should fail");
        assert!(matches!(err, ReceiptOcrError::MalformedResponse { .. }));
    }
}
