use std::borrow::Cow;

use divicuenta_application::{
    AuthError, DinerValidationError, ReceiptOcrError, ReceiptScanError, StoreError,
};
use divicuenta_i18n as i18n;

pub fn format_diner_error(error: DinerValidationError) -> &'static str {
    match error {
        DinerValidationError::MissingName => i18n::NAME_REQUIRED,
        DinerValidationError::MissingContact => i18n::CONTACT_REQUIRED,
        DinerValidationError::InvalidEmail => i18n::INVALID_EMAIL,
    }
}

pub fn format_auth_error(error: &AuthError) -> Cow<'static, str> {
    match error {
        AuthError::MissingField { field } => {
            Cow::Owned(format!("{} ({field})", i18n::ALL_FIELDS_REQUIRED))
        }
        AuthError::DuplicateEmail => Cow::Borrowed(i18n::EMAIL_ALREADY_REGISTERED),
        AuthError::InvalidCredentials => Cow::Borrowed(i18n::INVALID_CREDENTIALS),
        AuthError::Store(err) => format_store_error(err),
    }
}

pub fn format_store_error(error: &StoreError) -> Cow<'static, str> {
    Cow::Owned(format!("{} ({error})", i18n::STORAGE_FAILED))
}

/// User-facing text for a failed scan. Provider failures are wrapped in the
/// generic OCR message except for a missing API key.
pub fn format_scan_error(error: &ReceiptScanError) -> Cow<'static, str> {
    match error {
        ReceiptScanError::ScanInProgress => Cow::Borrowed(i18n::SCAN_IN_PROGRESS),
        ReceiptScanError::EmptyImage => Cow::Borrowed(i18n::NO_IMAGE),
        ReceiptScanError::NoItemsDetected => Cow::Borrowed(i18n::NO_ITEMS_DETECTED),
        ReceiptScanError::Provider(ReceiptOcrError::NotConfigured) => {
            Cow::Borrowed(i18n::OCR_NOT_CONFIGURED)
        }
        ReceiptScanError::Provider(err) => {
            Cow::Owned(i18n::ocr_failed(&err.to_string()).to_string())
        }
    }
}
