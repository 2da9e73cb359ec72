//! Ledger error types and their mapping onto [`AppError`]

use crate::catalog::CatalogError;
use crate::sales::StorageError;
use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Which input an [`LedgerError::InvalidArgument`] refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Item,
    Quantity,
    Price,
    PaymentMethod,
}

impl Field {
    pub fn name(&self) -> &'static str {
        match self {
            Field::Item => "item",
            Field::Quantity => "quantity",
            Field::Price => "price",
            Field::PaymentMethod => "payment_method",
        }
    }
}

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    #[error("Item not in order: {0}")]
    NotInOrder(String),

    #[error("Quantity must be positive, got {0}")]
    InvalidQuantity(i32),

    #[error("Invalid {}: {reason}", .field.name())]
    InvalidArgument { field: Field, reason: String },

    #[error("Insufficient stock for {item}: requested {requested}, available {available}")]
    InsufficientStock {
        item: String,
        requested: i64,
        available: i32,
    },

    #[error("Order is empty")]
    EmptyOrder,

    #[error("Catalog persistence failed: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Sales log persistence failed: {0}")]
    SalesLog(#[from] StorageError),
}

pub type LedgerResult<T> = Result<T, LedgerError>;

impl LedgerError {
    pub(crate) fn invalid(field: Field, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field,
            reason: reason.into(),
        }
    }

    /// Underlying store failed (the `PersistenceFailure` kind)
    pub fn is_persistence(&self) -> bool {
        matches!(self, Self::Catalog(_) | Self::SalesLog(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ItemNotFound(_) | Self::NotInOrder(_))
    }
}

/// Map an I/O failure onto a storage error code
fn classify_io_error(e: &std::io::Error) -> ErrorCode {
    // StorageFull 没有稳定的 ErrorKind，按 raw os error / 文本判断
    let text = e.to_string().to_lowercase();
    if text.contains("no space") || text.contains("disk full") || text.contains("enospc") {
        return ErrorCode::StorageFull;
    }
    ErrorCode::SystemBusy
}

fn classify_storage_error(e: &StorageError) -> ErrorCode {
    match e {
        StorageError::Serialization(_) => return ErrorCode::StorageCorrupted,
        StorageError::Io(io) => return classify_io_error(io),
        _ => {}
    }

    // redb 错误通过字符串匹配分类
    let err_str = e.to_string().to_lowercase();

    // 磁盘空间不足
    if err_str.contains("no space") || err_str.contains("disk full") || err_str.contains("enospc")
    {
        return ErrorCode::StorageFull;
    }

    // 数据损坏
    if err_str.contains("corrupt") || err_str.contains("invalid database") {
        return ErrorCode::StorageCorrupted;
    }

    ErrorCode::DatabaseError
}

fn classify_catalog_error(e: &CatalogError) -> ErrorCode {
    match e {
        CatalogError::Io(io) => classify_io_error(io),
        CatalogError::Serialization(_) => ErrorCode::InternalError,
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        let message = err.to_string();
        match err {
            LedgerError::ItemNotFound(item) => {
                AppError::with_message(ErrorCode::ProductNotFound, message).with_detail("item", item)
            }
            LedgerError::NotInOrder(item) => {
                AppError::with_message(ErrorCode::OrderItemNotFound, message).with_detail("item", item)
            }
            LedgerError::InvalidQuantity(qty) => {
                AppError::with_message(ErrorCode::InvalidQuantity, message).with_detail("quantity", qty)
            }
            LedgerError::InvalidArgument { field, .. } => {
                let code = match field {
                    Field::PaymentMethod => ErrorCode::PaymentMethodRequired,
                    Field::Price => ErrorCode::ProductInvalidPrice,
                    Field::Quantity => ErrorCode::ValueOutOfRange,
                    Field::Item => ErrorCode::ValidationFailed,
                };
                AppError::with_message(code, message).with_detail("field", field.name())
            }
            LedgerError::InsufficientStock {
                item,
                requested,
                available,
            } => AppError::with_message(ErrorCode::ProductOutOfStock, message)
                .with_detail("item", item)
                .with_detail("requested", requested)
                .with_detail("available", available),
            LedgerError::EmptyOrder => AppError::with_message(ErrorCode::OrderEmpty, message),
            LedgerError::Catalog(e) => {
                let code = classify_catalog_error(&e);
                tracing::error!(error = %e, error_code = %code, "Catalog persistence error");
                AppError::with_message(code, message)
            }
            LedgerError::SalesLog(e) => {
                let code = classify_storage_error(&e);
                tracing::error!(error = %e, error_code = %code, "Sales log storage error");
                AppError::with_message(code, message)
            }
        }
    }
}
