//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;
use table_view::{TableQuery, TableState, TableStateError, TableView};

use crate::domain::{Error, UserId};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidId,
    UnknownColumn,
    NotSortable,
    UnknownFilterOption,
    InvalidDirection,
    InvalidPage,
    UnknownTab,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::InvalidId => "invalid_id",
            Self::UnknownColumn => "unknown_column",
            Self::NotSortable => "not_sortable",
            Self::UnknownFilterOption => "unknown_filter_option",
            Self::InvalidDirection => "invalid_direction",
            Self::InvalidPage => "invalid_page",
            Self::UnknownTab => "unknown_tab",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

fn field_error(field: FieldName, code: ErrorCode, message: String, value: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "value": value,
        "code": code.as_str(),
    }))
}

pub(crate) fn parse_user_id(value: String, field: FieldName) -> Result<UserId, Error> {
    UserId::new(value.clone()).map_err(|_| {
        field_error(
            field,
            ErrorCode::InvalidId,
            format!("{} must be a valid identifier", field.as_str()),
            &value,
        )
    })
}

pub(crate) fn unknown_tab_error(value: &str) -> Error {
    field_error(
        FieldName::new("tab"),
        ErrorCode::UnknownTab,
        format!("unknown transaction tab: {value}"),
        value,
    )
}

fn table_state_error(err: TableStateError) -> Error {
    let message = err.to_string();
    match err {
        TableStateError::UnknownColumn { key } => {
            field_error(FieldName::new("sort"), ErrorCode::UnknownColumn, message, &key)
        }
        TableStateError::NotSortable { key } => {
            field_error(FieldName::new("sort"), ErrorCode::NotSortable, message, &key)
        }
        TableStateError::UnknownFilterOption { value } => field_error(
            FieldName::new("filter"),
            ErrorCode::UnknownFilterOption,
            message,
            &value,
        ),
        TableStateError::InvalidDirection { value } => field_error(
            FieldName::new("direction"),
            ErrorCode::InvalidDirection,
            message,
            &value,
        ),
        TableStateError::InvalidPage => {
            field_error(FieldName::new("page"), ErrorCode::InvalidPage, message, "0")
        }
    }
}

/// Rebuild table state from query parameters, rejecting unknown controls.
pub(crate) fn table_state<T>(view: &TableView<T>, query: &TableQuery) -> Result<TableState, Error> {
    TableState::from_query(view, query).map_err(table_state_error)
}
