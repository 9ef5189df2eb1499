// ABOUTME: Conversion of sqlx errors into the unified AppError type
// ABOUTME: Maps unique constraint violations to retryable conflicts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitEvolution

use super::{AppError, ErrorCode};

impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> Self {
        match &error {
            sqlx::Error::RowNotFound => Self::not_found("Row"),
            sqlx::Error::Database(db_error) if db_error.is_unique_violation() => {
                let message = format!("Unique constraint violated: {}", db_error.message());
                Self::new(ErrorCode::ResourceAlreadyExists, message).with_source(error)
            }
            _ => {
                let message = format!("Database operation failed: {error}");
                Self::new(ErrorCode::DatabaseError, message).with_source(error)
            }
        }
    }
}
