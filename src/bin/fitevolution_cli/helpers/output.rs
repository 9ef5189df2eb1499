// ABOUTME: JSON output helpers for fitevolution-cli
// ABOUTME: Results go to stdout, error responses to stderr
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitEvolution

use fitevolution::errors::{AppError, AppResult, ErrorResponse};
use serde::Serialize;

/// Print a value as pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::internal(format!("Failed to serialize output: {e}")))?;
    println!("{text}");
    Ok(())
}

/// Print an error response on stderr
pub fn print_error(error: AppError) {
    let message = error.to_string();
    let response = ErrorResponse::from(error);
    match serde_json::to_string_pretty(&response) {
        Ok(text) => eprintln!("{text}"),
        Err(_) => eprintln!("{message}"),
    }
}
