// ABOUTME: Error types for the FitEvolution application crate
// ABOUTME: Re-exports the unified AppError and ErrorCode from the core crate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitEvolution

//! # Error Handling
//!
//! All fallible library operations return [`AppResult`]. `sqlx` errors convert
//! into [`AppError`] through the core crate's `database-errors` feature, with
//! unique constraint violations reported as [`ErrorCode::ResourceAlreadyExists`].

pub use fitevolution_core::errors::{
    AppError, AppResult, ErrorCode, ErrorContext, ErrorResponse, ErrorResponseDetails,
};
