// ABOUTME: Core types and constants for the FitEvolution training planner
// ABOUTME: Foundation crate with error handling, domain models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitEvolution

#![deny(unsafe_code)]

//! # FitEvolution Core
//!
//! Foundation crate providing shared types and constants for the FitEvolution
//! training planner. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Validation limits and planner bounds organized by domain
//! - **models**: Profile inputs, exercise catalog entities, training plans and workout history

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (profile inputs, catalog, plans, workout history)
pub mod models;
