// ABOUTME: Command implementations for fitevolution-cli
// ABOUTME: One module per top-level subcommand
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitEvolution

pub mod catalog;
pub mod log;
pub mod macros;
pub mod plan;
pub mod profile;
