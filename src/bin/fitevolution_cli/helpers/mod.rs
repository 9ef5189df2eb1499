// ABOUTME: Helper modules for fitevolution-cli
// ABOUTME: JSON output and error reporting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitEvolution

pub mod output;
