// ABOUTME: Decimal rounding helper shared by metric and plan parameter computations
// ABOUTME: Rounds half away from zero to a fixed number of decimal places
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitEvolution

/// Round `value` to `places` decimal places
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10_f64.powi(places);
    (value * factor).round() / factor
}
