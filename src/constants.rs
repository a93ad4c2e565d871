// ABOUTME: Re-exports application constants from foodapi-core
// ABOUTME: Limits, pagination defaults, and shopping-list naming
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use foodapi_core::constants::*;
