// ABOUTME: Re-exports command modules for foodapi-cli
// ABOUTME: Provides user, token, and reference data commands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod load;
pub mod token;
pub mod user;
