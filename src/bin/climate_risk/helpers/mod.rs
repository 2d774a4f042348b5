// ABOUTME: Helper modules for climate-risk
// ABOUTME: JSON input loading and report formatting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod display;
pub mod input;
