// ABOUTME: Output formatting helpers for coach-cli
// ABOUTME: Prints pretty JSON on stdout so results can be piped into other tools
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::io::{self, Write};

use anyhow::Result;
use serde::Serialize;

/// Print `value` as pretty JSON followed by a newline
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
