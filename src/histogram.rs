/*
 Copyright (c) 2026 The drumverb developers

 This file is part of drumverb

 drumverb is free software: you can redistribute it and/or modify it
 under the terms of the GNU General Public License as published by the
 Free Software Foundation, either version 3 of the License, or
 (at your option) any later version.

 drumverb is distributed in the hope that it will be useful, but
 WITHOUT ANY WARRANTY; without even the implied warranty of
 MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 GNU General Public License for more details.
 You should have received a copy of the GNU General Public License
 along with drumverb. If not, see <https://www.gnu.org/licenses/>.
*/

use std::io::{self, Write};

use log::debug;

use crate::sample::EPSILON;

pub const DEFAULT_MARKER: char = '*';
pub const DEFAULT_WIDTH: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistogramStyle {
    /// Drawn once per bar unit.
    pub marker: char,
    /// Bar length of the largest value.
    pub width: u32,
}

impl Default for HistogramStyle {
    fn default() -> Self {
        Self {
            marker: DEFAULT_MARKER,
            width: DEFAULT_WIDTH,
        }
    }
}

/// Round every value to a thousandth in place and return the largest
/// rounded value, never less than 0.
pub fn round_max(values: &mut [f64]) -> f64 {
    let mut max = 0.0;
    for v in values.iter_mut() {
        *v = (1000.0 * *v).round() / 1000.0;
        if *v > max {
            max = *v;
        }
    }
    max
}

/// Print one `value: bar` line per slot. Values are rounded in place first.
/// Nothing is written when the largest value rounds to zero.
pub fn render<W: Write>(values: &mut [f64], style: HistogramStyle, out: &mut W) -> io::Result<()> {
    let max = round_max(values);
    if max < EPSILON {
        debug!("Histogram maximum {} is zero, nothing to draw", max);
        return Ok(());
    }

    let marker = style.marker.to_string();
    for &v in values.iter() {
        let bar = (f64::from(style.width) * v / max).floor().max(0.0) as usize;
        writeln!(out, "{:.3}: {}", v, marker.repeat(bar))?;
    }
    Ok(())
}
