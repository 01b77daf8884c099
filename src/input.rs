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

use std::io::{BufRead, Read};

use log::{debug, trace};

use crate::model::{ReverbError, ReverbResult};
use crate::numeric::{check_decimal, check_integer, parse_decimal, parse_integer, TokenFault};
use crate::sample::{Sample, SAMPLE_MAX_SIZE};

/// Longest accepted input line in bytes, terminator included.
pub const LINE_MAX_SIZE: usize = 1024;

pub const INPUT_DELIMS: [char; 4] = [' ', '\t', '\r', '\n'];

/// A sample as read from one input line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IngestedSample<const N: usize = SAMPLE_MAX_SIZE> {
    pub sample: Sample<N>,
    /// Tokens seen on the line.
    pub tokens: usize,
}

/// Line-oriented reader for the experiment input.
pub struct InputContext<R: BufRead> {
    reader: R,
    lines_read: usize,
}

impl<R: BufRead> InputContext<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            lines_read: 0,
        }
    }

    pub fn lines_read(&self) -> usize {
        self.lines_read
    }

    /// Read one line, terminator included. Fails on end of input and on
    /// lines longer than [`LINE_MAX_SIZE`]. At most one byte past the limit
    /// is consumed from the reader.
    fn read_line(&mut self) -> ReverbResult<String> {
        let mut line = String::new();
        let read = (&mut self.reader)
            .take(LINE_MAX_SIZE as u64 + 1)
            .read_line(&mut line)?;
        if read == 0 {
            return Err(ReverbError::Input(format!(
                "end of input before line {}",
                self.lines_read + 1
            )));
        }
        if read > LINE_MAX_SIZE {
            return Err(ReverbError::Input(format!(
                "line {} is {} bytes, limit is {}",
                self.lines_read + 1,
                read,
                LINE_MAX_SIZE
            )));
        }
        self.lines_read += 1;
        trace!("Line {}: {:?}", self.lines_read, line);
        Ok(line)
    }

    /// Read a line of whitespace separated decimals into a fresh sample.
    pub fn ingest_sample<const N: usize>(&mut self) -> ReverbResult<IngestedSample<N>> {
        let line = self.read_line()?;
        let mut sample = Sample::<N>::new();
        let mut tokens = 0;

        for token in line.split(INPUT_DELIMS).filter(|t| !t.is_empty()) {
            tokens += 1;
            if sample.len() >= N {
                debug!("Token {} exceeds sample capacity {}", tokens, N);
                return Err(ReverbError::CapacityExceeded { capacity: N });
            }
            if let Err(fault) = check_decimal(token) {
                debug!("Rejected sample token {:?}: {}", token, fault);
                return Err(ReverbError::invalid_number(token, fault));
            }
            sample.push(parse_decimal(token))?;
        }

        debug!("Ingested {} sample values", tokens);
        Ok(IngestedSample { sample, tokens })
    }

    /// Read the room count line. Only the line feed is stripped.
    pub fn ingest_room_count(&mut self) -> ReverbResult<u32> {
        let line = self.read_line()?;
        let token = line.strip_suffix('\n').unwrap_or(&line);

        if let Err(fault) = check_integer(token) {
            debug!("Rejected room count {:?}: {}", token, fault);
            return Err(ReverbError::invalid_number(token, fault));
        }
        let rooms = parse_integer(token)
            .ok_or_else(|| ReverbError::invalid_number(token, TokenFault::Overflow))?;

        debug!("Room count: {}", rooms);
        Ok(rooms)
    }
}
