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

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use drumverb::histogram::{DEFAULT_MARKER, DEFAULT_WIDTH};
use drumverb::{ColorLogger, HistogramStyle, ReverbContext, ReverbError, ReverbResult, TermResult};
use log::{debug, trace};

#[derive(Parser)]
#[command(name = "drumverb", version)]
struct Cli {
    /// Marker character used to draw histogram bars
    #[arg(short = 'm', long = "marker", default_value_t = DEFAULT_MARKER)]
    marker: char,

    /// Bar length of the largest histogram value
    #[arg(short = 'w', long = "width", default_value_t = DEFAULT_WIDTH)]
    width: u32,

    /// Print diagnostic messages
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// Quiet mode: suppress all log output
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,

    /// Input file with three lines: drum sample, room response sample
    /// and room count (use - for stdin)
    #[arg(value_name = "INPUT", default_value = "-")]
    input: PathBuf,
}

fn main() -> TermResult {
    TermResult(run())
}

fn run() -> ReverbResult<()> {
    let cli = Cli::parse();
    ColorLogger::new(cli.quiet, cli.verbose).init()?;

    let style = HistogramStyle {
        marker: cli.marker,
        width: cli.width,
    };
    trace!("Histogram style: {:?}", style);

    let reader: Box<dyn BufRead> = if cli.input == PathBuf::from("-") {
        debug!("Reading from stdin");
        Box::new(io::stdin().lock())
    } else {
        debug!("Reading from {}", cli.input.display());
        let file = File::open(&cli.input).map_err(|e| {
            ReverbError::Input(format!("{}: {}", cli.input.display(), e))
        })?;
        Box::new(BufReader::new(file))
    };

    let start = Instant::now();
    let mut ctx = ReverbContext::new(reader, style);
    ctx.do_run(&mut io::stdout().lock())?;
    debug!("Finished in {:.3} ms", start.elapsed().as_secs_f64() * 1000.0);

    Ok(())
}
