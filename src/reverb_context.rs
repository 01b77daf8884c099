use std::io::{BufRead, Write};

use log::debug;

use crate::convolve::convolve;
use crate::histogram::{render, HistogramStyle};
use crate::input::{IngestedSample, InputContext};
use crate::model::{ReverbError, ReverbResult};
use crate::sample::Sample;

/// Everything read from the input, after the cross-sample check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Experiment {
    pub drum: IngestedSample,
    pub amplitude: IngestedSample,
    pub rooms: u32,
}

impl Experiment {
    /// Center and normalize both samples, then convolve the drum with the
    /// room response once per room.
    pub fn simulate(&self) -> Sample {
        let mut drum = self.drum.sample;
        let mut amplitude = self.amplitude.sample;

        drum.centralize();
        amplitude.centralize();
        drum.normalize();
        amplitude.normalize();

        convolve(&drum, &amplitude, self.rooms)
    }
}

pub struct ReverbContext<R: BufRead> {
    input: InputContext<R>,
    style: HistogramStyle,
}

impl<R: BufRead> ReverbContext<R> {
    pub fn new(reader: R, style: HistogramStyle) -> Self {
        Self {
            input: InputContext::new(reader),
            style,
        }
    }

    /// Read drum, amplitude and room count lines. The amplitude sample may
    /// not carry more tokens than the drum sample; that is checked before
    /// the room count line is read.
    pub fn read_experiment(&mut self) -> ReverbResult<Experiment> {
        let drum: IngestedSample = self.input.ingest_sample()?;
        let amplitude: IngestedSample = self.input.ingest_sample()?;

        if drum.tokens < amplitude.tokens {
            return Err(ReverbError::SampleLengthMismatch {
                drum: drum.tokens,
                amplitude: amplitude.tokens,
            });
        }

        let rooms = self.input.ingest_room_count()?;
        debug!(
            "Drum: {} values, amplitude: {} values, rooms: {}",
            drum.tokens, amplitude.tokens, rooms
        );

        Ok(Experiment {
            drum,
            amplitude,
            rooms,
        })
    }

    /// Read, simulate and print the histogram to `out`. The histogram is
    /// built in memory first, so a failed run writes nothing.
    pub fn do_run<W: Write>(&mut self, out: &mut W) -> ReverbResult<()> {
        let experiment = self.read_experiment()?;
        let mut result = experiment.simulate();

        let mut rendered = Vec::new();
        render(result.as_mut_slice(), self.style, &mut rendered).map_err(output_error)?;
        if rendered.is_empty() {
            debug!("Result is silent, no histogram drawn");
        }

        out.write_all(&rendered).map_err(output_error)?;
        out.flush().map_err(output_error)
    }
}

fn output_error(err: std::io::Error) -> ReverbError {
    ReverbError::Output(err.to_string())
}
