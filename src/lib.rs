//! Room reverberation toy: a drum sample is convolved with a room response
//! once per room and the result is drawn as a text histogram.

pub mod color_logger;
pub mod convolve;
pub mod histogram;
pub mod input;
pub mod model;
pub mod numeric;
pub mod reverb_context;
pub mod sample;

pub use color_logger::ColorLogger;
pub use convolve::{convolve, AffineConvolver};
pub use histogram::{render, round_max, HistogramStyle};
pub use input::{IngestedSample, InputContext, LINE_MAX_SIZE};
pub use model::{ReverbError, ReverbResult, TermResult, GENERIC_ERROR_MARKER};
pub use numeric::{
    check_decimal, check_integer, is_valid_decimal, is_valid_integer, parse_decimal,
    parse_integer, TokenFault,
};
pub use reverb_context::{Experiment, ReverbContext};
pub use sample::{normalize, Sample, EPSILON, SAMPLE_MAX_SIZE};
