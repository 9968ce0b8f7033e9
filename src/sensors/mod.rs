mod potentiometer;
mod synthetic;
mod thermistor;

pub use {potentiometer::*, synthetic::*, thermistor::*};

use crate::gpio::AnalogInError;

/// Producer of CSV rows for the log writer. A source either measures live
/// (and must be paced at the sampling period) or replays canned data.
pub trait SampleSource {
    /// Row written once, when the target file is still empty
    fn header(&self) -> Option<&str>;

    /// Builds row number `index`, without the line terminator.
    ///
    /// # Errors
    ///
    /// - `AnalogInError`: If the underlying measurement failed
    fn next_row(&mut self, index: usize) -> Result<String, AnalogInError>;

    /// Whether the writer must wait the sampling period between rows
    fn is_paced(&self) -> bool;
}
