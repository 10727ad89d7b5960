mod params;
mod results;
mod samples;

pub use params::{
    DEFAULT_DRIFT, DEFAULT_HORIZON_MONTHS, DEFAULT_VOLATILITY, DRIFT_RANGE, HORIZON_RANGE,
    MAX_HORIZON_MONTHS, MONTHS_PER_YEAR, SimulationParameters, VOLATILITY_RANGE,
};
pub use results::{BASE_VALUE, SimulatedPath, SimulationOutcome, SummaryStatistics};
pub use samples::{SampleSequence, SampleSnapshot};
