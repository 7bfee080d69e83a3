pub mod timeseries;
pub mod util;
