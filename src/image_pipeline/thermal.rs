//! The RGB thermal calibration table: a factory-burned mapping from
//! housing temperature to a depth-scale correction factor.

mod table;

pub use table::{TableHeader, TempData, ThermalCalibrationTable};
