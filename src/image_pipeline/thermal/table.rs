use crate::image_pipeline::common::error::{PipelineError, Result};

/// Header of the thermal calibration table.
///
/// `reference_temp` and `valid` are carried through parse and serialise
/// but not consumed by the pipeline.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableHeader {
    pub min_temp: f32,
    pub max_temp: f32,
    pub reference_temp: f32,
    pub valid: f32,
}

/// Transformation parameters for the centre of one temperature bin.
///
/// `sheer`, `tx` and `ty` affect an offset correction the pipeline does
/// not apply; only `scale` feeds the depth-scale correction.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TempData {
    pub scale: f32,
    pub sheer: f32,
    pub tx: f32,
    pub ty: f32,
}

/// The 0x317 thermal calibration table: 29 equally spaced temperature bins
/// between `min_temp` and `max_temp`, with a parameter set at the centre
/// of each bin.
///
/// The on-wire layout is byte-packed little-endian f32 throughout; parse
/// and serialise convert explicitly, so a big-endian host still reads and
/// writes the same bytes.
#[derive(Debug, Clone)]
pub struct ThermalCalibrationTable {
    pub header: TableHeader,
    pub vals: Vec<TempData>,
}

fn take_f32(data: &mut &[u8]) -> f32 {
    let (bytes, rest) = data.split_at(4);
    *data = rest;
    f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

fn push_f32(out: &mut Vec<u8>, v: f32) {
    out.extend_from_slice(&v.to_le_bytes());
}

impl ThermalCalibrationTable {
    /// Identifier of the containing calibration record.
    pub const ID: u16 = 0x317;
    /// Number of temperature bins.
    pub const RESOLUTION: usize = 29;

    const HEADER_SIZE: usize = 4 * 4;
    const ENTRY_SIZE: usize = 4 * 4;
    /// Exact byte length of a serialised table.
    pub const WIRE_SIZE: usize = Self::HEADER_SIZE + Self::RESOLUTION * Self::ENTRY_SIZE;

    /// Parse a raw table blob. The payload length is fixed; anything else
    /// is malformed.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() != Self::WIRE_SIZE {
            return Err(PipelineError::MalformedTable {
                expected: Self::WIRE_SIZE,
                actual: data.len(),
            });
        }

        let mut cursor = data;
        let header = TableHeader {
            min_temp: take_f32(&mut cursor),
            max_temp: take_f32(&mut cursor),
            reference_temp: take_f32(&mut cursor),
            valid: take_f32(&mut cursor),
        };
        if !(header.min_temp < header.max_temp) {
            return Err(PipelineError::BadGeometry(format!(
                "thermal table temperature range [{}, {}] is empty",
                header.min_temp, header.max_temp
            )));
        }

        let mut vals = Vec::with_capacity(Self::RESOLUTION);
        for _ in 0..Self::RESOLUTION {
            vals.push(TempData {
                scale: take_f32(&mut cursor),
                sheer: take_f32(&mut cursor),
                tx: take_f32(&mut cursor),
                ty: take_f32(&mut cursor),
            });
        }
        Ok(Self { header, vals })
    }

    /// The depth-scale correction factor at temperature `temp`, clamped
    /// flat outside the first and last bin centres and linearly
    /// interpolated between them.
    pub fn scale_at(&self, temp: f32) -> f32 {
        let bin_width = (self.header.max_temp - self.header.min_temp) / Self::RESOLUTION as f32;
        let first_center = self.header.min_temp + 0.5 * bin_width;
        let last_center = first_center + (Self::RESOLUTION - 1) as f32 * bin_width;

        if temp <= first_center {
            return self.vals[0].scale;
        }
        if temp >= last_center {
            return self.vals[Self::RESOLUTION - 1].scale;
        }

        let pos = (temp - first_center) / bin_width;
        let bin = pos.floor() as usize;
        let frac = pos - bin as f32;
        self.vals[bin].scale + frac * (self.vals[bin + 1].scale - self.vals[bin].scale)
    }

    /// Serialise to the exact parsed byte layout; the round trip is
    /// byte-identical.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::WIRE_SIZE);
        push_f32(&mut out, self.header.min_temp);
        push_f32(&mut out, self.header.max_temp);
        push_f32(&mut out, self.header.reference_temp);
        push_f32(&mut out, self.header.valid);
        for val in &self.vals {
            push_f32(&mut out, val.scale);
            push_f32(&mut out, val.sheer);
            push_f32(&mut out, val.tx);
            push_f32(&mut out, val.ty);
        }
        out
    }
}

// Equality is bitwise per field so that tables survive a parse/serialise
// round trip unchanged even in the presence of NaN payloads.
impl PartialEq for ThermalCalibrationTable {
    fn eq(&self, other: &Self) -> bool {
        if self.vals.len() != other.vals.len() {
            return false;
        }
        let header_eq = self.header.min_temp.to_bits() == other.header.min_temp.to_bits()
            && self.header.max_temp.to_bits() == other.header.max_temp.to_bits()
            && self.header.reference_temp.to_bits() == other.header.reference_temp.to_bits()
            && self.header.valid.to_bits() == other.header.valid.to_bits();
        header_eq
            && self.vals.iter().zip(&other.vals).all(|(a, b)| {
                a.scale.to_bits() == b.scale.to_bits()
                    && a.sheer.to_bits() == b.sheer.to_bits()
                    && a.tx.to_bits() == b.tx.to_bits()
                    && a.ty.to_bits() == b.ty.to_bits()
            })
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn test_table() -> ThermalCalibrationTable {
        // bin_width = 2, centres at 1, 3, 5, ..., 57.
        let header = TableHeader {
            min_temp: 0.0,
            max_temp: 58.0,
            reference_temp: 35.0,
            valid: 1.0,
        };
        let vals = (0..ThermalCalibrationTable::RESOLUTION)
            .map(|k| TempData {
                scale: (k + 1) as f32,
                sheer: 0.0,
                tx: 0.1 * k as f32,
                ty: -0.1 * k as f32,
            })
            .collect();
        ThermalCalibrationTable { header, vals }
    }

    #[test]
    fn parse_rejects_wrong_length() {
        let err = ThermalCalibrationTable::parse(&[0u8; 100]).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::MalformedTable {
                expected: 480,
                actual: 100
            }
        ));
    }

    #[test]
    fn parse_rejects_empty_temperature_range() {
        let mut table = test_table();
        table.header.max_temp = table.header.min_temp;
        let err = ThermalCalibrationTable::parse(&table.to_bytes()).unwrap_err();
        assert!(matches!(err, PipelineError::BadGeometry(_)));
    }

    #[test]
    fn byte_roundtrip_is_identical() {
        let table = test_table();
        let bytes = table.to_bytes();
        assert_eq!(bytes.len(), ThermalCalibrationTable::WIRE_SIZE);
        let reparsed = ThermalCalibrationTable::parse(&bytes).unwrap();
        assert_eq!(reparsed, table);
        assert_eq!(reparsed.to_bytes(), bytes);
    }

    #[test]
    fn scale_clamps_outside_the_bin_centres() {
        let table = test_table();
        assert_relative_eq!(table.scale_at(-10.0), 1.0);
        assert_relative_eq!(table.scale_at(0.5), 1.0);
        assert_relative_eq!(table.scale_at(1.0), 1.0);
        assert_relative_eq!(table.scale_at(57.0), 29.0);
        assert_relative_eq!(table.scale_at(100.0), 29.0);
    }

    #[test]
    fn scale_interpolates_between_centres() {
        let table = test_table();
        // Centres at 1 and 3 carry scales 1.0 and 2.0.
        assert_relative_eq!(table.scale_at(2.0), 1.5);
        assert_relative_eq!(table.scale_at(3.0), 2.0);
        assert_relative_eq!(table.scale_at(4.0), 2.5);
    }

    #[test]
    fn scale_hits_every_bin_centre_exactly() {
        let table = test_table();
        let bin_width = 2.0;
        for (k, val) in table.vals.iter().enumerate() {
            let center = 1.0 + k as f32 * bin_width;
            assert_relative_eq!(table.scale_at(center), val.scale, epsilon = 1e-4);
        }
    }

    #[test]
    fn equality_is_bitwise() {
        let a = test_table();
        let mut b = a.clone();
        assert_eq!(a, b);
        b.vals[7].tx += 1e-3;
        assert_ne!(a, b);
    }
}
