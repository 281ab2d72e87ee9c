use crate::image_pipeline::format::types::{FourCc, PixelFormat, SubdeviceMode};

/// Expand 8-bit luma to 16 bits by bit replication, so that full scale
/// maps to full scale.
pub fn unpack_y16_from_y8(dest: &mut [&mut [u8]], source: &[u8], mode: &SubdeviceMode) {
    debug_assert_eq!(mode.fourcc, FourCc::Y8);
    debug_assert_eq!(mode.streams.len(), 1);
    let stream = &mode.streams[0];
    debug_assert_eq!(stream.format, PixelFormat::Y16);
    debug_assert!(stream.width <= mode.width && stream.height <= mode.height);

    let out = &mut *dest[0];
    let out_stride = stream.width * 2;
    for y in 0..stream.height {
        let in_row = &source[y * mode.width..][..stream.width];
        let out_row = &mut out[y * out_stride..][..out_stride];
        for (px, &p) in out_row.chunks_exact_mut(2).zip(in_row) {
            let v = u16::from(p) << 8 | u16::from(p);
            px.copy_from_slice(&v.to_le_bytes());
        }
    }
}

/// Expand 10-bit samples carried in 16-bit words to the full 16-bit range
/// by zero-filling the low bits.
pub fn unpack_y16_from_y16_10(dest: &mut [&mut [u8]], source: &[u8], mode: &SubdeviceMode) {
    debug_assert_eq!(mode.fourcc, FourCc::Y16);
    debug_assert_eq!(mode.streams.len(), 1);
    let stream = &mode.streams[0];
    debug_assert_eq!(stream.format, PixelFormat::Y16);
    debug_assert!(stream.width <= mode.width && stream.height <= mode.height);

    let out = &mut *dest[0];
    let in_stride = mode.width * 2;
    let out_stride = stream.width * 2;
    for y in 0..stream.height {
        let in_row = &source[y * in_stride..][..out_stride];
        let out_row = &mut out[y * out_stride..][..out_stride];
        for (px, sample) in out_row.chunks_exact_mut(2).zip(in_row.chunks_exact(2)) {
            let v = u16::from_le_bytes([sample[0], sample[1]]) << 6;
            px.copy_from_slice(&v.to_le_bytes());
        }
    }
}
