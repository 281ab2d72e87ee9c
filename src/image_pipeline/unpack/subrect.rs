use crate::image_pipeline::format::types::SubdeviceMode;

/// Row-wise copy for formats whose input and output pixel layouts are
/// identical: Z16/INVR/INVZ depth, Y8/INVI infrared, passthrough Y16, and
/// YUY2 delivered as YUYV.
///
/// Copies `min(in_stride, out_stride)` bytes per row over
/// `min(in_height, out_height)` rows. The mode validator rejects output
/// streams wider or taller than the input, so the `min` only ever trims
/// the device's extra right/bottom margin.
pub fn unpack_subrect(dest: &mut [&mut [u8]], source: &[u8], mode: &SubdeviceMode) {
    debug_assert_eq!(mode.streams.len(), 1);
    let stream = &mode.streams[0];
    let mp = mode.fourcc.macropixel();
    let in_stride = mode.width / mp.width * mp.bytes;
    let out_stride = stream.width * stream.format.bytes_per_pixel();
    let copy = in_stride.min(out_stride);
    let rows = mode.height.min(stream.height);
    let out = &mut *dest[0];
    for y in 0..rows {
        out[y * out_stride..][..copy].copy_from_slice(&source[y * in_stride..][..copy]);
    }
}
