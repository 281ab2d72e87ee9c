use crate::image_pipeline::format::types::{FourCc, PixelFormat, SubdeviceMode};

// BT.601 fixed-point YUV -> RGB. Inputs are pre-biased (y - 16, u - 128,
// v - 128); outputs clamp to a byte.

#[inline]
fn clamp_byte(v: i32) -> u8 {
    v.clamp(0, 255) as u8
}

#[inline]
fn yuv_to_r(y: i32, v: i32) -> u8 {
    clamp_byte((128 + 298 * y + 409 * v) >> 8)
}

#[inline]
fn yuv_to_g(y: i32, u: i32, v: i32) -> u8 {
    clamp_byte((128 + 298 * y - 100 * u - 208 * v) >> 8)
}

#[inline]
fn yuv_to_b(y: i32, u: i32) -> u8 {
    clamp_byte((128 + 298 * y + 516 * u) >> 8)
}

/// Walk the YUY2 macropixels of the requested sub-rect and emit two output
/// pixels per macropixel, in whatever channel order `pack` chooses.
fn unpack_from_yuy2<const N: usize, F>(
    dest: &mut [&mut [u8]],
    source: &[u8],
    mode: &SubdeviceMode,
    format: PixelFormat,
    pack: F,
) where
    F: Fn(u8, u8, u8) -> [u8; N],
{
    debug_assert_eq!(mode.fourcc, FourCc::Yuy2);
    debug_assert_eq!(mode.streams.len(), 1);
    let stream = &mode.streams[0];
    debug_assert_eq!(stream.format, format);
    debug_assert!(stream.width <= mode.width && stream.height <= mode.height);
    debug_assert_eq!(stream.width % 2, 0);

    let out = &mut *dest[0];
    let in_stride = mode.width / 2 * 4;
    let used = stream.width / 2 * 4;
    let out_stride = stream.width * N;
    for y in 0..stream.height {
        let in_row = &source[y * in_stride..][..used];
        let out_row = &mut out[y * out_stride..][..out_stride];
        for (mp, px) in in_row.chunks_exact(4).zip(out_row.chunks_exact_mut(2 * N)) {
            let u = i32::from(mp[1]) - 128;
            let v = i32::from(mp[3]) - 128;
            for (i, &y_raw) in [mp[0], mp[2]].iter().enumerate() {
                let y_biased = i32::from(y_raw) - 16;
                let r = yuv_to_r(y_biased, v);
                let g = yuv_to_g(y_biased, u, v);
                let b = yuv_to_b(y_biased, u);
                px[i * N..][..N].copy_from_slice(&pack(r, g, b));
            }
        }
    }
}

pub fn unpack_rgb_from_yuy2(dest: &mut [&mut [u8]], source: &[u8], mode: &SubdeviceMode) {
    unpack_from_yuy2(dest, source, mode, PixelFormat::Rgb8, |r, g, b| [r, g, b]);
}

pub fn unpack_bgr_from_yuy2(dest: &mut [&mut [u8]], source: &[u8], mode: &SubdeviceMode) {
    unpack_from_yuy2(dest, source, mode, PixelFormat::Bgr8, |r, g, b| [b, g, r]);
}

pub fn unpack_rgba_from_yuy2(dest: &mut [&mut [u8]], source: &[u8], mode: &SubdeviceMode) {
    unpack_from_yuy2(dest, source, mode, PixelFormat::Rgba8, |r, g, b| {
        [r, g, b, 255]
    });
}

pub fn unpack_bgra_from_yuy2(dest: &mut [&mut [u8]], source: &[u8], mode: &SubdeviceMode) {
    unpack_from_yuy2(dest, source, mode, PixelFormat::Bgra8, |r, g, b| {
        [b, g, r, 255]
    });
}
