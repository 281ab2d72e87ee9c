use crate::image_pipeline::format::types::{FourCc, PixelFormat, SubdeviceMode};

/// Walk the pixels of a 2-in-1 frame and route each through `split_a` and
/// `split_b` into the two output planes.
fn split_frame<const IN: usize, const A: usize, const B: usize, F, G>(
    dest: &mut [&mut [u8]],
    source: &[u8],
    mode: &SubdeviceMode,
    split_a: F,
    split_b: G,
) where
    F: Fn([u8; IN]) -> [u8; A],
    G: Fn([u8; IN]) -> [u8; B],
{
    debug_assert_eq!(mode.streams.len(), 2);
    let stream = &mode.streams[0];
    debug_assert_eq!(
        (stream.width, stream.height),
        (mode.streams[1].width, mode.streams[1].height)
    );
    debug_assert!(stream.width <= mode.width && stream.height <= mode.height);

    let (head, tail) = dest.split_at_mut(1);
    let a = &mut *head[0];
    let b = &mut *tail[0];
    for y in 0..stream.height {
        let in_row = &source[y * mode.width * IN..][..stream.width * IN];
        for (x, px) in in_row.chunks_exact(IN).enumerate() {
            let mut p = [0u8; IN];
            p.copy_from_slice(px);
            a[(y * stream.width + x) * A..][..A].copy_from_slice(&split_a(p));
            b[(y * stream.width + x) * B..][..B].copy_from_slice(&split_b(p));
        }
    }
}

/// Y8I: each 2-byte pixel is a left/right luma pair.
pub fn unpack_y8_y8_from_y8i(dest: &mut [&mut [u8]], source: &[u8], mode: &SubdeviceMode) {
    debug_assert_eq!(mode.fourcc, FourCc::Y8i);
    debug_assert_eq!(mode.streams[0].format, PixelFormat::Y8);
    debug_assert_eq!(mode.streams[1].format, PixelFormat::Y8);
    split_frame(
        dest,
        source,
        mode,
        |p: [u8; 2]| [p[0]],
        |p: [u8; 2]| [p[1]],
    );
}

// 10-bit to 16-bit: multiply by 64 1/16 to efficiently approximate
// 65535/1023, so full scale maps to full scale.
#[inline]
fn expand10(v: u16) -> u16 {
    v << 6 | v >> 4
}

/// Y12I: each 3-byte pixel packs two 10-bit samples as the bit-fields
/// `rl:8, rh:4, ll:4, lh:8` (LSB-first), i.e. `right = (b1 & 0xf) << 8 | b0`
/// and `left = b2 << 4 | b1 >> 4`.
pub fn unpack_y16_y16_from_y12i(dest: &mut [&mut [u8]], source: &[u8], mode: &SubdeviceMode) {
    debug_assert_eq!(mode.fourcc, FourCc::Y12i);
    debug_assert_eq!(mode.streams[0].format, PixelFormat::Y16);
    debug_assert_eq!(mode.streams[1].format, PixelFormat::Y16);
    split_frame(
        dest,
        source,
        mode,
        |p: [u8; 3]| {
            let left = u16::from(p[2]) << 4 | u16::from(p[1]) >> 4;
            expand10(left).to_le_bytes()
        },
        |p: [u8; 3]| {
            let right = u16::from(p[1] & 0x0f) << 8 | u16::from(p[0]);
            expand10(right).to_le_bytes()
        },
    );
}

/// INRI: each 3-byte pixel is 16-bit depth followed by 8-bit infrared.
pub fn unpack_z16_y8_from_inri(dest: &mut [&mut [u8]], source: &[u8], mode: &SubdeviceMode) {
    debug_assert_eq!(mode.fourcc, FourCc::Inri);
    debug_assert_eq!(mode.streams[0].format, PixelFormat::Z16);
    debug_assert_eq!(mode.streams[1].format, PixelFormat::Y8);
    split_frame(
        dest,
        source,
        mode,
        |p: [u8; 3]| [p[0], p[1]],
        |p: [u8; 3]| [p[2]],
    );
}

/// INRI with the infrared plane widened to 16 bits by bit replication.
pub fn unpack_z16_y16_from_inri(dest: &mut [&mut [u8]], source: &[u8], mode: &SubdeviceMode) {
    debug_assert_eq!(mode.fourcc, FourCc::Inri);
    debug_assert_eq!(mode.streams[0].format, PixelFormat::Z16);
    debug_assert_eq!(mode.streams[1].format, PixelFormat::Y16);
    split_frame(
        dest,
        source,
        mode,
        |p: [u8; 3]| [p[0], p[1]],
        |p: [u8; 3]| {
            let ir = u16::from(p[2]) << 8 | u16::from(p[2]);
            ir.to_le_bytes()
        },
    );
}
