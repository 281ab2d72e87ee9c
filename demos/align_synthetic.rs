//! Decode a synthetic INRI frame, then align its depth plane into a
//! translated color camera and back.
//!
//! Run with `cargo run --example align_synthetic`.

use rgbd_pipeline::image_pipeline::{
    align_depth_to_other, align_other_to_depth, DistortionModel, Extrinsics, FourCc,
    FramePipeline, Intrinsics, PipelineConfig, PixelFormat, StreamMode, SubdeviceMode,
};

const WIDTH: usize = 160;
const HEIGHT: usize = 120;

fn main() -> anyhow::Result<()> {
    // An INRI frame: 16-bit depth plus 8-bit infrared in 3 bytes per pixel.
    // The depth ramps from 0.5 m to 2 m across the image.
    let mut source = Vec::with_capacity(WIDTH * HEIGHT * 3);
    for i in 0..WIDTH * HEIGHT {
        let depth_mm = 500 + (i * 1500 / (WIDTH * HEIGHT)) as u16;
        source.extend_from_slice(&depth_mm.to_le_bytes());
        source.push((i % 256) as u8);
    }

    let mode = SubdeviceMode {
        width: WIDTH,
        height: HEIGHT,
        fourcc: FourCc::Inri,
        streams: vec![
            StreamMode {
                width: WIDTH,
                height: HEIGHT,
                format: PixelFormat::Z16,
            },
            StreamMode {
                width: WIDTH,
                height: HEIGHT,
                format: PixelFormat::Y8,
            },
        ],
    };

    let pipeline = FramePipeline::new(PipelineConfig::default());
    let mut depth_plane = vec![0u8; WIDTH * HEIGHT * 2];
    let mut ir_plane = vec![0u8; WIDTH * HEIGHT];
    pipeline.decode(&source, &mode, &mut [&mut depth_plane, &mut ir_plane])?;

    let depth: Vec<u16> = depth_plane
        .chunks_exact(2)
        .map(|c| u16::from_le_bytes([c[0], c[1]]))
        .collect();

    let depth_intrin = Intrinsics {
        width: WIDTH,
        height: HEIGHT,
        ppx: WIDTH as f32 / 2.0,
        ppy: HEIGHT as f32 / 2.0,
        fx: 140.0,
        fy: 140.0,
        model: DistortionModel::None,
        coeffs: [0.0; 5],
    };
    let color_intrin = depth_intrin;
    let depth_to_color = Extrinsics::from_column_major(
        [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
        [0.03, 0.0, 0.0],
    );

    let mut aligned_depth = vec![0u16; WIDTH * HEIGHT];
    align_depth_to_other(
        &mut aligned_depth,
        &depth,
        0.001,
        &depth_intrin,
        &depth_to_color,
        &color_intrin,
    );
    let covered = aligned_depth.iter().filter(|&&d| d != 0).count();
    println!(
        "depth -> color: {covered}/{} pixels covered",
        aligned_depth.len()
    );

    // Bring the infrared plane into the depth camera's grid.
    let mut aligned_ir = vec![0u8; WIDTH * HEIGHT];
    align_other_to_depth(
        &mut aligned_ir,
        &ir_plane,
        PixelFormat::Y8,
        &depth,
        0.001,
        &depth_intrin,
        &depth_to_color,
        &color_intrin,
    )?;
    let filled = aligned_ir.iter().filter(|&&v| v != 0).count();
    println!("color -> depth: {filled}/{} pixels filled", aligned_ir.len());

    Ok(())
}
