use rgbd_pipeline::image_pipeline::{
    align_depth_to_other, compute_rectification_table, plane_size, DistortionModel, Extrinsics,
    FourCc, FramePipeline, Intrinsics, PipelineConfig, PixelFormat, StreamMode, SubdeviceMode,
    ThermalCalibrationTable,
};
use rgbd_pipeline::logger;

use tracing::info;

const WIDTH: usize = 64;
const HEIGHT: usize = 48;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logger::init();

    info!("starting rgbd-pipeline demo");

    // Decode a synthetic YUY2 frame into RGB8.
    let mode = SubdeviceMode {
        width: WIDTH,
        height: HEIGHT,
        fourcc: FourCc::Yuy2,
        streams: vec![StreamMode {
            width: WIDTH,
            height: HEIGHT,
            format: PixelFormat::Rgb8,
        }],
    };
    let source: Vec<u8> = (0..WIDTH / 2 * HEIGHT)
        .flat_map(|i| [(i % 220) as u8 + 16, 128, (i % 220) as u8 + 16, 128])
        .collect();
    let mut rgb = vec![0u8; plane_size(WIDTH, HEIGHT, PixelFormat::Rgb8)?];

    let pipeline = FramePipeline::new(PipelineConfig::default());
    let timings = pipeline.decode_with_timings(&source, &mode, &mut [&mut rgb])?;
    info!(
        total_us = timings.total_duration().as_micros() as u64,
        "decoded YUY2 -> RGB8"
    );

    // Align a flat synthetic depth image into a slightly translated color
    // camera, with the depth scale corrected by a thermal table.
    let depth_intrin = Intrinsics {
        width: WIDTH,
        height: HEIGHT,
        ppx: WIDTH as f32 / 2.0,
        ppy: HEIGHT as f32 / 2.0,
        fx: 60.0,
        fy: 60.0,
        model: DistortionModel::None,
        coeffs: [0.0; 5],
    };
    let color_intrin = depth_intrin;
    let depth_to_color = Extrinsics::from_column_major(
        [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
        [0.025, 0.0, 0.0],
    );

    let thermal = ThermalCalibrationTable::parse(&synthetic_thermal_blob())?;
    let depth_scale = 0.001 * thermal.scale_at(42.0);
    info!(depth_scale, "thermal-corrected depth scale");

    let depth = vec![1000u16; WIDTH * HEIGHT];
    let mut aligned = vec![0u16; WIDTH * HEIGHT];
    align_depth_to_other(
        &mut aligned,
        &depth,
        depth_scale,
        &depth_intrin,
        &depth_to_color,
        &color_intrin,
    );
    let covered = aligned.iter().filter(|&&d| d != 0).count();
    info!(
        covered,
        total = aligned.len(),
        "aligned depth into the color frame"
    );

    // A rectification table for the same pair, reusable across frames.
    let table = compute_rectification_table(&color_intrin, &depth_to_color, &depth_intrin);
    info!(entries = table.len(), "rectification table ready");

    Ok(())
}

fn synthetic_thermal_blob() -> Vec<u8> {
    let mut blob = Vec::with_capacity(ThermalCalibrationTable::WIRE_SIZE);
    for header_field in [15.0f32, 73.0, 35.0, 1.0] {
        blob.extend_from_slice(&header_field.to_le_bytes());
    }
    for bin in 0..ThermalCalibrationTable::RESOLUTION {
        let scale = 1.0 + bin as f32 * 0.001;
        for field in [scale, 0.0, 0.0, 0.0] {
            blob.extend_from_slice(&field.to_le_bytes());
        }
    }
    blob
}
