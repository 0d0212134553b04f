//! Weekly calorie chart

use image::{DynamicImage, ImageFormat, RgbImage};

use super::summary::DayCalories;

pub const DEFAULT_CHART_WIDTH: u32 = 800;
pub const DEFAULT_CHART_HEIGHT: u32 = 400;
pub const MAX_CHART_SIDE: u32 = 2000;

const BAR_COLOR: (u8, u8, u8) = (46, 139, 87);

/// Render the 7-day calorie series as a PNG bar chart
pub fn render_weekly_chart(series: &[DayCalories], width: u32, height: u32) -> Result<Vec<u8>, String> {
    use plotters::prelude::*;

    if series.is_empty() {
        return Err("No data to chart".to_string());
    }
    if width == 0 || height == 0 {
        return Err("Chart dimensions must be non-zero".to_string());
    }
    if width > MAX_CHART_SIDE || height > MAX_CHART_SIDE {
        return Err(format!(
            "Chart size {}x{} exceeds the {}px limit",
            width, height, MAX_CHART_SIDE
        ));
    }

    let mut buffer = vec![0u8; width as usize * height as usize * 3];

    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height))
            .into_drawing_area();
        root.fill(&WHITE).map_err(|e| e.to_string())?;

        let days = series.len() as u32;
        let peak = series.iter().map(|d| d.calories).max().unwrap_or(0).max(500);
        let y_max = peak.saturating_add(peak / 10);

        let mut chart = ChartBuilder::on(&root)
            .caption("Calories - last 7 days", ("sans-serif", 20))
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d((0..days).into_segmented(), 0..y_max)
            .map_err(|e| e.to_string())?;

        chart.configure_mesh()
            .disable_x_mesh()
            .x_labels(series.len())
            .x_label_formatter(&|x| match x {
                SegmentValue::CenterOf(i) => series
                    .get(*i as usize)
                    .map(|d| d.date.format("%a %d").to_string())
                    .unwrap_or_default(),
                _ => String::new(),
            })
            .y_desc("kcal")
            .draw()
            .map_err(|e| e.to_string())?;

        let (r, g, b) = BAR_COLOR;
        chart.draw_series(
            Histogram::vertical(&chart)
                .style(RGBColor(r, g, b).filled())
                .margin(12)
                .data(series.iter().enumerate().map(|(i, d)| (i as u32, d.calories))),
        ).map_err(|e| e.to_string())?;

        root.present().map_err(|e| e.to_string())?;
    }

    // Convert RGB buffer to PNG
    let img = RgbImage::from_raw(width, height, buffer)
        .ok_or("Failed to create image from buffer")?;

    let mut png_bytes = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut std::io::Cursor::new(&mut png_bytes), ImageFormat::Png)
        .map_err(|e| e.to_string())?;

    Ok(png_bytes)
}
