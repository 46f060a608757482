//! SVG charts rendered with plotters.

use std::error::Error;

use analytics::{AudienceRow, CountryBucket, EnvelopePoint, TrajectoryPoint, COHORT_DAYS};
use analytics::drilldown::stacked_audience;
use plotters::prelude::*;
use tracing::warn;

use super::format::number;

const WIDTH: u32 = 720;
const HEIGHT: u32 = 320;

const TEXT: RGBColor = RGBColor(0x33, 0x33, 0x33);
const USA: RGBColor = RGBColor(0x1f, 0x77, 0xb4);
const INDIA: RGBColor = RGBColor(0xff, 0x7f, 0x0e);
const OTHER: RGBColor = RGBColor(0x2c, 0xa0, 0x2c);
const BAND_LOW: RGBColor = RGBColor(0xd6, 0x27, 0x28);
const BAND_MID: RGBColor = RGBColor(0x7f, 0x7f, 0x7f);
const BAND_HIGH: RGBColor = RGBColor(0x2c, 0xa0, 0x2c);
const CURRENT: RGBColor = RGBColor(0x1f, 0x77, 0xb4);

type ChartResult = Result<(), Box<dyn Error>>;

fn bucket_color(bucket: CountryBucket) -> RGBColor {
    match bucket {
        CountryBucket::Usa => USA,
        CountryBucket::India => INDIA,
        CountryBucket::Other => OTHER,
    }
}

fn status_label(is_subscribed: bool) -> &'static str {
    if is_subscribed {
        "Subscribed"
    } else {
        "Not subscribed"
    }
}

/// Horizontal bars of views per subscription status, stacked by country.
pub fn audience_chart(rows: &[AudienceRow]) -> String {
    let mut svg = String::new();
    if let Err(e) = draw_audience(&mut svg, rows) {
        warn!(error = %e, "Failed to draw audience chart");
    }
    make_svg_responsive(svg, WIDTH, HEIGHT)
}

fn draw_audience(svg: &mut String, rows: &[AudienceRow]) -> ChartResult {
    let totals = stacked_audience(rows);

    let mut statuses: Vec<bool> = rows.iter().map(|r| r.is_subscribed).collect();
    statuses.dedup();
    if statuses.is_empty() {
        statuses.push(false);
    }

    let widest = statuses
        .iter()
        .map(|&s| {
            CountryBucket::ALL
                .iter()
                .filter_map(|&b| totals.get(&(s, b)))
                .sum::<f64>()
        })
        .fold(0.0_f64, f64::max);
    let x_max = if widest.is_finite() && widest > 0.0 {
        widest * 1.05
    } else {
        1.0
    };

    let root = SVGBackend::with_string(svg, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let categories = statuses.len() as i32;
    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(110)
        .build_cartesian_2d(0.0..x_max, (0..categories).into_segmented())?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .x_desc("Views")
        .axis_style(TEXT)
        .label_style(("sans-serif", 12, &TEXT))
        .x_label_formatter(&|x| number(*x))
        .y_label_formatter(&|y| match y {
            SegmentValue::CenterOf(i) => statuses
                .get(*i as usize)
                .map(|&s| status_label(s).to_string())
                .unwrap_or_default(),
            _ => String::new(),
        })
        .draw()?;

    // Running offset of each status bar as country segments are stacked.
    let mut offsets = vec![0.0_f64; statuses.len()];
    for bucket in CountryBucket::ALL {
        let color = bucket_color(bucket);
        let mut segments = Vec::new();
        for (i, &status) in statuses.iter().enumerate() {
            if let Some(&views) = totals.get(&(status, bucket)) {
                let start = offsets[i];
                offsets[i] += views;
                segments.push(Rectangle::new(
                    [
                        (start, SegmentValue::Exact(i as i32)),
                        (offsets[i], SegmentValue::Exact(i as i32 + 1)),
                    ],
                    color.filled(),
                ));
            }
        }
        if segments.is_empty() {
            continue;
        }
        chart
            .draw_series(segments)?
            .label(bucket.label())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(TEXT)
        .label_font(("sans-serif", 12, &TEXT))
        .draw()?;

    root.present()?;
    Ok(())
}

/// Cumulative views of one video against the percentile envelope.
pub fn trajectory_chart(points: &[TrajectoryPoint], envelope: &[EnvelopePoint]) -> String {
    let mut svg = String::new();
    if let Err(e) = draw_trajectory(&mut svg, points, envelope) {
        warn!(error = %e, "Failed to draw trajectory chart");
    }
    make_svg_responsive(svg, WIDTH, HEIGHT)
}

fn finite_points(points: impl Iterator<Item = (i64, f64)>) -> Vec<(f64, f64)> {
    points
        .filter(|(_, v)| v.is_finite())
        .map(|(day, v)| (day as f64, v))
        .collect()
}

fn draw_trajectory(
    svg: &mut String,
    points: &[TrajectoryPoint],
    envelope: &[EnvelopePoint],
) -> ChartResult {
    let current = finite_points(points.iter().map(|p| (p.days_published, p.cumulative_views)));
    let p20 = finite_points(envelope.iter().map(|p| (p.days_published, p.p20_views)));
    let median = finite_points(envelope.iter().map(|p| (p.days_published, p.median_views)));
    let p80 = finite_points(envelope.iter().map(|p| (p.days_published, p.p80_views)));

    let y_top = [&current, &p20, &median, &p80]
        .iter()
        .flat_map(|series| series.iter().map(|&(_, y)| y))
        .fold(0.0_f64, f64::max);
    let y_max = if y_top > 0.0 { y_top * 1.05 } else { 1.0 };

    let root = SVGBackend::with_string(svg, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..COHORT_DAYS as f64, 0.0..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Days published")
        .y_desc("Cumulative views")
        .axis_style(TEXT)
        .label_style(("sans-serif", 12, &TEXT))
        .x_label_formatter(&|x| format!("{:.0}", x))
        .y_label_formatter(&|y| format!("{:.0}", y))
        .draw()?;

    let series = [
        ("20th percentile", p20, BAND_LOW, 1),
        ("50th percentile", median, BAND_MID, 1),
        ("80th percentile", p80, BAND_HIGH, 1),
        ("Current video", current, CURRENT, 3),
    ];

    for (label, data, color, width) in series {
        chart
            .draw_series(LineSeries::new(data, color.stroke_width(width)))?
            .label(label)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 16, y)], color.stroke_width(width))
            });
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(TEXT)
        .label_font(("sans-serif", 12, &TEXT))
        .draw()?;

    root.present()?;
    Ok(())
}

/// Swaps the fixed pixel size for a viewBox so the chart scales with its column.
fn make_svg_responsive(svg: String, width: u32, height: u32) -> String {
    let needle = format!("width=\"{width}\" height=\"{height}\"");
    if !svg.contains(&needle) {
        return svg;
    }
    let replacement = if svg.contains("viewBox=") {
        "width=\"100%\"".to_string()
    } else {
        format!("viewBox=\"0 0 {width} {height}\" width=\"100%\"")
    };
    svg.replacen(&needle, &replacement, 1)
}
