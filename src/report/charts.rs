//! PNG charts rendered with plotters
//!
//! Every public renderer maps drawing failures to [`LabError::Chart`]; the
//! reporter logs those and carries on.

use crate::analysis::Condition;
use crate::constants::HISTOGRAM_BINS;
use crate::error::{LabError, Result};
use crate::models::LipaseReading;
use crate::stats::{CorrelationMatrix, describe};
use plotters::prelude::*;
use std::error::Error;
use std::path::Path;

type DrawResult = std::result::Result<(), Box<dyn Error>>;

const FONT: &str = "sans-serif";
const ORANGE: RGBColor = RGBColor(255, 165, 0);
/// Fill of correlation cells without a defined r
const UNDEFINED: RGBColor = RGBColor(235, 235, 235);

fn chart_error(path: &Path, error: Box<dyn Error>) -> LabError {
    LabError::Chart {
        path: path.to_path_buf(),
        reason: error.to_string(),
    }
}

/// Padded (min, max) over all values; a unit span around constant data
pub fn value_range<'a>(values: impl IntoIterator<Item = &'a f64>) -> Option<(f64, f64)> {
    let (min, max) = values
        .into_iter()
        .fold(None, |range: Option<(f64, f64)>, &value| match range {
            None => Some((value, value)),
            Some((min, max)) => Some((min.min(value), max.max(value))),
        })?;

    if (max - min).abs() < f64::EPSILON {
        return Some((min - 0.5, max + 0.5));
    }
    let pad = (max - min) * 0.05;
    Some((min - pad, max + pad))
}

/// Equal-width histogram bins as (lower, upper, count); the last bin is closed
pub fn histogram(values: &[f64], bins: usize) -> Vec<(f64, f64, usize)> {
    let Some((min, max)) = values.iter().fold(None, |range: Option<(f64, f64)>, &v| match range {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    }) else {
        return Vec::new();
    };
    let bins = bins.max(1);

    let (min, max) = if max > min { (min, max) } else { (min - 0.5, max + 0.5) };
    let width = (max - min) / bins as f64;
    let mut counts = vec![0usize; bins];
    for value in values {
        let index = (((value - min) / width) as usize).min(bins - 1);
        counts[index] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| (min + i as f64 * width, min + (i + 1) as f64 * width, count))
        .collect()
}

/// Blue (-1) through white (0) to red (+1)
pub fn diverging_color(r: f64) -> RGBColor {
    let t = r.clamp(-1.0, 1.0);
    let fade = |amount: f64| (255.0 * (1.0 - amount)).round() as u8;
    if t >= 0.0 {
        RGBColor(255, fade(t), fade(t))
    } else {
        RGBColor(fade(-t), fade(-t), 255)
    }
}

/// pH over time per group, one panel per condition
pub fn render_lipase_curves(readings: &[LipaseReading], path: &Path) -> Result<()> {
    draw_lipase_curves(readings, path).map_err(|e| chart_error(path, e))
}

fn draw_lipase_curves(readings: &[LipaseReading], path: &Path) -> DrawResult {
    let mut groups: Vec<(&Vec<String>, Vec<&LipaseReading>)> = Vec::new();
    for reading in readings {
        match groups.iter_mut().find(|(group, _)| *group == &reading.group) {
            Some((_, members)) => members.push(reading),
            None => groups.push((&reading.group, vec![reading])),
        }
    }
    for (_, members) in groups.iter_mut() {
        members.sort_by(|a, b| a.time.total_cmp(&b.time));
    }

    let times: Vec<f64> = readings.iter().map(|r| r.time).collect();
    let ph: Vec<f64> = readings
        .iter()
        .flat_map(|r| [r.ph_cooked, r.ph_uncooked])
        .flatten()
        .collect();
    let (t_min, t_max) = value_range(&times).unwrap_or((0.0, 1.0));
    let (ph_min, ph_max) = value_range(&ph).unwrap_or((6.0, 8.0));

    let root = BitMapBackend::new(path, (1600, 700)).into_drawing_area();
    root.fill(&WHITE)?;
    let panels = root.split_evenly((1, 2));

    for (panel, condition) in panels.iter().zip(Condition::ALL) {
        let mut chart = ChartBuilder::on(panel)
            .caption(format!("Lipase activity: {} samples", condition.label()), (FONT, 22))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(t_min..t_max, ph_min..ph_max)?;

        chart
            .configure_mesh()
            .x_desc("Time (min)")
            .y_desc("pH")
            .draw()?;

        for (index, (group, members)) in groups.iter().enumerate() {
            let color = Palette99::pick(index).to_rgba();
            let points: Vec<(f64, f64)> = members
                .iter()
                .filter_map(|r| condition.value(r).map(|value| (r.time, value)))
                .collect();
            if points.is_empty() {
                continue;
            }
            chart
                .draw_series(LineSeries::new(points, color.stroke_width(2)))?
                .label(group.join(" / "))
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
        }

        if !groups.is_empty() {
            chart
                .configure_series_labels()
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .label_font((FONT, 12))
                .draw()?;
        }
    }

    root.present()?;
    Ok(())
}

/// Distance distribution per body region
pub fn render_region_boxplot(labels: &[String], samples: &[Vec<f64>], path: &Path) -> Result<()> {
    draw_region_boxplot(labels, samples, path).map_err(|e| chart_error(path, e))
}

fn draw_region_boxplot(labels: &[String], samples: &[Vec<f64>], path: &Path) -> DrawResult {
    let (y_min, y_max) = value_range(samples.iter().flatten()).unwrap_or((0.0, 1.0));

    let root = BitMapBackend::new(path, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Tactile Sensitivity by Body Region (Two-Point Discrimination Threshold)",
            (FONT, 24),
        )
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(labels.into_segmented(), (y_min as f32)..(y_max as f32))?;

    chart
        .configure_mesh()
        .x_desc("Body Region")
        .y_desc("Distance (mm)")
        .draw()?;

    chart.draw_series(
        labels
            .iter()
            .zip(samples)
            .filter(|(_, values)| !values.is_empty())
            .enumerate()
            .map(|(index, (label, values))| {
                Boxplot::new_vertical(SegmentValue::CenterOf(label), &Quartiles::new(values))
                    .width(40)
                    .style(Palette99::pick(index).stroke_width(2))
            }),
    )?;

    root.present()?;
    Ok(())
}

/// Male vs female distributions, one panel per body region
pub fn render_gender_comparison(
    labels: &[String],
    male: &[Vec<f64>],
    female: &[Vec<f64>],
    path: &Path,
) -> Result<()> {
    draw_gender_comparison(labels, male, female, path).map_err(|e| chart_error(path, e))
}

fn draw_gender_comparison(
    labels: &[String],
    male: &[Vec<f64>],
    female: &[Vec<f64>],
    path: &Path,
) -> DrawResult {
    let genders = ["Male".to_string(), "Female".to_string()];
    let columns = 3;
    let rows = labels.len().div_ceil(columns).max(1);

    let root = BitMapBackend::new(path, (1500, 500 * rows as u32)).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled(
        "Gender Comparison of Tactile Sensitivity by Body Region",
        (FONT, 26),
    )?;
    let panels = root.split_evenly((rows, columns));

    for (panel, ((label, m), f)) in panels.iter().zip(labels.iter().zip(male).zip(female)) {
        let (y_min, y_max) = value_range(m.iter().chain(f.iter())).unwrap_or((0.0, 1.0));

        let mut chart = ChartBuilder::on(panel)
            .caption(label, (FONT, 20))
            .margin(10)
            .x_label_area_size(30)
            .y_label_area_size(50)
            .build_cartesian_2d(genders[..].into_segmented(), (y_min as f32)..(y_max as f32))?;

        chart.configure_mesh().y_desc("Distance (mm)").draw()?;

        let boxes = genders
            .iter()
            .zip([m, f])
            .zip([BLUE, RED])
            .filter(|((_, values), _)| !values.is_empty())
            .map(|((gender, values), color)| {
                Boxplot::new_vertical(SegmentValue::CenterOf(gender), &Quartiles::new(values))
                    .width(50)
                    .style(color.stroke_width(2))
            });
        chart.draw_series(boxes)?;
    }

    root.present()?;
    Ok(())
}

/// Lower-triangle heatmap of region correlations with annotated r values
pub fn render_correlation_heatmap(matrix: &CorrelationMatrix, path: &Path) -> Result<()> {
    draw_correlation_heatmap(matrix, path).map_err(|e| chart_error(path, e))
}

fn draw_correlation_heatmap(matrix: &CorrelationMatrix, path: &Path) -> DrawResult {
    let size = matrix.len();
    let extent = size as f64 - 0.5;
    let labels = &matrix.labels;
    // Rows are drawn top-down, so the y axis counts from the last label
    let index_at = |value: &f64| {
        let index = value.round();
        ((value - index).abs() < 1e-6 && index >= 0.0).then_some(index as usize)
    };
    let x_label = |value: &f64| {
        index_at(value)
            .and_then(|i| labels.get(i).cloned())
            .unwrap_or_default()
    };
    let y_label = |value: &f64| {
        index_at(value)
            .filter(|i| *i < size)
            .and_then(|i| labels.get(size - 1 - i).cloned())
            .unwrap_or_default()
    };

    let root = BitMapBackend::new(path, (1000, 900)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Correlation Between Body Regions (Tactile Sensitivity)", (FONT, 24))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(100)
        .build_cartesian_2d(-0.5..extent, -0.5..extent)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(size)
        .y_labels(size)
        .x_label_formatter(&x_label)
        .y_label_formatter(&y_label)
        .draw()?;

    // Lower triangle only, the diagonal included
    for i in 0..size {
        for j in 0..=i {
            let (x, y) = (j as f64, (size - 1 - i) as f64);
            let cell = [(x - 0.5, y - 0.5), (x + 0.5, y + 0.5)];
            match matrix.get(i, j) {
                Some(r) => {
                    chart.draw_series(std::iter::once(Rectangle::new(
                        cell,
                        diverging_color(r).filled(),
                    )))?;
                    chart.draw_series(std::iter::once(Text::new(
                        format!("{:.2}", r),
                        (x - 0.2, y + 0.1),
                        (FONT, 18),
                    )))?;
                }
                None => {
                    chart.draw_series(std::iter::once(Rectangle::new(cell, UNDEFINED.filled())))?;
                }
            }
        }
    }

    root.present()?;
    Ok(())
}

/// Histogram per body region with mean and median markers
pub fn render_distributions(labels: &[String], samples: &[Vec<f64>], path: &Path) -> Result<()> {
    draw_distributions(labels, samples, path).map_err(|e| chart_error(path, e))
}

fn draw_distributions(labels: &[String], samples: &[Vec<f64>], path: &Path) -> DrawResult {
    let columns = 3;
    let rows = labels.len().div_ceil(columns).max(1);

    let root = BitMapBackend::new(path, (1500, 500 * rows as u32)).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled("Distribution of Tactile Sensitivity Measurements", (FONT, 26))?;
    let panels = root.split_evenly((rows, columns));

    for (panel, (label, values)) in panels.iter().zip(labels.iter().zip(samples)) {
        let Some(stats) = describe(values) else {
            continue;
        };
        let bins = histogram(values, HISTOGRAM_BINS);
        let x_min = bins.first().map(|b| b.0).unwrap_or(0.0);
        let x_max = bins.last().map(|b| b.1).unwrap_or(1.0);
        let y_max = bins.iter().map(|b| b.2).max().unwrap_or(1) as f64 * 1.15;

        let mut chart = ChartBuilder::on(panel)
            .caption(label, (FONT, 20))
            .margin(10)
            .x_label_area_size(35)
            .y_label_area_size(45)
            .build_cartesian_2d(x_min..x_max, 0.0..y_max)?;

        chart
            .configure_mesh()
            .x_desc("Distance (mm)")
            .y_desc("Frequency")
            .draw()?;

        chart.draw_series(bins.iter().map(|(lower, upper, count)| {
            Rectangle::new([(*lower, 0.0), (*upper, *count as f64)], BLUE.mix(0.55).filled())
        }))?;

        chart
            .draw_series(LineSeries::new(
                vec![(stats.mean, 0.0), (stats.mean, y_max)],
                RED.stroke_width(2),
            ))?
            .label(format!("Mean: {:.1}mm", stats.mean))
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(2)));

        chart
            .draw_series(LineSeries::new(
                vec![(stats.median, 0.0), (stats.median, y_max)],
                ORANGE.stroke_width(2),
            ))?
            .label(format!("Median: {:.1}mm", stats.median))
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], ORANGE.stroke_width(2)));

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    root.present()?;
    Ok(())
}
