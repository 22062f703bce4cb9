use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};
use image::{ImageFormat, Rgb, RgbImage};
use std::io::Cursor;

use crate::config::settings::ChartSettings;
use crate::database::HistoryPoint;

const MARGIN: i64 = 40;
const GRID_LINES: i64 = 5;
const MARKER_RADIUS: i64 = 3;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const GRID: Rgb<u8> = Rgb([225, 225, 225]);
const AXIS: Rgb<u8> = Rgb([60, 60, 60]);
const SERIES: Rgb<u8> = Rgb([31, 119, 180]);

/// A known rating on a given day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub rating: u32,
}

/// Known ratings from the last `window_days` days (today included), oldest first
pub fn recent_points(history: &[HistoryPoint], today: NaiveDate, window_days: i64) -> Vec<ChartPoint> {
    let cutoff = today - Duration::days(window_days);
    let mut points: Vec<ChartPoint> = history
        .iter()
        .filter(|point| point.date > cutoff && point.date <= today)
        .filter_map(|point| {
            point.rating.map(|rating| ChartPoint {
                date: point.date,
                rating,
            })
        })
        .collect();

    points.sort_by_key(|point| point.date);
    points
}

/// Render a rating line chart as PNG bytes
pub fn render_line_chart(points: &[ChartPoint], settings: &ChartSettings) -> Result<Vec<u8>> {
    if points.is_empty() {
        anyhow::bail!("Cannot chart an empty rating series");
    }

    let area = PlotArea::new(settings.width, settings.height);
    let mut canvas = RgbImage::from_pixel(area.width as u32, area.height as u32, BACKGROUND);

    draw_grid(&mut canvas, &area);
    draw_axes(&mut canvas, &area);

    let scale = Scale::fit(points);
    let pixels: Vec<(i64, i64)> = points.iter().map(|p| area.project(&scale, p)).collect();

    for pair in pixels.windows(2) {
        draw_line(&mut canvas, pair[0], pair[1], SERIES);
    }
    for &pixel in &pixels {
        draw_marker(&mut canvas, pixel, SERIES);
    }

    encode_png(&canvas)
}

// --- Geometry ---

struct PlotArea {
    width: i64,
    height: i64,
    left: i64,
    top: i64,
    right: i64,
    bottom: i64,
}

impl PlotArea {
    fn new(width: u32, height: u32) -> Self {
        let width = i64::from(width).max(MARGIN * 4);
        let height = i64::from(height).max(MARGIN * 4);
        Self {
            width,
            height,
            left: MARGIN,
            top: MARGIN / 2,
            right: width - MARGIN / 2,
            bottom: height - MARGIN,
        }
    }

    fn project(&self, scale: &Scale, point: &ChartPoint) -> (i64, i64) {
        let x = self.left + (scale.x_fraction(point.date) * (self.right - self.left) as f64).round() as i64;
        let y = self.bottom - (scale.y_fraction(point.rating) * (self.bottom - self.top) as f64).round() as i64;
        (x, y)
    }
}

struct Scale {
    first_day: NaiveDate,
    day_span: i64,
    low: f64,
    high: f64,
}

impl Scale {
    fn fit(points: &[ChartPoint]) -> Self {
        let first_day = points.iter().map(|p| p.date).min().unwrap_or_default();
        let last_day = points.iter().map(|p| p.date).max().unwrap_or_default();
        let min = points.iter().map(|p| p.rating).min().unwrap_or_default();
        let max = points.iter().map(|p| p.rating).max().unwrap_or_default();

        let padding = (f64::from(max - min) / 10.0).max(10.0);
        Self {
            first_day,
            day_span: (last_day - first_day).num_days(),
            low: f64::from(min) - padding,
            high: f64::from(max) + padding,
        }
    }

    fn x_fraction(&self, date: NaiveDate) -> f64 {
        if self.day_span == 0 {
            return 0.5;
        }
        (date - self.first_day).num_days() as f64 / self.day_span as f64
    }

    fn y_fraction(&self, rating: u32) -> f64 {
        (f64::from(rating) - self.low) / (self.high - self.low)
    }
}

// --- Drawing ---

fn draw_grid(canvas: &mut RgbImage, area: &PlotArea) {
    for step in 0..=GRID_LINES {
        let y = area.top + (area.bottom - area.top) * step / GRID_LINES;
        draw_line(canvas, (area.left, y), (area.right, y), GRID);
    }
}

fn draw_axes(canvas: &mut RgbImage, area: &PlotArea) {
    draw_line(canvas, (area.left, area.top), (area.left, area.bottom), AXIS);
    draw_line(canvas, (area.left, area.bottom), (area.right, area.bottom), AXIS);
}

/// Bresenham line, two pixels thick
fn draw_line(canvas: &mut RgbImage, from: (i64, i64), to: (i64, i64), color: Rgb<u8>) {
    let (mut x, mut y) = from;
    let dx = (to.0 - x).abs();
    let dy = -(to.1 - y).abs();
    let sx = if x < to.0 { 1 } else { -1 };
    let sy = if y < to.1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        put(canvas, x, y, color);
        put(canvas, x, y + 1, color);
        if x == to.0 && y == to.1 {
            break;
        }
        let doubled = 2 * err;
        if doubled >= dy {
            err += dy;
            x += sx;
        }
        if doubled <= dx {
            err += dx;
            y += sy;
        }
    }
}

fn draw_marker(canvas: &mut RgbImage, center: (i64, i64), color: Rgb<u8>) {
    for dx in -MARKER_RADIUS..=MARKER_RADIUS {
        for dy in -MARKER_RADIUS..=MARKER_RADIUS {
            if dx * dx + dy * dy <= MARKER_RADIUS * MARKER_RADIUS {
                put(canvas, center.0 + dx, center.1 + dy, color);
            }
        }
    }
}

fn put(canvas: &mut RgbImage, x: i64, y: i64, color: Rgb<u8>) {
    if x < 0 || y < 0 || x >= i64::from(canvas.width()) || y >= i64::from(canvas.height()) {
        return;
    }
    canvas.put_pixel(x as u32, y as u32, color);
}

fn encode_png(canvas: &RgbImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    canvas
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .context("Failed to encode chart as PNG")?;
    Ok(bytes)
}
