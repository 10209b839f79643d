use super::axis::{self, Rgb, BLACK, BLUE, GREEN, GRID, RED};
use super::{BarChart, Figure, MosaicChart};
use crate::error::Result;
use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str};
use std::path::Path;
use tracing::debug;

const FONT: Name<'static> = Name(b"F1");
const WEEKDAYS: [&str; 7] = ["M", "T", "W", "R", "F", "S", "S"];

/// Render the figures into a PDF document, one page each.
pub fn render(figures: &[Figure]) -> Vec<u8> {
    let catalog_id = Ref::new(1);
    let page_tree_id = Ref::new(2);
    let font_id = Ref::new(3);

    let ids: Vec<(Ref, Ref)> = (0..figures.len() as i32)
        .map(|i| (Ref::new(4 + 2 * i), Ref::new(5 + 2 * i)))
        .collect();

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id)
        .kids(ids.iter().map(|(page_id, _)| *page_id))
        .count(ids.len() as i32);

    for (figure, (page_id, content_id)) in figures.iter().zip(&ids) {
        let size = figure.size();
        let mut page = pdf.page(*page_id);
        page.media_box(Rect::new(0.0, 0.0, size.width, size.height));
        page.parent(page_tree_id);
        page.contents(*content_id);
        page.resources().fonts().pair(FONT, font_id);
        page.finish();

        let content = match figure {
            Figure::Bars(chart) => draw_bars(chart),
            Figure::Mosaic(chart) => draw_mosaic(chart),
        };
        pdf.stream(*content_id, &content);
    }

    pdf.type1_font(font_id).base_font(Name(b"Helvetica"));
    pdf.finish()
}

pub fn write_pdf(path: &Path, figures: &[Figure]) -> Result<()> {
    let bytes = render(figures);
    std::fs::write(path, &bytes)?;
    debug!(path = %path.display(), pages = figures.len(), bytes = bytes.len(), "wrote pdf");
    Ok(())
}

struct Canvas {
    content: Content,
}

impl Canvas {
    fn new() -> Self {
        Self {
            content: Content::new(),
        }
    }

    fn finish(self) -> Vec<u8> {
        self.content.finish()
    }

    fn text(&mut self, x: f32, y: f32, size: f32, text: &str) {
        self.text_matrix([1.0, 0.0, 0.0, 1.0, x, y], size, text);
    }

    fn text_centered(&mut self, x: f32, y: f32, size: f32, text: &str) {
        self.text(x - text_width(text, size) / 2.0, y, size, text);
    }

    fn text_right(&mut self, x: f32, y: f32, size: f32, text: &str) {
        self.text(x - text_width(text, size), y, size, text);
    }

    /// Text rotated a quarter turn counter-clockwise, reading bottom to top.
    fn text_vertical(&mut self, x: f32, y: f32, size: f32, text: &str) {
        self.text_matrix([0.0, 1.0, -1.0, 0.0, x, y], size, text);
    }

    fn text_matrix(&mut self, matrix: [f32; 6], size: f32, text: &str) {
        let bytes = pdf_text(text);
        self.content.set_fill_rgb(BLACK.0, BLACK.1, BLACK.2);
        self.content.begin_text();
        self.content.set_font(FONT, size);
        self.content.set_text_matrix(matrix);
        self.content.show(Str(&bytes));
        self.content.end_text();
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb) {
        self.content.set_fill_rgb(color.0, color.1, color.2);
        self.content.rect(x, y, w, h);
        self.content.fill_nonzero();
    }

    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb, width: f32) {
        self.content.set_stroke_rgb(color.0, color.1, color.2);
        self.content.set_line_width(width);
        self.content.rect(x, y, w, h);
        self.content.stroke();
    }

    fn line(&mut self, from: (f32, f32), to: (f32, f32), color: Rgb, width: f32) {
        self.polyline(&[from, to], color, width);
    }

    fn polyline(&mut self, points: &[(f32, f32)], color: Rgb, width: f32) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.content.set_stroke_rgb(color.0, color.1, color.2);
        self.content.set_line_width(width);
        self.content.move_to(first.0, first.1);
        for point in rest {
            self.content.line_to(point.0, point.1);
        }
        self.content.stroke();
    }
}

/// Helvetica averages roughly half an em per glyph.
fn text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * 0.5
}

/// The base-14 font is used without an embedded encoding; keep to printable
/// ASCII.
fn pdf_text(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| {
            if c.is_ascii() && !c.is_ascii_control() {
                c as u8
            } else {
                b'?'
            }
        })
        .collect()
}

fn draw_bars(chart: &BarChart) -> Vec<u8> {
    let mut canvas = Canvas::new();
    let (w, h) = (chart.size.width, chart.size.height);

    let left = 52.0;
    let right = 48.0;
    let top = 22.0;
    let bottom = (h * 0.28).max(48.0);
    let (px, py) = (left, bottom);
    let (pw, ph) = (w - left - right, h - top - bottom);

    let slots = chart.labels.len().max(1);
    let slot = pw / slots as f32;
    let bar = slot * 0.4;

    let peak = chart
        .insertions
        .iter()
        .chain(&chart.deletions)
        .copied()
        .max()
        .unwrap_or(0)
        .max(1) as f64
        * 1.5;
    let scale = axis::symlog(peak);
    let y_lines = |v: f64| py + (axis::symlog(v) / scale) as f32 * ph;

    let peak_commits = chart.commits.iter().copied().max().unwrap_or(0) as f64 * 1.5;
    let peak_commits = if peak_commits > 0.0 { peak_commits } else { 1.0 };
    let y_commits = |v: f64| py + (v / peak_commits) as f32 * ph;

    for tick in axis::symlog_ticks(peak) {
        let y = y_lines(tick);
        canvas.line((px, y), (px + pw, y), GRID, 0.4);
        canvas.text_right(px - 4.0, y - 2.5, 7.0, &format!("{tick}"));
    }
    for tick in axis::linear_ticks(peak_commits) {
        canvas.text(px + pw + 4.0, y_commits(tick) - 2.5, 7.0, &format!("{tick}"));
    }

    for (i, (ins, del)) in chart.insertions.iter().zip(&chart.deletions).enumerate() {
        let x = px + slot * i as f32 + slot * 0.1;
        if *ins > 0 {
            canvas.fill_rect(x, py, bar, y_lines(*ins as f64) - py, GREEN);
        }
        if *del > 0 {
            canvas.fill_rect(x + bar, py, bar, y_lines(*del as f64) - py, RED);
        }
    }

    let points: Vec<(f32, f32)> = chart
        .commits
        .iter()
        .enumerate()
        .map(|(i, c)| (px + slot * (i as f32 + 0.5), y_commits(*c as f64)))
        .collect();
    canvas.polyline(&points, BLUE, 1.0);

    canvas.stroke_rect(px, py, pw, ph, BLACK, 0.6);

    let label_size = (slot * 0.9).clamp(3.0, 7.0);
    for (i, label) in chart.labels.iter().enumerate() {
        let x = px + slot * (i as f32 + 0.5) + label_size / 3.0;
        let y = py - 4.0 - text_width(label, label_size);
        canvas.text_vertical(x, y, label_size, label);
    }

    canvas.text_centered(w / 2.0, h - top + 7.0, 11.0, &chart.title);
    canvas.text_centered(w / 2.0, 6.0, 8.0, &chart.x_label);
    let y_mid = py + ph / 2.0;
    let lines_label = "Lines added/deleted";
    canvas.text_vertical(14.0, y_mid - text_width(lines_label, 8.0) / 2.0, 8.0, lines_label);
    let count_label = "Commit count";
    canvas.text_vertical(w - 6.0, y_mid - text_width(count_label, 8.0) / 2.0, 8.0, count_label);

    canvas.finish()
}

fn draw_mosaic(chart: &MosaicChart) -> Vec<u8> {
    let mut canvas = Canvas::new();
    let (w, h) = (chart.size.width, chart.size.height);

    let left = 22.0;
    let right = 12.0;
    let top = 34.0;
    let bar_band = 26.0;
    let (gw, gh) = (w - left - right, h - top - bar_band);

    let columns = chart.column_labels.len().max(1);
    let cell = (gw / columns as f32).min(gh / 7.0);
    let grid_w = cell * columns as f32;
    let gx = left;
    let gy = bar_band;
    let grid_top = gy + cell * 7.0;
    let cell_y = |row: usize| grid_top - cell * (row as f32 + 1.0);

    let max = chart.max_count();
    let denominator = (max + 10) as f64;

    canvas.stroke_rect(gx, gy, grid_w, cell * 7.0, GRID, 0.3);
    for c in &chart.cells {
        let x = gx + cell * c.column as f32;
        let y = cell_y(c.row);
        canvas.fill_rect(x, y, cell, cell, axis::greens(c.count as f64 / denominator));
        canvas.stroke_rect(x, y, cell, cell, BLACK, 0.2);
    }

    for (row, label) in WEEKDAYS.iter().enumerate() {
        canvas.text_right(gx - 3.0, cell_y(row) + cell * 0.25, 6.0, label);
    }
    for (column, label) in chart.column_labels.iter().enumerate() {
        if !label.is_empty() {
            canvas.text(gx + cell * column as f32, grid_top + 3.0, 6.0, label);
        }
    }

    // colour bar
    let bar_y = 12.0;
    let bar_h = 6.0;
    let segments = 50;
    let segment_w = grid_w / segments as f32;
    for i in 0..segments {
        let t = i as f64 / (segments - 1) as f64;
        canvas.fill_rect(gx + segment_w * i as f32, bar_y, segment_w + 0.2, bar_h, axis::greens(t));
    }
    canvas.stroke_rect(gx, bar_y, grid_w, bar_h, BLACK, 0.3);
    for i in 0..10 {
        let t = i as f64 / 9.0;
        let label = format!("{}", (t * denominator) as u32);
        canvas.text_centered(gx + grid_w * t as f32, bar_y - 8.0, 5.0, &label);
    }

    canvas.text_centered(w / 2.0, h - 13.0, 11.0, &chart.title);

    canvas.finish()
}
