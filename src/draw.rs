//! Heatmaps of adjacency blocks in svg.

use crate::error::Result;
use ndarray::{ArrayView2, NdFloat};
use svg::node::element::{Element, Rectangle, SVG};
use svg::node::{Node, Text};
use std::path::Path;

const CELL: f64 = 10.;
const TITLE_HEIGHT: f64 = 16.;

/// Trait to draw matrices in svg
pub trait Draw: Sized {
    fn draw_with_title(&self, title: &str) -> SVG;
    fn draw(&self) -> SVG {
        self.draw_with_title("")
    }
    fn to_svg_file<P: AsRef<Path>>(&self, path: P, title: &str) -> Result<()> {
        svg::save(path, &self.draw_with_title(title))?;
        Ok(())
    }
}

/// Gray level of `x` on a scale from `lo` (white) to `hi` (black).
fn gray(x: f64, lo: f64, hi: f64) -> String {
    let t = if hi > lo { (x - lo) / (hi - lo) } else { 0. };
    let level = (255. * (1. - t.clamp(0., 1.))).round() as u8;
    format!("rgb({level},{level},{level})")
}

fn cell(i: usize, j: usize, fill: String) -> Rectangle {
    Rectangle::new()
        .set("x", j as f64 * CELL)
        .set("y", TITLE_HEIGHT + i as f64 * CELL)
        .set("width", CELL)
        .set("height", CELL)
        .set("fill", fill)
}

fn title(content: &str, width: f64) -> Element {
    let mut res = Element::new("text");
    res.assign("x", width / 2.);
    res.assign("y", TITLE_HEIGHT - 4.);
    res.assign("text-anchor", "middle");
    res.assign("font-size", 12);
    res.append(Text::new(content));
    res
}

fn frame(rows: usize, cols: usize) -> SVG {
    let width = cols.max(1) as f64 * CELL;
    let height = TITLE_HEIGHT + rows as f64 * CELL;
    SVG::new()
        .set("viewBox", format!("0 0 {width} {height}"))
        .set("width", width)
        .set("height", height)
}

impl<T: NdFloat> Draw for ArrayView2<'_, T> {
    fn draw_with_title(&self, name: &str) -> SVG {
        let (rows, cols) = self.dim();
        let values: Vec<f64> = self.iter().map(|x| x.to_f64().unwrap_or(0.)).collect();
        let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mut res = frame(rows, cols);
        for (k, &x) in values.iter().enumerate() {
            res = res.add(cell(k / cols, k % cols, gray(x, lo, hi)));
        }
        if !name.is_empty() {
            res = res.add(title(name, cols.max(1) as f64 * CELL));
        }
        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn gray_scale() {
        assert_eq!(gray(0., 0., 1.), "rgb(255,255,255)");
        assert_eq!(gray(1., 0., 1.), "rgb(0,0,0)");
        assert_eq!(gray(3., 3., 3.), "rgb(255,255,255)");
    }

    #[test]
    fn one_cell_per_entry() {
        let m = array![[0., 1.], [1., 0.]];
        let svg = m.view().draw_with_title("A").to_string();
        assert_eq!(svg.matches("<rect").count(), 4);
        assert!(svg.contains(">A<") || svg.contains(">\nA\n<"));
    }

    #[test]
    fn save_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("m.svg");
        let m = array![[1f32, 0.], [0., 1.]];
        m.view().to_svg_file(&path, "identity").unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("identity"));
    }
}
