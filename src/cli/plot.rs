//! ターミナル用の簡易散布図

use crate::ai::GraphSpec;

/// 描画領域の幅（文字数）
pub const PLOT_WIDTH: usize = 60;
/// 描画領域の高さ（行数）
pub const PLOT_HEIGHT: usize = 16;

/// グラフを ASCII の散布図として描画する。
///
/// y 軸ラベルは左端に最大値・最小値のみ表示する。
/// 全点の y が等しい場合は中央の行に並べる。
pub fn render_plot(spec: &GraphSpec, width: usize, height: usize) -> String {
    let width = width.max(2);
    let height = height.max(2);

    let (x_min, x_max) = bounds(spec.points.iter().map(|p| p.0));
    let (y_min, y_max) = bounds(spec.points.iter().map(|p| p.1));

    let mut grid = vec![vec![' '; width]; height];
    for &(x, y) in &spec.points {
        let col = scale(x, x_min, x_max, width);
        let row = if y_max > y_min {
            height - 1 - scale(y, y_min, y_max, height)
        } else {
            height / 2
        };
        grid[row][col] = '•';
    }

    let top_label = format_tick(y_max);
    let bottom_label = format_tick(y_min);
    let gutter = top_label.len().max(bottom_label.len());

    let mut out = String::new();
    if !spec.title.is_empty() {
        out.push_str(&format!("{:^w$}\n", spec.title, w = width + gutter + 2));
    }
    if !spec.y_label.is_empty() {
        out.push_str(&format!("{:>gutter$}\n", spec.y_label));
    }

    for (i, row) in grid.iter().enumerate() {
        let label = match i {
            0 => top_label.as_str(),
            r if r == height - 1 => bottom_label.as_str(),
            _ => "",
        };
        let line: String = row.iter().collect();
        out.push_str(&format!("{label:>gutter$} │{}\n", line.trim_end()));
    }

    out.push_str(&format!("{:>gutter$} └{}\n", "", "─".repeat(width)));

    let left = format_tick(x_min);
    let right = format_tick(x_max);
    let pad = width.saturating_sub(left.len() + right.len());
    out.push_str(&format!("{:>gutter$}  {left}{}{right}\n", "", " ".repeat(pad)));

    if !spec.x_label.is_empty() {
        out.push_str(&format!("{:>gutter$}  {:^width$}\n", "", spec.x_label));
    }

    out
}

fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

/// `v` を `[min, max]` から `0..cells` のインデックスに写像する。
fn scale(v: f64, min: f64, max: f64, cells: usize) -> usize {
    if max <= min {
        return 0;
    }
    let ratio = (v - min) / (max - min);
    ((ratio * (cells - 1) as f64).round() as usize).min(cells - 1)
}

fn format_tick(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e9 {
        format!("{v:.0}")
    } else {
        format!("{v:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(points: Vec<(f64, f64)>) -> GraphSpec {
        GraphSpec {
            title: "test".to_string(),
            x_label: "x".to_string(),
            y_label: "y".to_string(),
            points,
        }
    }

    #[test]
    fn plots_one_marker_per_distinct_cell() {
        let s = spec(vec![(0.0, 0.0), (1.0, 1.0), (2.0, 4.0)]);
        let out = render_plot(&s, 10, 5);
        assert_eq!(out.matches('•').count(), 3);
        assert!(out.contains("test"));
    }

    #[test]
    fn extremes_land_on_corners() {
        let s = spec(vec![(0.0, 0.0), (10.0, 10.0)]);
        let out = render_plot(&s, 10, 4);
        let rows: Vec<&str> = out.lines().filter(|l| l.contains('│')).collect();
        assert_eq!(rows.len(), 4);
        // 最大値は最上段の右端、最小値は最下段の左端
        assert!(rows[0].starts_with("10 │"));
        assert!(rows[0].ends_with('•'));
        assert!(rows[3].starts_with(" 0 │•"));
    }

    #[test]
    fn flat_series_is_drawn_in_middle_row() {
        let s = spec(vec![(0.0, 3.0), (1.0, 3.0), (2.0, 3.0)]);
        let out = render_plot(&s, 9, 5);
        let rows: Vec<&str> = out.lines().filter(|l| l.contains('│')).collect();
        assert_eq!(rows[2].matches('•').count(), 3);
    }

    #[test]
    fn axis_ticks_show_x_range() {
        let s = spec(vec![(-1.5, 0.0), (2.0, 1.0)]);
        let out = render_plot(&s, 20, 4);
        assert!(out.contains("-1.50"));
        assert!(out.lines().any(|l| l.trim_end().ends_with('2')));
    }

    #[test]
    fn scale_clamps_to_last_cell() {
        assert_eq!(scale(10.0, 0.0, 10.0, 5), 4);
        assert_eq!(scale(0.0, 0.0, 10.0, 5), 0);
        assert_eq!(scale(5.0, 5.0, 5.0, 5), 0);
    }
}
