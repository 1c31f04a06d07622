use crate::types::{Layout, Panel};

const MAX_COLS: f64 = 80.0;
const MAX_ROWS: f64 = 40.0;

/// Draws an ASCII sketch of one panel: its outline, every placement on it
/// (labelled with the item id), and the leftover free rects (labelled `~`).
pub fn render_panel(layout: &Layout, panel: &Panel) -> String {
    let scale = f64::min(MAX_COLS / panel.width, MAX_ROWS / panel.height);
    let cols = (panel.width * scale).round() as usize;
    let rows = (panel.height * scale).round() as usize;

    if cols == 0 || rows == 0 {
        return String::new();
    }

    let mut grid = vec![vec![' '; cols + 1]; rows + 1];
    draw_box(&mut grid, 0, 0, cols, rows);

    for p in layout.placements.iter().filter(|p| p.panel == panel.id) {
        let Some(item) = layout.params.item(&p.item) else {
            continue;
        };
        let (w, h) = if p.rotated {
            (item.height, item.width)
        } else {
            (item.width, item.height)
        };
        let label = if p.rotated {
            format!("{}*", item.id)
        } else {
            item.id.clone()
        };
        draw_scaled(&mut grid, scale, p.x, p.y, w, h, Some(&label));
    }

    for f in layout.free.iter().filter(|f| f.panel == panel.id) {
        draw_scaled(&mut grid, scale, f.x, f.y, f.width, f.height, Some("~"));
    }

    let mut out = String::new();
    for row in &grid {
        let line: String = row.iter().collect();
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

fn draw_scaled(
    grid: &mut [Vec<char>],
    scale: f64,
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    label: Option<&str>,
) {
    let gx = (x * scale).round() as usize;
    let gy = (y * scale).round() as usize;
    let gw = (w * scale).round() as usize;
    let gh = (h * scale).round() as usize;
    if gw == 0 || gh == 0 {
        return;
    }

    draw_box(grid, gx, gy, gw, gh);

    if let Some(label) = label
        && gw > 2
        && gh > 1
    {
        let chars: Vec<char> = label.chars().collect();
        let cy = gy + gh / 2;
        let start = (gx + gw / 2).saturating_sub(chars.len() / 2);
        for (i, &ch) in chars.iter().enumerate() {
            let cx = start + i;
            if cx > gx && cx < gx + gw && cy > gy && cy < gy + gh {
                grid[cy][cx] = ch;
            }
        }
    }
}

fn draw_box(grid: &mut [Vec<char>], x: usize, y: usize, w: usize, h: usize) {
    let rows = grid.len();
    let cols = if rows > 0 { grid[0].len() } else { return };

    let mut put = |cx: usize, cy: usize, ch: char| {
        if cy < rows && cx < cols {
            let cell = &mut grid[cy][cx];
            *cell = match (*cell, ch) {
                ('|', '-') | ('-', '|') | ('+', _) | (_, '+') => '+',
                _ => ch,
            };
        }
    };

    for cx in x..=x + w {
        put(cx, y, '-');
        put(cx, y + h, '-');
    }
    for cy in y..=y + h {
        put(x, cy, '|');
        put(x + w, cy, '|');
    }
    for &cx in &[x, x + w] {
        for &cy in &[y, y + h] {
            put(cx, cy, '+');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{Method, SearchConfig, solve};
    use crate::types::{Item, Params};

    fn solved(items: Vec<Item>) -> Layout {
        let params = Params {
            cut_width: 0.0,
            min_initial_usage: false,
            panels: vec![Panel::new("p1", 100.0, 50.0)],
            items,
        };
        solve(Method::Greedy, params, &SearchConfig::default()).unwrap()
    }

    #[test]
    fn test_render_single_item() {
        let layout = solved(vec![Item::new("a", 100.0, 50.0, false)]);
        let panel = layout.params.panels[0].clone();
        let out = render_panel(&layout, &panel);
        assert!(out.contains('+'));
        assert!(out.contains('-'));
        assert!(out.contains('|'));
        assert!(out.contains('a'));
    }

    #[test]
    fn test_render_marks_leftover() {
        let layout = solved(vec![Item::new("a", 50.0, 50.0, false)]);
        let panel = layout.params.panels[0].clone();
        let out = render_panel(&layout, &panel);
        assert!(out.contains('a'));
        assert!(out.contains('~'));
    }

    #[test]
    fn test_render_empty_panel() {
        let layout = solved(vec![]);
        let panel = layout.params.panels[0].clone();
        let out = render_panel(&layout, &panel);
        // Outline plus the untouched free rect marker.
        assert!(out.contains('+'));
    }
}
