use crate::types::{FreeRect, Item, Layout};

/// Default weight of the packing-shape term in the score.
pub const DEFAULT_FITNESS_K: f64 = 0.03;

/// Scores a layout; lower is better.
///
/// The dominant term is the waste fraction per panel. The `k` term couples
/// the smallest used area with the largest leftover on a panel; both
/// extrema are floored at zero, matching the reference scoring exactly.
/// With `min_initial_usage` set, every still-untouched panel earns a flat
/// bonus so the search prefers to finish panels before opening new ones.
pub fn fitness(layout: &Layout, k: f64) -> f64 {
    let total_area = layout.params.total_panel_area();
    let mut score = 0.0;

    for panel in &layout.params.panels {
        let used_areas: Vec<f64> = layout
            .placements
            .iter()
            .filter(|p| p.panel == panel.id)
            .filter_map(|p| layout.params.item(&p.item))
            .map(Item::area)
            .collect();
        let unused_areas: Vec<f64> = layout
            .free
            .iter()
            .filter(|f| f.panel == panel.id)
            .map(FreeRect::area)
            .collect();

        let used_sum: f64 = used_areas.iter().sum();
        let min_used = used_areas.iter().copied().fold(0.0, f64::min);
        let max_unused = unused_areas.iter().copied().fold(0.0, f64::max);

        score += (panel.area() - used_sum) / total_area;
        score -= k * min_used * max_unused / (total_area * total_area);
    }

    if !layout.params.min_initial_usage {
        return score;
    }

    let untouched = layout
        .free
        .iter()
        .filter(|f| {
            layout
                .params
                .panel(&f.panel)
                .is_some_and(|panel| f.is_initial(panel))
        })
        .count();
    score - untouched as f64
}
