use crate::error::{Error, Result};
use crate::types::{Cut, FreeRect, Item, Layout, Placement};

/// Enumerates every legal single-placement successor of `layout`.
///
/// The next item is fixed (largest longest-side first); the branching comes
/// from which free rect receives it, whether it is rotated, and which way
/// the guillotine cut runs. An empty result means the layout is a dead end.
pub fn next_layouts(layout: &Layout) -> Result<Vec<Layout>> {
    let item = select_item(layout)?;
    Ok(layouts_for_item(layout, item))
}

/// Picks the unplaced item with the largest longest side. The comparison is
/// strict, so ties keep the item that comes first in the input order.
fn select_item(layout: &Layout) -> Result<&Item> {
    let mut selected: Option<&Item> = None;
    for item in &layout.params.items {
        if layout.is_placed(&item.id) {
            continue;
        }
        if selected.is_none_or(|s| item.longest_side() > s.longest_side()) {
            selected = Some(item);
        }
    }
    selected.ok_or(Error::LayoutDone)
}

fn layouts_for_item(layout: &Layout, item: &Item) -> Vec<Layout> {
    let mut ret = Vec::new();

    // Un-rotated pass over every free rect first, then a rotated pass if the
    // item allows it. Candidate order is load-bearing: ties in fitness are
    // resolved by whichever candidate was enumerated first.
    let rotations: &[bool] = if item.can_rotate {
        &[false, true]
    } else {
        &[false]
    };

    for &rotate in rotations {
        for (index, free) in layout.free.iter().enumerate() {
            for cut in [Cut::Vertical, Cut::Horizontal] {
                let Some((placement, leftover)) =
                    cut_from_free(free, item, rotate, layout.params.cut_width, cut)
                else {
                    continue;
                };
                ret.push(apply_step(layout, index, placement, leftover, cut));
            }
        }
    }

    ret
}

/// Tries to cut `item` out of `free` at its origin corner.
///
/// A vertical cut keeps the strip right of the item across the full height
/// of the free rect; a horizontal cut keeps the strip below the item at the
/// item's width. Either way at most one leftover survives: the far corner
/// is discarded. The kerf is subtracted from the leftover dimension.
fn cut_from_free(
    free: &FreeRect,
    item: &Item,
    rotate: bool,
    cut_width: f64,
    cut: Cut,
) -> Option<(Placement, Option<FreeRect>)> {
    let (item_width, item_height) = if rotate {
        (item.height, item.width)
    } else {
        (item.width, item.height)
    };

    if free.width < item_width || free.height < item_height {
        return None;
    }

    let placement = Placement {
        panel: free.panel.clone(),
        item: item.id.clone(),
        x: free.x,
        y: free.y,
        rotated: rotate,
    };

    let leftover = match cut {
        Cut::Vertical => {
            let width = free.width - item_width - cut_width;
            (width > 0.0 && free.height > 0.0).then(|| FreeRect {
                panel: free.panel.clone(),
                width,
                height: free.height,
                x: free.x + item_width + cut_width,
                y: free.y,
            })
        }
        Cut::Horizontal => {
            let height = free.height - item_height - cut_width;
            (height > 0.0 && item_width > 0.0).then(|| FreeRect {
                panel: free.panel.clone(),
                width: item_width,
                height,
                x: free.x,
                y: free.y + item_height + cut_width,
            })
        }
    };

    Some((placement, leftover))
}

/// Derives the successor layout: the consumed free rect is replaced in
/// position by the leftover (if any), the placement and cut are appended.
/// The input layout is left untouched.
fn apply_step(
    layout: &Layout,
    index: usize,
    placement: Placement,
    leftover: Option<FreeRect>,
    cut: Cut,
) -> Layout {
    let mut placements = Vec::with_capacity(layout.placements.len() + 1);
    placements.extend_from_slice(&layout.placements);
    placements.push(placement);

    let mut free = Vec::with_capacity(layout.free.len());
    free.extend_from_slice(&layout.free[..index]);
    free.extend(leftover);
    free.extend_from_slice(&layout.free[index + 1..]);

    let mut cuts = Vec::with_capacity(layout.cuts.len() + 1);
    cuts.extend_from_slice(&layout.cuts);
    cuts.push(cut);

    Layout {
        params: layout.params.clone(),
        placements,
        free,
        cuts,
    }
}
