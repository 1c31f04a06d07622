use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A stock panel that items are cut from. Fixed input, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    pub id: String,
    pub width: f64,
    pub height: f64,
}

impl Panel {
    pub fn new(id: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            width,
            height,
        }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// A rectangular piece that must be cut from some panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub can_rotate: bool,
}

impl Item {
    pub fn new(id: impl Into<String>, width: f64, height: f64, can_rotate: bool) -> Self {
        Self {
            id: id.into(),
            width,
            height,
            can_rotate,
        }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Longer of the two sides; drives the placement order.
    pub fn longest_side(&self) -> f64 {
        self.width.max(self.height)
    }
}

impl std::fmt::Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}x{})", self.id, self.width, self.height)
    }
}

/// Input to one planning run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Params {
    /// Blade kerf, lost at every cut.
    #[serde(default)]
    pub cut_width: f64,
    /// Prefer plans that leave whole panels untouched.
    #[serde(default)]
    pub min_initial_usage: bool,
    pub panels: Vec<Panel>,
    pub items: Vec<Item>,
}

impl Params {
    pub fn panel(&self, id: &str) -> Option<&Panel> {
        self.panels.iter().find(|p| p.id == id)
    }

    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn total_panel_area(&self) -> f64 {
        self.panels.iter().map(Panel::area).sum()
    }

    /// Checks the input contract: non-negative kerf, at least one panel,
    /// unique ids, positive dimensions.
    pub fn validate(&self) -> Result<()> {
        if !self.cut_width.is_finite() || self.cut_width < 0.0 {
            return Err(Error::InvalidParams(format!(
                "cut width must be finite and >= 0, got {}",
                self.cut_width
            )));
        }
        if self.panels.is_empty() {
            return Err(Error::InvalidParams("at least one panel required".into()));
        }
        for (i, panel) in self.panels.iter().enumerate() {
            if panel.width <= 0.0 || panel.height <= 0.0 {
                return Err(Error::InvalidParams(format!(
                    "panel '{}' has non-positive dimensions {}x{}",
                    panel.id, panel.width, panel.height
                )));
            }
            if self.panels[..i].iter().any(|p| p.id == panel.id) {
                return Err(Error::InvalidParams(format!(
                    "duplicate panel id '{}'",
                    panel.id
                )));
            }
        }
        for (i, item) in self.items.iter().enumerate() {
            if item.width <= 0.0 || item.height <= 0.0 {
                return Err(Error::InvalidParams(format!(
                    "item '{}' has non-positive dimensions {}x{}",
                    item.id, item.width, item.height
                )));
            }
            if self.items[..i].iter().any(|p| p.id == item.id) {
                return Err(Error::InvalidParams(format!(
                    "duplicate item id '{}'",
                    item.id
                )));
            }
        }
        Ok(())
    }
}

/// Direction of a guillotine cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cut {
    Vertical,
    Horizontal,
}

impl std::fmt::Display for Cut {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cut::Vertical => write!(f, "vertical"),
            Cut::Horizontal => write!(f, "horizontal"),
        }
    }
}

/// One placed item. Panels and items are referenced by id so that the
/// association survives layout snapshots being cloned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub panel: String,
    pub item: String,
    pub x: f64,
    pub y: f64,
    pub rotated: bool,
}

/// A rectangle of a panel not yet assigned to any placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreeRect {
    pub panel: String,
    pub width: f64,
    pub height: f64,
    pub x: f64,
    pub y: f64,
}

impl FreeRect {
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// True if this rect still covers its whole panel, i.e. the panel has
    /// not been touched by any cut.
    pub fn is_initial(&self, panel: &Panel) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.width == panel.width && self.height == panel.height
    }
}

/// A snapshot of planning progress: placements so far, remaining free
/// rectangles, and the chronological cut directions.
///
/// Layouts are persistent values: every search step derives a new `Layout`
/// and never mutates an existing one. The lookahead strategy depends on
/// this, since it explores many continuations of the same snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub params: Arc<Params>,
    pub placements: Vec<Placement>,
    pub free: Vec<FreeRect>,
    pub cuts: Vec<Cut>,
}

impl Layout {
    /// Starting point of a search: nothing placed, one free rect covering
    /// each panel in full.
    pub fn initial(params: Params) -> Self {
        let free = params
            .panels
            .iter()
            .map(|p| FreeRect {
                panel: p.id.clone(),
                width: p.width,
                height: p.height,
                x: 0.0,
                y: 0.0,
            })
            .collect();
        Self {
            params: Arc::new(params),
            placements: Vec::new(),
            free,
            cuts: Vec::new(),
        }
    }

    pub fn is_done(&self) -> bool {
        self.placements.len() == self.params.items.len()
    }

    pub fn is_placed(&self, item_id: &str) -> bool {
        self.placements.iter().any(|p| p.item == item_id)
    }

    /// Total area of all placed items.
    pub fn placed_area(&self) -> f64 {
        self.placements
            .iter()
            .filter_map(|p| self.params.item(&p.item))
            .map(Item::area)
            .sum()
    }

    /// Share of the total stock area not covered by placed items.
    pub fn waste_percent(&self) -> f64 {
        let total = self.params.total_panel_area();
        if total == 0.0 {
            return 0.0;
        }
        (total - self.placed_area()) / total * 100.0
    }

    /// Number of distinct panels that carry at least one placement.
    pub fn panels_used(&self) -> usize {
        self.params
            .panels
            .iter()
            .filter(|panel| self.placements.iter().any(|p| p.panel == panel.id))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params_one_panel() -> Params {
        Params {
            cut_width: 0.0,
            min_initial_usage: false,
            panels: vec![Panel::new("p1", 100.0, 50.0)],
            items: vec![Item::new("a", 10.0, 20.0, false)],
        }
    }

    #[test]
    fn test_initial_layout() {
        let layout = Layout::initial(params_one_panel());
        assert!(layout.placements.is_empty());
        assert!(layout.cuts.is_empty());
        assert_eq!(layout.free.len(), 1);
        let free = &layout.free[0];
        assert_eq!(free.panel, "p1");
        assert_eq!((free.x, free.y), (0.0, 0.0));
        assert_eq!((free.width, free.height), (100.0, 50.0));
        assert!(!layout.is_done());
    }

    #[test]
    fn test_no_items_is_done() {
        let mut params = params_one_panel();
        params.items.clear();
        let layout = Layout::initial(params);
        assert!(layout.is_done());
        assert_eq!(layout.waste_percent(), 100.0);
    }

    #[test]
    fn test_validate_ok() {
        assert!(params_one_panel().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_negative_kerf() {
        let mut params = params_one_panel();
        params.cut_width = -1.0;
        assert!(matches!(params.validate(), Err(Error::InvalidParams(_))));
    }

    #[test]
    fn test_validate_rejects_empty_panels() {
        let mut params = params_one_panel();
        params.panels.clear();
        assert!(matches!(params.validate(), Err(Error::InvalidParams(_))));
    }

    #[test]
    fn test_validate_rejects_duplicate_ids() {
        let mut params = params_one_panel();
        params.panels.push(Panel::new("p1", 10.0, 10.0));
        assert!(matches!(params.validate(), Err(Error::InvalidParams(_))));

        let mut params = params_one_panel();
        params.items.push(Item::new("a", 5.0, 5.0, true));
        assert!(matches!(params.validate(), Err(Error::InvalidParams(_))));
    }

    #[test]
    fn test_validate_rejects_zero_dimensions() {
        let mut params = params_one_panel();
        params.items[0].width = 0.0;
        assert!(matches!(params.validate(), Err(Error::InvalidParams(_))));
    }

    #[test]
    fn test_item_display() {
        let item = Item::new("shelf", 80.0, 30.5, true);
        assert_eq!(item.to_string(), "shelf (80x30.5)");
    }

    #[test]
    fn test_is_initial() {
        let panel = Panel::new("p1", 100.0, 50.0);
        let full = FreeRect {
            panel: "p1".into(),
            width: 100.0,
            height: 50.0,
            x: 0.0,
            y: 0.0,
        };
        assert!(full.is_initial(&panel));
        let offcut = FreeRect {
            width: 40.0,
            ..full.clone()
        };
        assert!(!offcut.is_initial(&panel));
    }
}
