use clap::Parser;
use cut_planner::render;
use cut_planner::{Error, Item, Panel, Params, SearchConfig, solve_named};

#[derive(Parser)]
#[command(name = "cut_planner", about = "2D guillotine cutting plan optimizer")]
struct Cli {
    /// Stock panels as id=WxH (e.g. board=2400x1200)
    #[arg(long = "panel", num_args = 1..)]
    panels: Vec<String>,

    /// Items to cut as id=WxH, with :r allowing rotation (e.g. shelf=800x300:r)
    #[arg(long = "item", num_args = 1..)]
    items: Vec<String>,

    /// Blade kerf width (default: 0)
    #[arg(long, default_value_t = 0.0)]
    cut_width: f64,

    /// Prefer plans that leave whole panels untouched
    #[arg(long)]
    min_initial_usage: bool,

    /// Search strategy: greedy or forward-greedy
    #[arg(long, default_value = "forward-greedy")]
    method: String,

    /// Abort after this many search steps
    #[arg(long)]
    step_limit: Option<usize>,

    /// Show ASCII layout of each panel
    #[arg(long)]
    layout: bool,
}

fn parse_dimensions(s: &str) -> Result<(f64, f64), String> {
    let parts: Vec<&str> = s.split('x').collect();
    if parts.len() != 2 {
        return Err(format!("invalid dimensions '{}', expected WxH", s));
    }
    let width = parts[0]
        .parse::<f64>()
        .map_err(|_| format!("invalid width in '{}'", s))?;
    let height = parts[1]
        .parse::<f64>()
        .map_err(|_| format!("invalid height in '{}'", s))?;
    if width <= 0.0 || height <= 0.0 {
        return Err(format!("dimensions must be positive in '{}'", s));
    }
    Ok((width, height))
}

fn parse_panel(s: &str) -> Result<Panel, String> {
    let (id, dims) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid panel '{}', expected id=WxH", s))?;
    let (width, height) = parse_dimensions(dims)?;
    Ok(Panel::new(id, width, height))
}

fn parse_item(s: &str) -> Result<Item, String> {
    let (id, rest) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid item '{}', expected id=WxH[:r]", s))?;
    let (dims, can_rotate) = match rest.strip_suffix(":r") {
        Some(dims) => (dims, true),
        None => (rest, false),
    };
    let (width, height) = parse_dimensions(dims)?;
    Ok(Item::new(id, width, height, can_rotate))
}

fn main() {
    let cli = Cli::parse();

    let panels: Vec<Panel> = cli
        .panels
        .iter()
        .map(|p| parse_panel(p))
        .collect::<Result<Vec<_>, _>>()
        .unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        });

    let items: Vec<Item> = cli
        .items
        .iter()
        .map(|i| parse_item(i))
        .collect::<Result<Vec<_>, _>>()
        .unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        });

    let params = Params {
        cut_width: cli.cut_width,
        min_initial_usage: cli.min_initial_usage,
        panels,
        items,
    };

    let config = SearchConfig {
        step_limit: cli.step_limit,
        ..SearchConfig::default()
    };

    let layout = match solve_named(&cli.method, params, &config) {
        Ok(layout) => layout,
        Err(Error::Unsolvable) => {
            eprintln!("Error: no solvable cutting plan exists for this input");
            std::process::exit(2);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    for panel in &layout.params.panels {
        let placements: Vec<_> = layout
            .placements
            .iter()
            .filter(|p| p.panel == panel.id)
            .collect();
        if placements.is_empty() {
            continue;
        }
        println!("Panel {} ({}x{}):", panel.id, panel.width, panel.height);
        for p in &placements {
            let rot = if p.rotated { " [rotated]" } else { "" };
            if let Some(item) = layout.params.item(&p.item) {
                println!("  {} @ ({}, {}){}", item, p.x, p.y, rot);
            }
        }
        for f in layout.free.iter().filter(|f| f.panel == panel.id) {
            println!("  leftover {}x{} @ ({}, {})", f.width, f.height, f.x, f.y);
        }
        if cli.layout {
            print!("{}", render::render_panel(&layout, panel));
        }
        println!();
    }

    let cuts: Vec<String> = layout.cuts.iter().map(|c| c.to_string()).collect();
    println!("Cuts: {}", cuts.join(", "));
    println!(
        "Summary: {} of {} panel{} used, {:.1}% waste",
        layout.panels_used(),
        layout.params.panels.len(),
        if layout.params.panels.len() == 1 { "" } else { "s" },
        layout.waste_percent(),
    );
}
