use std::str::FromStr;

use crate::error::{Error, Result};
use crate::fitness::{DEFAULT_FITNESS_K, fitness};
use crate::generate::next_layouts;
use crate::types::{Layout, Params};

/// Search strategy selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Single-ply search: take the best-scoring immediate candidate.
    Greedy,
    /// One-ply lookahead: score each immediate candidate by the fitness of
    /// its completed greedy continuation.
    ForwardGreedy,
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "greedy" => Ok(Method::Greedy),
            "forward-greedy" | "forward_greedy" => Ok(Method::ForwardGreedy),
            other => Err(Error::UnsupportedMethod(other.to_string())),
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Method::Greedy => write!(f, "greedy"),
            Method::ForwardGreedy => write!(f, "forward-greedy"),
        }
    }
}

/// Knobs for one planning run.
#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    /// Weight of the packing-shape term in the fitness score.
    pub fitness_k: f64,
    /// Abort with [`Error::StepLimit`] once this many search steps (outer
    /// and nested combined) have been taken. `None` means unbounded, which
    /// can be exponential in the worst case.
    pub step_limit: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            fitness_k: DEFAULT_FITNESS_K,
            step_limit: None,
        }
    }
}

/// Entry point for callers that carry the strategy as a string, e.g. the
/// HTTP server. Unknown names fail before any search work happens.
pub fn solve_named(method: &str, params: Params, config: &SearchConfig) -> Result<Layout> {
    solve(method.parse()?, params, config)
}

/// Validates the input, builds the initial layout and runs the chosen
/// strategy to a terminal layout.
pub fn solve(method: Method, params: Params, config: &SearchConfig) -> Result<Layout> {
    params.validate()?;
    tracing::info!(
        %method,
        panels = params.panels.len(),
        items = params.items.len(),
        cut_width = params.cut_width,
        "computing cutting plan"
    );

    let initial = Layout::initial(params);
    let mut steps = 0usize;
    let layout = match method {
        Method::Greedy => greedy(initial, config, &mut steps),
        Method::ForwardGreedy => forward_greedy(initial, config, &mut steps),
    }?;

    tracing::info!(
        steps,
        placements = layout.placements.len(),
        waste_percent = layout.waste_percent(),
        "plan complete"
    );
    Ok(layout)
}

fn take_step(config: &SearchConfig, steps: &mut usize) -> Result<()> {
    *steps += 1;
    if let Some(limit) = config.step_limit
        && *steps > limit
    {
        return Err(Error::StepLimit(limit));
    }
    Ok(())
}

/// Advances to the lowest-fitness immediate candidate until the layout is
/// complete. The comparison is strict, so fitness ties go to the candidate
/// enumerated first.
fn greedy(mut layout: Layout, config: &SearchConfig, steps: &mut usize) -> Result<Layout> {
    while !layout.is_done() {
        take_step(config, steps)?;

        let mut best: Option<(Layout, f64)> = None;
        for candidate in next_layouts(&layout)? {
            let score = fitness(&candidate, config.fitness_k);
            if best.as_ref().is_none_or(|(_, s)| score < *s) {
                best = Some((candidate, score));
            }
        }

        let Some((next, score)) = best else {
            return Err(Error::Unsolvable);
        };
        tracing::debug!(placed = next.placements.len(), score, "greedy step");
        layout = next;
    }
    Ok(layout)
}

/// One-ply lookahead: each immediate candidate is judged by the fitness of
/// a full greedy completion starting from it. Only one step is committed
/// per iteration; the nested completion is thrown away. Candidates whose
/// completion is unsolvable are skipped, and the whole search fails only
/// when every candidate at some step is unsolvable.
fn forward_greedy(mut layout: Layout, config: &SearchConfig, steps: &mut usize) -> Result<Layout> {
    while !layout.is_done() {
        take_step(config, steps)?;

        let mut best: Option<(Layout, f64)> = None;
        for candidate in next_layouts(&layout)? {
            let completed = match greedy(candidate.clone(), config, steps) {
                Ok(completed) => completed,
                Err(Error::Unsolvable) => continue,
                Err(e) => return Err(e),
            };
            let score = fitness(&completed, config.fitness_k);
            if best.as_ref().is_none_or(|(_, s)| score < *s) {
                best = Some((candidate, score));
            }
        }

        let Some((next, score)) = best else {
            return Err(Error::Unsolvable);
        };
        tracing::debug!(placed = next.placements.len(), score, "lookahead step");
        layout = next;
    }
    Ok(layout)
}
