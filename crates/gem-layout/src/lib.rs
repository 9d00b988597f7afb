#![forbid(unsafe_code)]

//! GEM force-directed placement for undirected graphs.
//!
//! Vertices are inserted one at a time around the graph center, then relaxed globally and
//! finally pushed off nearby edges. Each vertex anneals with its own temperature.

pub mod config;
pub mod error;
pub mod gem;
pub mod graph;
pub mod scale;

pub use config::{ConfigError, GemConfig, PhaseConfig};
pub use error::{Error, Result};
pub use gem::{
    Body, Cancel, CancelToken, Embedder, HEAT_FLOOR, Never, Phase, PhaseReport, RunReport,
};
pub use graph::{Input, LayoutResult, NodeRecord, Point, Prepared};
pub use scale::{Rect, Viewport, bounding_box};

/// Headless layout entry point.
pub fn layout(input: &Input, config: &GemConfig) -> Result<LayoutResult> {
    layout_with_cancel(input, config, &mut Never)
}

/// Like [`layout`], polling `cancel` once per relaxation round.
///
/// An input without vertices yields an empty result rather than an error.
pub fn layout_with_cancel(
    input: &Input,
    config: &GemConfig,
    cancel: &mut impl Cancel,
) -> Result<LayoutResult> {
    let prepared = input.build()?;
    let graph = &prepared.graph;
    let mut embedder = Embedder::with_positions(graph, config.clone(), &prepared.initial)?;
    let report = match embedder.run(cancel) {
        Ok(report) => report,
        Err(Error::EmptyGraph) => return Ok(LayoutResult::default()),
        Err(err) => return Err(err),
    };

    let mut result = LayoutResult {
        report: Some(report),
        ..LayoutResult::default()
    };
    for v in graph.vertices() {
        let label = graph.label(v).unwrap_or_default().to_string();
        let body = &embedder.bodies()[v.index()];
        result.positions.insert(label.clone(), Point::from(body.position));
        result.heat.insert(label, body.heat);
    }
    Ok(result)
}
