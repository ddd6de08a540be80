//! Click-region mapping for rendered graph images
//!
//! The layout engine reports an overall bounding box and one coordinate per
//! node, in layout units; the rasterized image has its own pixel size. This
//! module scales the node coordinates into pixel space and emits fixed-size
//! rectangles suitable for an HTML image map.

use thiserror::Error;

use crate::graph::ROOT_ID;

/// Click rectangle width in image pixels
pub const REGION_WIDTH: f64 = 80.0;
/// Click rectangle height in image pixels
pub const REGION_HEIGHT: f64 = 25.0;

#[derive(Debug, Error)]
pub enum LayoutError {
    /// The layout output carried no overall `graph` bounds line
    #[error("layout output is missing the graph bounds line")]
    MissingBounds,
    /// A line could not be parsed as bounds or node coordinates
    #[error("unparseable layout line `{0}`")]
    Malformed(String),
}

/// Overall graph bounding box in layout units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutBounds {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl LayoutBounds {
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }
}

/// Parsed output of the external layout engine
#[derive(Debug, Clone)]
pub struct LayoutReport {
    pub bounds: LayoutBounds,
    /// Node identifier plus its layout-unit center coordinate
    pub positions: Vec<(String, f64, f64)>,
}

/// A clickable rectangle in image pixel coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct ClickRegion {
    pub id: String,
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl LayoutReport {
    /// Parse the layout engine's textual output.
    ///
    /// Accepts graphviz-plain-shaped lines: a `graph` line carrying either
    /// `width height` (origin assumed at zero), `scale width height`, or an
    /// explicit `x0 y0 x1 y1` box, and `node <name> <x> <y> …` lines where
    /// the name may be double-quoted. `edge`/`stop` lines and `#` comments
    /// are ignored.
    pub fn parse(text: &str) -> Result<Self, LayoutError> {
        let mut bounds = None;
        let mut positions = Vec::new();

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some(rest) = line.strip_prefix("graph ") {
                bounds = Some(parse_bounds(rest, line)?);
            } else if let Some(rest) = line.strip_prefix("node ") {
                positions.push(parse_node(rest, line)?);
            } else if line.starts_with("edge ") || line == "stop" {
                continue;
            } else {
                return Err(LayoutError::Malformed(line.to_string()));
            }
        }

        let bounds = bounds.ok_or(LayoutError::MissingBounds)?;
        Ok(Self { bounds, positions })
    }

    /// Compute click rectangles for an image rasterized at the given pixel
    /// size, one fixed 80x25 rectangle centered on each node, root excluded.
    ///
    /// Both axes scale by the horizontal ratio, and the vertical axis flips
    /// from layout coordinates (origin bottom-left) to image pixels (origin
    /// top-left). Reusing the horizontal ratio vertically reproduces the
    /// click maps existing deployments were generated with; see DESIGN.md
    /// before changing it.
    pub fn click_regions(&self, image_width: f64, image_height: f64) -> Vec<ClickRegion> {
        let ratio_w = self.bounds.width() / image_width;
        if !(ratio_w.is_finite() && ratio_w > 0.0) {
            return Vec::new();
        }

        self.positions
            .iter()
            .filter(|(id, _, _)| id != ROOT_ID)
            .map(|(id, x, y)| {
                let px = x / ratio_w;
                let py = image_height - y / ratio_w;
                ClickRegion {
                    id: id.clone(),
                    left: px - REGION_WIDTH / 2.0,
                    top: py - REGION_HEIGHT / 2.0,
                    right: px + REGION_WIDTH / 2.0,
                    bottom: py + REGION_HEIGHT / 2.0,
                }
            })
            .collect()
    }
}

fn parse_bounds(rest: &str, line: &str) -> Result<LayoutBounds, LayoutError> {
    let malformed = || LayoutError::Malformed(line.to_string());
    let fields: Vec<f64> = rest
        .split_whitespace()
        .map(|f| f.parse::<f64>())
        .collect::<Result<_, _>>()
        .map_err(|_| malformed())?;

    match fields.as_slice() {
        // plain format: width height, origin at zero
        [w, h] => Ok(LayoutBounds { x0: 0.0, y0: 0.0, x1: *w, y1: *h }),
        // plain format with leading scale factor
        [_scale, w, h] => Ok(LayoutBounds { x0: 0.0, y0: 0.0, x1: *w, y1: *h }),
        // explicit bounding box
        [x0, y0, x1, y1] => Ok(LayoutBounds { x0: *x0, y0: *y0, x1: *x1, y1: *y1 }),
        _ => Err(malformed()),
    }
}

fn parse_node(rest: &str, line: &str) -> Result<(String, f64, f64), LayoutError> {
    let malformed = || LayoutError::Malformed(line.to_string());
    let rest = rest.trim_start();

    let (name, tail) = if let Some(quoted) = rest.strip_prefix('"') {
        let end = quoted.find('"').ok_or_else(malformed)?;
        (&quoted[..end], &quoted[end + 1..])
    } else {
        rest.split_once(char::is_whitespace).ok_or_else(malformed)?
    };

    let mut fields = tail.split_whitespace();
    let x: f64 = fields
        .next()
        .and_then(|f| f.parse().ok())
        .ok_or_else(malformed)?;
    let y: f64 = fields
        .next()
        .and_then(|f| f.parse().ok())
        .ok_or_else(malformed)?;
    Ok((name.to_string(), x, y))
}
