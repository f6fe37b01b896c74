//! Pan/zoom state for one rendered diagram.
//!
//! The generated controller script (see [`crate::script`]) mirrors these
//! transitions exactly; this model is the unit-tested reference shared by the
//! static-artifact and live rendering paths, so the two can never drift apart
//! again on reset-vs-scale semantics.

/// Multiplier applied per zoom step.
pub const ZOOM_STEP: f64 = 1.2;

/// Client-side viewport state, one instance per diagram.
///
/// `scale` stays strictly positive; the identity state (`scale == 1`,
/// `translate == (0, 0)`) renders as *no* inline transform at all.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportState {
    pub scale: f64,
    pub translate: (f64, f64),
    dragging: bool,
    drag_origin: Option<(f64, f64)>,
    baseline: (f64, f64),
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            scale: 1.0,
            translate: (0.0, 0.0),
            dragging: false,
            drag_origin: None,
            baseline: (0.0, 0.0),
        }
    }
}

impl ViewportState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// CSS transform for the current state, `None` when identity (the inline
    /// transform is cleared rather than written as a no-op).
    pub fn transform(&self) -> Option<String> {
        if self.scale == 1.0 && self.translate == (0.0, 0.0) {
            return None;
        }
        let (tx, ty) = self.translate;
        let mut out = format!("translate({tx}px, {ty}px)");
        if self.scale != 1.0 {
            out.push_str(&format!(" scale({})", self.scale));
        }
        Some(out)
    }

    /// Pointer-down over the diagram body. The baseline is re-read from the
    /// committed transform, so a drag that follows `reset` starts from (0, 0)
    /// rather than a stale offset.
    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.baseline = self.translate;
        self.drag_origin = Some((x, y));
        self.dragging = true;
    }

    /// Pointer-move while dragging: translate = baseline + pointer delta.
    /// Scale is preserved. Ignored outside a drag session.
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        if !self.dragging {
            return;
        }
        let Some((ox, oy)) = self.drag_origin else {
            return;
        };
        self.translate = (self.baseline.0 + (x - ox), self.baseline.1 + (y - oy));
    }

    /// Pointer-up: commit the translate into the baseline so the next drag
    /// continues from here.
    pub fn pointer_up(&mut self) {
        if !self.dragging {
            return;
        }
        self.baseline = self.translate;
        self.drag_origin = None;
        self.dragging = false;
    }

    pub fn zoom_in(&mut self) {
        self.scale *= ZOOM_STEP;
    }

    pub fn zoom_out(&mut self) {
        self.scale /= ZOOM_STEP;
    }

    /// Restores the identity transform and forgets any drag baseline.
    pub fn reset(&mut self) {
        self.scale = 1.0;
        self.translate = (0.0, 0.0);
        self.baseline = (0.0, 0.0);
        self.drag_origin = None;
        self.dragging = false;
    }
}
