//! Controller-script generation.
//!
//! Both rendering paths attach the same behavior: one `attach(wrapper)` body
//! is generated from the enabled controls and wrapped for its scope: inline
//! inside a single static-artifact wrapper, or page-wide over every
//! `.mermaid` element once the engine's asynchronous layout pass has had time
//! to settle.

use crate::viewport::ZOOM_STEP;
use selkie_core::ControlsConfig;

/// Delay between `DOMContentLoaded` and controls installation in live mode,
/// giving the external diagram engine time to finish its own layout pass.
pub const LAYOUT_SETTLE_DELAY_MS: u32 = 100;

/// Where a generated controller instance applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerScope {
    /// One static-artifact wrapper; the script tag sits inside it.
    Wrapper,
    /// Every `.mermaid` element found after the document loads.
    Live,
}

/// Options consumed by the script and stylesheet generators.
#[derive(Debug, Clone)]
pub struct ControllerOptions {
    pub controls: ControlsConfig,
    pub diagram_draggable: bool,
    pub debug: bool,
}

/// One overlay button in the shared intermediate representation. The HTML
/// emitter (static path) and the `createElement` emitter (live path) both
/// read from this.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ControlButton {
    pub action: &'static str,
    pub glyph: &'static str,
    pub title: &'static str,
}

pub(crate) fn enabled_buttons(controls: &ControlsConfig) -> Vec<ControlButton> {
    let all = [
        (controls.zoom_in, "zoom-in", "🔍", "Zoom In"),
        (controls.zoom_out, "zoom-out", "🔎", "Zoom Out"),
        (controls.reset, "reset", "↺", "Reset"),
        (controls.download, "download", "💾", "Download SVG"),
        (controls.fullscreen, "fullscreen", "⛶", "Fullscreen"),
    ];
    all.iter()
        .filter(|(enabled, ..)| *enabled)
        .map(|&(_, action, glyph, title)| ControlButton {
            action,
            glyph,
            title,
        })
        .collect()
}

/// Generates the controller script body (no `<script>` tag) for a scope.
pub fn controller_script(scope: ControllerScope, options: &ControllerOptions) -> String {
    let mut out = String::with_capacity(4096);
    out.push_str("(function () {\n");
    out.push_str(&attach_fn(options));
    match scope {
        ControllerScope::Wrapper => {
            out.push_str("attach(document.currentScript.parentElement);\n");
        }
        ControllerScope::Live => {
            out.push_str("document.addEventListener('DOMContentLoaded', function () {\n");
            out.push_str("  setTimeout(function () {\n");
            out.push_str(
                "    document.querySelectorAll('.mermaid').forEach(function (el) {\n",
            );
            out.push_str("      if (el.closest('.mermaid-wrapper')) return;\n");
            out.push_str("      var w = document.createElement('div');\n");
            out.push_str("      w.className = 'mermaid-wrapper';\n");
            out.push_str("      el.parentNode.insertBefore(w, el);\n");
            out.push_str("      w.appendChild(el);\n");
            if options.controls.enable {
                out.push_str("      var c = document.createElement('div');\n");
                out.push_str("      c.className = 'mermaid-controls';\n");
                for (i, button) in enabled_buttons(&options.controls).iter().enumerate() {
                    out.push_str(&format!(
                        "      var b{i} = document.createElement('button');\n      b{i}.innerHTML = '{glyph}';\n      b{i}.title = '{title}';\n      b{i}.dataset.action = '{action}';\n      c.appendChild(b{i});\n",
                        glyph = button.glyph,
                        title = button.title,
                        action = button.action,
                    ));
                }
                out.push_str("      w.appendChild(c);\n");
            }
            out.push_str("      attach(w);\n");
            out.push_str("    });\n");
            out.push_str(&format!("  }}, {LAYOUT_SETTLE_DELAY_MS});\n"));
            out.push_str("});\n");
        }
    }
    out.push_str("})();");
    out
}

/// The shared `attach(wrapper)` body: pan/zoom state, button actions, overlay
/// drag. Mirrors [`crate::viewport::ViewportState`] transition for
/// transition.
fn attach_fn(options: &ControllerOptions) -> String {
    let mut js = String::with_capacity(3072);
    js.push_str("function attach(w) {\n");
    js.push_str("  var s = w.querySelector('svg');\n");
    js.push_str("  if (!s) return;\n");
    js.push_str("  var c = w.querySelector('.mermaid-controls');\n");
    if options.debug {
        js.push_str("  console.log('[Mermaid Debug] controller attached', w);\n");
    }
    js.push_str("  var sc = 1, tx = 0, ty = 0, dragging = false, px = 0, py = 0;\n");
    js.push_str("  function readBack() {\n");
    js.push_str(
        "    var t = s.style.transform.match(/translate\\((-?[\\d.]+)px,\\s*(-?[\\d.]+)px\\)/);\n",
    );
    js.push_str("    if (t) { tx = parseFloat(t[1]); ty = parseFloat(t[2]); } else { tx = 0; ty = 0; }\n");
    js.push_str("    var m = s.style.transform.match(/scale\\(([\\d.]+)\\)/);\n");
    js.push_str("    sc = m ? parseFloat(m[1]) : 1;\n");
    js.push_str("  }\n");
    js.push_str("  function apply() {\n");
    js.push_str(
        "    s.style.transform = 'translate(' + tx + 'px, ' + ty + 'px)' + (sc !== 1 ? ' scale(' + sc + ')' : '');\n",
    );
    js.push_str("    s.style.transformOrigin = 'top left';\n");
    js.push_str("  }\n");

    // Button actions. The handler covers every action; buttons that were not
    // emitted simply never fire.
    js.push_str("  if (c) c.addEventListener('click', function (e) {\n");
    js.push_str("    var btn = e.target.closest('button');\n");
    js.push_str("    if (!btn) return;\n");
    js.push_str("    var action = btn.dataset.action;\n");
    js.push_str(&format!(
        "    if (action === 'zoom-in') {{ sc = sc * {ZOOM_STEP}; apply(); }}\n"
    ));
    js.push_str(&format!(
        "    else if (action === 'zoom-out') {{ sc = sc / {ZOOM_STEP}; apply(); }}\n"
    ));
    js.push_str("    else if (action === 'reset') {\n");
    js.push_str("      sc = 1; tx = 0; ty = 0;\n");
    js.push_str("      s.style.transform = '';\n");
    js.push_str("      s.style.transformOrigin = 'top left';\n");
    js.push_str("    }\n");
    js.push_str("    else if (action === 'download') {\n");
    js.push_str("      var clone = s.cloneNode(true);\n");
    js.push_str("      clone.removeAttribute('style');\n");
    js.push_str(
        "      var svg = clone.outerHTML.replace(/<br\\s*\\/?>/gi, '').replace(/<\\/p>/gi, '').replace(/&nbsp;/gi, '&#160;');\n",
    );
    js.push_str("      var b = new Blob([svg], { type: 'image/svg+xml' });\n");
    js.push_str("      var u = URL.createObjectURL(b);\n");
    js.push_str("      var a = document.createElement('a');\n");
    js.push_str("      a.href = u;\n");
    js.push_str("      a.download = 'mermaid-diagram.svg';\n");
    js.push_str("      a.click();\n");
    js.push_str("      URL.revokeObjectURL(u);\n");
    js.push_str("    }\n");
    js.push_str("    else if (action === 'fullscreen') {\n");
    js.push_str("      if (w.classList.contains('fullscreen')) {\n");
    js.push_str("        w.classList.remove('fullscreen');\n");
    js.push_str("        btn.innerHTML = '⛶';\n");
    js.push_str("        btn.title = 'Fullscreen';\n");
    js.push_str("      } else {\n");
    js.push_str("        w.classList.add('fullscreen');\n");
    js.push_str("        btn.innerHTML = '✕';\n");
    js.push_str("        btn.title = 'Close';\n");
    js.push_str("      }\n");
    js.push_str("      c.style.top = ''; c.style.left = ''; c.style.right = ''; c.style.bottom = '';\n");
    js.push_str("    }\n");
    js.push_str("  });\n");

    // Overlay drag: repositions the controls box with absolute offsets,
    // entirely decoupled from the diagram's own pan state. Global move/up
    // handlers are assigned per drag session and cleared on release.
    if options.controls.draggable {
        js.push_str("  if (c) c.addEventListener('mousedown', function (e) {\n");
        js.push_str("    e.preventDefault();\n");
        js.push_str("    var cx = e.clientX, cy = e.clientY;\n");
        js.push_str("    document.onmousemove = function (ev) {\n");
        js.push_str("      ev.preventDefault();\n");
        js.push_str("      var dx = cx - ev.clientX, dy = cy - ev.clientY;\n");
        js.push_str("      cx = ev.clientX; cy = ev.clientY;\n");
        js.push_str("      c.style.top = (c.offsetTop - dy) + 'px';\n");
        js.push_str("      c.style.left = (c.offsetLeft - dx) + 'px';\n");
        js.push_str("      c.style.right = 'auto'; c.style.bottom = 'auto';\n");
        js.push_str("    };\n");
        js.push_str("    document.onmouseup = function () {\n");
        js.push_str("      document.onmousemove = null;\n");
        js.push_str("      document.onmouseup = null;\n");
        js.push_str("    };\n");
        js.push_str("  });\n");
    }

    // Diagram pan. Pointer-downs that originate on the controls overlay or
    // its buttons never start a pan session.
    if options.diagram_draggable {
        js.push_str("  w.style.cursor = 'grab';\n");
        js.push_str("  s.style.userSelect = 'none';\n");
        js.push_str("  w.addEventListener('mousedown', function (e) {\n");
        js.push_str(
            "    if (e.target.closest('.mermaid-controls') || e.target.closest('button')) return;\n",
        );
        js.push_str("    e.preventDefault();\n");
        js.push_str("    dragging = true;\n");
        js.push_str("    w.style.cursor = 'grabbing';\n");
        js.push_str("    px = e.clientX; py = e.clientY;\n");
        js.push_str("    readBack();\n");
        js.push_str("    var bx = tx, by = ty;\n");
        if options.debug {
            js.push_str(
                "    console.log('[Mermaid Debug] drag start', { px: px, py: py, bx: bx, by: by, sc: sc });\n",
            );
        }
        js.push_str("    document.onmousemove = function (ev) {\n");
        js.push_str("      if (!dragging) return;\n");
        js.push_str("      ev.preventDefault();\n");
        js.push_str("      tx = bx + (ev.clientX - px);\n");
        js.push_str("      ty = by + (ev.clientY - py);\n");
        js.push_str("      apply();\n");
        js.push_str("    };\n");
        js.push_str("    document.onmouseup = function () {\n");
        js.push_str("      if (!dragging) return;\n");
        js.push_str("      dragging = false;\n");
        js.push_str("      readBack();\n");
        js.push_str("      w.style.cursor = 'grab';\n");
        if options.debug {
            js.push_str(
                "      console.log('[Mermaid Debug] drag end', { tx: tx, ty: ty, sc: sc });\n",
            );
        }
        js.push_str("      document.onmousemove = null;\n");
        js.push_str("      document.onmouseup = null;\n");
        js.push_str("    };\n");
        js.push_str("  });\n");
    }

    js.push_str("}\n");
    js
}
