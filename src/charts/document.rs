//! HTML Chart Document
//! Wraps the rendered SVG with a tooltip overlay and a small pointer script.
//!
//! The script hit-tests the pointer against every mark's drawn circle
//! (topmost mark wins), shows the tooltip next to the pointer when a mark is
//! entered and fades it out when the mark is left. Fades are plain CSS
//! opacity transitions, so a new one simply replaces whatever is running.

use crate::charts::layout::{BubbleLayout, Mark};
use crate::charts::renderer::RenderError;
use crate::config::ChartConfig;
use serde::Serialize;

/// Pointer offset of the tooltip box, in CSS pixels.
const TOOLTIP_OFFSET: (i32, i32) = (5, -28);

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>__TITLE__</title>
<style>
  body { font-family: sans-serif; margin: 0; }
  .chart { display: inline-block; }
  .tooltip {
    position: absolute;
    pointer-events: none;
    opacity: 0;
    padding: 6px 8px;
    background: #ffffff;
    border: 1px solid #333333;
    border-radius: 4px;
    font-size: 12px;
    line-height: 1.4;
  }
</style>
</head>
<body>
<div class="chart">
__SVG__
</div>
<div class="tooltip" id="tooltip"></div>
<script>
(function () {
  const marks = __MARKS__;
  const size = { width: __WIDTH__, height: __HEIGHT__ };
  const svg = document.querySelector(".chart svg");
  const tooltip = document.getElementById("tooltip");
  let current = -1;

  function hit(x, y) {
    for (let i = marks.length - 1; i >= 0; i--) {
      const m = marks[i];
      const dx = x - m.x;
      const dy = y - m.y;
      if (m.r > 0 && dx * dx + dy * dy <= m.r * m.r) {
        return i;
      }
    }
    return -1;
  }

  function show(i, event) {
    tooltip.innerHTML = marks[i].html;
    tooltip.style.left = (event.pageX + __OFFSET_X__) + "px";
    tooltip.style.top = (event.pageY + __OFFSET_Y__) + "px";
    tooltip.style.transition = "opacity __FADE_IN__ms";
    tooltip.style.opacity = __OPACITY__;
  }

  function hide() {
    tooltip.style.transition = "opacity __FADE_OUT__ms";
    tooltip.style.opacity = 0;
  }

  svg.addEventListener("pointermove", function (event) {
    const box = svg.getBoundingClientRect();
    const x = (event.clientX - box.left) * size.width / box.width;
    const y = (event.clientY - box.top) * size.height / box.height;
    const i = hit(x, y);
    if (i === current) {
      return;
    }
    current = i;
    if (i >= 0) {
      show(i, event);
    } else {
      hide();
    }
  });

  svg.addEventListener("pointerleave", function () {
    if (current >= 0) {
      current = -1;
      hide();
    }
  });
})();
</script>
</body>
</html>
"#;

/// What the pointer script needs per mark, in SVG pixels.
#[derive(Debug, Serialize)]
struct HoverTarget {
    x: i32,
    y: i32,
    r: u32,
    html: String,
}

impl HoverTarget {
    fn new(mark: &Mark, config: &ChartConfig) -> Self {
        let (cx, cy, r) = mark.pixel();
        Self {
            x: cx.saturating_add(config.margin.left as i32),
            y: cy.saturating_add(config.margin.top as i32),
            r,
            html: tooltip_html(mark),
        }
    }
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn tooltip_html(mark: &Mark) -> String {
    mark.tooltip
        .lines
        .iter()
        .map(|(label, value)| {
            format!(
                "<strong>{}:</strong> {}",
                escape_html(label),
                escape_html(value)
            )
        })
        .collect::<Vec<_>>()
        .join("<br>")
}

/// Build the standalone HTML page around an already rendered SVG.
pub fn html_document(svg: &str, layout: &BubbleLayout, config: &ChartConfig) -> Result<String, RenderError> {
    let targets: Vec<HoverTarget> = layout
        .marks
        .iter()
        .map(|mark| HoverTarget::new(mark, config))
        .collect();
    // A literal "</script>" inside a name must not close the block
    let marks_json = serde_json::to_string(&targets)?.replace("</", "<\\/");

    Ok(TEMPLATE
        .replace("__TITLE__", &escape_html(&config.labels.title))
        .replace("__MARKS__", &marks_json)
        .replace("__WIDTH__", &config.width.to_string())
        .replace("__HEIGHT__", &config.height.to_string())
        .replace("__OFFSET_X__", &TOOLTIP_OFFSET.0.to_string())
        .replace("__OFFSET_Y__", &TOOLTIP_OFFSET.1.to_string())
        .replace("__FADE_IN__", &config.tooltip.fade_in_ms.to_string())
        .replace("__FADE_OUT__", &config.tooltip.fade_out_ms.to_string())
        .replace("__OPACITY__", &config.tooltip.opacity.to_string())
        .replace("__SVG__", svg))
}
