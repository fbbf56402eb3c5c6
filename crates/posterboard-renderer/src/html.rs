//! Standalone HTML snapshot of a render frame.
//!
//! Containers ignore pointer events while the SVG content inside them uses
//! `visiblePainted`, so a gesture engine attached to the page only hits
//! painted pixels and transparent regions stay click-through.

use html_escape::encode_double_quoted_attribute;

use crate::render_data::{RenderFrame, RenderLayer};

const POSTER_STYLE: &str = "\
#poster {
    position: relative;
    overflow: hidden;
    background-color: #f0f0f0;
}
.draggable {
    pointer-events: none;
    position: absolute;
    transform-origin: center;
}
.draggable svg {
    pointer-events: visiblePainted;
    width: 100%;
    height: 100%;
}
.draggable svg * {
    pointer-events: visiblePainted;
}
";

impl RenderLayer {
    /// Inline style placing the container and applying its transform.
    pub fn style(&self) -> String {
        let mut style = format!(
            "left: {}px; top: {}px; width: {}px; height: {}px; transform: {};",
            self.left, self.top, self.width, self.height, self.transform
        );
        if let Some(z) = self.z_index {
            style.push_str(&format!(" z-index: {z};"));
        }
        style
    }

    pub fn to_html(&self) -> String {
        format!(
            "<div class=\"draggable\" id=\"{}\" style=\"{}\">{}</div>",
            encode_double_quoted_attribute(&self.id),
            self.style(),
            self.markup
        )
    }
}

impl RenderFrame {
    /// The poster container with every layer, without a surrounding document.
    pub fn poster_html(&self) -> String {
        let mut html = format!(
            "<div id=\"poster\" style=\"width: {}px; height: {}px;\">\n",
            self.viewport.width, self.viewport.height
        );
        for layer in &self.layers {
            html.push_str("  ");
            html.push_str(&layer.to_html());
            html.push('\n');
        }
        html.push_str("</div>");
        html
    }

    /// A complete HTML document showing the poster.
    pub fn to_html(&self) -> String {
        log::debug!("Rendering {} layers to HTML", self.layers.len());
        let mut html = String::from("<!DOCTYPE html>\n<html>\n<head>\n");
        html.push_str("<meta charset=\"utf-8\">\n<title>Poster</title>\n");
        html.push_str("<style>\nbody { margin: 0; }\n");
        html.push_str(POSTER_STYLE);
        html.push_str("</style>\n</head>\n<body>\n");
        html.push_str(&self.poster_html());
        html.push_str("\n</body>\n</html>\n");
        html
    }
}
