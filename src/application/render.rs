//! SVG rendering for resolved icon definitions.
//!
//! Pure string building, no DOM manipulation. Given the same definition and
//! options the output is byte-identical, so callers may cache or compare
//! renderings freely.

use crate::domain::icon::ResolvedIcon;

/// Placeholder token collections use to defer color to the styling context.
const CURRENT_COLOR: &str = "currentColor";

/// Per-request rendering knobs. Absent options leave the corresponding
/// attribute at its collection-supplied default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Overrides both width and height, written verbatim (`24`, `1.5em`).
    pub size: Option<String>,
    /// Value for a `class` attribute on the root element.
    pub class: Option<String>,
    /// Literal color substituted for every `currentColor` token in the body.
    pub color: Option<String>,
}

impl RenderOptions {
    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// Render one resolved icon into self-contained `<svg>` markup.
pub fn render_svg(icon: &ResolvedIcon<'_>, options: &RenderOptions) -> String {
    let width = match &options.size {
        Some(size) => size.clone(),
        None => icon.width.to_string(),
    };
    let height = match &options.size {
        Some(size) => size.clone(),
        None => icon.height.to_string(),
    };

    let mut svg = String::with_capacity(icon.body.len() + 128);
    svg.push_str("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"");
    push_escaped(&mut svg, &width);
    svg.push_str("\" height=\"");
    push_escaped(&mut svg, &height);
    svg.push_str("\" viewBox=\"");
    svg.push_str(&icon.view_box());
    svg.push('"');

    if let Some(class) = &options.class {
        svg.push_str(" class=\"");
        push_escaped(&mut svg, class);
        svg.push('"');
    }

    svg.push('>');

    match &options.color {
        Some(color) => svg.push_str(&icon.body.replace(CURRENT_COLOR, color)),
        None => svg.push_str(icon.body),
    }

    svg.push_str("</svg>");
    svg
}

/// Minimal XML attribute-value escaping for caller-supplied option values.
fn push_escaped(buffer: &mut String, value: &str) {
    for ch in value.chars() {
        match ch {
            '&' => buffer.push_str("&amp;"),
            '<' => buffer.push_str("&lt;"),
            '>' => buffer.push_str("&gt;"),
            '"' => buffer.push_str("&quot;"),
            _ => buffer.push(ch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_icon() -> ResolvedIcon<'static> {
        ResolvedIcon {
            body: "<path stroke=\"currentColor\" d=\"M3 9h18\"/>",
            width: 24,
            height: 24,
            left: 0,
            top: 0,
        }
    }

    #[test]
    fn default_render_uses_collection_dimensions() {
        let svg = render_svg(&sample_icon(), &RenderOptions::default());
        assert_eq!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"24\" height=\"24\" \
             viewBox=\"0 0 24 24\"><path stroke=\"currentColor\" d=\"M3 9h18\"/></svg>"
        );
    }

    #[test]
    fn size_overrides_both_dimensions_but_not_view_box() {
        let svg = render_svg(&sample_icon(), &RenderOptions::default().with_size("48"));
        assert!(svg.contains("width=\"48\""));
        assert!(svg.contains("height=\"48\""));
        assert!(svg.contains("viewBox=\"0 0 24 24\""));
    }

    #[test]
    fn size_accepts_css_units_verbatim() {
        let svg = render_svg(&sample_icon(), &RenderOptions::default().with_size("1.5em"));
        assert!(svg.contains("width=\"1.5em\" height=\"1.5em\""));
    }

    #[test]
    fn class_attribute_is_emitted_and_escaped() {
        let svg = render_svg(
            &sample_icon(),
            &RenderOptions::default().with_class("icon \"big\" & bold"),
        );
        assert!(svg.contains(" class=\"icon &quot;big&quot; &amp; bold\""));
    }

    #[test]
    fn color_replaces_every_placeholder_token() {
        let icon = ResolvedIcon {
            body: "<path stroke=\"currentColor\"/><circle fill=\"currentColor\"/>",
            width: 24,
            height: 24,
            left: 0,
            top: 0,
        };
        let svg = render_svg(&icon, &RenderOptions::default().with_color("#ff0044"));
        assert!(!svg.contains("currentColor"));
        assert_eq!(svg.matches("#ff0044").count(), 2);
    }

    #[test]
    fn render_is_deterministic() {
        let options = RenderOptions::default()
            .with_size("32")
            .with_class("nav-icon")
            .with_color("teal");
        let first = render_svg(&sample_icon(), &options);
        let second = render_svg(&sample_icon(), &options);
        assert_eq!(first, second);
    }
}
