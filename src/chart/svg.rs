//! SVG output for chart layouts

use super::layout::ChartLayout;
use std::fmt::Write;

/// Class set on the root element of every rendered chart
pub const CHART_CLASS: &str = "chart-data";

/// A chart ready to be placed in a region
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedChart {
    pub layout: ChartLayout,
    pub svg: String,
}

impl RenderedChart {
    pub fn new(layout: ChartLayout) -> Self {
        let svg = render_svg(&layout);
        Self { layout, svg }
    }
}

/// Render `layout` as a standalone SVG document
pub fn render_svg(layout: &ChartLayout) -> String {
    let (w, h) = (layout.width, layout.height);
    let mut out = String::new();

    // Writing into a String cannot fail
    let _ = write!(
        out,
        r#"<svg class="{}" xmlns="http://www.w3.org/2000/svg" width="{}" height="{}"><g>"#,
        CHART_CLASS, w, h
    );

    out.push_str(r#"<g class="grid">"#);
    for x in &layout.x_grid {
        let _ = write!(out, r#"<line x1="{x}" y1="0" x2="{x}" y2="{h}"/>"#);
    }
    out.push_str("</g>");

    out.push_str(r#"<g class="grid">"#);
    for y in &layout.y_grid {
        let _ = write!(out, r#"<line x1="0" y1="{y}" x2="{w}" y2="{y}"/>"#);
    }
    out.push_str("</g>");

    out.push_str(r#"<g class="bars">"#);
    for bar in &layout.bars {
        let _ = write!(
            out,
            r#"<rect x="{}" y="{}" width="{}" height="{}"><title>{}: {}</title></rect>"#,
            bar.x, bar.y, bar.width, bar.height, bar.date, bar.count
        );
    }
    out.push_str("</g>");

    let _ = write!(
        out,
        r#"<g class="x axis"><line x1="0" y1="{h}" x2="{w}" y2="{h}"/></g>"#
    );
    let _ = write!(
        out,
        r#"<g class="y axis"><line x1="0" y1="0" x2="0" y2="{h}"/></g>"#
    );
    out.push_str("</g></svg>");

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::layout::ChartProps;
    use crate::chart::series::{ChartSeries, RawPoint};

    #[test]
    fn test_one_rect_per_point() {
        let series = ChartSeries::from_raw(&[
            RawPoint { date: "2024-03-01".into(), count: 1 },
            RawPoint { date: "2024-03-02".into(), count: 4 },
        ])
        .unwrap();
        let layout = ChartLayout::compute(&series, ChartProps::default()).unwrap();
        let chart = RenderedChart::new(layout);

        assert!(chart.svg.starts_with(r#"<svg class="chart-data""#));
        assert_eq!(chart.svg.matches("<rect ").count(), 2);
        assert!(chart.svg.contains("<title>2024-03-02: 4</title>"));
        assert!(chart.svg.ends_with("</svg>"));
    }
}
