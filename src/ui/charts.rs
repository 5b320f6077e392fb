use eframe::egui::epaint::TextShape;
use eframe::egui::{Align2, Color32, FontId, Pos2, RichText, Sense, Stroke, Ui, Vec2};
use egui_plot::{
    Bar, BarChart, Corner, Legend, Line, Plot, PlotPoint, PlotPoints, PlotTransform, Polygon,
    Text,
};

use crate::chart::{wedge_outline, BarChartModel, BarChartSpec, IndustryBreakdown};
use crate::color::ColorMap;

/// Rotation of the ticker labels under each bar chart, counter-clockwise.
pub const X_LABEL_ROTATION_DEG: f32 = 45.0;

const BAR_PLOT_HEIGHT: f32 = 220.0;
const PIE_PLOT_HEIGHT: f32 = 280.0;
const LABEL_FONT_SIZE: f32 = 11.0;
const LABEL_GAP: f32 = 6.0;

// ---------------------------------------------------------------------------
// Industry pie chart
// ---------------------------------------------------------------------------

/// Render one wedge per industry, labelled with its name and share.
pub fn industry_pie(ui: &mut Ui, breakdown: &IndustryBreakdown, colors: &ColorMap) {
    Plot::new("industry_pie")
        .height(PIE_PLOT_HEIGHT)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_x(-1.5)
        .include_x(1.5)
        .include_y(-1.3)
        .include_y(1.3)
        .show(ui, |plot_ui| {
            for (slice, (start, sweep)) in breakdown.slices.iter().zip(breakdown.wedge_angles()) {
                let color = colors.color_for(Some(&slice.industry));

                // egui fills convex shapes only, so wide wedges go in pieces.
                let pieces = (sweep / 90.0).ceil().max(1.0) as usize;
                let step = sweep / pieces as f64;
                for k in 0..pieces {
                    let outline = wedge_outline(1.0, start + step * k as f64, step);
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::new(outline))
                            .fill_color(color)
                            .stroke(Stroke::new(1.0, color))
                            .name(&slice.industry),
                    );
                }

                if breakdown.slices.len() > 1 {
                    let edge = start.to_radians();
                    plot_ui.line(
                        Line::new(PlotPoints::new(vec![[0.0, 0.0], [edge.cos(), edge.sin()]]))
                            .color(Color32::WHITE)
                            .width(1.5),
                    );
                }

                let mid = (start + sweep / 2.0).to_radians();
                let (cos, sin) = (mid.cos(), mid.sin());
                let anchor = if cos >= 0.0 {
                    Align2::LEFT_CENTER
                } else {
                    Align2::RIGHT_CENTER
                };
                plot_ui.text(
                    Text::new(PlotPoint::new(1.08 * cos, 1.08 * sin), slice.industry.clone())
                        .anchor(anchor),
                );
                plot_ui.text(Text::new(
                    PlotPoint::new(0.6 * cos, 0.6 * sin),
                    RichText::new(slice.percent_label()).color(Color32::WHITE),
                ));
            }
        });
}

// ---------------------------------------------------------------------------
// Grouped bar chart
// ---------------------------------------------------------------------------

/// Render one metric as bars per ticker, coloured by industry, into `ui`.
///
/// `ui` is the layout region the caller reserved for this chart.
pub fn bar_chart(ui: &mut Ui, spec: &BarChartSpec, model: &BarChartModel, colors: &ColorMap) {
    ui.heading(spec.title);

    let mut plot = Plot::new(spec.id)
        .height(BAR_PLOT_HEIGHT)
        .y_axis_label(spec.y_label)
        // Tick labels are painted rotated below the plot instead.
        .show_axes([false, true])
        .show_grid([false, true])
        .show_x(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_y(0.0)
        .include_x(-0.6)
        .include_x(model.tickers.len() as f64 - 0.4);
    if model.show_legend {
        plot = plot.legend(Legend::default().position(Corner::RightTop));
    }

    let response = plot.show(ui, |plot_ui| {
        for series in &model.series {
            let color = colors.color_for(series.industry.as_deref());
            let bars = series
                .bars
                .iter()
                .map(|b| Bar::new(b.x, b.value).width(model.bar_width).name(&b.ticker))
                .collect();
            plot_ui.bar_chart(BarChart::new(bars).color(color).name(series.label()));
        }
    });

    rotated_tick_labels(ui, &model.tickers, &response.transform);
}

/// Paint `labels[i]` under plot position `x = i`, rotated by
/// [`X_LABEL_ROTATION_DEG`] with its end at the tick.
fn rotated_tick_labels(ui: &mut Ui, labels: &[String], transform: &PlotTransform) {
    let angle = -X_LABEL_ROTATION_DEG.to_radians();
    let font = FontId::proportional(LABEL_FONT_SIZE);
    let color = ui.visuals().text_color();

    let galleys: Vec<_> = labels
        .iter()
        .map(|l| ui.painter().layout_no_wrap(l.clone(), font.clone(), color))
        .collect();
    let largest = galleys
        .iter()
        .fold(Vec2::ZERO, |acc, g| acc.max(g.size()));

    let (rect, _) = ui.allocate_exact_size(
        Vec2::new(ui.available_width(), label_strip_height(largest, angle)),
        Sense::hover(),
    );

    let painter = ui.painter();
    for (i, galley) in galleys.into_iter().enumerate() {
        let tick = transform.position_from_point(&PlotPoint::new(i as f64, 0.0));
        let anchor = Pos2::new(tick.x, rect.top() + LABEL_GAP);
        let origin = rotated_label_origin(anchor, galley.size(), angle);
        painter.add(TextShape::new(origin, galley, color).with_angle(angle));
    }
}

/// Top-left corner for a label of `size` rotated by `angle` (radians,
/// clockwise on screen) so the middle of its trailing edge lands on `anchor`.
fn rotated_label_origin(anchor: Pos2, size: Vec2, angle: f32) -> Pos2 {
    let along = Vec2::new(angle.cos(), angle.sin());
    let across = Vec2::new(-angle.sin(), angle.cos());
    anchor - along * size.x - across * (size.y / 2.0)
}

/// Height needed below the plot for labels no larger than `largest`.
fn label_strip_height(largest: Vec2, angle: f32) -> f32 {
    largest.x * angle.sin().abs() + largest.y * angle.cos().abs() + LABEL_GAP
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Pos2, b: Pos2) -> bool {
        (a - b).length() < 1e-3
    }

    #[test]
    fn unrotated_label_ends_at_the_anchor() {
        let origin = rotated_label_origin(Pos2::new(100.0, 50.0), Vec2::new(40.0, 10.0), 0.0);
        assert!(close(origin, Pos2::new(60.0, 45.0)));
    }

    #[test]
    fn rotated_label_rises_towards_the_anchor() {
        let angle = -X_LABEL_ROTATION_DEG.to_radians();
        let anchor = Pos2::new(100.0, 50.0);
        let size = Vec2::new(40.0, 10.0);
        let origin = rotated_label_origin(anchor, size, angle);

        // Text starts below and to the left of the tick.
        assert!(origin.x < anchor.x);
        assert!(origin.y > anchor.y);

        let along = Vec2::new(angle.cos(), angle.sin());
        let across = Vec2::new(-angle.sin(), angle.cos());
        assert!(close(origin + along * size.x + across * (size.y / 2.0), anchor));
    }

    #[test]
    fn strip_fits_the_rotated_label() {
        let angle = -X_LABEL_ROTATION_DEG.to_radians();
        let h = label_strip_height(Vec2::new(40.0, 10.0), angle);
        let expected = (40.0 + 10.0) * std::f32::consts::FRAC_1_SQRT_2 + LABEL_GAP;
        assert!((h - expected).abs() < 1e-3);
        assert!((label_strip_height(Vec2::new(40.0, 10.0), 0.0) - (10.0 + LABEL_GAP)).abs() < 1e-3);
    }
}
