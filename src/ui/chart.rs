//! Outcome curve rendering.
//!
//! The curve shape and color are keyed off the fixed presentation code of
//! the outcome category: Optimal (0) draws a green sine, Moderate (2) a
//! yellow cosine, and any other code a red tangent. The mapping is
//! illustrative only and carries no machine-state meaning.

use crate::types::outcome::OutcomeCategory;
use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Sense, Shape, Stroke, Vec2};

pub const CHART_TITLE: &str = "Machine Failure Prediction Curve";

/// Samples per curve
const SAMPLES: usize = 100;
/// X range upper bound
const X_MAX: f32 = 10.0;
/// Y is clipped to [-Y_MAX, Y_MAX]
const Y_MAX: f32 = 2.0;

const PANEL_COLOR: Color32 = Color32::from_rgb(30, 30, 30);
const GRID_COLOR: Color32 = Color32::from_rgb(70, 70, 70);
const TEXT_COLOR: Color32 = Color32::from_rgb(200, 200, 200);

const OPTIMAL_COLOR: Color32 = Color32::from_rgb(0, 190, 80);
const FAILURE_COLOR: Color32 = Color32::from_rgb(220, 60, 50);
const MODERATE_COLOR: Color32 = Color32::from_rgb(235, 200, 30);

/// Curve color by category
pub fn curve_color(category: OutcomeCategory) -> Color32 {
    match category.code() {
        0 => OPTIMAL_COLOR,
        2 => MODERATE_COLOR,
        _ => FAILURE_COLOR,
    }
}

/// Sample the category's curve: 100 points of x in [0, 10], y clipped to
/// [-2, 2].
pub fn curve_points(category: OutcomeCategory) -> Vec<(f32, f32)> {
    (0..SAMPLES)
        .map(|i| {
            let x = X_MAX * i as f32 / (SAMPLES - 1) as f32;
            let y = match category.code() {
                0 => x.sin(),
                2 => x.cos(),
                _ => x.tan(),
            };
            (x, y.clamp(-Y_MAX, Y_MAX))
        })
        .collect()
}

/// Paint the outcome curve with title, axis labels, and legend.
pub fn draw(ui: &mut egui::Ui, category: OutcomeCategory) {
    let desired = Vec2::new(ui.available_width().min(420.0), 240.0);
    let (response, painter) = ui.allocate_painter(desired, Sense::hover());
    let rect = response.rect;

    painter.rect_filled(rect, 4.0, PANEL_COLOR);

    // Plot area, inset for title and labels
    let plot = Rect::from_min_max(
        Pos2::new(rect.left() + 16.0, rect.top() + 28.0),
        Pos2::new(rect.right() - 12.0, rect.bottom() - 24.0),
    );
    painter.rect_stroke(plot, 0.0, Stroke::new(1.0, GRID_COLOR));

    // Zero line
    let zero_y = plot.center().y;
    painter.line_segment(
        [Pos2::new(plot.left(), zero_y), Pos2::new(plot.right(), zero_y)],
        Stroke::new(1.0, GRID_COLOR),
    );

    let to_screen = |x: f32, y: f32| -> Pos2 {
        Pos2::new(
            plot.left() + (x / X_MAX) * plot.width(),
            plot.center().y - (y / Y_MAX) * (plot.height() / 2.0),
        )
    };

    let color = curve_color(category);
    let points: Vec<Pos2> = curve_points(category)
        .into_iter()
        .map(|(x, y)| to_screen(x, y))
        .collect();
    painter.add(Shape::line(points, Stroke::new(2.0, color)));

    painter.text(
        Pos2::new(rect.center().x, rect.top() + 14.0),
        Align2::CENTER_CENTER,
        CHART_TITLE,
        FontId::proportional(13.0),
        TEXT_COLOR,
    );
    painter.text(
        Pos2::new(rect.center().x, rect.bottom() - 12.0),
        Align2::CENTER_CENTER,
        "Time",
        FontId::proportional(11.0),
        TEXT_COLOR,
    );
    painter.text(
        Pos2::new(plot.left() + 4.0, rect.top() + 14.0),
        Align2::LEFT_CENTER,
        "Performance Index",
        FontId::proportional(11.0),
        TEXT_COLOR,
    );

    // Legend: colored swatch plus category label, top-right of the plot
    let legend = Pos2::new(plot.right() - 80.0, plot.top() + 12.0);
    painter.line_segment(
        [legend, Pos2::new(legend.x + 18.0, legend.y)],
        Stroke::new(2.0, color),
    );
    painter.text(
        Pos2::new(legend.x + 24.0, legend.y),
        Align2::LEFT_CENTER,
        category.label(),
        FontId::proportional(11.0),
        TEXT_COLOR,
    );
}
