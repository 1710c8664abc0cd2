use std::collections::BTreeMap;

use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, GridMark, Legend, MarkerShape, Plot, PlotPoint, PlotPoints, Points};

use crate::color::ColorMap;
use crate::data::aggregate::{ScatterPoint, marker_radius, nearest_point};
use crate::format;
use crate::pipeline::DashboardView;

const CHART_HEIGHT: f32 = 320.0;

// ---------------------------------------------------------------------------
// Bar chart – summed sales per category
// ---------------------------------------------------------------------------

pub fn sales_by_category(ui: &mut Ui, view: &DashboardView, colors: &ColorMap) {
    let names: Vec<String> = view.bars.iter().map(|b| b.category.clone()).collect();

    Plot::new("sales_by_category")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Category")
        .y_axis_label("Sales")
        .allow_drag(false)
        .allow_scroll(false)
        .x_axis_formatter(move |mark: GridMark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
                return String::new();
            }
            names.get(idx as usize).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            for (i, bar) in view.bars.iter().enumerate() {
                let color = colors.color_for(&bar.category);
                let chart = BarChart::new(vec![
                    Bar::new(i as f64, bar.sales)
                        .name(format!("{}: {}", bar.category, format::currency(bar.sales)))
                        .fill(color)
                        .width(0.6),
                ])
                .name(&bar.category)
                .color(color);
                plot_ui.bar_chart(chart);
            }
        });
}

// ---------------------------------------------------------------------------
// Scatter chart – profit vs sales, coloured by region, sized by quantity
// ---------------------------------------------------------------------------

pub fn profit_vs_sales(ui: &mut Ui, view: &DashboardView, colors: &ColorMap) {
    // One series per (region, quantity) so markers can share a radius.
    let mut series: BTreeMap<(&str, u32), Vec<[f64; 2]>> = BTreeMap::new();
    for p in &view.scatter {
        series
            .entry((p.region.as_str(), p.quantity))
            .or_default()
            .push([p.sales, p.profit]);
    }

    let points = view.scatter.clone();
    let scale = extent(&points);

    Plot::new("profit_vs_sales")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Sales")
        .y_axis_label("Profit")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .label_formatter(move |name: &str, value: &PlotPoint| {
            let candidates = points
                .iter()
                .filter(|p| name.is_empty() || p.region == name);
            match nearest_point(candidates, value.x, value.y, scale) {
                Some(p) => format!(
                    "{}\nSub-Category: {}\nSales: {}\nProfit: {}\nQuantity: {}",
                    p.region,
                    p.sub_category,
                    format::currency(p.sales),
                    format::currency(p.profit),
                    p.quantity
                ),
                None => String::new(),
            }
        })
        .show(ui, |plot_ui| {
            for ((region, quantity), coords) in series {
                let coords: PlotPoints = coords.into_iter().collect();
                let markers = Points::new(coords)
                    .name(region)
                    .color(colors.color_for(region))
                    .shape(MarkerShape::Circle)
                    .filled(true)
                    .radius(marker_radius(quantity, view.max_quantity));
                plot_ui.points(markers);
            }
        });
}

/// Width and height of the data, used to normalise hover distances.
fn extent(points: &[ScatterPoint]) -> [f64; 2] {
    let (mut min_x, mut max_x) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut min_y, mut max_y) = (f64::INFINITY, f64::NEG_INFINITY);
    for p in points {
        min_x = min_x.min(p.sales);
        max_x = max_x.max(p.sales);
        min_y = min_y.min(p.profit);
        max_y = max_y.max(p.profit);
    }
    if points.is_empty() {
        return [1.0, 1.0];
    }
    [max_x - min_x, max_y - min_y]
}
