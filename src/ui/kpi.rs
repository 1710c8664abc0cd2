use eframe::egui::{Color32, RichText, Ui};

use crate::data::aggregate::KpiSnapshot;
use crate::format;

// ---------------------------------------------------------------------------
// Metric widgets
// ---------------------------------------------------------------------------

/// Three side-by-side metric cards: total sales, total profit, margin.
pub fn kpi_row(ui: &mut Ui, kpis: &KpiSnapshot) {
    let profit_color = if kpis.total_profit < 0.0 {
        Color32::from_rgb(220, 60, 60)
    } else {
        Color32::from_rgb(40, 160, 90)
    };

    ui.columns(3, |cols| {
        metric(&mut cols[0], "Total Sales", format::currency(kpis.total_sales), None);
        metric(
            &mut cols[1],
            "Total Profit",
            format::currency(kpis.total_profit),
            Some(profit_color),
        );
        metric(&mut cols[2], "Profit Margin", format::percent(kpis.margin_percent), None);
    });
}

fn metric(ui: &mut Ui, label: &str, value: String, color: Option<Color32>) {
    ui.group(|ui: &mut Ui| {
        ui.set_min_width(ui.available_width());
        ui.label(RichText::new(label).weak());
        let mut text = RichText::new(value).size(28.0).strong();
        if let Some(c) = color {
            text = text.color(c);
        }
        ui.label(text);
    });
}
