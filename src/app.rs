use eframe::egui::{self, Color32, RichText, Ui};

use crate::error::DashboardError;
use crate::state::AppState;
use crate::ui::{kpi, panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SalesDashboardApp {
    pub state: AppState,
}

impl SalesDashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for SalesDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: KPIs, charts, raw data ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| dashboard(ui, &self.state));
        });
    }
}

fn dashboard(ui: &mut Ui, state: &AppState) {
    ui.heading(RichText::new("Executive Sales Monitor").size(26.0));
    ui.add_space(8.0);

    let view = match &state.view {
        Ok(view) => view,
        Err(err @ DashboardError::DataLoad { .. }) => {
            ui.label(RichText::new(err.to_string()).color(Color32::RED));
            return;
        }
        Err(err @ (DashboardError::EmptySource | DashboardError::EmptySelection)) => {
            ui.label(RichText::new(err.to_string()).color(Color32::from_rgb(230, 160, 30)));
            return;
        }
    };

    kpi::kpi_row(ui, &view.kpis);
    ui.separator();

    ui.columns(2, |cols| {
        cols[0].strong("Sales by Category");
        plot::sales_by_category(&mut cols[0], view, &state.category_colors);

        cols[1].strong("Profit vs Sales Analysis");
        plot::profit_vs_sales(&mut cols[1], view, &state.region_colors);
    });

    ui.add_space(8.0);
    egui::CollapsingHeader::new("View Raw Data Source")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            table::raw_data(ui, &view.table);
        });
}
