//! Navigation Bar Widget
//! Top panel with page links and an editable path field.

use crate::dashboard::Route;
use egui::{Color32, RichText};

/// Navigation state: the path being edited and a short status line.
pub struct NavBar {
    pub path_input: String,
    pub status: String,
}

impl NavBar {
    pub fn new(route: Route, record_count: usize) -> Self {
        Self {
            path_input: route.path().to_string(),
            status: format!("{} survey responses", record_count),
        }
    }

    /// Draw the navigation bar
    pub fn show(&mut self, ui: &mut egui::Ui, current: Route) -> NavAction {
        let mut action = NavAction::None;

        ui.horizontal(|ui| {
            ui.label(
                RichText::new("📊 Salary Dashboard")
                    .size(20.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.add_space(20.0);

            for route in Route::ALL {
                let label = RichText::new(route.path()).size(14.0);
                if ui.selectable_label(current == route, label).clicked() {
                    self.path_input = route.path().to_string();
                    action = NavAction::Navigate(self.path_input.clone());
                }
            }

            ui.add_space(20.0);
            ui.label("Path:");
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.path_input).desired_width(180.0),
            );
            let submitted =
                response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if submitted || ui.button("Go").clicked() {
                action = NavAction::Navigate(self.path_input.clone());
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(RichText::new(&self.status).size(11.0).color(Color32::GRAY));
            });
        });

        action
    }
}

/// Actions triggered by the navigation bar
#[derive(Debug, Clone, PartialEq)]
pub enum NavAction {
    None,
    Navigate(String),
}
