use egui::{include_image, pos2, Align, Color32, Image, Layout, Rect, RichText, Sense, Stroke, Vec2};

use super::{ACCENT, MUTED};
use crate::types::{Endpoint, FlightRecord};

const CARD_FILL: Color32 = Color32::from_rgb(0x1A, 0x1A, 0x1A);
const CARD_BORDER: Color32 = Color32::from_rgb(0x33, 0x33, 0x33);

/// Draws a bordered card and returns a clickable response covering it.
pub fn card(ui: &mut egui::Ui, add_contents: impl FnOnce(&mut egui::Ui)) -> egui::Response {
    let response = egui::Frame::none()
        .fill(CARD_FILL)
        .stroke(Stroke::new(1.0, CARD_BORDER))
        .rounding(16.0)
        .inner_margin(16.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            add_contents(ui);
        })
        .response
        .interact(Sense::click());
    ui.add_space(12.0);
    response
}

pub fn status_badge(ui: &mut egui::Ui, flight: &FlightRecord) {
    egui::Frame::none()
        .fill(flight.status().color())
        .rounding(10.0)
        .inner_margin(egui::Margin::symmetric(10.0, 4.0))
        .show(ui, |ui| {
            ui.label(
                RichText::new(flight.status.as_str())
                    .size(12.0)
                    .strong()
                    .color(Color32::WHITE),
            );
        });
}

/// Flight number and airline on the left, status badge (plus `extra`) on the right.
pub fn card_header(ui: &mut egui::Ui, flight: &FlightRecord, extra: Option<&str>) {
    ui.horizontal(|ui| {
        ui.vertical(|ui| {
            ui.label(
                RichText::new(flight.flight_number.as_str())
                    .size(18.0)
                    .strong()
                    .color(Color32::WHITE),
            );
            ui.label(RichText::new(flight.airline.as_str()).size(13.0).color(MUTED));
        });
        ui.with_layout(Layout::right_to_left(Align::Min), |ui| {
            ui.vertical(|ui| {
                status_badge(ui, flight);
                if let Some(extra) = extra {
                    ui.label(RichText::new(extra).size(12.0).color(MUTED));
                }
            });
        });
    });
}

pub fn endpoint(ui: &mut egui::Ui, endpoint: &Endpoint, time: &str, align: Align) {
    ui.with_layout(Layout::top_down(align), |ui| {
        ui.label(
            RichText::new(endpoint.airport.as_str())
                .size(22.0)
                .strong()
                .color(Color32::WHITE),
        );
        ui.label(RichText::new(endpoint.city.as_str()).size(12.0).color(MUTED));
        ui.label(RichText::new(time).size(14.0).color(Color32::WHITE));
    });
}

/// Route line filled up to the flight's progress, with the plane marker on top.
pub fn route_progress(ui: &mut egui::Ui, flight: &FlightRecord, marker_size: f32) {
    let width = ui.available_width().max(marker_size * 2.0);
    let (rect, _) = ui.allocate_exact_size(Vec2::new(width, marker_size), Sense::hover());
    let y = rect.center().y;

    let painter = ui.painter_at(rect);
    painter.line_segment(
        [pos2(rect.left(), y), pos2(rect.right(), y)],
        Stroke::new(3.0, CARD_BORDER),
    );
    let filled_x = rect.left() + rect.width() * flight.progress_fraction();
    painter.line_segment([pos2(rect.left(), y), pos2(filled_x, y)], Stroke::new(3.0, ACCENT));

    let marker_x = rect.left() + rect.width() * flight.marker_position();
    let marker = Rect::from_min_size(pos2(marker_x, rect.top()), Vec2::splat(marker_size));
    let image = Image::new(include_image!("../../assets/plane.svg"))
        .fit_to_exact_size(Vec2::splat(marker_size));
    ui.put(marker, image);
}

/// Departure, progress line and arrival side by side.
pub fn route_row(ui: &mut egui::Ui, flight: &FlightRecord, arrival_time: &str) {
    ui.columns(3, |columns| {
        endpoint(
            &mut columns[0],
            &flight.departure,
            &flight.departure.time,
            Align::Min,
        );
        columns[1].add_space(18.0);
        route_progress(&mut columns[1], flight, 18.0);
        endpoint(&mut columns[2], &flight.arrival, arrival_time, Align::Max);
    });
}
