//! Procedural drawing of the transport: two reels, the capstan and the tape
//! path between them.

use egui::{Align2, Color32, FontId, Pos2, Stroke, pos2, vec2};
use simcore::DeckState;

const REEL_SPOKES: usize = 3;
const REEL_COLOR: Color32 = Color32::from_rgb(180, 186, 196);
const HUB_COLOR: Color32 = Color32::from_rgb(90, 96, 108);
const CAPSTAN_COLOR: Color32 = Color32::from_rgb(210, 170, 60);
const TAPE_COLOR: Color32 = Color32::from_rgb(120, 72, 40);
const STRAINED_TAPE_COLOR: Color32 = Color32::from_rgb(220, 60, 40);

/// Point on a circle at `angle_deg`, measured clockwise on screen from +x
pub fn spoke_end(center: Pos2, radius: f32, angle_deg: f64) -> Pos2 {
    let a = angle_deg.to_radians() as f32;
    center + vec2(a.cos(), a.sin()) * radius
}

/// Tape stroke gets thicker and redder as tension rises (tension ~0..1)
pub fn tape_stroke(tension: f64) -> Stroke {
    let k = tension.clamp(0.0, 1.0) as f32;
    Stroke::new(1.5 + 3.5 * k, lerp_color(TAPE_COLOR, STRAINED_TAPE_COLOR, k))
}

fn lerp_color(a: Color32, b: Color32, k: f32) -> Color32 {
    let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * k).round() as u8;
    Color32::from_rgb(mix(a.r(), b.r()), mix(a.g(), b.g()), mix(a.b(), b.b()))
}

fn reel(painter: &egui::Painter, center: Pos2, radius: f32, angle_deg: f64, label: &str) {
    painter.circle(center, radius, Color32::from_gray(40), Stroke::new(2.0, REEL_COLOR));
    for i in 0..REEL_SPOKES {
        let spoke_angle = angle_deg + i as f64 * 360.0 / REEL_SPOKES as f64;
        let inner = spoke_end(center, radius * 0.22, spoke_angle);
        let outer = spoke_end(center, radius * 0.92, spoke_angle);
        painter.line_segment([inner, outer], Stroke::new(3.0, REEL_COLOR));
    }
    painter.circle_filled(center, radius * 0.2, HUB_COLOR);
    painter.text(
        center + vec2(0.0, radius + 6.0),
        Align2::CENTER_TOP,
        label,
        FontId::proportional(13.0),
        Color32::GRAY,
    );
}

fn capstan(painter: &egui::Painter, center: Pos2, radius: f32, angle_deg: f64) {
    painter.circle_filled(center, radius, CAPSTAN_COLOR);
    painter.line_segment(
        [center, spoke_end(center, radius * 0.9, angle_deg)],
        Stroke::new(2.0, Color32::from_gray(30)),
    );
    painter.text(
        center + vec2(0.0, radius + 6.0),
        Align2::CENTER_TOP,
        "Capstan",
        FontId::proportional(13.0),
        Color32::GRAY,
    );
}

pub fn show(ui: &mut egui::Ui, state: &DeckState) {
    let (rect, _response) = ui.allocate_exact_size(ui.available_size(), egui::Sense::hover());
    let painter = ui.painter_at(rect);

    let size = rect.width().min(rect.height());
    let reel_r = size * 0.2;
    let capstan_r = size * 0.05;

    let left = pos2(rect.left() + rect.width() * 0.27, rect.top() + rect.height() * 0.38);
    let right = pos2(rect.left() + rect.width() * 0.73, rect.top() + rect.height() * 0.38);
    let cap = pos2(rect.center().x, rect.top() + rect.height() * 0.8);

    // Tape path: off the bottom of each reel, wrapped under the capstan
    let stroke = tape_stroke(state.tension);
    let cap_left = cap + vec2(-capstan_r, capstan_r * 0.6);
    let cap_right = cap + vec2(capstan_r, capstan_r * 0.6);
    painter.line_segment([left + vec2(0.0, reel_r), cap_left], stroke);
    painter.line_segment([cap_left, cap_right], stroke);
    painter.line_segment([cap_right, right + vec2(0.0, reel_r)], stroke);

    reel(&painter, left, reel_r, state.reel_left_deg, "Supply");
    reel(&painter, right, reel_r, state.reel_right_deg, "Take-up");
    capstan(&painter, cap, capstan_r, state.capstan_deg);

    painter.text(
        rect.left_top() + vec2(8.0, 8.0),
        Align2::LEFT_TOP,
        state.transport.label(),
        FontId::monospace(18.0),
        Color32::LIGHT_GREEN,
    );
}
