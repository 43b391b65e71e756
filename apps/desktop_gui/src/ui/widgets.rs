use std::time::Duration;

use eframe::egui;

use crate::controller::reducer::{IdeaCard, Toast, ToastKind};
use crate::ui::theme::Palette;

pub const CARD_STAGGER: Duration = Duration::from_millis(100);
pub const CARD_FADE: Duration = Duration::from_millis(500);

/// Opacity of the card at `index` once `elapsed` has passed since the idea
/// list was revealed. Cards start one after another and fade in over
/// [`CARD_FADE`].
pub fn card_entrance_alpha(index: usize, elapsed: Duration) -> f32 {
    let delay = CARD_STAGGER.saturating_mul(index as u32);
    let shown = elapsed.saturating_sub(delay);
    (shown.as_secs_f32() / CARD_FADE.as_secs_f32()).clamp(0.0, 1.0)
}

/// True while any of `count` cards is still fading in.
pub fn cards_animating(count: usize, elapsed: Duration) -> bool {
    count > 0 && card_entrance_alpha(count - 1, elapsed) < 1.0
}

pub fn idea_card(
    ui: &mut egui::Ui,
    card: &IdeaCard<'_>,
    alpha: f32,
    palette: &Palette,
) -> egui::Response {
    let id = ui.id().with(("idea_card", card.index));
    let hovered = ui.ctx().read_response(id).is_some_and(|r| r.hovered());
    let fill = if card.selected {
        palette.card_selected_fill
    } else if hovered {
        palette.card_hover_fill
    } else {
        palette.card_fill
    };
    let stroke = if card.selected {
        egui::Stroke::new(2.0, palette.accent)
    } else {
        egui::Stroke::new(1.0, palette.card_stroke)
    };

    ui.scope(|ui| {
        ui.set_opacity(alpha);
        let frame = egui::Frame::NONE
            .fill(fill)
            .stroke(stroke)
            .corner_radius(10.0)
            .inner_margin(egui::Margin::symmetric(14, 12))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(
                    egui::RichText::new(&card.label)
                        .strong()
                        .color(palette.label_text),
                );
                ui.label(card.text);
            });
        ui.interact(frame.response.rect, id, egui::Sense::click())
            .on_hover_cursor(egui::CursorIcon::PointingHand)
    })
    .inner
}

pub fn toast_banner(ui: &mut egui::Ui, toast: &Toast, palette: &Palette) {
    let fill = match toast.kind {
        ToastKind::Success => palette.success,
        ToastKind::Error => palette.error,
    };
    egui::Frame::NONE
        .fill(fill)
        .stroke(egui::Stroke::new(1.0, fill.gamma_multiply(0.8)))
        .corner_radius(8.0)
        .inner_margin(egui::Margin::symmetric(10, 8))
        .show(ui, |ui| {
            ui.label(egui::RichText::new(&toast.message).color(egui::Color32::WHITE));
        });
}
