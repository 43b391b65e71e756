use eframe::egui;

#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub accent: egui::Color32,
    pub card_fill: egui::Color32,
    pub card_hover_fill: egui::Color32,
    pub card_selected_fill: egui::Color32,
    pub card_stroke: egui::Color32,
    pub label_text: egui::Color32,
    pub success: egui::Color32,
    pub error: egui::Color32,
    pub overlay: egui::Color32,
}

impl Palette {
    pub fn for_visuals(visuals: &egui::Visuals) -> Self {
        let accent = egui::Color32::from_rgb(108, 92, 231);
        let card_fill = lighten_color(visuals.panel_fill, if visuals.dark_mode { 0.06 } else { 0.0 });
        Self {
            accent,
            card_fill,
            card_hover_fill: lighten_color(card_fill, 0.08),
            card_selected_fill: accent.gamma_multiply(0.35),
            card_stroke: visuals.widgets.noninteractive.bg_stroke.color,
            label_text: accent,
            success: egui::Color32::from_rgb(0, 184, 148),
            error: egui::Color32::from_rgb(214, 48, 49),
            overlay: egui::Color32::from_black_alpha(150),
        }
    }
}

pub fn lighten_color(c: egui::Color32, t: f32) -> egui::Color32 {
    let t = t.clamp(0.0, 1.0);
    let mix = |channel: u8| -> u8 {
        let channel = channel as f32;
        (channel + (255.0 - channel) * t).round().clamp(0.0, 255.0) as u8
    };
    egui::Color32::from_rgba_unmultiplied(mix(c.r()), mix(c.g()), mix(c.b()), c.a())
}
