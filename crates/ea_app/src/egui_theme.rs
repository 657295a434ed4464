use egui::epaint::Shadow;
use egui::{Color32, FontFamily, FontId, Margin, Rounding, Style, TextStyle, Vec2, Visuals};

const LINE: Color32 = Color32::from_rgb(0xd0, 0xd5, 0xdd);
const BG: Color32 = Color32::from_rgb(0xf4, 0xf6, 0xf9);
const PANEL: Color32 = Color32::from_rgb(0xff, 0xff, 0xff);
const TEXT: Color32 = Color32::from_rgb(0x1f, 0x29, 0x37);
const PRIMARY: Color32 = Color32::from_rgb(0x25, 0x63, 0xeb);
const HOVER: Color32 = Color32::from_rgb(0xe8, 0xf0, 0xfe);
pub const DANGER: Color32 = Color32::from_rgb(0xb9, 0x1c, 0x1c);
pub const SUCCESS: Color32 = Color32::from_rgb(0x15, 0x80, 0x3d);
pub const MUTED: Color32 = Color32::from_rgb(0x6b, 0x72, 0x80);

pub fn base_style() -> Style {
    let mut style = Style::default();
    style.spacing.item_spacing = Vec2::new(8.0, 6.0);
    style.spacing.button_padding = Vec2::new(10.0, 4.0);
    style.spacing.window_margin = Margin::same(8.0);
    style.spacing.menu_margin = Margin::same(6.0);
    style.spacing.interact_size = Vec2::new(28.0, 24.0);
    style.visuals = base_visuals();
    style.text_styles = [
        (TextStyle::Heading, FontId::new(17.0, FontFamily::Proportional)),
        (TextStyle::Body, FontId::new(13.0, FontFamily::Proportional)),
        (TextStyle::Monospace, FontId::new(12.0, FontFamily::Monospace)),
        (TextStyle::Button, FontId::new(13.0, FontFamily::Proportional)),
        (TextStyle::Small, FontId::new(11.0, FontFamily::Proportional)),
    ]
    .into();
    style
}

pub fn base_visuals() -> Visuals {
    let mut visuals = Visuals::light();
    visuals.override_text_color = Some(TEXT);
    visuals.window_fill = BG;
    visuals.panel_fill = PANEL;
    visuals.faint_bg_color = BG;
    visuals.extreme_bg_color = PANEL;
    visuals.widgets.noninteractive.bg_stroke.color = LINE;
    visuals.widgets.inactive.bg_stroke.color = LINE;
    visuals.widgets.hovered.bg_fill = HOVER;
    visuals.widgets.hovered.bg_stroke.color = PRIMARY;
    visuals.widgets.active.bg_stroke.color = PRIMARY;
    visuals.selection.bg_fill = HOVER;
    visuals.selection.stroke.color = PRIMARY;
    visuals.window_stroke.color = LINE;
    visuals.window_shadow = Shadow::NONE;
    visuals.popup_shadow = Shadow::NONE;
    visuals.window_rounding = Rounding::same(4.0);
    visuals.error_fg_color = DANGER;
    visuals
}

pub fn apply_base_theme(ctx: &egui::Context) {
    ctx.set_style(base_style());
}
