use eframe::egui::Color32;

use crate::library::{MediaType, Verdict};

pub(in crate::app) const BACKGROUND: Color32 = Color32::from_rgb(19, 23, 29);
pub(in crate::app) const NODE_FILL: Color32 = Color32::from_rgb(42, 48, 58);
pub(in crate::app) const LABEL_COLOR: Color32 = Color32::from_gray(238);
pub(in crate::app) const STATUS_COLOR: Color32 = Color32::from_gray(180);
pub(in crate::app) const SELECTION_COLOR: Color32 = Color32::from_rgb(245, 206, 93);

pub(in crate::app) fn verdict_color(verdict: Verdict) -> Color32 {
    match verdict {
        Verdict::Loved => Color32::from_rgb(246, 206, 104),
        Verdict::Liked => Color32::from_rgb(106, 168, 255),
        Verdict::Fine => Color32::from_rgb(154, 167, 180),
        Verdict::Disliked => Color32::from_rgb(224, 102, 102),
    }
}

pub(in crate::app) fn category_color(media_type: MediaType) -> Color32 {
    match media_type {
        MediaType::Film => Color32::from_rgb(255, 140, 105),
        MediaType::Series => Color32::from_rgb(186, 132, 255),
        MediaType::Book => Color32::from_rgb(120, 200, 140),
        MediaType::Game => Color32::from_rgb(255, 196, 84),
        MediaType::Album => Color32::from_rgb(96, 205, 220),
        MediaType::Podcast => Color32::from_rgb(230, 120, 180),
    }
}

pub(in crate::app) fn category_icon(media_type: MediaType) -> &'static str {
    match media_type {
        MediaType::Film => "🎬",
        MediaType::Series => "📺",
        MediaType::Book => "📖",
        MediaType::Game => "🎮",
        MediaType::Album => "🎵",
        MediaType::Podcast => "🎙",
    }
}

pub(in crate::app) fn blend_color(base: Color32, overlay: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let inverse = 1.0 - amount;

    Color32::from_rgba_unmultiplied(
        ((base.r() as f32 * inverse) + (overlay.r() as f32 * amount)) as u8,
        ((base.g() as f32 * inverse) + (overlay.g() as f32 * amount)) as u8,
        ((base.b() as f32 * inverse) + (overlay.b() as f32 * amount)) as u8,
        ((base.a() as f32 * inverse) + (overlay.a() as f32 * amount)) as u8,
    )
}

pub(in crate::app) fn dim_color(color: Color32, factor: f32) -> Color32 {
    let factor = factor.clamp(0.0, 1.0);
    Color32::from_rgba_unmultiplied(
        (color.r() as f32 * factor) as u8,
        (color.g() as f32 * factor) as u8,
        (color.b() as f32 * factor) as u8,
        (color.a() as f32 * (0.45 + (factor * 0.55))) as u8,
    )
}
