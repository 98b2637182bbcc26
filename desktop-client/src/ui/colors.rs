use common::games::snake::{ColorTier, FoodKind};
use egui::Color32;

pub const RED: Color32 = Color32::from_rgb(255, 0, 0);
pub const YELLOW: Color32 = Color32::from_rgb(255, 255, 0);
pub const PURPLE: Color32 = Color32::from_rgb(128, 0, 128);
pub const FINGERTIP: Color32 = Color32::from_rgb(0, 255, 0);
pub const HAND_BONES: Color32 = Color32::WHITE;
pub const HAND_JOINTS: Color32 = Color32::from_rgb(255, 0, 0);

pub fn snake_color(tier: ColorTier) -> Color32 {
    match tier {
        ColorTier::Low => RED,
        ColorTier::Mid => YELLOW,
        ColorTier::High => PURPLE,
    }
}

pub fn food_color(kind: FoodKind) -> Color32 {
    match kind {
        FoodKind::Apple => RED,
        FoodKind::Banana => YELLOW,
        FoodKind::Grape => PURPLE,
    }
}
