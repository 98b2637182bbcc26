use common::games::snake::{FieldSize, Point, SnakeGameState};
use common::gesture::{HAND_CONNECTIONS, HandLandmarks, Landmark};
use image::RgbImage;

use super::colors;
use crate::config::DisplayConfig;

const SCORE_FONT_SIZE: f32 = 24.0;
const FINGERTIP_RADIUS: f32 = 10.0;
const JOINT_RADIUS: f32 = 3.0;
const BONE_WIDTH: f32 = 2.0;

/// Maps grid cells onto the painted area, anchored at the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
struct GridLayout {
    origin: egui::Pos2,
    cell: f32,
}

impl GridLayout {
    fn fit(rect: egui::Rect, field_size: &FieldSize) -> Self {
        let cell_w = rect.width() / field_size.width as f32;
        let cell_h = rect.height() / field_size.height as f32;
        Self {
            origin: rect.min,
            cell: cell_w.min(cell_h),
        }
    }

    fn cell_rect(&self, point: Point) -> egui::Rect {
        let min = self.origin + egui::vec2(point.x as f32 * self.cell, point.y as f32 * self.cell);
        egui::Rect::from_min_size(min, egui::vec2(self.cell, self.cell))
    }
}

/// Normalized frame coordinates onto the painted area, which shows the whole frame stretched.
fn to_screen(rect: egui::Rect, point: &Landmark) -> egui::Pos2 {
    rect.min + egui::vec2(point.x * rect.width(), point.y * rect.height())
}

fn draw_hand(painter: &egui::Painter, rect: egui::Rect, hand: &HandLandmarks) {
    let stroke = egui::Stroke::new(BONE_WIDTH, colors::HAND_BONES);
    for (from, to) in HAND_CONNECTIONS {
        if let (Some(a), Some(b)) = (hand.get(from), hand.get(to)) {
            painter.line_segment([to_screen(rect, a), to_screen(rect, b)], stroke);
        }
    }
    for landmark in &hand.landmarks {
        painter.circle_filled(to_screen(rect, landmark), JOINT_RADIUS, colors::HAND_JOINTS);
    }
}

pub struct GameView {
    display: DisplayConfig,
    camera_texture: Option<egui::TextureHandle>,
}

impl GameView {
    pub fn new(display: DisplayConfig) -> Self {
        Self {
            display,
            camera_texture: None,
        }
    }

    pub fn set_camera_frame(&mut self, ctx: &egui::Context, frame: &RgbImage) {
        let size = [frame.width() as usize, frame.height() as usize];
        let image = egui::ColorImage::from_rgb(size, frame.as_raw());
        match self.camera_texture.as_mut() {
            Some(texture) => texture.set(image, egui::TextureOptions::LINEAR),
            None => {
                self.camera_texture =
                    Some(ctx.load_texture("camera_frame", image, egui::TextureOptions::LINEAR));
            }
        }
    }

    pub fn render_game(
        &self,
        ui: &mut egui::Ui,
        state: &SnakeGameState,
        hand: Option<&HandLandmarks>,
        tracked_point: Option<Landmark>,
    ) {
        let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::hover());
        let rect = response.rect;

        match &self.camera_texture {
            Some(texture) => {
                let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
                painter.image(texture.id(), rect, uv, egui::Color32::WHITE);
            }
            None => {
                painter.rect_filled(rect, 0.0, egui::Color32::BLACK);
            }
        }

        let layout = GridLayout::fit(rect, &state.field_size);

        let snake_color = colors::snake_color(state.tier);
        for segment in state.snake.body() {
            painter.rect_filled(layout.cell_rect(*segment), 0.0, snake_color);
        }

        let food_rect = layout.cell_rect(state.food.position);
        painter.circle_filled(food_rect.center(), layout.cell / 2.0, colors::food_color(state.food.kind));

        if self.display.show_hand {
            if let Some(hand) = hand {
                draw_hand(&painter, rect, hand);
            }
            if let Some(point) = tracked_point {
                painter.circle_filled(to_screen(rect, &point), FINGERTIP_RADIUS, colors::FINGERTIP);
            }
        }

        painter.text(
            rect.min + egui::vec2(10.0, 10.0),
            egui::Align2::LEFT_TOP,
            format!("Score: {}", state.score),
            egui::FontId::proportional(SCORE_FONT_SIZE),
            egui::Color32::WHITE,
        );
    }

    pub fn render_camera_missing(&self, ui: &mut egui::Ui) {
        let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::hover());
        let rect = response.rect;
        painter.rect_filled(rect, 0.0, egui::Color32::BLACK);
        painter.text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            "Webcam not detected",
            egui::FontId::proportional(SCORE_FONT_SIZE),
            egui::Color32::WHITE,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_fills_matching_aspect() {
        let rect = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(800.0, 600.0));
        let layout = GridLayout::fit(rect, &FieldSize::new(40, 30));
        assert_eq!(layout.cell, 20.0);
        let cell = layout.cell_rect(Point::new(39, 29));
        assert_eq!(cell.min, egui::pos2(780.0, 580.0));
        assert_eq!(cell.max, egui::pos2(800.0, 600.0));
    }

    #[test]
    fn test_landmarks_map_onto_the_whole_area() {
        let rect = egui::Rect::from_min_size(egui::pos2(10.0, 20.0), egui::vec2(800.0, 600.0));
        assert_eq!(to_screen(rect, &Landmark::new(0.0, 0.0)), egui::pos2(10.0, 20.0));
        assert_eq!(to_screen(rect, &Landmark::new(0.5, 0.25)), egui::pos2(410.0, 170.0));
        assert_eq!(to_screen(rect, &Landmark::new(1.0, 1.0)), egui::pos2(810.0, 620.0));
    }

    #[test]
    fn test_layout_uses_smaller_axis() {
        let rect = egui::Rect::from_min_size(egui::pos2(10.0, 20.0), egui::vec2(1000.0, 600.0));
        let layout = GridLayout::fit(rect, &FieldSize::new(40, 30));
        assert_eq!(layout.cell, 20.0);
        assert_eq!(layout.cell_rect(Point::new(0, 0)).min, egui::pos2(10.0, 20.0));
        assert_eq!(layout.cell_rect(Point::new(1, 2)).center(), egui::pos2(40.0, 70.0));
    }
}
