//! egui presentation of a mapper: image, highlight canvas and pointer input.

use bevy::prelude::*;
use bevy_egui::egui;

use crate::canvas::HighlightCanvas;
use crate::mapper::{ImageMapper, PointerKind};

impl ImageMapper<HighlightCanvas> {
    /// Draw the mapper into `ui` and feed this frame's pointer input to it.
    ///
    /// Shows a spinner until the image is ready and its texture registered.
    pub fn show(&mut self, ui: &mut egui::Ui, texture: Option<egui::TextureId>) -> egui::Response {
        let (Some(texture), Some(size), true) = (texture, self.rendered_size(), self.is_ready())
        else {
            return ui.add(egui::Spinner::new());
        };

        let (rect, response) =
            ui.allocate_exact_size(egui::vec2(size.width, size.height), egui::Sense::click());

        egui::Image::new(egui::load::SizedTexture::new(texture, rect.size())).paint_at(ui, rect);
        if let Some(canvas) = self.surface() {
            canvas.paint(ui.painter(), rect.min);
        }

        let to_local = |pos: egui::Pos2| Vec2::new(pos.x - rect.min.x, pos.y - rect.min.y);

        self.pointer_moved(response.hover_pos().map(to_local));

        let (pressed, released, pointer_pos) = ui.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.interact_pos(),
            )
        });
        if let Some(pos) = pointer_pos.filter(|p| rect.contains(*p)) {
            if pressed {
                self.pointer_action(PointerKind::MouseDown, to_local(pos));
            }
            if released {
                self.pointer_action(PointerKind::MouseUp, to_local(pos));
            }
        }

        if response.clicked()
            && let Some(pos) = response.interact_pointer_pos()
        {
            self.pointer_action(PointerKind::Click, to_local(pos));
        }

        let touches: Vec<(egui::TouchPhase, egui::Pos2)> = ui.input(|i| {
            i.events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::Touch { phase, pos, .. } => Some((*phase, *pos)),
                    _ => None,
                })
                .collect()
        });
        for (phase, pos) in touches {
            if !rect.contains(pos) {
                continue;
            }
            match phase {
                egui::TouchPhase::Start => self.pointer_action(PointerKind::TouchStart, to_local(pos)),
                egui::TouchPhase::End => self.pointer_action(PointerKind::TouchEnd, to_local(pos)),
                _ => {}
            }
        }

        if self.hovered().is_some() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        }

        response
    }
}
