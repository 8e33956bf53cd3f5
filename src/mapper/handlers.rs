use std::fmt;
use std::sync::Arc;

use bevy::prelude::*;

use crate::geometry::ImageSize;
use crate::map::Area;

/// Kind of pointer interaction delivered to an area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    Click,
    MouseEnter,
    MouseLeave,
    MouseMove,
    MouseDown,
    MouseUp,
    TouchStart,
    TouchEnd,
}

/// The interaction that triggered a handler, in rendered image pixels
/// relative to the image's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub position: Vec2,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, position: Vec2) -> Self {
        Self { kind, position }
    }
}

/// The image a mapper finished loading.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedImage {
    pub src: String,
    pub natural: ImageSize,
}

pub type AreaHandler = Arc<dyn Fn(&Area, usize, &PointerEvent) + Send + Sync>;
pub type ImageHandler = Arc<dyn Fn(&PointerEvent) + Send + Sync>;
pub type ChangeHandler = Arc<dyn Fn(&Area, &[Area]) + Send + Sync>;
pub type LoadHandler = Arc<dyn Fn(&LoadedImage, ImageSize) + Send + Sync>;

/// Host callbacks. Only `on_change` is required.
#[derive(Clone)]
pub struct MapperHandlers {
    /// Receives the updated area and the full updated area list after a
    /// highlight click
    pub on_change: ChangeHandler,
    pub on_click: Option<AreaHandler>,
    pub on_mouse_enter: Option<AreaHandler>,
    pub on_mouse_leave: Option<AreaHandler>,
    pub on_mouse_move: Option<AreaHandler>,
    pub on_mouse_down: Option<AreaHandler>,
    pub on_mouse_up: Option<AreaHandler>,
    pub on_touch_start: Option<AreaHandler>,
    pub on_touch_end: Option<AreaHandler>,
    pub on_image_click: Option<ImageHandler>,
    pub on_image_mouse_move: Option<ImageHandler>,
    pub on_load: Option<LoadHandler>,
}

impl MapperHandlers {
    pub fn new(on_change: impl Fn(&Area, &[Area]) + Send + Sync + 'static) -> Self {
        Self {
            on_change: Arc::new(on_change),
            on_click: None,
            on_mouse_enter: None,
            on_mouse_leave: None,
            on_mouse_move: None,
            on_mouse_down: None,
            on_mouse_up: None,
            on_touch_start: None,
            on_touch_end: None,
            on_image_click: None,
            on_image_mouse_move: None,
            on_load: None,
        }
    }

    /// Set the handler for one area interaction kind.
    pub fn on_area(
        mut self,
        kind: PointerKind,
        handler: impl Fn(&Area, usize, &PointerEvent) + Send + Sync + 'static,
    ) -> Self {
        let handler: AreaHandler = Arc::new(handler);
        let slot = match kind {
            PointerKind::Click => &mut self.on_click,
            PointerKind::MouseEnter => &mut self.on_mouse_enter,
            PointerKind::MouseLeave => &mut self.on_mouse_leave,
            PointerKind::MouseMove => &mut self.on_mouse_move,
            PointerKind::MouseDown => &mut self.on_mouse_down,
            PointerKind::MouseUp => &mut self.on_mouse_up,
            PointerKind::TouchStart => &mut self.on_touch_start,
            PointerKind::TouchEnd => &mut self.on_touch_end,
        };
        *slot = Some(handler);
        self
    }

    pub fn on_click(self, handler: impl Fn(&Area, usize, &PointerEvent) + Send + Sync + 'static) -> Self {
        self.on_area(PointerKind::Click, handler)
    }

    pub fn on_image_click(mut self, handler: impl Fn(&PointerEvent) + Send + Sync + 'static) -> Self {
        self.on_image_click = Some(Arc::new(handler));
        self
    }

    pub fn on_image_mouse_move(
        mut self,
        handler: impl Fn(&PointerEvent) + Send + Sync + 'static,
    ) -> Self {
        self.on_image_mouse_move = Some(Arc::new(handler));
        self
    }

    pub fn on_load(mut self, handler: impl Fn(&LoadedImage, ImageSize) + Send + Sync + 'static) -> Self {
        self.on_load = Some(Arc::new(handler));
        self
    }

    pub fn area_handler(&self, kind: PointerKind) -> Option<&AreaHandler> {
        match kind {
            PointerKind::Click => self.on_click.as_ref(),
            PointerKind::MouseEnter => self.on_mouse_enter.as_ref(),
            PointerKind::MouseLeave => self.on_mouse_leave.as_ref(),
            PointerKind::MouseMove => self.on_mouse_move.as_ref(),
            PointerKind::MouseDown => self.on_mouse_down.as_ref(),
            PointerKind::MouseUp => self.on_mouse_up.as_ref(),
            PointerKind::TouchStart => self.on_touch_start.as_ref(),
            PointerKind::TouchEnd => self.on_touch_end.as_ref(),
        }
    }
}

impl fmt::Debug for MapperHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kinds = [
            PointerKind::Click,
            PointerKind::MouseEnter,
            PointerKind::MouseLeave,
            PointerKind::MouseMove,
            PointerKind::MouseDown,
            PointerKind::MouseUp,
            PointerKind::TouchStart,
            PointerKind::TouchEnd,
        ];
        let set: Vec<PointerKind> = kinds
            .into_iter()
            .filter(|k| self.area_handler(*k).is_some())
            .collect();
        f.debug_struct("MapperHandlers")
            .field("area_handlers", &set)
            .field("on_image_click", &self.on_image_click.is_some())
            .field("on_image_mouse_move", &self.on_image_mouse_move.is_some())
            .field("on_load", &self.on_load.is_some())
            .finish()
    }
}
