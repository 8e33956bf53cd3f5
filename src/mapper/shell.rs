//! The mapper itself: mount lifecycle, surface sizing, region building,
//! pointer dispatch and the click highlight policy.

use bevy::prelude::*;

use super::{LoadedImage, MapperProps, PointerEvent, PointerKind, should_rerender};
use crate::canvas::{DrawingSurface, draw};
use crate::geometry::{
    DimensionContext, ExtendedArea, HighlightPath, ImageSize, ScaleContext, SizingStrategy,
    resolve,
};
use crate::map::{Area, ImageMap};

/// Mount lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MountState {
    #[default]
    Unmounted,
    /// Surface attached, waiting for the one-shot image completion signal
    AwaitingImage,
    Ready,
}

/// The box the image, surface and regions are laid out in.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Container {
    /// Pixel size, set once the image is ready
    pub size: Option<ImageSize>,
}

/// A transparent interactive region over one enabled area.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    /// Position of the area in the map
    pub index: usize,
    pub extended: ExtendedArea,
    pub path: HighlightPath,
}

impl Region {
    pub fn area(&self) -> &Area {
        &self.extended.area
    }

    pub fn is_pre_filled(&self) -> bool {
        self.extended.area.pre_fill_color.is_some()
    }
}

/// Handles to the mapper's resources for host-side access.
#[derive(Debug)]
pub struct MapperRefs<'a, S> {
    pub container: &'a Container,
    pub image: Option<&'a LoadedImage>,
    pub surface: Option<&'a S>,
}

/// Image map shell over a drawing surface `S`.
///
/// Map data is host-owned: clicks that change highlights produce new values
/// through `on_change` and the shell waits for the host to pass the updated
/// map back in through [`ImageMapper::set_props`].
///
/// The map as first supplied is kept apart from later host updates. Toggling
/// removes only highlights that map already carried; highlights added by
/// clicks stay set. A new image source or a map with a different name
/// replaces it.
#[derive(Debug)]
pub struct ImageMapper<S: DrawingSurface> {
    props: MapperProps,
    /// Map as first supplied, the reference for toggling
    authored: ImageMap,
    state: MountState,
    surface: Option<S>,
    container: Container,
    image: Option<LoadedImage>,
    rendered: Option<ImageSize>,
    regions: Vec<Region>,
    hovered: Option<usize>,
    available_width: Option<f32>,
}

impl<S: DrawingSurface> ImageMapper<S> {
    pub fn new(props: MapperProps) -> Self {
        Self {
            authored: props.map.clone(),
            props,
            state: MountState::Unmounted,
            surface: None,
            container: Container::default(),
            image: None,
            rendered: None,
            regions: Vec::new(),
            hovered: None,
            available_width: None,
        }
    }

    pub fn props(&self) -> &MapperProps {
        &self.props
    }

    pub fn state(&self) -> MountState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == MountState::Ready
    }

    /// Interactive regions in render order; empty until ready or when disabled
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn rendered_size(&self) -> Option<ImageSize> {
        self.rendered
    }

    /// Map index of the area under the pointer
    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn refs(&self) -> MapperRefs<'_, S> {
        MapperRefs {
            container: &self.container,
            image: self.image.as_ref(),
            surface: self.surface.as_ref(),
        }
    }

    /// Attach the drawing surface and start waiting for the image.
    pub fn mount(&mut self, surface: S) -> bool {
        if self.state != MountState::Unmounted {
            warn!("Image mapper for '{}' is already mounted", self.props.src);
            return false;
        }
        self.surface = Some(surface);
        self.state = MountState::AwaitingImage;
        debug!("Image mapper mounted, waiting for '{}'", self.props.src);
        true
    }

    /// The one-shot image completion signal. Ignored unless the mapper is
    /// mounted and still waiting.
    pub fn image_loaded(&mut self, natural: ImageSize) -> bool {
        if self.state != MountState::AwaitingImage || self.surface.is_none() {
            return false;
        }

        self.image = Some(LoadedImage {
            src: self.props.src.clone(),
            natural,
        });
        self.state = MountState::Ready;
        info!(
            "Image '{}' ready at {}x{}",
            self.props.src, natural.width, natural.height
        );
        self.init_canvas(true);
        true
    }

    /// Detach the surface. Nothing stays scheduled after this.
    pub fn unmount(&mut self) -> Option<S> {
        self.state = MountState::Unmounted;
        self.image = None;
        self.rendered = None;
        self.container = Container::default();
        self.regions.clear();
        self.hovered = None;
        self.surface.take()
    }

    /// Adopt new props. Returns whether a re-render happened.
    ///
    /// The new props are always kept, but a change limited to handlers or the
    /// highlight policy never repaints.
    pub fn set_props(&mut self, next: MapperProps) -> bool {
        let rerender = should_rerender(&self.props, &next);
        let src_changed = self.props.src != next.src;
        if src_changed || self.props.map.name != next.map.name {
            self.authored = next.map.clone();
        }
        self.props = next;

        if !rerender {
            return false;
        }

        if src_changed && self.state != MountState::Unmounted {
            debug!("Image source changed to '{}'", self.props.src);
            self.state = MountState::AwaitingImage;
            self.image = None;
            self.rendered = None;
            self.container = Container::default();
            self.regions.clear();
            self.hovered = None;
            self.clear_canvas();
            return true;
        }

        if self.is_ready() {
            if self.target_size() != self.rendered {
                self.init_canvas(false);
            } else {
                self.rebuild_regions();
                self.reset_canvas_and_prefill();
            }
            self.restore_hover_highlight();
        }
        true
    }

    /// Feed the width the parent layout currently offers.
    ///
    /// In responsive mode this becomes `parent_width` and goes through the
    /// normal change path. Under layout sizing a ready mapper resizes when
    /// the clamped size changes.
    pub fn observe_parent_width(&mut self, width: f32) -> bool {
        let changed = self.available_width != Some(width);
        self.available_width = Some(width);

        if self.props.options.responsive {
            if self.props.options.parent_width == width {
                return false;
            }
            let mut next = self.props.clone();
            next.options.parent_width = width;
            return self.set_props(next);
        }

        if !changed
            || !self.is_ready()
            || self.dimension_context().strategy() != SizingStrategy::Layout
            || self.target_size() == self.rendered
        {
            return false;
        }
        debug!("Available width changed to {}, resizing", width);
        self.init_canvas(false);
        self.restore_hover_highlight();
        true
    }

    pub fn dimension_context(&self) -> DimensionContext {
        self.props.options.dimensions(self.available_width)
    }

    fn target_size(&self) -> Option<ImageSize> {
        self.image
            .as_ref()
            .map(|image| self.dimension_context().rendered_size(image.natural))
    }

    pub fn scale_context(&self) -> Option<ScaleContext> {
        let image = self.image.as_ref()?;
        let rendered = self.rendered?;
        Some(ScaleContext::new(
            image.natural,
            rendered,
            self.props.options.img_width,
        ))
    }

    /// Resolve an area against the current layout; `None` until ready.
    pub fn resolve_area(&self, area: &Area) -> Option<ExtendedArea> {
        let scale = self.scale_context()?;
        Some(resolve(area, &scale, &self.props.options.style()))
    }

    /// Size container and surface to the target size, rebuild regions and
    /// paint persistent highlights.
    fn init_canvas(&mut self, trigger_on_load: bool) {
        let Some(target) = self.target_size() else {
            return;
        };
        let Some(surface) = self.surface.as_mut() else {
            return;
        };

        let (width, height) = target.to_pixels();
        surface.set_size(width, height);
        self.container.size = Some(target);
        self.rendered = Some(target);
        debug!("Sized image mapper to {}x{}", width, height);

        self.rebuild_regions();
        self.render_prefilled_areas();

        if trigger_on_load
            && let (Some(on_load), Some(image)) = (self.props.handlers.on_load.clone(), &self.image)
        {
            on_load(image, target);
        }
    }

    fn rebuild_regions(&mut self) {
        self.regions.clear();
        if self.props.options.disabled {
            return;
        }
        let Some(scale) = self.scale_context() else {
            return;
        };
        let style = self.props.options.style();

        self.regions = self
            .props
            .map
            .areas
            .iter()
            .enumerate()
            .filter(|(_, area)| !area.disabled)
            .map(|(index, area)| {
                let extended = resolve(area, &scale, &style);
                let path = extended.path();
                Region {
                    index,
                    extended,
                    path,
                }
            })
            .collect();

        if self.hovered.is_some_and(|i| self.region(i).is_none()) {
            self.hovered = None;
        }

        let malformed = self.props.map.malformed_count();
        if malformed > 0 {
            debug!(
                "Map '{}' has {} area(s) with malformed coordinates",
                self.props.map.name, malformed
            );
        }
    }

    fn render_prefilled_areas(&mut self) {
        let Some(scale) = self.scale_context() else {
            return;
        };
        let style = self.props.options.style();

        for area in &self.props.map.areas {
            if let Some(filled) = resolve(area, &scale, &style).pre_filled() {
                draw(&filled, self.surface.as_mut());
            }
        }
    }

    fn clear_canvas(&mut self) {
        if let Some(surface) = self.surface.as_mut() {
            surface.clear();
        }
    }

    fn reset_canvas_and_prefill(&mut self) {
        self.clear_canvas();
        self.render_prefilled_areas();
    }

    fn highlight_area(&mut self, area: &Area) -> bool {
        let Some(extended) = self.resolve_area(area) else {
            return false;
        };
        if !extended.active {
            return false;
        }
        draw(&extended, self.surface.as_mut())
    }

    fn restore_hover_highlight(&mut self) {
        if !self.props.options.active {
            return;
        }
        if let Some(area) = self.hovered.and_then(|i| self.region(i)).map(|r| r.area().clone()) {
            self.highlight_area(&area);
        }
    }

    /// Drop transient highlights, keeping persistent ones.
    pub fn clear_highlighted_area(&mut self) {
        self.reset_canvas_and_prefill();
    }

    /// Blank the surface, persistent highlights included. They return on the
    /// next repaint.
    pub fn clear_all_highlights(&mut self) {
        self.clear_canvas();
    }

    fn region(&self, index: usize) -> Option<&Region> {
        self.regions.iter().find(|r| r.index == index)
    }

    /// Topmost region containing `point`; later areas win.
    pub fn region_at(&self, point: Vec2) -> Option<&Region> {
        self.regions.iter().rev().find(|r| r.path.contains(point))
    }

    /// Deliver an interaction to the area at map `index`: the host handler
    /// first, then the shell's own highlight logic for enter, leave and click.
    pub fn area_event(&mut self, kind: PointerKind, index: usize, position: Vec2) {
        let Some(area) = self.region(index).map(|r| r.area().clone()) else {
            return;
        };
        let event = PointerEvent::new(kind, position);

        if let Some(handler) = self.props.handlers.area_handler(kind).cloned() {
            handler(&area, index, &event);
        }

        match kind {
            PointerKind::MouseEnter => {
                if self.props.options.active {
                    self.highlight_area(&area);
                }
            }
            PointerKind::MouseLeave => {
                if self.props.options.active {
                    self.reset_canvas_and_prefill();
                }
            }
            PointerKind::Click => self.on_highlight_area(&area, index),
            _ => {}
        }
    }

    fn image_event(&self, kind: PointerKind, position: Vec2) {
        let handler = match kind {
            PointerKind::Click => self.props.handlers.on_image_click.clone(),
            PointerKind::MouseMove => self.props.handlers.on_image_mouse_move.clone(),
            _ => None,
        };
        if let Some(handler) = handler {
            handler(&PointerEvent::new(kind, position));
        }
    }

    /// Track the pointer; `None` means it left the image.
    pub fn pointer_moved(&mut self, position: Option<Vec2>) {
        if !self.is_ready() {
            return;
        }

        let hit = position.and_then(|p| self.region_at(p)).map(|r| r.index);
        let at = position.unwrap_or(Vec2::ZERO);

        if hit != self.hovered {
            if let Some(previous) = self.hovered.take() {
                self.area_event(PointerKind::MouseLeave, previous, at);
            }
            if let Some(current) = hit {
                self.hovered = Some(current);
                self.area_event(PointerKind::MouseEnter, current, at);
            }
        }

        if let Some(p) = position {
            match hit {
                Some(index) => self.area_event(PointerKind::MouseMove, index, p),
                None => self.image_event(PointerKind::MouseMove, p),
            }
        }
    }

    /// Press, release, click or touch at `position`.
    pub fn pointer_action(&mut self, kind: PointerKind, position: Vec2) {
        if !self.is_ready() {
            return;
        }
        match self.region_at(position).map(|r| r.index) {
            Some(index) => self.area_event(kind, index, position),
            None => self.image_event(kind, position),
        }
    }

    /// Apply the click highlight policy and report the result to the host.
    fn on_highlight_area(&mut self, area: &Area, index: usize) {
        let Some(policy) = self.props.options.highlighted else {
            return;
        };
        let key_name = self.props.options.area_key_name.as_str();
        let source = &self.props.map;
        let Some(position) = source.position_of(area, key_name, index) else {
            return;
        };

        let chosen = if policy.is_multi {
            area.clone()
        } else {
            source.areas[position].clone()
        };

        let Some(extended) = self.resolve_area(&chosen) else {
            return;
        };
        if !(self.props.options.active && extended.active) {
            return;
        }

        // Toggling only removes highlights the first-supplied map carried
        let authored = self
            .authored
            .position_of(&chosen, key_name, position)
            .and_then(|i| self.authored.areas.get(i))
            .is_some_and(|a| a.pre_fill_color.is_some());
        let mut updated = chosen;
        if policy.toggle && updated.pre_fill_color.is_some() {
            if authored {
                updated.pre_fill_color = None;
            }
        } else {
            updated.pre_fill_color = Some(extended.fill_color);
        }

        let areas = source.with_area_replaced(position, &updated);
        debug!(
            "Area '{}' highlight changed",
            updated.label(key_name, position)
        );

        let on_change = self.props.handlers.on_change.clone();
        on_change(&updated, &areas);
    }
}
