//! Bevy integration: loads each mapper's image through the asset server and
//! signals readiness once, when the asset reports it finished loading.
//!
//! Requires `bevy_egui`'s `EguiPlugin` for texture registration.

use bevy::asset::LoadState;
use bevy::prelude::*;
use bevy_egui::{EguiTextureHandle, EguiUserTextures, egui};

use crate::canvas::HighlightCanvas;
use crate::geometry::ImageSize;
use crate::mapper::{ImageMapper, MapperProps, MountState};

/// System set for image loading and readiness (UI systems can run after this)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageMapperLoading;

/// An image mapper placed in the world.
#[derive(Component)]
pub struct ImageMapperWidget {
    pub mapper: ImageMapper<HighlightCanvas>,
    /// Feed the available egui width as `parent_width` in responsive mode
    pub track_parent_width: bool,
    image: Option<Handle<Image>>,
    requested_src: Option<String>,
    texture: Option<egui::TextureId>,
    load_error: Option<String>,
}

impl ImageMapperWidget {
    pub fn new(props: MapperProps) -> Self {
        Self {
            mapper: ImageMapper::new(props),
            track_parent_width: true,
            image: None,
            requested_src: None,
            texture: None,
            load_error: None,
        }
    }

    pub fn image(&self) -> Option<&Handle<Image>> {
        self.image.as_ref()
    }

    pub fn texture(&self) -> Option<egui::TextureId> {
        self.texture
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    fn needs_request(&self) -> bool {
        self.requested_src.as_deref() != Some(self.mapper.props().src.as_str())
    }

    /// Draw the mapper into `ui`.
    pub fn show(&mut self, ui: &mut egui::Ui) -> egui::Response {
        if let Some(error) = &self.load_error {
            return ui.colored_label(egui::Color32::from_rgb(200, 100, 100), error);
        }
        let width = ui.available_width();
        if self.track_parent_width && width.is_finite() {
            self.mapper.observe_parent_width(width);
        }
        self.mapper.show(ui, self.texture)
    }

    /// Register the texture and deliver the completion signal.
    fn complete(&mut self, image: &Image, egui_textures: &mut EguiUserTextures) {
        let Some(handle) = &self.image else {
            return;
        };
        if self.texture.is_none() {
            self.texture = Some(egui_textures.add_image(EguiTextureHandle::Weak(handle.id())));
        }
        let size = image.size();
        self.mapper
            .image_loaded(ImageSize::new(size.x as f32, size.y as f32));
    }
}

/// Start loading images for new widgets and widgets whose source changed
fn request_image_loads(
    asset_server: Res<AssetServer>,
    images: Res<Assets<Image>>,
    mut egui_textures: ResMut<EguiUserTextures>,
    mut widgets: Query<&mut ImageMapperWidget>,
) {
    for mut widget in widgets.iter_mut() {
        if !widget.needs_request() {
            continue;
        }

        let src = widget.mapper.props().src.clone();
        info!("Loading image map source '{}'", src);

        if widget.mapper.state() == MountState::Unmounted {
            widget.mapper.mount(HighlightCanvas::default());
        }

        let handle: Handle<Image> = asset_server.load(src.clone());
        widget.image = Some(handle.clone());
        widget.requested_src = Some(src);
        widget.texture = None;
        widget.load_error = None;

        // Already loaded by someone else: its event has been and gone
        if let Some(image) = images.get(&handle) {
            widget.complete(image, &mut egui_textures);
        }
    }
}

/// Deliver the one-shot completion signal from asset events
fn complete_image_loads(
    mut events: MessageReader<AssetEvent<Image>>,
    images: Res<Assets<Image>>,
    mut egui_textures: ResMut<EguiUserTextures>,
    mut widgets: Query<&mut ImageMapperWidget>,
) {
    for event in events.read() {
        let AssetEvent::LoadedWithDependencies { id } = event else {
            continue;
        };
        let Some(image) = images.get(*id) else {
            continue;
        };

        for mut widget in widgets.iter_mut() {
            let waiting = widget.mapper.state() == MountState::AwaitingImage
                && widget.image.as_ref().is_some_and(|h| h.id() == *id);
            if waiting {
                widget.complete(image, &mut egui_textures);
            }
        }
    }
}

/// Surface load failures to the widget instead of spinning forever
fn report_failed_loads(asset_server: Res<AssetServer>, mut widgets: Query<&mut ImageMapperWidget>) {
    for mut widget in widgets.iter_mut() {
        if widget.load_error.is_some() || widget.mapper.state() != MountState::AwaitingImage {
            continue;
        }
        let Some(handle) = widget.image.clone() else {
            continue;
        };
        if let LoadState::Failed(error) = asset_server.load_state(&handle) {
            warn!(
                "Image map source '{}' failed to load: {}",
                widget.mapper.props().src,
                error
            );
            widget.load_error = Some(format!("Could not load image: {}", error));
        }
    }
}

pub struct ImageMapperPlugin;

impl Plugin for ImageMapperPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (request_image_loads, complete_image_loads, report_failed_loads)
                .chain()
                .in_set(ImageMapperLoading),
        );
    }
}
