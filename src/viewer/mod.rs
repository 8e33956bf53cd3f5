//! The viewer is the host: it owns the map value, hands it to the mapper and
//! applies what the mapper reports back.

mod toolbar;

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::mpsc::{self, Receiver, Sender};

use bevy::prelude::*;
use bevy::tasks::{AsyncComputeTaskPool, Task};
use bevy_egui::EguiPrimaryContextPass;
use futures_lite::future;
use image_mapper::geometry::ImageSize;
use image_mapper::{
    Area, ImageMap, ImageMapperLoading, ImageMapperWidget, MapperHandlers, MapperProps,
};

use crate::config::{AddRecentMapRequest, ConfigLoaded, ViewerConfig};

/// What the mapper's handlers report back to the host
#[derive(Debug)]
pub enum MapperReport {
    Changed { area: Area, areas: Vec<Area> },
    Clicked { area: Area, index: usize },
    Loaded { src: String, natural: ImageSize },
}

/// Channel between the mapper's handlers and the host systems
#[derive(Resource)]
pub struct MapperInbox {
    sender: Sender<MapperReport>,
    receiver: Mutex<Receiver<MapperReport>>,
}

impl Default for MapperInbox {
    fn default() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            sender,
            receiver: Mutex::new(receiver),
        }
    }
}

impl MapperInbox {
    /// Handlers that forward every report into this inbox
    pub fn handlers(&self) -> MapperHandlers {
        let changes = self.sender.clone();
        let clicks = self.sender.clone();
        let loads = self.sender.clone();

        MapperHandlers::new(move |area, areas| {
            let _ = changes.send(MapperReport::Changed {
                area: area.clone(),
                areas: areas.to_vec(),
            });
        })
        .on_click(move |area, index, _event| {
            let _ = clicks.send(MapperReport::Clicked {
                area: area.clone(),
                index,
            });
        })
        .on_load(move |image, _rendered| {
            let _ = loads.send(MapperReport::Loaded {
                src: image.src.clone(),
                natural: image.natural,
            });
        })
    }

    fn drain(&self) -> Vec<MapperReport> {
        match self.receiver.lock() {
            Ok(receiver) => receiver.try_iter().collect(),
            Err(_) => Vec::new(),
        }
    }
}

/// Host-side state shown around the mapper
#[derive(Resource, Default)]
pub struct ViewerState {
    /// Last interaction, shown in the status bar
    pub status: Option<String>,
    /// Error from the last map file load or save
    pub map_error: Option<String>,
    /// Pending async file dialog for opening a map
    pub pending_open: Option<Task<Option<PathBuf>>>,
}

impl ViewerState {
    pub fn browse_for_map(&mut self) {
        if self.pending_open.is_some() {
            return;
        }
        let task_pool = AsyncComputeTaskPool::get();
        self.pending_open = Some(task_pool.spawn(async {
            rfd::AsyncFileDialog::new()
                .set_title("Open Image Map")
                .add_filter("Image map", &["json"])
                .pick_file()
                .await
                .map(|h| h.path().to_path_buf())
        }));
    }
}

/// Read and parse an image map file
pub fn load_map_file(path: &Path) -> Result<ImageMap, String> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| format!("Could not read {}: {}", path.display(), e))?;
    let map = ImageMap::from_json(&json)?;

    let malformed = map.malformed_count();
    if malformed > 0 {
        warn!(
            "Map '{}' has {} area(s) with coordinates that do not fit their shape",
            map.name, malformed
        );
    }
    info!("Loaded map '{}' with {} areas from {:?}", map.name, map.areas.len(), path);
    Ok(map)
}

/// Write an image map back to its file
pub fn save_map_file(path: &Path, map: &ImageMap) -> Result<(), String> {
    let json = map.to_json()?;
    std::fs::write(path, json).map_err(|e| format!("Could not write {}: {}", path.display(), e))?;
    info!("Saved map '{}' to {:?}", map.name, path);
    Ok(())
}

/// Hand the mapper a modified copy of its current props
pub fn update_props(widget: &mut ImageMapperWidget, change: impl FnOnce(&mut MapperProps)) {
    let mut next = widget.mapper.props().clone();
    change(&mut next);
    widget.mapper.set_props(next);
}

/// Load `path` into the mapper and remember it
pub fn open_map(
    path: PathBuf,
    widget: &mut ImageMapperWidget,
    state: &mut ViewerState,
    recent_events: &mut MessageWriter<AddRecentMapRequest>,
) {
    match load_map_file(&path) {
        Ok(map) => {
            state.status = Some(format!("Opened '{}'", map.name));
            state.map_error = None;
            update_props(widget, |props| props.map = map);
            recent_events.write(AddRecentMapRequest { path });
        }
        Err(e) => {
            warn!("{}", e);
            state.map_error = Some(e);
        }
    }
}

/// Startup system to spawn the mapper described by the config
fn spawn_mapper(
    mut commands: Commands,
    config: Res<ViewerConfig>,
    inbox: Res<MapperInbox>,
    mut state: ResMut<ViewerState>,
) {
    let map = match &config.data.map_file {
        Some(path) => load_map_file(path).unwrap_or_else(|e| {
            warn!("{}", e);
            state.map_error = Some(e);
            ImageMap::default()
        }),
        None => ImageMap::default(),
    };

    let props = MapperProps::new(config.data.image.clone(), map, inbox.handlers())
        .with_options(config.data.options.clone());
    commands.spawn(ImageMapperWidget::new(props));
}

/// System to apply mapper reports. The map only changes here, so the host
/// stays the single owner of persistent highlights.
fn apply_mapper_reports(
    inbox: Res<MapperInbox>,
    mut state: ResMut<ViewerState>,
    mut widgets: Query<&mut ImageMapperWidget>,
) {
    let Ok(mut widget) = widgets.single_mut() else {
        return;
    };

    for report in inbox.drain() {
        let key_name = widget.mapper.props().options.area_key_name.clone();
        match report {
            MapperReport::Changed { area, areas } => {
                let index = areas.iter().position(|a| *a == area).unwrap_or_default();
                let highlighted = area.pre_fill_color.is_some();
                debug!(
                    "Area '{}' highlight {}",
                    area.label(&key_name, index),
                    if highlighted { "set" } else { "removed" }
                );
                state.status = Some(format!(
                    "{} '{}'",
                    if highlighted { "Highlighted" } else { "Cleared" },
                    area.label(&key_name, index)
                ));
                update_props(&mut widget, |props| props.map.areas = areas);
            }
            MapperReport::Clicked { area, index } => {
                let label = area.label(&key_name, index);
                match &area.href {
                    Some(href) => {
                        info!("Opening link for area '{}': {}", label, href);
                        if let Err(e) = open::that(href) {
                            warn!("Failed to open {}: {}", href, e);
                            state.status = Some(format!("Could not open {}: {}", href, e));
                        } else {
                            state.status = Some(format!("Opened {}", href));
                        }
                    }
                    None => state.status = Some(format!("Clicked '{}'", label)),
                }
            }
            MapperReport::Loaded { src, natural } => {
                info!("Image '{}' ready at {}x{}", src, natural.width, natural.height);
                state.status = Some(format!(
                    "Loaded {} ({}x{})",
                    src, natural.width, natural.height
                ));
            }
        }
    }
}

/// System to pick up the result of the open map dialog
fn poll_open_map_dialog(
    mut state: ResMut<ViewerState>,
    mut widgets: Query<&mut ImageMapperWidget>,
    mut recent_events: MessageWriter<AddRecentMapRequest>,
) {
    if let Some(ref mut task) = state.pending_open
        && let Some(result) = future::block_on(future::poll_once(task))
    {
        state.pending_open = None;
        if let Some(path) = result
            && let Ok(mut widget) = widgets.single_mut()
        {
            open_map(path, &mut widget, &mut state, &mut recent_events);
        }
    }
}

pub struct ViewerPlugin;

impl Plugin for ViewerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MapperInbox>()
            .init_resource::<ViewerState>()
            .add_systems(Startup, spawn_mapper.after(ConfigLoaded))
            .add_systems(
                Update,
                (apply_mapper_reports, poll_open_map_dialog)
                    .chain()
                    .after(ImageMapperLoading),
            )
            .add_systems(
                EguiPrimaryContextPass,
                (
                    toolbar::toolbar_ui,
                    toolbar::status_bar_ui,
                    toolbar::mapper_panel_ui,
                    toolbar::config_reset_notification_ui,
                )
                    .chain(),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image_mapper::Shape;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("image-mapper-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_handlers_forward_changes_to_inbox() {
        let inbox = MapperInbox::default();
        let handlers = inbox.handlers();
        let area = Area::new("hall", Shape::Rect, vec![0.0, 0.0, 10.0, 10.0]);

        (handlers.on_change)(&area, std::slice::from_ref(&area));

        let reports = inbox.drain();
        assert_eq!(reports.len(), 1);
        match &reports[0] {
            MapperReport::Changed { area: changed, areas } => {
                assert_eq!(changed, &area);
                assert_eq!(areas.len(), 1);
            }
            other => panic!("unexpected report {:?}", other),
        }
        assert!(inbox.drain().is_empty());
    }

    #[test]
    fn test_map_file_round_trips_through_disk() {
        let path = temp_path("roundtrip.json");
        let map = ImageMap::new(
            "floor",
            vec![Area::new("hall", Shape::Poly, vec![0.0, 0.0, 10.0, 0.0, 5.0, 8.0])],
        );

        save_map_file(&path, &map).unwrap();
        let loaded = load_map_file(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, map);
    }

    #[test]
    fn test_missing_map_file_reports_path() {
        let path = temp_path("does-not-exist.json");
        let err = load_map_file(&path).unwrap_err();
        assert!(err.starts_with("Could not read"));
        assert!(err.contains("does-not-exist.json"));
    }

    #[test]
    fn test_invalid_map_file_is_an_error() {
        let path = temp_path("invalid.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();
        let err = load_map_file(&path).unwrap_err();
        let _ = std::fs::remove_file(&path);

        assert!(err.starts_with("Invalid map file"));
    }
}
