use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};
use image_mapper::{HighlightPolicy, ImageMapperWidget, MapperOptions};

use super::{ViewerState, open_map, save_map_file, update_props};
use crate::config::{
    AddRecentMapRequest, ConfigResetNotification, SaveConfigRequest, ViewerConfig,
};

/// What a click on an area does, as offered in the toolbar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HighlightMode {
    Off,
    Multi,
    Single,
}

impl HighlightMode {
    const ALL: [HighlightMode; 3] = [Self::Off, Self::Multi, Self::Single];

    fn of(policy: Option<HighlightPolicy>) -> Self {
        match policy {
            None => Self::Off,
            Some(p) if p.is_multi => Self::Multi,
            Some(_) => Self::Single,
        }
    }

    fn policy(self, toggle: bool) -> Option<HighlightPolicy> {
        match self {
            Self::Off => None,
            Self::Multi => Some(HighlightPolicy {
                is_multi: true,
                toggle,
            }),
            Self::Single => Some(HighlightPolicy {
                is_multi: false,
                toggle,
            }),
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Off => "Off",
            Self::Multi => "Multi",
            Self::Single => "Single",
        }
    }
}

/// Option toggles, returns true when anything changed
fn options_ui(ui: &mut egui::Ui, options: &mut MapperOptions) -> bool {
    let mut changed = false;
    changed |= ui.checkbox(&mut options.active, "Active").changed();
    changed |= ui.checkbox(&mut options.responsive, "Responsive").changed();
    changed |= ui.checkbox(&mut options.disabled, "Disabled").changed();

    ui.add_space(8.0);
    ui.separator();
    ui.add_space(8.0);

    let mut mode = HighlightMode::of(options.highlighted);
    let mut toggle = options.highlighted.is_some_and(|p| p.toggle);
    egui::ComboBox::from_label("Click highlight")
        .selected_text(mode.label())
        .show_ui(ui, |ui| {
            for candidate in HighlightMode::ALL {
                ui.selectable_value(&mut mode, candidate, candidate.label());
            }
        });
    ui.add_enabled_ui(mode != HighlightMode::Off, |ui| {
        ui.checkbox(&mut toggle, "Toggle");
    });

    let policy = mode.policy(toggle);
    if policy != options.highlighted {
        options.highlighted = policy;
        changed = true;
    }
    changed
}

/// Renders the top toolbar
pub fn toolbar_ui(
    mut contexts: EguiContexts,
    mut state: ResMut<ViewerState>,
    mut config: ResMut<ViewerConfig>,
    mut widgets: Query<&mut ImageMapperWidget>,
    mut recent_events: MessageWriter<AddRecentMapRequest>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) -> Result {
    let Ok(mut widget) = widgets.single_mut() else {
        return Ok(());
    };

    let mut open_recent = None;
    let mut options = widget.mapper.props().options.clone();
    let mut options_changed = false;

    egui::TopBottomPanel::top("viewer_toolbar")
        .frame(
            egui::Frame::side_top_panel(&contexts.ctx_mut()?.style())
                .inner_margin(egui::Margin::symmetric(12, 8)),
        )
        .show(contexts.ctx_mut()?, |ui| {
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = 4.0;

                let browsing = state.pending_open.is_some();
                if ui
                    .add_enabled(!browsing, egui::Button::new("Open Map..."))
                    .clicked()
                {
                    state.browse_for_map();
                }

                ui.add_enabled_ui(!config.data.recent_maps.is_empty(), |ui| {
                    ui.menu_button("Recent", |ui| {
                        for path in &config.data.recent_maps {
                            let name = path
                                .file_name()
                                .map(|n| n.to_string_lossy().to_string())
                                .unwrap_or_else(|| path.display().to_string());
                            if ui.button(name).on_hover_text(path.display().to_string()).clicked() {
                                open_recent = Some(path.clone());
                                ui.close();
                            }
                        }
                    });
                });

                if let Some(path) = config.data.map_file.clone()
                    && ui.button("Save Map").clicked()
                {
                    match save_map_file(&path, &widget.mapper.props().map) {
                        Ok(()) => {
                            state.status = Some(format!("Saved {}", path.display()));
                            state.map_error = None;
                        }
                        Err(e) => {
                            error!("{}", e);
                            state.map_error = Some(e);
                        }
                    }
                }

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                options_changed = options_ui(ui, &mut options);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                if ui
                    .button("Clear Hover")
                    .on_hover_text("Remove the hover highlight, keeping persistent ones")
                    .clicked()
                {
                    widget.mapper.clear_highlighted_area();
                }
                if ui
                    .button("Clear All")
                    .on_hover_text("Blank the highlight canvas until the next repaint")
                    .clicked()
                {
                    widget.mapper.clear_all_highlights();
                }
            });
        });

    if options_changed {
        debug!("Mapper options changed from the toolbar");
        config.data.options = options.clone();
        config.dirty = true;
        save_events.write(SaveConfigRequest);
        update_props(&mut widget, |props| props.options = options);
    }

    if let Some(path) = open_recent {
        open_map(path, &mut widget, &mut state, &mut recent_events);
    }

    Ok(())
}

/// Renders the bottom status bar
pub fn status_bar_ui(
    mut contexts: EguiContexts,
    state: Res<ViewerState>,
    widgets: Query<&ImageMapperWidget>,
) -> Result {
    let Ok(widget) = widgets.single() else {
        return Ok(());
    };
    let map = &widget.mapper.props().map;
    let malformed = map.malformed_count();

    egui::TopBottomPanel::bottom("viewer_status").show(contexts.ctx_mut()?, |ui| {
        ui.horizontal(|ui| {
            let name = if map.name.is_empty() {
                "(no map)"
            } else {
                map.name.as_str()
            };
            ui.label(format!("{}: {} areas", name, map.areas.len()));
            if malformed > 0 {
                ui.colored_label(
                    egui::Color32::from_rgb(200, 150, 50),
                    format!("{} malformed", malformed),
                );
            }
            if let Some(hovered) = widget.mapper.hovered()
                && let Some(region) = widget.mapper.regions().iter().find(|r| r.index == hovered)
            {
                let key_name = &widget.mapper.props().options.area_key_name;
                ui.label(format!("Hover: {}", region.area().label(key_name, hovered)));
            }

            ui.separator();
            if let Some(error) = &state.map_error {
                ui.colored_label(egui::Color32::from_rgb(200, 100, 100), error);
            } else if let Some(status) = &state.status {
                ui.label(status);
            }
        });
    });

    Ok(())
}

/// Renders the mapper in the central panel
pub fn mapper_panel_ui(
    mut contexts: EguiContexts,
    mut widgets: Query<&mut ImageMapperWidget>,
) -> Result {
    let Ok(mut widget) = widgets.single_mut() else {
        return Ok(());
    };

    egui::CentralPanel::default().show(contexts.ctx_mut()?, |ui| {
        egui::ScrollArea::vertical().show(ui, |ui| {
            widget.show(ui);
        });
    });

    Ok(())
}

/// Renders the notice shown when the config file could not be used
pub fn config_reset_notification_ui(
    mut contexts: EguiContexts,
    mut notification: ResMut<ConfigResetNotification>,
) -> Result {
    if !notification.show {
        return Ok(());
    }

    let mut dismissed = false;
    egui::Window::new("Configuration Reset")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.label("Your configuration could not be loaded and was reset to defaults.");
            if let Some(reason) = &notification.reason {
                ui.add_space(4.0);
                ui.colored_label(egui::Color32::from_rgb(200, 150, 50), reason);
            }
            ui.add_space(8.0);
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });

    if dismissed {
        notification.show = false;
        notification.reason = None;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_mode_round_trips_policy() {
        for mode in HighlightMode::ALL {
            for toggle in [false, true] {
                let policy = mode.policy(toggle);
                assert_eq!(HighlightMode::of(policy), mode);
            }
        }
    }

    #[test]
    fn test_off_mode_has_no_policy() {
        assert!(HighlightMode::Off.policy(true).is_none());
        assert_eq!(
            HighlightMode::Single.policy(true),
            Some(HighlightPolicy {
                is_multi: false,
                toggle: true
            })
        );
    }
}
