use tidewater_common::Color;
use tidewater_waves::{ColorSlot, Folder, Param, WaveSettings};

/// What happened in the panel this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PanelResponse {
    /// Any setting was edited.
    pub changed: bool,
    /// Settings were reset to their defaults.
    pub reset: bool,
}

/// egui window with one folder per parameter group.
///
/// Sliders take their bounds and step from `Param::range`; colours can be
/// picked or typed as hex.
#[derive(Debug, Clone)]
pub struct DebugPanel {
    pub visible: bool,
    pub width: f32,
    hex_buffers: [String; 2],
}

impl Default for DebugPanel {
    fn default() -> Self {
        Self {
            visible: true,
            width: 340.0,
            hex_buffers: [String::new(), String::new()],
        }
    }
}

impl DebugPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    /// Text currently shown in a colour's hex field.
    pub fn hex_buffer(&self, slot: ColorSlot) -> &str {
        &self.hex_buffers[slot_index(slot)]
    }

    pub fn show(&mut self, ctx: &egui::Context, settings: &mut WaveSettings) -> PanelResponse {
        let mut response = PanelResponse::default();
        if !self.visible {
            return response;
        }

        let hex_buffers = &mut self.hex_buffers;
        egui::Window::new("Debug")
            .default_width(self.width)
            .resizable(false)
            .show(ctx, |ui| {
                for folder in Folder::ALL {
                    egui::CollapsingHeader::new(folder.title())
                        .default_open(true)
                        .show(ui, |ui| {
                            if folder == Folder::Colors {
                                for slot in ColorSlot::ALL {
                                    let buf = &mut hex_buffers[slot_index(slot)];
                                    response.changed |= color_row(ui, buf, settings, slot);
                                }
                            }
                            for param in Param::ALL.into_iter().filter(|p| p.folder() == folder) {
                                response.changed |= slider(ui, settings, param);
                            }
                        });
                }

                ui.separator();
                if ui.button("Reset").clicked() {
                    *settings = WaveSettings::default();
                    response.changed = true;
                    response.reset = true;
                    tracing::info!("wave settings reset to defaults");
                }
                ui.small("F1: toggle panel | LMB: orbit | RMB: pan | wheel: zoom");
            });

        // Keep idle hex fields showing the live colour.
        if response.reset {
            for slot in ColorSlot::ALL {
                self.hex_buffers[slot_index(slot)] = settings.color_hex(slot);
            }
        }
        response
    }
}

fn slot_index(slot: ColorSlot) -> usize {
    match slot {
        ColorSlot::Depth => 0,
        ColorSlot::Surface => 1,
    }
}

/// Widget id of a colour's hex field.
pub fn hex_field_id(slot: ColorSlot) -> egui::Id {
    egui::Id::new(("hex_field", slot_index(slot)))
}

fn slider(ui: &mut egui::Ui, settings: &mut WaveSettings, param: Param) -> bool {
    let range = param.range();
    let mut value = param.get(settings);
    let slider = egui::Slider::new(&mut value, range.min..=range.max)
        .step_by(range.step as f64)
        .text(param.label());
    let slider = if param.is_integer() {
        slider.integer()
    } else {
        slider.max_decimals(3)
    };

    let changed = ui.add(slider).changed();
    if changed {
        param.set(settings, value);
        tracing::debug!("{} = {}", param.label(), param.get(settings));
    }
    changed
}

fn color_row(ui: &mut egui::Ui, buf: &mut String, settings: &mut WaveSettings, slot: ColorSlot) -> bool {
    let before = settings.color(slot);
    let mut rgb = before.to_srgb_u8();

    ui.horizontal(|ui| {
        if ui.color_edit_button_srgb(&mut rgb).changed() {
            settings.set_color(slot, Color::from_srgb_u8(rgb));
        }

        let edit = ui.add(
            egui::TextEdit::singleline(buf)
                .id(hex_field_id(slot))
                .desired_width(72.0),
        );
        if edit.lost_focus() {
            if let Err(e) = settings.set_color_hex(slot, buf) {
                tracing::warn!("{}: {e}", slot.label());
            }
            *buf = settings.color_hex(slot);
        } else if !edit.has_focus() {
            *buf = settings.color_hex(slot);
        }

        ui.label(slot.label());
    });

    settings.color(slot) != before
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(panel: &mut DebugPanel, settings: &mut WaveSettings) -> PanelResponse {
        frame_with(&egui::Context::default(), Vec::new(), panel, settings)
    }

    fn frame_with(
        ctx: &egui::Context,
        events: Vec<egui::Event>,
        panel: &mut DebugPanel,
        settings: &mut WaveSettings,
    ) -> PanelResponse {
        let input = egui::RawInput {
            events,
            ..Default::default()
        };
        let mut out = PanelResponse::default();
        let _ = ctx.run(input, |ctx| {
            out = panel.show(ctx, settings);
        });
        out
    }

    fn key(key: egui::Key) -> egui::Event {
        egui::Event::Key {
            key,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers: egui::Modifiers::NONE,
        }
    }

    #[test]
    fn idle_frame_changes_nothing() {
        let mut panel = DebugPanel::new();
        let mut settings = WaveSettings::default();
        let resp = frame(&mut panel, &mut settings);
        assert_eq!(resp, PanelResponse::default());
        assert_eq!(settings, WaveSettings::default());
    }

    #[test]
    fn hidden_panel_draws_nothing() {
        let mut panel = DebugPanel::new();
        panel.toggle();
        let mut settings = WaveSettings::default();
        assert!(!frame(&mut panel, &mut settings).changed);
        assert_eq!(panel.hex_buffer(ColorSlot::Depth), "");
    }

    #[test]
    fn hex_fields_follow_settings() {
        let mut panel = DebugPanel::new();
        let mut settings = WaveSettings::default();
        frame(&mut panel, &mut settings);
        assert_eq!(panel.hex_buffer(ColorSlot::Depth), "#2badf3");
        assert_eq!(panel.hex_buffer(ColorSlot::Surface), "#ffffff");

        settings.set_surface_color("#336699").unwrap();
        frame(&mut panel, &mut settings);
        assert_eq!(panel.hex_buffer(ColorSlot::Surface), "#336699");
    }

    #[test]
    fn typed_hex_is_committed_on_enter() {
        let ctx = egui::Context::default();
        let mut panel = DebugPanel::new();
        let mut settings = WaveSettings::default();
        let field = hex_field_id(ColorSlot::Surface);

        frame_with(&ctx, Vec::new(), &mut panel, &mut settings);
        ctx.memory_mut(|m| m.request_focus(field));
        frame_with(&ctx, Vec::new(), &mut panel, &mut settings);

        let mut typing: Vec<egui::Event> = (0..8).map(|_| key(egui::Key::Backspace)).collect();
        typing.push(egui::Event::Text("#336699".into()));
        let resp = frame_with(&ctx, typing, &mut panel, &mut settings);
        assert!(!resp.changed);
        assert_eq!(panel.hex_buffer(ColorSlot::Surface), "#336699");
        assert_eq!(settings.surface_color(), Color::WHITE);

        let resp = frame_with(&ctx, vec![key(egui::Key::Enter)], &mut panel, &mut settings);
        assert!(resp.changed);
        assert_eq!(settings.color_hex(ColorSlot::Surface), "#336699");
        assert_eq!(settings.depth_color(), WaveSettings::default().depth_color());
    }

    #[test]
    fn invalid_hex_is_reverted() {
        let ctx = egui::Context::default();
        let mut panel = DebugPanel::new();
        let mut settings = WaveSettings::default();

        frame_with(&ctx, Vec::new(), &mut panel, &mut settings);
        ctx.memory_mut(|m| m.request_focus(hex_field_id(ColorSlot::Depth)));
        frame_with(&ctx, Vec::new(), &mut panel, &mut settings);
        frame_with(
            &ctx,
            vec![egui::Event::Text("zz".into()), key(egui::Key::Enter)],
            &mut panel,
            &mut settings,
        );

        assert_eq!(settings, WaveSettings::default());
        assert_eq!(panel.hex_buffer(ColorSlot::Depth), "#2badf3");
    }

    #[test]
    fn default_width_matches_demo() {
        assert_eq!(DebugPanel::default().width, 340.0);
    }
}
