use egui;

use crate::api::types::NewSnippet;
use crate::library::LibrarySnapshot;

#[derive(Debug, Clone, PartialEq)]
pub enum CreateAction {
    Submit(NewSnippet),
    Dismiss,
}

pub struct CreateWindowState {
    title: String,
    description: String,
    filename: String,
    filetype: String,
    content: String,
    is_private: bool,
    library_index: usize,
}

impl Default for CreateWindowState {
    fn default() -> Self {
        Self::new()
    }
}

impl CreateWindowState {
    pub fn new() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            filename: String::new(),
            filetype: String::new(),
            content: String::new(),
            is_private: true,
            library_index: 0,
        }
    }

    pub fn show(&mut self, ctx: &egui::Context, snapshot: &LibrarySnapshot) -> Option<CreateAction> {
        let mut save_triggered = false;
        let mut close_triggered = false;

        if self.library_index >= snapshot.editable_libraries.len() {
            self.library_index = 0;
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("New Snippet");
            ui.add_space(10.0);

            egui::Grid::new("create_snippet_fields")
                .num_columns(2)
                .spacing([8.0, 6.0])
                .show(ui, |ui| {
                    ui.label("Title:");
                    ui.text_edit_singleline(&mut self.title);
                    ui.end_row();

                    ui.label("Description:");
                    ui.text_edit_singleline(&mut self.description);
                    ui.end_row();

                    ui.label("Filename:");
                    ui.text_edit_singleline(&mut self.filename);
                    ui.end_row();

                    ui.label("Filetype:");
                    ui.text_edit_singleline(&mut self.filetype);
                    ui.end_row();

                    ui.label("Library:");
                    let selected_name = snapshot
                        .editable_libraries
                        .get(self.library_index)
                        .map(|target| target.name.as_str())
                        .unwrap_or("Personal");
                    egui::ComboBox::from_id_salt("create_snippet_library")
                        .selected_text(selected_name)
                        .show_ui(ui, |ui| {
                            for (index, target) in snapshot.editable_libraries.iter().enumerate() {
                                ui.selectable_value(&mut self.library_index, index, &target.name);
                            }
                        });
                    ui.end_row();

                    ui.label("Private:");
                    ui.checkbox(&mut self.is_private, "");
                    ui.end_row();
                });

            ui.add_space(10.0);

            egui::ScrollArea::vertical()
                .max_height(260.0)
                .show(ui, |ui| {
                    ui.text_edit_multiline(&mut self.content);
                });

            ui.add_space(10.0);
            ui.separator();
            ui.add_space(10.0);

            ui.horizontal(|ui| {
                if ui
                    .add_enabled(
                        self.can_submit(),
                        egui::Button::new("Save and Close (Ctrl+Enter)"),
                    )
                    .clicked()
                {
                    save_triggered = true;
                }
                if ui.button("Cancel (Esc)").clicked() {
                    close_triggered = true;
                }
            });
        });

        ctx.input_mut(|i| {
            if i.consume_key(egui::Modifiers::CTRL, egui::Key::Enter) {
                save_triggered = true;
            }
            if i.consume_key(egui::Modifiers::NONE, egui::Key::Escape) {
                close_triggered = true;
            }
        });

        if save_triggered && self.can_submit() {
            let attrs = self.build_attrs(snapshot);
            self.reset();
            Some(CreateAction::Submit(attrs))
        } else if close_triggered {
            self.reset();
            Some(CreateAction::Dismiss)
        } else {
            None
        }
    }

    fn can_submit(&self) -> bool {
        !self.title.is_empty() && !self.filename.is_empty() && !self.content.is_empty()
    }

    fn build_attrs(&self, snapshot: &LibrarySnapshot) -> NewSnippet {
        let library_guid = snapshot
            .editable_libraries
            .get(self.library_index)
            .map(|target| target.library_guid.clone())
            .unwrap_or_else(|| snapshot.personal_library_guid.clone());

        NewSnippet {
            title: self.title.clone(),
            description: self.description.clone(),
            is_private: self.is_private,
            filename: self.filename.clone(),
            content: self.content.clone(),
            filetype: self.filetype.clone(),
            library_guid,
            label_guids: Vec::new(),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{Library, LibraryResponse, Team, TeamRole};
    use crate::library::LibrarySnapshot;

    fn snapshot() -> LibrarySnapshot {
        LibrarySnapshot::from_response(LibraryResponse {
            personal_library: Library {
                guid: "lib-personal".to_string(),
                snippets: vec![],
                labels: vec![],
            },
            teams: vec![Team {
                guid: "t-1".to_string(),
                name: "Backend".to_string(),
                user_role: TeamRole::Owner,
                library: Library {
                    guid: "lib-backend".to_string(),
                    snippets: vec![],
                    labels: vec![],
                },
            }],
        })
    }

    fn filled() -> CreateWindowState {
        let mut state = CreateWindowState::new();
        state.title = "Healthcheck".to_string();
        state.filename = "health.rs".to_string();
        state.filetype = "rust".to_string();
        state.content = "fn main() {}".to_string();
        state
    }

    #[test]
    fn submit_requires_title_filename_and_content() {
        let mut state = CreateWindowState::new();
        assert!(!state.can_submit());

        state.title = "t".to_string();
        state.filename = "f".to_string();
        assert!(!state.can_submit());

        state.content = "c".to_string();
        assert!(state.can_submit());
    }

    #[test]
    fn attrs_target_selected_library() {
        let snapshot = snapshot();
        let mut state = filled();

        let attrs = state.build_attrs(&snapshot);
        assert_eq!(attrs.library_guid, "lib-personal");
        assert!(attrs.is_private);

        state.library_index = 1;
        let attrs = state.build_attrs(&snapshot);
        assert_eq!(attrs.library_guid, "lib-backend");
    }

    #[test]
    fn out_of_range_library_falls_back_to_personal() {
        let snapshot = snapshot();
        let mut state = filled();
        state.library_index = 99;

        let attrs = state.build_attrs(&snapshot);
        assert_eq!(attrs.library_guid, "lib-personal");
    }

    #[test]
    fn reset_clears_the_form() {
        let mut state = filled();
        state.is_private = false;
        state.reset();
        state.reset();

        assert!(!state.can_submit());
        assert!(state.title.is_empty());
        assert!(state.content.is_empty());
        assert!(state.is_private);
        assert_eq!(state.library_index, 0);
    }
}
