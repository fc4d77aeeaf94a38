use egui;
use egui_extras::{Column, TableBuilder};
use chrono::{DateTime, Local};

use crate::library::{LibraryEntry, LibrarySnapshot};

/// What the user asked the finder to do. The app dispatches these against
/// the clipboard, the browser, or the panel lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum FinderAction {
    Insert {
        content: String,
    },
    Copy {
        filename: String,
        content: String,
    },
    OpenInApp {
        snippet_guid: String,
        team_guid: Option<String>,
    },
    OpenPage {
        snippet_guid: String,
    },
    Dismiss,
}

enum ActionKind {
    Insert,
    Copy,
    OpenInApp,
    OpenPage,
}

/// One table row: a single file of a flattened library entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinderRow {
    pub entry: usize,
    pub file: usize,
}

#[derive(Default)]
pub struct FinderWindowState {
    search_query: String,
    filtered_rows: Vec<FinderRow>,
    selected_index: usize,
    first_frame: bool,
}

impl FinderWindowState {
    pub fn new() -> Self {
        Self {
            search_query: String::new(),
            filtered_rows: Vec::new(),
            selected_index: 0,
            first_frame: true,
        }
    }

    pub fn show(&mut self, ctx: &egui::Context, snapshot: &LibrarySnapshot) -> Option<FinderAction> {
        let mut action = None;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Search:");
                let search_response = ui.text_edit_singleline(&mut self.search_query);

                if self.first_frame {
                    search_response.request_focus();
                    self.first_frame = false;
                }
            });

            ui.separator();

            self.update_filtered_rows(snapshot);

            let table = TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                .column(Column::auto().at_least(90.0))
                .column(Column::auto().at_least(160.0))
                .column(Column::auto().at_least(120.0))
                .column(Column::remainder())
                .min_scrolled_height(260.0);

            table
                .header(20.0, |mut header| {
                    header.col(|ui| { ui.strong("Library"); });
                    header.col(|ui| { ui.strong("Title"); });
                    header.col(|ui| { ui.strong("Filename"); });
                    header.col(|ui| { ui.strong("Labels"); });
                })
                .body(|body| {
                    body.rows(
                        25.0,
                        self.filtered_rows.len(),
                        |mut row| {
                            let list_index = row.index();
                            if let Some(&finder_row) = self.filtered_rows.get(list_index) {
                                let Some(entry) = snapshot.entries.get(finder_row.entry) else {
                                    return;
                                };
                                let Some(file) = entry.snippet.files.get(finder_row.file) else {
                                    return;
                                };
                                let is_selected = list_index == self.selected_index;

                                row.set_selected(is_selected);

                                row.col(|ui| {
                                    ui.label(
                                        entry
                                            .team
                                            .as_ref()
                                            .map(|team| team.name.as_str())
                                            .unwrap_or("Personal"),
                                    );
                                });

                                row.col(|ui| {
                                    ui.label(&entry.snippet.title);
                                });

                                row.col(|ui| {
                                    ui.label(&file.filename);
                                });

                                row.col(|ui| {
                                    ui.label(entry.labels.join(", "));
                                });

                                if row.response().clicked() {
                                    self.selected_index = list_index;
                                }
                            }
                        }
                    );
                });

            ui.separator();

            ui.horizontal(|ui| {
                let has_selection = !self.filtered_rows.is_empty();

                if ui
                    .add_enabled(has_selection, egui::Button::new("Insert (Enter)"))
                    .clicked()
                {
                    action = self.selected_action(snapshot, ActionKind::Insert);
                }
                if ui
                    .add_enabled(has_selection, egui::Button::new("Copy (Ctrl+Enter)"))
                    .clicked()
                {
                    action = self.selected_action(snapshot, ActionKind::Copy);
                }
                if ui
                    .add_enabled(has_selection, egui::Button::new("Open in App (Ctrl+O)"))
                    .clicked()
                {
                    action = self.selected_action(snapshot, ActionKind::OpenInApp);
                }
                if ui
                    .add_enabled(has_selection, egui::Button::new("Snippet Page (Ctrl+P)"))
                    .clicked()
                {
                    action = self.selected_action(snapshot, ActionKind::OpenPage);
                }
                if ui.button("Cancel (Esc)").clicked() {
                    action = Some(FinderAction::Dismiss);
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.weak(format!("Updated {}", format_timestamp(snapshot.fetched_at)));
                });
            });
        });

        ctx.input_mut(|i| {
            if i.key_pressed(egui::Key::ArrowUp) && self.selected_index > 0 {
                self.selected_index -= 1;
            }
            if i.key_pressed(egui::Key::ArrowDown)
                && self.selected_index < self.filtered_rows.len().saturating_sub(1)
            {
                self.selected_index += 1;
            }
            // Ctrl+Enter has to be consumed before the plain Enter check.
            if i.consume_key(egui::Modifiers::CTRL, egui::Key::Enter) {
                action = self.selected_action(snapshot, ActionKind::Copy);
            } else if i.key_pressed(egui::Key::Enter) {
                action = self.selected_action(snapshot, ActionKind::Insert);
            }
            if i.consume_key(egui::Modifiers::CTRL, egui::Key::O) {
                action = self.selected_action(snapshot, ActionKind::OpenInApp);
            }
            if i.consume_key(egui::Modifiers::CTRL, egui::Key::P) {
                action = self.selected_action(snapshot, ActionKind::OpenPage);
            }
            if i.key_pressed(egui::Key::Escape) {
                action = Some(FinderAction::Dismiss);
            }
        });

        action
    }

    fn selected_action(
        &self,
        snapshot: &LibrarySnapshot,
        kind: ActionKind,
    ) -> Option<FinderAction> {
        let row = *self.filtered_rows.get(self.selected_index)?;
        let entry = snapshot.entries.get(row.entry)?;
        let file = entry.snippet.files.get(row.file)?;

        Some(match kind {
            ActionKind::Insert => FinderAction::Insert {
                content: file.content.clone(),
            },
            ActionKind::Copy => FinderAction::Copy {
                filename: file.filename.clone(),
                content: file.content.clone(),
            },
            ActionKind::OpenInApp => FinderAction::OpenInApp {
                snippet_guid: entry.snippet.guid.clone(),
                team_guid: entry.team.as_ref().map(|team| team.guid.clone()),
            },
            ActionKind::OpenPage => FinderAction::OpenPage {
                snippet_guid: entry.snippet.guid.clone(),
            },
        })
    }

    fn update_filtered_rows(&mut self, snapshot: &LibrarySnapshot) {
        self.filtered_rows = filter_rows(&snapshot.entries, &self.search_query);

        if self.selected_index >= self.filtered_rows.len() {
            self.selected_index = self.filtered_rows.len().saturating_sub(1);
        }
    }

    pub fn reset(&mut self) {
        self.first_frame = true;
        self.search_query.clear();
        self.selected_index = 0;
        self.filtered_rows.clear();
    }
}

/// Case-insensitive match over snippet title, label titles, and each file's
/// filename. Every file of a matching snippet becomes a row; a filename
/// match pulls in just that file.
fn filter_rows(entries: &[LibraryEntry], query: &str) -> Vec<FinderRow> {
    let query_lower = query.to_lowercase();
    let mut rows = Vec::new();

    for (entry_index, entry) in entries.iter().enumerate() {
        let entry_matches = query_lower.is_empty()
            || entry.snippet.title.to_lowercase().contains(&query_lower)
            || entry
                .labels
                .iter()
                .any(|label| label.to_lowercase().contains(&query_lower));

        for (file_index, file) in entry.snippet.files.iter().enumerate() {
            if entry_matches || file.filename.to_lowercase().contains(&query_lower) {
                rows.push(FinderRow {
                    entry: entry_index,
                    file: file_index,
                });
            }
        }
    }

    rows
}

fn format_timestamp(time: std::time::SystemTime) -> String {
    let datetime: DateTime<Local> = time.into();
    datetime.format("%m/%d %H:%M").to_string()
}
