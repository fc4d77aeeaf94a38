use eframe::egui;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crate::cache::SnapshotCache;
use crate::clipboard::copy_to_clipboard;
use crate::config::{self, Config};
use crate::hotkeys::HotkeyEvent;
use crate::library::LibrarySnapshot;
use crate::service::{ServiceEvent, SnippetsService};
use crate::ui::{CreateAction, CreateWindowState, FinderAction, FinderWindowState};

const TOAST_DURATION: Duration = Duration::from_secs(4);

#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppMode {
    #[default]
    Hidden,
    Finder,
    Create,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ToastLevel {
    Success,
    Error,
}

struct Toast {
    text: String,
    level: ToastLevel,
    raised_at: Instant,
}

/// Panel lifecycle and notification state. Teardown is idempotent so
/// repeated open/close cycles never leave a stale toast or mode behind.
/// Opening keeps a pending toast; a create result raised between panels
/// would otherwise never be seen.
#[derive(Default)]
struct PanelShell {
    mode: AppMode,
    toast: Option<Toast>,
}

impl PanelShell {
    fn open(&mut self, mode: AppMode) {
        self.mode = mode;
    }

    fn dismiss(&mut self) {
        self.mode = AppMode::Hidden;
        self.toast = None;
    }

    /// A toast with no panel to live in needs the viewport shown as a
    /// transient banner.
    fn needs_banner(&self) -> bool {
        self.mode == AppMode::Hidden && self.toast.is_some()
    }

    fn notify_success(&mut self, text: String) {
        self.notify(text, ToastLevel::Success);
    }

    fn notify_error(&mut self, text: String) {
        self.notify(text, ToastLevel::Error);
    }

    fn notify(&mut self, text: String, level: ToastLevel) {
        self.toast = Some(Toast {
            text,
            level,
            raised_at: Instant::now(),
        });
    }
}

pub struct TroveApp {
    shell: PanelShell,
    finder_window: FinderWindowState,
    create_window: CreateWindowState,

    library: Option<LibrarySnapshot>,
    config: Config,
    cache: Option<SnapshotCache>,
    banner_visible: bool,

    service: SnippetsService,
    service_events: mpsc::Receiver<ServiceEvent>,
    hotkey_receiver: mpsc::Receiver<HotkeyEvent>,
}

impl TroveApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config: Config,
        service: SnippetsService,
        service_events: mpsc::Receiver<ServiceEvent>,
        hotkey_rx: mpsc::Receiver<HotkeyEvent>,
    ) -> Self {
        let cache = match SnapshotCache::new(config::data_dir()) {
            Ok(cache) => Some(cache),
            Err(e) => {
                log::error!("failed to open library cache: {e}");
                None
            }
        };

        // A cached snapshot makes the finder usable before the first fetch
        // completes.
        let library = cache.as_ref().and_then(|cache| match cache.load() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                log::warn!("failed to load cached library: {e}");
                None
            }
        });

        service.initialize();

        Self {
            shell: PanelShell::default(),
            finder_window: FinderWindowState::new(),
            create_window: CreateWindowState::new(),
            library,
            config,
            cache,
            banner_visible: false,
            service,
            service_events,
            hotkey_receiver: hotkey_rx,
        }
    }

    fn open_panel(&mut self, ctx: &egui::Context, mode: AppMode) {
        self.finder_window.reset();
        self.create_window.reset();
        self.shell.open(mode);
        self.banner_visible = false;
        ctx.send_viewport_cmd(egui::ViewportCommand::Visible(true));
        ctx.send_viewport_cmd(egui::ViewportCommand::Focus);
    }

    fn dismiss_panel(&mut self, ctx: &egui::Context) {
        self.teardown();
        self.banner_visible = false;
        ctx.send_viewport_cmd(egui::ViewportCommand::Visible(false));
    }

    fn teardown(&mut self) {
        self.shell.dismiss();
        self.finder_window.reset();
        self.create_window.reset();
    }

    fn handle_service_event(&mut self, event: ServiceEvent) {
        match event {
            ServiceEvent::LibraryLoaded { snapshot, announce } => {
                if let Some(cache) = &self.cache {
                    if let Err(e) = cache.store(&snapshot) {
                        log::warn!("failed to persist library cache: {e}");
                    }
                }
                self.library = Some(snapshot);
                if announce {
                    self.shell.notify_success("Snippets loaded.".to_string());
                }
            }
            ServiceEvent::SnippetCreated(Ok(snippet)) => {
                log::info!("snippet \"{}\" created", snippet.title);
                self.shell
                    .notify_success(format!("Snippet \"{}\" created.", snippet.title));
            }
            ServiceEvent::SnippetCreated(Err(err)) => {
                self.shell
                    .notify_error(format!("Could not create snippet: {err}"));
            }
        }
    }

    fn handle_finder_action(&mut self, ctx: &egui::Context, action: FinderAction) {
        match action {
            FinderAction::Insert { content } => {
                // Hand the content over and get out of the way so focus
                // returns to the editor.
                if let Err(e) = copy_to_clipboard(&content) {
                    log::error!("failed to copy to clipboard: {e}");
                    self.shell
                        .notify_error("Could not access the clipboard.".to_string());
                } else {
                    self.dismiss_panel(ctx);
                }
            }
            FinderAction::Copy { filename, content } => {
                if let Err(e) = copy_to_clipboard(&content) {
                    log::error!("failed to copy to clipboard: {e}");
                    self.shell
                        .notify_error("Could not access the clipboard.".to_string());
                } else {
                    self.shell.notify_success(format!(
                        "Contents of \"{filename}\" copied to clipboard."
                    ));
                }
            }
            FinderAction::OpenInApp {
                snippet_guid,
                team_guid,
            } => {
                self.open_url(self.config.app_url(&snippet_guid, team_guid.as_deref()));
            }
            FinderAction::OpenPage { snippet_guid } => {
                self.open_url(self.config.page_url(&snippet_guid));
            }
            FinderAction::Dismiss => {
                self.dismiss_panel(ctx);
            }
        }
    }

    fn open_url(&mut self, url: String) {
        if let Err(e) = open::that(&url) {
            log::error!("failed to open {url}: {e}");
            self.shell
                .notify_error("Could not open the browser.".to_string());
        }
    }

    /// Shown in place of the finder or create panel until a snapshot exists.
    fn show_unavailable(&mut self, ctx: &egui::Context) {
        let mut close_triggered = false;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(20.0);
            if self.service.has_credentials() {
                ui.heading("Loading snippets...");
                ui.label("Your library is being fetched. Try again in a moment.");
            } else {
                ui.heading("Not connected");
                ui.label(
                    "Add your API key and token to credentials.toml in the \
                     trove config directory, then restart.",
                );
            }
            ui.add_space(10.0);
            if ui.button("Close (Esc)").clicked() {
                close_triggered = true;
            }
        });

        ctx.input_mut(|i| {
            if i.consume_key(egui::Modifiers::NONE, egui::Key::Escape) {
                close_triggered = true;
            }
        });

        if close_triggered {
            self.dismiss_panel(ctx);
        }
    }

    fn show_toast(&mut self, ctx: &egui::Context) {
        let expired = self
            .shell
            .toast
            .as_ref()
            .is_some_and(|toast| toast.raised_at.elapsed() > TOAST_DURATION);
        if expired {
            self.shell.toast = None;
            if self.banner_visible {
                ctx.send_viewport_cmd(egui::ViewportCommand::Visible(false));
                self.banner_visible = false;
            }
        }

        if let Some(toast) = &self.shell.toast {
            let color = match toast.level {
                ToastLevel::Success => egui::Color32::from_rgb(0x4c, 0xaf, 0x50),
                ToastLevel::Error => egui::Color32::from_rgb(0xef, 0x53, 0x50),
            };
            egui::Area::new(egui::Id::new("toast"))
                .anchor(egui::Align2::CENTER_BOTTOM, [0.0, -12.0])
                .show(ctx, |ui| {
                    egui::Frame::popup(&ctx.style()).show(ui, |ui| {
                        ui.colored_label(color, &toast.text);
                    });
                });
        }
    }
}

impl eframe::App for TroveApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        while let Ok(event) = self.service_events.try_recv() {
            self.handle_service_event(event);
        }

        if let Ok(event) = self.hotkey_receiver.try_recv() {
            match event {
                HotkeyEvent::Find => self.open_panel(ctx, AppMode::Finder),
                HotkeyEvent::Create => self.open_panel(ctx, AppMode::Create),
            }
        }

        match self.shell.mode {
            AppMode::Hidden => {
                // Window is controlled by hotkey events
            }
            AppMode::Finder => match self.library.take() {
                Some(snapshot) => {
                    let action = self.finder_window.show(ctx, &snapshot);
                    self.library = Some(snapshot);
                    if let Some(action) = action {
                        self.handle_finder_action(ctx, action);
                    }
                }
                None => self.show_unavailable(ctx),
            },
            AppMode::Create => match self.library.take() {
                Some(snapshot) => {
                    let action = self.create_window.show(ctx, &snapshot);
                    self.library = Some(snapshot);
                    match action {
                        Some(CreateAction::Submit(attrs)) => {
                            self.service.create_snippet(attrs);
                            self.dismiss_panel(ctx);
                        }
                        Some(CreateAction::Dismiss) => {
                            self.dismiss_panel(ctx);
                        }
                        None => {}
                    }
                }
                None => self.show_unavailable(ctx),
            },
        }

        // Service results can land after the panel is gone (create runs on
        // a worker thread, the first load while still hidden); surface them
        // by showing the viewport until the toast expires.
        if self.shell.needs_banner() && !self.banner_visible {
            ctx.send_viewport_cmd(egui::ViewportCommand::Visible(true));
            self.banner_visible = true;
        }

        self.show_toast(ctx);

        ctx.request_repaint();
    }
}
