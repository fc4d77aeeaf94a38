use eframe::egui;
use global_hotkey::{GlobalHotKeyManager, hotkey::{HotKey, Modifiers, Code}};
use std::sync::mpsc;
use std::time::Duration;
use tray_icon::TrayIconBuilder;

mod api;
mod app;
mod auth;
mod cache;
mod clipboard;
mod config;
mod error;
mod hotkeys;
mod library;
mod service;
mod ui;

use api::ApiClient;
use app::TroveApp;
use auth::Credentials;
use config::Config;
use hotkeys::HotkeyEvent;
use service::SnippetsService;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = Config::load()?;

    let client = match Credentials::load()? {
        Some(credentials) => Some(ApiClient::new(config.api_host.clone(), credentials)?),
        None => None,
    };

    let (service_tx, service_rx) = mpsc::channel();
    let service = SnippetsService::new(
        client,
        service_tx,
        Duration::from_secs(config.refresh_interval_secs),
    );

    let (hotkey_tx, hotkey_rx) = mpsc::channel();

    let manager = GlobalHotKeyManager::new()?;
    let find_hotkey = HotKey::new(Some(Modifiers::SUPER | Modifiers::CONTROL), Code::KeyF);
    let create_hotkey = HotKey::new(Some(Modifiers::SUPER | Modifiers::CONTROL), Code::KeyN);

    manager.register(find_hotkey)?;
    manager.register(create_hotkey)?;

    let _hotkey_handler = std::thread::spawn(move || {
        loop {
            if let Ok(event) = global_hotkey::GlobalHotKeyEvent::receiver().try_recv() {
                if event.id == find_hotkey.id() {
                    let _ = hotkey_tx.send(HotkeyEvent::Find);
                } else if event.id == create_hotkey.id() {
                    let _ = hotkey_tx.send(HotkeyEvent::Create);
                }
            }
            std::thread::sleep(std::time::Duration::from_millis(10));
        }
    });

    let icon = tray_icon::Icon::from_rgba(vec![0; 32*32*4], 32, 32)?;

    let _tray_icon = TrayIconBuilder::new()
        .with_tooltip("Trove - Snippet Finder")
        .with_icon(icon)
        .build()?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_decorations(false)
            .with_transparent(true)
            .with_always_on_top()
            .with_visible(false)
            .with_resizable(true)
            .with_inner_size([720.0, 440.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Trove",
        options,
        Box::new(|cc| {
            Ok(Box::new(TroveApp::new(
                cc,
                config,
                service,
                service_rx,
                hotkey_rx,
            )))
        }),
    )?;

    Ok(())
}
