//! Application lifecycle and platform integration.
//!
//! - `events`: window, page-load and run-loop event handlers
//! - `shortcut`: global toggle shortcut

use std::sync::Arc;

use tauri::{App, AppHandle, Manager, Runtime, State};

use crate::config::HockeyConfig;
use crate::error::{HockeyResult, OptionExt};
use crate::ipc::{register_ipc_handlers, Bridge, IpcRouter, TauriOpener};
use crate::store::{KeyValueStore, TauriStore};
use crate::window::{document, hot_reload, TauriHost, WindowManager};

pub mod events;

#[cfg(desktop)]
pub mod shortcut;

/// Shared state managed by Tauri.
pub struct AppState {
    pub config: Arc<HockeyConfig>,
    pub windows: Arc<WindowManager<TauriHost>>,
    pub router: Arc<IpcRouter>,
    pub hot_reload: hot_reload::ReloadTask,
}

/// Managed `AppState`, or an error before setup has run.
pub(crate) fn app_state<R, M>(manager: &M) -> HockeyResult<State<'_, AppState>>
where
    R: Runtime,
    M: Manager<R>,
{
    manager
        .try_state::<AppState>()
        .context("application state not initialized")
}

/// Setup hook: IPC handlers, then the window, then the shortcut, then hot
/// reload in development.
pub fn init(app: &App, config: Arc<HockeyConfig>) -> Result<(), Box<dyn std::error::Error>> {
    let handle = app.handle().clone();
    let root = std::env::current_dir()?;

    let store: Arc<dyn KeyValueStore> = Arc::new(TauriStore::open(&handle, &config.store_file)?);
    let windows = Arc::new(WindowManager::new(
        TauriHost::new(handle.clone()),
        Arc::clone(&store),
        Arc::clone(&config),
        document::default_candidates(&root),
    ));

    let router = Arc::new(IpcRouter::new());
    let bridge = Arc::new(Bridge::new(
        Arc::clone(&windows),
        store,
        Arc::new(TauriOpener::new(handle.clone())),
    ));
    register_ipc_handlers(&router, &bridge);

    app.manage(AppState {
        config: Arc::clone(&config),
        windows: Arc::clone(&windows),
        router,
        hot_reload: hot_reload::ReloadTask::new(),
    });

    if let Err(e) = windows.create_window() {
        log::error!("[APP] Failed to create window: {}", e);
    }

    #[cfg(desktop)]
    if let Err(e) = shortcut::register(&handle, &config.shortcut) {
        log::error!("[APP] {}", e);
    }

    if config.is_development() {
        let task = hot_reload::spawn(windows, hot_reload::default_artifact(&root));
        app_state(app)?.hot_reload.set(task);
    }

    log::info!("[APP] Started in {:?} mode", config.mode);
    Ok(())
}

/// A second launch exits right away; the running instance surfaces its window.
pub fn on_second_instance(app: &AppHandle, args: Vec<String>, _cwd: String) {
    log::info!(
        "[APP] Second instance launched with {} argument(s), focusing existing window",
        args.len()
    );
    let result = app_state(app).and_then(|state| state.windows.focus_existing());
    if let Err(e) = result {
        log::error!("[APP] Failed to focus existing window: {}", e);
    }
}
