use std::sync::Arc;

mod app;
mod commands;
mod config;
mod error;
mod ipc;
mod store;
mod window;

#[cfg(test)]
mod testing;

use config::HockeyConfig;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let config = Arc::new(HockeyConfig::from_env());
    commands::logging::init_logging(&config);

    let mut builder = tauri::Builder::default();

    // Single instance must be registered first so a second launch exits
    // before any other plugin initializes.
    #[cfg(desktop)]
    {
        builder = builder.plugin(tauri_plugin_single_instance::init(
            app::on_second_instance,
        ));
    }

    builder = builder
        .plugin(tauri_plugin_store::Builder::default().build())
        .plugin(tauri_plugin_opener::init());

    #[cfg(desktop)]
    {
        builder = builder.plugin(app::shortcut::plugin());
    }

    let app = builder
        .on_window_event(app::events::handle_window_event)
        .invoke_handler(tauri::generate_handler![
            // IPC bridge
            commands::ipc::ipc_invoke,
            commands::ipc::list_ipc_channels,
            // Logging commands
            commands::logging::write_log,
            commands::logging::write_logs,
            // Config commands
            config::app::get_app_config,
        ])
        .setup(move |app| app::init(app, config))
        .build(tauri::generate_context!())
        .expect("error while building tauri application");

    app.run(app::events::handle_run_event);
}
