//! IPC channel names shared with the webview. These strings are the contract.

pub const WINDOW_CLOSE: &str = "window:close";
pub const WINDOW_MINIMIZE: &str = "window:minimize";
pub const WINDOW_MAXIMIZE: &str = "window:maximize";
pub const WINDOW_RESTORE: &str = "window:restore";
pub const SYSTEM_OPEN_EXTERNAL: &str = "system:open-external";
pub const STORAGE_GET: &str = "storage:get";
pub const STORAGE_SET: &str = "storage:set";
pub const STORAGE_REMOVE: &str = "storage:remove";
pub const GITHUB_GET_TOKEN: &str = "github:get-token";
pub const GITHUB_SET_TOKEN: &str = "github:set-token";

pub const ALL: [&str; 10] = [
    WINDOW_CLOSE,
    WINDOW_MINIMIZE,
    WINDOW_MAXIMIZE,
    WINDOW_RESTORE,
    SYSTEM_OPEN_EXTERNAL,
    STORAGE_GET,
    STORAGE_SET,
    STORAGE_REMOVE,
    GITHUB_GET_TOKEN,
    GITHUB_SET_TOKEN,
];
