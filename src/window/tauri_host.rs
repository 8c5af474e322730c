//! Tauri implementation of the window toolkit traits.

use std::path::PathBuf;

use tauri::{
    AppHandle, LogicalPosition, LogicalSize, Manager, Runtime, WebviewUrl, WebviewWindow,
    WebviewWindowBuilder, Wry,
};

use super::document::{self, DocumentCandidate, DocumentSource};
use super::{Bounds, FloatingWindow, WindowHost, WindowSpec, WorkArea};
use crate::error::{window_err, HockeyError, HockeyResult};

pub struct TauriWindow<R: Runtime = Wry> {
    inner: WebviewWindow<R>,
}

impl<R: Runtime> Clone for TauriWindow<R> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<R: Runtime> TauriWindow<R> {
    pub fn new(inner: WebviewWindow<R>) -> Self {
        Self { inner }
    }
}

impl<R: Runtime> FloatingWindow for TauriWindow<R> {
    fn label(&self) -> String {
        self.inner.label().to_string()
    }

    fn is_alive(&self) -> bool {
        self.inner
            .app_handle()
            .get_webview_window(self.inner.label())
            .is_some()
    }

    fn is_visible(&self) -> HockeyResult<bool> {
        self.inner.is_visible().map_err(window_err("query visibility"))
    }

    fn is_minimized(&self) -> HockeyResult<bool> {
        self.inner
            .is_minimized()
            .map_err(window_err("query minimized state"))
    }

    fn is_maximized(&self) -> HockeyResult<bool> {
        self.inner
            .is_maximized()
            .map_err(window_err("query maximized state"))
    }

    fn show(&self) -> HockeyResult<()> {
        self.inner.show().map_err(window_err("show window"))
    }

    fn hide(&self) -> HockeyResult<()> {
        self.inner.hide().map_err(window_err("hide window"))
    }

    fn focus(&self) -> HockeyResult<()> {
        self.inner.set_focus().map_err(window_err("focus window"))
    }

    fn minimize(&self) -> HockeyResult<()> {
        self.inner.minimize().map_err(window_err("minimize window"))
    }

    fn unminimize(&self) -> HockeyResult<()> {
        self.inner.unminimize().map_err(window_err("unminimize window"))
    }

    fn maximize(&self) -> HockeyResult<()> {
        self.inner.maximize().map_err(window_err("maximize window"))
    }

    fn unmaximize(&self) -> HockeyResult<()> {
        self.inner.unmaximize().map_err(window_err("unmaximize window"))
    }

    fn destroy(&self) -> HockeyResult<()> {
        self.inner.destroy().map_err(window_err("destroy window"))
    }

    fn bounds(&self) -> HockeyResult<Bounds> {
        if !self.is_alive() {
            return Err(HockeyError::WindowGone);
        }
        let scale = self
            .inner
            .scale_factor()
            .map_err(window_err("read scale factor"))?;
        let position = self
            .inner
            .outer_position()
            .map_err(window_err("read position"))?
            .to_logical::<i32>(scale);
        let size = self
            .inner
            .inner_size()
            .map_err(window_err("read size"))?
            .to_logical::<u32>(scale);

        Ok(Bounds {
            x: position.x,
            y: position.y,
            width: size.width,
            height: size.height,
        })
    }

    fn set_bounds(&self, bounds: Bounds) -> HockeyResult<()> {
        self.inner
            .set_position(LogicalPosition::new(bounds.x as f64, bounds.y as f64))
            .map_err(window_err("set position"))?;
        self.set_size(bounds.width, bounds.height)
    }

    fn set_size(&self, width: u32, height: u32) -> HockeyResult<()> {
        self.inner
            .set_size(LogicalSize::new(width as f64, height as f64))
            .map_err(window_err("set size"))
    }

    fn reload(&self) -> HockeyResult<()> {
        self.inner
            .eval("window.location.reload()")
            .map_err(window_err("reload document"))
    }

    fn open_devtools(&self) {
        self.inner.open_devtools();
    }
}

pub struct TauriHost<R: Runtime = Wry> {
    app: AppHandle<R>,
}

impl<R: Runtime> TauriHost<R> {
    pub fn new(app: AppHandle<R>) -> Self {
        Self { app }
    }
}

impl WindowHost for TauriHost<Wry> {
    type Window = TauriWindow<Wry>;

    fn work_area(&self) -> Option<WorkArea> {
        let monitor = match self.app.primary_monitor() {
            Ok(Some(monitor)) => monitor,
            Ok(None) => return None,
            Err(e) => {
                log::warn!("[WINDOW] Failed to query primary monitor: {}", e);
                return None;
            },
        };
        let size = monitor.size().to_logical::<u32>(monitor.scale_factor());
        Some(WorkArea {
            width: size.width,
            height: size.height,
        })
    }

    fn build(&self, spec: &WindowSpec) -> HockeyResult<Self::Window> {
        let url = webview_url(&spec.document)?;

        let window = WebviewWindowBuilder::new(&self.app, spec.label.as_str(), url)
            .title(spec.title.as_str())
            .inner_size(spec.bounds.width as f64, spec.bounds.height as f64)
            .position(spec.bounds.x as f64, spec.bounds.y as f64)
            .transparent(spec.transparent)
            .decorations(spec.decorations)
            .always_on_top(spec.always_on_top)
            .visible_on_all_workspaces(spec.visible_on_all_workspaces)
            .devtools(spec.devtools)
            .resizable(false)
            .shadow(true)
            .visible(true)
            .focused(true)
            .on_page_load(|window, payload| {
                crate::app::events::handle_page_load(&window, &payload);
            })
            .build()
            .map_err(|e| HockeyError::WindowError(format!("Failed to create window: {}", e)))?;

        Ok(TauriWindow::new(window))
    }

    fn windows(&self) -> Vec<Self::Window> {
        self.app
            .webview_windows()
            .into_values()
            .map(TauriWindow::new)
            .collect()
    }

    fn document_exists(&self, candidate: &DocumentCandidate) -> bool {
        match candidate {
            DocumentCandidate::Bundled(asset) => self.app.asset_resolver().get(asset.clone()).is_some(),
            DocumentCandidate::File(path) => path.is_file(),
        }
    }
}

fn webview_url(source: &DocumentSource) -> HockeyResult<WebviewUrl> {
    match source {
        DocumentSource::Bundled(asset) => Ok(WebviewUrl::App(PathBuf::from(asset))),
        DocumentSource::File(path) => tauri::Url::from_file_path(path)
            .map(WebviewUrl::External)
            .map_err(|_| {
                HockeyError::InvalidArgument(format!("Not an absolute path: {}", path.display()))
            }),
        DocumentSource::Inline(html) => document::data_url(html)
            .parse()
            .map(WebviewUrl::External)
            .map_err(|e| HockeyError::Other(format!("Invalid inline document URL: {}", e))),
    }
}
