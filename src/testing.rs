//! In-memory stand-ins for the GUI toolkit and the OS URL handler.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{HockeyError, HockeyResult};
use crate::ipc::UrlOpener;
use crate::window::{Bounds, DocumentCandidate, FloatingWindow, WindowHost, WindowSpec, WorkArea};

#[derive(Debug, Clone, Default)]
pub struct MockWindowState {
    pub label: String,
    pub alive: bool,
    pub visible: bool,
    pub minimized: bool,
    pub maximized: bool,
    pub focus_count: u32,
    pub reload_count: u32,
    pub devtools_open: bool,
    pub bounds: Option<Bounds>,
    pub fail_destroy: bool,
    pub fail_hide: bool,
}

#[derive(Clone)]
pub struct MockWindow {
    state: Arc<Mutex<MockWindowState>>,
}

impl MockWindow {
    pub fn new(label: &str, bounds: Bounds) -> Self {
        Self {
            state: Arc::new(Mutex::new(MockWindowState {
                label: label.to_string(),
                alive: true,
                visible: true,
                bounds: Some(bounds),
                ..Default::default()
            })),
        }
    }

    pub fn snapshot(&self) -> MockWindowState {
        self.state.lock().clone()
    }

    pub fn update(&self, f: impl FnOnce(&mut MockWindowState)) {
        f(&mut self.state.lock());
    }

    fn alive_or_gone(&self) -> HockeyResult<()> {
        if self.state.lock().alive {
            Ok(())
        } else {
            Err(HockeyError::WindowGone)
        }
    }
}

impl FloatingWindow for MockWindow {
    fn label(&self) -> String {
        self.state.lock().label.clone()
    }

    fn is_alive(&self) -> bool {
        self.state.lock().alive
    }

    fn is_visible(&self) -> HockeyResult<bool> {
        self.alive_or_gone()?;
        Ok(self.state.lock().visible)
    }

    fn is_minimized(&self) -> HockeyResult<bool> {
        self.alive_or_gone()?;
        Ok(self.state.lock().minimized)
    }

    fn is_maximized(&self) -> HockeyResult<bool> {
        self.alive_or_gone()?;
        Ok(self.state.lock().maximized)
    }

    fn show(&self) -> HockeyResult<()> {
        self.alive_or_gone()?;
        self.state.lock().visible = true;
        Ok(())
    }

    fn hide(&self) -> HockeyResult<()> {
        self.alive_or_gone()?;
        let mut state = self.state.lock();
        if state.fail_hide {
            return Err(HockeyError::WindowError("hide refused".to_string()));
        }
        state.visible = false;
        Ok(())
    }

    fn focus(&self) -> HockeyResult<()> {
        self.alive_or_gone()?;
        self.state.lock().focus_count += 1;
        Ok(())
    }

    fn minimize(&self) -> HockeyResult<()> {
        self.alive_or_gone()?;
        self.state.lock().minimized = true;
        Ok(())
    }

    fn unminimize(&self) -> HockeyResult<()> {
        self.alive_or_gone()?;
        self.state.lock().minimized = false;
        Ok(())
    }

    fn maximize(&self) -> HockeyResult<()> {
        self.alive_or_gone()?;
        self.state.lock().maximized = true;
        Ok(())
    }

    fn unmaximize(&self) -> HockeyResult<()> {
        self.alive_or_gone()?;
        self.state.lock().maximized = false;
        Ok(())
    }

    fn destroy(&self) -> HockeyResult<()> {
        self.alive_or_gone()?;
        let mut state = self.state.lock();
        if state.fail_destroy {
            return Err(HockeyError::WindowError("destroy refused".to_string()));
        }
        state.alive = false;
        state.visible = false;
        Ok(())
    }

    fn bounds(&self) -> HockeyResult<Bounds> {
        self.alive_or_gone()?;
        self.state
            .lock()
            .bounds
            .ok_or_else(|| HockeyError::WindowError("no bounds".to_string()))
    }

    fn set_bounds(&self, bounds: Bounds) -> HockeyResult<()> {
        self.alive_or_gone()?;
        self.state.lock().bounds = Some(bounds);
        Ok(())
    }

    fn set_size(&self, width: u32, height: u32) -> HockeyResult<()> {
        self.alive_or_gone()?;
        let mut state = self.state.lock();
        if let Some(bounds) = state.bounds.as_mut() {
            bounds.width = width;
            bounds.height = height;
        }
        Ok(())
    }

    fn reload(&self) -> HockeyResult<()> {
        self.alive_or_gone()?;
        self.state.lock().reload_count += 1;
        Ok(())
    }

    fn open_devtools(&self) {
        self.state.lock().devtools_open = true;
    }
}

#[derive(Default)]
struct MockHostState {
    windows: Vec<MockWindow>,
    specs: Vec<WindowSpec>,
    work_area: Option<WorkArea>,
    documents: Vec<DocumentCandidate>,
    fail_build: bool,
    on_build: Option<BuildHook>,
}

type BuildHook = Arc<dyn Fn() + Send + Sync>;

/// Toolkit double. Clones share state, so tests keep one after handing
/// another to the manager.
#[derive(Clone, Default)]
pub struct MockHost {
    state: Arc<Mutex<MockHostState>>,
}

impl MockHost {
    pub fn with_work_area(width: u32, height: u32) -> Self {
        let host = Self::default();
        host.state.lock().work_area = Some(WorkArea { width, height });
        host
    }

    /// A toolkit window the manager did not create.
    pub fn spawn_stray(&self, label: &str) -> MockWindow {
        let window = MockWindow::new(
            label,
            Bounds {
                x: 0,
                y: 0,
                width: 10,
                height: 10,
            },
        );
        self.state.lock().windows.push(window.clone());
        window
    }

    pub fn add_document(&self, candidate: DocumentCandidate) {
        self.state.lock().documents.push(candidate);
    }

    /// Run `hook` inside `build`, after the new window exists but before it
    /// is handed back to the caller.
    pub fn on_build(&self, hook: impl Fn() + Send + Sync + 'static) {
        self.state.lock().on_build = Some(Arc::new(hook));
    }

    pub fn set_fail_build(&self, fail: bool) {
        self.state.lock().fail_build = fail;
    }

    pub fn live_windows(&self) -> Vec<MockWindow> {
        self.state
            .lock()
            .windows
            .iter()
            .filter(|w| w.is_alive())
            .cloned()
            .collect()
    }

    pub fn built_specs(&self) -> Vec<WindowSpec> {
        self.state.lock().specs.clone()
    }
}

impl WindowHost for MockHost {
    type Window = MockWindow;

    fn work_area(&self) -> Option<WorkArea> {
        self.state.lock().work_area
    }

    fn build(&self, spec: &WindowSpec) -> HockeyResult<MockWindow> {
        let (window, hook) = {
            let mut state = self.state.lock();
            if state.fail_build {
                return Err(HockeyError::WindowError("build refused".to_string()));
            }
            let window = MockWindow::new(&spec.label, spec.bounds);
            state.windows.push(window.clone());
            state.specs.push(spec.clone());
            (window, state.on_build.clone())
        };

        if let Some(hook) = hook {
            hook();
        }
        Ok(window)
    }

    fn windows(&self) -> Vec<MockWindow> {
        self.state.lock().windows.clone()
    }

    fn document_exists(&self, candidate: &DocumentCandidate) -> bool {
        self.state.lock().documents.contains(candidate)
    }
}

/// Records every URL instead of launching a browser.
#[derive(Default)]
pub struct RecordingOpener {
    pub opened: Mutex<Vec<String>>,
    pub fail: bool,
}

impl UrlOpener for RecordingOpener {
    fn open_url(&self, url: &str) -> HockeyResult<()> {
        if self.fail {
            return Err(HockeyError::OpenerError("no default handler".to_string()));
        }
        self.opened.lock().push(url.to_string());
        Ok(())
    }
}
