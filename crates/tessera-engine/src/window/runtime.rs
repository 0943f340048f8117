use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App as CoreApp, AppControl, FrameCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::platform::winit::translate_window_event;
use crate::input::{InputEvent, InputFrame, InputState};
use crate::time::{FrameClock, FrameTime};

/// Window configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    /// Ask the platform to deliver IME commits (`InputEvent::Text` with `TextOrigin::Ime`).
    pub ime_allowed: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "tessera".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
            ime_allowed: true,
        }
    }
}

/// Entry point for the runtime.
///
/// Drives one window, redrawn continuously. The ImGui context, renderer and
/// input forwarder an app owns are per-window state, so a second window
/// would need its own set of each.
pub struct Runtime;

impl Runtime {
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState {
            config,
            gpu_init,
            app,
            window: None,
            exit_requested: false,
        };

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        Ok(())
    }
}

#[self_referencing]
struct WindowEntry {
    input_state: InputState,
    input_frame: InputFrame,
    clock: FrameClock,

    /// Set while the compositor reports the window as fully hidden.
    occluded: bool,

    /// Scratch buffer reused for event translation.
    pending: Vec<InputEvent>,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

impl WindowEntry {
    fn open(event_loop: &ActiveEventLoop, config: &RuntimeConfig, gpu_init: GpuInit) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;
        window.set_ime_allowed(config.ime_allowed);

        WindowEntryTryBuilder {
            input_state: InputState::default(),
            input_frame: InputFrame::default(),
            clock: FrameClock::default(),
            occluded: false,
            pending: Vec::new(),
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed for window")
    }

    fn id(&self) -> WindowId {
        self.with_window(|w| w.id())
    }

    fn request_redraw(&self) {
        if !*self.borrow_occluded() {
            self.with_window(|w| w.request_redraw());
        }
    }

    /// Reconfigures the surface to the window's current inner size.
    fn sync_surface_size(&mut self) {
        let size = self.with_window(|w| w.inner_size());
        self.with_gpu_mut(|gpu| gpu.resize(size));
        self.request_redraw();
    }

    /// Folds `event` into the input state.
    fn absorb_input(&mut self, event: &WindowEvent) {
        self.with_mut(|f| {
            f.pending.clear();
            translate_window_event(f.window, f.input_state, event, f.pending);
            for ev in f.pending.drain(..) {
                f.input_state.apply_event(f.input_frame, ev);
            }

            match event {
                WindowEvent::Occluded(hidden) => {
                    *f.occluded = *hidden;
                    if !*hidden {
                        f.clock.reset();
                        f.window.request_redraw();
                    }
                }
                WindowEvent::Focused(true) => f.clock.reset(),
                _ => {}
            }
        });
    }

    /// Runs one application frame and clears the per-frame text.
    fn drive_frame<A: CoreApp>(&mut self, app: &mut A) -> AppControl {
        if *self.borrow_occluded() {
            return AppControl::Continue;
        }

        self.with_mut(|f| {
            let time: FrameTime = f.clock.tick();
            let control = {
                let mut ctx = FrameCtx {
                    window: WindowCtx {
                        id: f.window.id(),
                        window: f.window,
                    },
                    gpu: f.gpu,
                    input: f.input_state,
                    input_frame: f.input_frame,
                    time,
                };
                app.on_frame(&mut ctx)
            };
            f.input_frame.clear();
            control
        })
    }
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    window: Option<WindowEntry>,
    exit_requested: bool,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn exit(&mut self, event_loop: &ActiveEventLoop) {
        self.exit_requested = true;
        // Drop the surface before the event loop tears the window down.
        self.window = None;
        event_loop.exit();
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.exit_requested {
            return;
        }

        match WindowEntry::open(event_loop, &self.config, self.gpu_init.clone()) {
            Ok(entry) => {
                log::info!("window {:?} created ({:?})", entry.id(), self.config.title);
                entry.request_redraw();
                self.window = Some(entry);
            }
            Err(e) => {
                log::error!("failed to create window: {e:#}");
                self.exit(event_loop);
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);
        if let Some(entry) = &self.window {
            entry.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        let Some(entry) = self.window.as_mut().filter(|e| e.id() == id) else {
            return;
        };

        entry.absorb_input(&event);
        if self.app.on_window_event(id, &event) == AppControl::Exit {
            self.exit(event_loop);
            return;
        }

        let control = match event {
            WindowEvent::CloseRequested => {
                log::info!("window {id:?} close requested");
                AppControl::Exit
            }
            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                entry.sync_surface_size();
                AppControl::Continue
            }
            WindowEvent::RedrawRequested => entry.drive_frame(&mut self.app),
            _ => AppControl::Continue,
        };

        if control == AppControl::Exit {
            self.exit(event_loop);
        }
    }
}
