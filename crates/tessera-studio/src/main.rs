//! ImGui demo host.
//!
//! Usage: `tessera-studio [FONT.ttf]`. The optional font is added after the
//! built-in one at 16 px.

use anyhow::{Context, Result};
use winit::dpi::LogicalSize;

use tessera_engine::core::{App, AppControl, FrameCtx};
use tessera_engine::device::GpuInit;
use tessera_engine::logging::{LoggingConfig, init_logging};
use tessera_engine::window::{Runtime, RuntimeConfig};
use tessera_imgui::{
    DisplayInfo, FontAtlasConfig, FontFile, ImguiPlatform, ImguiRenderer, PlatformConfig,
    TextureHandle,
};

const CLEAR: wgpu::Color = wgpu::Color {
    r: 0.08,
    g: 0.09,
    b: 0.11,
    a: 1.0,
};

const CHECKER_SIZE: u32 = 64;

struct Studio {
    imgui: imgui::Context,
    platform: ImguiPlatform,
    fonts: FontAtlasConfig,
    renderer: Option<ImguiRenderer>,
    checker: Option<TextureHandle>,
    show_demo: bool,
}

impl Studio {
    fn new(fonts: FontAtlasConfig) -> Self {
        let mut imgui = imgui::Context::create();
        let platform = ImguiPlatform::new(&mut imgui, PlatformConfig::default());
        Self {
            imgui,
            platform,
            fonts,
            renderer: None,
            checker: None,
            show_demo: true,
        }
    }

    /// Creates the renderer on the first frame, once a device exists.
    fn ensure_renderer(&mut self, ctx: &FrameCtx<'_, '_>) -> Result<()> {
        if self.renderer.is_some() {
            return Ok(());
        }
        let device = ctx.gpu.device();
        let queue = ctx.gpu.queue();

        let mut renderer = ImguiRenderer::new(&mut self.imgui, device, queue, self.fonts.clone())
            .context("failed to create imgui renderer")?;
        let checker = renderer
            .create_texture(
                device,
                queue,
                "studio checker",
                CHECKER_SIZE,
                CHECKER_SIZE,
                &checkerboard(CHECKER_SIZE),
            )
            .context("failed to upload checker texture")?;

        log::info!("renderer ready on {}", ctx.gpu.adapter_info().name);
        self.checker = Some(checker);
        self.renderer = Some(renderer);
        Ok(())
    }
}

impl App for Studio {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if let Err(e) = self.ensure_renderer(ctx) {
            log::error!("{e:#}");
            return AppControl::Exit;
        }

        let (w, h) = ctx.window.logical_size();
        let display = DisplayInfo::new([w, h]).with_scale(ctx.window.scale_factor());
        self.platform.prepare_frame(
            self.imgui.io_mut(),
            ctx.input,
            ctx.input_frame,
            ctx.time.delta,
            display,
        );

        let stats = self
            .renderer
            .as_ref()
            .map(ImguiRenderer::last_stats)
            .unwrap_or_default();

        let ui = self.imgui.new_frame();
        if self.show_demo {
            ui.show_demo_window(&mut self.show_demo);
        }
        ui.window("tessera")
            .size([260.0, 200.0], imgui::Condition::FirstUseEver)
            .position([20.0, 20.0], imgui::Condition::FirstUseEver)
            .build(|| {
                ui.text(format!("{:.1} fps", ui.io().framerate));
                ui.text(format!(
                    "{} lists, {} draws",
                    stats.draw_lists, stats.draw_calls
                ));
                ui.text(format!("{} vertices, {} indices", stats.vertices, stats.indices));
                ui.checkbox("demo window", &mut self.show_demo);
                if let Some(checker) = self.checker {
                    imgui::Image::new(checker.into(), [64.0, 64.0]).build(ui);
                }
            });
        let draw_data = self.imgui.render();

        let Some(renderer) = self.renderer.as_mut() else {
            return AppControl::Continue;
        };
        ctx.render(CLEAR, |rctx, target| {
            match renderer.render(rctx, target, draw_data) {
                Ok(_) => AppControl::Continue,
                Err(e) => {
                    log::error!("imgui render failed: {e}");
                    AppControl::Exit
                }
            }
        })
    }
}

/// Grey/white RGBA8 checkerboard with 8 px cells.
fn checkerboard(size: u32) -> Vec<u8> {
    (0..size * size)
        .flat_map(|i| {
            let (x, y) = (i % size, i / size);
            let v = if (x / 8 + y / 8) % 2 == 0 { 0xff } else { 0x80 };
            [v, v, v, 0xff]
        })
        .collect()
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let mut fonts = FontAtlasConfig::default();
    if let Some(path) = std::env::args_os().nth(1) {
        fonts.fonts.push(FontFile::new(path, 16.0));
    }

    let config = RuntimeConfig {
        title: "tessera studio".to_string(),
        initial_size: LogicalSize::new(1280.0, 800.0),
        ..RuntimeConfig::default()
    };

    Runtime::run(config, GpuInit::default(), Studio::new(fonts))
}
