use std::fmt;
use std::num::NonZeroU32;

use glium::glutin::config::{Config, ConfigTemplateBuilder, GlConfig};
use glium::glutin::context::{ContextAttributesBuilder, NotCurrentGlContext};
use glium::glutin::display::{GetGlDisplay, GlDisplay};
use glium::glutin::surface::{SurfaceAttributesBuilder, WindowSurface};
use glium::{Display, Program};
use glutin_winit::DisplayBuilder;
use raw_window_handle::HasRawWindowHandle;
use winit::dpi::PhysicalSize;
use winit::event_loop::EventLoop;
use winit::window::WindowBuilder;

use crate::errors::{Error, ErrorKind, Result, ResultExt};

pub const GLSL_VERSION_STRING: &str = "140";

/// Hidden window owning the GL context. Frames are rendered offscreen, so
/// the window itself is never shown or polled.
pub struct Window {
    display: Display<WindowSurface>,
    _window: winit::window::Window,
    _event_loop: EventLoop<()>,
    width: u32,
    height: u32,
}

impl Window {
    pub fn new(width: u32, height: u32, title: &str) -> Result<Window> {
        let size = (non_zero("width", width)?, non_zero("height", height)?);
        let event_loop = EventLoop::new().map_err(|err| context_error("no event loop", err))?;

        let window_builder = WindowBuilder::new()
            .with_title(title)
            .with_inner_size(PhysicalSize::new(width, height))
            .with_visible(false);
        let (window, config) = DisplayBuilder::new()
            .with_window_builder(Some(window_builder))
            .build(&event_loop, ConfigTemplateBuilder::new(), pick_config)
            .map_err(|err| context_error("no GL config", err))?;
        let window = window.ok_or_else(|| context_error("no window", "not created"))?;
        debug!("Picked GL config with {} samples", config.num_samples());

        let handle = window.raw_window_handle();
        let gl_display = config.display();
        let surface_attributes =
            SurfaceAttributesBuilder::<WindowSurface>::new().build(handle, size.0, size.1);
        let surface = unsafe { gl_display.create_window_surface(&config, &surface_attributes) }
            .chain_err(|| "Could not create the window surface.")?;
        let context_attributes = ContextAttributesBuilder::new().build(Some(handle));
        let context = unsafe { gl_display.create_context(&config, &context_attributes) }
            .chain_err(|| "Could not create the GL context.")?
            .make_current(&surface)
            .chain_err(|| "Could not make the GL context current.")?;
        let display = Display::from_context_surface(context, surface)
            .chain_err(|| "OpenGL version is not supported.")?;
        info!("Created GL context: {} ({})",
              display.get_opengl_renderer_string(),
              display.get_opengl_version_string());

        Ok(Window {
            display: display,
            _window: window,
            _event_loop: event_loop,
            width: width,
            height: height,
        })
    }

    /// Size of the offscreen render target.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn aspect(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    pub fn facade(&self) -> &Display<WindowSurface> {
        &self.display
    }

    pub fn program(&self, vertex_src: &str, fragment_src: &str) -> Result<Program> {
        Program::from_source(&self.display,
                             &format!("#version {}\n{}", GLSL_VERSION_STRING, vertex_src),
                             &format!("#version {}\n{}", GLSL_VERSION_STRING, fragment_src),
                             None)
            .chain_err(|| "Failed to build program.")
    }
}

/// Prefers multisampled configs. glutin reports a display without any
/// config as an error, so `configs` is never empty.
fn pick_config(configs: Box<dyn Iterator<Item = Config> + '_>) -> Config {
    configs.reduce(|best, config| if config.num_samples() > best.num_samples() {
            config
        } else {
            best
        })
        .expect("glutin yields at least one config")
}

fn non_zero(name: &str, value: u32) -> Result<NonZeroU32> {
    NonZeroU32::new(value)
        .ok_or_else(|| ErrorKind::InvalidParameter(name.into(), "must be non-zero".into()).into())
}

fn context_error<E: fmt::Display>(what: &str, err: E) -> Error {
    ErrorKind::RenderContext(format!("{}: {}", what, err)).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_zero_size() {
        assert_eq!(non_zero("width", 1000).unwrap().get(), 1000);
        let err = non_zero("height", 0).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for 'height': must be non-zero");
    }

    #[test]
    fn test_context_errors_are_render_context() {
        let err = context_error("no GL config", "no matching configs");
        match *err.kind() {
            ErrorKind::RenderContext(ref msg) => assert_eq!(msg, "no GL config: no matching configs"),
            ref kind => panic!("unexpected error kind {:?}", kind),
        }
        assert!(err.to_string().starts_with("Could not create a render context"));
    }
}
