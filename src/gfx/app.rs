use std::io::{self, Write};
use std::time::Instant;

use crate::errors::{ErrorKind, Result, ResultExt};
use crate::gfx::axes::AxesTriad;
use crate::gfx::geometry::SceneGeometry;
use crate::gfx::overlay::{draw_labels, project_labels};
use crate::gfx::{Camera, SceneRenderer, Window};
use crate::grid::Axis;
use crate::math::{Aabb, Vec3d};
use crate::scene::SceneSpec;

pub struct App {
    spec: SceneSpec,
}

impl App {
    pub fn new(spec: SceneSpec) -> Result<Self> {
        spec.validate()?;
        Ok(App { spec: spec })
    }

    pub fn run(&self) -> Result<()> {
        let spec = &self.spec;
        let instant = Instant::now();
        let samples = spec.compute();
        if samples.grid.is_empty() {
            return Err(ErrorKind::EmptyScene.into());
        }
        info!("Sampled {} on a {:?} grid ({} points) - elapsed {:?}",
              spec.field.symbol(),
              samples.grid.shape(),
              samples.grid.len(),
              instant.elapsed());
        let spacing: Vec<_> = samples.grid.axes().iter().map(Axis::step).collect();
        debug!("Grid spacing per axis: {:?}", spacing);
        if let Some((min, max)) = samples.magnitude_range() {
            info!("|{}| in [{:e}, {:e}]", spec.field.symbol(), min, max);
        }

        let geometry = SceneGeometry::build(spec, &samples);
        let bounds = geometry.bounds.ok_or(ErrorKind::EmptyScene)?;
        let camera = self.camera(&bounds);
        info!("Rendering {} glyphs at {}x{}", samples.glyphs.len(), spec.width, spec.height);

        let window = Window::new(spec.width,
                                 spec.height,
                                 &format!("Dirac monopole ({})", spec.field))?;
        let renderer = SceneRenderer::new(&window)?;
        let mut image = renderer.render(&window, &geometry, &camera, spec.background, spec.show_axes)?;
        info!("Rendered frame - elapsed {:?}", instant.elapsed());

        let mut labels = project_labels(&spec.labels, &camera, spec.width, spec.height);
        if spec.show_axes {
            labels.extend(AxesTriad::new().labels(&camera, spec.width, spec.height, spec.font_size));
        }
        draw_labels(&mut image, &labels, spec.font_size, spec.label_color);

        let stdout = io::stdout();
        write_camera(&mut stdout.lock(), &camera).chain_err(|| "Could not print the camera.")?;

        image.save(&spec.output)
            .chain_err(|| format!("Could not write screenshot to {:?}", spec.output))?;
        info!("Saved {:?}", spec.output);
        Ok(())
    }

    fn camera(&self, bounds: &Aabb) -> Camera {
        let mut camera = Camera::along(bounds,
                                       &self.spec.camera.view_vector,
                                       &self.spec.camera.view_up);
        camera.zoom(self.spec.camera.zoom);
        info!("Camera at {} looking at {} (view angle {:.2} deg)",
              format_vector(&camera.position().coords),
              format_vector(&camera.focal_point().coords),
              camera.view_angle());
        camera
    }
}

/// Prints the resolved camera basis: eye position, focal point, view up.
pub fn write_camera<W: Write>(out: &mut W, camera: &Camera) -> io::Result<()> {
    writeln!(out,
             "View vector (camera position): {}",
             format_vector(&camera.position().coords))?;
    writeln!(out,
             "Focal point (looks at):        {}",
             format_vector(&camera.focal_point().coords))?;
    writeln!(out,
             "View up vector:                {}",
             format_vector(&camera.view_up()))?;
    Ok(())
}

pub fn format_vector(vector: &Vec3d) -> String {
    format!("[{:.8} {:.8} {:.8}]", vector.x, vector.y, vector.z)
}
