use glium::draw_parameters::{BackfaceCullingMode, BlendingFunction, DepthTest,
                             LinearBlendingFactor};
use glium::framebuffer::{DepthRenderBuffer, SimpleFrameBuffer};
use glium::index::PrimitiveType;
use glium::texture::{DepthFormat, MipmapsOption, Texture2d, UncompressedFloatFormat};
use glium::uniforms::Uniforms;
use glium::{Blend, Depth, DrawParameters, IndexBuffer, Program, Rect, Surface, VertexBuffer};
use image::{Rgba, RgbaImage};

use crate::errors::{Result, ResultExt};
use crate::gfx::axes::{AxesTriad, Viewport};
use crate::gfx::geometry::SceneGeometry;
use crate::gfx::mesh::MeshBatch;
use crate::gfx::{Camera, Window};
use crate::math::GpuScalar;

const AMBIENT: GpuScalar = 0.3;

/// Draws scene geometry into an offscreen RGBA target and reads it back.
pub struct SceneRenderer {
    program: Program,
    axes: AxesTriad,
}

impl SceneRenderer {
    pub fn new(window: &Window) -> Result<Self> {
        Ok(SceneRenderer {
            program: window.program(VERTEX_SHADER, FRAGMENT_SHADER)?,
            axes: AxesTriad::new(),
        })
    }

    /// Renders `geometry` seen through `camera`. The background keeps alpha
    /// 0 so it stays transparent in the exported image.
    pub fn render(&self,
                  window: &Window,
                  geometry: &SceneGeometry,
                  camera: &Camera,
                  background: [GpuScalar; 3],
                  show_axes: bool)
                  -> Result<RgbaImage> {
        let facade = window.facade();
        let (width, height) = window.size();
        let color = Texture2d::empty_with_format(facade,
                                                 UncompressedFloatFormat::U8U8U8U8,
                                                 MipmapsOption::NoMipmap,
                                                 width,
                                                 height)
            .chain_err(|| "Could not create the colour target.")?;
        let depth = DepthRenderBuffer::new(facade, DepthFormat::I24, width, height)
            .chain_err(|| "Could not create the depth buffer.")?;
        let mut target = SimpleFrameBuffer::with_depth_buffer(facade, &color, &depth)
            .chain_err(|| "Could not create the offscreen framebuffer.")?;
        target.clear_color_and_depth((background[0], background[1], background[2], 0.0), 1.0);

        let uniforms = uniform! {
            perspective: camera.projection_matrix(window.aspect()),
            view: camera.view_matrix(),
            ambient: AMBIENT,
        };
        self.draw(window, &mut target, &geometry.opaque, &uniforms, &draw_parameters(false, None))
            .chain_err(|| "Could not render opaque geometry.")?;
        self.draw(window, &mut target, &geometry.translucent, &uniforms, &draw_parameters(true, None))
            .chain_err(|| "Could not render translucent geometry.")?;

        if show_axes {
            let viewport = AxesTriad::viewport(width, height);
            let axes_camera = self.axes.camera(camera);
            let uniforms = uniform! {
                perspective: axes_camera.projection_matrix(1.0),
                view: axes_camera.view_matrix(),
                ambient: AMBIENT,
            };
            target.clear_depth(1.0);
            self.draw(window,
                      &mut target,
                      self.axes.batch(),
                      &uniforms,
                      &draw_parameters(false, Some(viewport)))
                .chain_err(|| "Could not render the axes triad.")?;
        }

        let rows: Vec<Vec<(u8, u8, u8, u8)>> = color.read();
        Ok(image_from_rows(&rows, width, height))
    }

    fn draw<U: Uniforms>(&self,
                         window: &Window,
                         target: &mut SimpleFrameBuffer,
                         batch: &MeshBatch,
                         uniforms: &U,
                         parameters: &DrawParameters)
                         -> Result<()> {
        if batch.is_empty() {
            return Ok(());
        }
        let vertex_buffer = VertexBuffer::new(window.facade(), &batch.vertices)
            .chain_err(|| "Cannot create vertex buffer.")?;
        let index_buffer = IndexBuffer::new(window.facade(),
                                            PrimitiveType::TrianglesList,
                                            &batch.indices)
            .chain_err(|| "Cannot create index buffer.")?;
        target.draw(&vertex_buffer, &index_buffer, &self.program, uniforms, parameters)
            .chain_err(|| "Draw call failed.")?;
        Ok(())
    }
}

fn draw_parameters(translucent: bool, viewport: Option<Viewport>) -> DrawParameters<'static> {
    DrawParameters {
        depth: Depth {
            test: DepthTest::IfLess,
            write: !translucent,
            ..Default::default()
        },
        blend: if translucent {
            Blend {
                color: BlendingFunction::Addition {
                    source: LinearBlendingFactor::SourceAlpha,
                    destination: LinearBlendingFactor::OneMinusSourceAlpha,
                },
                alpha: BlendingFunction::Addition {
                    source: LinearBlendingFactor::One,
                    destination: LinearBlendingFactor::OneMinusSourceAlpha,
                },
                constant_value: (0.0, 0.0, 0.0, 0.0),
            }
        } else {
            Default::default()
        },
        backface_culling: BackfaceCullingMode::CullingDisabled,
        viewport: viewport.map(|v| {
            Rect {
                left: v.left,
                bottom: v.bottom,
                width: v.width,
                height: v.height,
            }
        }),
        ..Default::default()
    }
}

/// GL rows start at the bottom of the framebuffer; images start at the top.
pub fn image_from_rows(rows: &[Vec<(u8, u8, u8, u8)>], width: u32, height: u32) -> RgbaImage {
    let mut image = RgbaImage::new(width, height);
    for (y, row) in rows.iter().rev().take(height as usize).enumerate() {
        for (x, &(r, g, b, a)) in row.iter().take(width as usize).enumerate() {
            image.put_pixel(x as u32, y as u32, Rgba([r, g, b, a]));
        }
    }
    image
}

const VERTEX_SHADER: &str = include_str!("shaders/mesh.vert");
const FRAGMENT_SHADER: &str = include_str!("shaders/mesh.frag");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_from_rows_flips_vertically() {
        let rows = vec![vec![(1, 0, 0, 255), (2, 0, 0, 255)],
                        vec![(3, 0, 0, 255), (4, 0, 0, 0)]];
        let image = image_from_rows(&rows, 2, 2);
        assert_eq!(image.get_pixel(0, 0), &Rgba([3, 0, 0, 255]));
        assert_eq!(image.get_pixel(1, 0), &Rgba([4, 0, 0, 0]));
        assert_eq!(image.get_pixel(0, 1), &Rgba([1, 0, 0, 255]));
    }

    #[test]
    fn test_draw_parameters() {
        let opaque = draw_parameters(false, None);
        assert!(opaque.depth.write);
        assert!(opaque.viewport.is_none());

        let translucent = draw_parameters(true, Some(AxesTriad::viewport(400, 200)));
        assert!(!translucent.depth.write);
        assert_eq!(translucent.viewport.map(|r| r.width), Some(50));
    }
}
