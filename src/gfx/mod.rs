pub mod app;
pub mod axes;
pub mod camera;
pub mod geometry;
pub mod mesh;
pub mod overlay;
pub mod renderer;
pub mod window;

pub use self::app::App;
pub use self::camera::Camera;
pub use self::geometry::SceneGeometry;
pub use self::mesh::{Mesh, MeshBatch, Vertex};
pub use self::renderer::SceneRenderer;
pub use self::window::Window;
