//! A CPU-based software renderer with selectable shading strategies.
//!
//! This crate rasterizes triangle meshes entirely on the CPU, using SDL2
//! only for window management and display. A scene is a mesh loaded from an
//! OBJ file plus a textured floor, lit by a single point light; one of four
//! shading strategies turns it into a sequence of shaded screen points that
//! the display layer flattens into a pixel frame.
//!
//! # Quick Start
//!
//! ```ignore
//! use softshade::prelude::*;
//!
//! let object = Mesh::from_obj("objects/teapot.obj")?;
//! let floor_texture = Texture::from_file("textures/floor.jpg")?;
//! let strategy = ShadingMode::Phong.create(floor_texture);
//!
//! let mut points = Vec::new();
//! strategy.shade(&object, &floor, viewport, light, view, &mut points, None);
//! ```

pub mod depth;
pub mod display;
pub mod geometry;
pub mod math;
pub mod mesh;
pub mod point;
pub mod shading;
pub mod texture;
pub mod viewport;
pub mod window;

// Re-export commonly needed types at crate root for convenience
pub use mesh::{LoadError, Mesh};
pub use point::ShadedPoint;
pub use shading::{ShadingMode, ShadingParams, ShadingStrategy};
pub use texture::Texture;
pub use viewport::Viewport;

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use softshade::prelude::*;
/// ```
pub mod prelude {
    // Scene content
    pub use crate::mesh::{LoadError, Mesh, Triangle};
    pub use crate::texture::Texture;

    // Shading
    pub use crate::shading::{ShadingMode, ShadingParams, ShadingStrategy};

    // Rasterization
    pub use crate::depth::{DepthBuffer, ShadowPass};
    pub use crate::point::ShadedPoint;
    pub use crate::viewport::Viewport;

    // Math
    pub use crate::math::mat4::Mat4;
    pub use crate::math::vec3::Vec3;

    // Display
    pub use crate::display::{Frame, PixelGrid};

    // Window
    pub use crate::window::{FrameLimiter, Window, WindowEvent};
}
