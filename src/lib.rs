//! Procedural glass surfaces: capsule images with layered drop and inner
//! shadows, 9-slice packing, and a per-surface render cache.
//! Used by the render binary and the preview binary.

pub mod backend;
pub mod blur;
pub mod cache;
pub mod color;
pub mod config;
pub mod export;
pub mod params;
pub mod rim;
pub mod shader;
pub mod shadow;
pub mod shape;
pub mod stretch;
pub mod surface;
pub mod texture;

pub use color::Rgba;
pub use params::{SurfaceParams, TintColor, TintKind};
pub use shader::generate_glass_image;
pub use shadow::{render_shadow, ShadowSpec};
pub use shape::Size;
pub use stretch::{pack, StretchableImage};
pub use surface::GlassSurface;
