//! Shading strategies and the Phong illumination model.
//!
//! Four strategies share one contract ([`ShadingStrategy::shade`]): project
//! and rasterize the object under the strategy's lighting model, then
//! rasterize the floor through the shared [`FloorRenderer`], appending every
//! shaded pixel to the output sequence. The strategy is selected once at
//! startup via [`ShadingMode`], not re-dispatched per pixel.

mod flat;
mod floor;
mod gourard;
mod phong;
mod spherical;

pub use flat::FlatShading;
pub use floor::FloorRenderer;
pub use gourard::GourardShading;
pub use phong::PhongShading;
pub use spherical::SphericalShading;

use crate::math::vec3::Vec3;
use crate::mesh::Mesh;
use crate::point::ShadedPoint;
use crate::texture::Texture;
use crate::viewport::Viewport;

/// Runtime-tunable illumination parameters, owned by the active strategy.
///
/// The reflection coefficients, light intensities, specular exponent, and
/// channel strengths are all mutable over a session; a render pass only
/// reads them. Channel strengths weight the ambient + diffuse term only —
/// the specular highlight stays colorless by design.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadingParams {
    k_a: f32,
    k_d: f32,
    k_s: f32,
    alpha: f32,
    i_a: f32,
    i_d: f32,
    i_s: f32,
    red_strength: f32,
    green_strength: f32,
    blue_strength: f32,
    shadows: bool,
}

impl Default for ShadingParams {
    fn default() -> Self {
        Self {
            k_a: 0.2,
            k_d: 0.5,
            k_s: 0.7,
            alpha: 50.0,
            i_a: 0.4,
            i_d: 0.5,
            i_s: 1.0,
            red_strength: 1.0,
            green_strength: 0.0,
            blue_strength: 0.0,
            shadows: false,
        }
    }
}

impl ShadingParams {
    pub fn k_a(&self) -> f32 {
        self.k_a
    }

    pub fn set_k_a(&mut self, value: f32) {
        self.k_a = value;
    }

    pub fn k_d(&self) -> f32 {
        self.k_d
    }

    pub fn set_k_d(&mut self, value: f32) {
        self.k_d = value;
    }

    pub fn k_s(&self) -> f32 {
        self.k_s
    }

    pub fn set_k_s(&mut self, value: f32) {
        self.k_s = value;
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn set_alpha(&mut self, value: f32) {
        self.alpha = value;
    }

    pub fn i_a(&self) -> f32 {
        self.i_a
    }

    pub fn set_i_a(&mut self, value: f32) {
        self.i_a = value;
    }

    pub fn i_d(&self) -> f32 {
        self.i_d
    }

    pub fn set_i_d(&mut self, value: f32) {
        self.i_d = value;
    }

    pub fn i_s(&self) -> f32 {
        self.i_s
    }

    pub fn set_i_s(&mut self, value: f32) {
        self.i_s = value;
    }

    pub fn red_strength(&self) -> f32 {
        self.red_strength
    }

    pub fn set_red_strength(&mut self, value: f32) {
        self.red_strength = value;
    }

    pub fn green_strength(&self) -> f32 {
        self.green_strength
    }

    pub fn set_green_strength(&mut self, value: f32) {
        self.green_strength = value;
    }

    pub fn blue_strength(&self) -> f32 {
        self.blue_strength
    }

    pub fn set_blue_strength(&mut self, value: f32) {
        self.blue_strength = value;
    }

    pub fn shadows(&self) -> bool {
        self.shadows
    }

    pub fn toggle_shadows(&mut self) {
        self.shadows = !self.shadows;
    }

    /// Evaluates the Phong illumination terms for a surface normal, a
    /// normalized light-direction vector, and a normalized view-direction
    /// vector. Returns (ambient, diffuse, specular).
    ///
    /// Specular uses the halfway vector H = normalize(L + V); a negative
    /// N.H raised to a fractional exponent is NaN, which the outer `max`
    /// collapses to zero.
    pub fn illuminate(&self, normal: Vec3, light: Vec3, view: Vec3) -> (f32, f32, f32) {
        let halfway = (light + view).normalize();

        let ambient = self.k_a * self.i_a;
        let diffuse = self.k_d * self.i_d * normal.dot(light).max(0.0);
        let specular = self.k_s * self.i_s * normal.dot(halfway).powf(self.alpha).max(0.0);

        (ambient, diffuse, specular)
    }

    /// Combines illumination terms into a final RGB color: channel strengths
    /// weight ambient + diffuse, specular is added unweighted, and each
    /// channel is clamped to [0, 1].
    pub fn combine(&self, ambient: f32, diffuse: f32, specular: f32) -> [f32; 3] {
        [
            (((ambient + diffuse) * self.red_strength) + specular).clamp(0.0, 1.0),
            (((ambient + diffuse) * self.green_strength) + specular).clamp(0.0, 1.0),
            (((ambient + diffuse) * self.blue_strength) + specular).clamp(0.0, 1.0),
        ]
    }

    /// Color for a pixel in shadow: ambient term only, channel-weighted and
    /// clamped. No diffuse or specular contribution.
    pub fn ambient_only(&self, ambient: f32) -> [f32; 3] {
        [
            (ambient * self.red_strength).clamp(0.0, 1.0),
            (ambient * self.green_strength).clamp(0.0, 1.0),
            (ambient * self.blue_strength).clamp(0.0, 1.0),
        ]
    }
}

/// The common contract over the four shading variants.
///
/// `shade` initializes a fresh depth buffer, computes shadow information if
/// applicable, rasterizes the object under the strategy's lighting model,
/// then rasterizes the floor via the shared floor renderer, appending every
/// emitted point to `points` in object-then-floor, triangle-iteration,
/// scan-order sequence. The only side effect is the growth of `points`.
pub trait ShadingStrategy {
    fn params(&self) -> &ShadingParams;

    fn params_mut(&mut self) -> &mut ShadingParams;

    #[allow(clippy::too_many_arguments)]
    fn shade(
        &self,
        object: &Mesh,
        floor: &Mesh,
        viewport: Viewport,
        light_position: Vec3,
        view_position: Vec3,
        points: &mut Vec<ShadedPoint>,
        environment_map: Option<&Texture>,
    );
}

/// Available shading strategies, selected once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadingMode {
    /// One lighting sample per triangle, taken at its centroid.
    Flat,
    /// Illumination per vertex, colors blended per pixel.
    Gourard,
    /// Normals blended per pixel, illumination re-evaluated per pixel.
    /// The only variant with shadow support.
    #[default]
    Phong,
    /// Mirror-reflection lookup into a panoramic environment map.
    Spherical,
}

impl ShadingMode {
    /// Parses a mode name as given on the command line.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Flat" => Some(ShadingMode::Flat),
            "Gourard" => Some(ShadingMode::Gourard),
            "Phong" => Some(ShadingMode::Phong),
            "Spherical" => Some(ShadingMode::Spherical),
            _ => None,
        }
    }

    /// Constructs the strategy for this mode, giving it ownership of the
    /// floor texture.
    pub fn create(self, floor_texture: Texture) -> Box<dyn ShadingStrategy> {
        match self {
            ShadingMode::Flat => Box::new(FlatShading::new(floor_texture)),
            ShadingMode::Gourard => Box::new(GourardShading::new(floor_texture)),
            ShadingMode::Phong => Box::new(PhongShading::new(floor_texture)),
            ShadingMode::Spherical => Box::new(SphericalShading::new(floor_texture)),
        }
    }
}

impl std::fmt::Display for ShadingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShadingMode::Flat => write!(f, "Flat"),
            ShadingMode::Gourard => write!(f, "Gourard"),
            ShadingMode::Phong => write!(f, "Phong"),
            ShadingMode::Spherical => write!(f, "Spherical"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn defaults_match_session_startup() {
        let params = ShadingParams::default();
        assert_relative_eq!(params.k_a(), 0.2);
        assert_relative_eq!(params.k_d(), 0.5);
        assert_relative_eq!(params.k_s(), 0.7);
        assert_relative_eq!(params.alpha(), 50.0);
        assert_relative_eq!(params.i_a(), 0.4);
        assert_relative_eq!(params.red_strength(), 1.0);
        assert_relative_eq!(params.green_strength(), 0.0);
        assert!(!params.shadows());
    }

    #[test]
    fn illuminate_head_on_light() {
        let params = ShadingParams::default();
        let normal = Vec3::new(0.0, 0.0, 1.0);
        let light = Vec3::new(0.0, 0.0, 1.0);
        let view = Vec3::new(0.0, 0.0, 1.0);

        let (ambient, diffuse, specular) = params.illuminate(normal, light, view);
        assert_relative_eq!(ambient, 0.2 * 0.4);
        assert_relative_eq!(diffuse, 0.5 * 0.5, epsilon = 1e-6);
        // H == N, so N.H == 1 and specular is at its maximum.
        assert_relative_eq!(specular, 0.7 * 1.0, epsilon = 1e-5);
    }

    #[test]
    fn diffuse_is_floored_at_zero_for_backfacing_light() {
        let params = ShadingParams::default();
        let normal = Vec3::new(0.0, 0.0, 1.0);
        let light = Vec3::new(0.0, 0.0, -1.0);
        let view = Vec3::new(0.0, 0.0, 1.0);

        let (_, diffuse, _) = params.illuminate(normal, light, view);
        assert_eq!(diffuse, 0.0);
    }

    #[test]
    fn grazing_specular_collapses_to_zero() {
        // N.H negative and a fractional exponent: powf gives NaN, the
        // outer max collapses it to zero rather than letting it propagate.
        let mut params = ShadingParams::default();
        params.set_alpha(50.5);
        let normal = Vec3::new(0.0, 0.0, -1.0);
        let light = Vec3::new(0.0, 0.0, 1.0);
        let view = Vec3::new(0.0, 0.0, 1.0);

        let (_, _, specular) = params.illuminate(normal, light, view);
        assert_eq!(specular, 0.0);
    }

    #[test]
    fn combine_weights_channels_and_clamps() {
        let params = ShadingParams::default();
        let [r, g, b] = params.combine(0.3, 0.4, 0.2);
        assert_relative_eq!(r, (0.3 + 0.4) * 1.0 + 0.2);
        // Green and blue strength default to zero: only specular remains.
        assert_relative_eq!(g, 0.2);
        assert_relative_eq!(b, 0.2);

        let [r, _, _] = params.combine(5.0, 5.0, 5.0);
        assert_eq!(r, 1.0);
    }

    #[test]
    fn ambient_only_drops_diffuse_and_specular() {
        let params = ShadingParams::default();
        let [r, g, b] = params.ambient_only(0.08);
        assert_relative_eq!(r, 0.08);
        assert_eq!(g, 0.0);
        assert_eq!(b, 0.0);
    }

    #[test]
    fn mode_names_round_trip() {
        for mode in [
            ShadingMode::Flat,
            ShadingMode::Gourard,
            ShadingMode::Phong,
            ShadingMode::Spherical,
        ] {
            assert_eq!(ShadingMode::from_name(&mode.to_string()), Some(mode));
        }
        assert_eq!(ShadingMode::from_name("Toon"), None);
    }
}
