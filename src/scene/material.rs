//! Acoustic material properties for geometric propagation.
//!
//! A [`SoundMaterial`] describes how a surface treats an incoming path with
//! three frequency-dependent curves:
//! - **Reflectivity**: fraction of pressure reflected, so `sqrt(1 - absorption)`
//! - **Scattering**: fraction of reflected energy sent in a random (diffuse) direction
//! - **Transmission**: fraction of energy passing through the surface
//!
//! Before tracing, every material is projected once onto the simulated
//! [`FrequencyBands`] ([`MaterialBands`]) so the hot path only multiplies
//! fixed-size band arrays.

use crate::frequency::{FrequencyBandResponse, FrequencyBands, FrequencyResponse};
use crate::math::{Vec3, Vec4};
use crate::sampling::{UniformSampler, lambertian_hemisphere_direction};
use crate::scene::MaterialPreset;
use std::f32::consts::FRAC_1_PI;

/// Acoustic properties of a surface.
///
/// # Example
///
/// ```
/// use petalsonic_propagation::frequency::FrequencyResponse;
/// use petalsonic_propagation::scene::SoundMaterial;
///
/// let mut curtain = SoundMaterial::default().with_name("Curtain");
/// curtain.set_absorption(&FrequencyResponse::from_points([(125.0, 0.1), (4000.0, 0.6)]));
/// curtain.set_scattering(FrequencyResponse::flat(0.4));
///
/// assert!((curtain.average_scattering() - 0.4).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SoundMaterial {
    reflectivity: FrequencyResponse,
    scattering: FrequencyResponse,
    transmission: FrequencyResponse,
    /// Always equal to `scattering.average()`.
    average_scattering: f32,
    name: String,
    /// Display color for debug rendering.
    color: Vec4,
}

impl SoundMaterial {
    /// Creates an unnamed grey material from its three curves.
    pub fn new(
        reflectivity: FrequencyResponse,
        scattering: FrequencyResponse,
        transmission: FrequencyResponse,
    ) -> Self {
        let average_scattering = scattering.average();
        Self {
            reflectivity,
            scattering,
            transmission,
            average_scattering,
            name: String::new(),
            color: Vec4::new(0.5, 0.5, 0.5, 1.0),
        }
    }

    /// Builder form of [`set_name`](Self::set_name).
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Builder form of [`set_color`](Self::set_color).
    pub fn with_color(mut self, color: Vec4) -> Self {
        self.color = color;
        self
    }

    /// Reflected pressure fraction per frequency.
    pub fn reflectivity(&self) -> &FrequencyResponse {
        &self.reflectivity
    }

    /// Replaces the reflectivity curve.
    pub fn set_reflectivity(&mut self, reflectivity: FrequencyResponse) {
        self.reflectivity = reflectivity;
    }

    /// Sets the reflectivity from an absorption curve: each point becomes
    /// `sqrt(1 - a)` with `a` clamped to `[0, 1]`.
    ///
    /// An empty absorption curve means unity absorption everywhere, so the
    /// reflectivity becomes `flat(0.0)` instead of an empty (unity) curve.
    pub fn set_absorption(&mut self, absorption: &FrequencyResponse) {
        if absorption.is_empty() {
            self.reflectivity = FrequencyResponse::flat(0.0);
            return;
        }

        self.reflectivity = FrequencyResponse::from_points(
            absorption
                .iter()
                .map(|(frequency, a)| (frequency, (1.0 - a.clamp(0.0, 1.0)).sqrt())),
        );
    }

    /// Diffuse fraction of reflected energy per frequency.
    pub fn scattering(&self) -> &FrequencyResponse {
        &self.scattering
    }

    /// Replaces the scattering curve and recomputes [`average_scattering`](Self::average_scattering).
    pub fn set_scattering(&mut self, scattering: FrequencyResponse) {
        self.average_scattering = scattering.average();
        self.scattering = scattering;
    }

    /// Probability that a reflection is diffuse rather than specular.
    pub fn average_scattering(&self) -> f32 {
        self.average_scattering
    }

    /// Transmitted energy fraction per frequency.
    pub fn transmission(&self) -> &FrequencyResponse {
        &self.transmission
    }

    /// Replaces the transmission curve.
    pub fn set_transmission(&mut self, transmission: FrequencyResponse) {
        self.transmission = transmission;
    }

    /// Display name, empty if none was given.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renames the material.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Debug rendering color.
    pub fn color(&self) -> Vec4 {
        self.color
    }

    /// Sets the debug rendering color.
    pub fn set_color(&mut self, color: Vec4) {
        self.color = color;
    }

    /// Projects the material onto `bands`.
    pub fn band_projection(&self, bands: &FrequencyBands) -> MaterialBands {
        MaterialBands::new(self, bands)
    }

    /// Mirror reflection of `direction` about `normal`. Preserves the
    /// direction's length; `normal` must be normalized.
    pub fn specular_reflection(direction: Vec3, normal: Vec3) -> Vec3 {
        direction - 2.0 * normal * direction.dot(normal)
    }

    /// Cosine-weighted random direction in the hemisphere around `normal`.
    pub fn diffuse_reflection<S: UniformSampler + ?Sized>(normal: Vec3, sampler: &mut S) -> Vec3 {
        lambertian_hemisphere_direction(sampler, normal)
    }

    /// Lambertian probability density of leaving along `reflection`.
    pub fn diffuse_reflection_probability(normal: Vec3, reflection: Vec3) -> f32 {
        (FRAC_1_PI * normal.dot(reflection)).max(0.0)
    }

    /// Picks the reflected direction for one path: diffuse with probability
    /// [`average_scattering`](Self::average_scattering), specular otherwise.
    pub fn sample_reflection<S: UniformSampler + ?Sized>(
        &self,
        direction: Vec3,
        normal: Vec3,
        sampler: &mut S,
    ) -> Vec3 {
        if sampler.sample_unit() < self.average_scattering {
            Self::diffuse_reflection(normal, sampler)
        } else {
            Self::specular_reflection(direction, normal)
        }
    }
}

impl Default for SoundMaterial {
    fn default() -> Self {
        Self::new(
            FrequencyResponse::flat(0.9),
            FrequencyResponse::flat(0.2),
            FrequencyResponse::flat(0.0),
        )
    }
}

/// A material's curves sampled at the simulated band centers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialBands {
    /// Reflectivity per band.
    pub reflectivity: FrequencyBandResponse,
    pub scattering: FrequencyBandResponse,
    /// Transmission per band.
    pub transmission: FrequencyBandResponse,
    /// The material's frequency-averaged scattering, the diffuse lobe probability.
    pub average_scattering: f32,
}

impl MaterialBands {
    /// Projects `material` onto `bands`.
    pub fn new(material: &SoundMaterial, bands: &FrequencyBands) -> Self {
        Self {
            reflectivity: material.reflectivity().band_response(bands),
            scattering: material.scattering().band_response(bands),
            transmission: material.transmission().band_response(bands),
            average_scattering: material.average_scattering(),
        }
    }

    /// Recomputes the projection in place.
    pub fn update(&mut self, material: &SoundMaterial, bands: &FrequencyBands) {
        *self = Self::new(material, bands);
    }
}

/// Material lookup table indexed by the `material` field of scene triangles.
///
/// Each entry keeps its band projection next to it; the projection is only
/// refreshed through `&mut self`, so it cannot change while the table is
/// shared with tracing threads.
///
/// # Example
///
/// ```
/// use petalsonic_propagation::scene::{MaterialPreset, MaterialTable, SoundMaterial};
///
/// let mut materials = MaterialTable::default();
/// let wall = materials.add(MaterialPreset::Concrete.build());
/// let floor = materials.add(SoundMaterial::default().with_name("Floor"));
///
/// assert_eq!(materials.get(wall).map(|m| m.name()), Some("Concrete"));
/// assert_eq!(materials.len(), 2);
/// # let _ = floor;
/// ```
#[derive(Debug, Clone)]
pub struct MaterialTable {
    materials: Vec<SoundMaterial>,
    bands: Vec<MaterialBands>,
    frequency_bands: FrequencyBands,
}

impl MaterialTable {
    /// Creates an empty table projecting onto `frequency_bands`.
    pub fn new(frequency_bands: FrequencyBands) -> Self {
        Self {
            materials: Vec::new(),
            bands: Vec::new(),
            frequency_bands,
        }
    }

    /// Creates a table holding every preset, in [`MaterialPreset::ALL`] order,
    /// so a preset's table index is its position in that list.
    pub fn with_presets() -> Self {
        let mut table = Self::default();
        for preset in MaterialPreset::ALL {
            table.add(preset.material().clone());
        }
        table
    }

    /// Adds a material and returns its index.
    pub fn add(&mut self, material: SoundMaterial) -> u32 {
        let index = self.materials.len() as u32;
        self.bands
            .push(MaterialBands::new(&material, &self.frequency_bands));
        self.materials.push(material);
        index
    }

    /// Material at `index`, if any.
    pub fn get(&self, index: u32) -> Option<&SoundMaterial> {
        self.materials.get(index as usize)
    }

    /// Band projection of material `index`.
    pub fn bands(&self, index: u32) -> Option<&MaterialBands> {
        self.bands.get(index as usize)
    }

    /// Bands every entry is projected onto.
    pub fn frequency_bands(&self) -> &FrequencyBands {
        &self.frequency_bands
    }

    /// Switches to a new band partition and reprojects every material.
    pub fn set_frequency_bands(&mut self, frequency_bands: FrequencyBands) {
        self.frequency_bands = frequency_bands;
        for (bands, material) in self.bands.iter_mut().zip(&self.materials) {
            bands.update(material, &self.frequency_bands);
        }
    }

    /// Number of materials.
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Whether the table has no materials.
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Iterates over materials with their indices.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &SoundMaterial)> {
        self.materials
            .iter()
            .enumerate()
            .map(|(i, m)| (i as u32, m))
    }

    /// Materials in index order.
    pub fn as_slice(&self) -> &[SoundMaterial] {
        &self.materials
    }
}

impl Default for MaterialTable {
    fn default() -> Self {
        Self::new(FrequencyBands::default())
    }
}
