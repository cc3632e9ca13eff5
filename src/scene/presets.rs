//! Measured surface materials.
//!
//! Reflectivity data comes from published absorption and reflection
//! coefficient tables at the octave bands 125 Hz to 4 kHz. Scattering values
//! are estimates. None of the presets transmit sound.

use crate::frequency::FrequencyResponse;
use crate::scene::SoundMaterial;
use std::sync::LazyLock;

/// Octave bands the preset data is sampled at.
const PRESET_FREQUENCIES: [f32; 6] = [125.0, 250.0, 500.0, 1000.0, 2000.0, 4000.0];

/// How a preset's reflectance row was measured.
#[derive(Debug, Clone, Copy)]
enum Reflectance {
    /// Absorption coefficients, converted to `sqrt(1 - a)`.
    Absorption([f32; 6]),
    /// Reflectivity used as is.
    Reflectivity([f32; 6]),
}

struct PresetData {
    name: &'static str,
    reflectance: Reflectance,
    scattering: [f32; 6],
}

/// Built-in materials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialPreset {
    Brick,
    PaintedBrick,
    Carpet,
    HeavyCarpet,
    PaddedHeavyCarpet,
    Concrete,
    RoughConcrete,
    ConcreteBlock,
    PaintedConcreteBlock,
    Glass,
    HeavyGlass,
    Grass,
    Gravel,
    GypsumBoard,
    CeramicTile,
    PlasterOnBrick,
    PlasterOnConcreteBlock,
    Snow,
    Steel,
    Water,
    ThinWood,
    ThickWood,
    WoodFloor,
    WoodOnConcrete,
}

use MaterialPreset::*;
use Reflectance::{Absorption, Reflectivity};

/// Indexed by `MaterialPreset as usize`.
static PRESET_TABLE: [PresetData; 24] = [
    PresetData {
        name: "Brick",
        reflectance: Absorption([0.02, 0.02, 0.03, 0.04, 0.05, 0.07]),
        scattering: [0.20, 0.25, 0.30, 0.35, 0.40, 0.45],
    },
    PresetData {
        name: "Painted Brick",
        reflectance: Absorption([0.01, 0.01, 0.02, 0.02, 0.02, 0.03]),
        scattering: [0.15, 0.15, 0.20, 0.20, 0.20, 0.25],
    },
    PresetData {
        name: "Carpet",
        reflectance: Reflectivity([0.99, 0.97, 0.95, 0.89, 0.74, 0.59]),
        scattering: [0.10, 0.10, 0.15, 0.20, 0.30, 0.45],
    },
    PresetData {
        name: "Heavy Carpet",
        reflectance: Reflectivity([0.99, 0.97, 0.93, 0.79, 0.63, 0.59]),
        scattering: [0.10, 0.15, 0.20, 0.25, 0.35, 0.50],
    },
    PresetData {
        name: "Padded Heavy Carpet",
        reflectance: Reflectivity([0.96, 0.87, 0.66, 0.56, 0.54, 0.52]),
        scattering: [0.10, 0.15, 0.20, 0.25, 0.35, 0.50],
    },
    PresetData {
        name: "Concrete",
        reflectance: Reflectivity([0.99; 6]),
        scattering: [0.10, 0.11, 0.12, 0.13, 0.14, 0.15],
    },
    PresetData {
        name: "Rough Concrete",
        reflectance: Reflectivity([0.99, 0.99, 0.98, 0.97, 0.96, 0.95]),
        scattering: [0.10, 0.12, 0.15, 0.20, 0.25, 0.30],
    },
    PresetData {
        name: "Concrete Block",
        reflectance: Reflectivity([0.80, 0.75, 0.83, 0.84, 0.78, 0.87]),
        scattering: [0.10, 0.12, 0.15, 0.20, 0.25, 0.30],
    },
    PresetData {
        name: "Painted Concrete Block",
        reflectance: Reflectivity([0.95, 0.97, 0.97, 0.96, 0.95, 0.96]),
        scattering: [0.10, 0.11, 0.13, 0.15, 0.16, 0.20],
    },
    PresetData {
        name: "Glass",
        reflectance: Reflectivity([0.81, 0.87, 0.91, 0.94, 0.96, 0.98]),
        scattering: [0.05; 6],
    },
    PresetData {
        name: "Heavy Glass",
        reflectance: Reflectivity([0.91, 0.97, 0.98, 0.98, 0.99, 0.99]),
        scattering: [0.05; 6],
    },
    PresetData {
        name: "Grass",
        reflectance: Reflectivity([0.94, 0.86, 0.63, 0.56, 0.28, 0.10]),
        scattering: [0.30, 0.30, 0.40, 0.50, 0.60, 0.70],
    },
    PresetData {
        name: "Gravel",
        reflectance: Reflectivity([0.87, 0.63, 0.59, 0.55, 0.50, 0.45]),
        scattering: [0.20, 0.30, 0.40, 0.50, 0.60, 0.70],
    },
    PresetData {
        name: "Gypsum Board",
        reflectance: Reflectivity([0.84, 0.95, 0.97, 0.98, 0.96, 0.95]),
        scattering: [0.10, 0.11, 0.12, 0.13, 0.14, 0.15],
    },
    PresetData {
        name: "Ceramic Tile",
        reflectance: Reflectivity([0.99; 6]),
        scattering: [0.10, 0.12, 0.14, 0.16, 0.18, 0.20],
    },
    PresetData {
        name: "Plaster on Brick",
        reflectance: Reflectivity([0.99, 0.99, 0.99, 0.98, 0.98, 0.97]),
        scattering: [0.20, 0.25, 0.30, 0.35, 0.40, 0.45],
    },
    PresetData {
        name: "Plaster on Concrete Block",
        reflectance: Reflectivity([0.94, 0.95, 0.96, 0.97, 0.97, 0.98]),
        scattering: [0.20, 0.25, 0.30, 0.35, 0.40, 0.45],
    },
    PresetData {
        name: "Snow",
        reflectance: Reflectivity([0.74, 0.50, 0.32, 0.22, 0.22, 0.22]),
        scattering: [0.20, 0.30, 0.40, 0.50, 0.60, 0.75],
    },
    PresetData {
        name: "Steel",
        reflectance: Reflectivity([0.97, 0.95, 0.95, 0.95, 0.96, 0.99]),
        scattering: [0.10; 6],
    },
    PresetData {
        name: "Water",
        reflectance: Reflectivity([0.99, 0.99, 0.99, 0.99, 0.99, 0.98]),
        scattering: [0.10, 0.10, 0.10, 0.07, 0.05, 0.05],
    },
    PresetData {
        name: "Thin Wood",
        reflectance: Reflectivity([0.76, 0.89, 0.95, 0.96, 0.97, 0.97]),
        scattering: [0.10, 0.10, 0.10, 0.10, 0.10, 0.15],
    },
    PresetData {
        name: "Thick Wood",
        reflectance: Reflectivity([0.90, 0.93, 0.95, 0.97, 0.97, 0.97]),
        scattering: [0.10, 0.10, 0.10, 0.10, 0.10, 0.15],
    },
    PresetData {
        name: "Wood Floor",
        reflectance: Reflectivity([0.92, 0.94, 0.95, 0.96, 0.97, 0.96]),
        scattering: [0.10, 0.10, 0.10, 0.10, 0.10, 0.15],
    },
    PresetData {
        name: "Wood on Concrete",
        reflectance: Reflectivity([0.98, 0.98, 0.96, 0.97, 0.97, 0.96]),
        scattering: [0.10, 0.10, 0.10, 0.10, 0.10, 0.15],
    },
];

static PRESET_MATERIALS: LazyLock<Vec<SoundMaterial>> =
    LazyLock::new(|| MaterialPreset::ALL.iter().map(|p| p.build()).collect());

impl MaterialPreset {
    /// Every preset, in declaration order.
    pub const ALL: [MaterialPreset; 24] = [
        Brick,
        PaintedBrick,
        Carpet,
        HeavyCarpet,
        PaddedHeavyCarpet,
        Concrete,
        RoughConcrete,
        ConcreteBlock,
        PaintedConcreteBlock,
        Glass,
        HeavyGlass,
        Grass,
        Gravel,
        GypsumBoard,
        CeramicTile,
        PlasterOnBrick,
        PlasterOnConcreteBlock,
        Snow,
        Steel,
        Water,
        ThinWood,
        ThickWood,
        WoodFloor,
        WoodOnConcrete,
    ];

    fn data(self) -> &'static PresetData {
        &PRESET_TABLE[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.data().name
    }

    /// Builds a fresh copy of the preset material.
    pub fn build(self) -> SoundMaterial {
        let data = self.data();

        let reflectivity = match data.reflectance {
            Absorption(absorption) => {
                let mut material = SoundMaterial::default();
                material.set_absorption(&FrequencyResponse::from_points(
                    PRESET_FREQUENCIES.into_iter().zip(absorption),
                ));
                material.reflectivity().clone()
            }
            Reflectivity(reflectivity) => {
                FrequencyResponse::from_points(PRESET_FREQUENCIES.into_iter().zip(reflectivity))
            }
        };
        let scattering =
            FrequencyResponse::from_points(PRESET_FREQUENCIES.into_iter().zip(data.scattering));

        SoundMaterial::new(reflectivity, scattering, FrequencyResponse::flat(0.0))
            .with_name(data.name)
    }

    /// Shared instance of the preset, built on first use.
    pub fn material(self) -> &'static SoundMaterial {
        &PRESET_MATERIALS[self as usize]
    }
}
