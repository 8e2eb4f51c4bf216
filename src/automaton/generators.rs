//! Initial-state generators

use super::{Dimensionality, Grid};
use crate::error::{AutomatonError, AutomatonResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;

/// Uniform draws are scaled into `[0, RANDOM_SCALE)` before rounding
pub const RANDOM_SCALE: f64 = 0.6;

/// Smallest grid that can hold the seeded 2D patterns around the centre
pub const MIN_PATTERN_SIZE: usize = 3;

/// Named initial states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Independent random cells, 1D or 2D
    Random,
    /// Plus/T shape around the centre (2D)
    T,
    /// T shape with an extra cell up-left of the centre (2D)
    Chaos,
    /// Single live cell in the middle of the row (1D)
    Center,
}

impl Preset {
    /// Look up a preset by name for the given dimensionality
    pub fn parse(name: &str, dimensionality: Dimensionality) -> AutomatonResult<Self> {
        let preset = match (dimensionality, name) {
            (_, "random") => Preset::Random,
            (Dimensionality::TwoD, "T") => Preset::T,
            (Dimensionality::TwoD, "chaos") => Preset::Chaos,
            (Dimensionality::OneD, "center") => Preset::Center,
            _ => {
                return Err(AutomatonError::InvalidPreset {
                    preset: name.to_string(),
                    dimensionality,
                })
            }
        };
        Ok(preset)
    }

    /// Preset names accepted for a dimensionality
    pub fn names(dimensionality: Dimensionality) -> &'static [&'static str] {
        match dimensionality {
            Dimensionality::OneD => &["random", "center"],
            Dimensionality::TwoD => &["random", "T", "chaos"],
        }
    }

    /// Name as accepted by [`Preset::parse`]
    pub fn name(&self) -> &'static str {
        match self {
            Preset::Random => "random",
            Preset::T => "T",
            Preset::Chaos => "chaos",
            Preset::Center => "center",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Build a generator RNG from an explicit seed, or from OS entropy when none is given
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Generate an initial grid.
///
/// 2D presets produce a `size x size` grid, 1D presets a `1 x size` row.
/// The RNG is only consumed by the `random` preset.
pub fn generate<R: Rng + ?Sized>(
    dimensionality: Dimensionality,
    size: usize,
    preset_name: &str,
    rng: &mut R,
) -> AutomatonResult<Grid> {
    let preset = Preset::parse(preset_name, dimensionality)?;
    generate_preset(dimensionality, size, preset, rng)
}

/// Generate an initial grid from an already-parsed preset
pub fn generate_preset<R: Rng + ?Sized>(
    dimensionality: Dimensionality,
    size: usize,
    preset: Preset,
    rng: &mut R,
) -> AutomatonResult<Grid> {
    if size == 0 {
        return Err(AutomatonError::InvalidSize {
            size,
            minimum: 1,
            preset: preset.name().to_string(),
        });
    }

    match (dimensionality, preset) {
        (Dimensionality::TwoD, Preset::Random) => Ok(random_grid(size, size, rng)),
        (Dimensionality::OneD, Preset::Random) => Ok(random_grid(size, 1, rng)),
        (Dimensionality::TwoD, Preset::T) => seeded_pattern(size, preset, false),
        (Dimensionality::TwoD, Preset::Chaos) => seeded_pattern(size, preset, true),
        (Dimensionality::OneD, Preset::Center) => {
            let mut grid = Grid::new_row(size)?;
            grid.set(0, size / 2, true)?;
            Ok(grid)
        }
        (dimensionality, preset) => Err(AutomatonError::InvalidPreset {
            preset: preset.name().to_string(),
            dimensionality,
        }),
    }
}

/// Each cell is a uniform draw in `[0, RANDOM_SCALE)` rounded to the nearest
/// integer, with ties going to the even value 0.
fn random_grid<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> Grid {
    let cells = (0..width * height)
        .map(|_| rng.random::<f64>() * RANDOM_SCALE > 0.5)
        .collect();
    Grid::from_raw(width, height, cells)
}

fn seeded_pattern(size: usize, preset: Preset, with_tail: bool) -> AutomatonResult<Grid> {
    if size < MIN_PATTERN_SIZE {
        return Err(AutomatonError::InvalidSize {
            size,
            minimum: MIN_PATTERN_SIZE,
            preset: preset.name().to_string(),
        });
    }

    let c = size / 2;
    let mut grid = Grid::new(size, size)?;
    for (row, col) in [(c, c), (c, c - 1), (c, c + 1), (c + 1, c)] {
        grid.set(row, col, true)?;
    }
    if with_tail {
        grid.set(c - 1, c - 1, true)?;
    }
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_t_pattern() {
        let grid = generate(Dimensionality::TwoD, 5, "T", &mut seeded_rng(Some(0))).unwrap();
        assert_eq!(grid.shape(), (5, 5));
        assert_eq!(grid.living_cells(), vec![(2, 1), (2, 2), (2, 3), (3, 2)]);
    }

    #[test]
    fn test_chaos_pattern() {
        let grid = generate(Dimensionality::TwoD, 6, "chaos", &mut seeded_rng(Some(0))).unwrap();
        assert_eq!(grid.shape(), (6, 6));
        assert_eq!(grid.living_cells(), vec![(2, 2), (3, 2), (3, 3), (3, 4), (4, 3)]);
    }

    #[test]
    fn test_center_row() {
        let grid = generate(Dimensionality::OneD, 7, "center", &mut seeded_rng(None)).unwrap();
        assert_eq!(grid.to_rows(), vec![vec![0, 0, 0, 1, 0, 0, 0]]);

        let even = generate(Dimensionality::OneD, 4, "center", &mut seeded_rng(None)).unwrap();
        assert_eq!(even.to_rows(), vec![vec![0, 0, 1, 0]]);
    }

    #[test]
    fn test_random_is_binary_and_seeded() {
        let a = generate(Dimensionality::TwoD, 40, "random", &mut seeded_rng(Some(7))).unwrap();
        let b = generate(Dimensionality::TwoD, 40, "random", &mut seeded_rng(Some(7))).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.shape(), (40, 40));
        assert!(a.to_rows().iter().flatten().all(|&v| v <= 1));

        let row = generate(Dimensionality::OneD, 100, "random", &mut seeded_rng(Some(7))).unwrap();
        assert!(row.is_row());
        assert_eq!(row.width(), 100);
    }

    #[test]
    fn test_random_density_follows_rounding() {
        // A cell is live only when the scaled draw exceeds 0.5, i.e. one draw in six
        let grid = generate(Dimensionality::TwoD, 200, "random", &mut seeded_rng(Some(42))).unwrap();
        let density = grid.density();
        assert!(density > 0.13 && density < 0.20, "density {}", density);
    }

    #[test]
    fn test_invalid_presets() {
        let mut rng = seeded_rng(Some(1));
        assert_eq!(
            generate(Dimensionality::TwoD, 10, "foo", &mut rng),
            Err(AutomatonError::InvalidPreset {
                preset: "foo".to_string(),
                dimensionality: Dimensionality::TwoD,
            })
        );
        assert!(generate(Dimensionality::TwoD, 10, "center", &mut rng).is_err());
        assert!(generate(Dimensionality::OneD, 10, "chaos", &mut rng).is_err());
        assert!(generate(Dimensionality::OneD, 10, "t", &mut rng).is_err());
    }

    #[test]
    fn test_invalid_sizes() {
        let mut rng = seeded_rng(Some(1));
        assert!(matches!(
            generate(Dimensionality::TwoD, 2, "T", &mut rng),
            Err(AutomatonError::InvalidSize { size: 2, minimum: 3, .. })
        ));
        assert!(matches!(
            generate(Dimensionality::OneD, 0, "center", &mut rng),
            Err(AutomatonError::InvalidSize { size: 0, .. })
        ));
        assert_eq!(
            generate(Dimensionality::TwoD, 3, "chaos", &mut rng).unwrap().living_count(),
            5
        );
    }

    #[test]
    fn test_mismatched_preset_value() {
        let mut rng = seeded_rng(Some(1));
        assert!(generate_preset(Dimensionality::OneD, 5, Preset::T, &mut rng).is_err());
        assert!(generate_preset(Dimensionality::TwoD, 5, Preset::Center, &mut rng).is_err());
    }
}
