//! Domain classifiers
//!
//! Closed-vocabulary mappings from noisy journal strings into internal
//! enumerations. The source vocabulary has inconsistent casing, occasional
//! renames, and free-text embellishment across schema eras, so every
//! classifier works the same way: exact-match table first, then substring
//! heuristics over a documented priority order, then an explicit `Unknown`
//! sentinel. Classifiers are pure and deterministic; none of them errors.

pub mod atmosphere;
pub mod signal;
pub mod volcanism;

pub use atmosphere::{AtmosphereClass, AtmosphereProperties, AtmosphereType};
pub use signal::{SignalClass, UssType};
pub use volcanism::{VolcanismClass, VolcanismIntensity, VolcanismType};

use crate::localize;

/// Normalize a vocabulary value for table lookup: de-tokenize camel case and
/// `$..;` markup, lowercase, and collapse whitespace.
pub(crate) fn normalize(text: &str) -> String {
    localize::synthesize(text).to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("CarbonDioxide"), "carbon dioxide");
        assert_eq!(normalize("$USS_Type_Salvage;"), "uss type salvage");
        assert_eq!(normalize("thin ammonia atmosphere"), "thin ammonia atmosphere");
    }
}
