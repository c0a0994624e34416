//! Immutable registry of per-body delta-v cost segments.
//!
//! Each body maps to a [`CostVector`] and, for moons, a parent name. The
//! registry validates the whole dataset when it is built, so every lookup
//! afterwards can assume well-formed vectors and resolvable parents.

use std::collections::BTreeMap;

use dvmap_config::{BodyConfig, DatasetConfig, HomeConfig};
use log::debug;
use thiserror::Error;

/// Raised while building a registry from malformed data.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InvalidDataError {
    #[error("body '{name}' has {len} cost components; expected 3 or 4")]
    BadLength { name: String, len: usize },
    #[error("home body '{name}' has {len} cost components; expected 4")]
    HomeShape { name: String, len: usize },
    #[error("body '{0}' has a non-finite cost component")]
    NonFinite(String),
    #[error("body '{0}' is declared more than once")]
    Duplicate(String),
    #[error("body name '{0}' must be non-empty, trimmed and lowercase")]
    InvalidName(String),
    #[error("moon '{moon}' names unknown parent '{parent}'")]
    MissingParent { moon: String, parent: String },
    #[error("moon '{moon}' orbits '{parent}', which is not a top-level body")]
    NestedMoon { moon: String, parent: String },
    #[error("parent '{parent}' of moon '{moon}' has no SOI transfer segment")]
    ParentWithoutSoi { moon: String, parent: String },
}

/// Raised when a name does not resolve to a registered body.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown body '{0}'")]
pub struct UnknownBodyError(pub String);

/// Ordered cost segments of a non-home body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CostVector {
    /// `[intercept, low_orbit, stable_orbit]`
    Leaf([f64; 3]),
    /// `[intercept, soi_transfer, low_orbit, stable_orbit]`
    Parent([f64; 4]),
}

impl CostVector {
    pub fn components(&self) -> &[f64] {
        match self {
            CostVector::Leaf(c) => c,
            CostVector::Parent(c) => c,
        }
    }

    pub fn len(&self) -> usize {
        self.components().len()
    }

    pub fn sum(&self) -> f64 {
        self.components().iter().sum()
    }

    /// Intercept plus SOI transfer, the cost of reaching a parent's moon system.
    ///
    /// Only parent vectors carry an SOI leg; leaf vectors yield `None`.
    pub fn moon_system_entry(&self) -> Option<f64> {
        match self {
            CostVector::Leaf(_) => None,
            CostVector::Parent(c) => Some(self.sum() - c[3] - c[2]),
        }
    }
}

impl TryFrom<&[f64]> for CostVector {
    /// Offending length.
    type Error = usize;

    fn try_from(value: &[f64]) -> Result<Self, Self::Error> {
        match *value {
            [a, b, c] => Ok(CostVector::Leaf([a, b, c])),
            [a, b, c, d] => Ok(CostVector::Parent([a, b, c, d])),
            _ => Err(value.len()),
        }
    }
}

/// The launch body every mission departs from.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeBody {
    name: String,
    costs: [f64; 4],
}

impl HomeBody {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `[intercept, ascent_to_low_orbit, low_to_stable_orbit, deorbit_or_reserve]`
    pub fn costs(&self) -> &[f64; 4] {
        &self.costs
    }

    pub fn sum(&self) -> f64 {
        self.costs.iter().sum()
    }

    pub fn ascent(&self) -> f64 {
        self.costs[1]
    }

    pub fn low_to_stable(&self) -> f64 {
        self.costs[2]
    }

    pub fn reserve(&self) -> f64 {
        self.costs[3]
    }
}

/// Structural position of a body in the hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyCategory<'a> {
    Home,
    /// Orbits the home body directly.
    HomeMoon,
    /// Orbits another top-level body.
    PlanetMoon { parent: &'a str },
    TopLevel,
}

impl BodyCategory<'_> {
    pub fn label(&self) -> &'static str {
        match self {
            BodyCategory::Home => "home",
            BodyCategory::HomeMoon => "home_moon",
            BodyCategory::PlanetMoon { .. } => "planet_moon",
            BodyCategory::TopLevel => "top_level",
        }
    }
}

#[derive(Debug, Clone)]
struct BodyEntry {
    costs: CostVector,
    parent: Option<String>,
}

/// Validated mapping from body name to cost segments and parent.
#[derive(Debug, Clone)]
pub struct BodyCostRegistry {
    home: HomeBody,
    bodies: BTreeMap<String, BodyEntry>,
}

impl BodyCostRegistry {
    /// Build and validate a registry. Fails on the first invalid record.
    pub fn new(home: HomeConfig, bodies: Vec<BodyConfig>) -> Result<Self, InvalidDataError> {
        check_name(&home.name)?;
        check_finite(&home.name, &home.costs)?;
        let home_costs: [f64; 4] =
            home.costs
                .as_slice()
                .try_into()
                .map_err(|_| InvalidDataError::HomeShape {
                    name: home.name.clone(),
                    len: home.costs.len(),
                })?;
        let home = HomeBody {
            name: home.name,
            costs: home_costs,
        };

        let mut entries = BTreeMap::new();
        for body in bodies {
            check_name(&body.name)?;
            if body.name == home.name || entries.contains_key(&body.name) {
                return Err(InvalidDataError::Duplicate(body.name));
            }
            check_finite(&body.name, &body.costs)?;
            let costs = CostVector::try_from(body.costs.as_slice()).map_err(|len| {
                InvalidDataError::BadLength {
                    name: body.name.clone(),
                    len,
                }
            })?;
            entries.insert(
                body.name,
                BodyEntry {
                    costs,
                    parent: body.parent,
                },
            );
        }

        for (name, entry) in &entries {
            let Some(parent) = entry.parent.as_deref() else {
                continue;
            };
            if parent == home.name {
                continue;
            }
            let parent_entry =
                entries
                    .get(parent)
                    .ok_or_else(|| InvalidDataError::MissingParent {
                        moon: name.clone(),
                        parent: parent.to_string(),
                    })?;
            if parent_entry.parent.is_some() {
                return Err(InvalidDataError::NestedMoon {
                    moon: name.clone(),
                    parent: parent.to_string(),
                });
            }
            if !matches!(parent_entry.costs, CostVector::Parent(_)) {
                return Err(InvalidDataError::ParentWithoutSoi {
                    moon: name.clone(),
                    parent: parent.to_string(),
                });
            }
        }

        debug!(
            "registry built: home '{}' plus {} bodies",
            home.name,
            entries.len()
        );
        Ok(Self {
            home,
            bodies: entries,
        })
    }

    pub fn from_config(config: &DatasetConfig) -> Result<Self, InvalidDataError> {
        Self::new(config.home.clone(), config.bodies.clone())
    }

    pub fn home(&self) -> &HomeBody {
        &self.home
    }

    /// Cost vector for a non-home body. The home body is not found here.
    pub fn get(&self, name: &str) -> Result<&CostVector, UnknownBodyError> {
        self.entry(name).map(|entry| &entry.costs)
    }

    /// True for the home body and every registered body.
    pub fn contains(&self, name: &str) -> bool {
        name == self.home.name || self.bodies.contains_key(name)
    }

    pub fn parent_of(&self, name: &str) -> Option<&str> {
        self.bodies.get(name).and_then(|entry| entry.parent.as_deref())
    }

    pub fn category(&self, name: &str) -> Result<BodyCategory<'_>, UnknownBodyError> {
        if name == self.home.name {
            return Ok(BodyCategory::Home);
        }
        let entry = self.entry(name)?;
        Ok(match entry.parent.as_deref() {
            None => BodyCategory::TopLevel,
            Some(parent) if parent == self.home.name => BodyCategory::HomeMoon,
            Some(parent) => BodyCategory::PlanetMoon { parent },
        })
    }

    /// Moons registered under `parent`, alphabetically.
    pub fn moons_of<'a>(&'a self, parent: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.bodies
            .iter()
            .filter(move |(_, entry)| entry.parent.as_deref() == Some(parent))
            .map(|(name, _)| name.as_str())
    }

    /// Non-home bodies in alphabetical order.
    pub fn bodies(&self) -> impl Iterator<Item = (&str, &CostVector)> {
        self.bodies
            .iter()
            .map(|(name, entry)| (name.as_str(), &entry.costs))
    }

    /// Every name, home body first.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.home.name.as_str()).chain(self.bodies.keys().map(String::as_str))
    }

    /// Number of non-home bodies.
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    fn entry(&self, name: &str) -> Result<&BodyEntry, UnknownBodyError> {
        self.bodies
            .get(name)
            .ok_or_else(|| UnknownBodyError(name.to_string()))
    }
}

fn check_name(name: &str) -> Result<(), InvalidDataError> {
    if name.is_empty() || name.trim() != name || name.to_lowercase() != name {
        return Err(InvalidDataError::InvalidName(name.to_string()));
    }
    Ok(())
}

fn check_finite(name: &str, costs: &[f64]) -> Result<(), InvalidDataError> {
    if costs.iter().all(|c| c.is_finite()) {
        Ok(())
    } else {
        Err(InvalidDataError::NonFinite(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn home() -> HomeConfig {
        HomeConfig {
            name: "kerbin".into(),
            costs: vec![0.0, 3400.0, 1115.0, 950.0],
        }
    }

    fn body(name: &str, parent: Option<&str>, costs: &[f64]) -> BodyConfig {
        BodyConfig {
            name: name.into(),
            parent: parent.map(Into::into),
            costs: costs.to_vec(),
        }
    }

    #[test]
    fn cost_vector_shapes() {
        assert!(matches!(
            CostVector::try_from(&[1.0, 2.0, 3.0][..]),
            Ok(CostVector::Leaf(_))
        ));
        assert!(matches!(
            CostVector::try_from(&[1.0, 2.0, 3.0, 4.0][..]),
            Ok(CostVector::Parent(_))
        ));
        assert_eq!(CostVector::try_from(&[1.0, 2.0][..]), Err(2));
        assert_eq!(CostVector::try_from(&[0.0; 5][..]), Err(5));
    }

    #[test]
    fn moon_system_entry_drops_orbit_legs() {
        let duna = CostVector::Parent([130.0, 250.0, 360.0, 1450.0]);
        assert_eq!(duna.moon_system_entry(), Some(380.0));
        assert_eq!(CostVector::Leaf([1.0, 2.0, 3.0]).moon_system_entry(), None);
    }

    #[test]
    fn rejects_bad_vector_length() {
        let err = BodyCostRegistry::new(home(), vec![body("mun", None, &[1.0, 2.0])]).unwrap_err();
        assert_eq!(
            err,
            InvalidDataError::BadLength {
                name: "mun".into(),
                len: 2
            }
        );
    }

    #[test]
    fn rejects_home_without_four_components() {
        let mut h = home();
        h.costs.pop();
        let err = BodyCostRegistry::new(h, vec![]).unwrap_err();
        assert!(matches!(err, InvalidDataError::HomeShape { len: 3, .. }));
    }

    #[test]
    fn rejects_missing_parent() {
        let err =
            BodyCostRegistry::new(home(), vec![body("ike", Some("duna"), &[30.0, 180.0, 390.0])])
                .unwrap_err();
        assert!(matches!(err, InvalidDataError::MissingParent { .. }));
    }

    #[test]
    fn rejects_parent_without_soi_leg() {
        let err = BodyCostRegistry::new(
            home(),
            vec![
                body("dres", None, &[610.0, 1290.0, 430.0]),
                body("rock", Some("dres"), &[1.0, 2.0, 3.0]),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, InvalidDataError::ParentWithoutSoi { .. }));
    }

    #[test]
    fn rejects_moon_of_moon() {
        let err = BodyCostRegistry::new(
            home(),
            vec![
                body("mun", Some("kerbin"), &[1.0, 2.0, 3.0, 4.0]),
                body("pebble", Some("mun"), &[1.0, 2.0, 3.0]),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, InvalidDataError::NestedMoon { .. }));
    }

    #[test]
    fn rejects_duplicates_and_bad_names() {
        let dup = BodyCostRegistry::new(home(), vec![body("kerbin", None, &[1.0, 2.0, 3.0])]);
        assert_eq!(dup.unwrap_err(), InvalidDataError::Duplicate("kerbin".into()));

        let twice = BodyCostRegistry::new(
            home(),
            vec![
                body("mun", None, &[1.0, 2.0, 3.0]),
                body("mun", None, &[1.0, 2.0, 3.0]),
            ],
        );
        assert_eq!(twice.unwrap_err(), InvalidDataError::Duplicate("mun".into()));

        let upper = BodyCostRegistry::new(home(), vec![body("Mun", None, &[1.0, 2.0, 3.0])]);
        assert_eq!(upper.unwrap_err(), InvalidDataError::InvalidName("Mun".into()));
    }

    #[test]
    fn rejects_non_finite_costs() {
        let err = BodyCostRegistry::new(home(), vec![body("mun", None, &[1.0, f64::NAN, 3.0])])
            .unwrap_err();
        assert_eq!(err, InvalidDataError::NonFinite("mun".into()));
    }

    #[test]
    fn rejects_invalid_home_name() {
        let mut h = home();
        h.name = "Kerbin".into();
        let err = BodyCostRegistry::new(h, vec![]).unwrap_err();
        assert_eq!(err, InvalidDataError::InvalidName("Kerbin".into()));

        let mut blank = home();
        blank.name = String::new();
        let err = BodyCostRegistry::new(blank, vec![]).unwrap_err();
        assert_eq!(err, InvalidDataError::InvalidName(String::new()));
    }

    #[test]
    fn rejects_non_finite_home_costs() {
        let mut h = home();
        h.costs[2] = f64::INFINITY;
        let err = BodyCostRegistry::new(h, vec![]).unwrap_err();
        assert_eq!(err, InvalidDataError::NonFinite("kerbin".into()));
    }

    #[test]
    fn categories_follow_parent_mapping() {
        let registry = BodyCostRegistry::new(
            home(),
            vec![
                body("mun", Some("kerbin"), &[860.0, 310.0, 580.0]),
                body("duna", None, &[130.0, 250.0, 360.0, 1450.0]),
                body("ike", Some("duna"), &[30.0, 180.0, 390.0]),
            ],
        )
        .unwrap();
        assert_eq!(registry.category("kerbin"), Ok(BodyCategory::Home));
        assert_eq!(registry.category("mun"), Ok(BodyCategory::HomeMoon));
        assert_eq!(registry.category("duna"), Ok(BodyCategory::TopLevel));
        assert_eq!(
            registry.category("ike"),
            Ok(BodyCategory::PlanetMoon { parent: "duna" })
        );
        assert_eq!(
            registry.category("vall"),
            Err(UnknownBodyError("vall".into()))
        );
        assert_eq!(registry.moons_of("duna").collect::<Vec<_>>(), vec!["ike"]);
        assert_eq!(
            registry.names().collect::<Vec<_>>(),
            vec!["kerbin", "duna", "ike", "mun"]
        );
    }

    #[test]
    fn home_is_not_returned_by_get() {
        let registry = BodyCostRegistry::new(home(), vec![]).unwrap();
        assert_eq!(
            registry.get("kerbin"),
            Err(UnknownBodyError("kerbin".into()))
        );
        assert!(registry.contains("kerbin"));
        assert!(registry.is_empty());
    }
}
