//! Delta-v estimates from the home body, built from registry cost segments.
//!
//! Figures are heuristic lower bounds taken from a delta-v map, not the
//! output of a trajectory solver.

use std::cmp::Ordering;

use dvmap_registry::{BodyCategory, BodyCostRegistry, UnknownBodyError};
use log::{debug, trace};
use serde::Serialize;

/// Delta-v split into the legs that make up a trip from the home body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DeltaVBreakdown {
    /// Leaving the home body (or reaching a stable orbit around it).
    pub departure_m_s: f64,
    /// Intercept plus SOI transfer into a parent planet's moon system.
    pub transit_m_s: f64,
    /// The target body's own segments.
    pub target_m_s: f64,
}

impl DeltaVBreakdown {
    pub fn total(&self) -> f64 {
        self.departure_m_s + self.transit_m_s + self.target_m_s
    }
}

/// One row of a delta-v table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyEstimate<'a> {
    pub name: &'a str,
    pub category: BodyCategory<'a>,
    pub breakdown: DeltaVBreakdown,
}

impl BodyEstimate<'_> {
    pub fn delta_v_m_s(&self) -> f64 {
        self.breakdown.total()
    }

    pub fn parent(&self) -> Option<&str> {
        match self.category {
            BodyCategory::PlanetMoon { parent } => Some(parent),
            _ => None,
        }
    }
}

/// Computes delta-v from the home body of an injected registry.
#[derive(Debug, Clone, Copy)]
pub struct DeltaVCalculator<'a> {
    registry: &'a BodyCostRegistry,
}

impl<'a> DeltaVCalculator<'a> {
    pub fn new(registry: &'a BodyCostRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'a BodyCostRegistry {
        self.registry
    }

    /// Minimum delta-v (m/s) to reach `name` from the home body.
    pub fn dv_to(&self, name: &str) -> Result<f64, UnknownBodyError> {
        self.breakdown(name).map(|legs| legs.total())
    }

    /// Per-leg costs whose `total()` is exactly [`dv_to`](Self::dv_to).
    pub fn breakdown(&self, name: &str) -> Result<DeltaVBreakdown, UnknownBodyError> {
        let home = self.registry.home();
        let category = self.registry.category(name)?;
        debug!("classified '{name}' as {}", category.label());

        // Escaping the home body skips its low-to-stable leg.
        let escape = home.sum() - home.low_to_stable();

        let legs = match category {
            BodyCategory::Home => DeltaVBreakdown {
                departure_m_s: home.sum() - home.reserve(),
                transit_m_s: 0.0,
                target_m_s: 0.0,
            },
            BodyCategory::HomeMoon => DeltaVBreakdown {
                departure_m_s: home.ascent(),
                transit_m_s: 0.0,
                target_m_s: self.registry.get(name)?.sum(),
            },
            BodyCategory::PlanetMoon { parent } => {
                let transit = self
                    .registry
                    .get(parent)?
                    .moon_system_entry()
                    .ok_or_else(|| UnknownBodyError(name.to_string()))?;
                DeltaVBreakdown {
                    departure_m_s: escape,
                    transit_m_s: transit,
                    target_m_s: self.registry.get(name)?.sum(),
                }
            }
            BodyCategory::TopLevel => DeltaVBreakdown {
                departure_m_s: escape,
                transit_m_s: 0.0,
                target_m_s: self.registry.get(name)?.sum(),
            },
        };
        trace!(
            "'{name}': departure={} transit={} target={}",
            legs.departure_m_s, legs.transit_m_s, legs.target_m_s
        );
        Ok(legs)
    }

    pub fn estimate(&self, name: &'a str) -> Result<BodyEstimate<'a>, UnknownBodyError> {
        Ok(BodyEstimate {
            name,
            category: self.registry.category(name)?,
            breakdown: self.breakdown(name)?,
        })
    }

    /// Every body, home included, cheapest first (ties broken by name).
    ///
    /// Fails on the first name the registry lists but cannot classify.
    pub fn table(&self) -> Result<Vec<BodyEstimate<'a>>, UnknownBodyError> {
        let mut rows = self
            .registry
            .names()
            .map(|name| self.estimate(name))
            .collect::<Result<Vec<_>, _>>()?;
        rows.sort_by(compare_rows);
        Ok(rows)
    }

    /// Table rows whose delta-v does not exceed `budget_m_s`.
    pub fn reachable_within(
        &self,
        budget_m_s: f64,
    ) -> Result<Vec<BodyEstimate<'a>>, UnknownBodyError> {
        Ok(self
            .table()?
            .into_iter()
            .filter(|row| row.delta_v_m_s() <= budget_m_s)
            .collect())
    }

    /// Extra delta-v needed to reach `to` instead of `from`.
    pub fn compare(&self, from: &str, to: &str) -> Result<f64, UnknownBodyError> {
        Ok(self.dv_to(to)? - self.dv_to(from)?)
    }
}

fn compare_rows(a: &BodyEstimate<'_>, b: &BodyEstimate<'_>) -> Ordering {
    a.delta_v_m_s()
        .total_cmp(&b.delta_v_m_s())
        .then_with(|| a.name.cmp(b.name))
}
