//! Relative draw of individual itinerary locations.
//!
//! Multipliers compare a location against an unweighted baseline of `1.0`.
//! Unknown identifiers resolve to the baseline rather than an error.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::TableError;

/// Multiplier for locations absent from the table and for dashboard mode.
pub const BASELINE_POPULARITY: f32 = 1.0;

/// Authored multipliers for the trip's stops.
const AUTHORED_LOCATIONS: [(&str, f32); 8] = [
    ("guandu-temple", 1.3),
    ("tamsui-old-street", 1.2),
    ("yangmingshan", 1.2),
    ("sanzhi-flower-sea", 1.1),
    ("fishermans-wharf", 1.0),
    ("beitou-hot-springs", 0.9),
    ("chef-banquet", 0.6),
    ("forest-bath", 0.5),
];

/// Location multipliers keyed by identifier.
///
/// # Examples
/// ```
/// use crowdcast_core::LocationPopularity;
///
/// let popularity = LocationPopularity::default();
/// assert_eq!(popularity.multiplier(Some("guandu-temple")), 1.3);
/// assert_eq!(popularity.multiplier(Some("unlisted")), 1.0);
/// assert_eq!(popularity.multiplier(None), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, f32>", into = "BTreeMap<String, f32>")]
pub struct LocationPopularity {
    weights: BTreeMap<String, f32>,
}

impl LocationPopularity {
    /// Validate and build a popularity table.
    ///
    /// # Errors
    /// Returns [`TableError::NonPositivePopularity`] when a multiplier is
    /// zero, negative or not finite, and [`TableError::DuplicateLocation`]
    /// when an identifier repeats.
    pub fn new<I, K>(weights: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = (K, f32)>,
        K: Into<String>,
    {
        let mut table = BTreeMap::new();
        for (key, weight) in weights {
            let location = key.into();
            if !weight.is_finite() || weight <= 0.0 {
                return Err(TableError::NonPositivePopularity { location, weight });
            }
            if table.contains_key(&location) {
                return Err(TableError::DuplicateLocation { location });
            }
            table.insert(location, weight);
        }
        Ok(Self { weights: table })
    }

    /// Return the listed multiplier for `location`, if any.
    #[must_use]
    pub fn get(&self, location: &str) -> Option<f32> {
        self.weights.get(location).copied()
    }

    /// Return the multiplier for an optional location.
    ///
    /// Omitted and unknown locations both yield [`BASELINE_POPULARITY`].
    #[must_use]
    pub fn multiplier(&self, location: Option<&str>) -> f32 {
        location
            .and_then(|id| self.get(id))
            .unwrap_or(BASELINE_POPULARITY)
    }

    /// Iterate over location identifiers in lexical order.
    pub fn locations(&self) -> impl Iterator<Item = &str> {
        self.weights.keys().map(String::as_str)
    }

    /// Number of listed locations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Report whether no locations are listed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

impl Default for LocationPopularity {
    fn default() -> Self {
        let weights = AUTHORED_LOCATIONS
            .iter()
            .map(|&(id, weight)| (id.to_owned(), weight))
            .collect();
        Self { weights }
    }
}

impl TryFrom<BTreeMap<String, f32>> for LocationPopularity {
    type Error = TableError;

    fn try_from(weights: BTreeMap<String, f32>) -> Result<Self, Self::Error> {
        Self::new(weights)
    }
}

impl From<LocationPopularity> for BTreeMap<String, f32> {
    fn from(popularity: LocationPopularity) -> Self {
        popularity.weights
    }
}
