//! The fixed set of zone labels rides start and end in.
//!
//! Zones are opaque labels: there is no geometry, adjacency or distance
//! between them.  A [`ZoneSet`] is validated on construction (at least two
//! distinct, non-empty labels) so the spatial sampler can always satisfy
//! `pickup != drop`.

use std::collections::HashSet;

use crate::{RhError, RhResult, ZoneId};

/// Default Bengaluru neighbourhoods.
pub const DEFAULT_ZONES: [&str; 15] = [
    "Whitefield",
    "Koramangala",
    "Indiranagar",
    "BTM Layout",
    "Electronic City",
    "Marathahalli",
    "MG Road",
    "Jayanagar",
    "Hebbal",
    "Yelahanka",
    "Rajajinagar",
    "Malleshwaram",
    "Banashankari",
    "HSR Layout",
    "KR Puram",
];

/// Ordered, validated zone labels.  `ZoneId(i)` names `labels[i]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ZoneSet {
    labels: Vec<String>,
}

impl ZoneSet {
    pub fn new<I, S>(labels: I) -> RhResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();

        if labels.len() < 2 {
            return Err(RhError::Config(format!(
                "zone set needs at least 2 zones, got {}",
                labels.len()
            )));
        }
        if labels.len() > u16::MAX as usize {
            return Err(RhError::Config(format!("too many zones: {}", labels.len())));
        }

        let mut seen = HashSet::with_capacity(labels.len());
        for label in &labels {
            if label.trim().is_empty() {
                return Err(RhError::Config("zone labels must not be empty".into()));
            }
            if !seen.insert(label.as_str()) {
                return Err(RhError::Config(format!("duplicate zone label {label:?}")));
            }
        }

        Ok(Self { labels })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Always `false` for a validated set; provided for API symmetry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Label for `zone`, or `None` if the id is out of range.
    #[inline]
    pub fn label(&self, zone: ZoneId) -> Option<&str> {
        self.labels.get(zone.index()).map(String::as_str)
    }

    /// Look a label up by name.
    pub fn id_of(&self, label: &str) -> Option<ZoneId> {
        self.labels
            .iter()
            .position(|l| l == label)
            .map(|i| ZoneId(i as u16))
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

impl Default for ZoneSet {
    fn default() -> Self {
        Self {
            labels: DEFAULT_ZONES.iter().map(|s| s.to_string()).collect(),
        }
    }
}
