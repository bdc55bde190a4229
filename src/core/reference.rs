use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use smallvec::SmallVec;
use tracing::debug;

use crate::error::{GazeError, GazeResult};

/// Population aggregate views a reference-statistics object may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReferenceView {
    Means,
    Medians,
    UpperQuantile,
    LowerQuantile,
}

impl ReferenceView {
    pub const ALL: [Self; 4] = [
        Self::Means,
        Self::Medians,
        Self::UpperQuantile,
        Self::LowerQuantile,
    ];

    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Means => "means",
            Self::Medians => "medians",
            Self::UpperQuantile => "upperQuantile",
            Self::LowerQuantile => "lowerQuantile",
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|view| view.key() == key)
    }
}

/// Resolved reference views; absent views stay `None` and are omitted when
/// serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct References<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub means: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medians: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper_quantile: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lower_quantile: Option<T>,
}

impl<T> Default for References<T> {
    fn default() -> Self {
        Self {
            means: None,
            medians: None,
            upper_quantile: None,
            lower_quantile: None,
        }
    }
}

impl<T> References<T> {
    #[must_use]
    pub fn get(&self, view: ReferenceView) -> Option<&T> {
        match view {
            ReferenceView::Means => self.means.as_ref(),
            ReferenceView::Medians => self.medians.as_ref(),
            ReferenceView::UpperQuantile => self.upper_quantile.as_ref(),
            ReferenceView::LowerQuantile => self.lower_quantile.as_ref(),
        }
    }

    fn slot_mut(&mut self, view: ReferenceView) -> &mut Option<T> {
        match view {
            ReferenceView::Means => &mut self.means,
            ReferenceView::Medians => &mut self.medians,
            ReferenceView::UpperQuantile => &mut self.upper_quantile,
            ReferenceView::LowerQuantile => &mut self.lower_quantile,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        ReferenceView::ALL
            .into_iter()
            .all(|view| self.get(view).is_none())
    }

    /// Present views in `ReferenceView::ALL` order.
    pub fn iter(&self) -> impl Iterator<Item = (ReferenceView, &T)> {
        ReferenceView::ALL
            .into_iter()
            .filter_map(|view| self.get(view).map(|value| (view, value)))
    }
}

/// Leaf of a reference-statistics path.
#[derive(Debug, Clone, PartialEq)]
pub enum ReferenceValue {
    /// Per-bin values, index-aligned with a binned series.
    Series(Vec<f64>),
    /// Values keyed by compass angle in degrees.
    Angles(IndexMap<OrderedFloat<f64>, f64>),
}

impl ReferenceValue {
    #[must_use]
    pub fn as_series(&self) -> Option<&[f64]> {
        match self {
            Self::Series(values) => Some(values),
            Self::Angles(_) => None,
        }
    }

    #[must_use]
    pub fn as_angles(&self) -> Option<&IndexMap<OrderedFloat<f64>, f64>> {
        match self {
            Self::Angles(values) => Some(values),
            Self::Series(_) => None,
        }
    }

    fn from_leaf(leaf: &Value, path: &str) -> GazeResult<Self> {
        let malformed = || {
            GazeError::InvalidData(format!(
                "reference `{path}` must be a number array or an angle map"
            ))
        };

        match leaf {
            Value::Array(items) => items
                .iter()
                .map(|item| item.as_f64().ok_or_else(malformed))
                .collect::<GazeResult<Vec<_>>>()
                .map(Self::Series),
            Value::Object(entries) => entries
                .iter()
                .map(|(key, item)| {
                    let angle = key.trim().parse::<f64>().map_err(|_| malformed())?;
                    let value = item.as_f64().ok_or_else(malformed)?;
                    Ok((OrderedFloat(angle), value))
                })
                .collect::<GazeResult<IndexMap<_, _>>>()
                .map(Self::Angles),
            _ => Err(malformed()),
        }
    }
}

/// Resolves a dot-separated path against every view present in `stats`.
///
/// Views that are missing, or that lack the path, are left out. A path whose
/// first segment names a view (`means.forward`) is resolved against that view
/// only.
pub fn resolve_reference(stats: &Value, path: &str) -> GazeResult<References<ReferenceValue>> {
    let segments: SmallVec<[&str; 4]> = path
        .split('.')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect();
    let Some((&head, tail)) = segments.split_first() else {
        return Err(GazeError::InvalidData(
            "reference path must not be empty".to_owned(),
        ));
    };

    let (views, relative): (SmallVec<[ReferenceView; 4]>, &[&str]) =
        match ReferenceView::from_key(head) {
            Some(view) if !tail.is_empty() => (SmallVec::from_slice(&[view]), tail),
            _ => (SmallVec::from_slice(&ReferenceView::ALL), &segments[..]),
        };

    let mut references = References::default();
    for view in views {
        let Some(root) = stats.get(view.key()) else {
            continue;
        };
        let Some(leaf) = lookup(root, relative) else {
            continue;
        };
        *references.slot_mut(view) = Some(ReferenceValue::from_leaf(leaf, path)?);
    }

    debug!(
        path,
        views = references.iter().count(),
        "resolved reference series"
    );
    Ok(references)
}

/// Like `resolve_reference`, but every present leaf must be a plain series.
pub fn resolve_series(stats: &Value, path: &str) -> GazeResult<References<Vec<f64>>> {
    let resolved = resolve_reference(stats, path)?;
    let mut series = References::default();
    for view in ReferenceView::ALL {
        if let Some(value) = resolved.get(view) {
            let values = value.as_series().ok_or_else(|| {
                GazeError::InvalidData(format!("reference `{path}` is not a series"))
            })?;
            *series.slot_mut(view) = Some(values.to_vec());
        }
    }
    Ok(series)
}

fn lookup<'a>(root: &'a Value, segments: &[&str]) -> Option<&'a Value> {
    segments
        .iter()
        .try_fold(root, |node, segment| node.as_object()?.get(*segment))
}
