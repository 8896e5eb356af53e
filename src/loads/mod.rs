//! Member load types

mod distributed;
mod point_load;

use serde::{Deserialize, Serialize};

use crate::error::{SDError, SDResult};

pub use distributed::{UniformLoad, VaryingLoad};
pub use point_load::PointLoad;

/// Any load a member can carry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Load {
    Point(PointLoad),
    Uniform(UniformLoad),
    Varying(VaryingLoad),
}

impl Load {
    /// Concentrated load
    pub fn point(magnitude: f64, position: f64) -> Self {
        Load::Point(PointLoad::new(magnitude, position))
    }

    /// Uniform load over `[start, start + span]`
    pub fn uniform(intensity: f64, start: f64, span: f64) -> Self {
        Load::Uniform(UniformLoad::new(intensity, start, span))
    }

    /// Triangular load from zero at `low_position` to `peak` at `high_position`
    pub fn varying(peak: f64, low_position: f64, high_position: f64) -> Self {
        Load::Varying(VaryingLoad::new(peak, low_position, high_position))
    }

    /// Reduce the load to a statically equivalent point load
    pub fn equivalent_point_load(&self) -> PointLoad {
        match self {
            Load::Point(load) => *load,
            Load::Uniform(load) => load.resultant(),
            Load::Varying(load) => load.resultant(),
        }
    }

    /// Extent of the load as `(from, to)` along the member
    pub fn extent(&self) -> (f64, f64) {
        match self {
            Load::Point(load) => (load.position, load.position),
            Load::Uniform(load) => (load.start.min(load.end()), load.start.max(load.end())),
            Load::Varying(load) => (
                load.low_position.min(load.high_position),
                load.low_position.max(load.high_position),
            ),
        }
    }

    /// Check that the load is well formed and lies on a member of the given length
    pub(crate) fn validate(&self, member: &str, length: f64) -> SDResult<()> {
        let values = match self {
            Load::Point(l) => vec![l.magnitude, l.position],
            Load::Uniform(l) => vec![l.intensity, l.start, l.span],
            Load::Varying(l) => vec![l.peak, l.low_position, l.high_position],
        };
        if values.iter().any(|v| !v.is_finite()) {
            return Err(SDError::InvalidInput(format!(
                "load on member '{member}' has non-finite parameters"
            )));
        }

        if let Load::Varying(load) = self {
            if load.low_position == load.high_position {
                return Err(SDError::DegenerateVaryingLoad(load.low_position));
            }
        }

        let (from, to) = self.extent();
        let tolerance = 1e-9 * length.max(1.0);
        for position in [from, to] {
            if position < -tolerance || position > length + tolerance {
                return Err(SDError::LoadOutsideMember {
                    member: member.to_string(),
                    position,
                    length,
                });
            }
        }
        Ok(())
    }
}

impl From<PointLoad> for Load {
    fn from(load: PointLoad) -> Self {
        Load::Point(load)
    }
}

impl From<UniformLoad> for Load {
    fn from(load: UniformLoad) -> Self {
        Load::Uniform(load)
    }
}

impl From<VaryingLoad> for Load {
    fn from(load: VaryingLoad) -> Self {
        Load::Varying(load)
    }
}
