use std::fmt;
use std::iter::Sum;
use std::str::FromStr;

use num::Float;

use crate::error::Error;

/// And operator method for combining the antecedents of a rule.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AndOp {
    #[default]
    Min,
    Prod,
}

impl AndOp {
    #[inline]
    pub fn call<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Min => F::min(u, v),
            Self::Prod => u * v,
        }
    }
}

/// Or operator method, used to aggregate rules that share a consequence
/// and to merge the clipped output terms.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OrOp {
    #[default]
    Max,
    ProbOr,
    BoundedSum,
}

impl OrOp {
    #[inline]
    pub fn call<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Max => F::max(u, v),
            Self::ProbOr => u + v - u * v,
            Self::BoundedSum => F::min(F::one(), u + v),
        }
    }
}

/// Implication operator method, applies a rule's firing strength to its
/// consequence membership.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ImplicationOp {
    /// Mamdani: clip the consequence at the firing strength
    #[default]
    Min,
    /// Larsen: scale the consequence by the firing strength
    Prod,
}

impl ImplicationOp {
    #[inline]
    pub fn call<F: Float>(self, strength: F, membership: F) -> F {
        match self {
            Self::Min => F::min(strength, membership),
            Self::Prod => strength * membership,
        }
    }
}

/// Method for defuzzifcating the resulting membership function.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DefuzzificationOp {
    /// Discrete centroid: `sum(u * m) / sum(m)` over the sampled universe
    #[default]
    Centroid,
    /// Center of Gravity of the piecewise-linear shape between samples
    Cog,
    /// Bisector of Area
    Boa,
    /// Mean of the values for which the membership function is maximum
    Mom,
    /// Largest value for which the membership function is maximum
    Lom,
    /// Smallest value for which the membership function is maximum
    Som,
}

impl DefuzzificationOp {
    pub const ALL: [Self; 6] = [Self::Centroid, Self::Cog, Self::Boa, Self::Mom, Self::Lom, Self::Som];

    pub fn name(self) -> &'static str {
        match self {
            Self::Centroid => "centroid",
            Self::Cog => "cog",
            Self::Boa => "bisector",
            Self::Mom => "mom",
            Self::Lom => "lom",
            Self::Som => "som",
        }
    }

    /// Collapses `membership`, sampled at `universe`, to one crisp value.
    ///
    /// Returns `None` when the shape is empty (no area, or no positive
    /// membership), instead of producing a NaN.
    pub fn call<F: Float + Sum>(self, universe: &[F], membership: &[F]) -> Option<F> {
        debug_assert_eq!(universe.len(), membership.len());

        let two = F::one() + F::one();

        match self {
            Self::Centroid => {
                let den = membership.iter().copied().sum::<F>();
                let num = universe
                    .iter()
                    .zip(membership)
                    .map(|(u, m)| *u * *m)
                    .sum::<F>();

                (den > F::zero()).then(|| num / den)
            },
            Self::Cog => {
                let three = two + F::one();
                let mut den = F::zero();
                let mut num = F::zero();

                for (u, m) in universe.windows(2).zip(membership.windows(2)) {
                    let base = u[1] - u[0];
                    // Split each segment into a rectangle and a triangle on top of it
                    let area_rect = F::min(m[0], m[1]) * base;
                    let center_rect = u[0] + base / two;
                    let area_tri = base * F::abs(m[1] - m[0]) / two;
                    let center_tri = if m[1] > m[0] {
                        u[0] + two / three * base
                    } else {
                        u[0] + base / three
                    };

                    den = den + area_rect + area_tri;
                    num = num + area_rect * center_rect + area_tri * center_tri;
                }

                (den > F::zero()).then(|| num / den)
            },
            Self::Boa => {
                let areas: Vec<F> = universe
                    .windows(2)
                    .zip(membership.windows(2))
                    .map(|(u, m)| (m[0] + m[1]) * (u[1] - u[0]) / two)
                    .collect();
                let total_area = areas.iter().copied().sum::<F>();

                if total_area <= F::zero() {
                    return None;
                }

                let target = total_area / two;
                let mut cum_area = F::zero();

                for (i, area) in areas.iter().copied().enumerate() {
                    if cum_area + area >= target && area > F::zero() {
                        // Linear in area within the segment, as skfuzzy does
                        let frac = (target - cum_area) / area;

                        return Some(universe[i] + frac * (universe[i + 1] - universe[i]));
                    }
                    cum_area = cum_area + area;
                }

                universe.last().copied()
            },
            Self::Mom | Self::Lom | Self::Som => {
                let maximum = membership.iter().copied().fold(F::zero(), F::max);

                if maximum <= F::zero() {
                    return None;
                }

                let at_max = universe
                    .iter()
                    .zip(membership)
                    .filter_map(|(u, m)| (*m == maximum).then_some(*u));

                match self {
                    Self::Lom => at_max.reduce(F::max),
                    Self::Som => at_max.reduce(F::min),
                    _ => {
                        let (len, sum) = at_max.fold((F::zero(), F::zero()), |(len, sum), u| (len + F::one(), sum + u));

                        Some(sum / len)
                    },
                }
            },
        }
    }
}

impl fmt::Display for DefuzzificationOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DefuzzificationOp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();

        Self::ALL
            .into_iter()
            .find(|op| op.name() == needle)
            .ok_or_else(|| {
                let known: Vec<_> = Self::ALL.iter().map(|op| op.name()).collect();
                Error::config(format!("unknown defuzzification method `{s}`, expected one of {}", known.join(", ")))
            })
    }
}
