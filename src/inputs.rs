use std::fmt;

use serde::{Deserialize, Serialize};

/// One crisp input triple, each value on the 0..=10 severity scale.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Inputs {
    pub damage: f64,
    pub accessibility: f64,
    pub population: f64,
}

impl Inputs {
    pub fn new(damage: f64, accessibility: f64, population: f64) -> Self {
        Inputs {
            damage,
            accessibility,
            population,
        }
    }

    pub(crate) fn as_array(&self) -> [f64; 3] {
        [self.damage, self.accessibility, self.population]
    }
}

impl fmt::Display for Inputs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "damage={}, accessibility={}, population={}",
            self.damage, self.accessibility, self.population
        )
    }
}
