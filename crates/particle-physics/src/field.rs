//! Field descriptors: the (tension, dispersal) pair behind each force law

/// Parameters of one radial force law.
///
/// Both values are non-negative; negative writes are ignored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Field {
    name: &'static str,
    tension: f64,
    dispersal: f64,
}

impl Field {
    /// Create a named field. Negative inputs fall back to the defaults.
    pub fn new(name: &'static str, tension: f64, dispersal: f64) -> Self {
        let mut field = Self {
            name,
            ..Self::default()
        };
        field.set_tension(tension);
        field.set_dispersal(dispersal);
        field
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Force strength
    pub fn tension(&self) -> f64 {
        self.tension
    }

    pub fn set_tension(&mut self, tension: f64) {
        if tension >= 0.0 {
            self.tension = tension;
        }
    }

    /// Spatial range; the force vanishes beyond `π * dispersal`
    pub fn dispersal(&self) -> f64 {
        self.dispersal
    }

    pub fn set_dispersal(&mut self, dispersal: f64) {
        if dispersal >= 0.0 {
            self.dispersal = dispersal;
        }
    }
}

impl Default for Field {
    fn default() -> Self {
        Self {
            name: "",
            tension: 1.0,
            dispersal: 1.0,
        }
    }
}
