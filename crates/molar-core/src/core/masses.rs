use phf::phf_map;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Standard atomic weights (IUPAC, abridged) of the elements found in
/// biomolecular structures, keyed by upper-case symbol.
static STANDARD_MASSES: phf::Map<&'static str, f64> = phf_map! {
    "H" => 1.008,
    "D" => 2.014,
    "HE" => 4.0026,
    "LI" => 6.94,
    "B" => 10.81,
    "C" => 12.011,
    "N" => 14.007,
    "O" => 15.999,
    "F" => 18.998,
    "NA" => 22.990,
    "MG" => 24.305,
    "AL" => 26.982,
    "SI" => 28.085,
    "P" => 30.974,
    "S" => 32.06,
    "CL" => 35.45,
    "K" => 39.098,
    "CA" => 40.078,
    "MN" => 54.938,
    "FE" => 55.845,
    "CO" => 58.933,
    "NI" => 58.693,
    "CU" => 63.546,
    "ZN" => 65.38,
    "SE" => 78.971,
    "BR" => 79.904,
    "I" => 126.90,
};

#[derive(Debug, Error)]
pub enum MassTableError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Invalid mass {mass} for element '{element}' (must be finite and non-negative)")]
    InvalidMass { element: String, mass: f64 },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MassFile {
    #[serde(default)]
    masses: HashMap<String, f64>,
}

/// Element → mass lookup used when atoms are loaded.
///
/// The table starts from the built-in standard masses; overrides (from a
/// TOML file or added programmatically) take precedence. Element symbols are
/// matched case-insensitively.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MassTable {
    overrides: HashMap<String, f64>,
}

impl MassTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads overrides from a TOML file of the form
    ///
    /// ```toml
    /// [masses]
    /// D = 2.014
    /// FE = 55.845
    /// ```
    pub fn load(path: &Path) -> Result<Self, MassTableError> {
        let content = std::fs::read_to_string(path).map_err(|e| MassTableError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::from_toml_str(&content).map_err(|e| match e {
            MassTableError::Toml { source, .. } => MassTableError::Toml {
                path: path.to_string_lossy().to_string(),
                source,
            },
            other => other,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, MassTableError> {
        let file: MassFile = toml::from_str(content).map_err(|e| MassTableError::Toml {
            path: "<string>".to_string(),
            source: e,
        })?;
        let mut table = Self::new();
        for (element, mass) in file.masses {
            table = table.with_mass(&element, mass)?;
        }
        Ok(table)
    }

    pub fn with_mass(mut self, element: &str, mass: f64) -> Result<Self, MassTableError> {
        if !mass.is_finite() || mass < 0.0 {
            return Err(MassTableError::InvalidMass {
                element: element.to_string(),
                mass,
            });
        }
        self.overrides.insert(element.to_ascii_uppercase(), mass);
        Ok(self)
    }

    /// Returns the mass of an element, or `None` if it is not known.
    pub fn mass_of(&self, element: &str) -> Option<f64> {
        let key = element.trim().to_ascii_uppercase();
        if key.is_empty() {
            return None;
        }
        self.overrides
            .get(&key)
            .copied()
            .or_else(|| STANDARD_MASSES.get(key.as_str()).copied())
    }

    pub fn is_known(&self, element: &str) -> bool {
        self.mass_of(element).is_some()
    }
}
