use serde::{Deserialize, Serialize};

/// Tipos de resíduo aceptados por caminhões y pontos de coleta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResidueType {
    Plastic,
    Paper,
    Metal,
    Glass,
    Organic,
}

impl ResidueType {
    /// Lista canónica; el orden define la posición de cada checkbox
    pub const ALL: [ResidueType; 5] = [
        ResidueType::Plastic,
        ResidueType::Paper,
        ResidueType::Metal,
        ResidueType::Glass,
        ResidueType::Organic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResidueType::Plastic => "PLASTIC",
            ResidueType::Paper => "PAPER",
            ResidueType::Metal => "METAL",
            ResidueType::Glass => "GLASS",
            ResidueType::Organic => "ORGANIC",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|residue| residue.as_str().eq_ignore_ascii_case(raw.trim()))
    }
}

/// Un booleano por tipo canónico, marcado si está en `selected`
pub fn build_checkboxes(selected: &[ResidueType]) -> Vec<bool> {
    ResidueType::ALL
        .iter()
        .map(|residue| selected.contains(residue))
        .collect()
}

/// Orden canónico sin repetidos (el que produce el formulario)
pub fn canonical_order(residues: &[ResidueType]) -> Vec<ResidueType> {
    selected_from_checkboxes(&build_checkboxes(residues))
}

/// Inversa de `build_checkboxes`: posición marcada -> tipo canónico
pub fn selected_from_checkboxes(checks: &[bool]) -> Vec<ResidueType> {
    checks
        .iter()
        .zip(ResidueType::ALL.iter())
        .filter(|(checked, _)| **checked)
        .map(|(_, residue)| *residue)
        .collect()
}
