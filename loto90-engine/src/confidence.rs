use serde::Serialize;

/// Fiabilité qualitative d'une prédiction, dérivée avant tout de la taille
/// de l'échantillon analysé.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Confidence {
    VeryLow,
    Low,
    Medium,
    High,
}

impl Confidence {
    /// Escalier partagé par toutes les heuristiques.
    pub fn from_sample_size(analyzed_count: usize) -> Self {
        if analyzed_count < 10 {
            Confidence::VeryLow
        } else if analyzed_count < 50 {
            Confidence::Low
        } else if analyzed_count < 200 {
            Confidence::Medium
        } else {
            Confidence::High
        }
    }

    /// Poids appliqué par le combinateur hybride.
    pub fn weight(self) -> f64 {
        match self {
            Confidence::VeryLow => 0.5,
            Confidence::Low => 1.0,
            Confidence::Medium => 1.5,
            Confidence::High => 2.0,
        }
    }

    /// Monte d'un niveau ; Élevée est un plafond.
    pub fn promote(self) -> Self {
        match self {
            Confidence::VeryLow => Confidence::Low,
            Confidence::Low => Confidence::Medium,
            Confidence::Medium | Confidence::High => Confidence::High,
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Confidence::VeryLow => write!(f, "très faible"),
            Confidence::Low => write!(f, "faible"),
            Confidence::Medium => write!(f, "moyenne"),
            Confidence::High => write!(f, "élevée"),
        }
    }
}
