//! Qualitative interpretation scales.
//!
//! Each scale maps a numeric statistic onto ordered categories. The scorer
//! stores the category code as `f64`, with [`UNDEFINED`] when the input is
//! NaN or infinite; the typed accessors on
//! [`MetricSnapshot`](crate::MetricSnapshot) turn codes back into variants.
//!
//! Values above the range a scale was published for fall into its top
//! category.

use std::fmt;

use serde::Serialize;

use crate::utils::is_undefined;

/// Stored code of an undefined interpretation.
pub const UNDEFINED: f64 = -1.0;

/// An ordered category scale.
pub trait Interpretation: Sized + Copy + fmt::Debug + 'static {
    /// Every category, lowest first. `VARIANTS[i].code() == i`.
    const VARIANTS: &'static [Self];

    /// Category of a finite value.
    fn bucket(value: f64) -> Self;

    /// Short description, e.g. `"Substantial"`.
    fn description(self) -> &'static str;

    /// Category of `value`, or `None` if it is NaN or infinite.
    fn from_value(value: f64) -> Option<Self> {
        if is_undefined(value) {
            None
        } else {
            Some(Self::bucket(value))
        }
    }

    /// Integer code (position in [`Self::VARIANTS`]).
    fn code(self) -> i8;

    /// Category of a stored code, or `None` for [`UNDEFINED`] and unknown codes.
    fn from_code(code: f64) -> Option<Self> {
        if code < 0.0 || code.fract() != 0.0 {
            return None;
        }
        Self::VARIANTS.get(code as usize).copied()
    }
}

/// Stored code of `value` on scale `I`.
pub fn encode<I: Interpretation>(value: f64) -> f64 {
    I::from_value(value).map_or(UNDEFINED, |c| f64::from(c.code()))
}

macro_rules! scale {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $desc:literal),+ $(,)? }
        bucket($v:ident) $bucket:block
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        pub enum $name {
            $($variant),+
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(Interpretation::description(*self))
            }
        }

        impl Interpretation for $name {
            const VARIANTS: &'static [Self] = &[$($name::$variant),+];

            fn bucket($v: f64) -> Self $bucket

            fn description(self) -> &'static str {
                match self {
                    $($name::$variant => $desc),+
                }
            }

            fn code(self) -> i8 {
                self as i8
            }
        }
    };
}

scale! {
    /// Landis & Koch benchmark for kappa.
    LandisKoch {
        Poor => "Poor",
        Slight => "Slight",
        Fair => "Fair",
        Moderate => "Moderate",
        Substantial => "Substantial",
        AlmostPerfect => "Almost Perfect",
    }
    bucket(v) {
        match v {
            v if v < 0.0 => Self::Poor,
            v if v < 0.2 => Self::Slight,
            v if v < 0.4 => Self::Fair,
            v if v < 0.6 => Self::Moderate,
            v if v < 0.8 => Self::Substantial,
            _ => Self::AlmostPerfect,
        }
    }
}

scale! {
    /// Fleiss benchmark for kappa.
    Fleiss {
        Poor => "Poor",
        IntermediateToGood => "Intermediate to Good",
        Excellent => "Excellent",
    }
    bucket(v) {
        match v {
            v if v < 0.4 => Self::Poor,
            v if v < 0.75 => Self::IntermediateToGood,
            _ => Self::Excellent,
        }
    }
}

scale! {
    /// Altman benchmark for kappa.
    Altman {
        Poor => "Poor",
        Fair => "Fair",
        Moderate => "Moderate",
        Good => "Good",
        VeryGood => "Very Good",
    }
    bucket(v) {
        match v {
            v if v < 0.2 => Self::Poor,
            v if v < 0.4 => Self::Fair,
            v if v < 0.6 => Self::Moderate,
            v if v < 0.8 => Self::Good,
            _ => Self::VeryGood,
        }
    }
}

scale! {
    /// Cicchetti benchmark for kappa.
    Cicchetti {
        Poor => "Poor",
        Fair => "Fair",
        Good => "Good",
        Excellent => "Excellent",
    }
    bucket(v) {
        match v {
            v if v < 0.4 => Self::Poor,
            v if v < 0.59 => Self::Fair,
            v if v < 0.74 => Self::Good,
            _ => Self::Excellent,
        }
    }
}

scale! {
    /// Strength of association for Cramér's V.
    CramerStrength {
        Negligible => "Negligible",
        Weak => "Weak",
        Moderate => "Moderate",
        RelativelyStrong => "Relatively Strong",
        Strong => "Strong",
        VeryStrong => "Very Strong",
    }
    bucket(v) {
        match v {
            v if v < 0.1 => Self::Negligible,
            v if v < 0.2 => Self::Weak,
            v if v < 0.4 => Self::Moderate,
            v if v < 0.6 => Self::RelativelyStrong,
            v if v < 0.8 => Self::Strong,
            _ => Self::VeryStrong,
        }
    }
}

scale! {
    /// Strength of a Matthews correlation coefficient (per class and overall).
    MatthewsStrength {
        Negligible => "Negligible",
        Weak => "Weak",
        Moderate => "Moderate",
        Strong => "Strong",
        VeryStrong => "Very Strong",
    }
    bucket(v) {
        match v {
            v if v < 0.3 => Self::Negligible,
            v if v < 0.5 => Self::Weak,
            v if v < 0.7 => Self::Moderate,
            v if v < 0.9 => Self::Strong,
            _ => Self::VeryStrong,
        }
    }
}

scale! {
    /// Usefulness of a positive likelihood ratio.
    LikelihoodRatioStrength {
        Negligible => "Negligible",
        Poor => "Poor",
        Fair => "Fair",
        Good => "Good",
    }
    bucket(v) {
        match v {
            v if v < 1.0 => Self::Negligible,
            v if v < 5.0 => Self::Poor,
            v if v < 10.0 => Self::Fair,
            _ => Self::Good,
        }
    }
}

scale! {
    /// Usefulness of a negative likelihood ratio. Smaller ratios are better.
    NegativeLikelihoodStrength {
        Negligible => "Negligible",
        Poor => "Poor",
        Fair => "Fair",
        Good => "Good",
    }
    bucket(v) {
        match v {
            v if v < 0.1 => Self::Good,
            v if v < 0.2 => Self::Fair,
            v if v < 0.5 => Self::Poor,
            _ => Self::Negligible,
        }
    }
}

scale! {
    /// Discriminant power quality.
    DiscriminantPower {
        Poor => "Poor",
        Limited => "Limited",
        Fair => "Fair",
        Good => "Good",
    }
    bucket(v) {
        match v {
            v if v < 1.0 => Self::Poor,
            v if v < 2.0 => Self::Limited,
            v if v < 3.0 => Self::Fair,
            _ => Self::Good,
        }
    }
}

scale! {
    /// Quality of a single-threshold AUC.
    AucQuality {
        Poor => "Poor",
        Fair => "Fair",
        Good => "Good",
        VeryGood => "Very Good",
    }
    bucket(v) {
        match v {
            v if v < 0.6 => Self::Poor,
            v if v < 0.7 => Self::Fair,
            v if v < 0.8 => Self::Good,
            _ => Self::VeryGood,
        }
    }
}
