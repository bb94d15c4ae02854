//! Error types for entity construction.
//!
//! Only malformed construction is an error. Removing an entity twice or
//! activating an ability that already fired are silent no-ops and never
//! show up here.

use std::fmt;

/// Errors raised while creating entities.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityError {
    /// A physical parameter was zero, negative or not finite.
    /// The entity is never registered with the physics world.
    InvalidParameters {
        /// Name of the rejected parameter (for logging).
        field: &'static str,
        /// The value that was rejected.
        value: f32,
    },

    /// A species name did not match any known projectile species.
    UnknownSpecies(String),
}

impl fmt::Display for EntityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityError::InvalidParameters { field, value } => {
                write!(f, "invalid entity parameter '{}': {} (out of range)", field, value)
            }
            EntityError::UnknownSpecies(name) => {
                write!(f, "unknown projectile species '{}'", name)
            }
        }
    }
}

impl std::error::Error for EntityError {}

/// Reject non-positive or non-finite physical parameters.
pub(crate) fn ensure_positive(field: &'static str, value: f32) -> Result<f32, EntityError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        log::warn!("Rejected entity parameter {} = {}", field, value);
        Err(EntityError::InvalidParameters { field, value })
    }
}

/// Reject negative or non-finite tuning values (zero is allowed).
pub(crate) fn ensure_non_negative(field: &'static str, value: f32) -> Result<f32, EntityError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        log::warn!("Rejected entity parameter {} = {}", field, value);
        Err(EntityError::InvalidParameters { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_values_pass_through() {
        assert_eq!(ensure_positive("mass", 5.0), Ok(5.0));
    }

    #[test]
    fn zero_negative_and_nan_are_rejected() {
        assert!(ensure_positive("mass", 0.0).is_err());
        assert!(ensure_positive("radius", -1.0).is_err());
        assert!(ensure_positive("radius", f32::NAN).is_err());
        assert!(ensure_positive("radius", f32::INFINITY).is_err());
    }

    #[test]
    fn non_negative_allows_zero() {
        assert_eq!(ensure_non_negative("power_multiplier", 0.0), Ok(0.0));
        assert!(ensure_non_negative("max_impulse", -0.5).is_err());
    }

    #[test]
    fn display_names_the_field() {
        let err = EntityError::InvalidParameters { field: "radius", value: -2.0 };
        assert!(err.to_string().contains("radius"));
        let err = EntityError::UnknownSpecies("Green".into());
        assert_eq!(err.to_string(), "unknown projectile species 'Green'");
    }
}
