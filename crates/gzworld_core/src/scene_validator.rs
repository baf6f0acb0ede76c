//! World validation
//!
//! Checks worlds and templates for problems that still produce a document
//! but not a sensible simulation: duplicate model names, malformed shapes in
//! templates, unreasonable gravity and non-positive physics step settings.

use std::collections::HashSet;

use gzworld_math::Vec3;
use thiserror::Error;

use crate::scene::WorldTemplate;
use crate::settings::WorldSettings;
use crate::world::World;

/// Largest gravity component accepted without complaint (m/s^2)
const MAX_GRAVITY: f64 = 1000.0;

/// Validation problem found in a world or template
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Two shapes share a model name
    #[error("Duplicate model name: '{0}'")]
    DuplicateName(String),
    /// A template shape whose dimensions cannot describe a solid
    #[error("Shape '{name}' is malformed: {reason}")]
    MalformedShape { name: String, reason: String },
    /// A gravity component is non-finite or its magnitude exceeds 1000
    #[error("Unreasonable gravity: {0} (component abs > 1000)")]
    UnreasonableGravity(Vec3),
    /// Physics step size or update rate is not positive
    #[error("Invalid physics timing: step {step}, update rate {rate}")]
    InvalidPhysicsTiming { step: f64, rate: f64 },
}

/// Static checks over worlds and templates
///
/// # Example
/// ```ignore
/// for error in WorldValidator::validate(&world) {
///     log::warn!("{}", error);
/// }
/// ```
pub struct WorldValidator;

impl WorldValidator {
    /// Validate a world, returning all errors found
    pub fn validate(world: &World) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        check_duplicates(world.iter().map(|s| s.name()), &mut errors);
        check_settings(world.settings(), &mut errors);
        errors
    }

    /// Validate a template, including shape dimensions
    ///
    /// Unnamed shapes never collide; their names are generated.
    pub fn validate_template(template: &WorldTemplate) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        check_duplicates(
            template.shapes.iter().filter_map(|s| s.name.as_deref()),
            &mut errors,
        );
        for (index, shape) in template.shapes.iter().enumerate() {
            if let Err(err) = shape.shape.validate() {
                let name = shape
                    .name
                    .clone()
                    .unwrap_or_else(|| format!("#{} ({})", index, shape.shape.kind_name()));
                errors.push(ValidationError::MalformedShape { name, reason: err.to_string() });
            }
        }
        check_settings(&template.settings, &mut errors);
        errors
    }

    /// Validate and return Result (Ok if no errors, Err with all errors)
    pub fn validate_or_error(world: &World) -> Result<(), Vec<ValidationError>> {
        let errors = Self::validate(world);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn check_duplicates<'a>(names: impl Iterator<Item = &'a str>, errors: &mut Vec<ValidationError>) {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            errors.push(ValidationError::DuplicateName(name.to_string()));
        }
    }
}

fn check_settings(settings: &WorldSettings, errors: &mut Vec<ValidationError>) {
    let g = settings.gravity;
    if !g.is_finite() || g.to_array().iter().any(|c| c.abs() > MAX_GRAVITY) {
        errors.push(ValidationError::UnreasonableGravity(g));
    }

    let physics = &settings.physics;
    let positive = |v: f64| v > 0.0;
    if !positive(physics.max_step_size) || !positive(physics.real_time_update_rate) {
        errors.push(ValidationError::InvalidPhysicsTiming {
            step: physics.max_step_size,
            rate: physics.real_time_update_rate,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Shape;
    use crate::scene::ShapeTemplate;
    use crate::settings::Physics;
    use crate::shapes::ShapeKind;

    fn make_valid_world() -> World {
        let mut world = World::new("valid");
        world.spawn(ShapeKind::cuboid(1.0, 1.0, 1.0)).unwrap();
        world.spawn(ShapeKind::sphere(1.0)).unwrap();
        world
    }

    #[test]
    fn test_valid_world_returns_no_errors() {
        let errors = WorldValidator::validate(&make_valid_world());
        assert!(errors.is_empty(), "Expected no errors, got: {:?}", errors);
        assert!(WorldValidator::validate_or_error(&make_valid_world()).is_ok());
    }

    #[test]
    fn test_empty_world_is_valid() {
        assert!(WorldValidator::validate(&World::new("empty")).is_empty());
    }

    #[test]
    fn test_duplicate_names_detected() {
        let mut world = World::new("dupes");
        let shape = Shape::named("crate", ShapeKind::cuboid(1.0, 1.0, 1.0)).unwrap();
        world.add(shape.clone());
        world.add(shape);

        let errors = WorldValidator::validate(&world);
        assert_eq!(errors, vec![ValidationError::DuplicateName("crate".to_string())]);
    }

    #[test]
    fn test_unreasonable_gravity_detected() {
        let mut world = make_valid_world();
        world.set_gravity(Vec3::new(0.0, 0.0, -5000.0));
        let errors = WorldValidator::validate(&world);
        assert!(
            errors.contains(&ValidationError::UnreasonableGravity(Vec3::new(0.0, 0.0, -5000.0))),
            "Expected UnreasonableGravity, got: {:?}",
            errors
        );
    }

    #[test]
    fn test_non_finite_gravity_detected() {
        let mut world = make_valid_world();
        world.set_gravity(Vec3::new(f64::NAN, 0.0, -9.8));
        let errors = WorldValidator::validate(&world);
        assert!(errors.iter().any(|e| matches!(e, ValidationError::UnreasonableGravity(_))));
    }

    #[test]
    fn test_invalid_physics_timing() {
        let mut world = make_valid_world();
        world.set_physics(Physics { max_step_size: 0.0, ..Physics::default() });
        let errors = WorldValidator::validate(&world);
        assert!(matches!(
            errors.as_slice(),
            [ValidationError::InvalidPhysicsTiming { .. }]
        ));
    }

    #[test]
    fn test_template_malformed_shape() {
        let mut template = WorldTemplate::new("bad");
        template.add_shape(ShapeTemplate::new(ShapeKind::sphere(1.0)));
        template.add_shape(ShapeTemplate::new(ShapeKind::polygon([(0.0, 0.0), (1.0, 0.0)])));

        let errors = WorldValidator::validate_template(&template);
        assert_eq!(errors.len(), 1);
        match &errors[0] {
            ValidationError::MalformedShape { name, .. } => assert_eq!(name, "#1 (Polygon)"),
            other => panic!("Expected MalformedShape, got {:?}", other),
        }
    }

    #[test]
    fn test_unnamed_template_shapes_dont_trigger_duplicate() {
        let mut template = WorldTemplate::new("unnamed");
        template.add_shape(ShapeTemplate::new(ShapeKind::sphere(1.0)));
        template.add_shape(ShapeTemplate::new(ShapeKind::sphere(2.0)));
        template.add_shape(ShapeTemplate::new(ShapeKind::sphere(3.0)).with_name("a"));
        template.add_shape(ShapeTemplate::new(ShapeKind::sphere(3.0)).with_name("a"));

        let errors = WorldValidator::validate_template(&template);
        assert_eq!(errors, vec![ValidationError::DuplicateName("a".to_string())]);
    }

    #[test]
    fn test_validation_error_display() {
        assert_eq!(
            ValidationError::DuplicateName("foo".to_string()).to_string(),
            "Duplicate model name: 'foo'"
        );
        assert!(ValidationError::UnreasonableGravity(Vec3::new(0.0, 0.0, -5000.0))
            .to_string()
            .contains("0 0 -5000"));
    }
}
