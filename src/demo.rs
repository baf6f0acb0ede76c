//! The demonstration world and the stock mesh models

use std::path::PathBuf;

use gzworld_core::{Color, ModelLibrary, Shape, ShapeKind, Vec3, World, WorldResult};

use crate::config::AppConfig;

/// Build the demonstration world from configuration
///
/// A box, a sphere, a cylinder and a rectangle on the ground plane, plus a
/// mesh-backed cone and ellipsoid.
pub fn demo_world(config: &AppConfig) -> WorldResult<World> {
    let mut world = World::new(config.world.name.clone())
        .with_settings(config.world.settings.clone())
        .with_model_root(config.output.model_root.clone())
        .with_author(config.author.clone());

    let names = world.names_mut();
    let shapes = [
        Shape::new(ShapeKind::cuboid(1.0, 1.0, 1.0), names)?.at(1.0, 1.0, 1.0),
        Shape::new(ShapeKind::sphere(0.5), names)?.at(2.0, 2.0, 0.5),
        Shape::new(ShapeKind::cylinder(0.3, 1.0), names)?.at(3.0, 3.0, 0.5),
        Shape::new(ShapeKind::rectangle(2.0, 1.0), names)?.at(4.0, 4.0, 0.1),
        Shape::new(ShapeKind::cone(0.5, 1.0), names)?
            .at(5.0, 0.0, 0.0)
            .with_color(Color::RED),
        Shape::new(ShapeKind::ellipsoid(0.6, 0.4, 0.3), names)?
            .at(0.0, 5.0, 0.3)
            .with_color(Color::BLUE),
    ];
    for shape in shapes {
        world.add(shape);
    }
    Ok(world)
}

/// Write the four stock models into the configured model root
///
/// Returns the mesh URIs in creation order.
pub fn generate_stock_models(config: &AppConfig) -> WorldResult<Vec<String>> {
    let library = ModelLibrary::new(config.output.model_root.clone())
        .with_author(config.author.clone());
    Ok(vec![
        library.create_ellipsoid("ellipsoid", 1.0, 1.0, 1.0, Vec3::ONE, Color::WHITE)?,
        library.create_tetrahedron("tetrahedron", 1.0, 1.0, 1.0, Vec3::ONE, Color::WHITE)?,
        library.create_square_pyramid("square_pyramid", 1.0, 1.0, 1.0, Vec3::ONE, Color::WHITE)?,
        library.create_cone("cone", 1.0, 1.0, Vec3::ONE, Color::WHITE)?,
    ])
}

/// Write everything the configuration asks for, returning the document path
pub fn run(config: &AppConfig) -> WorldResult<PathBuf> {
    if config.output.generate_stock_models {
        let uris = generate_stock_models(config)?;
        log::info!(
            "Generated {} stock models in {}",
            uris.len(),
            config.output.model_root.display()
        );
    }
    demo_world(config)?.save(&config.output.world_file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_world_shapes() {
        let world = demo_world(&AppConfig::default()).unwrap();
        let names: Vec<&str> = world.iter().map(|s| s.name()).collect();
        assert_eq!(
            names,
            vec!["Box_0", "Sphere_1", "Cylinder_2", "Rectangle_3", "Cone_4", "Ellipsoid_5"]
        );
    }

    #[test]
    fn test_demo_world_poses() {
        let world = demo_world(&AppConfig::default()).unwrap();
        assert_eq!(world.get_by_name("Sphere_1").unwrap().pose().to_string(), "2 2 0.5 0 0 0");
        assert_eq!(
            world.get_by_name("Rectangle_3").unwrap().pose().to_string(),
            "4 4 0.1 0 0 0"
        );
    }
}
