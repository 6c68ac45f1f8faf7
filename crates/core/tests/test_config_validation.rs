use gridspace::{
    GridConfig, GridPlane, HexGrid, HexGridConfig, SquareGrid, SquareGrid2D,
    SquareGridConfig,
};
use nalgebra::{Point3, Vector3};
use validator::ValidationErrors;

/// Pull the names of all fields that failed validation out of an error
fn error_fields(err: anyhow::Error) -> Vec<String> {
    let validation_errors = err.downcast::<ValidationErrors>().unwrap();
    let mut fields = validation_errors
        .errors()
        .keys()
        .map(|key| key.to_string())
        .collect::<Vec<String>>();
    fields.sort_unstable();
    fields
}

#[test]
fn test_square_config_validation() {
    let config = SquareGridConfig {
        grid: GridConfig {
            width: 0,       // invalid
            height: 100001, // invalid
            anchor: Point3::new(-5.0, 0.0, 5.0),
        },
        plane: GridPlane::Xz,
        cell_size: Vector3::new(1.0, -1.0, 1.0), // invalid (negative)
    };

    // This is a bit of a lazy check but it works well enough
    let err = SquareGrid::<u8>::from_config(&config).unwrap_err();
    assert_eq!(error_fields(err), vec!["cell_size", "grid"]);
}

#[test]
fn test_square_config_plane_validation() {
    // Zero along Z is fine for a screen-plane grid, but not for the ground
    let config = SquareGridConfig {
        plane: GridPlane::Xz,
        cell_size: Vector3::new(1.0, 1.0, 0.0),
        ..Default::default()
    };
    let err = SquareGrid::<u8>::from_config(&config).unwrap_err();
    assert_eq!(error_fields(err), vec!["__all__"]);

    let config = SquareGridConfig {
        plane: GridPlane::Xy,
        ..config
    };
    let grid = SquareGrid2D::<u8>::from_config(&config).unwrap();
    assert_eq!(grid.cell_size(), Vector3::new(1.0, 1.0, 0.0));
}

#[test]
fn test_hex_config_validation() {
    for radius in &[0.0, -2.0, f64::NAN, f64::INFINITY] {
        let config = HexGridConfig {
            radius: *radius,
            ..Default::default()
        };
        let err = HexGrid::<u8>::from_config(&config).unwrap_err();
        assert_eq!(error_fields(err), vec!["radius"], "radius {}", radius);
    }
}

#[test]
fn test_config_deserialize_defaults() {
    // Missing fields fall back to defaults
    let config: HexGridConfig =
        serde_json::from_str(r#"{"grid": {"width": 4}, "radius": 0.5}"#)
            .unwrap();
    assert_eq!(config.grid.width, 4);
    assert_eq!(config.grid.height, 10);
    assert_eq!(config.grid.anchor, Point3::origin());

    let grid = HexGrid::<u8>::from_config(&config).unwrap();
    assert_eq!(grid.grid().len(), 40);

    let config: SquareGridConfig =
        serde_json::from_str(r#"{"plane": "xy", "cell_size": [2.0, 2.0, 0.0]}"#)
            .unwrap();
    assert_eq!(config.plane, GridPlane::Xy);
    assert!(SquareGrid2D::<u8>::from_config(&config).is_ok());
}
