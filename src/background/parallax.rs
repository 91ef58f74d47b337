// Pointer parallax for the decorative `.shape` elements. Shape `i` drifts by
// `(i + 1) * 0.5` percent per unit of pointer travel across the viewport.

/// Percentage offset for shape `index` given the pointer position as a
/// fraction of the viewport on each axis.
pub fn shape_offset(index: usize, x_frac: f64, y_frac: f64) -> (f64, f64) {
    let speed = (index as f64 + 1.0) * 0.5;
    (x_frac * speed, y_frac * speed)
}

/// CSS `transform` value for shape `index`.
pub fn shape_transform(index: usize, x_frac: f64, y_frac: f64) -> String {
    let (dx, dy) = shape_offset(index, x_frac, y_frac);
    format!("translate({}%, {}%)", dx, dy)
}

/// Pointer position as viewport fractions. A zero-sized viewport maps to the origin.
pub fn pointer_fraction(client_x: f64, client_y: f64, width: f64, height: f64) -> (f64, f64) {
    let fx = if width > 0.0 { client_x / width } else { 0.0 };
    let fy = if height > 0.0 { client_y / height } else { 0.0 };
    (fx, fy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_scales_with_index() {
        assert_eq!(shape_offset(0, 1.0, 0.5), (0.5, 0.25));
        assert_eq!(shape_offset(1, 1.0, 0.5), (1.0, 0.5));
        assert_eq!(shape_offset(3, 1.0, 0.5), (2.0, 1.0));
    }

    #[test]
    fn test_transform_string() {
        assert_eq!(shape_transform(1, 0.5, 0.25), "translate(0.5%, 0.25%)");
    }

    #[test]
    fn test_pointer_fraction() {
        assert_eq!(pointer_fraction(200.0, 150.0, 800.0, 600.0), (0.25, 0.25));
        assert_eq!(pointer_fraction(10.0, 10.0, 0.0, 0.0), (0.0, 0.0));
    }
}
