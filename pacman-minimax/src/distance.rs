use pacman_types::Position;

/// Straight line distance between two cells, rounded to two decimal places
pub fn distance(a: &Position, b: &Position) -> f64 {
    let dx = f64::from(a.x - b.x);
    let dy = f64::from(a.y - b.y);

    ((dx * dx + dy * dy).sqrt() * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_four_five() {
        assert_eq!(distance(&Position::new(0, 0), &Position::new(3, 4)), 5.00);
    }

    #[test]
    fn test_same_point_is_zero() {
        for p in [Position::new(0, 0), Position::new(7, -3), Position::new(-2, 11)] {
            assert_eq!(distance(&p, &p), 0.00);
        }
    }

    #[test]
    fn test_rounds_to_two_places() {
        assert_eq!(distance(&Position::new(0, 0), &Position::new(1, 1)), 1.41);
        assert_eq!(distance(&Position::new(1, 2), &Position::new(3, 3)), 2.24);
    }

    #[test]
    fn test_is_symmetric() {
        let a = Position::new(2, 9);
        let b = Position::new(-4, 1);

        assert_eq!(distance(&a, &b), distance(&b, &a));
    }
}
