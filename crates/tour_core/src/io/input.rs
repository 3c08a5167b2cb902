use std::{fs, io::Read};

use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::{Error, Point, Result, options::TourOptions};

/// Loads the points to insert, in insertion order: generated when
/// `--random` is set, otherwise read from `--input` or stdin.
pub fn read_points(options: &TourOptions) -> Result<Vec<Point>> {
    if options.random > 0 {
        return Ok(random_points(
            options.random,
            options.width,
            options.height,
            options.seed,
        ));
    }

    let raw = match options.input_path() {
        Some(path) => fs::read_to_string(path).map_err(|e| {
            Error::invalid_input(format!("failed to read input file {}: {e}", path.display()))
        })?,
        None => {
            let mut raw = String::new();
            std::io::stdin().read_to_string(&mut raw)?;
            raw
        }
    };
    parse_points(&raw)
}

pub fn random_points(n: usize, width: f64, height: f64, seed: u64) -> Vec<Point> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let points: Vec<Point> = (0..n)
        .map(|_| Point::new(rng.random::<f64>() * width, rng.random::<f64>() * height))
        .collect();
    log::debug!("input: generated n={n} width={width} height={height} seed={seed}");
    points
}

/// Parses whitespace-separated `x,y` tokens.
pub fn parse_points(input: &str) -> Result<Vec<Point>> {
    let mut points = Vec::new();
    for (idx, tok) in input.split_whitespace().enumerate() {
        let mut it = tok.split(',');
        let x_s = it
            .next()
            .ok_or_else(|| Error::invalid_input(format!("Token {}: missing x", idx + 1)))?;
        let y_s = it
            .next()
            .ok_or_else(|| Error::invalid_input(format!("Token {}: missing y", idx + 1)))?;

        if it.next().is_some() {
            return Err(Error::invalid_input(format!(
                "Token {}: expected 'x,y' but got extra comma fields: {tok}",
                idx + 1
            )));
        }

        let x: f64 = x_s.parse().map_err(|_| {
            Error::invalid_input(format!("Token {}: invalid x: {}", idx + 1, x_s))
        })?;
        let y: f64 = y_s.parse().map_err(|_| {
            Error::invalid_input(format!("Token {}: invalid y: {}", idx + 1, y_s))
        })?;

        let point = Point::new(x, y);
        if !point.is_finite() {
            log::warn!(
                "input: token {} has non-finite coordinates {point}; tour length will not be finite",
                idx + 1
            );
        }
        points.push(point);
    }

    if points.is_empty() {
        return Err(Error::invalid_input("No points provided."));
    }

    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::{parse_points, random_points};

    #[test]
    fn parse_points_parses_whitespace_separated_tokens() {
        let points = parse_points("1.0,2.0\n3.0,4.0 5.5,-6.0").expect("parse points");
        assert_eq!(points.len(), 3);
        assert_eq!(points[0].to_string(), "(1.0, 2.0)");
        assert_eq!(points[2].to_string(), "(5.5, -6.0)");
    }

    #[test]
    fn parse_points_rejects_empty_input() {
        let err = parse_points(" \n\t ").expect_err("empty input should fail");
        assert!(err.to_string().contains("No points provided."));
    }

    #[test]
    fn parse_points_rejects_missing_y() {
        let err = parse_points("1.0,2.0 3.0").expect_err("missing y should fail");
        assert!(err.to_string().contains("Token 2: missing y"));
    }

    #[test]
    fn parse_points_rejects_extra_comma_fields() {
        let err = parse_points("1,2,3").expect_err("extra fields should fail");
        assert!(err.to_string().contains("expected 'x,y'"));
    }

    #[test]
    fn parse_points_rejects_non_numeric_coordinates() {
        let err = parse_points("a,2").expect_err("invalid x should fail");
        assert!(err.to_string().contains("invalid x"));
    }

    #[test]
    fn parse_points_keeps_non_finite_values() {
        let points = parse_points("NaN,1 2,inf").expect("parse points");
        assert!(points[0].x.is_nan());
        assert!(points[1].y.is_infinite());
    }

    #[test]
    fn random_points_are_reproducible_and_bounded() {
        let a = random_points(50, 10.0, 20.0, 42);
        let b = random_points(50, 10.0, 20.0, 42);
        assert_eq!(a, b);
        assert!(
            a.iter()
                .all(|p| (0.0..10.0).contains(&p.x) && (0.0..20.0).contains(&p.y))
        );
    }

    #[test]
    fn random_points_depend_on_seed() {
        assert_ne!(
            random_points(10, 1.0, 1.0, 1),
            random_points(10, 1.0, 1.0, 2)
        );
    }
}
