//! Food placement and the random source it draws from.

use rand::{Rng, RngCore};

use crate::grid::Point;

/// Supplies uniform values in `[0, 1)`.
///
/// Every `rand` generator is a source, so `ThreadRng` and a seeded `StdRng`
/// plug straight in. [`ScriptedSource`] and [`FnSource`] cover fixed
/// sequences and closures.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

impl<R: RngCore> RandomSource for R {
    fn next_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Replays a fixed list of values, starting over when it runs out.
#[derive(Clone, Debug)]
pub struct ScriptedSource {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedSource {
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        ScriptedSource {
            values: values.into(),
            cursor: 0,
        }
    }

    /// Always returns `value`.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for ScriptedSource {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor = (self.cursor + 1) % self.values.len();
        value
    }
}

/// Adapts a closure into a [`RandomSource`].
pub struct FnSource<F>(pub F);

impl<F: FnMut() -> f64> RandomSource for FnSource<F> {
    fn next_unit(&mut self) -> f64 {
        (self.0)()
    }
}

/// Picks a free cell for the next piece of food.
///
/// Free cells are enumerated row by row and one is chosen by
/// `floor(rng * count)`, so a fixed random sequence always yields the same
/// cell. Returns `None` once the snake covers the whole board.
pub fn place_food<'a, I>(size: u16, snake: I, rng: &mut impl RandomSource) -> Option<Point>
where
    I: IntoIterator<Item = &'a Point>,
{
    let side = usize::from(size);
    let mut occupied = vec![false; side * side];
    for segment in snake {
        if segment.in_bounds(size) {
            occupied[usize::from(segment.y) * side + usize::from(segment.x)] = true;
        }
    }

    let free = occupied.iter().filter(|taken| !**taken).count();
    if free == 0 {
        return None;
    }

    // `as` saturates: NaN and negatives land on 0, values >= 1.0 are clamped.
    let pick = ((rng.next_unit() * free as f64) as usize).min(free - 1);

    occupied
        .iter()
        .enumerate()
        .filter(|(_, taken)| !**taken)
        .nth(pick)
        .map(|(index, _)| Point::new((index % side) as u16, (index / side) as u16))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn row(y: u16, xs: std::ops::Range<u16>) -> Vec<Point> {
        xs.map(|x| Point::new(x, y)).collect()
    }

    #[test]
    fn test_first_free_cell_on_zero() {
        let snake = row(0, 0..3);
        let mut rng = ScriptedSource::constant(0.0);
        assert_eq!(place_food(5, &snake, &mut rng), Some(Point::new(3, 0)));
    }

    #[test]
    fn test_last_free_cell_near_one() {
        let snake = row(4, 2..5);
        let mut rng = ScriptedSource::constant(0.999_999);
        assert_eq!(place_food(5, &snake, &mut rng), Some(Point::new(1, 4)));
    }

    #[test]
    fn test_index_is_floor_of_scaled_value() {
        // 13 free cells, 0.5 * 13 = 6.5 -> index 6: (3,0), row 1, then (1,2).
        let snake = row(0, 0..3);
        let mut rng = ScriptedSource::constant(0.5);
        assert_eq!(place_food(4, &snake, &mut rng), Some(Point::new(1, 2)));
    }

    #[test]
    fn test_out_of_contract_values_are_clamped() {
        let snake = row(0, 0..3);
        assert_eq!(
            place_food(4, &snake, &mut ScriptedSource::constant(1.0)),
            Some(Point::new(3, 3))
        );
        assert_eq!(
            place_food(4, &snake, &mut ScriptedSource::constant(-0.5)),
            Some(Point::new(3, 0))
        );
        assert_eq!(
            place_food(4, &snake, &mut ScriptedSource::constant(f64::NAN)),
            Some(Point::new(3, 0))
        );
    }

    #[test]
    fn test_full_board_has_no_food() {
        let snake: Vec<Point> = (0..4).flat_map(|y| row(y, 0..4)).collect();
        let mut rng = ScriptedSource::constant(0.3);
        assert_eq!(place_food(4, &snake, &mut rng), None);
    }

    #[test]
    fn test_single_free_cell() {
        let snake: Vec<Point> = (0..4)
            .flat_map(|y| row(y, 0..4))
            .filter(|p| *p != Point::new(2, 3))
            .collect();
        for value in [0.0, 0.5, 0.99] {
            let mut rng = ScriptedSource::constant(value);
            assert_eq!(place_food(4, &snake, &mut rng), Some(Point::new(2, 3)));
        }
    }

    #[test]
    fn test_never_lands_on_snake() {
        let snake: Vec<Point> = (0..3).flat_map(|y| row(y, 0..5)).collect();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let food = place_food(6, &snake, &mut rng).unwrap();
            assert!(food.in_bounds(6));
            assert!(!snake.contains(&food));
        }
    }

    #[test]
    fn test_seeded_sources_agree() {
        let snake = row(2, 0..3);
        let mut a = StdRng::seed_from_u64(99);
        let mut b = StdRng::seed_from_u64(99);
        for _ in 0..20 {
            assert_eq!(place_food(10, &snake, &mut a), place_food(10, &snake, &mut b));
        }
    }

    #[test]
    fn test_scripted_source_cycles() {
        let mut rng = ScriptedSource::new(vec![0.1, 0.2]);
        assert_eq!(rng.next_unit(), 0.1);
        assert_eq!(rng.next_unit(), 0.2);
        assert_eq!(rng.next_unit(), 0.1);
    }

    #[test]
    fn test_fn_source() {
        let mut calls = 0;
        let mut rng = FnSource(|| {
            calls += 1;
            0.25
        });
        assert_eq!(rng.next_unit(), 0.25);
        assert_eq!(rng.next_unit(), 0.25);
        drop(rng);
        assert_eq!(calls, 2);
    }
}
