/// Evenly spaced samples over a closed interval.
///
/// Every sample is computed as `start + i * step` rather than accumulated,
/// so a long grid does not drift.
#[derive(Clone, Debug)]
pub struct Linspace {
    start: f64,
    step: f64,
    front: usize,
    back: usize,
}

impl Linspace {
    /// Number of samples [`with_step`](Self::with_step) yields, `None` when
    /// it does not fit in a `usize`.
    pub fn step_count(min: f64, max: f64, step: f64) -> Option<usize> {
        // The small bias keeps 10 / 0.1 from flooring to 99
        let steps = ((max - min) / step + 1e-9).floor();

        if !(0. ..(usize::MAX as f64)).contains(&steps) {
            return None;
        }

        (steps as usize).checked_add(1)
    }

    /// Samples `[min, max]` every `step`, like `np.arange(min, max + step, step)`.
    ///
    /// The end point is only included when the range is a whole number of
    /// steps. `None` when the sample count overflows.
    pub fn with_step(min: f64, max: f64, step: f64) -> Option<Self> {
        let n = Self::step_count(min, max, step)?;

        Some(Linspace {
            start: min,
            step: if n > 1 { step } else { 0. },
            front: 0,
            back: n,
        })
    }

    #[inline]
    fn at(&self, i: usize) -> f64 {
        self.start + self.step * i as f64
    }
}

impl Iterator for Linspace {
    type Item = f64;

    #[inline]
    fn next(&mut self) -> Option<f64> {
        (self.front < self.back).then(|| {
            self.front += 1;
            self.at(self.front - 1)
        })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.back - self.front;
        (n, Some(n))
    }
}

impl DoubleEndedIterator for Linspace {
    #[inline]
    fn next_back(&mut self) -> Option<f64> {
        (self.front < self.back).then(|| {
            self.back -= 1;
            self.at(self.back)
        })
    }
}

impl ExactSizeIterator for Linspace {}

#[test]
fn test_linspace_with_step() {
    let points: Vec<f64> = Linspace::with_step(0., 100., 1.).unwrap().collect();

    assert_eq!(points.len(), 101);
    assert_eq!(points[0], 0.);
    assert_eq!(points[60], 60.);
    assert_eq!(points[100], 100.);

    let tenths = Linspace::with_step(0., 10., 0.1).unwrap();
    assert_eq!(tenths.len(), 101);

    // 0, 4, 8: the end point is not a whole step away
    let coarse: Vec<f64> = Linspace::with_step(0., 10., 4.).unwrap().collect();
    assert_eq!(coarse, vec![0., 4., 8.]);

    assert_eq!(Linspace::with_step(3., 3., 1.).unwrap().collect::<Vec<_>>(), vec![3.]);
}

#[test]
fn test_step_count_overflow() {
    assert_eq!(Linspace::step_count(0., 100., 1.), Some(101));
    assert_eq!(Linspace::step_count(0., 100., 1e-300), None);
    assert_eq!(Linspace::step_count(0., 100., f64::NAN), None);
    assert_eq!(Linspace::step_count(1., 0., 1.), None);
    assert!(Linspace::with_step(0., 100., 1e-300).is_none());
}

#[test]
fn test_linspace_both_ends() {
    let mut grid = Linspace::with_step(0., 4., 1.).unwrap();

    assert_eq!(grid.next_back(), Some(4.));
    assert_eq!(grid.next(), Some(0.));
    assert_eq!(grid.len(), 3);
    assert_eq!(grid.rev().collect::<Vec<_>>(), vec![3., 2., 1.]);
}
