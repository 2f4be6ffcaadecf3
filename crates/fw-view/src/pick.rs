/// A picked candidate and its distance from the query point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pick<T> {
    /// The chosen candidate.
    pub item: T,
    /// Euclidean distance from the query point.
    pub distance: f64,
}

/// The candidate nearest to `(x, y)` whose distance is strictly below
/// `radius`. On equal distances the earliest candidate wins.
pub fn pick_nearest<T, I, F>(
    candidates: I,
    x: f64,
    y: f64,
    radius: f64,
    position: F,
) -> Option<Pick<T>>
where
    I: IntoIterator<Item = T>,
    F: Fn(&T) -> (f64, f64),
{
    let mut best: Option<Pick<T>> = None;
    for item in candidates {
        let (px, py) = position(&item);
        let distance = (px - x).hypot(py - y);
        let bound = best.as_ref().map_or(radius, |b| b.distance.min(radius));
        if distance < bound {
            best = Some(Pick { item, distance });
        }
    }
    best
}
