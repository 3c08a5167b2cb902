use std::fmt;

use crate::point::Point;

/// Greedy rule used to pick the splice position for a new point.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Heuristic {
    /// Insert right after the closest existing stop.
    Nearest,
    /// Insert into the edge whose replacement grows the tour the least.
    Smallest,
}

#[derive(Clone, Copy, Debug)]
struct Stop {
    point: Point,
    next: usize,
}

/// Closed tour over 2-D points.
///
/// Stops live in an arena and link to their successor by index, so the cycle
/// has a single owner. Stops are never removed: once non-empty, the tour stays
/// non-empty and every index ever handed out stays valid.
///
/// The anchor is only where traversal starts. Moving it with
/// [`Tour::rotate_anchor`] changes neither the cycle nor its length.
#[derive(Clone, Debug, Default)]
pub struct Tour {
    stops: Vec<Stop>,
    anchor: Option<usize>,
}

impl Tour {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the fixed cycle `a -> b -> c -> d -> a` without running either
    /// heuristic. Intended for tests and demonstrations.
    pub fn square(a: Point, b: Point, c: Point, d: Point) -> Self {
        let stops = [a, b, c, d]
            .into_iter()
            .enumerate()
            .map(|(i, point)| Stop {
                point,
                next: (i + 1) % 4,
            })
            .collect();
        Self {
            stops,
            anchor: Some(0),
        }
    }

    /// Inserts every point in iteration order with the given heuristic.
    pub fn from_points<I>(heuristic: Heuristic, points: I) -> Self
    where
        I: IntoIterator<Item = Point>,
    {
        let mut tour = Self::new();
        for p in points {
            tour.insert(heuristic, p);
        }
        tour
    }

    pub fn is_empty(&self) -> bool {
        self.anchor.is_none()
    }

    /// Number of stops, counted by walking the cycle once from the anchor.
    pub fn size(&self) -> usize {
        self.walk().count()
    }

    /// Closed length of the cycle, summed edge by edge starting at the anchor.
    pub fn length(&self) -> f64 {
        let mut length = 0.0;
        for (a, b) in self.edges() {
            length += a.dist(&b);
        }
        length
    }

    /// Points in cyclic order, starting at the anchor.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.walk().map(|idx| self.stops[idx].point)
    }

    /// `size()` edges `(p_i, p_{i+1 mod size})`, starting at the anchor. A
    /// single-stop tour yields one zero-length self-loop.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.walk().map(|idx| {
            let stop = self.stops[idx];
            (stop.point, self.stops[stop.next].point)
        })
    }

    /// Moves the anchor `steps` stops forward along the cycle. Whole laps are
    /// skipped, so the walk is bounded by the tour size.
    pub fn rotate_anchor(&mut self, steps: usize) {
        let Some(mut anchor) = self.anchor else {
            return;
        };
        for _ in 0..steps % self.stops.len() {
            anchor = self.stops[anchor].next;
        }
        self.anchor = Some(anchor);
    }

    pub fn insert(&mut self, heuristic: Heuristic, p: Point) {
        match heuristic {
            Heuristic::Nearest => self.insert_nearest(p),
            Heuristic::Smallest => self.insert_smallest(p),
        }
    }

    /// Splices `p` right after the stop closest to it. Exact ties keep the
    /// first stop seen walking from the anchor.
    pub fn insert_nearest(&mut self, p: Point) {
        let Some((target, cost)) = self.cheapest(|stop, _| p.dist(&stop.point)) else {
            self.seed(p);
            return;
        };
        log::trace!("insert: heuristic=nearest point={p} after={target} dist={cost}");
        self.splice_after(target, p);
    }

    /// Splices `p` into the edge `(m, m.next)` minimizing
    /// `d(m, p) + d(p, m.next) - d(m, m.next)`. Exact ties keep the first edge
    /// seen walking from the anchor.
    pub fn insert_smallest(&mut self, p: Point) {
        let Some((target, cost)) = self.cheapest(|stop, next| {
            let a = stop.point.dist(&p);
            let b = p.dist(&next.point);
            let c = stop.point.dist(&next.point);
            a + b - c
        }) else {
            self.seed(p);
            return;
        };
        log::trace!("insert: heuristic=smallest point={p} after={target} delta={cost}");
        self.splice_after(target, p);
    }

    /// Prices every stop together with its successor in one walk and returns
    /// the cheapest, or `None` for an empty tour. Only a strict improvement
    /// replaces the running minimum, so a NaN cost is never selected and an
    /// all-NaN scan falls back to the anchor.
    fn cheapest<F>(&self, cost: F) -> Option<(usize, f64)>
    where
        F: Fn(&Stop, &Stop) -> f64,
    {
        let anchor = self.anchor?;
        let mut min = f64::MAX;
        let mut target = anchor;
        for idx in self.walk() {
            let stop = &self.stops[idx];
            let c = cost(stop, &self.stops[stop.next]);
            if c < min {
                min = c;
                target = idx;
            }
        }
        Some((target, min))
    }

    fn seed(&mut self, p: Point) {
        debug_assert!(self.stops.is_empty());
        self.stops.push(Stop { point: p, next: 0 });
        self.anchor = Some(0);
        log::trace!("insert: seeded tour with point={p}");
    }

    fn splice_after(&mut self, target: usize, p: Point) {
        let idx = self.stops.len();
        let next = self.stops[target].next;
        self.stops.push(Stop { point: p, next });
        self.stops[target].next = idx;
        debug_assert!(self.is_closed(), "tour cycle broken after splice");
    }

    fn walk(&self) -> Walk<'_> {
        Walk {
            stops: &self.stops,
            anchor: self.anchor,
            current: self.anchor,
        }
    }

    /// True when following `next` from the anchor returns to it after exactly
    /// as many steps as there are stops.
    fn is_closed(&self) -> bool {
        let Some(anchor) = self.anchor else {
            return self.stops.is_empty();
        };
        let n = self.stops.len();
        let mut current = anchor;
        let mut steps = 0;
        loop {
            let Some(stop) = self.stops.get(current) else {
                return false;
            };
            current = stop.next;
            steps += 1;
            if current == anchor {
                return steps == n;
            }
            if steps > n {
                return false;
            }
        }
    }
}

/// Stop indices from the anchor around to just before the anchor again.
struct Walk<'a> {
    stops: &'a [Stop],
    anchor: Option<usize>,
    current: Option<usize>,
}

impl Iterator for Walk<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let idx = self.current?;
        let next = self.stops[idx].next;
        self.current = if Some(next) == self.anchor {
            None
        } else {
            Some(next)
        };
        Some(idx)
    }
}

impl fmt::Display for Tour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for p in self.points() {
            writeln!(f, "{p}")?;
        }
        Ok(())
    }
}
