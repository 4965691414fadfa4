//! Greedy interval coloring shared by the month and time-grid views.
//!
//! Both views place half-open spans on a one-dimensional axis (day cells for
//! the month grid, minutes of day for time grids) and give each span the
//! smallest lane not used by any span it overlaps. Sweeping in left-endpoint
//! order makes the result optimal: a component never uses more lanes than the
//! largest number of spans active at a single point.

use std::cmp::Ordering;

/// Half-open span `[start, end)` on an integer axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: i64,
    pub end: i64,
}

impl Span {
    pub fn new(start: i64, end: i64) -> Self {
        Span { start, end }
    }

    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && self.end > other.start
    }
}

/// Tie-break used when two spans start at the same point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepOrder {
    /// Start only, then input order (month rows).
    Start,
    /// Start, then end, then input order (time-grid columns).
    StartThenEnd,
}

impl SweepOrder {
    fn compare(self, a: &Span, b: &Span) -> Ordering {
        match self {
            SweepOrder::Start => a.start.cmp(&b.start),
            SweepOrder::StartThenEnd => a.start.cmp(&b.start).then(a.end.cmp(&b.end)),
        }
    }
}

/// Lanes for a set of spans, indexed like the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaneAssignment {
    /// Lane of each span.
    pub lanes: Vec<usize>,
    /// Overlap component of each span. Components are numbered in sweep order.
    pub components: Vec<usize>,
    /// Lanes in use by each component (`1 + max lane`).
    pub component_lanes: Vec<usize>,
}

impl LaneAssignment {
    /// Lanes used by the component containing span `index`.
    pub fn total_for(&self, index: usize) -> usize {
        self.component_lanes[self.components[index]]
    }

    /// Lanes used across all spans.
    pub fn lane_count(&self) -> usize {
        self.component_lanes.iter().copied().max().unwrap_or(0)
    }
}

/// Assign every span the smallest lane free of all spans overlapping it.
///
/// The sort is stable, so identical input always yields identical lanes.
pub fn assign_lanes(spans: &[Span], order: SweepOrder) -> LaneAssignment {
    let mut sweep: Vec<usize> = (0..spans.len()).collect();
    sweep.sort_by(|&a, &b| order.compare(&spans[a], &spans[b]));

    let mut lanes = vec![0; spans.len()];
    let mut components = vec![0; spans.len()];
    let mut component_lanes: Vec<usize> = Vec::new();

    // Spans still open at the current sweep position
    let mut active: Vec<usize> = Vec::new();
    let mut reach = i64::MIN;

    for &index in &sweep {
        let span = spans[index];
        active.retain(|&other| spans[other].end > span.start);

        let mut taken: Vec<bool> = vec![false; active.len() + 1];
        for &other in &active {
            if let Some(slot) = taken.get_mut(lanes[other]) {
                *slot = true;
            }
        }
        let lane = taken.iter().position(|used| !used).unwrap_or(active.len());
        lanes[index] = lane;

        if component_lanes.is_empty() || span.start >= reach {
            component_lanes.push(0);
            reach = span.end;
        } else {
            reach = reach.max(span.end);
        }
        let component = component_lanes.len() - 1;
        components[index] = component;
        component_lanes[component] = component_lanes[component].max(lane + 1);

        active.push(index);
    }

    LaneAssignment {
        lanes,
        components,
        component_lanes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Largest number of spans covering one point.
    fn max_clique(spans: &[Span]) -> usize {
        let mut points: Vec<(i64, i32)> = Vec::new();
        for s in spans {
            points.push((s.start, 1));
            points.push((s.end, -1));
        }
        points.sort();
        let mut depth = 0i32;
        let mut best = 0i32;
        for (_, delta) in points {
            depth += delta;
            best = best.max(depth);
        }
        best as usize
    }

    fn assert_no_overlap(spans: &[Span], result: &LaneAssignment) {
        for i in 0..spans.len() {
            for j in (i + 1)..spans.len() {
                if spans[i].overlaps(&spans[j]) {
                    assert_ne!(result.lanes[i], result.lanes[j], "spans {} and {} share a lane", i, j);
                    assert_eq!(result.components[i], result.components[j]);
                }
            }
        }
    }

    #[test]
    fn test_empty_input() {
        let result = assign_lanes(&[], SweepOrder::Start);
        assert!(result.lanes.is_empty());
        assert_eq!(result.lane_count(), 0);
    }

    #[test]
    fn test_chain_shares_component_but_reuses_lanes() {
        // a overlaps b, b overlaps c, a and c are disjoint
        let spans = vec![Span::new(0, 10), Span::new(5, 15), Span::new(12, 20)];
        let result = assign_lanes(&spans, SweepOrder::StartThenEnd);

        assert_eq!(result.lanes, vec![0, 1, 0]);
        assert_eq!(result.components, vec![0, 0, 0]);
        assert_eq!(result.total_for(2), 2);
        assert_no_overlap(&spans, &result);
    }

    #[test]
    fn test_touching_spans_do_not_overlap() {
        let spans = vec![Span::new(0, 10), Span::new(10, 20)];
        let result = assign_lanes(&spans, SweepOrder::Start);

        assert_eq!(result.lanes, vec![0, 0]);
        assert_eq!(result.components, vec![0, 1]);
        assert_eq!(result.component_lanes, vec![1, 1]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let spans = vec![Span::new(0, 30), Span::new(0, 10), Span::new(0, 20)];

        let by_start = assign_lanes(&spans, SweepOrder::Start);
        assert_eq!(by_start.lanes, vec![0, 1, 2]);

        let by_end = assign_lanes(&spans, SweepOrder::StartThenEnd);
        assert_eq!(by_end.lanes, vec![2, 0, 1]);
    }

    #[test]
    fn test_freed_lane_is_reused() {
        let spans = vec![
            Span::new(0, 5),
            Span::new(0, 20),
            Span::new(6, 8),
            Span::new(7, 30),
        ];
        let result = assign_lanes(&spans, SweepOrder::Start);

        assert_eq!(result.lanes, vec![0, 1, 0, 2]);
        assert_no_overlap(&spans, &result);
    }

    #[test]
    fn test_minimal_lanes_per_component() {
        let spans = vec![
            Span::new(0, 4),
            Span::new(1, 3),
            Span::new(2, 9),
            Span::new(3, 5),
            Span::new(5, 7),
            Span::new(8, 12),
            Span::new(20, 25),
            Span::new(21, 22),
            Span::new(40, 41),
        ];
        let result = assign_lanes(&spans, SweepOrder::StartThenEnd);
        assert_no_overlap(&spans, &result);

        let component_count = result.component_lanes.len();
        assert_eq!(component_count, 3);
        for component in 0..component_count {
            let members: Vec<Span> = spans
                .iter()
                .zip(&result.components)
                .filter(|(_, c)| **c == component)
                .map(|(s, _)| *s)
                .collect();
            assert_eq!(result.component_lanes[component], max_clique(&members));
        }
    }

    #[test]
    fn test_deterministic() {
        let spans: Vec<Span> = (0..40)
            .map(|i| Span::new((i * 7) % 23, (i * 7) % 23 + 1 + (i % 5)))
            .collect();

        let first = assign_lanes(&spans, SweepOrder::StartThenEnd);
        let second = assign_lanes(&spans, SweepOrder::StartThenEnd);
        assert_eq!(first, second);
        assert_no_overlap(&spans, &first);
        assert_eq!(first.lane_count(), max_clique(&spans));
    }
}
