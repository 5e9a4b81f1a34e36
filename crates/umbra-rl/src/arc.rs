//! Exact rational arcs of the unit circle used by the shadowcaster.
//!
//! A full turn is `[0, 1)`. Every comparison cross-multiplies integer pairs;
//! floats appear only when a covered length is turned into a visibility
//! fraction.

use std::cmp::Ordering;

/// A non-negative fraction `num / den` with `den > 0`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Fraction {
    num: i64,
    den: i64,
}

impl Fraction {
    pub(crate) const ZERO: Self = Self { num: 0, den: 1 };
    pub(crate) const ONE: Self = Self { num: 1, den: 1 };

    pub(crate) const fn new(num: i64, den: i64) -> Self {
        Self { num, den }
    }

    /// `self - other`, evaluated exactly and converted at the end.
    fn sub_f64(self, other: Self) -> f64 {
        let num = self.num * other.den - other.num * self.den;
        num as f64 / (self.den * other.den) as f64
    }
}

impl PartialEq for Fraction {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Fraction {}

impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Fraction {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.num * other.den).cmp(&(other.num * self.den))
    }
}

/// The half-open slice `[start, end)` of the circle, `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Arc {
    pub(crate) start: Fraction,
    pub(crate) end: Fraction,
}

impl Arc {
    pub(crate) const fn new(start: Fraction, end: Fraction) -> Self {
        Self { start, end }
    }

    fn length(self) -> f64 {
        self.end.sub_f64(self.start)
    }
}

/// Ordered, disjoint, non-touching opaque arcs.
#[derive(Debug, Clone, Default)]
pub(crate) struct Shadows {
    arcs: Vec<Arc>,
}

impl Shadows {
    pub(crate) fn clear(&mut self) {
        self.arcs.clear();
    }

    /// Whether the whole circle is in shadow.
    pub(crate) fn is_full(&self) -> bool {
        matches!(self.arcs.as_slice(), [a] if a.start == Fraction::ZERO && a.end == Fraction::ONE)
    }

    /// Fraction of `arc` not covered by any shadow, in `[0, 1]`.
    ///
    /// Full and zero coverage are decided exactly, so a fully shadowed arc
    /// always yields exactly `0.0` and an unshadowed one exactly `1.0`.
    pub(crate) fn visible_fraction(&self, arc: Arc) -> f64 {
        let first = self.arcs.partition_point(|s| s.end <= arc.start);
        let mut covered = 0.0;
        let mut touched = false;
        for s in &self.arcs[first..] {
            if s.start >= arc.end {
                break;
            }
            let lo = s.start.max(arc.start);
            let hi = s.end.min(arc.end);
            // Shadows never touch, so full cover comes from a single one.
            if lo == arc.start && hi == arc.end {
                return 0.0;
            }
            covered += hi.sub_f64(lo);
            touched = true;
        }
        if !touched {
            return 1.0;
        }
        let total = arc.length();
        ((total - covered) / total).clamp(0.0, 1.0)
    }

    /// Add `arc`, coalescing it with every shadow it overlaps or touches.
    pub(crate) fn insert(&mut self, arc: Arc) {
        let first = self.arcs.partition_point(|s| s.end < arc.start);
        let mut last = first;
        let mut merged = arc;
        while last < self.arcs.len() && self.arcs[last].start <= arc.end {
            merged.start = merged.start.min(self.arcs[last].start);
            merged.end = merged.end.max(self.arcs[last].end);
            last += 1;
        }
        self.arcs.splice(first..last, [merged]);
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.arcs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arc(a: i64, b: i64, den: i64) -> Arc {
        Arc::new(Fraction::new(a, den), Fraction::new(b, den))
    }

    #[test]
    fn fractions_compare_exactly() {
        assert_eq!(Fraction::new(1, 2), Fraction::new(8, 16));
        assert!(Fraction::new(1, 3) < Fraction::new(334, 1000));
        assert!(Fraction::new(15, 16) > Fraction::new(29, 32));
    }

    #[test]
    fn insert_merges_touching_arcs() {
        let mut s = Shadows::default();
        s.insert(arc(1, 2, 8));
        s.insert(arc(4, 5, 8));
        assert_eq!(s.len(), 2);
        // Touches the first arc at 2/8 and overlaps the second.
        s.insert(arc(4, 9, 16));
        assert_eq!(s.len(), 1);
        assert_eq!(s.visible_fraction(arc(1, 5, 8)), 0.0);
    }

    #[test]
    fn full_circle_detected() {
        let mut s = Shadows::default();
        s.insert(arc(0, 1, 2));
        assert!(!s.is_full());
        s.insert(arc(1, 2, 2));
        assert!(s.is_full());
    }

    #[test]
    fn partial_visibility() {
        let mut s = Shadows::default();
        s.insert(arc(0, 1, 16));
        assert_eq!(s.visible_fraction(arc(1, 3, 32)), 0.5);
        assert_eq!(s.visible_fraction(arc(2, 3, 16)), 1.0);
        assert_eq!(s.visible_fraction(arc(0, 2, 32)), 0.0);
    }

    #[test]
    fn visibility_counts_every_covering_shadow() {
        let mut s = Shadows::default();
        s.insert(arc(1, 2, 10));
        s.insert(arc(3, 4, 10));
        let v = s.visible_fraction(arc(0, 5, 10));
        assert!((v - 0.6).abs() < 1e-12);
    }
}
