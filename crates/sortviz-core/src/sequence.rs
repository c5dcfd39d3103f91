//! Sequence store: the values under sort and their per-position markers.
//!
//! Markers (`settled`, `comparing`, `swapping`) belong to a *position*, not a
//! value. `swap` exchanges values and bar heights between two positions and
//! leaves the markers where they are, the same way a highlighted column stays
//! highlighted while its contents change.

/// Height of the shortest bar.
pub const MIN_BAR_HEIGHT: u32 = 50;

/// Extra height given to the largest value on top of `MIN_BAR_HEIGHT`.
pub const BAR_HEIGHT_SPAN: u32 = 250;

/// One position of the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Element {
    pub value: i64,
    /// Visual height, fixed at commit time and carried along by swaps.
    pub height: u32,
    /// Final position reached; will not move again this run.
    pub settled: bool,
    pub comparing: bool,
    pub swapping: bool,
}

impl Element {
    fn new(value: i64, max: i64) -> Self {
        Self {
            value,
            height: bar_height(value, max),
            settled: false,
            comparing: false,
            swapping: false,
        }
    }
}

/// Scales `value` against the largest committed value.
///
/// Non-positive values (and sequences whose maximum is non-positive) get the
/// minimum height.
pub fn bar_height(value: i64, max: i64) -> u32 {
    if value <= 0 || max <= 0 {
        return MIN_BAR_HEIGHT;
    }
    let scaled = i128::from(value) * i128::from(BAR_HEIGHT_SPAN) / i128::from(max);
    MIN_BAR_HEIGHT + scaled.clamp(0, i128::from(BAR_HEIGHT_SPAN)) as u32
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sequence {
    elements: Vec<Element>,
}

impl Sequence {
    pub fn new(values: &[i64]) -> Self {
        let max = values.iter().copied().max().unwrap_or(0);
        Self {
            elements: values.iter().map(|&v| Element::new(v, max)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Value at position `i`.
    ///
    /// # Panics
    /// Panics if `i` is out of bounds.
    pub fn get(&self, i: usize) -> i64 {
        self.elements[i].value
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Exchanges value and height of positions `i` and `j` in one step.
    ///
    /// # Panics
    /// Panics if either index is out of bounds.
    pub fn swap(&mut self, i: usize, j: usize) {
        let (a, b) = (self.elements[i], self.elements[j]);
        self.elements[i].value = b.value;
        self.elements[i].height = b.height;
        self.elements[j].value = a.value;
        self.elements[j].height = a.height;
    }

    pub fn mark_settled(&mut self, i: usize) {
        self.elements[i].settled = true;
    }

    pub fn set_comparing(&mut self, i: usize, on: bool) {
        self.elements[i].comparing = on;
    }

    pub fn set_swapping(&mut self, i: usize, on: bool) {
        self.elements[i].swapping = on;
    }

    /// Drops the comparing and swapping markers of one position.
    pub fn clear_markers(&mut self, i: usize) {
        let element = &mut self.elements[i];
        element.comparing = false;
        element.swapping = false;
    }

    /// Drops comparing and swapping markers everywhere; settled stays.
    pub fn clear_transient(&mut self) {
        for element in &mut self.elements {
            element.comparing = false;
            element.swapping = false;
        }
    }

    /// Drops every marker, settled included.
    pub fn reset_markers(&mut self) {
        self.clear_transient();
        for element in &mut self.elements {
            element.settled = false;
        }
    }

    pub fn snapshot(&self) -> Vec<i64> {
        self.elements.iter().map(|e| e.value).collect()
    }

    /// Renders the current values as `[ a, b, c ]`.
    pub fn snapshot_label(&self) -> String {
        let values: Vec<String> = self.elements.iter().map(|e| e.value.to_string()).collect();
        format!("[ {} ]", values.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swap_moves_value_and_height_but_not_markers() {
        let mut seq = Sequence::new(&[10, 40]);
        seq.set_comparing(0, true);
        let (h0, h1) = (seq.elements()[0].height, seq.elements()[1].height);

        seq.swap(0, 1);

        assert_eq!(seq.snapshot(), vec![40, 10]);
        assert_eq!(seq.elements()[0].height, h1);
        assert_eq!(seq.elements()[1].height, h0);
        assert!(seq.elements()[0].comparing);
        assert!(!seq.elements()[1].comparing);
    }

    #[test]
    fn test_bar_height_scales_against_max() {
        assert_eq!(bar_height(100, 100), MIN_BAR_HEIGHT + BAR_HEIGHT_SPAN);
        assert_eq!(bar_height(50, 100), MIN_BAR_HEIGHT + BAR_HEIGHT_SPAN / 2);
        assert_eq!(bar_height(-3, 100), MIN_BAR_HEIGHT);
        assert_eq!(bar_height(5, -1), MIN_BAR_HEIGHT);
    }

    #[test]
    fn test_bar_height_handles_extreme_values() {
        assert_eq!(
            bar_height(i64::MAX, i64::MAX),
            MIN_BAR_HEIGHT + BAR_HEIGHT_SPAN
        );
    }

    #[test]
    fn test_snapshot_label_format() {
        let seq = Sequence::new(&[5, 3, 8, 1]);
        assert_eq!(seq.snapshot_label(), "[ 5, 3, 8, 1 ]");
        assert_eq!(Sequence::default().snapshot_label(), "[  ]");
    }

    #[test]
    fn test_clear_transient_keeps_settled() {
        let mut seq = Sequence::new(&[1, 2]);
        seq.mark_settled(1);
        seq.set_swapping(0, true);
        seq.set_comparing(1, true);

        seq.clear_transient();
        assert!(seq.elements()[1].settled);
        assert!(!seq.elements()[0].swapping);
        assert!(!seq.elements()[1].comparing);

        seq.reset_markers();
        assert!(!seq.elements()[1].settled);
    }
}
