use std::fmt;

use crate::core::VokabelError;

/// Hues of the progress bar, in slot order. Slots past the seventh start over.
pub const PALETTE: [SegmentColor; 7] = [
    SegmentColor::Red,
    SegmentColor::Orange,
    SegmentColor::Yellow,
    SegmentColor::Green,
    SegmentColor::Blue,
    SegmentColor::Indigo,
    SegmentColor::Violet,
];

pub const DEFAULT_DAILY_TARGET: i64 = 70;
pub const DEFAULT_SEGMENT_SIZE: i64 = 10;
/// Upper bound on `target / segment_size`, keeps the segment list small.
pub const MAX_SLOT_COUNT: i64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentColor {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Indigo,
    Violet,
}

impl SegmentColor {
    pub fn name(&self) -> &'static str {
        match self {
            SegmentColor::Red => "red",
            SegmentColor::Orange => "orange",
            SegmentColor::Yellow => "yellow",
            SegmentColor::Green => "green",
            SegmentColor::Blue => "blue",
            SegmentColor::Indigo => "indigo",
            SegmentColor::Violet => "violet",
        }
    }
}

impl fmt::Display for SegmentColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One filled slot of the bar. Fractions are of the whole bar width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub color_index: usize,
    pub width_fraction: f64,
    pub offset_fraction: f64,
}

impl Segment {
    pub fn color(&self) -> SegmentColor {
        PALETTE[self.color_index % PALETTE.len()]
    }

    /// CSS-style width, e.g. `"14.2857%"`.
    pub fn width_percent(&self) -> String {
        format!("{:.4}%", self.width_fraction * 100.0)
    }

    pub fn offset_percent(&self) -> String {
        format!("{:.4}%", self.offset_fraction * 100.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuotaDisplay {
    pub count: i64,
    pub target: i64,
    /// Not clamped, goes past 100 once the target is exceeded.
    pub percentage: f64,
    pub slot_count: usize,
    pub segments: Vec<Segment>,
    pub is_complete: bool,
}

/// A validated daily target split into equal slots of `segment_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaTarget {
    target: i64,
    segment_size: i64,
}

impl Default for QuotaTarget {
    fn default() -> Self {
        Self { target: DEFAULT_DAILY_TARGET, segment_size: DEFAULT_SEGMENT_SIZE }
    }
}

impl QuotaTarget {
    pub fn new(target: i64, segment_size: i64) -> Result<Self, VokabelError> {
        if target <= 0 || segment_size <= 0 || ceil_div(target, segment_size) > MAX_SLOT_COUNT {
            return Err(VokabelError::InvalidQuota { target, segment_size });
        }
        Ok(Self { target, segment_size })
    }

    pub fn target(&self) -> i64 {
        self.target
    }

    pub fn segment_size(&self) -> i64 {
        self.segment_size
    }

    pub fn slot_count(&self) -> usize {
        ceil_div(self.target, self.segment_size) as usize
    }

    /// Only the exact target counts, so the crossing is seen once.
    pub fn is_complete(&self, count: i64) -> bool {
        count == self.target
    }

    pub fn render(&self, count: i64) -> QuotaDisplay {
        let slot_count = self.slot_count();
        let slot_width = 1.0 / slot_count as f64;
        let active = ceil_div(count, self.segment_size).clamp(0, slot_count as i64) as usize;

        let segments = (0..active)
            .map(|index| {
                let filled_through = (index as i64 + 1).saturating_mul(self.segment_size);
                let width_fraction = if count >= filled_through {
                    slot_width
                } else if index == active - 1 {
                    count.rem_euclid(self.segment_size) as f64 / self.segment_size as f64 * slot_width
                } else {
                    0.0
                };

                Segment {
                    color_index: index % PALETTE.len(),
                    width_fraction,
                    offset_fraction: index as f64 * slot_width,
                }
            })
            .collect();

        QuotaDisplay {
            count,
            target: self.target,
            percentage: 100.0 * count as f64 / self.target as f64,
            slot_count,
            segments,
            is_complete: self.is_complete(count),
        }
    }
}

pub fn render_quota(count: i64, target: i64, segment_size: i64) -> Result<QuotaDisplay, VokabelError> {
    Ok(QuotaTarget::new(target, segment_size)?.render(count))
}

// divisor is always positive here
fn ceil_div(value: i64, divisor: i64) -> i64 {
    let quotient = value.div_euclid(divisor);
    if value.rem_euclid(divisor) != 0 {
        quotient + 1
    } else {
        quotient
    }
}

/// Tracks whether the "target reached" state is showing during a session.
///
/// Completion fires when an observed count is new and equals the target.
/// Seeing the same count again (for example after "continue") does not
/// fire a second time.
#[derive(Debug, Clone, Default)]
pub struct CompletionLatch {
    showing: bool,
    last_count: Option<i64>,
}

impl CompletionLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when this observation starts the completion state.
    pub fn observe(&mut self, count: i64, quota: &QuotaTarget) -> bool {
        let changed = self.last_count != Some(count);
        self.last_count = Some(count);

        if changed && !self.showing && quota.is_complete(count) {
            self.showing = true;
            return true;
        }
        false
    }

    /// Returns true if completion was showing.
    pub fn dismiss(&mut self) -> bool {
        std::mem::replace(&mut self.showing, false)
    }

    pub fn is_showing(&self) -> bool {
        self.showing
    }

    pub fn last_count(&self) -> Option<i64> {
        self.last_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_partial_second_segment() {
        let display = render_quota(11, 70, 10).unwrap();
        assert_eq!(display.slot_count, 7);
        assert_eq!(display.segments.len(), 2);

        let red = display.segments[0];
        assert_eq!(red.color(), SegmentColor::Red);
        assert!(close(red.width_fraction, 1.0 / 7.0));
        assert_eq!(red.width_percent(), "14.2857%");
        assert_eq!(red.offset_percent(), "0.0000%");

        let orange = display.segments[1];
        assert_eq!(orange.color(), SegmentColor::Orange);
        assert!(close(orange.width_fraction, 0.1 / 7.0));
        assert!(close(orange.offset_fraction, 1.0 / 7.0));

        assert!(close(display.percentage, 100.0 * 11.0 / 70.0));
        assert!(!display.is_complete);
    }

    #[test]
    fn test_zero_and_exact_boundaries() {
        let display = render_quota(0, 70, 10).unwrap();
        assert!(display.segments.is_empty());
        assert!(close(display.percentage, 0.0));

        let display = render_quota(20, 70, 10).unwrap();
        assert_eq!(display.segments.len(), 2);
        assert!(display.segments.iter().all(|s| close(s.width_fraction, 1.0 / 7.0)));
    }

    #[test]
    fn test_exact_completion_only() {
        assert!(!render_quota(69, 70, 10).unwrap().is_complete);
        assert!(render_quota(70, 70, 10).unwrap().is_complete);
        assert!(!render_quota(71, 70, 10).unwrap().is_complete);
    }

    #[test]
    fn test_past_target_caps_segments_but_not_percentage() {
        let display = render_quota(85, 70, 10).unwrap();
        assert_eq!(display.segments.len(), 7);
        assert_eq!(display.segments[6].color(), SegmentColor::Violet);
        assert!(display.segments.iter().all(|s| close(s.width_fraction, 1.0 / 7.0)));
        assert!(display.percentage > 120.0);
    }

    #[test]
    fn test_palette_cycles_with_more_slots() {
        let display = render_quota(95, 100, 10).unwrap();
        assert_eq!(display.slot_count, 10);
        assert_eq!(display.segments.len(), 10);
        assert_eq!(display.segments[7].color(), SegmentColor::Red);
        assert_eq!(display.segments[8].color(), SegmentColor::Orange);
        assert!(close(display.segments[9].width_fraction, 0.5 / 10.0));
        assert!(close(display.segments[9].offset_fraction, 0.9));
    }

    #[test]
    fn test_target_not_multiple_of_segment() {
        let target = QuotaTarget::new(25, 10).unwrap();
        assert_eq!(target.slot_count(), 3);
        let display = target.render(25);
        assert!(display.is_complete);
        assert_eq!(display.segments.len(), 3);
        assert!(close(display.segments[2].width_fraction, 0.5 / 3.0));
    }

    #[test]
    fn test_negative_injected_count_renders_empty() {
        let display = render_quota(-4, 70, 10).unwrap();
        assert!(display.segments.is_empty());
        assert!(display.percentage < 0.0);
    }

    #[test]
    fn test_invalid_quota() {
        assert!(matches!(render_quota(1, 0, 10), Err(VokabelError::InvalidQuota { .. })));
        assert!(matches!(QuotaTarget::new(70, -1), Err(VokabelError::InvalidQuota { .. })));
    }

    #[test]
    fn test_slot_count_is_bounded() {
        assert_eq!(QuotaTarget::new(MAX_SLOT_COUNT, 1).unwrap().slot_count(), 1000);
        assert!(matches!(QuotaTarget::new(MAX_SLOT_COUNT + 1, 1), Err(VokabelError::InvalidQuota { .. })));
        assert!(matches!(QuotaTarget::new(i64::MAX, 1), Err(VokabelError::InvalidQuota { .. })));

        let display = QuotaTarget::new(i64::MAX, i64::MAX / 100).unwrap().render(i64::MAX);
        assert!(display.segments.len() <= 1000);
    }

    #[test]
    fn test_latch_fires_once_per_crossing() {
        let quota = QuotaTarget::default();
        let mut latch = CompletionLatch::new();

        assert!(!latch.observe(69, &quota));
        assert!(latch.observe(70, &quota));
        assert!(latch.is_showing());
        assert!(!latch.observe(70, &quota));

        assert!(latch.dismiss());
        assert!(!latch.dismiss());
        assert!(!latch.observe(70, &quota));
        assert!(!latch.observe(71, &quota));

        // Reset back down to the target from outside
        assert!(latch.observe(70, &quota));
    }

    #[test]
    fn test_latch_fires_on_first_observation_at_target() {
        let quota = QuotaTarget::new(5, 5).unwrap();
        let mut latch = CompletionLatch::new();
        assert!(latch.observe(5, &quota));

        let mut latch = CompletionLatch::new();
        assert!(!latch.observe(6, &quota));
    }
}
