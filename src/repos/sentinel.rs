/// Identifies an observed region (for example the sentinel row under a list).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegionId(pub u32);

/// Visibility change reported for an observed region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Intersection {
    pub region: RegionId,
    pub is_intersecting: bool,
}

/// Capability to watch whether regions intersect their scroll container.
///
/// Implementations report an [`Intersection`] when an observed region
/// becomes visible, and once immediately after [`VisibilitySignal::observe`]
/// if it already is.
pub trait VisibilitySignal {
    fn observe(&mut self, region: RegionId);
    fn unobserve(&mut self, region: RegionId);
}

/// [`VisibilitySignal`] for a single sentinel placed just past the last row
/// of a scrolling list.
///
/// The owner reports viewport geometry after each render through
/// [`ScrollSentinel::update_viewport`], which yields an intersection whenever
/// the sentinel row enters the visible window.
#[derive(Debug, Clone)]
pub struct ScrollSentinel {
    region: RegionId,
    observing: bool,
    intersecting: bool,
}

impl ScrollSentinel {
    #[must_use]
    pub fn new(region: RegionId) -> Self {
        Self {
            region,
            observing: false,
            intersecting: false,
        }
    }

    #[must_use]
    pub fn region(&self) -> RegionId {
        self.region
    }

    #[must_use]
    pub fn is_observing(&self) -> bool {
        self.observing
    }

    /// Report the list's scroll offset, visible height and total row count.
    ///
    /// The sentinel sits at index `total_rows`. Returns an intersection event
    /// when it transitions into view while observed.
    pub fn update_viewport(
        &mut self,
        offset: usize,
        visible_rows: usize,
        total_rows: usize,
    ) -> Option<Intersection> {
        let intersecting = visible_rows > 0
            && offset <= total_rows
            && total_rows < offset.saturating_add(visible_rows);
        let entered = intersecting && !self.intersecting;
        self.intersecting = intersecting;

        (self.observing && entered).then_some(Intersection {
            region: self.region,
            is_intersecting: true,
        })
    }
}

impl VisibilitySignal for ScrollSentinel {
    fn observe(&mut self, region: RegionId) {
        if region != self.region || self.observing {
            return;
        }
        self.observing = true;
        // A fresh observation reports the current state on the next viewport
        // update, even if the sentinel never left the view.
        self.intersecting = false;
    }

    fn unobserve(&mut self, region: RegionId) {
        if region == self.region {
            self.observing = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REGION: RegionId = RegionId(1);

    #[test]
    fn fires_once_when_sentinel_scrolls_into_view() {
        let mut sentinel = ScrollSentinel::new(REGION);
        sentinel.observe(REGION);

        assert_eq!(sentinel.update_viewport(0, 5, 10), None);
        assert!(sentinel.update_viewport(6, 5, 10).is_some());
        assert_eq!(sentinel.update_viewport(6, 5, 10), None);
        assert_eq!(sentinel.update_viewport(7, 5, 10), None);
    }

    #[test]
    fn unobserved_sentinel_stays_silent() {
        let mut sentinel = ScrollSentinel::new(REGION);
        assert_eq!(sentinel.update_viewport(0, 20, 3), None);

        sentinel.observe(RegionId(2));
        assert_eq!(sentinel.update_viewport(0, 20, 3), None);
    }

    #[test]
    fn reobserving_reports_an_already_visible_sentinel() {
        let mut sentinel = ScrollSentinel::new(REGION);
        sentinel.observe(REGION);
        assert!(sentinel.update_viewport(0, 20, 10).is_some());

        sentinel.unobserve(REGION);
        assert_eq!(sentinel.update_viewport(0, 20, 12), None);

        sentinel.observe(REGION);
        assert!(sentinel.update_viewport(0, 20, 12).is_some());
    }

    #[test]
    fn leaving_and_reentering_fires_again() {
        let mut sentinel = ScrollSentinel::new(REGION);
        sentinel.observe(REGION);
        assert!(sentinel.update_viewport(10, 5, 12).is_some());
        assert_eq!(sentinel.update_viewport(0, 5, 12), None);
        assert!(sentinel.update_viewport(9, 5, 12).is_some());
    }

    #[test]
    fn zero_height_viewport_never_intersects() {
        let mut sentinel = ScrollSentinel::new(REGION);
        sentinel.observe(REGION);
        assert_eq!(sentinel.update_viewport(0, 0, 0), None);
    }
}
