//! Monitor lookup for multi-monitor placement
//!
//! Monitors are queried fresh on every lookup since displays can be
//! hot-plugged. Two lookups are offered: point containment, used when the
//! cursor decides which display to go fullscreen on, and maximum overlap,
//! used to report which display the window is mostly on.

use crate::geometry::{IntPoint, Rect};

/// Snapshot of one connected display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorDescriptor {
    /// Position in the enumeration order of the platform
    pub index: usize,

    /// Top-left corner in the global desktop space
    pub position: IntPoint,

    /// Current video mode resolution
    pub resolution: IntPoint,

    /// Refresh rate in Hz, 0 when unknown
    pub refresh_rate: u32,

    /// Human readable display name
    pub name: String,
}

impl MonitorDescriptor {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.position, self.resolution)
    }
}

/// Source of the connected display list
pub trait MonitorSource {
    /// All connected displays, enumerated fresh
    fn monitors(&self) -> Vec<MonitorDescriptor>;

    /// Display the platform considers primary, if any
    fn primary_monitor(&self) -> Option<MonitorDescriptor>;
}

/// First display whose open rectangle contains `point`
///
/// A point lying exactly on a display boundary is outside it. Returns `None`
/// for points in gaps between or outside all displays; callers fall back to
/// the primary display.
pub fn find_monitor_containing<S: MonitorSource + ?Sized>(source: &S, point: IntPoint) -> Option<MonitorDescriptor> {
    source
        .monitors()
        .into_iter()
        .find(|monitor| monitor.bounds().contains_strict(point))
}

/// Display sharing the largest area with `window_rect`
///
/// Ties keep the earlier display. Returns `None` when the window overlaps no
/// display at all.
pub fn find_monitor_with_max_overlap<S: MonitorSource + ?Sized>(source: &S, window_rect: &Rect) -> Option<MonitorDescriptor> {
    let mut best: Option<(i64, MonitorDescriptor)> = None;

    for monitor in source.monitors() {
        let overlap = monitor.bounds().overlap_area(window_rect);
        let best_overlap = best.as_ref().map(|(area, _)| *area).unwrap_or(0);
        if overlap > best_overlap {
            best = Some((overlap, monitor));
        }
    }

    best.map(|(_, monitor)| monitor)
}

/// Display under `point`, falling back to the primary display
pub fn monitor_at_or_primary<S: MonitorSource + ?Sized>(source: &S, point: IntPoint) -> Option<MonitorDescriptor> {
    find_monitor_containing(source, point).or_else(|| {
        log::debug!("No monitor contains ({}, {}), using primary", point.x, point.y);
        source.primary_monitor()
    })
}
