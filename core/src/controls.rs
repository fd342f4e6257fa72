//! Runtime label controls shared between the widgets and the frame loop.

use crate::prelude::LabelDefaults;
use crate::processing::LabelParams;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

pub const MIN_FONTSIZE: u32 = 6;
pub const MAX_FONTSIZE: u32 = 24;

/// Independent scalars; each one is read on its own, so no lock is needed.
#[derive(Debug)]
pub struct UiParameters {
    show_labels: AtomicBool,
    label_fontsize: AtomicU32,
    label_every: AtomicU32,
    clear_requested: AtomicBool,
}

impl UiParameters {
    pub fn new(defaults: &LabelDefaults) -> Self {
        Self {
            show_labels: AtomicBool::new(defaults.show_labels),
            label_fontsize: AtomicU32::new(clamp_fontsize(i64::from(defaults.label_fontsize))),
            label_every: AtomicU32::new(clamp_every(i64::from(defaults.label_every))),
            clear_requested: AtomicBool::new(false),
        }
    }

    pub fn show_labels(&self) -> bool {
        self.show_labels.load(Ordering::Relaxed)
    }

    pub fn label_fontsize(&self) -> u32 {
        self.label_fontsize.load(Ordering::Relaxed)
    }

    pub fn label_every(&self) -> u32 {
        self.label_every.load(Ordering::Relaxed)
    }

    pub fn label_params(&self) -> LabelParams {
        LabelParams {
            show_labels: self.show_labels(),
            label_fontsize: self.label_fontsize(),
            label_every: self.label_every(),
        }
    }

    /// Returns true once per "labels off" transition.
    pub fn take_clear_request(&self) -> bool {
        self.clear_requested.swap(false, Ordering::AcqRel)
    }
}

impl Default for UiParameters {
    fn default() -> Self {
        Self::new(&LabelDefaults::default())
    }
}

/// Setter handle handed to the widget layer.
#[derive(Debug, Clone)]
pub struct ControlSurface {
    params: Arc<UiParameters>,
}

impl ControlSurface {
    pub fn new(params: Arc<UiParameters>) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &UiParameters {
        &self.params
    }

    /// Flips label visibility and returns the new state.
    pub fn toggle_labels(&self) -> bool {
        let shown = !self.params.show_labels.fetch_xor(true, Ordering::AcqRel);
        if !shown {
            self.params.clear_requested.store(true, Ordering::Release);
        }
        shown
    }

    pub fn set_show_labels(&self, show: bool) {
        let was = self.params.show_labels.swap(show, Ordering::AcqRel);
        if was && !show {
            self.params.clear_requested.store(true, Ordering::Release);
        }
    }

    pub fn set_label_fontsize(&self, size: i64) -> u32 {
        let size = clamp_fontsize(size);
        self.params.label_fontsize.store(size, Ordering::Relaxed);
        size
    }

    pub fn set_label_every(&self, every: i64) -> u32 {
        let every = clamp_every(every);
        self.params.label_every.store(every, Ordering::Relaxed);
        every
    }
}

fn clamp_fontsize(size: i64) -> u32 {
    size.clamp(i64::from(MIN_FONTSIZE), i64::from(MAX_FONTSIZE)) as u32
}

fn clamp_every(every: i64) -> u32 {
    every.clamp(1, i64::from(u32::MAX)) as u32
}
