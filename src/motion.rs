//! Scroll-linked card stacking.
//!
//! The frontend feeds raw geometry in; everything that decides how a card
//! looks for a given scroll position lives here so it can be reasoned about
//! without a browser.

pub const MOBILE_BREAKPOINT_PX: f64 = 1024.0;
pub const RESIZE_DEBOUNCE_MS: i32 = 150;

/// Container bounding box as seen from the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContainerGeometry {
    /// `getBoundingClientRect().top`; negative once the container has scrolled past the top.
    pub top: f64,
    pub height: f64,
    pub viewport_height: f64,
}

impl ContainerGeometry {
    /// 0 when the container top meets the viewport top, 1 when its bottom meets the viewport bottom.
    pub fn progress(self) -> f64 {
        let scroll_range = self.height - self.viewport_height;
        if scroll_range <= 0.0 || !scroll_range.is_finite() {
            return if self.top <= 0.0 { 1.0 } else { 0.0 };
        }

        (-self.top / scroll_range).clamp(0.0, 1.0)
    }
}

/// Coalesces scroll/resize notifications into at most one sample per animation frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScrollSampler {
    progress: f64,
    frame_pending: bool,
}

impl ScrollSampler {
    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn frame_pending(&self) -> bool {
        self.frame_pending
    }

    /// Returns `true` when the caller must schedule a frame.
    pub fn request(&mut self) -> bool {
        if self.frame_pending {
            return false;
        }
        self.frame_pending = true;
        true
    }

    /// Runs inside the scheduled frame. An unmounted container keeps the last progress.
    pub fn sample(&mut self, geometry: Option<ContainerGeometry>) -> f64 {
        self.frame_pending = false;
        if let Some(geometry) = geometry {
            self.progress = geometry.progress();
        }
        self.progress
    }

    /// Dropping a pending frame on teardown.
    pub fn cancel(&mut self) {
        self.frame_pending = false;
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardRange {
    pub start: f64,
    pub end: f64,
}

impl CardRange {
    pub fn for_card(index: usize, total: usize) -> Self {
        let total = total.max(1);
        Self {
            start: index.min(total - 1) as f64 / total as f64,
            end: 1.0,
        }
    }

    /// How far `progress` has travelled through this range, clamped to `[0, 1]`.
    pub fn fraction(self, progress: f64) -> f64 {
        if progress <= self.start {
            return 0.0;
        }
        if progress >= self.end {
            return 1.0;
        }

        let span = self.end - self.start;
        if span <= 0.0 {
            return 1.0;
        }
        ((progress - self.start) / span).clamp(0.0, 1.0)
    }

    /// Clamped linear range mapping. Endpoints are returned verbatim.
    pub fn map(self, progress: f64, from: f64, to: f64) -> f64 {
        if progress < self.start {
            return from;
        }
        if progress >= self.end {
            return to;
        }
        from + (to - from) * self.fraction(progress)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardTransform {
    pub scale: f64,
    pub opacity: f64,
    pub icon_offset: f64,
}

impl CardTransform {
    pub const REST: Self = Self {
        scale: 1.0,
        opacity: 1.0,
        icon_offset: 0.0,
    };

    pub fn to_css(self) -> String {
        format!(
            "transform: scale({:.4}); opacity: {:.4}; transform-origin: top center;",
            self.scale, self.opacity
        )
    }

    pub fn icon_css(self) -> String {
        format!("transform: translateY({:.2}px);", self.icon_offset)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StackConfig {
    pub min_scale: f64,
    pub scale_step: f64,
    pub min_opacity: f64,
    pub opacity_step: f64,
    pub parallax: f64,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.8,
            scale_step: 0.03,
            min_opacity: 0.7,
            opacity_step: 0.06,
            parallax: 30.0,
        }
    }
}

impl StackConfig {
    fn depth(index: usize, total: usize) -> f64 {
        total.saturating_sub(index + 1) as f64
    }

    pub fn target_scale(&self, index: usize, total: usize) -> f64 {
        (1.0 - Self::depth(index, total) * self.scale_step).max(self.min_scale)
    }

    pub fn target_opacity(&self, index: usize, total: usize) -> f64 {
        (1.0 - Self::depth(index, total) * self.opacity_step).max(self.min_opacity)
    }

    pub fn card_transform(
        &self,
        progress: f64,
        index: usize,
        total: usize,
        viewport: ViewportClass,
        prefs: MotionPreferences,
    ) -> CardTransform {
        if !prefs.animations_enabled() {
            return CardTransform::REST;
        }

        let range = CardRange::for_card(index, total);
        let icon_offset = match viewport {
            ViewportClass::Desktop => range.map(progress, 0.0, -self.parallax),
            ViewportClass::Narrow => 0.0,
        };

        CardTransform {
            scale: range.map(progress, 1.0, self.target_scale(index, total)),
            opacity: range.map(progress, 1.0, self.target_opacity(index, total)),
            icon_offset,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ViewportClass {
    #[default]
    Desktop,
    Narrow,
}

impl ViewportClass {
    pub fn from_width(width: f64) -> Self {
        if width < MOBILE_BREAKPOINT_PX {
            Self::Narrow
        } else {
            Self::Desktop
        }
    }

    pub fn layout(self) -> StackLayout {
        match self {
            Self::Desktop => StackLayout::DESKTOP,
            Self::Narrow => StackLayout::NARROW,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StackLayout {
    pub base_offset: f64,
    pub spacing_step: f64,
    pub container_height_vh: f64,
}

impl StackLayout {
    pub const DESKTOP: Self = Self {
        base_offset: 220.0,
        spacing_step: 46.0,
        container_height_vh: 60.0,
    };

    pub const NARROW: Self = Self {
        base_offset: 150.0,
        spacing_step: 20.0,
        container_height_vh: 75.0,
    };

    pub fn anchor(&self, index: usize) -> f64 {
        self.base_offset + index as f64 * self.spacing_step
    }

    pub fn z_index(&self, index: usize) -> usize {
        index + 1
    }

    pub fn card_style(&self, index: usize) -> String {
        format!(
            "top: {:.0}px; height: {:.0}vh; z-index: {};",
            self.anchor(index),
            self.container_height_vh,
            self.z_index(index)
        )
    }
}

/// Accessibility and device policy shared by every animated component.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MotionPreferences {
    pub reduced_motion: bool,
    pub coarse_pointer: bool,
}

impl MotionPreferences {
    pub fn animations_enabled(self) -> bool {
        !self.reduced_motion
    }

    pub fn cursor_trail_enabled(self) -> bool {
        !self.reduced_motion && !self.coarse_pointer
    }

    /// Whether scroll position is sampled at all. Cards rest in place otherwise.
    pub fn tracks_scroll(self) -> bool {
        self.animations_enabled()
    }

    pub fn smooth_scroll(self) -> bool {
        self.animations_enabled()
    }
}

/// The side rail that fills as the card stack is scrolled through.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProgressRail {
    pub fill_percent: f64,
    pub label_opacity: f64,
}

impl ProgressRail {
    const LABEL_FADE_END: f64 = 0.1;

    pub fn at(progress: f64) -> Self {
        let progress = progress.clamp(0.0, 1.0);
        Self {
            fill_percent: progress * 100.0,
            label_opacity: (progress / Self::LABEL_FADE_END).min(1.0),
        }
    }

    /// Desktop only, and only while scroll is being tracked.
    pub fn visible(viewport: ViewportClass, preferences: MotionPreferences) -> bool {
        viewport == ViewportClass::Desktop && preferences.tracks_scroll()
    }
}
