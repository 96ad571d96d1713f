use std::time::{Duration, Instant};

use crate::anim::{back_out, progress, Fade};

/// Display lifecycle phases. `Showing`/`Hiding` mean the entry/exit
/// animation is in flight; the machine itself never blocks on either.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Hidden,
    Showing,
    Visible,
    Hiding,
}

#[derive(Debug, Clone)]
pub struct OverlayConfig {
    pub auto_hide: Duration,
    pub topmost_release: Duration,
    pub entry_fade: Duration,
    pub entry_slide: Duration,
    pub exit_fade: Duration,
    pub rebrighten: Duration,
    pub target_opacity: f32,
    pub slide_offset: f32,
    pub back_amplitude: f32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            auto_hide: Duration::from_secs(10),
            topmost_release: Duration::from_millis(350),
            entry_fade: Duration::from_millis(200),
            entry_slide: Duration::from_millis(250),
            exit_fade: Duration::from_millis(300),
            rebrighten: Duration::from_millis(120),
            target_opacity: 0.95,
            slide_offset: 30.0,
            back_amplitude: 0.15,
        }
    }
}

/// The single display sink both input channels append into.
///
/// All mutation happens on the UI context; time is passed in explicitly so
/// the frame loop drives it in production and tests drive it directly.
/// Each timer purpose owns one deadline slot that a restart overwrites, so
/// pending timers never stack.
pub struct Overlay {
    cfg: OverlayConfig,
    phase: Phase,
    text: String,
    fade: Option<Fade>,
    slide_started: Option<Instant>,
    auto_hide_at: Option<Instant>,
    topmost_until: Option<Instant>,
    topmost: bool,
}

impl Overlay {
    pub fn new(cfg: OverlayConfig) -> Self {
        Self {
            cfg,
            phase: Phase::Hidden,
            text: String::new(),
            fade: None,
            slide_started: None,
            auto_hide_at: None,
            topmost_until: None,
            topmost: false,
        }
    }

    /// Append `text` and (re)start the show cycle.
    ///
    /// From `Hidden`, and equally from `Hiding` (a present interrupts an
    /// in-flight exit), this begins the entry animation, takes the
    /// always-on-top attribute and arms its release deadline. From
    /// `Showing`/`Visible` it only re-brightens when the overlay is dimmer
    /// than the steady target. Every call re-arms the auto-hide deadline
    /// from zero.
    pub fn present(&mut self, text: &str, now: Instant) {
        match self.phase {
            Phase::Hidden | Phase::Hiding => {
                self.phase = Phase::Showing;
                self.fade = Some(Fade::new(0.0, self.cfg.target_opacity, now, self.cfg.entry_fade));
                self.slide_started = Some(now);
                self.topmost = true;
                self.topmost_until = Some(now + self.cfg.topmost_release);
            }
            Phase::Showing | Phase::Visible => {
                let current = self.opacity(now);
                if current < self.cfg.target_opacity {
                    self.fade = Some(Fade::new(
                        current,
                        self.cfg.target_opacity,
                        now,
                        self.cfg.rebrighten,
                    ));
                }
            }
        }

        self.text.push_str(text);
        self.auto_hide_at = Some(now + self.cfg.auto_hide);
    }

    /// Advance timer-driven transitions to `now`.
    pub fn tick(&mut self, now: Instant) {
        if let Some(release) = self.topmost_until {
            if now >= release {
                self.topmost = false;
                self.topmost_until = None;
            }
        }

        if self.phase == Phase::Showing {
            let entry = self.cfg.entry_fade.max(self.cfg.entry_slide);
            let done = self
                .slide_started
                .map(|s| now >= s + entry)
                .unwrap_or(true);
            if done {
                self.phase = Phase::Visible;
            }
        }

        if matches!(self.phase, Phase::Showing | Phase::Visible) {
            if let Some(deadline) = self.auto_hide_at {
                if now >= deadline {
                    self.phase = Phase::Hiding;
                    self.fade = Some(Fade::new(self.opacity(now), 0.0, now, self.cfg.exit_fade));
                    self.auto_hide_at = None;
                }
            }
        }

        if self.phase == Phase::Hiding {
            let faded_out = self.fade.map(|f| f.done(now)).unwrap_or(true);
            if faded_out {
                // The accumulated text is cleared here, at the end of the
                // exit animation, and nowhere else in the cycle.
                self.phase = Phase::Hidden;
                self.text.clear();
                self.fade = None;
                self.slide_started = None;
                self.topmost = false;
                self.topmost_until = None;
            }
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the window should be mapped at all.
    pub fn visible(&self) -> bool {
        self.phase != Phase::Hidden
    }

    /// Whether the temporary always-on-top attribute is currently held.
    pub fn topmost(&self) -> bool {
        self.topmost
    }

    pub fn opacity(&self, now: Instant) -> f32 {
        match self.phase {
            Phase::Hidden => 0.0,
            _ => self
                .fade
                .map(|f| f.at(now))
                .unwrap_or(self.cfg.target_opacity),
        }
    }

    /// Vertical offset of the bar during the entry slide, in points.
    pub fn slide_offset(&self, now: Instant) -> f32 {
        match (self.phase, self.slide_started) {
            (Phase::Showing | Phase::Visible, Some(started)) => {
                let t = progress(started, self.cfg.entry_slide, now);
                self.cfg.slide_offset * (1.0 - back_out(t, self.cfg.back_amplitude))
            }
            _ => 0.0,
        }
    }

    /// Whether an entry/exit/re-brighten animation is in flight, meaning the
    /// frame loop should keep repainting at frame rate.
    pub fn animating(&self, now: Instant) -> bool {
        match self.phase {
            Phase::Showing | Phase::Hiding => true,
            Phase::Visible => self.fade.map(|f| !f.done(now)).unwrap_or(false),
            Phase::Hidden => false,
        }
    }

    /// Earliest instant at which `tick` has something to do, for repaint
    /// scheduling. `None` when fully idle.
    pub fn next_deadline(&self, now: Instant) -> Option<Instant> {
        let mut deadlines: Vec<Instant> = Vec::new();
        if let Some(fade) = self.fade {
            if !fade.done(now) {
                deadlines.push(fade.end());
            }
        }
        if self.phase == Phase::Showing {
            if let Some(started) = self.slide_started {
                deadlines.push(started + self.cfg.entry_fade.max(self.cfg.entry_slide));
            }
        }
        if let Some(deadline) = self.auto_hide_at {
            deadlines.push(deadline);
        }
        if let Some(release) = self.topmost_until {
            deadlines.push(release);
        }
        if self.phase == Phase::Hiding {
            // Make sure the tick that finishes the exit runs even if the
            // fade already completed between frames.
            if let Some(fade) = self.fade {
                deadlines.push(fade.end().max(now));
            }
        }
        deadlines.into_iter().min()
    }
}
