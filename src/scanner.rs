//! Scan Controller
//!
//! Camera decode lifecycle: `Idle -> Starting -> Armed -> Active -> Idle`.
//! Frames decoded during the warm-up window are dropped; the first frame after
//! it is accepted once and the controller returns to `Idle` before the lookup
//! runs, so a burst of frames yields a single lookup.

use crate::config;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScanPhase {
    Idle,
    Starting,
    /// Camera running, decodes ignored until `ready_at` (ms since epoch)
    Armed { ready_at: f64 },
    Active,
}

/// What to do with one decoded frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanDecision {
    Ignore,
    /// Tear down the camera, then look this payload up
    Accept(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanController {
    phase: ScanPhase,
    warmup_ms: f64,
    /// Stop pressed before the camera came up
    stop_pending: bool,
}

impl Default for ScanController {
    fn default() -> Self {
        Self::new(config::SCAN_WARMUP_MS)
    }
}

impl ScanController {
    pub fn new(warmup_ms: f64) -> Self {
        Self {
            phase: ScanPhase::Idle,
            warmup_ms,
            stop_pending: false,
        }
    }

    pub fn phase(&self) -> ScanPhase {
        self.phase
    }

    /// Phase as seen at `now`; an armed controller past its deadline is active
    pub fn phase_at(&self, now: f64) -> ScanPhase {
        match self.phase {
            ScanPhase::Armed { ready_at } if now >= ready_at => ScanPhase::Active,
            phase => phase,
        }
    }

    /// Camera view and stop button are visible in every phase but `Idle`
    pub fn is_running(&self) -> bool {
        self.phase != ScanPhase::Idle
    }

    /// Returns false when a session is already in progress
    pub fn begin_start(&mut self) -> bool {
        if self.phase != ScanPhase::Idle {
            return false;
        }
        self.phase = ScanPhase::Starting;
        self.stop_pending = false;
        true
    }

    /// Camera is up; open the warm-up window.
    /// Returns true when a stop arrived meanwhile and the camera must be released.
    pub fn on_started(&mut self, now: f64) -> bool {
        if self.phase != ScanPhase::Starting {
            return false;
        }
        if self.stop_pending {
            self.stop_pending = false;
            self.phase = ScanPhase::Idle;
            return true;
        }
        self.phase = ScanPhase::Armed {
            ready_at: now + self.warmup_ms,
        };
        false
    }

    /// Camera access failed; nothing to release
    pub fn on_start_failed(&mut self) {
        self.phase = ScanPhase::Idle;
        self.stop_pending = false;
    }

    pub fn on_decoded(&mut self, now: f64, payload: &str) -> ScanDecision {
        match self.phase_at(now) {
            ScanPhase::Active => {
                self.phase = ScanPhase::Idle;
                ScanDecision::Accept(payload.trim().to_string())
            }
            _ => ScanDecision::Ignore,
        }
    }

    /// Returns true when the caller must release the camera now.
    /// While starting, the stop is deferred to `on_started`.
    pub fn stop(&mut self) -> bool {
        match self.phase {
            ScanPhase::Armed { .. } | ScanPhase::Active => {
                self.phase = ScanPhase::Idle;
                true
            }
            ScanPhase::Starting => {
                self.stop_pending = true;
                false
            }
            ScanPhase::Idle => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn armed_at(t: f64) -> ScanController {
        let mut c = ScanController::default();
        assert!(c.begin_start());
        c.on_started(t);
        c
    }

    #[test]
    fn test_start_is_noop_when_running() {
        let mut c = armed_at(0.0);
        assert!(!c.begin_start());
        assert_eq!(c.phase(), ScanPhase::Armed { ready_at: 3000.0 });
    }

    #[test]
    fn test_decodes_during_warmup_are_dropped() {
        let mut c = armed_at(1000.0);
        assert_eq!(c.on_decoded(1000.0, "A1"), ScanDecision::Ignore);
        assert_eq!(c.on_decoded(3999.0, "A1"), ScanDecision::Ignore);
        assert!(c.is_running());
    }

    #[test]
    fn test_first_decode_after_deadline_accepted_once() {
        let mut c = armed_at(0.0);
        assert_eq!(c.phase_at(3000.0), ScanPhase::Active);
        assert_eq!(c.on_decoded(3000.0, " A1 "), ScanDecision::Accept("A1".to_string()));
        // Frames already queued by the decoder
        assert_eq!(c.on_decoded(3010.0, "A1"), ScanDecision::Ignore);
        assert_eq!(c.on_decoded(3020.0, "B2"), ScanDecision::Ignore);
        assert_eq!(c.phase(), ScanPhase::Idle);
    }

    #[test]
    fn test_decode_while_starting_is_ignored() {
        let mut c = ScanController::default();
        c.begin_start();
        assert_eq!(c.on_decoded(99999.0, "A1"), ScanDecision::Ignore);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut c = armed_at(0.0);
        assert!(c.stop());
        assert!(!c.stop());
        assert_eq!(c.phase(), ScanPhase::Idle);
    }

    #[test]
    fn test_start_failure_returns_to_idle() {
        let mut c = ScanController::default();
        c.begin_start();
        c.on_start_failed();
        assert_eq!(c.phase(), ScanPhase::Idle);
        assert!(!c.stop());
        assert!(c.begin_start());
    }

    #[test]
    fn test_stop_while_starting_releases_on_start() {
        let mut c = ScanController::default();
        assert!(c.begin_start());
        assert!(!c.stop());
        assert!(c.on_started(0.0));
        assert_eq!(c.phase(), ScanPhase::Idle);
        assert_eq!(c.on_decoded(3500.0, "A1"), ScanDecision::Ignore);
    }

    #[test]
    fn test_pending_stop_does_not_leak_into_next_session() {
        let mut c = ScanController::default();
        c.begin_start();
        c.stop();
        c.on_start_failed();
        assert!(c.begin_start());
        assert!(!c.on_started(0.0));
        assert_eq!(c.on_decoded(3500.0, "A1"), ScanDecision::Accept("A1".to_string()));
    }

    #[test]
    fn test_restart_opens_new_window() {
        let mut c = armed_at(0.0);
        c.stop();
        c.begin_start();
        c.on_started(10_000.0);
        assert_eq!(c.on_decoded(11_000.0, "A1"), ScanDecision::Ignore);
        assert_eq!(c.on_decoded(13_000.0, "A1"), ScanDecision::Accept("A1".to_string()));
    }
}
