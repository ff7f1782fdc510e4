//! In-memory display session and its rolling state machine.

use thiserror::Error;

/// High-level phases the display session can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No prize selected; the display shows the idle screen.
    Idle,
    /// A prize is selected and the display is ready to roll.
    Armed,
    /// Numbers are scrolling; mutations are locked out until the roll ends.
    Rolling,
}

/// Error returned when an action is not valid in the current phase.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot {action} while in {phase:?}")]
pub struct InvalidTransition {
    /// Phase the session was in when the action was attempted.
    pub phase: SessionPhase,
    /// The rejected action, for the error message.
    pub action: &'static str,
}

/// Partial update applied to the session between rolls.
///
/// `current_prize_id` is doubly optional so a patch can distinguish "leave
/// unchanged" from "clear the selection".
#[derive(Debug, Default, Clone)]
pub struct SessionPatch {
    /// New prize selection; `Some(None)` clears it.
    pub current_prize_id: Option<Option<String>>,
    /// New round shown on the display.
    pub current_round_id: Option<u32>,
    /// Number of tokens to draw on the next roll.
    pub draw_count: Option<u32>,
    /// Winners currently shown on the display.
    pub winners: Option<Vec<String>>,
}

/// Volatile per-event display session.
///
/// Lives only in memory; a restart returns the display to the idle screen
/// while the durable draw ledger is untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplaySession {
    /// Prize currently selected on the display, if any.
    pub current_prize_id: Option<String>,
    /// Round currently shown on the display.
    pub current_round_id: u32,
    /// Number of tokens to draw on the next roll.
    pub draw_count: u32,
    /// Whether a roll is in progress.
    pub is_rolling: bool,
    /// Winners of the most recent roll, as shown on screen.
    pub winners: Vec<String>,
    /// Candidate pool frozen when the current roll started.
    pub rolling_pool: Option<Vec<String>>,
    /// Whether the check-in QR code overlay is shown.
    pub show_qrcode: bool,
    /// Message displayed alongside the QR code.
    pub qrcode_message: String,
}

impl Default for DisplaySession {
    fn default() -> Self {
        Self {
            current_prize_id: None,
            current_round_id: 1,
            draw_count: 1,
            is_rolling: false,
            winners: Vec::new(),
            rolling_pool: None,
            show_qrcode: false,
            qrcode_message: String::new(),
        }
    }
}

impl DisplaySession {
    /// Current phase, derived from the selection and rolling flag.
    pub fn phase(&self) -> SessionPhase {
        if self.is_rolling {
            SessionPhase::Rolling
        } else if self.current_prize_id.is_some() {
            SessionPhase::Armed
        } else {
            SessionPhase::Idle
        }
    }

    /// Reject the given action unless the session is between rolls.
    pub fn ensure_not_rolling(&self, action: &'static str) -> Result<(), InvalidTransition> {
        if self.is_rolling {
            return Err(InvalidTransition {
                phase: SessionPhase::Rolling,
                action,
            });
        }
        Ok(())
    }

    /// Start a roll for `prize_id`, freezing the candidate pool the display
    /// will scroll through.
    pub fn begin_roll(
        &mut self,
        prize_id: String,
        draw_count: u32,
        pool: Vec<String>,
    ) -> Result<(), InvalidTransition> {
        self.ensure_not_rolling("start rolling")?;
        self.current_prize_id = Some(prize_id);
        self.draw_count = draw_count;
        self.is_rolling = true;
        self.rolling_pool = Some(pool);
        self.winners.clear();
        Ok(())
    }

    /// End the current roll with its winners.
    pub fn finish_roll(&mut self, winners: Vec<String>) -> Result<(), InvalidTransition> {
        if !self.is_rolling {
            return Err(InvalidTransition {
                phase: self.phase(),
                action: "stop rolling",
            });
        }
        self.is_rolling = false;
        self.rolling_pool = None;
        self.winners = winners;
        Ok(())
    }

    /// End the current roll without winners (the draw failed after the roll
    /// started).
    pub fn abort_roll(&mut self) {
        self.is_rolling = false;
        self.rolling_pool = None;
    }

    /// Apply a partial update; rejected while a roll is in progress.
    pub fn apply_patch(&mut self, patch: SessionPatch) -> Result<(), InvalidTransition> {
        self.ensure_not_rolling("update the display state")?;
        if let Some(prize_id) = patch.current_prize_id {
            self.current_prize_id = prize_id;
        }
        if let Some(round_id) = patch.current_round_id {
            self.current_round_id = round_id;
        }
        if let Some(count) = patch.draw_count {
            self.draw_count = count;
        }
        if let Some(winners) = patch.winners {
            self.winners = winners;
        }
        Ok(())
    }

    /// Toggle the QR code overlay; allowed in any phase, message kept when
    /// omitted.
    pub fn set_qrcode(&mut self, show: bool, message: Option<String>) {
        self.show_qrcode = show;
        if let Some(message) = message {
            self.qrcode_message = message;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_session_is_idle() {
        let session = DisplaySession::default();
        assert_eq!(session.phase(), SessionPhase::Idle);
        assert_eq!(session.current_round_id, 1);
        assert_eq!(session.draw_count, 1);
    }

    #[test]
    fn selecting_a_prize_arms_the_session() {
        let mut session = DisplaySession::default();
        session
            .apply_patch(SessionPatch {
                current_prize_id: Some(Some("1-1".into())),
                ..SessionPatch::default()
            })
            .unwrap();
        assert_eq!(session.phase(), SessionPhase::Armed);
    }

    #[test]
    fn begin_roll_freezes_the_pool_and_clears_winners() {
        let mut session = DisplaySession {
            winners: vec!["001".into()],
            ..DisplaySession::default()
        };
        session
            .begin_roll("1-1".into(), 2, vec!["002".into(), "003".into()])
            .unwrap();
        assert_eq!(session.phase(), SessionPhase::Rolling);
        assert!(session.winners.is_empty());
        assert_eq!(session.rolling_pool.as_deref().map(<[String]>::len), Some(2));
    }

    #[test]
    fn double_start_is_rejected() {
        let mut session = DisplaySession::default();
        session.begin_roll("1-1".into(), 1, vec!["001".into()]).unwrap();
        let err = session
            .begin_roll("1-1".into(), 1, vec!["001".into()])
            .unwrap_err();
        assert_eq!(err.phase, SessionPhase::Rolling);
    }

    #[test]
    fn patch_is_rejected_while_rolling() {
        let mut session = DisplaySession::default();
        session.begin_roll("1-1".into(), 1, vec!["001".into()]).unwrap();
        assert!(session.apply_patch(SessionPatch::default()).is_err());
    }

    #[test]
    fn finish_roll_records_winners_and_drops_the_pool() {
        let mut session = DisplaySession::default();
        session.begin_roll("1-1".into(), 1, vec!["001".into()]).unwrap();
        session.finish_roll(vec!["001".into()]).unwrap();
        assert_eq!(session.phase(), SessionPhase::Armed);
        assert_eq!(session.winners, vec!["001".to_string()]);
        assert!(session.rolling_pool.is_none());
    }

    #[test]
    fn finish_without_start_is_rejected() {
        let mut session = DisplaySession::default();
        assert!(session.finish_roll(vec![]).is_err());
    }

    #[test]
    fn abort_roll_leaves_no_winners() {
        let mut session = DisplaySession::default();
        session.begin_roll("1-1".into(), 1, vec!["001".into()]).unwrap();
        session.abort_roll();
        assert_eq!(session.phase(), SessionPhase::Armed);
        assert!(session.winners.is_empty());
    }

    #[test]
    fn qrcode_toggle_keeps_message_when_omitted() {
        let mut session = DisplaySession::default();
        session.set_qrcode(true, Some("scan to join".into()));
        session.set_qrcode(false, None);
        assert!(!session.show_qrcode);
        assert_eq!(session.qrcode_message, "scan to join");
    }
}
