//! Turn-order check against the event log.
//!
//! Only the immediately preceding mover of the current game is compared with
//! the actor. Anyone else may move, including someone who played two turns ago.

use tracing::debug;

use crate::errors::TurnRejection;
use crate::turns::event_log::EventLog;

pub fn authorize(actor: &str, log: &EventLog) -> Result<(), TurnRejection> {
    let Some((previous, _)) = log.current_moves().next() else {
        debug!(actor, "no earlier move in this game, turn authorized");
        return Ok(());
    };

    if previous.actor == actor {
        return Err(TurnRejection::ConsecutiveMove {
            actor: actor.to_owned(),
        });
    }

    debug!(actor, previous = %previous.actor, "turn authorized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::authorize;
    use crate::errors::TurnRejection;
    use crate::turns::event_log::tests::event;
    use crate::turns::event_log::EventLog;

    #[test]
    fn previous_mover_is_rejected_others_allowed() {
        let log = EventLog::new(vec![
            event("B", "chess|move|e2e4|1", 1),
            event("A", "chess|new|", 0),
        ]);

        assert_eq!(
            authorize("B", &log),
            Err(TurnRejection::ConsecutiveMove {
                actor: "B".to_owned()
            })
        );
        assert_eq!(authorize("C", &log), Ok(()));
        assert_eq!(authorize("A", &log), Ok(()));
    }

    #[test]
    fn empty_log_and_fresh_game_authorize() {
        assert_eq!(authorize("B", &EventLog::default()), Ok(()));

        let log = EventLog::new(vec![
            event("A", "chess|new", 1),
            event("B", "chess|move|e2e4", 0),
        ]);
        assert_eq!(authorize("B", &log), Ok(()));
    }

    #[test]
    fn only_the_latest_mover_matters() {
        let log = EventLog::new(vec![
            event("C", "chess|move|e7e5", 2),
            event("B", "chess|move|e2e4", 1),
        ]);
        assert_eq!(authorize("B", &log), Ok(()));
    }

    #[test]
    fn rejected_and_unrelated_events_are_skipped() {
        let mut confused = event("C", "chess|move|e7e5", 3);
        confused.rejected = true;
        let log = EventLog::new(vec![
            confused,
            event("C", "feature request", 2),
            event("B", "chess|move|e2e4", 1),
        ]);
        assert!(authorize("B", &log).is_err());
        assert_eq!(authorize("C", &log), Ok(()));
    }
}
