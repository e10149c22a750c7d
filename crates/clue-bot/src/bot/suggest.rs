use super::ledger_view::LedgerView;
use super::params::TieBreaker;
use clue_core::game::Suggestion;
use clue_core::model::player::PlayerId;
use clue_core::model::room::Room;
use clue_core::model::suspect::Suspect;
use clue_core::model::weapon::Weapon;
use std::collections::BTreeSet;

pub struct SuggestionPlanner;

impl SuggestionPlanner {
    /// Builds a suggestion for `room` out of a still unknown suspect and weapon.
    ///
    /// When every suspect (or weapon) already has a known holder the pick is
    /// made from the full category instead.
    pub fn choose(
        view: &LedgerView<'_>,
        room: Room,
        from_player: PlayerId,
        tie_breaker: &mut TieBreaker,
    ) -> Suggestion {
        let suspect = pick_or_any(view.unknown_suspects(), &Suspect::ALL, tie_breaker);
        let weapon = pick_or_any(view.unknown_weapons(), &Weapon::ALL, tie_breaker);

        let suggestion = Suggestion {
            from_player,
            suspect,
            weapon,
            room,
        };

        if tracing::enabled!(target: "clue_bot::suggest", tracing::Level::DEBUG) {
            tracing::event!(
                target: "clue_bot::suggest",
                tracing::Level::DEBUG,
                player = %from_player,
                room = room.as_str(),
                suspect = suspect.as_str(),
                weapon = weapon.as_str(),
                unknown_remaining = view.ledger().unknown_cards().len(),
                "suggestion chosen"
            );
        }

        suggestion
    }
}

fn pick_or_any<T: Copy + Ord>(unknown: BTreeSet<T>, all: &[T], tie_breaker: &mut TieBreaker) -> T {
    if let Some(pick) = tie_breaker.pick(&unknown) {
        return pick;
    }
    let everything: BTreeSet<T> = all.iter().copied().collect();
    // Category tables are never empty.
    tie_breaker.pick(&everything).unwrap_or(all[0])
}

#[cfg(test)]
mod tests {
    use super::SuggestionPlanner;
    use crate::bot::ledger_view::LedgerView;
    use crate::bot::params::{TieBreak, TieBreaker};
    use clue_core::ledger::Ledger;
    use clue_core::model::card::Card;
    use clue_core::model::player::PlayerId;
    use clue_core::model::room::Room;
    use clue_core::model::suspect::Suspect;
    use clue_core::model::weapon::Weapon;

    fn id(number: u8) -> PlayerId {
        PlayerId::new(number).unwrap()
    }

    #[test]
    fn names_the_current_room_and_unknown_cards() {
        let mut ledger = Ledger::new(id(4), 4).unwrap();
        ledger.mark_self_dealt(&[
            Card::Suspect(Suspect::Scarlet),
            Card::Weapon(Weapon::Knife),
            Card::Room(Room::Hall),
        ]);
        let mut breaker = TieBreaker::new(TieBreak::Ordered, 0);
        let suggestion =
            SuggestionPlanner::choose(&LedgerView::new(&ledger), Room::Hall, id(4), &mut breaker);
        assert_eq!(suggestion.room, Room::Hall);
        assert_eq!(suggestion.suspect, Suspect::Mustard);
        assert_eq!(suggestion.weapon, Weapon::Wrench);
        assert_eq!(suggestion.from_player, id(4));
    }

    #[test]
    fn exhausted_category_falls_back_to_all_cards() {
        let mut ledger = Ledger::new(id(1), 3).unwrap();
        for suspect in Suspect::ALL {
            ledger.mark_confirmed(Card::Suspect(suspect), id(2)).unwrap();
        }
        let mut breaker = TieBreaker::new(TieBreak::Seeded(3), 1);
        let suggestion =
            SuggestionPlanner::choose(&LedgerView::new(&ledger), Room::Study, id(1), &mut breaker);
        assert!(Suspect::ALL.contains(&suggestion.suspect));

        let mut ordered = TieBreaker::new(TieBreak::Ordered, 0);
        let first =
            SuggestionPlanner::choose(&LedgerView::new(&ledger), Room::Study, id(1), &mut ordered);
        assert_eq!(first.suspect, Suspect::Scarlet);
        assert_eq!(first.weapon, Weapon::Knife);
    }
}
