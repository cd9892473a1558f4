use crate::match_stats::{DuoSet, MatchDetail, Side};

/// A match in which at least one duo took part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuoGame {
    pub side: Side,
    pub won: bool,
}

/// Finds the first participant belonging to the duo set and reports the
/// result of their side. A match counts at most once, whatever the number
/// of duos in it.
pub fn classify(match_: &MatchDetail, duos: &DuoSet) -> Option<DuoGame> {
    let duo = match_
        .participants()
        .iter()
        .find(|p| duos.contains(&p.account_id, &p.name))?;
    let side = Side::from_slot(duo.slot);
    Some(DuoGame {
        side,
        won: match_.is_won_by(side),
    })
}
