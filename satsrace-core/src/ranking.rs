//! Finishing order for a completed race.

use crate::{Player, PlayerId};

/// Assign positions to everyone who finished, fastest first.
///
/// Ties keep registration order. Players without a finish time are left
/// unranked. Returns the winner, if anyone finished.
pub fn rank_players(players: &mut [Player]) -> Option<PlayerId> {
    let mut finishers: Vec<(usize, u64)> = players
        .iter()
        .enumerate()
        .filter_map(|(index, p)| p.finish_time_ms().map(|ms| (index, ms)))
        .collect();

    // sort_by_key is stable
    finishers.sort_by_key(|&(_, ms)| ms);

    for player in players.iter_mut() {
        player.set_position(None);
    }
    for (rank, &(index, _)) in finishers.iter().enumerate() {
        players[index].set_position(Some(rank + 1));
    }

    finishers.first().map(|&(index, _)| players[index].id())
}

/// Finished players in rank order, without touching their positions
pub fn standings(players: &[Player]) -> Vec<&Player> {
    let mut finished: Vec<&Player> = players.iter().filter(|p| p.has_finished()).collect();
    finished.sort_by_key(|p| p.finish_time_ms());
    finished
}
