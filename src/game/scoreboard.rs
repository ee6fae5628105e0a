//! Live scoreboard

use super::document::GameDocument;
use super::PlayerId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreboardEntry {
    /// 1-based; players with equal scores share a rank
    pub rank: usize,
    pub player_id: PlayerId,
    pub nickname: String,
    pub score: u32,
    pub round_score: u32,
    pub round_finished: bool,
    pub guesses_used: usize,
    pub is_host: bool,
}

/// Players by descending cumulative score, ties broken by join order
#[must_use]
pub fn scoreboard(document: &GameDocument) -> Vec<ScoreboardEntry> {
    let mut players: Vec<_> = document.players.values().collect();
    players.sort_by(|a, b| b.score.cmp(&a.score).then(a.seat.cmp(&b.seat)));

    let mut entries: Vec<ScoreboardEntry> = Vec::with_capacity(players.len());
    for (index, player) in players.into_iter().enumerate() {
        let rank = match entries.last() {
            Some(prev) if prev.score == player.score => prev.rank,
            _ => index + 1,
        };

        entries.push(ScoreboardEntry {
            rank,
            player_id: player.id.clone(),
            nickname: player.nickname.clone(),
            score: player.score,
            round_score: player.round_score,
            round_finished: player.round_finished,
            guesses_used: player.guesses.len(),
            is_host: document.is_host(&player.id),
        });
    }

    entries
}
