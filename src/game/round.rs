use chrono::{DateTime, Local};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

use super::mode::{GameMode, RoundLength};
use crate::draw::{DrawOutcome, DrawRequest, DrawTicket};

/// How a draw result is turned into a word that has not been shown yet.
#[derive(
    Debug, Copy, Clone, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Sampler {
    /// draw over the unseen words only; every draw shows a word
    #[default]
    Remaining,
    /// draw over the whole pool and draw again on a repeat
    Rejection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    TimeUp,
    PoolExhausted,
    EmptyPool,
    Abandoned,
}

/// What is left of a round once it is over.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundSummary {
    pub mode: GameMode,
    pub words: Vec<String>,
    pub reason: EndReason,
    pub ended_at: DateTime<Local>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Shown {
    index: usize,
    remaining: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawStep {
    /// a new word is on screen; `first` is set for the round's opening word
    Show { first: bool },
    Retry(DrawRequest),
    Exhausted,
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickStep {
    Idle,
    Counted(u32),
    Expired,
}

/// A round in progress, from the moment the pool is snapshotted.
///
/// There is no countdown until the first word has been drawn; `shown` carries
/// both the word and its timer so one never exists without the other.
#[derive(Debug, Clone)]
pub struct Round {
    id: u64,
    mode: GameMode,
    length: RoundLength,
    sampler: Sampler,
    resets_on_new_word: bool,
    pool: Vec<String>,
    seen: Vec<usize>,
    seen_mask: Vec<bool>,
    shown: Option<Shown>,
    pending: Option<DrawRequest>,
    next_seq: u64,
}

impl Round {
    pub fn new(
        id: u64,
        mode: GameMode,
        length: RoundLength,
        sampler: Sampler,
        resets_on_new_word: bool,
        pool: Vec<String>,
    ) -> Self {
        let seen_mask = vec![false; pool.len()];
        Self {
            id,
            mode,
            length,
            sampler,
            resets_on_new_word,
            pool,
            seen: Vec::new(),
            seen_mask,
            shown: None,
            pending: None,
            next_seq: 0,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn length(&self) -> RoundLength {
        self.length
    }

    pub fn pool(&self) -> &[String] {
        &self.pool
    }

    pub fn is_active(&self) -> bool {
        self.shown.is_some()
    }

    pub fn draw_in_flight(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_exhausted(&self) -> bool {
        self.seen.len() == self.pool.len()
    }

    pub fn current_word(&self) -> Option<&str> {
        self.shown.map(|s| self.pool[s.index].as_str())
    }

    pub fn remaining_secs(&self) -> Option<u32> {
        self.shown.map(|s| s.remaining)
    }

    /// Words shown so far, most recent first.
    pub fn seen_words(&self) -> impl Iterator<Item = &str> {
        self.seen.iter().rev().map(|&i| self.pool[i].as_str())
    }

    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }

    /// Issues the next draw, or `None` when there is nothing left to show.
    ///
    /// Replaces any draw still in flight; only the newest ticket is honoured.
    pub fn request_draw(&mut self) -> Option<DrawRequest> {
        let unseen = self.pool.len() - self.seen.len();
        let upper = match self.sampler {
            Sampler::Remaining => unseen,
            Sampler::Rejection if unseen == 0 => 0,
            Sampler::Rejection => self.pool.len(),
        };
        let upper = NonZeroUsize::new(upper)?;

        let request = DrawRequest {
            ticket: DrawTicket {
                round: self.id,
                seq: self.next_seq,
            },
            upper,
        };
        self.next_seq += 1;
        self.pending = Some(request);
        Some(request)
    }

    pub fn resolve(&mut self, outcome: DrawOutcome) -> DrawStep {
        let Some(request) = self.pending.filter(|r| r.ticket == outcome.ticket) else {
            return DrawStep::Stale;
        };
        self.pending = None;

        if outcome.index == 0 || outcome.index > request.upper.get() {
            tracing::warn!(
                index = outcome.index,
                upper = request.upper.get(),
                "draw result out of range, drawing again"
            );
            return self.retry();
        }

        let index = match self.sampler {
            Sampler::Remaining => self.nth_unseen(outcome.index - 1),
            Sampler::Rejection => Some(outcome.index - 1),
        };
        let Some(index) = index else {
            return self.retry();
        };

        if self.seen_mask[index] {
            return self.retry();
        }

        let first = self.shown.is_none();
        let remaining = match self.shown {
            Some(shown) if !self.resets_on_new_word => shown.remaining,
            _ => self.length.secs(),
        };

        self.seen_mask[index] = true;
        self.seen.push(index);
        self.shown = Some(Shown { index, remaining });
        DrawStep::Show { first }
    }

    fn retry(&mut self) -> DrawStep {
        match self.request_draw() {
            Some(request) => DrawStep::Retry(request),
            None => DrawStep::Exhausted,
        }
    }

    fn nth_unseen(&self, n: usize) -> Option<usize> {
        self.seen_mask
            .iter()
            .enumerate()
            .filter(|&(_, &seen)| !seen)
            .nth(n)
            .map(|(i, _)| i)
    }

    pub fn tick(&mut self) -> TickStep {
        let Some(shown) = self.shown.as_mut() else {
            return TickStep::Idle;
        };

        shown.remaining = shown.remaining.saturating_sub(1);
        if shown.remaining == 0 {
            TickStep::Expired
        } else {
            TickStep::Counted(shown.remaining)
        }
    }

    pub fn into_summary(self, reason: EndReason) -> RoundSummary {
        let words = self.seen.iter().map(|&i| self.pool[i].clone()).collect();
        RoundSummary {
            mode: self.mode,
            words,
            reason,
            ended_at: Local::now(),
        }
    }
}
