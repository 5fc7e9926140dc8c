//! Batched (pipelined) command groups.
//!
//! A [`Batch`] collects store commands that must become visible to other
//! callers atomically: observers see all of a batch's effects or none of
//! them. There is no isolation guarantee across separate batches.

use crate::Score;

/// One store command inside a batch.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Add members to a set.
    SetAdd { key: String, members: Vec<String> },
    /// Remove members from a set.
    SetRemove { key: String, members: Vec<String> },
    /// Add scored members to an ordered set. Entries apply in order; a
    /// later score for the same member wins.
    ZSetAdd {
        key: String,
        entries: Vec<(String, Score)>,
    },
    /// Remove members from an ordered set.
    ZSetRemove { key: String, members: Vec<String> },
    /// Write a string value unless the key already exists.
    SetIfAbsent { key: String, value: String },
    /// Atomically increment a counter key.
    Incr { key: String },
    /// Delete whole keys of any type.
    Remove { keys: Vec<String> },
}

/// Positional result of one batched command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    /// Number of members/keys affected.
    Count(u64),
    /// Whether a conditional write happened.
    Bool(bool),
    /// Counter value after an increment.
    Int(i64),
}

/// An ordered group of commands submitted in one round trip.
#[derive(Debug, Clone, Default)]
pub struct Batch {
    commands: Vec<Command>,
}

impl Batch {
    /// Create an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a set-add command.
    pub fn set_add(&mut self, key: &str, members: &[&str]) -> &mut Self {
        self.commands.push(Command::SetAdd {
            key: key.to_owned(),
            members: members.iter().map(|m| (*m).to_owned()).collect(),
        });
        self
    }

    /// Queue a set-remove command.
    pub fn set_remove(&mut self, key: &str, members: &[&str]) -> &mut Self {
        self.commands.push(Command::SetRemove {
            key: key.to_owned(),
            members: members.iter().map(|m| (*m).to_owned()).collect(),
        });
        self
    }

    /// Queue an ordered-set-add command.
    pub fn zset_add(&mut self, key: &str, entries: &[(&str, Score)]) -> &mut Self {
        self.commands.push(Command::ZSetAdd {
            key: key.to_owned(),
            entries: entries
                .iter()
                .map(|(m, score)| ((*m).to_owned(), *score))
                .collect(),
        });
        self
    }

    /// Queue an ordered-set-remove command.
    pub fn zset_remove(&mut self, key: &str, members: &[&str]) -> &mut Self {
        self.commands.push(Command::ZSetRemove {
            key: key.to_owned(),
            members: members.iter().map(|m| (*m).to_owned()).collect(),
        });
        self
    }

    /// Queue a set-if-absent command.
    pub fn set_if_absent(&mut self, key: &str, value: &str) -> &mut Self {
        self.commands.push(Command::SetIfAbsent {
            key: key.to_owned(),
            value: value.to_owned(),
        });
        self
    }

    /// Queue a counter increment.
    pub fn incr(&mut self, key: &str) -> &mut Self {
        self.commands.push(Command::Incr {
            key: key.to_owned(),
        });
        self
    }

    /// Queue deletion of whole keys.
    pub fn remove(&mut self, keys: &[String]) -> &mut Self {
        self.commands.push(Command::Remove {
            keys: keys.to_vec(),
        });
        self
    }

    /// Number of queued commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the batch holds no commands.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Consume the batch, yielding its commands in submission order.
    pub fn into_commands(self) -> Vec<Command> {
        self.commands
    }
}
