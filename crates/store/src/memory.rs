//! In-memory reference store.
//!
//! One lock guards one map; [`Store::apply`] holds the write guard for the
//! whole batch, which is exactly the all-or-nothing visibility the batch
//! contract asks for. A command that fails mid-batch restores the
//! pre-batch state before the error surfaces.

use std::collections::HashSet;

use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHashSet};
use weft_core::{WeftError, WeftResult};

use crate::batch::{Batch, Command, Reply};
use crate::{Score, Store};

/// One keyed entry. Keys are typed: reusing a key with a different
/// primitive is a wrong-type error, never a silent overwrite.
#[derive(Debug, Clone)]
enum Entry {
    Set(FxHashSet<String>),
    ZSet(FxHashMap<String, Score>),
    Str(String),
}

type Map = FxHashMap<String, Entry>;

/// In-process store implementing the full primitive protocol.
///
/// # Thread safety
///
/// All operations are thread-safe. Single commands take the lock briefly;
/// batches take it for their whole duration.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<Map>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live keys, for tests and diagnostics.
    pub fn key_count(&self) -> usize {
        self.data.read().len()
    }
}

impl Store for MemoryStore {
    fn set_add(&self, key: &str, members: &[&str]) -> WeftResult<u64> {
        set_add_in(&mut self.data.write(), key, members)
    }

    fn set_remove(&self, key: &str, members: &[&str]) -> WeftResult<u64> {
        set_remove_in(&mut self.data.write(), key, members)
    }

    fn set_contains(&self, key: &str, member: &str) -> WeftResult<bool> {
        match self.data.read().get(key) {
            Some(Entry::Set(set)) => Ok(set.contains(member)),
            Some(_) => Err(WeftError::wrong_type(key)),
            None => Ok(false),
        }
    }

    fn set_members(&self, key: &str) -> WeftResult<HashSet<String>> {
        match self.data.read().get(key) {
            Some(Entry::Set(set)) => Ok(set.iter().cloned().collect()),
            Some(_) => Err(WeftError::wrong_type(key)),
            None => Ok(HashSet::new()),
        }
    }

    fn set_union(&self, keys: &[String]) -> WeftResult<HashSet<String>> {
        let guard = self.data.read();
        let mut union = HashSet::new();
        for key in keys {
            match guard.get(key.as_str()) {
                Some(Entry::Set(set)) => union.extend(set.iter().cloned()),
                Some(_) => return Err(WeftError::wrong_type(key)),
                None => {}
            }
        }
        Ok(union)
    }

    fn set_card(&self, key: &str) -> WeftResult<u64> {
        match self.data.read().get(key) {
            Some(Entry::Set(set)) => Ok(set.len() as u64),
            Some(_) => Err(WeftError::wrong_type(key)),
            None => Ok(0),
        }
    }

    fn zset_add(&self, key: &str, entries: &[(&str, Score)]) -> WeftResult<u64> {
        zset_add_in(&mut self.data.write(), key, entries)
    }

    fn zset_remove(&self, key: &str, members: &[&str]) -> WeftResult<u64> {
        zset_remove_in(&mut self.data.write(), key, members)
    }

    fn zset_range(&self, key: &str, start: i64, stop: i64) -> WeftResult<Vec<String>> {
        let guard = self.data.read();
        let scored = match guard.get(key) {
            Some(Entry::ZSet(scored)) => scored,
            Some(_) => return Err(WeftError::wrong_type(key)),
            None => return Ok(Vec::new()),
        };
        let mut members: Vec<(&String, &Score)> = scored.iter().collect();
        members.sort_unstable_by(|a, b| a.1.cmp(b.1).then_with(|| a.0.cmp(b.0)));
        let len = members.len() as i64;
        let first = if start < 0 { (len + start).max(0) } else { start };
        let last = if stop < 0 { len + stop } else { stop.min(len - 1) };
        if first > last || last < 0 || first >= len {
            return Ok(Vec::new());
        }
        Ok(members[first as usize..=last as usize]
            .iter()
            .map(|(member, _)| (*member).clone())
            .collect())
    }

    fn zset_count(&self, key: &str, min: Score, max: Score) -> WeftResult<u64> {
        match self.data.read().get(key) {
            Some(Entry::ZSet(scored)) => Ok(scored
                .values()
                .filter(|score| (min..=max).contains(score))
                .count() as u64),
            Some(_) => Err(WeftError::wrong_type(key)),
            None => Ok(0),
        }
    }

    fn get(&self, key: &str) -> WeftResult<Option<String>> {
        match self.data.read().get(key) {
            Some(Entry::Str(value)) => Ok(Some(value.clone())),
            Some(_) => Err(WeftError::wrong_type(key)),
            None => Ok(None),
        }
    }

    fn set_if_absent(&self, key: &str, value: &str) -> WeftResult<bool> {
        set_if_absent_in(&mut self.data.write(), key, value)
    }

    fn incr(&self, key: &str) -> WeftResult<i64> {
        incr_in(&mut self.data.write(), key)
    }

    fn remove(&self, keys: &[String]) -> WeftResult<u64> {
        Ok(remove_in(&mut self.data.write(), keys))
    }

    fn apply(&self, batch: Batch) -> WeftResult<Vec<Reply>> {
        let mut guard = self.data.write();
        let snapshot = (*guard).clone();
        let mut replies = Vec::with_capacity(batch.len());
        tracing::trace!(commands = batch.len(), "applying batch");
        for command in batch.into_commands() {
            match execute(&mut guard, command) {
                Ok(reply) => replies.push(reply),
                Err(err) => {
                    *guard = snapshot;
                    return Err(err);
                }
            }
        }
        Ok(replies)
    }
}

fn execute(map: &mut Map, command: Command) -> WeftResult<Reply> {
    match command {
        Command::SetAdd { key, members } => {
            let members: Vec<&str> = members.iter().map(String::as_str).collect();
            set_add_in(map, &key, &members).map(Reply::Count)
        }
        Command::SetRemove { key, members } => {
            let members: Vec<&str> = members.iter().map(String::as_str).collect();
            set_remove_in(map, &key, &members).map(Reply::Count)
        }
        Command::ZSetAdd { key, entries } => {
            let entries: Vec<(&str, Score)> = entries
                .iter()
                .map(|(member, score)| (member.as_str(), *score))
                .collect();
            zset_add_in(map, &key, &entries).map(Reply::Count)
        }
        Command::ZSetRemove { key, members } => {
            let members: Vec<&str> = members.iter().map(String::as_str).collect();
            zset_remove_in(map, &key, &members).map(Reply::Count)
        }
        Command::SetIfAbsent { key, value } => {
            set_if_absent_in(map, &key, &value).map(Reply::Bool)
        }
        Command::Incr { key } => incr_in(map, &key).map(Reply::Int),
        Command::Remove { keys } => Ok(Reply::Count(remove_in(map, &keys))),
    }
}

fn set_add_in(map: &mut Map, key: &str, members: &[&str]) -> WeftResult<u64> {
    if members.is_empty() {
        return Ok(0);
    }
    match map
        .entry(key.to_owned())
        .or_insert_with(|| Entry::Set(FxHashSet::default()))
    {
        Entry::Set(set) => Ok(members
            .iter()
            .filter(|member| set.insert((**member).to_owned()))
            .count() as u64),
        _ => Err(WeftError::wrong_type(key)),
    }
}

fn set_remove_in(map: &mut Map, key: &str, members: &[&str]) -> WeftResult<u64> {
    let removed = match map.get_mut(key) {
        Some(Entry::Set(set)) => {
            let removed = members.iter().filter(|member| set.remove(**member)).count();
            if set.is_empty() {
                map.remove(key);
            }
            removed
        }
        Some(_) => return Err(WeftError::wrong_type(key)),
        None => 0,
    };
    Ok(removed as u64)
}

fn zset_add_in(map: &mut Map, key: &str, entries: &[(&str, Score)]) -> WeftResult<u64> {
    if entries.is_empty() {
        return Ok(0);
    }
    match map
        .entry(key.to_owned())
        .or_insert_with(|| Entry::ZSet(FxHashMap::default()))
    {
        Entry::ZSet(scored) => Ok(entries
            .iter()
            .filter(|(member, score)| scored.insert((*member).to_owned(), *score).is_none())
            .count() as u64),
        _ => Err(WeftError::wrong_type(key)),
    }
}

fn zset_remove_in(map: &mut Map, key: &str, members: &[&str]) -> WeftResult<u64> {
    let removed = match map.get_mut(key) {
        Some(Entry::ZSet(scored)) => {
            let removed = members
                .iter()
                .filter(|member| scored.remove(**member).is_some())
                .count();
            if scored.is_empty() {
                map.remove(key);
            }
            removed
        }
        Some(_) => return Err(WeftError::wrong_type(key)),
        None => 0,
    };
    Ok(removed as u64)
}

fn set_if_absent_in(map: &mut Map, key: &str, value: &str) -> WeftResult<bool> {
    if map.contains_key(key) {
        return Ok(false);
    }
    map.insert(key.to_owned(), Entry::Str(value.to_owned()));
    Ok(true)
}

fn incr_in(map: &mut Map, key: &str) -> WeftResult<i64> {
    match map
        .entry(key.to_owned())
        .or_insert_with(|| Entry::Str("0".to_owned()))
    {
        Entry::Str(value) => {
            let next = value
                .parse::<i64>()
                .map_err(|_| WeftError::store(format!("value at {key} is not an integer")))?
                + 1;
            *value = next.to_string();
            Ok(next)
        }
        _ => Err(WeftError::wrong_type(key)),
    }
}

fn remove_in(map: &mut Map, keys: &[String]) -> u64 {
    keys.iter().filter(|key| map.remove(key.as_str()).is_some()).count() as u64
}
