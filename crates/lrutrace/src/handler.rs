//! Command handler for trace lines

use std::fmt;

use lrustore::{CacheStats, SharedLruStore};
use tracing::debug;

/// Result of one trace command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Command succeeded with nothing to return
    Ok,
    /// Value found by GET
    Value(String),
    /// GET missed
    Nil,
    /// Count or boolean flag
    Integer(i64),
    /// Keys, least recently used first
    Keys(Vec<String>),
    /// Malformed or unknown command
    Error(String),
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Ok => write!(f, "OK"),
            Reply::Value(v) => write!(f, "{}", v),
            Reply::Nil => write!(f, "(nil)"),
            Reply::Integer(n) => write!(f, "{}", n),
            Reply::Keys(keys) => write!(f, "{}", keys.join(" ")),
            Reply::Error(msg) => write!(f, "ERR {}", msg),
        }
    }
}

/// Runs trace commands against a string-keyed store
pub struct CommandHandler {
    store: SharedLruStore<String, String>,
}

impl CommandHandler {
    /// Wrap a store. Clones of `store` see the same entries and stats.
    pub fn new(store: SharedLruStore<String, String>) -> Self {
        Self { store }
    }

    /// Run one trace line. Blank lines and `#` comments yield `None`.
    pub fn handle(&self, line: &str) -> Option<Reply> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }

        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim_start()),
            None => (line, ""),
        };
        let command = command.to_uppercase();
        debug!(command = %command, "handling trace command");

        let reply = match command.as_str() {
            "PUT" => self.handle_put(rest),
            "GET" => self.handle_get(rest),
            "DEL" => self.handle_del(rest),
            "EXISTS" => self.handle_exists(rest),
            "SIZE" => self.handle_size(rest),
            "KEYS" => self.handle_keys(rest),
            "CLEAR" => self.handle_clear(rest),
            _ => Reply::Error(format!("unknown command '{}'", command)),
        };
        Some(reply)
    }

    /// Counters accumulated over the replay so far
    pub fn stats(&self) -> &CacheStats {
        self.store.stats()
    }

    /// Number of entries currently held
    pub fn entries(&self) -> usize {
        self.store.len()
    }

    fn handle_put(&self, rest: &str) -> Reply {
        let (key, value) = match rest.split_once(char::is_whitespace) {
            Some((key, value)) if !value.trim().is_empty() => (key, value.trim()),
            _ => return wrong_arity("put"),
        };

        if let Some((evicted, _)) = self.store.put(key.to_string(), value.to_string()) {
            debug!(key = %evicted, "evicted");
        }
        Reply::Ok
    }

    fn handle_get(&self, rest: &str) -> Reply {
        let key = match single_key(rest) {
            Some(key) => key,
            None => return wrong_arity("get"),
        };

        match self.store.get(key) {
            Some(value) => Reply::Value(value),
            None => Reply::Nil,
        }
    }

    fn handle_del(&self, rest: &str) -> Reply {
        let key = match single_key(rest) {
            Some(key) => key,
            None => return wrong_arity("del"),
        };

        Reply::Integer(self.store.remove(key).is_some() as i64)
    }

    fn handle_exists(&self, rest: &str) -> Reply {
        let key = match single_key(rest) {
            Some(key) => key,
            None => return wrong_arity("exists"),
        };

        Reply::Integer(self.store.contains(key) as i64)
    }

    fn handle_size(&self, rest: &str) -> Reply {
        if !rest.is_empty() {
            return wrong_arity("size");
        }
        Reply::Integer(self.store.len() as i64)
    }

    fn handle_keys(&self, rest: &str) -> Reply {
        if !rest.is_empty() {
            return wrong_arity("keys");
        }
        Reply::Keys(self.store.keys())
    }

    fn handle_clear(&self, rest: &str) -> Reply {
        if !rest.is_empty() {
            return wrong_arity("clear");
        }
        self.store.clear();
        Reply::Ok
    }
}

fn single_key(rest: &str) -> Option<&str> {
    let mut parts = rest.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some(key), None) => Some(key),
        _ => None,
    }
}

fn wrong_arity(command: &str) -> Reply {
    Reply::Error(format!("wrong number of arguments for '{}' command", command))
}
