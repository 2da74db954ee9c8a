use std::collections::HashMap;

use super::Terminal;

/// Map from fixed spellings to their terminal symbols.
#[derive(Debug, Clone, Default)]
pub struct LexMap {
    map: HashMap<&'static str, Terminal>,
}

impl LexMap {
    pub fn insert(&mut self, key: &'static str, value: Terminal) {
        self.map.insert(key, value);
    }

    /// Whether some terminal starts with the given spelling. Drives the
    /// maximal-munch loop in the lexer (`-` keeps reading towards `->`).
    pub fn can_match(&self, key: &str) -> bool {
        for map_key in self.map.keys() {
            if map_key.starts_with(key) {
                return true;
            }
        }
        false
    }

    pub fn get(&self, key: &str) -> Option<Terminal> {
        self.map.get(key).copied()
    }
}
