use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewItem {
    pub id: String,
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Like,
    Dislike,
}

impl Decision {
    pub fn as_str(self) -> &'static str {
        match self {
            Decision::Like => "like",
            Decision::Dislike => "dislike",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Committed {
    pub id: String,
    pub decision: Decision,
    pub order_index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct HistoryEntry {
    id: String,
    decision: Decision,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecisionQueue {
    items: Vec<ReviewItem>,
    cursor: usize,
    liked: HashSet<String>,
    history: Vec<HistoryEntry>,
}

impl DecisionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&mut self, items: Vec<ReviewItem>) {
        self.items = items;
        self.cursor = 0;
        self.liked.clear();
        self.history.clear();
    }

    pub fn current(&self) -> Option<&ReviewItem> {
        self.items.get(self.cursor)
    }

    pub fn item(&self, id: &str) -> Option<&ReviewItem> {
        self.items.iter().find(|item| item.id == id)
    }

    // Gesture input can race ahead of re-renders; committing past the
    // end is a no-op.
    pub fn commit(&mut self, decision: Decision) -> Option<Committed> {
        let item = self.items.get(self.cursor)?;
        let id = item.id.clone();
        let order_index = self.cursor;
        self.history.push(HistoryEntry {
            id: id.clone(),
            decision,
        });
        match decision {
            Decision::Like => {
                self.liked.insert(id.clone());
            }
            Decision::Dislike => {
                self.liked.remove(&id);
            }
        }
        self.cursor += 1;
        Some(Committed {
            id,
            decision,
            order_index,
        })
    }

    pub fn undo(&mut self) -> bool {
        if self.cursor == 0 || self.history.is_empty() {
            return false;
        }
        let last = match self.history.pop() {
            Some(entry) => entry,
            None => return false,
        };
        self.cursor -= 1;
        if last.decision == Decision::Like {
            self.liked.remove(&last.id);
        }
        true
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0 && !self.history.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.items.len().saturating_sub(self.cursor)
    }

    pub fn progress(&self) -> usize {
        self.cursor.min(self.items.len())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.items.len()
    }

    pub fn liked_items(&self) -> Vec<&ReviewItem> {
        self.items
            .iter()
            .filter(|item| self.liked.contains(&item.id))
            .collect()
    }

    pub fn liked_count(&self) -> usize {
        self.liked.len()
    }

    #[cfg(test)]
    fn history_len(&self) -> usize {
        self.history.len()
    }

    #[cfg(test)]
    fn cursor(&self) -> usize {
        self.cursor
    }
}
