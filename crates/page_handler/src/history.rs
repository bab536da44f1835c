/// Linear back/forward history of one tab.
///
/// Navigating from the middle of the history drops everything ahead of the
/// current entry before appending.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct History {
    entries: Vec<String>,
    index: Option<usize>,
}

impl History {
    #[inline]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: None,
        }
    }

    /// Truncate forward entries, append `url` and make it current.
    pub fn push(&mut self, url: impl Into<String>) {
        let keep = self.index.map_or(0, |index| index + 1);
        self.entries.truncate(keep);
        self.entries.push(url.into());
        self.index = Some(self.entries.len() - 1);
    }

    pub fn current(&self) -> Option<&str> {
        self.index
            .and_then(|index| self.entries.get(index))
            .map(String::as_str)
    }

    pub const fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn can_go_back(&self) -> bool {
        self.index.is_some_and(|index| index > 0)
    }

    pub fn can_go_forward(&self) -> bool {
        self.index
            .is_some_and(|index| index + 1 < self.entries.len())
    }

    /// Entry one step back, without moving.
    pub fn back_entry(&self) -> Option<&str> {
        let index = self.index?.checked_sub(1)?;
        self.entries.get(index).map(String::as_str)
    }

    /// Entry one step forward, without moving.
    pub fn forward_entry(&self) -> Option<&str> {
        let index = self.index? + 1;
        self.entries.get(index).map(String::as_str)
    }

    /// Move the current position by `delta` if the target exists.
    pub fn step(&mut self, delta: isize) -> bool {
        let target = self
            .index
            .and_then(|index| index.checked_add_signed(delta))
            .filter(|target| *target < self.entries.len());
        if target.is_some() {
            self.index = target;
        }
        target.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_truncates_forward_entries() {
        let mut history = History::new();
        history.push("a");
        history.push("b");
        history.push("c");
        assert!(history.step(-1));
        history.push("d");
        assert_eq!(history.entries(), ["a", "b", "d"]);
        assert_eq!(history.current(), Some("d"));
        assert!(!history.can_go_forward());
        assert!(history.can_go_back());
    }

    #[test]
    fn stepping_stays_in_bounds() {
        let mut history = History::new();
        assert!(!history.step(-1));
        assert_eq!(history.back_entry(), None);
        history.push("a");
        assert!(!history.step(-1));
        assert!(!history.step(1));
        assert_eq!(history.index(), Some(0));
    }
}
