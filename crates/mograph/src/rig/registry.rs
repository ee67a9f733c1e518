//! Insertion-ordered name registry with unique-name generation.

/// Width of the numeric suffix in generated names (`Base.001`).
const SUFFIX_DIGITS: usize = 3;

/// Named items kept in insertion order.
#[derive(Debug, Clone)]
pub(crate) struct Registry<T> {
    items: Vec<(String, T)>,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> Registry<T> {
    /// Inserts `item` under `name`, or under the first free `stem.NNN` when
    /// `name` is taken. Returns the name actually used.
    pub fn insert(&mut self, name: &str, item: T) -> String {
        let name = self.unique_name(name);
        self.items.push((name.clone(), item));
        name
    }

    pub fn unique_name(&self, name: &str) -> String {
        if !self.contains(name) {
            return name.to_owned();
        }
        let stem = strip_suffix(name);
        (1..)
            .map(|n| format!("{stem}.{n:0width$}", width = SUFFIX_DIGITS))
            .find(|candidate| !self.contains(candidate))
            .unwrap_or_else(|| name.to_owned())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.iter().any(|(n, _)| n == name)
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.items.iter().find(|(n, _)| n == name).map(|(_, t)| t)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut T> {
        self.items
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, t)| t)
    }

    pub fn remove(&mut self, name: &str) -> Option<T> {
        let i = self.items.iter().position(|(n, _)| n == name)?;
        Some(self.items.remove(i).1)
    }

    /// Renames `from`, generating a unique name if `to` is taken.
    pub fn rename(&mut self, from: &str, to: &str) -> Option<String> {
        if from == to {
            return self.contains(from).then(|| from.to_owned());
        }
        let new_name = self.unique_name(to);
        let entry = self.items.iter_mut().find(|(n, _)| n == from)?;
        entry.0 = new_name.clone();
        Some(new_name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|(n, _)| n.as_str())
    }

    #[cfg(feature = "serde")]
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.items.iter().map(|(n, t)| (n.as_str(), t))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut T)> {
        self.items.iter_mut().map(|(n, t)| (n.as_str(), t))
    }
}

/// `Base.004` -> `Base`; names without a numeric suffix are returned as is.
fn strip_suffix(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((stem, digits))
            if !stem.is_empty()
                && digits.len() == SUFFIX_DIGITS
                && digits.bytes().all(|b| b.is_ascii_digit()) =>
        {
            stem
        }
        _ => name,
    }
}
