use super::store::StickerCatalog;

/// Finds stickers whose match key starts with a probe substring
pub struct PrefixFinder<'a> {
    catalog: &'a StickerCatalog,
}

impl<'a> PrefixFinder<'a> {
    pub fn new(catalog: &'a StickerCatalog) -> Self {
        Self { catalog }
    }

    /// Return the first `cap` sticker indices (in catalog order) whose match key
    /// starts with `probe`
    pub fn find(&self, probe: &str, cap: usize) -> Vec<usize> {
        let Some(first) = probe.chars().next() else {
            return (0..self.catalog.len()).take(cap).collect();
        };

        let Some(bucket) = self.catalog.first_char_to_stickers.get(&first) else {
            return Vec::new();
        };

        bucket
            .iter()
            .copied()
            .filter(|&idx| self.catalog.stickers[idx].match_key.starts_with(probe))
            .take(cap)
            .collect()
    }
}
