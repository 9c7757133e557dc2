pub trait PairsExtension<T> {
    /// Every unordered pair of distinct positions, `(a, b)` with `a` before `b`,
    /// in lexicographic order of positions.
    fn pairs(&self) -> Pairs<'_, T>;
}

impl <T> PairsExtension<T> for [T] {
    fn pairs(&self) -> Pairs<'_, T> {
        Pairs { items: self, first: 0, second: 1 }
    }
}

pub struct Pairs<'a, T> {
    items: &'a [T],
    first: usize,
    second: usize,
}

impl <'a, T> Iterator for Pairs<'a, T> {
    type Item = (&'a T, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        if self.second >= self.items.len() {
            self.first += 1;
            self.second = self.first + 1;
            if self.second >= self.items.len() {
                return None;
            }
        }
        let pair = (&self.items[self.first], &self.items[self.second]);
        self.second += 1;
        Some(pair)
    }
}
