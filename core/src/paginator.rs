/// Consecutive pages over a borrowed slice. The last page may be shorter.
#[derive(Debug, Clone)]
pub struct Paginator<'a, T> {
    pages: Vec<&'a [T]>,
}

/// Split `items` into pages of `page_size`. A zero page size yields no pages.
pub fn paginate<T>(items: &[T], page_size: usize) -> Paginator<'_, T> {
    let pages = if page_size == 0 { Vec::new() } else { items.chunks(page_size).collect() };
    Paginator { pages }
}

impl<'a, T> Paginator<'a, T> {
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a [T]> + '_ {
        self.pages.iter().copied()
    }
}

impl<'a, T> IntoIterator for Paginator<'a, T> {
    type Item = &'a [T];
    type IntoIter = std::vec::IntoIter<&'a [T]>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_page_holds_the_remainder() {
        let items = [1, 2, 3, 4, 5];
        let pages: Vec<&[i32]> = paginate(&items, 2).into_iter().collect();
        assert_eq!(pages, vec![&[1, 2][..], &[3, 4][..], &[5][..]]);
    }

    #[test]
    fn degenerate_sizes() {
        let items = [1, 2, 3];
        assert!(paginate(&items, 0).is_empty());
        assert_eq!(paginate(&items, 10).len(), 1);
        assert!(paginate::<i32>(&[], 3).is_empty());
    }
}
