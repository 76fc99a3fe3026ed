/// Состояние клиентской пагинации (страницы с нуля)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub page_size: usize,
    pub total_count: usize,
}

impl Pagination {
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 0,
            page_size: page_size.max(1),
            total_count: 0,
        }
    }

    /// Всегда не меньше одной страницы
    pub fn total_pages(&self) -> usize {
        if self.total_count == 0 {
            1
        } else {
            self.total_count.div_ceil(self.page_size.max(1))
        }
    }

    /// Пересчитывает итог и поджимает текущую страницу
    pub fn with_total(mut self, total_count: usize) -> Self {
        self.total_count = total_count;
        let last = self.total_pages() - 1;
        if self.page > last {
            self.page = last;
        }
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self.page = 0;
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page.min(self.total_pages() - 1);
        self
    }

    /// Границы среза для текущей страницы
    pub fn bounds(&self) -> (usize, usize) {
        let start = (self.page * self.page_size).min(self.total_count);
        let end = (start + self.page_size).min(self.total_count);
        (start, end)
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let (start, end) = self.bounds();
        items.get(start..end).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_has_one_page() {
        let p = Pagination::new(10);
        assert_eq!(p.total_pages(), 1);
        assert_eq!(p.bounds(), (0, 0));
    }

    #[test]
    fn page_is_clamped_when_list_shrinks() {
        let p = Pagination::new(5).with_total(23).with_page(4);
        assert_eq!(p.total_pages(), 5);
        assert_eq!(p.bounds(), (20, 23));
        let p = p.with_total(7);
        assert_eq!(p.page, 1);
        assert_eq!(p.bounds(), (5, 7));
    }

    #[test]
    fn slicing() {
        let items: Vec<u32> = (0..12).collect();
        let p = Pagination::new(5).with_total(items.len()).with_page(2);
        assert_eq!(p.slice(&items), &[10, 11]);
        assert_eq!(p.with_page_size(15).slice(&items).len(), 12);
    }
}
