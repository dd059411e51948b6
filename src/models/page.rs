use serde::{Deserialize, Serialize};

/// Una página de un listado paginado del backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page_number: u32,
    pub page_size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
    pub last: bool,
}

impl<T> Page<T> {
    /// Página vacía canónica, se muestra cuando falla la carga
    pub fn empty() -> Self {
        Self {
            content: Vec::new(),
            page_number: 0,
            page_size: 0,
            total_elements: 0,
            total_pages: 0,
            last: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn has_next(&self) -> bool {
        !self.last
    }

    pub fn has_previous(&self) -> bool {
        self.page_number > 0
    }

    /// `content.len() <= page_size` y `last` coherente con la numeración.
    /// Sin páginas (`total_pages == 0`) solo vale `last == true`.
    pub fn is_consistent(&self) -> bool {
        let fits = self.content.len() <= self.page_size as usize;
        let last_ok = if self.total_pages == 0 {
            self.last
        } else {
            self.last == (self.page_number.checked_add(1) == Some(self.total_pages))
        };
        fits && last_ok
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Dirección de ordenación
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Parámetros `page`, `size` y `sort` de un listado
#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
    pub sort: Option<(String, SortDirection)>,
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Self {
        Self { page, size, sort: None }
    }

    pub fn sorted_by(mut self, field: &str, direction: SortDirection) -> Self {
        self.sort = Some((field.to_string(), direction));
        self
    }

    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page.to_string()),
            ("size".to_string(), self.size.to_string()),
        ];
        if let Some((field, direction)) = &self.sort {
            pairs.push(("sort".to_string(), format!("{},{}", field, direction.as_str())));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_page_is_canonical_and_consistent() {
        let page: Page<u8> = Page::empty();
        assert!(page.content.is_empty());
        assert_eq!(page.page_number, 0);
        assert_eq!(page.page_size, 0);
        assert_eq!(page.total_elements, 0);
        assert_eq!(page.total_pages, 0);
        assert!(page.last);
        assert!(page.is_consistent());
    }

    #[test]
    fn consistency_checks_last_flag() {
        let page = Page {
            content: vec![1, 2],
            page_number: 1,
            page_size: 2,
            total_elements: 6,
            total_pages: 3,
            last: false,
        };
        assert!(page.is_consistent());

        let wrong = Page { last: true, ..page.clone() };
        assert!(!wrong.is_consistent());

        let overflow = Page { content: vec![1, 2, 3], ..page };
        assert!(!overflow.is_consistent());
    }

    #[test]
    fn absurd_page_number_is_inconsistent_not_a_panic() {
        let page: Page<i32> = Page {
            content: Vec::new(),
            page_number: u32::MAX,
            page_size: 10,
            total_elements: 0,
            total_pages: 1,
            last: true,
        };
        assert!(!page.is_consistent());
    }

    #[test]
    fn decodes_backend_page() {
        let json = r#"{"content":[{"id":1,"name":"Centro"}],"pageNumber":0,"pageSize":10,
            "totalElements":1,"totalPages":1,"last":true}"#;
        let page: Page<serde_json::Value> = serde_json::from_str(json).unwrap();
        assert_eq!(page.len(), 1);
        assert!(page.is_consistent());
    }

    #[test]
    fn sort_is_appended_to_query() {
        let request = PageRequest::new(2, 20).sorted_by("name", SortDirection::Desc);
        assert_eq!(
            request.query_pairs(),
            vec![
                ("page".to_string(), "2".to_string()),
                ("size".to_string(), "20".to_string()),
                ("sort".to_string(), "name,desc".to_string()),
            ]
        );
    }
}
