use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One user entity returned by the directory endpoint.
///
/// Only the displayed fields are typed. Anything else the endpoint sends
/// (username, website, company, ...) lands in `extra`, so the search filter
/// works over the full shape of the data rather than the display columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: Address,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    pub city: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Static display descriptor for one table column.
#[derive(Debug, Clone)]
pub struct Column {
    pub id: &'static str,
    pub name: &'static str,
    pub label: &'static str,
}

/// The five columns of the user table, fixed at build time.
pub const COLUMNS: [Column; 5] = [
    Column { id: "0", name: "srno", label: "Sr.No" },
    Column { id: "1", name: "name", label: "Name" },
    Column { id: "2", name: "email", label: "Email" },
    Column { id: "3", name: "phone", label: "Phone" },
    Column { id: "4", name: "address", label: "Address" },
];

/// Mutable view state driving pagination and search.
///
/// `current_page` never drops below 1. Mutation goes through the setters
/// below; input handlers hold no page arithmetic of their own.
#[derive(Debug, Clone)]
pub struct PageState {
    pub current_page: usize,
    pub rows_per_page: usize,
    pub search_text: String,
}

impl PageState {
    pub fn new(rows_per_page: usize) -> Self {
        Self {
            current_page: 1,
            rows_per_page,
            search_text: String::new(),
        }
    }

    /// Jump to a literal page number.
    pub fn go_to_page(&mut self, page: usize) {
        if page >= 1 {
            self.current_page = page;
        }
    }

    pub fn next_page(&mut self) {
        self.current_page += 1;
    }

    pub fn previous_page(&mut self) {
        if self.current_page > 1 {
            self.current_page -= 1;
        }
    }

    /// Back to the first page, keeping the search text.
    pub fn reset_page(&mut self) {
        self.current_page = 1;
    }

    pub fn push_search(&mut self, c: char) {
        self.search_text.push(c);
    }

    pub fn pop_search(&mut self) {
        self.search_text.pop();
    }
}
