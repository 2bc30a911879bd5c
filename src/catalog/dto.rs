use serde::{Deserialize, Serialize};

// CatalogStats carries the aggregate counts shown on the landing page
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
pub struct CatalogStats {
    pub books: usize,
    pub total_copies: u64,
    pub available_copies: u64,
    pub members: usize,
    pub transactions: usize,
    pub open_loans: usize,
    pub overdue_loans: usize,
    pub fines_collected: f64,
}
