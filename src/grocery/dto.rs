use serde::Serialize;

use crate::domain::grocery::GroceryListItem;

#[derive(Debug, Serialize)]
pub struct GroceryListResponse {
    pub week_start_date: String,
    pub items: Vec<GroceryListItem>,
}
