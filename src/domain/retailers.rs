use crate::utils::error::{BotError, Result};

/// CSS selectors that tell a retailer's out-of-stock markup from its in-stock markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetailerSelectors {
    pub out_of_stock: &'static str,
    pub in_stock: &'static str,
}

// Add a retailer by adding a row.
static RETAILERS: &[(&str, RetailerSelectors)] = &[(
    "currys",
    RetailerSelectors {
        out_of_stock: ".product-page .touch .oos",
        in_stock: r#"div[data-component="add-to-basket-button-wrapper"]"#,
    },
)];

pub fn resolve(retailer_id: &str) -> Result<RetailerSelectors> {
    RETAILERS
        .iter()
        .find(|(id, _)| *id == retailer_id)
        .map(|(_, selectors)| *selectors)
        .ok_or_else(|| BotError::UnknownRetailer {
            retailer: retailer_id.to_string(),
        })
}

pub fn known_retailers() -> Vec<&'static str> {
    RETAILERS.iter().map(|(id, _)| *id).collect()
}
