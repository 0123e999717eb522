use crate::domain::model::ProductRecord;
use crate::domain::ports::ProductStore;
use crate::utils::error::{BotError, Result};
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::operation::update_item::UpdateItemError;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client as DynamoClient;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct DynamoProductStore {
    client: DynamoClient,
    table: String,
}

impl DynamoProductStore {
    pub fn new(client: DynamoClient, table: String) -> Self {
        Self { client, table }
    }
}

impl ProductStore for DynamoProductStore {
    async fn list_active_products(&self) -> Result<Vec<ProductRecord>> {
        let mut items = self
            .client
            .scan()
            .table_name(&self.table)
            .filter_expression("active = :active")
            .expression_attribute_values(":active", AttributeValue::Bool(true))
            .into_paginator()
            .items()
            .send();

        let mut products = Vec::new();
        while let Some(item) = items.next().await {
            let item = item.map_err(|e| BotError::StoreUnavailable {
                message: format!("Scan of {} failed: {}", self.table, DisplayErrorContext(&e)),
            })?;
            let product = product_from_item(&item)?;
            if product.active {
                products.push(product);
            }
        }

        tracing::debug!("Scanned {} active products from {}", products.len(), self.table);
        Ok(products)
    }

    async fn deactivate(&self, product_id: &str) -> Result<()> {
        let result = self
            .client
            .update_item()
            .table_name(&self.table)
            .key("id", AttributeValue::S(product_id.to_string()))
            .update_expression("SET active = :active")
            // never upsert a record that does not exist
            .condition_expression("attribute_exists(id)")
            .expression_attribute_values(":active", AttributeValue::Bool(false))
            .send()
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(err) => match err.into_service_error() {
                UpdateItemError::ConditionalCheckFailedException(_) => {
                    Err(BotError::ProductNotFound {
                        id: product_id.to_string(),
                    })
                }
                other => Err(BotError::StoreUnavailable {
                    message: format!(
                        "Update of {} in {} failed: {}",
                        product_id,
                        self.table,
                        DisplayErrorContext(&other)
                    ),
                }),
            },
        }
    }
}

fn product_from_item(item: &HashMap<String, AttributeValue>) -> Result<ProductRecord> {
    Ok(ProductRecord {
        id: string_attr(item, "id")?,
        name: string_attr(item, "name")?,
        shop: string_attr(item, "shop")?,
        url: string_attr(item, "url")?,
        active: item
            .get("active")
            .and_then(|v| v.as_bool().ok())
            .copied()
            .ok_or_else(|| malformed("active"))?,
    })
}

fn string_attr(item: &HashMap<String, AttributeValue>, name: &str) -> Result<String> {
    item.get(name)
        .and_then(|v| v.as_s().ok())
        .cloned()
        .ok_or_else(|| malformed(name))
}

fn malformed(attribute: &str) -> BotError {
    BotError::StoreUnavailable {
        message: format!("Product item has missing or malformed '{}' attribute", attribute),
    }
}
