use crate::application::cart::OrderRequest;
use crate::application::catalog::Deletion;
use crate::application::engine::CommerceEngine;
use crate::domain::customer::CustomerKey;
use crate::domain::ledger::OrderRecord;
use crate::domain::product::{Price, Product, ProductId};
use crate::error::{LedgerError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fmt;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum CommandType {
    Register,
    Create,
    SetQuantity,
    Rename,
    SetPrice,
    Delete,
    Order,
}

/// One row of a command script. Which columns are required depends on `op`.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct CommandRow {
    pub op: CommandType,
    pub customer: Option<String>,
    pub product: Option<u32>,
    pub name: Option<String>,
    pub quantity: Option<u32>,
    pub price: Option<Decimal>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Register {
        key: CustomerKey,
        display_name: String,
    },
    Create {
        product: Product,
        owner: Option<CustomerKey>,
    },
    SetQuantity {
        id: ProductId,
        quantity: u32,
    },
    Rename {
        id: ProductId,
        name: String,
    },
    SetPrice {
        id: ProductId,
        price: Price,
    },
    Delete {
        id: ProductId,
        quantity: u32,
        owner: Option<CustomerKey>,
    },
    Order(OrderRequest),
}

fn required<T>(value: Option<T>, column: &str, op: CommandType) -> Result<T> {
    value.ok_or_else(|| LedgerError::CommandError(format!("{op:?} requires a {column} column")))
}

impl TryFrom<CommandRow> for Command {
    type Error = LedgerError;

    fn try_from(row: CommandRow) -> Result<Self> {
        let op = row.op;
        let owner = row.customer.clone().map(CustomerKey::new);
        let command = match op {
            CommandType::Register => {
                let key = required(row.customer, "customer", op)?;
                let display_name = row.name.unwrap_or_else(|| key.clone());
                Command::Register {
                    key: CustomerKey::new(key),
                    display_name,
                }
            }
            CommandType::Create => {
                let product = Product::new(
                    ProductId(required(row.product, "product", op)?),
                    required(row.name, "name", op)?,
                    required(row.quantity, "quantity", op)?,
                    Price::new(required(row.price, "price", op)?)?,
                    row.description.unwrap_or_default(),
                );
                Command::Create { product, owner }
            }
            CommandType::SetQuantity => Command::SetQuantity {
                id: ProductId(required(row.product, "product", op)?),
                quantity: required(row.quantity, "quantity", op)?,
            },
            CommandType::Rename => Command::Rename {
                id: ProductId(required(row.product, "product", op)?),
                name: required(row.name, "name", op)?,
            },
            CommandType::SetPrice => Command::SetPrice {
                id: ProductId(required(row.product, "product", op)?),
                price: Price::new(required(row.price, "price", op)?)?,
            },
            CommandType::Delete => Command::Delete {
                id: ProductId(required(row.product, "product", op)?),
                quantity: row.quantity.unwrap_or(0),
                owner,
            },
            CommandType::Order => {
                let customer = required(row.customer, "customer", op)?;
                let mut request = OrderRequest::new(
                    CustomerKey::new(customer),
                    ProductId(required(row.product, "product", op)?),
                    required(row.quantity, "quantity", op)?,
                );
                if let Some(price) = row.price {
                    request = request.with_price(Price::new(price)?);
                }
                if let Some(description) = row.description {
                    request = request.with_description(description);
                }
                Command::Order(request)
            }
        };
        Ok(command)
    }
}

/// What a successfully applied command did.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Registered { key: CustomerKey, replaced: bool },
    Stored { id: ProductId, replaced: bool },
    Updated { id: ProductId },
    Deleted { id: ProductId, deletion: Deletion },
    Ordered { customer: CustomerKey, record: OrderRecord },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Registered { key, replaced: false } => write!(f, "registered customer {key}"),
            Outcome::Registered { key, replaced: true } => write!(f, "reset customer {key}"),
            Outcome::Stored { id, replaced: false } => write!(f, "created product {id}"),
            Outcome::Stored { id, replaced: true } => write!(f, "replaced product {id}"),
            Outcome::Updated { id } => write!(f, "updated product {id}"),
            Outcome::Deleted {
                id,
                deletion: Deletion::Removed(_),
            } => write!(f, "removed product {id}"),
            Outcome::Deleted {
                id,
                deletion: Deletion::Drained { deleted, remaining },
            } => write!(f, "deleted {deleted} of product {id}, {remaining} left"),
            Outcome::Ordered { customer, record } => write!(
                f,
                "{customer} ordered {} x {}",
                record.quantity, record.product_name
            ),
        }
    }
}

impl Command {
    pub async fn apply(self, engine: &CommerceEngine) -> Result<Outcome> {
        match self {
            Command::Register { key, display_name } => {
                let replaced = engine.register_customer(key.clone(), &display_name).await?;
                Ok(Outcome::Registered { key, replaced })
            }
            Command::Create { product, owner } => {
                let id = product.id;
                let previous = engine
                    .create_or_replace_product(product, owner.as_ref())
                    .await?;
                Ok(Outcome::Stored {
                    id,
                    replaced: previous.is_some(),
                })
            }
            Command::SetQuantity { id, quantity } => {
                engine.set_quantity(id, quantity).await?;
                Ok(Outcome::Updated { id })
            }
            Command::Rename { id, name } => {
                engine.rename_product(id, &name).await?;
                Ok(Outcome::Updated { id })
            }
            Command::SetPrice { id, price } => {
                engine.set_price(id, price).await?;
                Ok(Outcome::Updated { id })
            }
            Command::Delete { id, quantity, owner } => {
                let deletion = engine.delete_product(id, quantity, owner.as_ref()).await?;
                Ok(Outcome::Deleted { id, deletion })
            }
            Command::Order(request) => {
                let customer = request.customer.clone();
                let record = engine.place_order(request).await?;
                Ok(Outcome::Ordered { customer, record })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::config::EngineConfig;
    use rust_decimal_macros::dec;

    fn row(op: CommandType) -> CommandRow {
        CommandRow {
            op,
            customer: None,
            product: None,
            name: None,
            quantity: None,
            price: None,
            description: None,
        }
    }

    #[test]
    fn test_register_defaults_display_name() {
        let command = Command::try_from(CommandRow {
            customer: Some("alice".to_string()),
            ..row(CommandType::Register)
        })
        .unwrap();
        assert_eq!(
            command,
            Command::Register {
                key: CustomerKey::new("alice"),
                display_name: "alice".to_string()
            }
        );
    }

    #[test]
    fn test_missing_column_is_reported() {
        let result = Command::try_from(CommandRow {
            product: Some(1),
            ..row(CommandType::Create)
        });
        assert!(matches!(result, Err(LedgerError::CommandError(msg)) if msg.contains("name")));
    }

    #[test]
    fn test_negative_price_is_rejected() {
        let result = Command::try_from(CommandRow {
            product: Some(1),
            price: Some(dec!(-1)),
            ..row(CommandType::SetPrice)
        });
        assert!(matches!(result, Err(LedgerError::InvalidPrice(_))));
    }

    #[test]
    fn test_order_carries_overrides() {
        let command = Command::try_from(CommandRow {
            customer: Some("alice".to_string()),
            product: Some(1),
            quantity: Some(2),
            price: Some(dec!(4)),
            description: Some("gift".to_string()),
            ..row(CommandType::Order)
        })
        .unwrap();
        let Command::Order(request) = command else {
            panic!("expected an order");
        };
        assert_eq!(request.price_override, Some(Price::new(dec!(4)).unwrap()));
        assert_eq!(request.description.as_deref(), Some("gift"));
    }

    #[tokio::test]
    async fn test_apply_sequence() {
        let engine = CommerceEngine::in_memory(EngineConfig::default());
        let commands = vec![
            Command::Register {
                key: CustomerKey::new("alice"),
                display_name: "Alice".to_string(),
            },
            Command::Create {
                product: Product::new(ProductId(1), "Book", 10, Price::new(dec!(9.99)).unwrap(), ""),
                owner: None,
            },
            Command::Order(OrderRequest::new("alice", ProductId(1), 3)),
        ];

        let mut outcomes = Vec::new();
        for command in commands {
            outcomes.push(command.apply(&engine).await.unwrap().to_string());
        }
        assert_eq!(
            outcomes,
            vec![
                "registered customer alice",
                "created product 1",
                "alice ordered 3 x Book"
            ]
        );
    }
}
