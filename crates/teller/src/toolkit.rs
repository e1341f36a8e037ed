use serde::Serialize;
use serde_json::{json, Value};

use crate::errors::{AgentError, AgentResult};
use crate::models::Tool;

/// Closed set of tool identities the relay can execute locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    CalculateMortgage,
    SearchProductDatabase,
    ConvertCurrency,
}

impl ToolKind {
    pub const ALL: [ToolKind; 3] = [
        ToolKind::CalculateMortgage,
        ToolKind::SearchProductDatabase,
        ToolKind::ConvertCurrency,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ToolKind::CalculateMortgage => "calculate_mortgage",
            ToolKind::SearchProductDatabase => "search_product_database",
            ToolKind::ConvertCurrency => "convert_currency",
        }
    }

    /// Runtime lookup for names arriving from the completion service.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "calculate_mortgage" => Some(ToolKind::CalculateMortgage),
            "search_product_database" => Some(ToolKind::SearchProductDatabase),
            "convert_currency" => Some(ToolKind::ConvertCurrency),
            _ => None,
        }
    }

    pub fn descriptor(self) -> Tool {
        match self {
            ToolKind::CalculateMortgage => Tool::new(
                self.name(),
                "Calculate monthly mortgage payments",
                json!({
                    "type": "object",
                    "properties": {
                        "principal": {"type": "number"},
                        "rate": {"type": "number"},
                        "years": {"type": "integer"}
                    },
                    "required": ["principal", "rate", "years"]
                }),
            ),
            ToolKind::SearchProductDatabase => Tool::new(
                self.name(),
                "Search a product catalog by keyword",
                json!({
                    "type": "object",
                    "properties": {
                        "query": {"type": "string"},
                        "max_results": {"type": "integer", "default": 3}
                    },
                    "required": ["query"]
                }),
            ),
            ToolKind::ConvertCurrency => Tool::new(
                self.name(),
                "Convert one currency to another",
                json!({
                    "type": "object",
                    "properties": {
                        "amount": {"type": "number"},
                        "rate": {"type": "number"}
                    },
                    "required": ["amount", "rate"]
                }),
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Product {
    pub name: &'static str,
    pub price: u32,
}

const PRODUCTS: [Product; 5] = [
    Product {
        name: "Office Desk",
        price: 250,
    },
    Product {
        name: "Ergonomic Chair",
        price: 180,
    },
    Product {
        name: "LED Desk Lamp",
        price: 40,
    },
    Product {
        name: "Laptop Stand",
        price: 55,
    },
    Product {
        name: "Notebook Set",
        price: 15,
    },
];

const DEFAULT_MAX_RESULTS: usize = 3;

/// The registry of locally executable tools.
#[derive(Debug, Clone, Copy, Default)]
pub struct Toolkit;

impl Toolkit {
    pub fn new() -> Self {
        Toolkit
    }

    /// Descriptors for every registered tool, in registry order.
    pub fn tools(&self) -> Vec<Tool> {
        ToolKind::ALL.iter().map(|kind| kind.descriptor()).collect()
    }

    /// Look up and invoke a tool by the name the model requested.
    pub fn dispatch(&self, name: &str, args: &Value) -> AgentResult<Value> {
        let kind =
            ToolKind::from_name(name).ok_or_else(|| AgentError::ToolNotFound(name.to_string()))?;

        match kind {
            ToolKind::CalculateMortgage => {
                let principal = require_number(args, "principal")?;
                let rate = require_number(args, "rate")?;
                let years = require_integer(args, "years")?;
                calculate_mortgage(principal, rate, years).map(Value::from)
            }
            ToolKind::SearchProductDatabase => {
                let query = require_string(args, "query")?;
                let max_results = optional_count(args, "max_results", DEFAULT_MAX_RESULTS)?;
                Ok(json!(search_product_database(query, max_results)))
            }
            ToolKind::ConvertCurrency => {
                let amount = require_number(args, "amount")?;
                let rate = require_number(args, "rate")?;
                Ok(Value::from(convert_currency(amount, rate)))
            }
        }
    }
}

/// Monthly payment under the standard amortization formula, rounded to
/// two decimals. A term of zero months is undefined and rejected rather
/// than dividing by zero.
pub fn calculate_mortgage(principal: f64, rate: f64, years: i64) -> AgentResult<f64> {
    let payments = years.checked_mul(12).filter(|p| *p > 0).ok_or_else(|| {
        AgentError::ExecutionError(format!("mortgage term of {years} years has no payments"))
    })?;

    let monthly_rate = rate / 100.0 / 12.0;
    let payment = if monthly_rate == 0.0 {
        principal / payments as f64
    } else {
        principal * monthly_rate / (1.0 - (1.0 + monthly_rate).powf(-(payments as f64)))
    };

    Ok(round2(payment))
}

/// Case-insensitive substring search over the static catalog, in catalog
/// order, truncated to `max_results`.
pub fn search_product_database(query: &str, max_results: usize) -> Vec<Product> {
    let query = query.to_lowercase();
    PRODUCTS
        .iter()
        .filter(|product| product.name.to_lowercase().contains(&query))
        .take(max_results)
        .copied()
        .collect()
}

pub fn convert_currency(amount: f64, rate: f64) -> f64 {
    round2(amount * rate)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn require_number(args: &Value, key: &str) -> AgentResult<f64> {
    args.get(key)
        .and_then(Value::as_f64)
        .ok_or_else(|| AgentError::InvalidParameters(format!("missing or non-numeric '{key}'")))
}

fn require_integer(args: &Value, key: &str) -> AgentResult<i64> {
    args.get(key)
        .and_then(Value::as_i64)
        .ok_or_else(|| AgentError::InvalidParameters(format!("missing or non-integer '{key}'")))
}

fn require_string<'a>(args: &'a Value, key: &str) -> AgentResult<&'a str> {
    args.get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| AgentError::InvalidParameters(format!("missing or non-string '{key}'")))
}

fn optional_count(args: &Value, key: &str, default: usize) -> AgentResult<usize> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(default),
        Some(value) => value.as_u64().map(|n| n as usize).ok_or_else(|| {
            AgentError::InvalidParameters(format!("'{key}' must be a non-negative integer"))
        }),
    }
}
