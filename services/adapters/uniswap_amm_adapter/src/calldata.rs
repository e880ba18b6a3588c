//! Adapter query arguments and results
//!
//! Token and amount pairs are positional: `amount_a` belongs to `token_a`.

use ethabi::Token;
use serde::Serialize;
use web3::types::{Address, Bytes, U256};

use crate::error::{AdapterError, Result};

/// Ordered pair of pool tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenPair {
    pub token_a: Address,
    pub token_b: Address,
}

impl TokenPair {
    pub fn new(token_a: Address, token_b: Address) -> Self {
        Self { token_a, token_b }
    }

    /// Build from a slice, which must hold exactly two tokens
    pub fn from_slice(tokens: &[Address]) -> Result<Self> {
        match tokens {
            [token_a, token_b] => Ok(Self::new(*token_a, *token_b)),
            _ => Err(AdapterError::InvalidArgument(format!(
                "expected a token pair, got {} tokens",
                tokens.len()
            ))),
        }
    }

    pub fn to_token(&self) -> Token {
        Token::Array(vec![
            Token::Address(self.token_a),
            Token::Address(self.token_b),
        ])
    }

    /// Same tokens in either order
    pub fn same_tokens(&self, other: &TokenPair) -> bool {
        (self.token_a == other.token_a && self.token_b == other.token_b)
            || (self.token_a == other.token_b && self.token_b == other.token_a)
    }
}

/// Amounts paired positionally with a [`TokenPair`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmountPair {
    pub amount_a: U256,
    pub amount_b: U256,
}

impl AmountPair {
    pub fn new(amount_a: U256, amount_b: U256) -> Self {
        Self { amount_a, amount_b }
    }

    /// Parse two base-10 amounts, e.g. `"1000000000000000"`
    pub fn from_dec_strs(amount_a: &str, amount_b: &str) -> Result<Self> {
        Ok(Self::new(parse_amount(amount_a)?, parse_amount(amount_b)?))
    }

    pub fn to_token(&self) -> Token {
        Token::Array(vec![Token::Uint(self.amount_a), Token::Uint(self.amount_b)])
    }
}

/// Three-element result of the calldata queries: `(target, value, data)`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Calldata {
    pub target: Address,
    pub value: U256,
    pub data: Bytes,
}

impl Calldata {
    /// Number of elements the adapter returns
    pub const ARITY: usize = 3;

    /// Build from decoded adapter output
    pub fn from_tokens(function: &str, tokens: Vec<Token>) -> Result<Self> {
        let decode_error = |reason: String| AdapterError::Decode {
            function: function.to_string(),
            reason,
        };

        if tokens.len() != Self::ARITY {
            return Err(decode_error(format!(
                "expected {} elements, got {}",
                Self::ARITY,
                tokens.len()
            )));
        }

        let mut elements = tokens.into_iter();
        match (elements.next(), elements.next(), elements.next()) {
            (Some(Token::Address(target)), Some(Token::Uint(value)), Some(Token::Bytes(data))) => {
                Ok(Self {
                    target,
                    value,
                    data: Bytes(data),
                })
            }
            (target, value, data) => Err(decode_error(format!(
                "unexpected element kinds ({:?}, {:?}, {:?})",
                target, value, data
            ))),
        }
    }

    /// The three elements in adapter order
    pub fn into_tokens(self) -> Vec<Token> {
        vec![
            Token::Address(self.target),
            Token::Uint(self.value),
            Token::Bytes(self.data.0),
        ]
    }
}

/// Parse a 20-byte hex address, with or without `0x`, any letter case
pub fn parse_address(value: &str) -> Result<Address> {
    let trimmed = value.trim();
    let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    let bytes = hex::decode(digits)
        .map_err(|e| AdapterError::InvalidArgument(format!("address '{}': {}", value, e)))?;
    if bytes.len() != 20 {
        return Err(AdapterError::InvalidArgument(format!(
            "address '{}' is {} bytes, expected 20",
            value,
            bytes.len()
        )));
    }
    Ok(Address::from_slice(&bytes))
}

/// Parse a base-10 token amount
pub fn parse_amount(value: &str) -> Result<U256> {
    U256::from_dec_str(value.trim())
        .map_err(|e| AdapterError::InvalidArgument(format!("amount '{}': {:?}", value, e)))
}
