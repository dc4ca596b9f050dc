//! Доменные модели: входные данные boleto и промежуточный campo livre.

use crate::{
    barcode::BarcodePayload,
    error::{BoletoError, Result},
    line::TypeableLine,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Код валюты «Real» в коде de barras.
pub const CURRENCY_BRL: u8 = 9;

/// Входные данные одного boleto. Поля с кодами — строки цифр, как их выдаёт
/// банк; ширина проверяется при упаковке.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SlipRecord {
    pub bank: String,
    pub wallet: String,
    pub agency: String,
    pub agency_digit: Option<String>,
    pub account: String,
    pub account_digit: Option<String>,
    pub our_number: String,
    pub our_number_digit: Option<String>,
    /// Fator de vencimento, 0 = без срока.
    pub due_factor: u32,
    /// Сумма в сентаво.
    pub amount_cents: u64,
    pub currency: u8,
}

/// Campo livre: 25 цифр, смысл которых знает только банк.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct VariableSegment(pub(crate) [u8; VariableSegment::LEN]);

impl VariableSegment {
    pub const LEN: usize = 25;

    pub fn new(digits: [u8; Self::LEN]) -> Result<Self> {
        if let Some(bad) = digits.iter().find(|b| !b.is_ascii_digit()) {
            return Err(BoletoError::InvalidInput(format!(
                "variable segment: non-digit byte {bad:#04x}"
            )));
        }
        Ok(VariableSegment(digits))
    }

    pub fn as_bytes(&self) -> &[u8; Self::LEN] {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl TryFrom<&str> for VariableSegment {
    type Error = BoletoError;

    fn try_from(s: &str) -> Result<Self> {
        let digits: [u8; Self::LEN] = s.as_bytes().try_into().map_err(|_| {
            BoletoError::InvalidInput(format!(
                "variable segment must have {} digits, got {}",
                Self::LEN,
                s.len()
            ))
        })?;
        VariableSegment::new(digits)
    }
}

impl fmt::Display for VariableSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for VariableSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("VariableSegment").field(&self.as_str()).finish()
    }
}

/// Результат конвейера: код de barras и linha digitável одного boleto.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SlipCodes {
    pub barcode: BarcodePayload,
    pub line: TypeableLine,
}
