//! Código de barras: 44 цифры.
//!
//! | позиции | поле              |
//! |---------|-------------------|
//! | 0..3    | код банка         |
//! | 3       | валюта            |
//! | 4       | DV (mod11)        |
//! | 5..9    | fator de vencimento |
//! | 9..19   | сумма, сентаво    |
//! | 19..44  | campo livre       |

use crate::{
    checksum::{ChecksumSpec, BARCODE_MOD11},
    digits::{pad, FieldWriter},
    error::{BoletoError, Result},
    model::{SlipRecord, VariableSegment},
    traits::BankStrategy,
};
use serde::{Deserialize, Serialize};
use std::{fmt, ops::Range, str::FromStr};

pub const BANK: Range<usize> = 0..3;
pub const CURRENCY: Range<usize> = 3..4;
pub const CHECK_DIGIT: usize = 4;
pub const DUE_FACTOR: Range<usize> = 5..9;
pub const AMOUNT: Range<usize> = 9..19;
pub const VARIABLE_SEGMENT: Range<usize> = 19..44;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BarcodePayload([u8; BarcodePayload::LEN]);

impl BarcodePayload {
    pub const LEN: usize = 44;

    /// Разбирает 44 цифры и проверяет DV по `BARCODE_MOD11`.
    pub fn parse(s: &str) -> Result<Self> {
        Self::parse_with(s, &BARCODE_MOD11)
    }

    pub fn parse_with(s: &str, spec: &ChecksumSpec) -> Result<Self> {
        let digits: [u8; Self::LEN] = s.as_bytes().try_into().map_err(|_| {
            BoletoError::InvalidInput(format!(
                "barcode must have {} digits, got {}",
                Self::LEN,
                s.len()
            ))
        })?;
        let payload = Self::from_digits(digits)?;
        payload.verify(spec)?;
        Ok(payload)
    }

    pub(crate) fn from_digits(digits: [u8; Self::LEN]) -> Result<Self> {
        if let Some(bad) = digits.iter().find(|b| !b.is_ascii_digit()) {
            return Err(BoletoError::InvalidInput(format!(
                "barcode: non-digit byte {bad:#04x}"
            )));
        }
        Ok(BarcodePayload(digits))
    }

    /// 43 цифры без DV, как они идут в расчёт.
    pub fn digits_without_check(&self) -> String {
        let mut s = String::with_capacity(Self::LEN - 1);
        s.push_str(self.field(0..CHECK_DIGIT));
        s.push_str(self.field(CHECK_DIGIT + 1..Self::LEN));
        s
    }

    pub fn verify(&self, spec: &ChecksumSpec) -> Result<()> {
        let expected = spec.check_digit(&self.digits_without_check())?;
        if expected != self.check_digit() {
            return Err(BoletoError::InvalidInput(format!(
                "barcode check digit is {}, expected {expected}",
                self.check_digit()
            )));
        }
        Ok(())
    }

    pub fn as_bytes(&self) -> &[u8; Self::LEN] {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        self.field(0..Self::LEN)
    }

    pub fn field(&self, range: Range<usize>) -> &str {
        // все байты — ASCII-цифры
        std::str::from_utf8(&self.0[range]).unwrap_or_default()
    }

    pub fn bank_code(&self) -> &str {
        self.field(BANK)
    }

    pub fn currency(&self) -> u8 {
        self.0[CURRENCY.start] - b'0'
    }

    pub fn check_digit(&self) -> u8 {
        self.0[CHECK_DIGIT] - b'0'
    }

    pub fn due_factor(&self) -> u32 {
        self.field(DUE_FACTOR)
            .bytes()
            .fold(0, |acc, b| acc * 10 + u32::from(b - b'0'))
    }

    pub fn amount_cents(&self) -> u64 {
        self.field(AMOUNT)
            .bytes()
            .fold(0, |acc, b| acc * 10 + u64::from(b - b'0'))
    }

    pub fn variable_segment(&self) -> VariableSegment {
        let mut digits = [b'0'; VariableSegment::LEN];
        digits.copy_from_slice(&self.0[VARIABLE_SEGMENT]);
        VariableSegment(digits)
    }
}

/// Собирает код de barras с DV по `BARCODE_MOD11`.
pub fn assemble(slip: &SlipRecord, strategy: &dyn BankStrategy) -> Result<BarcodePayload> {
    assemble_with(slip, strategy, &BARCODE_MOD11)
}

/// То же, но с явно заданным правилом DV.
///
/// `parse`, serde и `TypeableLine::to_payload` проверяют DV по
/// `BARCODE_MOD11`; для другого `spec` разбирать через `parse_with` и
/// `TypeableLine::to_payload_with`.
pub fn assemble_with(
    slip: &SlipRecord,
    strategy: &dyn BankStrategy,
    spec: &ChecksumSpec,
) -> Result<BarcodePayload> {
    let bank = pad("bank", &slip.bank, BANK.len())?;
    if bank != strategy.code() {
        return Err(BoletoError::InvalidInput(format!(
            "slip bank {bank} does not match strategy bank {}",
            strategy.code()
        )));
    }

    let mut w = FieldWriter::<{ BarcodePayload::LEN }>::new();
    w.push("bank", &bank)?
        .push_number("currency", u64::from(slip.currency), CURRENCY.len())?
        // место под DV, заполняется после расчёта
        .skip(1)?
        .push_number("due_factor", u64::from(slip.due_factor), DUE_FACTOR.len())?
        .push_number("amount", slip.amount_cents, AMOUNT.len())?;

    let segment = strategy.pack_variable_segment(slip)?;
    w.push("variable_segment", segment.as_str())?;

    let mut payload = BarcodePayload::from_digits(w.finish()?)?;
    let dv = spec.check_digit(&payload.digits_without_check())?;
    payload.0[CHECK_DIGIT] = b'0' + dv;

    tracing::debug!(
        bank = %payload.bank_code(),
        wallet = %slip.wallet,
        due_factor = slip.due_factor,
        "barcode assembled"
    );
    Ok(payload)
}

impl FromStr for BarcodePayload {
    type Err = BoletoError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for BarcodePayload {
    type Error = BoletoError;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<BarcodePayload> for String {
    fn from(p: BarcodePayload) -> String {
        p.as_str().to_string()
    }
}

impl fmt::Display for BarcodePayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for BarcodePayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BarcodePayload").field(&self.as_str()).finish()
    }
}
