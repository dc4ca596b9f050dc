//! Сумма boleto: в коде de barras — 10 цифр сентаво без разделителя.

use crate::{
    barcode::AMOUNT,
    error::{BoletoError, Result},
};
use rust_decimal::{prelude::ToPrimitive, Decimal};

/// Наибольшая сумма, которая помещается в 10 цифр.
pub const MAX_CENTS: u64 = 9_999_999_999;

/// Reais -> сентаво. Отрицательные и дробные сентаво не принимаются.
pub fn to_cents(value: Decimal) -> Result<u64> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(BoletoError::InvalidInput(format!("negative amount: {value}")));
    }
    let cents = value
        .checked_mul(Decimal::ONE_HUNDRED)
        .ok_or_else(|| BoletoError::InvalidInput(format!("amount overflow: {value}")))?;
    if !cents.fract().is_zero() {
        return Err(BoletoError::InvalidInput(format!(
            "amount has fractions of a cent: {value}"
        )));
    }
    let too_long = || BoletoError::FieldTooLong {
        field: "amount",
        width: AMOUNT.len(),
        len: cents.trunc().abs().to_string().len(),
    };
    let cents = cents.trunc().to_u64().ok_or_else(too_long)?;
    if cents > MAX_CENTS {
        return Err(too_long());
    }
    Ok(cents)
}

pub fn from_cents(cents: u64) -> Decimal {
    Decimal::from_i128_with_scale(i128::from(cents), 2)
}
