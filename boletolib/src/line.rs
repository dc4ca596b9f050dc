//! Linha digitável: 47 цифр в пяти блоках.
//!
//! `AAABC.CCCCX DDDDD.DDDDDY EEEEE.EEEEEZ K UUUUVVVVVVVVVV`
//!
//! * блок 1: банк, валюта, campo livre[0..5] + DV mod10
//! * блок 2: campo livre[5..15] + DV mod10
//! * блок 3: campo livre[15..25] + DV mod10
//! * блок 4: DV кода de barras
//! * блок 5: fator de vencimento + сумма

use crate::{
    barcode::BarcodePayload,
    checksum::{ChecksumSpec, BARCODE_MOD11, MOD10},
    digits::FieldWriter,
    error::{BoletoError, Result},
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::{fmt, ops::Range, str::FromStr};

/// Границы блоков внутри 47 цифр.
pub const BLOCKS: [Range<usize>; 5] = [0..10, 10..21, 21..32, 32..33, 33..47];

/// Откуда в коде de barras берутся цифры блоков 1-3 (без DV).
const BLOCK1_SOURCES: [Range<usize>; 2] = [0..4, 19..24];
const BLOCK2_SOURCE: Range<usize> = 24..34;
const BLOCK3_SOURCE: Range<usize> = 34..44;
const BLOCK5_SOURCE: Range<usize> = 5..19;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TypeableLine([u8; TypeableLine::LEN]);

impl TypeableLine {
    pub const LEN: usize = 47;

    /// Чистая функция от payload: один и тот же вход — одна и та же строка.
    pub fn from_payload(payload: &BarcodePayload) -> Result<Self> {
        let mut block1 = String::with_capacity(9);
        for r in BLOCK1_SOURCES {
            block1.push_str(payload.field(r));
        }
        let block2 = payload.field(BLOCK2_SOURCE);
        let block3 = payload.field(BLOCK3_SOURCE);

        let mut w = FieldWriter::<{ Self::LEN }>::new();
        w.push("block1", &block1)?
            .push_digit(MOD10.check_digit(&block1)?)?
            .push("block2", block2)?
            .push_digit(MOD10.check_digit(block2)?)?
            .push("block3", block3)?
            .push_digit(MOD10.check_digit(block3)?)?
            .push_digit(payload.check_digit())?
            .push("block5", payload.field(BLOCK5_SOURCE))?;
        Ok(TypeableLine(w.finish()?))
    }

    /// Обратно в код de barras; DV кода проверяется по `BARCODE_MOD11`.
    pub fn to_payload(&self) -> Result<BarcodePayload> {
        self.to_payload_with(&BARCODE_MOD11)
    }

    /// То же для кода, собранного с другим правилом DV.
    pub fn to_payload_with(&self, spec: &ChecksumSpec) -> Result<BarcodePayload> {
        let mut s = String::with_capacity(BarcodePayload::LEN);
        s.push_str(&self.digits()[0..4]);
        s.push_str(self.block(3));
        s.push_str(self.block(4));
        s.push_str(&self.digits()[4..9]);
        s.push_str(&self.digits()[10..20]);
        s.push_str(&self.digits()[21..31]);
        BarcodePayload::parse_with(&s, spec)
    }

    /// Все 47 цифр без пунктуации.
    pub fn digits(&self) -> &str {
        std::str::from_utf8(&self.0).unwrap_or_default()
    }

    /// Блок `index` (0..5) без пунктуации.
    pub fn block(&self, index: usize) -> &str {
        BLOCKS
            .get(index)
            .map(|r| &self.digits()[r.clone()])
            .unwrap_or_default()
    }

    fn verify_blocks(&self) -> Result<()> {
        for (n, block) in (0..3).map(|i| (i + 1, self.block(i))) {
            let (body, dv) = block.split_at(block.len() - 1);
            let expected = MOD10.check_digit(body)?;
            if dv != expected.to_string() {
                return Err(BoletoError::InvalidInput(format!(
                    "block {n} check digit is {dv}, expected {expected}"
                )));
            }
        }
        Ok(())
    }
}

impl FromStr for TypeableLine {
    type Err = BoletoError;

    /// Принимает вид с пунктуацией или 47 цифр подряд.
    fn from_str(s: &str) -> Result<Self> {
        let re = Regex::new(
            r"^(\d{5})\.?(\d{5})\s*(\d{5})\.?(\d{6})\s*(\d{5})\.?(\d{6})\s*(\d)\s*(\d{14})$",
        )
        .map_err(|e| BoletoError::InvalidInput(e.to_string()))?;
        let caps = re
            .captures(s.trim())
            .ok_or_else(|| BoletoError::InvalidInput(format!("bad typeable line: {s:?}")))?;

        let mut w = FieldWriter::<{ Self::LEN }>::new();
        for group in caps.iter().skip(1).flatten() {
            w.push("typeable_line", group.as_str())?;
        }
        let line = TypeableLine(w.finish()?);
        line.verify_blocks()?;
        line.to_payload()?;
        Ok(line)
    }
}

impl TryFrom<String> for TypeableLine {
    type Error = BoletoError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<TypeableLine> for String {
    fn from(l: TypeableLine) -> String {
        l.to_string()
    }
}

impl fmt::Display for TypeableLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (b1, b2, b3) = (self.block(0), self.block(1), self.block(2));
        write!(
            f,
            "{}.{} {}.{} {}.{} {} {}",
            &b1[..5],
            &b1[5..],
            &b2[..5],
            &b2[5..],
            &b3[..5],
            &b3[5..],
            self.block(3),
            self.block(4)
        )
    }
}

impl fmt::Debug for TypeableLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeableLine").field(&self.to_string()).finish()
    }
}

impl TryFrom<&BarcodePayload> for TypeableLine {
    type Error = BoletoError;

    fn try_from(payload: &BarcodePayload) -> Result<Self> {
        Self::from_payload(payload)
    }
}
