//! Поля фиксированной ширины: дополнение нулями слева и буфер `[u8; N]`,
//! который заполняется по смещениям.

use crate::error::{BoletoError, Result};

pub(crate) fn ensure_digits(field: &'static str, value: &str) -> Result<()> {
    match value.chars().find(|c| !c.is_ascii_digit()) {
        Some(bad) => Err(BoletoError::InvalidInput(format!(
            "{field}: non-digit {bad:?} in {value:?}"
        ))),
        None => Ok(()),
    }
}

/// Дополняет `value` нулями слева до `width`. Длиннее `width` -> `FieldTooLong`,
/// обрезки нет.
pub fn pad(field: &'static str, value: &str, width: usize) -> Result<String> {
    ensure_digits(field, value)?;
    if value.len() > width {
        return Err(BoletoError::FieldTooLong {
            field,
            width,
            len: value.len(),
        });
    }
    Ok(format!("{value:0>width$}"))
}

/// Число в поле фиксированной ширины.
pub fn pad_number(field: &'static str, value: u64, width: usize) -> Result<String> {
    pad(field, &value.to_string(), width)
}

/// Буфер из `N` цифр, заполняемый последовательно или по смещению.
#[derive(Debug, Clone)]
pub struct FieldWriter<const N: usize> {
    buf: [u8; N],
    pos: usize,
}

impl<const N: usize> Default for FieldWriter<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> FieldWriter<N> {
    pub fn new() -> Self {
        FieldWriter {
            buf: [b'0'; N],
            pos: 0,
        }
    }

    /// Записывает готовые цифры в текущую позицию.
    pub fn push(&mut self, field: &'static str, digits: &str) -> Result<&mut Self> {
        ensure_digits(field, digits)?;
        let end = self.pos + digits.len();
        if end > N {
            return Err(BoletoError::FieldTooLong {
                field,
                width: N - self.pos,
                len: digits.len(),
            });
        }
        self.buf[self.pos..end].copy_from_slice(digits.as_bytes());
        self.pos = end;
        Ok(self)
    }

    /// Дополняет нулями до `width` и записывает.
    pub fn push_padded(&mut self, field: &'static str, value: &str, width: usize) -> Result<&mut Self> {
        let padded = pad(field, value, width)?;
        self.push(field, &padded)
    }

    pub fn push_number(&mut self, field: &'static str, value: u64, width: usize) -> Result<&mut Self> {
        let padded = pad_number(field, value, width)?;
        self.push(field, &padded)
    }

    pub fn push_digit(&mut self, digit: u8) -> Result<&mut Self> {
        if digit > 9 {
            return Err(BoletoError::InvalidInput(format!("{digit} is not a digit")));
        }
        self.push("digit", &digit.to_string())
    }

    /// Пропускает `n` позиций (под цифру, которая считается позже).
    pub fn skip(&mut self, n: usize) -> Result<&mut Self> {
        if self.pos + n > N {
            return Err(BoletoError::InvalidInput(format!(
                "cannot skip {n} digits at offset {}",
                self.pos
            )));
        }
        self.pos += n;
        Ok(self)
    }

    /// Записывает цифру по абсолютному смещению, не двигая позицию.
    pub fn set_digit(&mut self, offset: usize, digit: u8) -> Result<()> {
        if offset >= N || digit > 9 {
            return Err(BoletoError::InvalidInput(format!(
                "digit {digit} at offset {offset} does not fit {N} digits"
            )));
        }
        self.buf[offset] = b'0' + digit;
        Ok(())
    }

    /// Уже записанные цифры.
    pub fn written(&self) -> &str {
        // в буфере только ASCII-цифры
        std::str::from_utf8(&self.buf[..self.pos]).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.pos == 0
    }

    /// Готовый буфер; все `N` позиций должны быть заполнены.
    pub fn finish(self) -> Result<[u8; N]> {
        if self.pos != N {
            return Err(BoletoError::InvalidInput(format!(
                "expected {N} digits, got {}",
                self.pos
            )));
        }
        Ok(self.buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_left_with_zeros() {
        assert_eq!(pad("agency", "281", 5).unwrap(), "00281");
        assert_eq!(pad("digit", "", 1).unwrap(), "0");
        assert_eq!(pad_number("amount", 214260, 10).unwrap(), "0000214260");
    }

    #[test]
    fn over_length_is_not_truncated() {
        assert_eq!(
            pad("account", "1234567", 6),
            Err(BoletoError::FieldTooLong {
                field: "account",
                width: 6,
                len: 7
            })
        );
    }

    #[test]
    fn writer_fills_by_offset() {
        let mut w = FieldWriter::<6>::new();
        w.push("a", "12").unwrap().skip(1).unwrap().push("b", "456").unwrap();
        assert_eq!(w.len(), 6);
        w.set_digit(2, 3).unwrap();
        assert_eq!(&w.finish().unwrap(), b"123456");
    }

    #[test]
    fn writer_rejects_overflow_and_short_finish() {
        let mut w = FieldWriter::<3>::new();
        w.push("a", "12").unwrap();
        assert!(matches!(
            w.push("b", "34"),
            Err(BoletoError::FieldTooLong { field: "b", .. })
        ));
        assert_eq!(w.written(), "12");
        assert!(matches!(w.finish(), Err(BoletoError::InvalidInput(_))));
    }
}
