//! Взвешенная контрольная цифра. Один движок обслуживает и mod11 (DV банка,
//! DV кода de barras), и mod10/Luhn (DV блоков linha digitável).

use crate::error::{BoletoError, Result};

/// Порядок обхода цифр; первый вес применяется к первой цифре обхода.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    RightToLeft,
    LeftToRight,
}

/// Как произведение цифры на вес попадает в сумму.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Folding {
    Plain,
    /// Двузначное произведение складывается по цифрам (18 -> 1 + 8).
    Luhn,
}

/// Правило по умолчанию для остатка, если его нет в таблице исключений.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    Remainder,
    /// `modulus - остаток`.
    Complement,
}

/// Описание одного семейства контрольных цифр.
///
/// Таблица исключений сопоставляет «сырое» значение (результат `fallback`,
/// может быть двузначным: 10, 11) итоговой цифре. Так таблицы банков
/// переносятся буквально: «0, 10, 11 -> 0».
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChecksumSpec {
    pub weights: &'static [u32],
    pub direction: Direction,
    pub folding: Folding,
    pub modulus: u32,
    pub fallback: Fallback,
    pub exceptions: &'static [(u32, u8)],
}

/// mod11 с весами 2..9 справа налево, без исключений. Банки добавляют свои.
pub const MOD11: ChecksumSpec = ChecksumSpec {
    weights: &[2, 3, 4, 5, 6, 7, 8, 9],
    direction: Direction::RightToLeft,
    folding: Folding::Plain,
    modulus: 11,
    fallback: Fallback::Complement,
    exceptions: &[],
};

/// DV кода de barras (позиция 5): 0, 1, 10, 11 -> 1.
pub const BARCODE_MOD11: ChecksumSpec = MOD11.with_exceptions(&[(0, 1), (1, 1), (10, 1), (11, 1)]);

/// DV блоков linha digitável: веса 2,1 справа налево, Luhn.
pub const MOD10: ChecksumSpec = ChecksumSpec {
    weights: &[2, 1],
    direction: Direction::RightToLeft,
    folding: Folding::Luhn,
    modulus: 10,
    fallback: Fallback::Complement,
    exceptions: &[(10, 0)],
};

impl ChecksumSpec {
    pub const fn with_exceptions(self, exceptions: &'static [(u32, u8)]) -> Self {
        ChecksumSpec { exceptions, ..self }
    }

    pub fn check_digit(&self, digits: &str) -> Result<u8> {
        check_digit(digits, self)
    }

    fn weighted_sum(&self, digits: impl Iterator<Item = u8>) -> u64 {
        digits
            .zip(self.weights.iter().cycle())
            .map(|(d, &w)| {
                let p = u64::from(d - b'0') * u64::from(w);
                match self.folding {
                    Folding::Plain => p,
                    Folding::Luhn => p / 10 + p % 10,
                }
            })
            .sum()
    }
}

/// Контрольная цифра `digits` по правилам `spec`.
///
/// Пустая строка или не-цифра -> `InvalidInput`; ничего не приводится молча.
pub fn check_digit(digits: &str, spec: &ChecksumSpec) -> Result<u8> {
    if digits.is_empty() {
        return Err(BoletoError::InvalidInput("empty digit string".into()));
    }
    if let Some(bad) = digits.chars().find(|c| !c.is_ascii_digit()) {
        return Err(BoletoError::InvalidInput(format!(
            "non-digit {bad:?} in {digits:?}"
        )));
    }
    if spec.modulus == 0 || spec.weights.is_empty() {
        return Err(BoletoError::InvalidInput(
            "checksum spec needs weights and a non-zero modulus".into(),
        ));
    }

    let sum = match spec.direction {
        Direction::RightToLeft => spec.weighted_sum(digits.bytes().rev()),
        Direction::LeftToRight => spec.weighted_sum(digits.bytes()),
    };
    // остаток < modulus, влезает в u32
    let remainder = (sum % u64::from(spec.modulus)) as u32;
    let raw = match spec.fallback {
        Fallback::Remainder => remainder,
        Fallback::Complement => spec.modulus - remainder,
    };

    if let Some(&(_, digit)) = spec.exceptions.iter().find(|(from, _)| *from == raw) {
        return Ok(digit);
    }
    u8::try_from(raw)
        .ok()
        .filter(|d| *d < 10)
        .ok_or(BoletoError::UnmappedCheckValue(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    const CAIXA: ChecksumSpec = MOD11.with_exceptions(&[(0, 0), (10, 0), (11, 0)]);

    #[rstest]
    #[case("001905009", 5)]
    #[case("4014481606", 9)]
    #[case("0680935031", 4)]
    #[case("0", 0)]
    #[case("1", 8)]
    fn mod10_blocks(#[case] digits: &str, #[case] expected: u8) {
        assert_eq!(check_digit(digits, &MOD10), Ok(expected));
    }

    #[rstest]
    #[case("721692", 0)]
    #[case("000082107220355", 6)]
    #[case("5", 1)]
    #[case("00", 0)]
    fn mod11_bank_table(#[case] digits: &str, #[case] expected: u8) {
        assert_eq!(CAIXA.check_digit(digits), Ok(expected));
    }

    #[test]
    fn barcode_digit_of_published_example() {
        // 0019 3 37370000000100 0500940144816060680935031, DV на месте 5 -> 3
        let without_dv = "0019373700000001000500940144816060680935031";
        assert_eq!(check_digit(without_dv, &BARCODE_MOD11), Ok(3));
    }

    #[test]
    fn barcode_table_never_yields_zero() {
        // сумма 0 -> остаток 0 -> 11 -> 1
        assert_eq!(check_digit("0000", &BARCODE_MOD11), Ok(1));
    }

    #[test]
    fn direction_changes_weight_alignment() {
        let rtl = ChecksumSpec {
            weights: &[1, 2],
            direction: Direction::RightToLeft,
            folding: Folding::Plain,
            modulus: 10,
            fallback: Fallback::Remainder,
            exceptions: &[],
        };
        let ltr = ChecksumSpec {
            direction: Direction::LeftToRight,
            ..rtl
        };
        assert_eq!(rtl.check_digit("12"), Ok(4));
        assert_eq!(ltr.check_digit("12"), Ok(5));
    }

    #[test]
    fn unmapped_two_digit_value_is_an_error() {
        assert_eq!(
            check_digit("0", &MOD11),
            Err(BoletoError::UnmappedCheckValue(11))
        );
    }

    #[rstest]
    #[case("")]
    #[case("12a4")]
    #[case(" 123")]
    #[case("１２")]
    fn rejects_bad_input(#[case] digits: &str) {
        assert!(matches!(
            check_digit(digits, &MOD10),
            Err(BoletoError::InvalidInput(_))
        ));
    }

    proptest! {
        #[test]
        fn deterministic_single_digit(digits in "[0-9]{1,44}") {
            let a = check_digit(&digits, &BARCODE_MOD11).unwrap();
            let b = check_digit(&digits, &BARCODE_MOD11).unwrap();
            prop_assert_eq!(a, b);
            prop_assert!((1..=9).contains(&a));

            let l = check_digit(&digits, &MOD10).unwrap();
            prop_assert!(l <= 9);
            prop_assert_eq!(l, check_digit(&digits, &MOD10).unwrap());
        }
    }
}
