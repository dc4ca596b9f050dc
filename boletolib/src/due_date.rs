//! Fator de vencimento: число дней от базовой даты, 4 цифры.
//!
//! По FEBRABAN база 1997-10-07, фактор 1000 = 2000-07-03. После 9999
//! (2025-02-21) счёт начинается снова с 1000 (2025-02-22).

use crate::error::{BoletoError, Result};
use chrono::{Duration, NaiveDate};

/// Фактор «без срока».
pub const NO_DUE_DATE: u32 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DueDateCalendar {
    pub epoch: NaiveDate,
    pub first: u32,
    pub last: u32,
}

impl Default for DueDateCalendar {
    fn default() -> Self {
        Self::febraban()
    }
}

impl DueDateCalendar {
    pub fn febraban() -> Self {
        DueDateCalendar {
            epoch: NaiveDate::from_ymd_opt(1997, 10, 7).expect("1997-10-07 is a valid date"),
            first: 1000,
            last: 9999,
        }
    }

    fn span(&self) -> i64 {
        i64::from(self.last) - i64::from(self.first) + 1
    }

    /// Фактор для даты. Раньше `epoch + first` дней -> `DueDateOutOfRange`.
    pub fn factor(&self, date: NaiveDate) -> Result<u32> {
        let days = (date - self.epoch).num_days();
        let first = i64::from(self.first);
        if days < first || self.span() <= 0 {
            return Err(BoletoError::DueDateOutOfRange(date));
        }
        let factor = first + (days - first) % self.span();
        u32::try_from(factor).map_err(|_| BoletoError::DueDateOutOfRange(date))
    }

    /// Дата фактора в том цикле, который ближе всего к `near`.
    pub fn resolve(&self, factor: u32, near: NaiveDate) -> Option<NaiveDate> {
        if factor < self.first || factor > self.last || self.span() <= 0 {
            return None;
        }
        let span = self.span();
        let base = i64::from(factor);
        let near_days = (near - self.epoch).num_days();
        let k = ((near_days - base).max(0) + span / 2) / span;

        [(k - 1).max(0), k, k + 1]
            .into_iter()
            .map(|k| base + k * span)
            .min_by_key(|days| (days - near_days).abs())
            .and_then(|days| self.epoch.checked_add_signed(Duration::days(days)))
    }
}
